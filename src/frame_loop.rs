//! Lifecycle of the continuous render loop.

/// Where the render loop is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No usable surface yet; frames are skipped.
    #[default]
    Idle,
    /// Rendering every frame.
    Running,
    /// Torn down. Terminal.
    Stopped,
}

/// `Idle → Running → Stopped` state machine.
///
/// A zero-sized resize drops a running loop back to `Idle`; nothing leaves
/// `Stopped`.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    state: LoopState,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Begin rendering. Has no effect once stopped.
    pub fn start(&mut self) {
        self.transition(LoopState::Running);
    }

    /// Pause until the surface becomes drawable again.
    pub fn idle(&mut self) {
        self.transition(LoopState::Idle);
    }

    /// Tear down for good.
    pub fn stop(&mut self) {
        self.transition(LoopState::Stopped);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state == LoopState::Stopped
    }

    fn transition(&mut self, next: LoopState) {
        if self.state == next || self.state == LoopState::Stopped {
            return;
        }
        log::debug!("Frame loop {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
