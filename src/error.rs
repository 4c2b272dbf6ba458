//! Error types for tannenbaum.
//!
//! The scene itself never fails: a missing or zero-sized surface just skips
//! the frame. These errors cover the edges around it: GPU presentation,
//! window creation, config loading, and headless snapshots.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// The surface reported no texture formats for the chosen adapter.
    #[error("The window surface supports no texture formats on this adapter")]
    NoSurfaceFormat,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur while loading or validating a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown/mistyped keys.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is outside the range the scene can work with.
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Errors that can occur when rendering a headless snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Width or height was zero.
    #[error("Snapshot size must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
    /// The supplied config was rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Failed to encode the image.
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] image::ImageError),
    /// The pixel buffer did not match the canvas dimensions.
    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// Errors that can occur when running the windowed scene.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The supplied config was rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
