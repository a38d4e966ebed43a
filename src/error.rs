// Error types for GPU bootstrap and texture loading

use std::path::PathBuf;

/// Errors raised while setting up the window, device, shaders or textures.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    /// The window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// The window surface could not be created.
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter is compatible with the window surface.
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    /// The adapter refused the device request.
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Shader compilation or pipeline linking failed validation.
    #[error("shader `{label}` failed validation: {message}")]
    Shader { label: String, message: String },

    /// A texture source could not be loaded.
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Errors raised while producing texture data.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The image file could not be opened or decoded.
    #[error("failed to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The pixel buffer does not match the declared dimensions.
    #[error("expected {expected} bytes of RGBA data, got {actual}")]
    Size { expected: usize, actual: usize },

    /// The image is empty or exceeds the device's 2D texture limit.
    #[error("texture size {width}x{height} is outside 1..={max}")]
    Dimensions { width: u32, height: u32, max: u32 },
}
