use thiserror::Error;

use crate::layer::LayerId;

/// Errors raised by edits against the layer store and the edit session.
///
/// Every variant is recoverable: an operation that fails leaves the
/// document exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Coordinate outside `[0, N)²`
    #[error("cell ({x}, {y}) is outside the canvas")]
    OutOfBounds { x: i32, y: i32 },

    /// Color string not of the form `#rrggbb`
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("cannot delete the last remaining layer")]
    LastLayerDeletionRefused,

    #[error("no layer with id {0}")]
    UnknownLayerId(LayerId),

    #[error("unknown tool {0:?}")]
    UnknownTool(String),
}

/// Result type for edit operations
pub type EditResult<T = ()> = Result<T, EditError>;

/// Errors that can occur while flattening and encoding an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export scale must be at least 1, got {0}")]
    InvalidScale(u32),

    #[error("export of a {grid_size}x{grid_size} grid at scale {scale} exceeds image limits")]
    TooLarge { grid_size: usize, scale: u32 },

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors that can occur while loading the editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
