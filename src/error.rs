use thiserror::Error;

/// Errors raised when resolving a tool from its control id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool id: {0}")]
    UnknownTool(String),
}

/// Errors raised by whole-buffer surface operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Snapshot is {snapshot:?} but surface is {surface:?}")]
    SnapshotMismatch {
        snapshot: (u32, u32),
        surface: (u32, u32),
    },
}

/// Errors that can occur while exporting the surface as an image file
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write image file: {0}")]
    Io(#[from] std::io::Error),
    /// The host platform refused the download (web only)
    #[error("Platform export failed: {0}")]
    Platform(String),
}
