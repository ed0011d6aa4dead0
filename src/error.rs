use thiserror::Error;

/// Errors returned by the drawing surface.
///
/// Out-of-order pointer input is not an error: moves without a preceding
/// press and duplicate releases are swallowed by the surface itself.
#[derive(Error, Debug)]
pub enum WhiteboardError {
    /// The surface has not been given a size yet
    #[error("drawing surface is not initialized")]
    NotInitialized,
    /// The operation is only valid while no stroke is in flight
    #[error("a stroke is in progress")]
    StrokeActive,
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("failed to encode canvas: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for surface operations
pub type WhiteboardResult<T = ()> = Result<T, WhiteboardError>;
