//! Errors in the library.
use thiserror::Error;

/// An observation could not be turned into a frame.
///
/// Continuing after this error would desynchronize the actor protocol,
/// so actors treat it as fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreprocessError {
    /// A compound observation without elements.
    #[error("Observation tuple is empty")]
    EmptyTuple,

    /// The first element of a compound observation is itself compound.
    #[error("First element of observation tuple is not an image")]
    NestedTuple,

    /// The image is neither `[H, W]` nor `[H, W, C]`.
    #[error("Expected an image of rank 2 or 3, got shape {0:?}")]
    Rank(Vec<usize>),

    /// The number of channels is not one of 1, 3 and 4.
    #[error("Unsupported number of channels: {0}")]
    Channels(usize),

    /// The image has no pixels.
    #[error("Image has no pixels, shape {0:?}")]
    EmptyImage(Vec<usize>),

    /// The target size of resampling is degenerate.
    #[error("Invalid target size {height}x{width}")]
    TargetSize {
        /// Target height.
        height: usize,
        /// Target width.
        width: usize,
    },

    /// A frame does not fit the history buffer.
    #[error("Frame of shape {found:?} does not match {expected:?}")]
    FrameShape {
        /// Shape of frames in the buffer.
        expected: [usize; 2],
        /// Shape of the given frame.
        found: Vec<usize>,
    },
}
