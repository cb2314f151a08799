//! Temporal stack of the most recent frames.
use crate::{error::PreprocessError, Frame};
use ndarray::{s, Array3, Axis};

/// Stacked frames `[history_size, H, W]`, index 0 being the oldest.
pub type History = Array3<f32>;

/// A fixed-length sequence of the most recent frames.
///
/// The length never changes after construction. [`HistoryBuffer::push`] shifts the
/// frames towards the oldest end and appends the new one, and
/// [`HistoryBuffer::initialize`] fills every slot with the same frame at the start
/// of an episode.
#[derive(Clone, Debug)]
pub struct HistoryBuffer {
    frames: History,
}

impl HistoryBuffer {
    /// Creates a zero-filled buffer of `history_size` frames of `height x width`.
    ///
    /// # Panics
    ///
    /// Panics if `history_size` is zero.
    pub fn new(history_size: usize, height: usize, width: usize) -> Self {
        assert!(history_size > 0, "history_size must be positive");
        Self {
            frames: Array3::zeros((history_size, height, width)),
        }
    }

    /// The number of frames in the buffer.
    pub fn len(&self) -> usize {
        self.frames.len_of(Axis(0))
    }

    /// Shape `[H, W]` of the frames in the buffer.
    pub fn frame_shape(&self) -> [usize; 2] {
        let (_, h, w) = self.frames.dim();
        [h, w]
    }

    fn check(&self, frame: &Frame) -> Result<(), PreprocessError> {
        let (h, w) = frame.dim();
        if [h, w] != self.frame_shape() {
            return Err(PreprocessError::FrameShape {
                expected: self.frame_shape(),
                found: frame.shape().to_vec(),
            });
        }
        Ok(())
    }

    /// Fills every slot with a copy of `frame`.
    pub fn initialize(&mut self, frame: &Frame) -> Result<(), PreprocessError> {
        self.check(frame)?;
        for mut slot in self.frames.outer_iter_mut() {
            slot.assign(frame);
        }
        Ok(())
    }

    /// Drops the oldest frame, shifts the others and appends `frame` as the newest one.
    pub fn push(&mut self, frame: &Frame) -> Result<(), PreprocessError> {
        self.check(frame)?;
        let n = self.len();

        // frame(j - 1) <- frame(j) for j = 1, ..., n - 1
        for j in 1..n {
            let (mut dst, src) = self
                .frames
                .multi_slice_mut((s![j - 1, .., ..], s![j, .., ..]));
            dst.assign(&src);
        }
        self.frames.index_axis_mut(Axis(0), n - 1).assign(frame);
        Ok(())
    }

    /// Returns an independent copy of the buffer.
    pub fn snapshot(&self) -> History {
        self.frames.clone()
    }

    /// A view of the current frames.
    pub fn frames(&self) -> &History {
        &self.frames
    }
}
