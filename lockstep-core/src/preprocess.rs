//! Conversion of raw observations into single-channel frames.
use crate::{error::PreprocessError, RawObs};
use image::{
    imageops::{resize, FilterType},
    ImageBuffer, Luma,
};
use ndarray::{Array2, ArrayD, Axis, Ix3};
use serde::{Deserialize, Serialize};

/// A preprocessed observation, `[H, W]` intensities in `0.0..=255.0`.
pub type Frame = Array2<f32>;

/// Converts a [`RawObs`] into a [`Frame`] of fixed size.
///
/// Implementations must be pure: the same observation always gives the same frame.
pub trait FramePreprocessor {
    /// Processes an observation.
    fn process(&self, obs: &RawObs) -> Result<Frame, PreprocessError>;

    /// Shape `[H, W]` of the frames produced by [`FramePreprocessor::process`].
    fn shape(&self) -> [usize; 2];
}

/// Resampling algorithm.
///
/// Must match the one used when the model consuming the frames was trained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Nearest neighbour.
    Nearest,

    /// Bilinear (triangle filter).
    Bilinear,
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::Bilinear
    }
}

/// Converts to luminance and resamples to `height x width`.
///
/// Luminance follows ITU-R 601-2, `L = R * 299/1000 + G * 587/1000 + B * 114/1000`,
/// computed in fixed point on `u8` values. Alpha channels are ignored and
/// single-channel images are taken as they are.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayscaleResize {
    height: usize,
    width: usize,
    interpolation: Interpolation,
}

impl GrayscaleResize {
    /// Creates a preprocessor producing `height x width` frames.
    pub fn new(
        height: usize,
        width: usize,
        interpolation: Interpolation,
    ) -> Result<Self, PreprocessError> {
        if height == 0 || width == 0 || height > u32::MAX as usize || width > u32::MAX as usize {
            return Err(PreprocessError::TargetSize { height, width });
        }
        Ok(Self {
            height,
            width,
            interpolation,
        })
    }

    #[inline]
    fn luma(r: u8, g: u8, b: u8) -> u8 {
        ((19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 0x8000) >> 16) as u8
    }

    fn grayscale(img: &ArrayD<u8>) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>, PreprocessError> {
        let shape = img.shape().to_vec();
        let view = match img.ndim() {
            2 => img.view().insert_axis(Axis(2)),
            3 => img.view(),
            _ => return Err(PreprocessError::Rank(shape)),
        };
        let view = view
            .into_dimensionality::<Ix3>()
            .map_err(|_| PreprocessError::Rank(shape.clone()))?;
        let (h, w, c) = view.dim();
        if h == 0 || w == 0 {
            return Err(PreprocessError::EmptyImage(shape));
        }

        let buf = match c {
            1 => view.index_axis(Axis(2), 0).iter().copied().collect::<Vec<_>>(),
            3 | 4 => view
                .lanes(Axis(2))
                .into_iter()
                .map(|px| Self::luma(px[0], px[1], px[2]))
                .collect::<Vec<_>>(),
            _ => return Err(PreprocessError::Channels(c)),
        };

        ImageBuffer::from_raw(w as u32, h as u32, buf).ok_or(PreprocessError::EmptyImage(shape))
    }
}

impl Default for GrayscaleResize {
    fn default() -> Self {
        Self {
            height: 7,
            width: 7,
            interpolation: Interpolation::default(),
        }
    }
}

impl FramePreprocessor for GrayscaleResize {
    fn process(&self, obs: &RawObs) -> Result<Frame, PreprocessError> {
        let img = Self::grayscale(obs.image()?)?;
        let (w, h) = img.dimensions();
        let (nw, nh) = (self.width as u32, self.height as u32);

        let data = if (w, h) == (nw, nh) {
            img.into_raw().into_iter().map(f32::from).collect::<Vec<_>>()
        } else {
            match self.interpolation {
                Interpolation::Nearest => resize(&img, nw, nh, FilterType::Nearest)
                    .into_raw()
                    .into_iter()
                    .map(f32::from)
                    .collect::<Vec<_>>(),
                Interpolation::Bilinear => {
                    // f32 subpixels are clamped to 0.0..=1.0 while resampling
                    let buf = img
                        .into_raw()
                        .into_iter()
                        .map(|v| f32::from(v) / 255.0)
                        .collect::<Vec<_>>();
                    let img = ImageBuffer::<Luma<f32>, _>::from_raw(w, h, buf).ok_or_else(|| {
                        PreprocessError::EmptyImage(vec![h as usize, w as usize])
                    })?;
                    resize(&img, nw, nh, FilterType::Triangle)
                        .into_raw()
                        .into_iter()
                        .map(|v| v * 255.0)
                        .collect::<Vec<_>>()
                }
            }
        };

        let found = vec![data.len()];
        Array2::from_shape_vec((self.height, self.width), data).map_err(|_| {
            PreprocessError::FrameShape {
                expected: self.shape(),
                found,
            }
        })
    }

    fn shape(&self) -> [usize; 2] {
        [self.height, self.width]
    }
}
