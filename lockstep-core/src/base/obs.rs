//! Raw observation.
use crate::error::PreprocessError;
use ndarray::{Array2, Array3, ArrayD};

/// Observation as produced by an environment, before preprocessing.
///
/// Environments either return a bare image or a tuple whose first element is the
/// image (e.g. `(image, mission)`); the remaining elements are ignored.
/// Images are `u8` arrays of shape `[H, W]` or `[H, W, C]`.
#[derive(Clone, Debug, PartialEq)]
pub enum RawObs {
    /// A bare image.
    Image(ArrayD<u8>),

    /// A compound observation, the image being the first element.
    Tuple(Vec<RawObs>),
}

impl RawObs {
    /// Returns the image part of the observation.
    pub fn image(&self) -> Result<&ArrayD<u8>, PreprocessError> {
        match self {
            RawObs::Image(img) => Ok(img),
            RawObs::Tuple(elems) => match elems.first() {
                Some(RawObs::Image(img)) => Ok(img),
                Some(RawObs::Tuple(_)) => Err(PreprocessError::NestedTuple),
                None => Err(PreprocessError::EmptyTuple),
            },
        }
    }

    /// Returns a copy of the observation with the image part replaced.
    pub(crate) fn with_image(&self, img: ArrayD<u8>) -> Self {
        match self {
            RawObs::Image(_) => RawObs::Image(img),
            RawObs::Tuple(elems) => {
                let mut elems = elems.clone();
                if let Some(first) = elems.first_mut() {
                    *first = RawObs::Image(img);
                }
                RawObs::Tuple(elems)
            }
        }
    }
}

impl From<ArrayD<u8>> for RawObs {
    fn from(img: ArrayD<u8>) -> Self {
        RawObs::Image(img)
    }
}

impl From<Array2<u8>> for RawObs {
    fn from(img: Array2<u8>) -> Self {
        RawObs::Image(img.into_dyn())
    }
}

impl From<Array3<u8>> for RawObs {
    fn from(img: Array3<u8>) -> Self {
        RawObs::Image(img.into_dyn())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_image_of_tuple() {
        let img = Array3::<u8>::from_elem((2, 2, 3), 7);
        let obs = RawObs::Tuple(vec![img.clone().into(), Array3::<u8>::zeros((1, 1, 1)).into()]);
        assert_eq!(obs.image().unwrap(), &img.into_dyn());
    }

    #[test]
    fn test_image_of_malformed_tuple() {
        assert!(matches!(
            RawObs::Tuple(vec![]).image(),
            Err(PreprocessError::EmptyTuple)
        ));
        let nested = RawObs::Tuple(vec![RawObs::Tuple(vec![])]);
        assert!(matches!(nested.image(), Err(PreprocessError::NestedTuple)));
    }
}
