use ndarray::{ArrayD, arr0};

use crate::Element;

/// What the estimators hand back to callers.
///
/// Zero-dimensional state comes out as a plain number, anything else as an
/// array with the state's shape and element type.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate<A> {
    Scalar(A),
    Array(ArrayD<A>),
}

impl<A: Element> Estimate<A> {
    pub(crate) fn from_array(array: ArrayD<A>) -> Self {
        if array.ndim() == 0 {
            if let Some(&x) = array.first() {
                return Self::Scalar(x);
            }
        }
        Self::Array(array)
    }

    pub fn as_scalar(&self) -> Option<A> {
        match self {
            Self::Scalar(x) => Some(*x),
            Self::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayD<A>> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(array) => Some(array),
        }
    }

    pub fn into_array(self) -> ArrayD<A> {
        match self {
            Self::Scalar(x) => arr0(x).into_dyn(),
            Self::Array(array) => array,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Array(array) => array.shape().to_vec(),
        }
    }

    /// True when every element is NaN, i.e. nothing has been observed yet.
    pub fn is_nan(&self) -> bool {
        match self {
            Self::Scalar(x) => x.is_nan(),
            Self::Array(array) => array.iter().all(|x| x.is_nan()),
        }
    }
}

#[cfg(test)]
mod test {
    use ndarray::{Array2, IxDyn};

    use super::*;

    #[test]
    fn test_zero_dimensional_becomes_scalar() {
        let estimate = Estimate::from_array(arr0(2.5f64).into_dyn());
        assert_eq!(estimate, Estimate::Scalar(2.5));
        assert_eq!(estimate.as_scalar(), Some(2.5));
        assert!(estimate.shape().is_empty());
    }

    #[test]
    fn test_array_keeps_shape() {
        let eye = Array2::<f32>::eye(2).into_dyn();
        let estimate = Estimate::from_array(eye.clone());
        assert_eq!(estimate.shape(), vec![2, 2]);
        assert_eq!(estimate.as_scalar(), None);
        assert_eq!(estimate.as_array(), Some(&eye));
        assert_eq!(estimate.into_array(), eye);
    }

    #[test]
    fn test_is_nan() {
        assert!(Estimate::Scalar(f64::NAN).is_nan());
        assert!(!Estimate::Scalar(0.0f64).is_nan());
        assert!(Estimate::from_array(ArrayD::from_elem(IxDyn(&[2, 3]), f32::NAN)).is_nan());
        assert_eq!(Estimate::Scalar(1.0f32).into_array(), arr0(1.0f32).into_dyn());
    }
}
