//! Conversion and validation of observations fed to the estimators.
//!
//! Plain numbers are promoted to zero-dimensional arrays, arrays of any
//! dimensionality are viewed as `IxDyn` without copying. `serde_json::Value`
//! is the dynamically-typed entry point and the only one that can fail with
//! [`AverageError::InvalidType`].
use ndarray::{Array, ArrayBase, ArrayD, ArrayView, ArrayViewD, CowArray, Data, Dimension, IxDyn, arr0};
use serde_json::Value;

use crate::{AverageError, Element, Result};

/// A validated-by-type observation, borrowed where possible.
#[derive(Debug, Clone)]
pub struct Datum<'a, A>(CowArray<'a, A, IxDyn>);

impl<'a, A: Element> Datum<'a, A> {
    pub fn scalar(x: A) -> Self {
        Self(CowArray::from(arr0(x).into_dyn()))
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn view(&self) -> ArrayViewD<'_, A> {
        self.0.view()
    }

    pub fn into_array(self) -> ArrayD<A> {
        self.0.into_owned()
    }

    /// No broadcasting: the shapes must be equal.
    pub(crate) fn expect_shape(self, expected: &[usize]) -> Result<Self> {
        if self.shape() != expected {
            return Err(AverageError::ShapeMismatch {
                expected: expected.to_vec(),
                found: self.shape().to_vec(),
            });
        }
        Ok(self)
    }
}

/// Anything an estimator accepts as an observation.
pub trait IntoDatum<'a, A: Element> {
    fn into_datum(self) -> Result<Datum<'a, A>>;
}

impl<'a> IntoDatum<'a, f64> for f64 {
    fn into_datum(self) -> Result<Datum<'a, f64>> {
        Ok(Datum::scalar(self))
    }
}

impl<'a> IntoDatum<'a, f32> for f32 {
    fn into_datum(self) -> Result<Datum<'a, f32>> {
        Ok(Datum::scalar(self))
    }
}

impl<'a, A: Element> IntoDatum<'a, A> for i32 {
    fn into_datum(self) -> Result<Datum<'a, A>> {
        Ok(Datum::scalar(A::from_coef(f64::from(self))))
    }
}

impl<'a, A, S, D> IntoDatum<'a, A> for &'a ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn into_datum(self) -> Result<Datum<'a, A>> {
        Ok(Datum(CowArray::from(self.view().into_dyn())))
    }
}

impl<'a, A: Element, D: Dimension> IntoDatum<'a, A> for ArrayView<'a, A, D> {
    fn into_datum(self) -> Result<Datum<'a, A>> {
        Ok(Datum(CowArray::from(self.into_dyn())))
    }
}

impl<'a, A: Element, D: Dimension> IntoDatum<'a, A> for Array<A, D> {
    fn into_datum(self) -> Result<Datum<'a, A>> {
        Ok(Datum(CowArray::from(self.into_dyn())))
    }
}

impl<'a, A: Element> IntoDatum<'a, A> for Datum<'a, A> {
    fn into_datum(self) -> Result<Datum<'a, A>> {
        Ok(self)
    }
}

impl<'a, A: Element> IntoDatum<'a, A> for &'a Value {
    fn into_datum(self) -> Result<Datum<'a, A>> {
        let shape = infer_shape(self);
        let mut flat = Vec::with_capacity(shape.iter().product());
        flatten(self, &shape, &mut flat)?;
        let array = ArrayD::from_shape_vec(IxDyn(&shape), flat)
            .map_err(|e| AverageError::InvalidType(e.to_string()))?;
        Ok(Datum(CowArray::from(array)))
    }
}

/// Follows the first element of every nesting level.
fn infer_shape(value: &Value) -> Vec<usize> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }
    shape
}

fn flatten<A: Element>(value: &Value, shape: &[usize], flat: &mut Vec<A>) -> Result<()> {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&len, rest))) if items.len() == len => {
            items.iter().try_for_each(|item| flatten(item, rest, flat))
        }
        (Value::Number(n), None) => {
            let x = n
                .as_f64()
                .ok_or_else(|| AverageError::InvalidType(format!("number {n}")))?;
            flat.push(A::from_coef(x));
            Ok(())
        }
        (Value::Array(_) | Value::Number(_), _) => {
            Err(AverageError::InvalidType("ragged nested array".into()))
        }
        (other, _) => Err(AverageError::InvalidType(describe(other))),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("bool {b}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Object(_) => "object".into(),
        Value::Number(n) => format!("number {n}"),
        Value::Array(_) => "array".into(),
    }
}

#[cfg(test)]
mod test {
    use ndarray::{Array2, array};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_number_is_zero_dimensional() {
        let datum: Datum<f64> = 1.5f64.into_datum().unwrap();
        assert!(datum.shape().is_empty());
        assert_eq!(datum.into_array().first(), Some(&1.5));

        let datum: Datum<f32> = 3i32.into_datum().unwrap();
        assert_eq!(datum.into_array().first(), Some(&3.0f32));
    }

    #[test]
    fn test_array_is_borrowed() {
        let eye = Array2::<f64>::eye(3);
        let datum = (&eye).into_datum().unwrap();
        assert_eq!(datum.shape(), &[3, 3]);
        assert_eq!(datum.view(), eye.view().into_dyn());
    }

    #[test]
    fn test_expect_shape() {
        let datum = array![1.0f64, 2.0].into_datum().unwrap();
        let err = datum.clone().expect_shape(&[3]).unwrap_err();
        assert_eq!(
            err,
            AverageError::ShapeMismatch {
                expected: vec![3],
                found: vec![2]
            }
        );
        assert!(datum.expect_shape(&[2]).is_ok());
    }

    #[test]
    fn test_json_nested_array() {
        let value = json!([[1, 2, 3], [4.5, 5, 6]]);
        let datum: Datum<f64> = (&value).into_datum().unwrap();
        assert_eq!(datum.into_array(), array![[1.0f64, 2.0, 3.0], [4.5, 5.0, 6.0]].into_dyn());

        let value = json!(2.5);
        let datum: Datum<f32> = (&value).into_datum().unwrap();
        assert!(datum.shape().is_empty());

        let value = json!([]);
        let datum: Datum<f64> = (&value).into_datum().unwrap();
        assert_eq!(datum.shape(), &[0]);
    }

    #[test]
    fn test_json_rejects_non_numeric() {
        for value in [
            json!("abc"),
            json!(null),
            json!(true),
            json!({"x": 1}),
            json!([1, "2"]),
            json!([[1, 2], [3]]),
            json!([[1, 2], 3]),
            json!([1, [2]]),
        ] {
            let result: Result<Datum<f64>> = (&value).into_datum();
            assert!(
                matches!(result, Err(AverageError::InvalidType(_))),
                "{value} should be rejected"
            );
        }
    }
}
