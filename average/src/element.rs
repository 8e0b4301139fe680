use std::fmt::{Debug, Display};

use ndarray::ScalarOperand;
use num_traits::Float;

/// Element types the estimators can hold state in.
pub trait Element: Float + ScalarOperand + Debug + Display + Send + Sync + 'static {
    const NAME: &'static str;

    /// Casts an `f64` coefficient into the element type.
    fn from_coef(x: f64) -> Self;
}

impl Element for f64 {
    const NAME: &'static str = "f64";

    fn from_coef(x: f64) -> Self {
        x
    }
}

impl Element for f32 {
    const NAME: &'static str = "f32";

    fn from_coef(x: f64) -> Self {
        x as f32
    }
}
