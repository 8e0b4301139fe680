use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn, Zip};

use crate::{Element, Estimate, EwmaConfig, IntoDatum, OnlineMean, Result};

/// Exponentially weighted moving average with initialization bias correction.
///
/// The state starts at zero, so early averages lean towards zero. With
/// `correct_bias` the output is divided by `1 - beta^n` to undo that; the factor
/// goes to 1 as `n` grows. Before the first update the corrected output is NaN.
#[derive(Debug, Clone)]
pub struct Ewma<A> {
    /// Smoothing factor in (0, 1].
    beta: f64,
    correct_bias: bool,
    /// `beta^n` when correcting bias, stays 0 otherwise.
    beta_accum: f64,
    /// Decayed cumulative sum of the observations.
    value: ArrayD<A>,
}

impl<A: Element> Ewma<A> {
    /// Creates a zeroed EWMA with the given state shape. `&[]` is a scalar.
    pub fn new(shape: &[usize], config: EwmaConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            ?shape,
            beta = config.beta,
            correct_bias = config.correct_bias,
            dtype = A::NAME,
            "new ewma"
        );
        Ok(Self {
            beta: config.beta,
            correct_bias: config.correct_bias,
            beta_accum: if config.correct_bias { 1.0 } else { 0.0 },
            value: ArrayD::zeros(IxDyn(shape)),
        })
    }

    /// Creates an EWMA shaped like `array`, holding the same element type.
    pub fn like<S, D>(array: &ArrayBase<S, D>, config: EwmaConfig) -> Result<Self>
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        Self::new(array.shape(), config)
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn correct_bias(&self) -> bool {
        self.correct_bias
    }

    /// The corrected average `update(datum)` would return, without committing it.
    pub fn get_est<'a, T: IntoDatum<'a, A>>(&self, datum: T) -> Result<Estimate<A>> {
        let datum = datum.into_datum()?.expect_shape(self.value.shape())?;
        let beta = A::from_coef(self.beta);
        let fresh = A::from_coef(1.0 - self.beta);
        // the accumulator one update ahead
        let denom = A::from_coef(1.0 - self.beta_accum * self.beta);
        let est = Zip::from(&self.value)
            .and(datum.view())
            .map_collect(|&v, &x| (beta * v + fresh * x) / denom);
        Ok(Estimate::from_array(est))
    }
}

impl<A: Element> Default for Ewma<A> {
    /// Scalar, `beta = 0.9`, bias corrected.
    fn default() -> Self {
        let config = EwmaConfig::default();
        Self {
            beta: config.beta,
            correct_bias: config.correct_bias,
            beta_accum: 1.0,
            value: ArrayD::zeros(IxDyn(&[])),
        }
    }
}

impl<A: Element> OnlineMean<A> for Ewma<A> {
    fn update<'a, T: IntoDatum<'a, A>>(&mut self, datum: T) -> Result<Estimate<A>> {
        let datum = datum.into_datum()?.expect_shape(self.value.shape())?;
        self.beta_accum *= self.beta;
        let beta = A::from_coef(self.beta);
        let fresh = A::from_coef(1.0 - self.beta);
        self.value
            .zip_mut_with(&datum.view(), |v, &x| *v = beta * *v + fresh * x);
        tracing::trace!(beta_accum = self.beta_accum, "ewma updated");
        Ok(self.get())
    }

    /// Division by zero is left alone: before any update this is NaN.
    fn get(&self) -> Estimate<A> {
        let denom = A::from_coef(1.0 - self.beta_accum);
        Estimate::from_array(self.value.mapv(|v| v / denom))
    }

    fn shape(&self) -> &[usize] {
        self.value.shape()
    }
}
