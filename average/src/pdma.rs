use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};

use crate::{Element, Estimate, IntoDatum, OnlineMean, PdmaConfig, Result};

/// Polynomial-decay moving average.
///
/// The `t`-th observation is blended in with weight `(1 + eta) / (t + eta)`.
/// The first weight is always 1, so there is no start-up bias to correct, and
/// `eta = 0` reduces to the arithmetic mean of everything seen so far.
#[derive(Debug, Clone)]
pub struct Pdma<A> {
    /// Decay exponent.
    eta: f64,
    /// Number of updates so far.
    t: u64,
    /// Current average.
    value: ArrayD<A>,
}

impl<A: Element> Pdma<A> {
    /// Creates a zeroed PDMA with the given state shape. `&[]` is a scalar.
    ///
    /// A negative `eta` is accepted but turns the average into "latest
    /// observation wins"; a warning is logged when that happens.
    pub fn new(shape: &[usize], config: PdmaConfig) -> Result<Self> {
        config.validate()?;
        if config.eta < 0.0 {
            tracing::warn!(
                eta = config.eta,
                "negative eta: every update replaces the average with the latest observation"
            );
        }
        tracing::debug!(?shape, eta = config.eta, dtype = A::NAME, "new pdma");
        Ok(Self {
            eta: config.eta,
            t: 0,
            value: ArrayD::zeros(IxDyn(shape)),
        })
    }

    /// Creates a PDMA shaped like `array`, holding the same element type.
    pub fn like<S, D>(array: &ArrayBase<S, D>, config: PdmaConfig) -> Result<Self>
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        Self::new(array.shape(), config)
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// How many observations have been folded in.
    pub fn count(&self) -> u64 {
        self.t
    }
}

impl<A: Element> Default for Pdma<A> {
    /// Scalar arithmetic mean.
    fn default() -> Self {
        Self {
            eta: 0.0,
            t: 0,
            value: ArrayD::zeros(IxDyn(&[])),
        }
    }
}

impl<A: Element> OnlineMean<A> for Pdma<A> {
    fn update<'a, T: IntoDatum<'a, A>>(&mut self, datum: T) -> Result<Estimate<A>> {
        let datum = datum.into_datum()?.expect_shape(self.value.shape())?;
        self.t += 1;
        if self.eta >= 0.0 {
            let weight = (1.0 + self.eta) / (self.t as f64 + self.eta);
            let keep = A::from_coef(1.0 - weight);
            let weight = A::from_coef(weight);
            self.value
                .zip_mut_with(&datum.view(), |v, &x| *v = keep * *v + weight * x);
        } else {
            self.value.assign(&datum.view());
        }
        tracing::trace!(t = self.t, "pdma updated");
        Ok(self.get())
    }

    fn get(&self) -> Estimate<A> {
        Estimate::from_array(self.value.clone())
    }

    fn shape(&self) -> &[usize] {
        self.value.shape()
    }
}
