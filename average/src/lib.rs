//! Online moving averages over scalars or fixed-shape `ndarray` arrays.
//!
//! - [`Ewma`]: exponentially weighted, with initialization bias correction.
//! - [`Pdma`]: polynomial decay, `eta = 0` being the plain running mean.
//!
//! Both keep O(1) state per update and never change shape after construction.
mod config;
pub mod datum;
mod element;
mod error;
mod estimate;
mod ewma;
mod pdma;

pub use config::{AverageConfig, EwmaConfig, PdmaConfig};
pub use datum::{Datum, IntoDatum};
pub use element::Element;
pub use error::{AverageError, Result};
pub use estimate::Estimate;
pub use ewma::Ewma;
pub use pdma::Pdma;

/// A running mean fed one observation at a time.
///
/// Observations must have exactly the estimator's shape. A rejected
/// observation leaves the estimator untouched.
pub trait OnlineMean<A: Element> {
    /// Folds `datum` in and returns the new average.
    fn update<'a, T: IntoDatum<'a, A>>(&mut self, datum: T) -> Result<Estimate<A>>;

    fn get(&self) -> Estimate<A>;

    /// Shape of the state, empty for a scalar.
    fn shape(&self) -> &[usize];
}
