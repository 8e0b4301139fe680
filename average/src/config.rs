use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

use crate::{AverageError, Result};

/// Parameters of an [`Ewma`](crate::Ewma).
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EwmaConfig {
    /// Smoothing factor in (0, 1]. Higher forgets more slowly.
    pub beta: f64,
    /// Divide by `1 - beta^n` to remove the bias of the zero start.
    pub correct_bias: bool,
}

impl Default for EwmaConfig {
    fn default() -> Self {
        Self {
            beta: 0.9,
            correct_bias: true,
        }
    }
}

impl EwmaConfig {
    pub fn new(beta: f64) -> Self {
        Self {
            beta,
            ..Default::default()
        }
    }

    pub fn with_correct_bias(self, correct_bias: bool) -> Self {
        Self {
            correct_bias,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        // NaN fails both comparisons
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(AverageError::InvalidBeta(self.beta));
        }
        Ok(())
    }

    /// Reads `EWMA_BETA` and `EWMA_CORRECT_BIAS`, unset ones keep their defaults.
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("EWMA_").from_iter(vars)
    }
}

/// Parameters of a [`Pdma`](crate::Pdma).
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct PdmaConfig {
    /// Polynomial decay exponent. 0 gives the plain arithmetic mean, larger
    /// values shrink the effective window more slowly.
    pub eta: f64,
}

impl PdmaConfig {
    pub fn new(eta: f64) -> Self {
        Self { eta }
    }

    /// Negative values pass; they are only warned about when the estimator is built.
    pub fn validate(&self) -> Result<()> {
        if !self.eta.is_finite() {
            return Err(AverageError::InvalidEta(self.eta));
        }
        Ok(())
    }

    /// Reads `PDMA_ETA`.
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("PDMA_").from_iter(vars)
    }
}

/// Both estimators' settings as they appear in a TOML file:
///
/// ```toml
/// [ewma]
/// beta = 0.99
/// correct_bias = true
///
/// [pdma]
/// eta = 2.0
/// ```
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct AverageConfig {
    pub ewma: EwmaConfig,
    pub pdma: PdmaConfig,
}

impl AverageConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("failed to parse average config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.ewma.validate()?;
        self.pdma.validate()
    }
}
