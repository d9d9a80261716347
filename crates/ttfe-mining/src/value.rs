//! Weighted value model: `value = alpha * threat + beta * frequency`.
//!
//! Occurrences store raw threat and frequency only; the weights are a
//! run-level value passed to every computation.

use serde::{Deserialize, Serialize};
use ttfe_core::config::RunSettings;
use ttfe_core::constants::{DEFAULT_ALPHA, DEFAULT_BETA};

use crate::corpus::Occurrence;

/// The value-combination weights of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub alpha: f64,
    pub beta: f64,
}

impl Weights {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Pure threat weighting.
    pub fn threat_only() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Pure frequency weighting.
    pub fn frequency_only() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn from_settings(settings: &RunSettings) -> Self {
        Self::new(settings.alpha, settings.beta)
    }

    #[inline]
    pub fn combine(&self, threat: f64, frequency: f64) -> f64 {
        self.alpha * threat + self.beta * frequency
    }

    /// Value of one occurrence under these weights.
    #[inline]
    pub fn value(&self, occurrence: &Occurrence) -> f64 {
        self.combine(occurrence.threat, occurrence.frequency)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, DEFAULT_BETA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttfe_core::ItemId;

    #[test]
    fn test_value_is_linear_in_weights() {
        let occ = Occurrence::new(ItemId(1), 2.0, 1.0);
        assert_eq!(Weights::default().value(&occ), 1.5);
        assert_eq!(Weights::threat_only().value(&occ), 2.0);
        assert_eq!(Weights::frequency_only().value(&occ), 1.0);
        let w = Weights::new(0.25, 0.75);
        let combined = w.alpha * Weights::threat_only().value(&occ)
            + w.beta * Weights::frequency_only().value(&occ);
        assert!((w.value(&occ) - combined).abs() < 1e-12);
    }
}
