//! The working threshold (delta).

use std::fmt;

use ttfe_core::constants::THRESHOLD_TOLERANCE;

/// Tightest proven lower bound on the K-th best pattern value.
///
/// `None` is the "no information" sentinel. The value never decreases.
/// Comparisons allow a small relative slack in the permissive direction so
/// that accumulation-order rounding never prunes a pattern sitting exactly
/// on the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Threshold {
    value: Option<f64>,
}

impl Threshold {
    pub fn new(seed: Option<f64>) -> Self {
        Self {
            value: seed.filter(|v| v.is_finite()),
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// `delta = max(delta, candidate)`. Returns true if delta increased.
    /// Non-finite candidates are ignored.
    pub fn raise(&mut self, candidate: f64) -> bool {
        if !candidate.is_finite() {
            return false;
        }
        match self.value {
            Some(current) if candidate <= current => false,
            _ => {
                self.value = Some(candidate);
                true
            }
        }
    }

    /// True if `value` reaches the threshold.
    #[inline]
    pub fn admits(&self, value: f64) -> bool {
        match self.value {
            None => true,
            Some(delta) => value >= delta - slack(delta),
        }
    }

    /// True if nothing bounded by `bound` can reach the threshold.
    #[inline]
    pub fn prunes(&self, bound: f64) -> bool {
        !self.admits(bound)
    }
}

#[inline]
fn slack(delta: f64) -> f64 {
    THRESHOLD_TOLERANCE * delta.abs().max(1.0)
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "none"),
        }
    }
}
