//! Kullback-derived separability criterion
//!
//! The criterion rates a decision rule by its two error rates:
//!
//! - `alpha`: false-negative rate (own-class samples outside the container)
//! - `beta`: false-acceptance rate (nearest-neighbor samples inside it)
//!
//! ```text
//!   K(a, b) = log2((2 - (a + b) + 0.1) / ((a + b) + 0.1)) * (1 - (a + b))
//!   E(a, b) = K(a, b) / K(0, 0)
//! ```
//!
//! The `0.1` terms keep the logarithm finite at `a + b = 0` and `a + b = 2`.
//! `E(0, 0)` is exactly 1.0.

/// Offset that keeps the logarithm finite at the extremes
const KULLBACK_EPSILON: f64 = 0.1;

/// Default lower bound on the detection rate `1 - alpha` of the working area
pub const DEFAULT_MIN_DETECTION: f64 = 0.5;

/// Default upper bound (exclusive) on `beta` in the working area
pub const DEFAULT_MAX_FALSE_ACCEPTANCE: f64 = 0.5;

/// Unnormalized Kullback information measure
pub fn kullback(alpha: f64, beta: f64) -> f64 {
    let errors = alpha + beta;
    ((2.0 - errors + KULLBACK_EPSILON) / (errors + KULLBACK_EPSILON)).log2() * (1.0 - errors)
}

/// Kullback measure normalized so that the error-free case maps to 1.0
pub fn criterion(alpha: f64, beta: f64) -> f64 {
    kullback(alpha, beta) / kullback(0.0, 0.0)
}

/// Region of `(alpha, beta)` in which a parameter value is admissible
///
/// A radius (or delta) lies in the working area when the detection rate
/// reaches `min_detection` and the false-acceptance rate against the
/// nearest neighbor stays strictly below `max_false_acceptance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingArea {
    /// Minimum detection rate `1 - alpha` (inclusive)
    pub min_detection: f64,
    /// Maximum false-acceptance rate `beta` (exclusive)
    pub max_false_acceptance: f64,
}

impl Default for WorkingArea {
    fn default() -> Self {
        Self {
            min_detection: DEFAULT_MIN_DETECTION,
            max_false_acceptance: DEFAULT_MAX_FALSE_ACCEPTANCE,
        }
    }
}

impl WorkingArea {
    /// Test a detection rate and false-acceptance rate pair
    ///
    /// Takes the detection rate directly rather than `alpha` so the
    /// comparison sees the same value the rate was computed as.
    #[inline]
    pub fn contains_rates(&self, detection: f64, beta: f64) -> bool {
        detection >= self.min_detection && beta < self.max_false_acceptance
    }

    /// Test an `(alpha, beta)` pair
    #[inline]
    pub fn contains(&self, alpha: f64, beta: f64) -> bool {
        self.contains_rates(1.0 - alpha, beta)
    }
}

/// Working-area test with the default thresholds
pub fn is_working_area(alpha: f64, beta: f64) -> bool {
    WorkingArea::default().contains(alpha, beta)
}

/// One row of a radius sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionEntry {
    /// Container radius the entry was computed for
    pub radius: usize,
    /// Normalized criterion value
    pub value: f64,
    /// Whether the radius lies in the working area
    pub working_area: bool,
}
