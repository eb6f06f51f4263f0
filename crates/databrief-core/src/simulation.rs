//! What-if simulation over a chart series.
//!
//! The simulation is a pure view: it never mutates the canonical
//! series, and every simulated point carries its pre-transform value
//! so a front end can show the delta.

use serde::{Deserialize, Serialize};

use crate::analysis::SeriesPoint;

/// A signed percentage adjustment applied uniformly to a series.
///
/// The factor is an integer in `[-50, 50]`; out-of-range input
/// saturates into the legal band. The default factor is 0, which makes
/// the simulation an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationFactor(i32);

impl SimulationFactor {
    pub const MIN: i32 = -50;
    pub const MAX: i32 = 50;

    /// Builds a factor, clamping into `[MIN, MAX]`.
    pub fn clamped(percent: i32) -> Self {
        Self(percent.clamp(Self::MIN, Self::MAX))
    }

    /// The percentage as a signed integer.
    pub fn percent(self) -> i32 {
        self.0
    }

    /// Whether simulation with this factor is the identity transform.
    pub fn is_identity(self) -> bool {
        self.0 == 0
    }

    /// The multiplier applied to each value, `1 + percent/100`.
    pub fn multiplier(self) -> f64 {
        1.0 + f64::from(self.0) / 100.0
    }
}

/// One point of a simulated series, carrying its canonical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedPoint {
    /// Category label, unchanged from the canonical point.
    pub name: String,
    /// Adjusted value, rounded to the nearest integer.
    pub value: f64,
    /// The canonical (pre-transform) value.
    pub original: f64,
}

/// Applies `factor` to every point of `series`.
///
/// Pure and total for any numeric input: length and order are
/// preserved, each value becomes `round(value * (1 + factor/100))`,
/// and the sign of the input is preserved. With a zero factor the
/// output equals the input element-wise.
pub fn simulate(series: &[SeriesPoint], factor: SimulationFactor) -> Vec<SimulatedPoint> {
    let multiplier = factor.multiplier();
    series
        .iter()
        .map(|point| SimulatedPoint {
            name: point.name.clone(),
            value: if factor.is_identity() {
                point.value
            } else {
                (point.value * multiplier).round()
            },
            original: point.value,
        })
        .collect()
}
