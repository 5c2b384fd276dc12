//! Rounding discipline for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal`, rounded through a
//! [`RoundingPolicy`] at each computation boundary so that the same figure
//! derived two different ways cannot drift apart.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Two amounts closer than one cent are considered equal.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest scale a `Decimal` can carry.
const MAX_PRECISION: u32 = 28;

/// Rounding applied to every monetary computation.
///
/// - `bankers_rounding = true`: midpoints round to the nearest even digit
///   (2.5 → 2, 3.5 → 4).
/// - `bankers_rounding = false`: midpoints round away from zero
///   (2.5 → 3, -2.5 → -3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// Number of decimal places kept.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Whether midpoints round to even.
    #[serde(default)]
    pub bankers_rounding: bool,
}

fn default_precision() -> u32 {
    2
}

impl RoundingPolicy {
    /// Creates a policy, clamping precision to the decimal scale limit.
    #[must_use]
    pub fn new(precision: u32, bankers_rounding: bool) -> Self {
        Self {
            precision: precision.min(MAX_PRECISION),
            bankers_rounding,
        }
    }

    /// Two decimal places, midpoint away from zero.
    #[must_use]
    pub const fn cents() -> Self {
        Self {
            precision: 2,
            bankers_rounding: false,
        }
    }

    /// Returns the `rust_decimal` strategy for this policy.
    #[must_use]
    pub const fn strategy(&self) -> RoundingStrategy {
        if self.bankers_rounding {
            RoundingStrategy::MidpointNearestEven
        } else {
            RoundingStrategy::MidpointAwayFromZero
        }
    }

    /// Rounds a value per this policy.
    #[must_use]
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.precision.min(MAX_PRECISION), self.strategy())
    }

    /// Rounds every value and sums the rounded results.
    pub fn sum<I>(&self, values: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        let total: Decimal = values.into_iter().map(|v| self.round(v)).sum();
        self.round(total)
    }

    /// Like [`RoundingPolicy::sum`], but returns `None` when the total
    /// leaves the range of `Decimal` instead of panicking.
    pub fn checked_sum<I>(&self, values: I) -> Option<Decimal>
    where
        I: IntoIterator<Item = Decimal>,
    {
        values
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(self.round(v)))
            .map(|total| self.round(total))
    }
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self::cents()
    }
}

/// Absolute difference between two amounts.
#[must_use]
pub fn variance(expected: Decimal, actual: Decimal) -> Decimal {
    (expected - actual).abs()
}

/// Returns true when two amounts differ by less than [`TOLERANCE`].
#[must_use]
pub fn within_tolerance(expected: Decimal, actual: Decimal) -> bool {
    variance(expected, actual) < TOLERANCE
}
