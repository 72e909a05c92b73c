//! Portfolio health score types.
//!
//! The health score blends three factors, each on a 0-100 scale:
//! - **Momentum**: average momentum score across the portfolio
//! - **Growth**: share of artists trending `growing` or `fire`
//! - **Engagement**: average engagement, capped so outliers cannot dominate
//!
//! Factors are clamped independently before weighting, and the weights sum
//! to 1.0, so the composite always lands in `[0, 100]`.
//!
//! # Examples
//!
//! ```
//! use fanpulse::domain::health::{HealthFactors, HealthScore, HealthStatus};
//!
//! let score = HealthScore::from_factors(HealthFactors::new(80.0, 50.0, 100.0));
//! assert_eq!(score.score(), 77);
//! assert_eq!(score.status(), HealthStatus::Good);
//! ```

use std::fmt;

use serde::Serialize;

/// Weight of the momentum factor.
pub const MOMENTUM_WEIGHT: f64 = 0.4;
/// Weight of the growth factor.
pub const GROWTH_WEIGHT: f64 = 0.3;
/// Weight of the engagement factor.
pub const ENGAGEMENT_WEIGHT: f64 = 0.3;

/// Clamp a factor to `[0, 100]`, mapping NaN to zero.
fn clamp_factor(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Normalized health sub-factors (0-100 each).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthFactors {
    pub momentum: f64,
    pub growth: f64,
    pub engagement: f64,
}

impl HealthFactors {
    /// Creates factors, clamping each to `[0, 100]`.
    #[must_use]
    pub fn new(momentum: f64, growth: f64, engagement: f64) -> Self {
        Self {
            momentum: clamp_factor(momentum),
            growth: clamp_factor(growth),
            engagement: clamp_factor(engagement),
        }
    }

    /// Weighted blend before rounding.
    #[must_use]
    pub fn weighted(&self) -> f64 {
        self.momentum * MOMENTUM_WEIGHT
            + self.growth * GROWTH_WEIGHT
            + self.engagement * ENGAGEMENT_WEIGHT
    }
}

/// Status bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    /// Bucket a score. Lower bounds are inclusive.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite portfolio health score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthScore {
    score: u8,
    status: HealthStatus,
    factors: HealthFactors,
}

impl HealthScore {
    #[must_use]
    pub fn from_factors(factors: HealthFactors) -> Self {
        // Factors are clamped, so the blend is within 0..=100.
        let score = factors.weighted().round().clamp(0.0, 100.0) as u8;
        Self {
            score,
            status: HealthStatus::from_score(score),
            factors,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub const fn status(&self) -> HealthStatus {
        self.status
    }

    #[must_use]
    pub const fn factors(&self) -> &HealthFactors {
        &self.factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = MOMENTUM_WEIGHT + GROWTH_WEIGHT + ENGAGEMENT_WEIGHT;
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn factors_are_clamped() {
        let factors = HealthFactors::new(150.0, -10.0, f64::NAN);
        assert_eq!(factors.momentum, 100.0);
        assert_eq!(factors.growth, 0.0);
        assert_eq!(factors.engagement, 0.0);
    }

    #[test]
    fn bucket_boundaries_are_inclusive() {
        assert_eq!(HealthStatus::from_score(100), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(80), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(79), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(60), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(59), HealthStatus::Fair);
        assert_eq!(HealthStatus::from_score(40), HealthStatus::Fair);
        assert_eq!(HealthStatus::from_score(39), HealthStatus::Poor);
        assert_eq!(HealthStatus::from_score(0), HealthStatus::Poor);
    }

    #[test]
    fn extremes_map_to_zero_and_hundred() {
        let low = HealthScore::from_factors(HealthFactors::new(0.0, 0.0, 0.0));
        let high = HealthScore::from_factors(HealthFactors::new(100.0, 100.0, 100.0));

        assert_eq!(low.score(), 0);
        assert_eq!(low.status(), HealthStatus::Poor);
        assert_eq!(high.score(), 100);
        assert_eq!(high.status(), HealthStatus::Excellent);
    }

    #[test]
    fn score_rounds_to_nearest_integer() {
        // 0.4*51 = 20.4
        let down = HealthScore::from_factors(HealthFactors::new(51.0, 0.0, 0.0));
        // 0.4*54 = 21.6
        let up = HealthScore::from_factors(HealthFactors::new(54.0, 0.0, 0.0));

        assert_eq!(down.score(), 20);
        assert_eq!(up.score(), 22);
    }
}
