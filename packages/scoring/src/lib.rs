#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Weighted-sum predictive risk index.
//!
//! Blends four weighted factors into a bounded 0-100 composite index:
//!
//! ```text
//! score = alpha*Ch + beta*Si + gamma*(1/Dps)*100 + delta*Pd
//! ```
//!
//! where `Ch` is the historical crime index, `Si` the seasonality index,
//! `Dps` the distance to the nearest police station, and `Pd` the population
//! density. The result is rounded and saturated into `[0, 100]`.
//!
//! The function is pure and deterministic; the dashboard store recomputes it
//! on every weight change.

use kavach_intel_models::RiskBand;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from risk index computation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoreError {
    /// A weight component fell outside the `[0, 1]` slider range.
    #[error("weight {name} = {value} is outside [0, 1]")]
    InvalidWeight {
        /// Which component was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The proximity factor divides by the station distance, so a
    /// non-positive distance has no defined score.
    #[error("distance to police station must be > 0, got {value}")]
    DistanceNotPositive {
        /// The rejected distance.
        value: f64,
    },
}

/// The four factor weights, each constrained to `[0, 1]`.
///
/// There is intentionally no requirement that the components sum to 1: the
/// calculator exposes four independent sliders and an unnormalized blend is
/// the documented behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightVector {
    /// Historical crime bias (alpha).
    pub alpha: f64,
    /// Seasonal variance (beta).
    pub beta: f64,
    /// Response proximity (gamma).
    pub gamma: f64,
    /// Population hubs (delta).
    pub delta: f64,
}

impl WeightVector {
    /// The calculator's initial slider positions.
    pub const DEFAULT: Self = Self {
        alpha: 0.4,
        beta: 0.3,
        gamma: 0.2,
        delta: 0.1,
    };

    /// Checks every component against the `[0, 1]` slider range.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidWeight`] naming the first component out
    /// of range.
    pub fn validate(&self) -> Result<(), ScoreError> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("delta", self.delta),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ScoreError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The four fixed baseline metrics the weights blend over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineMetrics {
    /// Historical crime index (`Ch`).
    pub historical_crime_index: f64,
    /// Seasonality index (`Si`).
    pub seasonality_index: f64,
    /// Distance to the nearest police station in kilometers (`Dps`).
    /// Must be positive.
    pub distance_to_police_station: f64,
    /// Population density index (`Pd`).
    pub population_density: f64,
}

impl BaselineMetrics {
    /// The calibration tuple the calculator ships with.
    pub const DEFAULT: Self = Self {
        historical_crime_index: 85.0,
        seasonality_index: 60.0,
        distance_to_police_station: 2.0,
        population_density: 75.0,
    };
}

impl Default for BaselineMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Computes the composite risk index for the given weights and baselines.
///
/// # Errors
///
/// Returns [`ScoreError::InvalidWeight`] if any weight is outside `[0, 1]`,
/// or [`ScoreError::DistanceNotPositive`] if the station distance is zero
/// or negative.
pub fn predict_risk_index(
    weights: &WeightVector,
    baselines: &BaselineMetrics,
) -> Result<u8, ScoreError> {
    weights.validate()?;

    let distance = baselines.distance_to_police_station;
    if distance <= 0.0 || distance.is_nan() {
        return Err(ScoreError::DistanceNotPositive { value: distance });
    }

    let score = weights.alpha * baselines.historical_crime_index
        + weights.beta * baselines.seasonality_index
        + weights.gamma * (1.0 / distance) * 100.0
        + weights.delta * baselines.population_density;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = score.round().clamp(0.0, 100.0) as u8;
    Ok(index)
}

/// Computes the index and its display band in one step.
///
/// # Errors
///
/// Same conditions as [`predict_risk_index`].
pub fn predict_risk_band(
    weights: &WeightVector,
    baselines: &BaselineMetrics,
) -> Result<(u8, RiskBand), ScoreError> {
    let index = predict_risk_index(weights, baselines)?;
    Ok((index, RiskBand::from_index(index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calibration_scores_70() {
        let index = predict_risk_index(&WeightVector::DEFAULT, &BaselineMetrics::DEFAULT).unwrap();
        assert_eq!(index, 70);
    }

    #[test]
    fn index_saturates_at_100() {
        let weights = WeightVector {
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.0,
            delta: 1.0,
        };
        let baselines = BaselineMetrics {
            distance_to_police_station: 0.5,
            ..BaselineMetrics::DEFAULT
        };
        // 85 + 60 + 200 + 75 well past the cap.
        let index = predict_risk_index(&weights, &baselines).unwrap();
        assert_eq!(index, 100);
    }

    #[test]
    fn zero_weights_score_zero() {
        let weights = WeightVector {
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
            delta: 0.0,
        };
        let index = predict_risk_index(&weights, &BaselineMetrics::DEFAULT).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn non_positive_distance_is_rejected() {
        let baselines = BaselineMetrics {
            distance_to_police_station: 0.0,
            ..BaselineMetrics::DEFAULT
        };
        assert_eq!(
            predict_risk_index(&WeightVector::DEFAULT, &baselines),
            Err(ScoreError::DistanceNotPositive { value: 0.0 })
        );

        let negative = BaselineMetrics {
            distance_to_police_station: -1.5,
            ..BaselineMetrics::DEFAULT
        };
        assert!(predict_risk_index(&WeightVector::DEFAULT, &negative).is_err());
    }

    #[test]
    fn out_of_range_weight_is_rejected() {
        let weights = WeightVector {
            alpha: 1.2,
            ..WeightVector::DEFAULT
        };
        assert_eq!(
            predict_risk_index(&weights, &BaselineMetrics::DEFAULT),
            Err(ScoreError::InvalidWeight {
                name: "alpha",
                value: 1.2
            })
        );

        let negative = WeightVector {
            delta: -0.1,
            ..WeightVector::DEFAULT
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn index_stays_bounded_across_slider_range() {
        // Sweep the slider grid at its 0.05 step; every result must land
        // in [0, 100].
        let steps: Vec<f64> = (0..=20).map(|i| f64::from(i) * 0.05).collect();
        for &alpha in &steps {
            for &gamma in &steps {
                let weights = WeightVector {
                    alpha,
                    beta: 0.3,
                    gamma,
                    delta: 0.1,
                };
                let index = predict_risk_index(&weights, &BaselineMetrics::DEFAULT).unwrap();
                assert!(index <= 100);
            }
        }
    }

    #[test]
    fn band_follows_index() {
        let (index, band) =
            predict_risk_band(&WeightVector::DEFAULT, &BaselineMetrics::DEFAULT).unwrap();
        assert_eq!(index, 70);
        assert_eq!(band, kavach_intel_models::RiskBand::Elevated);
    }
}
