//! Evaluator configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for trajectory evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Skip collision scoring entirely.
    pub disable_collision: bool,

    /// Number of trailing ground-truth frames a prediction must cover.
    pub prediction_horizon: usize,

    /// Highest multimodal prediction number that is evaluated.
    pub max_prediction_number: u32,

    /// Radius of a pedestrian; two agents collide within twice this distance.
    pub person_radius: f64,

    /// Sub-steps interpolated between consecutive frames in the collision test.
    pub interpolation_parts: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            disable_collision: false,
            prediction_horizon: 12,
            max_prediction_number: 2,
            person_radius: 0.1,
            interpolation_parts: 2,
        }
    }
}

impl EvaluatorConfig {
    /// Default configuration with collision scoring switched on or off.
    pub fn with_collision(enabled: bool) -> Self {
        Self {
            disable_collision: !enabled,
            ..Self::default()
        }
    }

    /// Collision threshold (distance between agent centres).
    #[inline]
    pub fn collision_threshold(&self) -> f64 {
        2.0 * self.person_radius
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.prediction_horizon == 0 {
            return Err(Error::InvalidConfig(
                "prediction_horizon must be positive".to_string(),
            ));
        }

        if !self.person_radius.is_finite() || self.person_radius < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "person_radius must be finite and non-negative, got {}",
                self.person_radius
            )));
        }

        if self.interpolation_parts == 0 {
            return Err(Error::InvalidConfig(
                "interpolation_parts must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EvaluatorConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.collision_threshold() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = EvaluatorConfig::default();
        config.prediction_horizon = 0;
        assert!(config.validate().is_err());

        let mut config = EvaluatorConfig::default();
        config.person_radius = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = EvaluatorConfig::default();
        config.interpolation_parts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: EvaluatorConfig =
            serde_json::from_str(r#"{"disable_collision": true}"#).unwrap();
        assert!(config.disable_collision);
        assert_eq!(config.prediction_horizon, 12);
        assert_eq!(config, EvaluatorConfig::with_collision(false));
    }
}
