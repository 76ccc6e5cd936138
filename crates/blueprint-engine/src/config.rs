//! Build-wide settings shared by the shape builders and instantiation.

use blueprint_types::DEFAULT_QUANTUM;
use serde::{Deserialize, Serialize};

use crate::types::EngineError;

/// Settings applied while turning parameters into blueprints and blueprints
/// into scene objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Rounding step for box bounds (meters). Zero disables snapping.
    pub quantum: f64,
    /// Segments around the circumference of cylinders and cones.
    pub resolution: u32,
    /// Wall thickness used when a box leaves it unspecified (meters).
    pub wall_thickness: f64,
    /// Skip the translate call for nodes whose offset is zero.
    pub skip_zero_offsets: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            resolution: 64,
            wall_thickness: 0.01,
            skip_zero_offsets: true,
        }
    }
}

impl BuildConfig {
    /// Low-resolution round shapes for previews.
    pub fn preview() -> Self {
        Self {
            resolution: 16,
            ..Self::default()
        }
    }

    /// No snapping, and every offset reaches the backend.
    pub fn exact() -> Self {
        Self {
            quantum: 0.0,
            skip_zero_offsets: false,
            ..Self::default()
        }
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::config(format!("build config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.quantum.is_finite() && self.quantum >= 0.0) {
            return Err(EngineError::config(format!(
                "quantum must be zero or positive, got {}",
                self.quantum
            )));
        }
        if self.resolution < 3 {
            return Err(EngineError::config(format!(
                "resolution must be at least 3, got {}",
                self.resolution
            )));
        }
        if !(self.wall_thickness.is_finite() && self.wall_thickness > 0.0) {
            return Err(EngineError::config(format!(
                "wall thickness must be positive, got {}",
                self.wall_thickness
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = BuildConfig::default();
        assert_eq!(c.quantum, 0.001);
        assert_eq!(c.resolution, 64);
        assert_eq!(c.wall_thickness, 0.01);
        assert!(c.skip_zero_offsets);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(BuildConfig::preview().resolution, 16);
        let exact = BuildConfig::exact();
        assert_eq!(exact.quantum, 0.0);
        assert!(!exact.skip_zero_offsets);
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let c = BuildConfig::from_json(r#"{ "resolution": 32 }"#).unwrap();
        assert_eq!(c.resolution, 32);
        assert_eq!(c.quantum, 0.001);
        assert_eq!(c.wall_thickness, 0.01);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(BuildConfig::from_json("not json").is_err());
        let err = BuildConfig::from_json(r#"{ "resolution": 2 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
        assert!(BuildConfig::from_json(r#"{ "wall_thickness": -0.5 }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let c = BuildConfig::preview();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(BuildConfig::from_json(&json).unwrap(), c);
    }
}
