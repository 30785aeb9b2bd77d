//! Reproducible specification for a visualization run.
//!
//! A [`Recipe`] captures everything needed to recreate a frame stream:
//! scene name, surface dimensions, parameter overrides, PRNG seed, and
//! frame count.

use crate::error::EngineError;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// Reproducible specification for a visualization run.
///
/// Two identical `Recipe` values fed to the same engine binary produce
/// bit-identical frame streams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub scene: String,
    pub width: f64,
    pub height: f64,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
}

impl Recipe {
    /// Creates a new Recipe with default params (`{}`) and frames (`0`).
    pub fn new(scene: &str, width: f64, height: f64, seed: u64) -> Self {
        Self {
            scene: scene.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
        }
    }

    /// Validates the surface dimensions.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.surface().map(|_| ())
    }

    /// The surface this recipe runs against.
    pub fn surface(&self) -> Result<Surface, EngineError> {
        Surface::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_recipe_with_default_params_and_frames() {
        let r = Recipe::new("alchemy", 400.0, 800.0, 42);
        assert_eq!(r.scene, "alchemy");
        assert_eq!(r.width, 400.0);
        assert_eq!(r.height, 800.0);
        assert_eq!(r.seed, 42);
        assert_eq!(r.frames, 0);
        assert_eq!(r.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_defaults() {
        let original = Recipe::new("battery", 1024.0, 768.0, 8_675_309);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut r = Recipe::new("bars-and-waves", 256.0, 256.0, 99);
        r.params = serde_json::json!({
            "bar_count": 16,
            "wave_amplitude": 0.4
        });
        r.frames = 600;

        let json = serde_json::to_string_pretty(&r).unwrap();
        let restored: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(r, restored);
    }

    #[test]
    fn json_contains_expected_keys() {
        let r = Recipe::new("musical-colors", 128.0, 128.0, 1);
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        for key in ["scene", "width", "height", "params", "seed", "frames"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn validate_succeeds_for_valid_recipe() {
        assert!(Recipe::new("alchemy", 400.0, 800.0, 42).validate().is_ok());
    }

    #[test]
    fn validate_fails_for_degenerate_dimensions() {
        assert!(Recipe::new("alchemy", 0.0, 800.0, 42).validate().is_err());
        assert!(Recipe::new("alchemy", 400.0, -5.0, 42).validate().is_err());
        assert!(Recipe::new("alchemy", f64::NAN, 800.0, 42)
            .validate()
            .is_err());
    }

    #[test]
    fn surface_reflects_the_recipe_dimensions() {
        let r = Recipe::new("alchemy", 400.0, 800.0, 42);
        let s = r.surface().unwrap();
        assert_eq!(s.width(), 400.0);
        assert_eq!(s.height(), 800.0);
    }
}
