#![deny(unsafe_code)]
//! Musical-colors scene: a persistent population of drifting color blobs over
//! a central rectified equalizer.
//!
//! A fixed number of blobs is seeded once over the whole surface and never
//! reaped: they bounce off the edges, their hue cycles continuously, a
//! sinusoidal sway nudges their velocity each step, and damping keeps the
//! motion languid. Pausing freezes their velocities in place instead of
//! clearing the field; the renderer switches to a static glyph. The
//! equalizer bank is rectified so its bars are always positive.

use serde_json::{json, Value};
use std::f64::consts::TAU;
use vizwave_core::params::{param_f64, param_range, param_usize};
use vizwave_core::{
    AnimationClock, DriveConfig, EdgeBehavior, Emitter, EngineError, FieldConfig, Frame, Lifetime,
    ParticleField, Pulse, Range, ScalarTrack, SpawnPolicy, SplitMix64, StopBehavior, Surface,
    TrackConfig, TrackSnapshot, VelocityModel, Visualization,
};

/// Clock advance per frame at the assumed ~60 fps cadence.
const CLOCK_INCREMENT: f64 = 0.03;
/// Blobs seeded into an empty field at play-start.
const DEFAULT_BLOB_COUNT: usize = 8;
/// Blob radius range in pixels.
const DEFAULT_RADIUS: Range = Range::new(40.0, 100.0);
/// Per-axis initial velocity range in pixels per frame.
const BLOB_VELOCITY: Range = Range::new(-1.0, 1.0);
/// Blob saturation range.
const BLOB_SATURATION: Range = Range::new(0.7, 1.0);
/// Blob lightness range.
const BLOB_LIGHTNESS: Range = Range::new(0.5, 0.7);
/// Per-step hue advance in degrees.
const DEFAULT_HUE_DRIFT: f64 = 0.5;
/// Per-step velocity retention.
const DEFAULT_DAMPING: f64 = 0.98;
/// Sway clock multiplier.
const SWAY_RATE: f64 = 3.0;
/// Sway velocity nudge amplitude.
const SWAY_AMPLITUDE: f64 = 0.1;
/// Radius pulse clock multiplier.
const PULSE_RATE: f64 = 2.0;
/// Relative radius pulse swing.
const PULSE_AMPLITUDE: f64 = 0.3;
/// Number of central equalizer bars.
const DEFAULT_EQUALIZER_BARS: usize = 20;
/// Equalizer sinusoid share of a bar's height.
const EQUALIZER_AMPLITUDE: f64 = 0.8;
/// Equalizer floor so bars never fully vanish.
const EQUALIZER_FLOOR: f64 = 0.2;
/// Per-bar phase offset of the equalizer.
const EQUALIZER_SPATIAL: f64 = 0.5;

/// Tunable parameters for the musical-colors scene.
#[derive(Debug, Clone, Copy)]
pub struct MusicalColorsParams {
    /// Blob population size.
    pub blob_count: usize,
    /// Blob radius range in pixels.
    pub radius: Range,
    /// Per-step hue advance in degrees.
    pub hue_drift: f64,
    /// Per-step velocity retention in (0, 1].
    pub damping: f64,
    /// Number of equalizer bars.
    pub equalizer_bars: usize,
}

impl Default for MusicalColorsParams {
    fn default() -> Self {
        Self {
            blob_count: DEFAULT_BLOB_COUNT,
            radius: DEFAULT_RADIUS,
            hue_drift: DEFAULT_HUE_DRIFT,
            damping: DEFAULT_DAMPING,
            equalizer_bars: DEFAULT_EQUALIZER_BARS,
        }
    }
}

impl MusicalColorsParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            blob_count: param_usize(params, "blob_count", DEFAULT_BLOB_COUNT),
            radius: param_range(params, "radius", DEFAULT_RADIUS),
            hue_drift: param_f64(params, "hue_drift", DEFAULT_HUE_DRIFT),
            damping: param_f64(params, "damping", DEFAULT_DAMPING),
            equalizer_bars: param_usize(params, "equalizer_bars", DEFAULT_EQUALIZER_BARS),
        }
    }

    fn field_config(&self) -> FieldConfig {
        FieldConfig {
            spawn: SpawnPolicy::Burst(self.blob_count),
            emitter: Emitter::Area,
            velocity: VelocityModel::PerAxis {
                vx: BLOB_VELOCITY,
                vy: BLOB_VELOCITY,
            },
            lifetime: Lifetime::Persistent,
            hue: Range::new(0.0, 360.0),
            saturation: BLOB_SATURATION,
            lightness: BLOB_LIGHTNESS,
            size: self.radius,
            turbulence: 0.0,
            damping: self.damping,
            hue_drift: self.hue_drift,
            edges: EdgeBehavior::Bounce,
            on_stop: StopBehavior::Freeze,
            pulse: Some(Pulse {
                rate: PULSE_RATE,
                amplitude: PULSE_AMPLITUDE,
                spatial: 0.0,
                phase: Range::new(0.0, TAU),
            }),
            drive: Some(DriveConfig::Sway {
                rate: SWAY_RATE,
                amplitude: SWAY_AMPLITUDE,
            }),
            capacity: None,
        }
    }

    fn equalizer_config(&self) -> TrackConfig {
        TrackConfig {
            len: self.equalizer_bars,
            rate: 2.0,
            spatial: EQUALIZER_SPATIAL,
            amplitude: EQUALIZER_AMPLITUDE,
            offset: EQUALIZER_FLOOR,
            rectify: true,
            noise: 0.0,
            clamp: Range::new(0.0, 1.0),
        }
    }
}

/// The musical-colors scene.
pub struct MusicalColors {
    clock: AnimationClock,
    blobs: ParticleField,
    equalizer: ScalarTrack,
    rng: SplitMix64,
    playing: bool,
    params: MusicalColorsParams,
}

impl MusicalColors {
    /// Creates a musical-colors scene; blobs are seeded on the first active step.
    pub fn new(seed: u64, params: MusicalColorsParams) -> Result<Self, EngineError> {
        Ok(Self {
            clock: AnimationClock::new(CLOCK_INCREMENT)?,
            blobs: ParticleField::new(params.field_config())?,
            equalizer: ScalarTrack::new(params.equalizer_config())?,
            rng: SplitMix64::new(seed),
            playing: false,
            params,
        })
    }

    /// Creates a musical-colors scene from a JSON params object.
    pub fn from_json(seed: u64, json_params: &Value) -> Result<Self, EngineError> {
        Self::new(seed, MusicalColorsParams::from_json(json_params))
    }

    /// Read-only access to the blob field.
    pub fn blobs(&self) -> &ParticleField {
        &self.blobs
    }

    /// Read-only access to the equalizer bank.
    pub fn equalizer(&self) -> &ScalarTrack {
        &self.equalizer
    }
}

impl Visualization for MusicalColors {
    fn step(&mut self, active: bool, surface: Surface) -> Result<(), EngineError> {
        self.playing = active;
        let clock = self.clock.advance(active);
        self.blobs.step(clock, active, surface, &mut self.rng);
        if active {
            self.equalizer.recompute(clock, &mut self.rng);
        }
        Ok(())
    }

    fn frame(&self) -> Frame {
        Frame {
            clock: self.clock.time(),
            playing: self.playing,
            particles: self.blobs.snapshot(self.clock.time()),
            tracks: vec![TrackSnapshot::new(
                "equalizer",
                self.equalizer.values().to_vec(),
            )],
        }
    }

    fn params(&self) -> Value {
        json!({
            "blob_count": self.params.blob_count,
            "radius": [self.params.radius.min, self.params.radius.max],
            "hue_drift": self.params.hue_drift,
            "damping": self.params.damping,
            "equalizer_bars": self.params.equalizer_bars,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "blob_count": {
                "type": "integer",
                "default": DEFAULT_BLOB_COUNT,
                "min": 1,
                "max": 64,
                "description": "Number of persistent blobs"
            },
            "radius": {
                "type": "range",
                "default": [DEFAULT_RADIUS.min, DEFAULT_RADIUS.max],
                "description": "Blob radius range in pixels"
            },
            "hue_drift": {
                "type": "number",
                "default": DEFAULT_HUE_DRIFT,
                "min": -5.0,
                "max": 5.0,
                "description": "Per-step hue advance in degrees"
            },
            "damping": {
                "type": "number",
                "default": DEFAULT_DAMPING,
                "min": 0.5,
                "max": 1.0,
                "description": "Per-step velocity retention"
            },
            "equalizer_bars": {
                "type": "integer",
                "default": DEFAULT_EQUALIZER_BARS,
                "min": 1,
                "max": 256,
                "description": "Number of central equalizer bars"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        Surface::new(400.0, 800.0).unwrap()
    }

    #[test]
    fn first_active_step_seeds_the_blob_population() {
        let mut scene = MusicalColors::new(42, MusicalColorsParams::default()).unwrap();
        assert!(scene.blobs().is_empty());
        scene.step(true, surface()).unwrap();
        assert_eq!(scene.blobs().len(), 8);
    }

    #[test]
    fn blobs_are_never_reaped() {
        let mut scene = MusicalColors::new(42, MusicalColorsParams::default()).unwrap();
        scene.run(2000, true, surface()).unwrap();
        assert_eq!(scene.blobs().len(), 8);
    }

    #[test]
    fn blobs_stay_on_the_surface() {
        let mut scene = MusicalColors::new(5, MusicalColorsParams::default()).unwrap();
        for _ in 0..1000 {
            scene.step(true, surface()).unwrap();
            for p in scene.blobs().particles() {
                assert!((0.0..=400.0).contains(&p.position.x), "x {}", p.position.x);
                assert!((0.0..=800.0).contains(&p.position.y), "y {}", p.position.y);
            }
        }
    }

    #[test]
    fn hue_cycles_and_stays_wrapped() {
        let mut scene = MusicalColors::new(42, MusicalColorsParams::default()).unwrap();
        scene.step(true, surface()).unwrap();
        let start: Vec<f64> = scene.blobs().particles().iter().map(|p| p.hue).collect();
        scene.run(100, true, surface()).unwrap();
        for (i, p) in scene.blobs().particles().iter().enumerate() {
            assert!((0.0..360.0).contains(&p.hue));
            let expected = (start[i] + 100.0 * DEFAULT_HUE_DRIFT).rem_euclid(360.0);
            assert!(
                (p.hue - expected).abs() < 1e-9,
                "blob {i}: hue {} vs {expected}",
                p.hue
            );
        }
    }

    #[test]
    fn pausing_freezes_blobs_in_place() {
        let mut scene = MusicalColors::new(42, MusicalColorsParams::default()).unwrap();
        scene.run(50, true, surface()).unwrap();
        scene.step(false, surface()).unwrap();
        assert_eq!(scene.blobs().len(), 8, "pause must not clear the blobs");
        let positions: Vec<_> = scene
            .blobs()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect();
        scene.run(20, false, surface()).unwrap();
        let after: Vec<_> = scene
            .blobs()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn equalizer_bars_respect_their_floor_and_ceiling() {
        let mut scene = MusicalColors::new(42, MusicalColorsParams::default()).unwrap();
        for _ in 0..300 {
            scene.step(true, surface()).unwrap();
            for &v in scene.equalizer().values() {
                assert!(
                    (EQUALIZER_FLOOR - 1e-12..=1.0).contains(&v),
                    "bar value {v} escaped its range"
                );
            }
        }
    }

    #[test]
    fn frame_exposes_blobs_and_equalizer() {
        let mut scene = MusicalColors::new(42, MusicalColorsParams::default()).unwrap();
        scene.step(true, surface()).unwrap();
        let frame = scene.frame();
        assert_eq!(frame.particles.len(), 8);
        assert_eq!(frame.track("equalizer").unwrap().values.len(), 20);
        assert!(frame.playing);
    }

    #[test]
    fn blob_alpha_never_fades() {
        let mut scene = MusicalColors::new(42, MusicalColorsParams::default()).unwrap();
        scene.run(500, true, surface()).unwrap();
        for p in scene.frame().particles {
            assert_eq!(p.color.a, 1.0);
        }
    }

    #[test]
    fn from_json_overrides_population_and_banks() {
        let mut scene = MusicalColors::from_json(
            1,
            &json!({"blob_count": 3, "equalizer_bars": 10, "hue_drift": 0.0}),
        )
        .unwrap();
        scene.step(true, surface()).unwrap();
        assert_eq!(scene.blobs().len(), 3);
        assert_eq!(scene.equalizer().len(), 10);
    }

    #[test]
    fn from_json_rejects_invalid_overrides() {
        assert!(MusicalColors::from_json(1, &json!({"damping": 0.0})).is_err());
        assert!(MusicalColors::from_json(1, &json!({"radius": [-5.0, 10.0]})).is_err());
        assert!(MusicalColors::from_json(1, &json!({"equalizer_bars": 0})).is_err());
    }

    #[test]
    fn param_schema_covers_all_params() {
        let scene = MusicalColors::new(1, MusicalColorsParams::default()).unwrap();
        let schema = scene.param_schema();
        for key in scene.params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }

    #[test]
    fn same_seed_produces_identical_frames() {
        let run = || {
            let mut scene = MusicalColors::new(777, MusicalColorsParams::default()).unwrap();
            scene.run(300, true, surface()).unwrap();
            scene.frame()
        };
        assert_eq!(run(), run());
    }
}
