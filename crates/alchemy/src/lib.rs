#![deny(unsafe_code)]
//! Alchemy scene: a radial burst of glowing particles from the surface center.
//!
//! Every active frame, a fixed number of particles erupt from the center with
//! a random direction and speed, wander under bounded turbulence, fade with
//! age, and are reaped at their sampled lifetime. The renderer draws each
//! particle as a glowing circle whose radius pulses with the scene clock,
//! plus a central orb derived from the clock alone. Stopping playback clears
//! the field immediately.

use serde_json::{json, Value};
use vizwave_core::params::{param_f64, param_range, param_usize};
use vizwave_core::{
    AnimationClock, EdgeBehavior, Emitter, EngineError, FieldConfig, Frame, Lifetime,
    ParticleField, Pulse, Range, SpawnPolicy, SplitMix64, StopBehavior, Surface, VelocityModel,
    Visualization,
};

/// Clock advance per frame at the assumed ~60 fps cadence.
const CLOCK_INCREMENT: f64 = 0.02;
/// Particles spawned from the center each active frame.
const DEFAULT_SPAWN_PER_FRAME: usize = 3;
/// Initial speed range in pixels per frame.
const DEFAULT_SPEED: Range = Range::new(1.0, 3.0);
/// Lifetime range in steps.
const DEFAULT_LIFETIME: Range = Range::new(50.0, 150.0);
/// Hue range in degrees: cyan through blue.
const DEFAULT_HUE: Range = Range::new(180.0, 240.0);
/// Per-axis velocity jitter amplitude per step.
const DEFAULT_TURBULENCE: f64 = 0.3;
/// Hard cap on the particle population (oldest evicted first).
const DEFAULT_CAPACITY: usize = 1024;
/// Base particle radius in pixels.
const BASE_SIZE: f64 = 3.0;
/// Relative pulse swing: +/-2 px on the 3 px base radius.
const PULSE_AMPLITUDE: f64 = 2.0 / 3.0;
/// Spatial term of the radius pulse.
const PULSE_SPATIAL: f64 = 0.01;
/// Glow saturation.
const SATURATION: f64 = 1.0;
/// Glow lightness.
const LIGHTNESS: f64 = 0.6;

/// Tunable parameters for the alchemy scene.
#[derive(Debug, Clone, Copy)]
pub struct AlchemyParams {
    /// Particles spawned per active frame.
    pub spawn_per_frame: usize,
    /// Initial speed range in pixels per frame.
    pub speed: Range,
    /// Lifetime range in steps.
    pub lifetime: Range,
    /// Hue range in degrees.
    pub hue: Range,
    /// Velocity jitter amplitude.
    pub turbulence: f64,
    /// Population cap.
    pub capacity: usize,
}

impl Default for AlchemyParams {
    fn default() -> Self {
        Self {
            spawn_per_frame: DEFAULT_SPAWN_PER_FRAME,
            speed: DEFAULT_SPEED,
            lifetime: DEFAULT_LIFETIME,
            hue: DEFAULT_HUE,
            turbulence: DEFAULT_TURBULENCE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl AlchemyParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            spawn_per_frame: param_usize(params, "spawn_per_frame", DEFAULT_SPAWN_PER_FRAME),
            speed: param_range(params, "speed", DEFAULT_SPEED),
            lifetime: param_range(params, "lifetime", DEFAULT_LIFETIME),
            hue: param_range(params, "hue", DEFAULT_HUE),
            turbulence: param_f64(params, "turbulence", DEFAULT_TURBULENCE),
            capacity: param_usize(params, "capacity", DEFAULT_CAPACITY),
        }
    }

    fn field_config(&self) -> FieldConfig {
        FieldConfig {
            spawn: SpawnPolicy::EveryFrame(self.spawn_per_frame),
            emitter: Emitter::Center,
            velocity: VelocityModel::RadialBurst { speed: self.speed },
            lifetime: Lifetime::Steps(self.lifetime),
            hue: self.hue,
            saturation: Range::fixed(SATURATION),
            lightness: Range::fixed(LIGHTNESS),
            size: Range::fixed(BASE_SIZE),
            turbulence: self.turbulence,
            damping: 1.0,
            hue_drift: 0.0,
            edges: EdgeBehavior::None,
            on_stop: StopBehavior::Clear,
            pulse: Some(Pulse {
                rate: 1.0,
                amplitude: PULSE_AMPLITUDE,
                spatial: PULSE_SPATIAL,
                phase: Range::fixed(0.0),
            }),
            drive: None,
            capacity: Some(self.capacity),
        }
    }
}

/// The alchemy scene.
pub struct Alchemy {
    clock: AnimationClock,
    field: ParticleField,
    rng: SplitMix64,
    playing: bool,
    params: AlchemyParams,
}

impl Alchemy {
    /// Creates an alchemy scene with an empty field.
    pub fn new(seed: u64, params: AlchemyParams) -> Result<Self, EngineError> {
        Ok(Self {
            clock: AnimationClock::new(CLOCK_INCREMENT)?,
            field: ParticleField::new(params.field_config())?,
            rng: SplitMix64::new(seed),
            playing: false,
            params,
        })
    }

    /// Creates an alchemy scene from a JSON params object.
    pub fn from_json(seed: u64, json_params: &Value) -> Result<Self, EngineError> {
        Self::new(seed, AlchemyParams::from_json(json_params))
    }

    /// Read-only access to the particle field.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl Visualization for Alchemy {
    fn step(&mut self, active: bool, surface: Surface) -> Result<(), EngineError> {
        self.playing = active;
        let clock = self.clock.advance(active);
        self.field.step(clock, active, surface, &mut self.rng);
        Ok(())
    }

    fn frame(&self) -> Frame {
        Frame {
            clock: self.clock.time(),
            playing: self.playing,
            particles: self.field.snapshot(self.clock.time()),
            tracks: Vec::new(),
        }
    }

    fn params(&self) -> Value {
        json!({
            "spawn_per_frame": self.params.spawn_per_frame,
            "speed": [self.params.speed.min, self.params.speed.max],
            "lifetime": [self.params.lifetime.min, self.params.lifetime.max],
            "hue": [self.params.hue.min, self.params.hue.max],
            "turbulence": self.params.turbulence,
            "capacity": self.params.capacity,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "spawn_per_frame": {
                "type": "integer",
                "default": DEFAULT_SPAWN_PER_FRAME,
                "min": 0,
                "max": 32,
                "description": "Particles spawned from the center each frame"
            },
            "speed": {
                "type": "range",
                "default": [DEFAULT_SPEED.min, DEFAULT_SPEED.max],
                "description": "Initial speed range in pixels per frame"
            },
            "lifetime": {
                "type": "range",
                "default": [DEFAULT_LIFETIME.min, DEFAULT_LIFETIME.max],
                "description": "Lifetime range in steps"
            },
            "hue": {
                "type": "range",
                "default": [DEFAULT_HUE.min, DEFAULT_HUE.max],
                "description": "Hue range in degrees"
            },
            "turbulence": {
                "type": "number",
                "default": DEFAULT_TURBULENCE,
                "min": 0.0,
                "max": 2.0,
                "description": "Per-axis velocity jitter per step"
            },
            "capacity": {
                "type": "integer",
                "default": DEFAULT_CAPACITY,
                "min": 1,
                "description": "Hard population cap, oldest evicted first"
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
    fn spawns_exactly_three_per_active_frame_by_default() {
        let mut scene = Alchemy::new(42, AlchemyParams::default()).unwrap();
        scene.step(true, surface()).unwrap();
        assert_eq!(scene.field().len(), 3);
        scene.step(true, surface()).unwrap();
        assert_eq!(scene.field().len(), 6);
    }

    #[test]
    fn particles_spawn_at_the_surface_center() {
        let mut scene = Alchemy::new(42, AlchemyParams::default()).unwrap();
        scene.step(true, surface()).unwrap();
        // After one step each particle moved one velocity from the center;
        // speed < 3 plus jitter keeps it within a few pixels.
        for p in scene.field().particles() {
            assert!((p.position.x - 200.0).abs() < 4.0);
            assert!((p.position.y - 400.0).abs() < 4.0);
        }
    }

    #[test]
    fn stopping_clears_the_field_and_freezes_the_clock() {
        let mut scene = Alchemy::new(42, AlchemyParams::default()).unwrap();
        scene.run(20, true, surface()).unwrap();
        assert_eq!(scene.field().len(), 60);
        let clock = scene.frame().clock;
        scene.step(false, surface()).unwrap();
        let frame = scene.frame();
        assert!(frame.particles.is_empty());
        assert!(!frame.playing);
        assert_eq!(frame.clock, clock);
    }

    #[test]
    fn clock_advances_by_increment_while_playing() {
        let mut scene = Alchemy::new(42, AlchemyParams::default()).unwrap();
        scene.run(10, true, surface()).unwrap();
        assert!((scene.frame().clock - 0.2).abs() < 1e-12);
    }

    #[test]
    fn hues_land_in_the_configured_band() {
        let mut scene = Alchemy::new(7, AlchemyParams::default()).unwrap();
        scene.run(5, true, surface()).unwrap();
        for p in scene.field().particles() {
            assert!((180.0..240.0).contains(&p.hue), "hue {}", p.hue);
        }
    }

    #[test]
    fn population_reaches_a_bounded_steady_state() {
        let mut scene = Alchemy::new(99, AlchemyParams::default()).unwrap();
        scene.run(500, true, surface()).unwrap();
        let after_500 = scene.field().len();
        scene.run(100, true, surface()).unwrap();
        // 3 spawns/frame with lifetimes under 150 steps keeps the field
        // under 450 live particles, well below the capacity cap.
        assert!(after_500 <= 450, "population {after_500} exceeded bound");
        assert!(scene.field().len() <= 450);
    }

    #[test]
    fn from_json_overrides_selected_params() {
        let scene = Alchemy::from_json(
            1,
            &json!({"spawn_per_frame": 5, "turbulence": 0.0, "hue": [0.0, 60.0]}),
        )
        .unwrap();
        assert_eq!(scene.params()["spawn_per_frame"], 5);
        assert_eq!(scene.params()["turbulence"], 0.0);
        assert_eq!(scene.params()["hue"][1], 60.0);
        // Untouched params keep their defaults.
        assert_eq!(scene.params()["capacity"], DEFAULT_CAPACITY);
    }

    #[test]
    fn from_json_rejects_invalid_overrides() {
        assert!(Alchemy::from_json(1, &json!({"lifetime": [0.0, 10.0]})).is_err());
        assert!(Alchemy::from_json(1, &json!({"turbulence": -1.0})).is_err());
    }

    #[test]
    fn param_schema_covers_all_params() {
        let scene = Alchemy::new(1, AlchemyParams::default()).unwrap();
        let schema = scene.param_schema();
        let params = scene.params();
        for key in params.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }

    #[test]
    fn same_seed_produces_identical_frames() {
        let run = || {
            let mut scene = Alchemy::new(123_456, AlchemyParams::default()).unwrap();
            scene.run(100, true, surface()).unwrap();
            scene.frame()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn different_seeds_diverge() {
        let run = |seed| {
            let mut scene = Alchemy::new(seed, AlchemyParams::default()).unwrap();
            scene.run(10, true, surface()).unwrap();
            scene.frame()
        };
        assert_ne!(run(1), run(2));
    }
}
