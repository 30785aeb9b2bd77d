#![deny(unsafe_code)]
//! Battery scene: energy bolts rise from the bottom edge while a charge
//! meter fills and decays.
//!
//! Bolts spawn probabilistically along the bottom edge and ascend at a
//! sampled speed toward a sampled target altitude, where they are reaped.
//! The charge meter gains a random amount per active frame and loses a fixed
//! amount, so it hovers near full while playing and drains to zero on stop.
//! The renderer draws bolts as zigzag strokes, the meter as a stack of bars,
//! and a pulsing core derived from the clock alone.

use serde_json::{json, Value};
use vizwave_core::params::{param_f64, param_range, param_usize};
use vizwave_core::{
    AnimationClock, EdgeBehavior, Emitter, EngineError, FieldConfig, Frame, Lifetime,
    ParticleField, Range, SpawnPolicy, SplitMix64, StopBehavior, Surface, TrackSnapshot,
    VelocityModel, Visualization,
};

/// Clock advance per frame at the assumed ~60 fps cadence.
const CLOCK_INCREMENT: f64 = 0.05;
/// Probability of spawning one bolt per active frame.
const DEFAULT_SPAWN_CHANCE: f64 = 0.3;
/// Ascent speed range in pixels per frame.
const DEFAULT_ASCENT_SPEED: Range = Range::new(3.0, 8.0);
/// Target altitude range as a fraction of surface height, measured from the top.
const DEFAULT_TARGET_ALTITUDE: Range = Range::new(0.0, 0.3);
/// Hue range in degrees: cyan through blue.
const DEFAULT_HUE: Range = Range::new(180.0, 240.0);
/// Bolt stroke width range in pixels.
const DEFAULT_WIDTH: Range = Range::new(2.0, 5.0);
/// Hard cap on live bolts.
const DEFAULT_CAPACITY: usize = 256;
/// Maximum random charge gained per active frame.
const CHARGE_PER_FRAME: f64 = 3.0;
/// Fixed charge lost per active frame.
const DISCHARGE_PER_FRAME: f64 = 0.5;
/// Full-scale charge level.
const FULL_CHARGE: f64 = 100.0;
/// Bolt color saturation.
const SATURATION: f64 = 1.0;
/// Bolt color lightness.
const LIGHTNESS: f64 = 0.7;

/// Charge level accumulator in [0, `FULL_CHARGE`].
///
/// Gains a uniform random amount up to [`CHARGE_PER_FRAME`] and loses
/// [`DISCHARGE_PER_FRAME`] every active frame.
#[derive(Debug, Clone)]
pub struct ChargeMeter {
    level: f64,
}

impl ChargeMeter {
    pub fn new() -> Self {
        Self { level: 0.0 }
    }

    /// One active frame: charge, then decay, both clamped.
    pub fn step(&mut self, rng: &mut SplitMix64) {
        self.level = (self.level + rng.next_f64() * CHARGE_PER_FRAME).min(FULL_CHARGE);
        self.level = (self.level - DISCHARGE_PER_FRAME).max(0.0);
    }

    /// Drops the level to zero.
    pub fn reset(&mut self) {
        self.level = 0.0;
    }

    /// Raw level in [0, 100].
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Level normalized to [0, 1].
    pub fn normalized(&self) -> f64 {
        self.level / FULL_CHARGE
    }
}

impl Default for ChargeMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Tunable parameters for the battery scene.
#[derive(Debug, Clone, Copy)]
pub struct BatteryParams {
    /// Bolt spawn probability per frame.
    pub spawn_chance: f64,
    /// Ascent speed range in pixels per frame.
    pub speed: Range,
    /// Target altitude range as a fraction of surface height.
    pub target_altitude: Range,
    /// Hue range in degrees.
    pub hue: Range,
    /// Stroke width range in pixels.
    pub width: Range,
    /// Live bolt cap.
    pub capacity: usize,
}

impl Default for BatteryParams {
    fn default() -> Self {
        Self {
            spawn_chance: DEFAULT_SPAWN_CHANCE,
            speed: DEFAULT_ASCENT_SPEED,
            target_altitude: DEFAULT_TARGET_ALTITUDE,
            hue: DEFAULT_HUE,
            width: DEFAULT_WIDTH,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl BatteryParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            spawn_chance: param_f64(params, "spawn_chance", DEFAULT_SPAWN_CHANCE),
            speed: param_range(params, "speed", DEFAULT_ASCENT_SPEED),
            target_altitude: param_range(params, "target_altitude", DEFAULT_TARGET_ALTITUDE),
            hue: param_range(params, "hue", DEFAULT_HUE),
            width: param_range(params, "width", DEFAULT_WIDTH),
            capacity: param_usize(params, "capacity", DEFAULT_CAPACITY),
        }
    }

    fn field_config(&self) -> FieldConfig {
        FieldConfig {
            spawn: SpawnPolicy::Chance(self.spawn_chance),
            emitter: Emitter::BottomEdge,
            velocity: VelocityModel::Ascent { speed: self.speed },
            lifetime: Lifetime::Altitude(self.target_altitude),
            hue: self.hue,
            saturation: Range::fixed(SATURATION),
            lightness: Range::fixed(LIGHTNESS),
            size: self.width,
            turbulence: 0.0,
            damping: 1.0,
            hue_drift: 0.0,
            edges: EdgeBehavior::None,
            on_stop: StopBehavior::Clear,
            pulse: None,
            drive: None,
            capacity: Some(self.capacity),
        }
    }
}

/// The battery scene.
pub struct Battery {
    clock: AnimationClock,
    bolts: ParticleField,
    meter: ChargeMeter,
    rng: SplitMix64,
    playing: bool,
    params: BatteryParams,
}

impl Battery {
    /// Creates a battery scene with no bolts and an empty meter.
    pub fn new(seed: u64, params: BatteryParams) -> Result<Self, EngineError> {
        Ok(Self {
            clock: AnimationClock::new(CLOCK_INCREMENT)?,
            bolts: ParticleField::new(params.field_config())?,
            meter: ChargeMeter::new(),
            rng: SplitMix64::new(seed),
            playing: false,
            params,
        })
    }

    /// Creates a battery scene from a JSON params object.
    pub fn from_json(seed: u64, json_params: &Value) -> Result<Self, EngineError> {
        Self::new(seed, BatteryParams::from_json(json_params))
    }

    /// Read-only access to the bolt field.
    pub fn bolts(&self) -> &ParticleField {
        &self.bolts
    }

    /// Read-only access to the charge meter.
    pub fn meter(&self) -> &ChargeMeter {
        &self.meter
    }
}

impl Visualization for Battery {
    fn step(&mut self, active: bool, surface: Surface) -> Result<(), EngineError> {
        self.playing = active;
        let clock = self.clock.advance(active);
        self.bolts.step(clock, active, surface, &mut self.rng);
        if active {
            self.meter.step(&mut self.rng);
        } else {
            self.meter.reset();
        }
        Ok(())
    }

    fn frame(&self) -> Frame {
        Frame {
            clock: self.clock.time(),
            playing: self.playing,
            particles: self.bolts.snapshot(self.clock.time()),
            tracks: vec![TrackSnapshot::new("charge", vec![self.meter.normalized()])],
        }
    }

    fn params(&self) -> Value {
        json!({
            "spawn_chance": self.params.spawn_chance,
            "speed": [self.params.speed.min, self.params.speed.max],
            "target_altitude": [
                self.params.target_altitude.min,
                self.params.target_altitude.max,
            ],
            "hue": [self.params.hue.min, self.params.hue.max],
            "width": [self.params.width.min, self.params.width.max],
            "capacity": self.params.capacity,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "spawn_chance": {
                "type": "number",
                "default": DEFAULT_SPAWN_CHANCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Probability of spawning one bolt per frame"
            },
            "speed": {
                "type": "range",
                "default": [DEFAULT_ASCENT_SPEED.min, DEFAULT_ASCENT_SPEED.max],
                "description": "Ascent speed range in pixels per frame"
            },
            "target_altitude": {
                "type": "range",
                "default": [DEFAULT_TARGET_ALTITUDE.min, DEFAULT_TARGET_ALTITUDE.max],
                "description": "Target altitude range as a fraction of surface height"
            },
            "hue": {
                "type": "range",
                "default": [DEFAULT_HUE.min, DEFAULT_HUE.max],
                "description": "Hue range in degrees"
            },
            "width": {
                "type": "range",
                "default": [DEFAULT_WIDTH.min, DEFAULT_WIDTH.max],
                "description": "Bolt stroke width range in pixels"
            },
            "capacity": {
                "type": "integer",
                "default": DEFAULT_CAPACITY,
                "min": 1,
                "description": "Hard cap on live bolts, oldest evicted first"
            }
        })
    }
}
