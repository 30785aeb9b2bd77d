#![deny(unsafe_code)]
//! Bars-and-waves scene: an equalizer bar bank plus a waveform sample array.
//!
//! Both banks are recomputed every active frame from the scene clock: the
//! bars mix a sinusoid with uniform noise, the waveform is a pure noiseless
//! sinusoid. While idle the banks simply stop updating (frozen, not cleared)
//! and the renderer shows a static glyph instead. The renderer derives bar
//! geometry from `surface_width / bar_count` and draws the waveform twice at
//! different amplitudes.

use serde_json::{json, Value};
use vizwave_core::params::{param_f64, param_usize};
use vizwave_core::{
    AnimationClock, EngineError, Frame, Range, ScalarTrack, SplitMix64, Surface, TrackConfig,
    TrackSnapshot, Visualization,
};

/// Clock advance per frame at the assumed ~60 fps cadence.
const CLOCK_INCREMENT: f64 = 0.05;
/// Number of equalizer bars.
const DEFAULT_BAR_COUNT: usize = 32;
/// Number of waveform sample points.
const DEFAULT_WAVE_POINTS: usize = 50;
/// Sinusoid share of a bar's height.
const BAR_AMPLITUDE: f64 = 0.5;
/// Noise share of a bar's height.
const DEFAULT_BAR_NOISE: f64 = 0.5;
/// Per-bar phase offset.
const BAR_SPATIAL: f64 = 0.3;
/// Waveform amplitude in its [-1, 1] range.
const DEFAULT_WAVE_AMPLITUDE: f64 = 0.3;
/// Waveform clock multiplier.
const WAVE_RATE: f64 = 2.0;
/// Per-sample phase offset of the waveform.
const WAVE_SPATIAL: f64 = 0.2;

/// Tunable parameters for the bars-and-waves scene.
#[derive(Debug, Clone, Copy)]
pub struct BarsWavesParams {
    pub bar_count: usize,
    pub wave_points: usize,
    /// Amplitude of the uniform noise mixed into each bar.
    pub bar_noise: f64,
    pub wave_amplitude: f64,
}

impl Default for BarsWavesParams {
    fn default() -> Self {
        Self {
            bar_count: DEFAULT_BAR_COUNT,
            wave_points: DEFAULT_WAVE_POINTS,
            bar_noise: DEFAULT_BAR_NOISE,
            wave_amplitude: DEFAULT_WAVE_AMPLITUDE,
        }
    }
}

impl BarsWavesParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            bar_count: param_usize(params, "bar_count", DEFAULT_BAR_COUNT),
            wave_points: param_usize(params, "wave_points", DEFAULT_WAVE_POINTS),
            bar_noise: param_f64(params, "bar_noise", DEFAULT_BAR_NOISE),
            wave_amplitude: param_f64(params, "wave_amplitude", DEFAULT_WAVE_AMPLITUDE),
        }
    }

    fn bars_config(&self) -> TrackConfig {
        TrackConfig {
            len: self.bar_count,
            rate: 1.0,
            spatial: BAR_SPATIAL,
            amplitude: BAR_AMPLITUDE,
            offset: 0.0,
            rectify: false,
            noise: self.bar_noise,
            clamp: Range::new(0.0, 1.0),
        }
    }

    fn waves_config(&self) -> TrackConfig {
        TrackConfig {
            len: self.wave_points,
            rate: WAVE_RATE,
            spatial: WAVE_SPATIAL,
            amplitude: self.wave_amplitude,
            offset: 0.0,
            rectify: false,
            noise: 0.0,
            clamp: Range::new(-1.0, 1.0),
        }
    }
}

/// The bars-and-waves scene.
pub struct BarsWaves {
    clock: AnimationClock,
    bars: ScalarTrack,
    waves: ScalarTrack,
    rng: SplitMix64,
    playing: bool,
    params: BarsWavesParams,
}

impl BarsWaves {
    /// Creates a bars-and-waves scene with zeroed banks.
    pub fn new(seed: u64, params: BarsWavesParams) -> Result<Self, EngineError> {
        Ok(Self {
            clock: AnimationClock::new(CLOCK_INCREMENT)?,
            bars: ScalarTrack::new(params.bars_config())?,
            waves: ScalarTrack::new(params.waves_config())?,
            rng: SplitMix64::new(seed),
            playing: false,
            params,
        })
    }

    /// Creates a bars-and-waves scene from a JSON params object.
    pub fn from_json(seed: u64, json_params: &Value) -> Result<Self, EngineError> {
        Self::new(seed, BarsWavesParams::from_json(json_params))
    }

    /// Read-only access to the bar bank.
    pub fn bars(&self) -> &ScalarTrack {
        &self.bars
    }

    /// Read-only access to the waveform bank.
    pub fn waves(&self) -> &ScalarTrack {
        &self.waves
    }
}

impl Visualization for BarsWaves {
    fn step(&mut self, active: bool, _surface: Surface) -> Result<(), EngineError> {
        self.playing = active;
        let clock = self.clock.advance(active);
        if active {
            self.bars.recompute(clock, &mut self.rng);
            self.waves.recompute(clock, &mut self.rng);
        }
        Ok(())
    }

    fn frame(&self) -> Frame {
        Frame {
            clock: self.clock.time(),
            playing: self.playing,
            particles: Vec::new(),
            tracks: vec![
                TrackSnapshot::new("bars", self.bars.values().to_vec()),
                TrackSnapshot::new("waves", self.waves.values().to_vec()),
            ],
        }
    }

    fn params(&self) -> Value {
        json!({
            "bar_count": self.params.bar_count,
            "wave_points": self.params.wave_points,
            "bar_noise": self.params.bar_noise,
            "wave_amplitude": self.params.wave_amplitude,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "bar_count": {
                "type": "integer",
                "default": DEFAULT_BAR_COUNT,
                "min": 1,
                "max": 256,
                "description": "Number of equalizer bars"
            },
            "wave_points": {
                "type": "integer",
                "default": DEFAULT_WAVE_POINTS,
                "min": 2,
                "max": 1024,
                "description": "Number of waveform sample points"
            },
            "bar_noise": {
                "type": "number",
                "default": DEFAULT_BAR_NOISE,
                "min": 0.0,
                "max": 1.0,
                "description": "Uniform noise amplitude mixed into each bar"
            },
            "wave_amplitude": {
                "type": "number",
                "default": DEFAULT_WAVE_AMPLITUDE,
                "min": 0.0,
                "max": 1.0,
                "description": "Waveform amplitude within [-1, 1]"
            }
        })
    }
}
