//! Fixed-length banks of per-frame recomputed scalar signals.
//!
//! A [`ScalarTrack`] models equalizer bars and waveform sample arrays: every
//! index is recomputed from scratch each frame as a sinusoid of the scene
//! clock plus optional bounded uniform noise. There is no per-value lifecycle
//! — allocation happens once, at construction.

use crate::error::EngineError;
use crate::field::Range;
use crate::prng::SplitMix64;
use serde::{Deserialize, Serialize};

/// Shape of a scalar track's per-index signal:
///
/// `value[i] = rect(sin(clock * rate + i * spatial)) * amplitude + offset
///             + noise_draw * noise`
///
/// clamped to `clamp`. `rect` is `abs` when `rectify` is set, identity
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Number of values in the bank. Must be non-zero.
    pub len: usize,
    /// Clock multiplier inside the sinusoid.
    pub rate: f64,
    /// Per-index phase offset inside the sinusoid.
    pub spatial: f64,
    pub amplitude: f64,
    pub offset: f64,
    /// Take `abs` of the sinusoid before scaling (equalizer-style bars).
    pub rectify: bool,
    /// Amplitude of the additive uniform noise term; 0 disables noise and
    /// makes the track a pure function of (clock, index).
    pub noise: f64,
    /// Declared output range; every value is clamped into it.
    pub clamp: Range,
}

impl TrackConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.len == 0 {
            return Err(EngineError::InvalidConfig(
                "scalar track length must be non-zero".into(),
            ));
        }
        for (name, v) in [
            ("rate", self.rate),
            ("spatial", self.spatial),
            ("amplitude", self.amplitude),
            ("offset", self.offset),
        ] {
            if !v.is_finite() {
                return Err(EngineError::InvalidConfig(format!(
                    "track {name} must be finite, got {v}"
                )));
            }
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "track noise must be non-negative and finite, got {}",
                self.noise
            )));
        }
        self.clamp.validate("clamp")
    }
}

/// A bank of scalar signals recomputed every active frame.
#[derive(Debug, Clone)]
pub struct ScalarTrack {
    config: TrackConfig,
    values: Vec<f64>,
}

impl ScalarTrack {
    /// Creates a zero-filled track from a validated configuration.
    pub fn new(config: TrackConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            values: vec![0.0; config.len],
            config,
        })
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The current bank contents.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Recomputes every index from the clock.
    ///
    /// The noise draw order is index-major, so two tracks with identical
    /// configs fed the same clock and PRNG sequence produce identical banks.
    pub fn recompute(&mut self, clock: f64, rng: &mut SplitMix64) {
        let c = &self.config;
        for (i, value) in self.values.iter_mut().enumerate() {
            let mut base = (clock * c.rate + i as f64 * c.spatial).sin();
            if c.rectify {
                base = base.abs();
            }
            let mut v = base * c.amplitude + c.offset;
            if c.noise > 0.0 {
                v += rng.next_f64() * c.noise;
            }
            *value = v.clamp(c.clamp.min, c.clamp.max);
        }
    }

    /// Zeroes the bank without touching the configuration.
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }
}
