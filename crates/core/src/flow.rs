//! Drive sources: deterministic per-step velocity contributions.
//!
//! A [`Drive`] produces a small (dx, dy) velocity nudge for a particle given
//! its position, its pulse phase, and the scene clock. Unlike turbulence
//! (bounded uniform noise from the injected PRNG), drives are fully
//! deterministic functions of their inputs: same particle, same clock, same
//! nudge.

use glam::DVec2;
use noise::{NoiseFn, Perlin};

/// A deterministic source of velocity contributions.
pub trait Drive: Send + Sync {
    /// Velocity nudge for a particle at `position` with pulse `phase` at `time`.
    fn sample(&self, position: DVec2, phase: f64, time: f64) -> DVec2;
}

/// Sinusoidal sway applied equally to both axes.
///
/// `sin(time * rate + phase) * amplitude` — the per-particle phase keeps a
/// population of particles from swaying in lockstep.
#[derive(Debug, Clone, Copy)]
pub struct Sway {
    pub rate: f64,
    pub amplitude: f64,
}

impl Drive for Sway {
    fn sample(&self, _position: DVec2, phase: f64, time: f64) -> DVec2 {
        let v = (time * self.rate + phase).sin() * self.amplitude;
        DVec2::new(v, v)
    }
}

/// Smooth Perlin-noise flow field.
///
/// Two offset noise samples produce the x and y components, with the scene
/// clock sliding the sample plane so the flow evolves over time.
pub struct NoiseFlow {
    noise: Perlin,
    scale: f64,
    strength: f64,
}

/// Offset between the x- and y-component noise samples, so the two channels
/// are decorrelated without a second generator.
const CHANNEL_OFFSET: f64 = 40.0;

impl NoiseFlow {
    pub fn new(seed: u32, scale: f64, strength: f64) -> Self {
        Self {
            noise: Perlin::new(seed),
            scale,
            strength,
        }
    }
}

impl Drive for NoiseFlow {
    fn sample(&self, position: DVec2, _phase: f64, time: f64) -> DVec2 {
        let sx = position.x * self.scale;
        let sy = position.y * self.scale;
        let dx = self.noise.get([sx, sy + time]);
        let dy = self.noise.get([sx + CHANNEL_OFFSET, sy + time + CHANNEL_OFFSET]);
        DVec2::new(dx, dy) * self.strength
    }
}
