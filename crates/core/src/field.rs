//! Parameterized particle field: spawn, integrate, reap.
//!
//! One [`ParticleField`] owns the live particles of a single visualization
//! instance. All variant behavior — burst-from-center bubbles, bottom-edge
//! bolts, persistent drifting blobs — is expressed through [`FieldConfig`]
//! rather than separate field types. The per-frame order is fixed:
//! spawn, then integrate, then reap, then (externally) snapshot.

use crate::color::wrap_hue;
use crate::error::EngineError;
use crate::flow::{Drive, NoiseFlow, Sway};
use crate::frame::RenderableParticle;
use crate::particle::Particle;
use crate::prng::SplitMix64;
use crate::surface::Surface;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// An inclusive-min, exclusive-max sampling interval.
///
/// `min == max` denotes a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A degenerate range that always samples to `value`.
    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Draws a uniform sample from [min, max). Always consumes one PRNG draw.
    pub fn sample(&self, rng: &mut SplitMix64) -> f64 {
        rng.next_range(self.min, self.max)
    }

    /// Validates that the range is finite and not inverted.
    pub fn validate(&self, name: &'static str) -> Result<(), EngineError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(EngineError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// How many particles enter the field each active frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Exactly `n` spawns per frame.
    EveryFrame(usize),
    /// One spawn with the given probability per frame.
    Chance(f64),
    /// `n` spawns whenever the field is empty; used to seed a persistent
    /// population once at play-start.
    Burst(usize),
}

/// Where new particles appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emitter {
    /// Surface center.
    Center,
    /// Uniform x along the bottom edge.
    BottomEdge,
    /// Uniform over the whole surface.
    Area,
}

/// Initial velocity distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityModel {
    /// Uniform random direction with a sampled speed.
    RadialBurst { speed: Range },
    /// Straight up (negative y) with a sampled speed.
    Ascent { speed: Range },
    /// Independent per-axis components.
    PerAxis { vx: Range, vy: Range },
}

/// How a particle's maximum lifetime is determined at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// Sampled directly, in steps. Must be positive.
    Steps(Range),
    /// Sampled target altitude as a fraction of surface height; converted to
    /// steps at spawn from the sampled ascent speed, so the particle is
    /// reaped the step it reaches its target. Requires an `Ascent` velocity.
    Altitude(Range),
    /// Never reaped; leaves the field only when it is cleared.
    Persistent,
}

/// What happens to the field on an inactive step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBehavior {
    /// Discard every particle immediately (no fade-out).
    Clear,
    /// Keep the population but zero all velocities.
    Freeze,
}

/// Behavior at the surface boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeBehavior {
    /// Particles leave the surface freely (reaping bounds the population).
    None,
    /// Reflect velocity and clamp position at the surface rectangle.
    Bounce,
}

/// Sinusoidal radius modulation applied at snapshot time.
///
/// `radius = size * (1 + amplitude * sin(clock * rate + phase + x * spatial))`
/// with the per-particle phase drawn from `phase` at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub rate: f64,
    pub amplitude: f64,
    pub spatial: f64,
    pub phase: Range,
}

/// Deterministic drive configuration (see [`crate::flow`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveConfig {
    /// Sinusoidal sway on both axes.
    Sway { rate: f64, amplitude: f64 },
    /// Smooth Perlin flow field.
    Flow { seed: u32, scale: f64, strength: f64 },
}

/// Full behavioral description of a particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub spawn: SpawnPolicy,
    pub emitter: Emitter,
    pub velocity: VelocityModel,
    pub lifetime: Lifetime,
    /// Hue range in degrees; samples are wrapped into [0, 360).
    pub hue: Range,
    pub saturation: Range,
    pub lightness: Range,
    /// Base radius range.
    pub size: Range,
    /// Amplitude of the bounded uniform velocity jitter per axis per step:
    /// `(u - 0.5) * turbulence` with `u` in [0, 1).
    pub turbulence: f64,
    /// Per-step velocity retention factor in (0, 1]; 1.0 disables damping.
    pub damping: f64,
    /// Per-step hue increment in degrees (wraps).
    pub hue_drift: f64,
    pub edges: EdgeBehavior,
    pub on_stop: StopBehavior,
    pub pulse: Option<Pulse>,
    pub drive: Option<DriveConfig>,
    /// Hard population cap with oldest-first eviction; `None` leaves the
    /// field bounded only by its reap rate.
    pub capacity: Option<usize>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            spawn: SpawnPolicy::EveryFrame(1),
            emitter: Emitter::Center,
            velocity: VelocityModel::RadialBurst {
                speed: Range::new(1.0, 2.0),
            },
            lifetime: Lifetime::Steps(Range::new(30.0, 60.0)),
            hue: Range::new(0.0, 360.0),
            saturation: Range::fixed(1.0),
            lightness: Range::fixed(0.5),
            size: Range::fixed(3.0),
            turbulence: 0.0,
            damping: 1.0,
            hue_drift: 0.0,
            edges: EdgeBehavior::None,
            on_stop: StopBehavior::Clear,
            pulse: None,
            drive: None,
            capacity: None,
        }
    }
}

impl FieldConfig {
    /// Validates the configuration.
    ///
    /// Catches every inconsistency up front so the per-frame step path has no
    /// error cases: inverted or non-finite ranges, non-positive lifetimes,
    /// out-of-range probabilities, an `Altitude` lifetime without an ascent
    /// velocity, and degenerate damping or capacity values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if let SpawnPolicy::Chance(p) = self.spawn {
            if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
                return Err(EngineError::InvalidConfig(format!(
                    "spawn chance must be in [0, 1], got {p}"
                )));
            }
        }
        match &self.velocity {
            VelocityModel::RadialBurst { speed } | VelocityModel::Ascent { speed } => {
                speed.validate("speed")?;
            }
            VelocityModel::PerAxis { vx, vy } => {
                vx.validate("vx")?;
                vy.validate("vy")?;
            }
        }
        match &self.lifetime {
            Lifetime::Steps(r) => {
                r.validate("lifetime")?;
                if r.min <= 0.0 {
                    return Err(EngineError::InvalidRange {
                        name: "lifetime",
                        min: r.min,
                        max: r.max,
                    });
                }
            }
            Lifetime::Altitude(r) => {
                r.validate("altitude")?;
                if r.min < 0.0 || r.max > 1.0 {
                    return Err(EngineError::InvalidRange {
                        name: "altitude",
                        min: r.min,
                        max: r.max,
                    });
                }
                match &self.velocity {
                    VelocityModel::Ascent { speed } if speed.min > 0.0 => {}
                    _ => {
                        return Err(EngineError::InvalidConfig(
                            "altitude lifetime requires an ascent velocity with positive speed"
                                .into(),
                        ))
                    }
                }
            }
            Lifetime::Persistent => {}
        }
        self.hue.validate("hue")?;
        for (name, r) in [("saturation", &self.saturation), ("lightness", &self.lightness)] {
            r.validate(name)?;
            if r.min < 0.0 || r.max > 1.0 {
                return Err(EngineError::InvalidRange {
                    name,
                    min: r.min,
                    max: r.max,
                });
            }
        }
        self.size.validate("size")?;
        if self.size.min < 0.0 {
            return Err(EngineError::InvalidRange {
                name: "size",
                min: self.size.min,
                max: self.size.max,
            });
        }
        if !(self.turbulence.is_finite() && self.turbulence >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "turbulence must be non-negative and finite, got {}",
                self.turbulence
            )));
        }
        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !self.hue_drift.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "hue drift must be finite, got {}",
                self.hue_drift
            )));
        }
        if let Some(pulse) = &self.pulse {
            pulse.phase.validate("pulse phase")?;
            if !(pulse.rate.is_finite()
                && pulse.spatial.is_finite()
                && pulse.amplitude.is_finite()
                && pulse.amplitude >= 0.0)
            {
                return Err(EngineError::InvalidConfig(
                    "pulse rate/spatial must be finite and amplitude non-negative".into(),
                ));
            }
        }
        if self.capacity == Some(0) {
            return Err(EngineError::InvalidConfig(
                "capacity of 0 would suppress all particles; use a spawn policy instead".into(),
            ));
        }
        Ok(())
    }
}

/// The live particle collection of one visualization instance.
pub struct ParticleField {
    config: FieldConfig,
    drive: Option<Box<dyn Drive>>,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Creates an empty field from a validated configuration.
    pub fn new(config: FieldConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let drive: Option<Box<dyn Drive>> = match config.drive {
            Some(DriveConfig::Sway { rate, amplitude }) => Some(Box::new(Sway { rate, amplitude })),
            Some(DriveConfig::Flow {
                seed,
                scale,
                strength,
            }) => Some(Box::new(NoiseFlow::new(seed, scale, strength))),
            None => None,
        };
        Ok(Self {
            config,
            drive,
            particles: Vec::new(),
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only access to the live particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Discards every particle immediately.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advances the field by one frame.
    ///
    /// Inactive frames apply the configured [`StopBehavior`] and return; the
    /// call is idempotent across consecutive inactive frames. Active frames
    /// run the fixed order: spawn, integrate (position, turbulence, damping,
    /// drive, hue drift, edges, age), reap, evict past capacity.
    pub fn step(&mut self, clock: f64, active: bool, surface: Surface, rng: &mut SplitMix64) {
        if !active {
            match self.config.on_stop {
                StopBehavior::Clear => self.particles.clear(),
                StopBehavior::Freeze => {
                    for p in &mut self.particles {
                        p.velocity = DVec2::ZERO;
                    }
                }
            }
            return;
        }

        let count = match self.config.spawn {
            SpawnPolicy::EveryFrame(n) => n,
            SpawnPolicy::Chance(p) => usize::from(rng.chance(p)),
            SpawnPolicy::Burst(n) => {
                if self.particles.is_empty() {
                    n
                } else {
                    0
                }
            }
        };
        for _ in 0..count {
            let particle = self.spawn_particle(surface, rng);
            self.particles.push(particle);
        }

        let turbulence = self.config.turbulence;
        let damping = self.config.damping;
        let hue_drift = self.config.hue_drift;
        for p in &mut self.particles {
            p.position += p.velocity;
            if turbulence > 0.0 {
                p.velocity.x += (rng.next_f64() - 0.5) * turbulence;
                p.velocity.y += (rng.next_f64() - 0.5) * turbulence;
            }
            p.velocity *= damping;
            if let Some(drive) = &self.drive {
                p.velocity += drive.sample(p.position, p.phase, clock);
            }
            if hue_drift != 0.0 {
                p.hue = wrap_hue(p.hue + hue_drift);
            }
            if self.config.edges == EdgeBehavior::Bounce {
                if p.position.x < 0.0 || p.position.x > surface.width() {
                    p.velocity.x = -p.velocity.x;
                }
                if p.position.y < 0.0 || p.position.y > surface.height() {
                    p.velocity.y = -p.velocity.y;
                }
                p.position = surface.clamp(p.position);
            }
            p.age += 1.0;
        }

        self.particles.retain(|p| !p.expired());

        if let Some(cap) = self.config.capacity {
            let len = self.particles.len();
            if len > cap {
                self.particles.drain(0..len - cap);
            }
        }
    }

    fn spawn_particle(&self, surface: Surface, rng: &mut SplitMix64) -> Particle {
        let position = match self.config.emitter {
            Emitter::Center => surface.center(),
            Emitter::BottomEdge => DVec2::new(rng.next_f64() * surface.width(), surface.height()),
            Emitter::Area => DVec2::new(
                rng.next_f64() * surface.width(),
                rng.next_f64() * surface.height(),
            ),
        };
        let velocity = match &self.config.velocity {
            VelocityModel::RadialBurst { speed } => {
                let angle = rng.next_f64() * TAU;
                let s = speed.sample(rng);
                DVec2::new(angle.cos() * s, angle.sin() * s)
            }
            VelocityModel::Ascent { speed } => DVec2::new(0.0, -speed.sample(rng)),
            VelocityModel::PerAxis { vx, vy } => DVec2::new(vx.sample(rng), vy.sample(rng)),
        };
        let max_life = match &self.config.lifetime {
            Lifetime::Steps(r) => r.sample(rng),
            Lifetime::Altitude(r) => {
                let target = r.sample(rng) * surface.height();
                (position.y - target).max(0.0) / velocity.y.abs()
            }
            Lifetime::Persistent => f64::INFINITY,
        };
        Particle {
            position,
            velocity,
            age: 0.0,
            max_life,
            hue: wrap_hue(self.config.hue.sample(rng)),
            saturation: self.config.saturation.sample(rng),
            lightness: self.config.lightness.sample(rng),
            size: self.config.size.sample(rng),
            phase: self
                .config
                .pulse
                .map(|pl| pl.phase.sample(rng))
                .unwrap_or(0.0),
        }
    }

    /// Read-only projection of the live particles for the renderer.
    ///
    /// Alpha is the remaining-life fade; radius applies the configured pulse
    /// at the given clock value and never goes negative.
    pub fn snapshot(&self, clock: f64) -> Vec<RenderableParticle> {
        self.particles
            .iter()
            .map(|p| {
                let radius = match &self.config.pulse {
                    Some(pl) => {
                        let swing =
                            (clock * pl.rate + p.phase + p.position.x * pl.spatial).sin();
                        (p.size * (1.0 + pl.amplitude * swing)).max(0.0)
                    }
                    None => p.size,
                };
                RenderableParticle {
                    x: p.position.x,
                    y: p.position.y,
                    radius,
                    color: crate::color::hsl_to_rgba(p.hue, p.saturation, p.lightness, p.fade()),
                }
            })
            .collect()
    }
}
