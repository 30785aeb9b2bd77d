#![deny(unsafe_code)]
//! Core types and traits for the vizwave music-visualization engine.
//!
//! Provides the `Visualization` trait, the parameterized `ParticleField` and
//! `ScalarTrack` simulation primitives, `AnimationClock`, `PlaybackController`,
//! the HSL color model (`Rgba`, `hsl_to_rgba`), the `SplitMix64` PRNG, drive
//! sources, the `Frame` snapshot model consumed by renderers, and `Recipe`.

pub mod clock;
pub mod color;
pub mod error;
pub mod field;
pub mod flow;
pub mod frame;
pub mod params;
pub mod particle;
pub mod playback;
pub mod prng;
pub mod recipe;
pub mod scalar;
pub mod surface;
pub mod viz;

pub use clock::AnimationClock;
pub use color::{hsl_to_rgba, wrap_hue, Rgba};
pub use error::EngineError;
pub use field::{
    DriveConfig, EdgeBehavior, Emitter, FieldConfig, Lifetime, ParticleField, Pulse, Range,
    SpawnPolicy, StopBehavior, VelocityModel,
};
pub use frame::{Frame, RenderableParticle, Renderer, TrackSnapshot};
pub use particle::Particle;
pub use playback::{PlaybackController, PlaybackState};
pub use prng::SplitMix64;
pub use recipe::Recipe;
pub use scalar::{ScalarTrack, TrackConfig};
pub use surface::Surface;
pub use viz::Visualization;
