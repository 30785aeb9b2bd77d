#![deny(unsafe_code)]
//! Scene registry: maps scene names to implementations.
//!
//! This crate sits between `vizwave-core` (which defines the `Visualization`
//! trait) and the individual scene crates. The CLI depends on this crate so
//! name-based dispatch lives in exactly one place.

pub mod record;

use serde_json::Value;
use vizwave_core::error::EngineError;
use vizwave_core::frame::Frame;
use vizwave_core::surface::Surface;
use vizwave_core::Visualization;

/// All available scene names.
const SCENE_NAMES: &[&str] = &["alchemy", "bars-and-waves", "battery", "musical-colors"];

/// Enumeration of all available visualization scenes.
///
/// Wraps each scene implementation and delegates `Visualization` trait
/// methods. Use [`SceneKind::from_name`] for string-based construction.
pub enum SceneKind {
    /// Radial particle bursts from the surface center.
    Alchemy(vizwave_alchemy::Alchemy),
    /// Equalizer bars plus waveform tracks.
    BarsWaves(vizwave_bars_waves::BarsWaves),
    /// Rising energy bolts feeding a charge meter.
    Battery(vizwave_battery::Battery),
    /// Persistent drifting color blobs with a central equalizer.
    MusicalColors(vizwave_colors::MusicalColors),
}

impl SceneKind {
    /// Constructs a scene by name.
    ///
    /// Returns `EngineError::UnknownScene` if the name is not recognized.
    pub fn from_name(name: &str, seed: u64, params: &Value) -> Result<Self, EngineError> {
        match name {
            "alchemy" => Ok(SceneKind::Alchemy(vizwave_alchemy::Alchemy::from_json(
                seed, params,
            )?)),
            "bars-and-waves" => Ok(SceneKind::BarsWaves(
                vizwave_bars_waves::BarsWaves::from_json(seed, params)?,
            )),
            "battery" => Ok(SceneKind::Battery(vizwave_battery::Battery::from_json(
                seed, params,
            )?)),
            "musical-colors" => Ok(SceneKind::MusicalColors(
                vizwave_colors::MusicalColors::from_json(seed, params)?,
            )),
            _ => Err(EngineError::UnknownScene(name.to_string())),
        }
    }

    /// Returns a slice of all recognized scene names.
    pub fn list_scenes() -> &'static [&'static str] {
        SCENE_NAMES
    }
}

impl Visualization for SceneKind {
    fn step(&mut self, active: bool, surface: Surface) -> Result<(), EngineError> {
        match self {
            SceneKind::Alchemy(s) => s.step(active, surface),
            SceneKind::BarsWaves(s) => s.step(active, surface),
            SceneKind::Battery(s) => s.step(active, surface),
            SceneKind::MusicalColors(s) => s.step(active, surface),
        }
    }

    fn frame(&self) -> Frame {
        match self {
            SceneKind::Alchemy(s) => s.frame(),
            SceneKind::BarsWaves(s) => s.frame(),
            SceneKind::Battery(s) => s.frame(),
            SceneKind::MusicalColors(s) => s.frame(),
        }
    }

    fn params(&self) -> Value {
        match self {
            SceneKind::Alchemy(s) => s.params(),
            SceneKind::BarsWaves(s) => s.params(),
            SceneKind::Battery(s) => s.params(),
            SceneKind::MusicalColors(s) => s.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            SceneKind::Alchemy(s) => s.param_schema(),
            SceneKind::BarsWaves(s) => s.param_schema(),
            SceneKind::Battery(s) => s.param_schema(),
            SceneKind::MusicalColors(s) => s.param_schema(),
        }
    }
}
