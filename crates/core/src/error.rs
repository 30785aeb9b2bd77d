//! Error types for the vizwave core.

use thiserror::Error;

/// Errors produced by engine operations.
///
/// Almost all of these surface at construction time: once a field, track, or
/// scene is built, the per-frame step path cannot fail.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A render surface had a non-positive or non-finite dimension.
    #[error("invalid surface: dimensions must be positive and finite, got {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },

    /// A sampling range was empty, inverted, or non-finite.
    #[error("invalid range for '{name}': [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// A field, track, or clock configuration was internally inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A requested scene name was not recognized by the registry.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Reading or writing a frame dump or recipe file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
