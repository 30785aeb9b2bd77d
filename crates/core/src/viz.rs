//! The core `Visualization` trait that every scene implements.
//!
//! The trait is object-safe so scenes can be used as `dyn Visualization` for
//! runtime switching between visualizations.

use crate::error::EngineError;
use crate::frame::Frame;
use crate::surface::Surface;
use serde_json::Value;

/// Core trait for frame-stepped visualization scenes.
///
/// A scene is driven by an external tick source (render loop, test harness,
/// or headless CLI): once per frame the driver polls the playback flag and
/// surface size and calls [`step`](Visualization::step), then pulls a
/// [`Frame`] snapshot for the renderer. The scene owns all of its state —
/// clock, particle field, scalar tracks, PRNG — and shares nothing with
/// other instances.
pub trait Visualization {
    /// Advance the scene by one frame.
    ///
    /// `active` is the playback flag, polled once per frame. Inactive frames
    /// apply each field's stop behavior and freeze the clock.
    fn step(&mut self, active: bool, surface: Surface) -> Result<(), EngineError>;

    /// Pull-based snapshot of the current renderable state.
    fn frame(&self) -> Frame;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Steps the scene `frames` times with a constant playback flag.
    fn run(&mut self, frames: usize, active: bool, surface: Surface) -> Result<(), EngineError> {
        (0..frames).try_for_each(|_| self.step(active, surface))
    }
}
