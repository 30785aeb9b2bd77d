//! Pull-based frame snapshot model and the renderer seam.
//!
//! A [`Frame`] is everything a renderer needs to draw one frame of a scene:
//! the clock phase, the playing flag (for idle glyphs), the projected
//! particles, and the scalar track banks. The engine never reads anything
//! back from the renderer.

use crate::color::Rgba;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// One particle as the renderer sees it: position, final radius, final color.
///
/// Alpha already encodes the remaining-life fade; radius already includes any
/// pulse modulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderableParticle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgba,
}

/// A named scalar bank (equalizer bars, waveform samples, charge level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub name: String,
    pub values: Vec<f64>,
}

impl TrackSnapshot {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Renderable state of one scene at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub clock: f64,
    pub playing: bool,
    pub particles: Vec<RenderableParticle>,
    pub tracks: Vec<TrackSnapshot>,
}

impl Frame {
    /// An empty idle frame at clock 0.
    pub fn idle() -> Self {
        Self {
            clock: 0.0,
            playing: false,
            particles: Vec::new(),
            tracks: Vec::new(),
        }
    }

    /// Looks up a track bank by name.
    pub fn track(&self, name: &str) -> Option<&TrackSnapshot> {
        self.tracks.iter().find(|t| t.name == name)
    }
}

/// External drawing collaborator.
///
/// Implementations issue primitive draw calls (circles, paths, rects,
/// gradients) against a 2D surface; the engine only hands them data and never
/// depends on the backend.
pub trait Renderer {
    fn render(&mut self, surface: Surface, frame: &Frame);
}
