//! Render surface dimensions, supplied by the host every frame.
//!
//! The engine never owns a drawing backend; it only needs the surface's pixel
//! size for spawn positions (center, bottom edge), edge bouncing, and the
//! renderer's own layout math.

use crate::error::EngineError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the 2D surface a scene is simulated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    width: f64,
    height: f64,
}

impl Surface {
    /// Creates a surface, validating that both dimensions are positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngineError::InvalidSurface { width, height });
        }
        Ok(Self { width, height })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The center point of the surface.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamps a point into the surface rectangle.
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        DVec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}
