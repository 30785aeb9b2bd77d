//! A single transient simulated entity.

use glam::DVec2;

/// One particle (bubble, bolt, blob — structurally identical), owned by
/// exactly one [`ParticleField`](crate::field::ParticleField).
///
/// Everything except position, velocity, age, and (optionally drifting) hue
/// is fixed at spawn time. `max_life` is `f64::INFINITY` for persistent
/// entities that only leave the field when it is cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Steps lived so far; incremented once per active frame.
    pub age: f64,
    /// Age at which the particle is reaped (inclusive bound).
    pub max_life: f64,
    /// Hue in degrees, kept in [0, 360).
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    /// Base radius before any pulse modulation.
    pub size: f64,
    /// Per-particle pulse phase offset in radians.
    pub phase: f64,
}

impl Particle {
    /// True once the particle has reached its maximum lifetime.
    pub fn expired(&self) -> bool {
        self.age >= self.max_life
    }

    /// Remaining-life alpha in [0, 1]: full at spawn, zero at reap time.
    ///
    /// Persistent particles (`max_life == INFINITY`) never fade.
    pub fn fade(&self) -> f64 {
        (1.0 - self.age / self.max_life).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(age: f64, max_life: f64) -> Particle {
        Particle {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            age,
            max_life,
            hue: 200.0,
            saturation: 1.0,
            lightness: 0.6,
            size: 3.0,
            phase: 0.0,
        }
    }

    #[test]
    fn fresh_particle_is_not_expired() {
        assert!(!particle(0.0, 100.0).expired());
    }

    #[test]
    fn expiry_bound_is_inclusive() {
        assert!(!particle(99.0, 100.0).expired());
        assert!(particle(100.0, 100.0).expired());
        assert!(particle(101.0, 100.0).expired());
    }

    #[test]
    fn fade_is_full_at_spawn_and_zero_at_reap() {
        assert_eq!(particle(0.0, 100.0).fade(), 1.0);
        assert_eq!(particle(100.0, 100.0).fade(), 0.0);
        assert!((particle(25.0, 100.0).fade() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn fade_clamps_past_expiry() {
        assert_eq!(particle(250.0, 100.0).fade(), 0.0);
    }

    #[test]
    fn persistent_particle_never_expires_or_fades() {
        let p = particle(1e9, f64::INFINITY);
        assert!(!p.expired());
        assert_eq!(p.fade(), 1.0);
    }
}
