//! Play/pause state machine.
//!
//! The controller is deliberately tiny: two states, no error paths. Stop-side
//! effects (clearing a field, freezing velocities) belong to the field
//! configurations and are applied on the first inactive step.

use serde::{Deserialize, Serialize};

/// Playback state of a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// External play/pause toggle polled once per frame by the driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackController {
    state: PlaybackState,
}

impl PlaybackController {
    /// Creates a controller in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// Flips between `Idle` and `Playing`.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            PlaybackState::Idle => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Idle,
        };
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let ctl = PlaybackController::new();
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert!(!ctl.is_playing());
    }

    #[test]
    fn play_enters_playing() {
        let mut ctl = PlaybackController::new();
        ctl.play();
        assert!(ctl.is_playing());
    }

    #[test]
    fn pause_returns_to_idle() {
        let mut ctl = PlaybackController::new();
        ctl.play();
        ctl.pause();
        assert_eq!(ctl.state(), PlaybackState::Idle);
    }

    #[test]
    fn play_and_pause_are_idempotent() {
        let mut ctl = PlaybackController::new();
        ctl.play();
        ctl.play();
        assert!(ctl.is_playing());
        ctl.pause();
        ctl.pause();
        assert!(!ctl.is_playing());
    }

    #[test]
    fn toggle_alternates_states() {
        let mut ctl = PlaybackController::new();
        ctl.toggle();
        assert!(ctl.is_playing());
        ctl.toggle();
        assert!(!ctl.is_playing());
    }

    #[test]
    fn state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PlaybackState::Playing).unwrap(),
            "\"playing\""
        );
        assert_eq!(
            serde_json::to_string(&PlaybackState::Idle).unwrap(),
            "\"idle\""
        );
    }
}
