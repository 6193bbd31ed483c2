//! Debug domain: debug mode state.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the room status overlay is shown
    pub show_overlay: bool,
    /// Message shown in the overlay, with seconds left
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    pub fn tick_message(&mut self, delta_secs: f32) {
        if let Some((_, ref mut duration)) = self.status_message {
            *duration -= delta_secs;
            if *duration <= 0.0 {
                self.status_message = None;
            }
        }
    }
}
