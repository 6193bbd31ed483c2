//! Doors domain: door state and proximity sensor state machines.

use std::time::Duration;

use bevy::prelude::*;
use serde::Serialize;

/// Observable door state. A locked door is always closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DoorState {
    Open,
    #[default]
    Closed,
    Locked,
}

/// A door leaf. Its gate may lock/unlock it; proximity sensors may only open/close it.
#[derive(Component, Debug, Clone)]
pub struct Door {
    state: DoorState,
    close_delay: Duration,
}

impl Default for Door {
    fn default() -> Self {
        Self::new(false, Duration::from_secs_f32(0.35))
    }
}

impl Door {
    pub fn new(start_open: bool, close_delay: Duration) -> Self {
        Self {
            state: if start_open {
                DoorState::Open
            } else {
                DoorState::Closed
            },
            close_delay,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == DoorState::Locked
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    /// Whether the blocking collider should be active
    pub fn is_solid(&self) -> bool {
        !self.is_open()
    }

    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    /// Close and lock. Idempotent.
    pub fn lock(&mut self) -> bool {
        let changed = self.state != DoorState::Locked;
        self.state = DoorState::Locked;
        changed
    }

    /// Clear the lock, leaving the door closed. Never opens it.
    pub fn unlock(&mut self) -> bool {
        if self.state != DoorState::Locked {
            return false;
        }
        self.state = DoorState::Closed;
        true
    }

    /// No-op while locked.
    pub fn open(&mut self) -> bool {
        if self.state != DoorState::Closed {
            return false;
        }
        self.state = DoorState::Open;
        true
    }

    /// No-op while locked (already closed).
    pub fn close(&mut self) -> bool {
        if self.state != DoorState::Open {
            return false;
        }
        self.state = DoorState::Closed;
        true
    }
}

/// Result of advancing a sensor's pending close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseCheck {
    /// No close is pending
    Idle,
    /// Close delay still running
    Waiting,
    /// Delay elapsed and the door was closed
    Closed,
    /// Delay elapsed but the gate locked the door meanwhile
    AbortedLocked,
    /// Delay elapsed but the player is back inside or still on the threshold
    AbortedOccupied,
}

/// Opens its door while the player is near and closes it after the door's
/// close delay once the player has left.
#[derive(Component, Debug)]
pub struct ProximitySensor {
    pub door: Entity,
    /// Extra box around the threshold that keeps the door from closing
    pub threshold_size: Vec2,
    player_inside: bool,
    pending_close: Option<Timer>,
}

impl ProximitySensor {
    pub fn new(door: Entity, threshold_size: Vec2) -> Self {
        Self {
            door,
            threshold_size,
            player_inside: false,
            pending_close: None,
        }
    }

    pub fn player_inside(&self) -> bool {
        self.player_inside
    }

    pub fn close_pending(&self) -> bool {
        self.pending_close.is_some()
    }

    pub fn on_player_enter(&mut self, door: &mut Door) {
        self.player_inside = true;
        self.pending_close = None;
        door.open();
    }

    pub fn on_player_exit(&mut self, door: &Door) {
        self.player_inside = false;
        self.pending_close = Some(Timer::new(door.close_delay(), TimerMode::Once));
    }

    /// Advance the pending close. `threshold_occupied` is only consulted once
    /// the delay has elapsed; the recheck is best-effort, not atomic.
    pub fn tick(
        &mut self,
        delta: Duration,
        door: &mut Door,
        threshold_occupied: impl FnOnce() -> bool,
    ) -> CloseCheck {
        let Some(timer) = self.pending_close.as_mut() else {
            return CloseCheck::Idle;
        };

        timer.tick(delta);
        if timer.remaining_secs() > 0.0 {
            return CloseCheck::Waiting;
        }
        self.pending_close = None;

        if door.is_locked() {
            return CloseCheck::AbortedLocked;
        }
        if self.player_inside || threshold_occupied() {
            return CloseCheck::AbortedOccupied;
        }

        door.close();
        CloseCheck::Closed
    }
}
