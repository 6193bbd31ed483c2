//! Doors domain: tests for door transitions and the delayed close recheck.

use std::time::Duration;

use bevy::prelude::*;

use super::{CloseCheck, Door, DoorState, ProximitySensor};

fn closed_door() -> Door {
    Door::new(false, Duration::from_secs_f32(0.35))
}

fn sensor_for_tests() -> ProximitySensor {
    let door_entity = World::new().spawn_empty().id();
    ProximitySensor::new(door_entity, Vec2::splat(24.0))
}

// -----------------------------------------------------------------------------
// Door state transitions
// -----------------------------------------------------------------------------

#[test]
fn test_door_starts_in_configured_state() {
    assert_eq!(closed_door().state(), DoorState::Closed);
    assert_eq!(Door::new(true, Duration::ZERO).state(), DoorState::Open);
}

#[test]
fn test_door_open_and_close() {
    let mut door = closed_door();
    assert!(door.open());
    assert!(door.is_open());
    assert!(!door.is_solid());

    assert!(door.close());
    assert_eq!(door.state(), DoorState::Closed);
    assert!(door.is_solid());
}

#[test]
fn test_lock_forces_closed_and_is_idempotent() {
    let mut door = closed_door();
    door.open();

    assert!(door.lock());
    assert_eq!(door.state(), DoorState::Locked);
    assert!(door.is_solid());

    assert!(!door.lock());
    assert_eq!(door.state(), DoorState::Locked);
}

#[test]
fn test_locked_door_never_opens_directly() {
    let mut door = closed_door();
    door.lock();

    assert!(!door.open());
    assert_eq!(door.state(), DoorState::Locked);
    assert!(!door.close());
    assert_eq!(door.state(), DoorState::Locked);
}

#[test]
fn test_unlock_does_not_auto_open() {
    let mut door = closed_door();
    door.lock();

    assert!(door.unlock());
    assert_eq!(door.state(), DoorState::Closed);

    assert!(door.open());
    assert_eq!(door.state(), DoorState::Open);
}

#[test]
fn test_unlock_on_unlocked_door_is_noop() {
    let mut door = closed_door();
    door.open();
    assert!(!door.unlock());
    assert_eq!(door.state(), DoorState::Open);
}

// -----------------------------------------------------------------------------
// Proximity sensor
// -----------------------------------------------------------------------------

#[test]
fn test_sensor_opens_on_enter_and_closes_after_delay() {
    let mut door = closed_door();
    let mut sensor = sensor_for_tests();

    sensor.on_player_enter(&mut door);
    assert!(door.is_open());
    assert!(sensor.player_inside());

    sensor.on_player_exit(&door);
    assert!(sensor.close_pending());

    let check = sensor.tick(Duration::from_secs_f32(0.1), &mut door, || false);
    assert_eq!(check, CloseCheck::Waiting);
    assert!(door.is_open());

    let check = sensor.tick(Duration::from_secs_f32(0.5), &mut door, || false);
    assert_eq!(check, CloseCheck::Closed);
    assert_eq!(door.state(), DoorState::Closed);
    assert_eq!(
        sensor.tick(Duration::from_secs_f32(1.0), &mut door, || false),
        CloseCheck::Idle
    );
}

#[test]
fn test_sensor_close_aborts_when_door_locked_meanwhile() {
    let mut door = closed_door();
    let mut sensor = sensor_for_tests();

    sensor.on_player_enter(&mut door);
    sensor.on_player_exit(&door);
    door.lock();

    let check = sensor.tick(Duration::from_secs_f32(1.0), &mut door, || false);
    assert_eq!(check, CloseCheck::AbortedLocked);
    assert_eq!(door.state(), DoorState::Locked);
}

#[test]
fn test_sensor_close_aborts_when_threshold_still_occupied() {
    let mut door = closed_door();
    let mut sensor = sensor_for_tests();

    sensor.on_player_enter(&mut door);
    sensor.on_player_exit(&door);

    let check = sensor.tick(Duration::from_secs_f32(1.0), &mut door, || true);
    assert_eq!(check, CloseCheck::AbortedOccupied);
    assert!(door.is_open());
}

#[test]
fn test_sensor_reentry_cancels_pending_close() {
    let mut door = closed_door();
    let mut sensor = sensor_for_tests();

    sensor.on_player_enter(&mut door);
    sensor.on_player_exit(&door);
    sensor.tick(Duration::from_secs_f32(0.2), &mut door, || false);
    sensor.on_player_enter(&mut door);

    assert!(!sensor.close_pending());
    let check = sensor.tick(Duration::from_secs_f32(1.0), &mut door, || false);
    assert_eq!(check, CloseCheck::Idle);
    assert!(door.is_open());
}

#[test]
fn test_sensor_cannot_open_locked_door() {
    let mut door = closed_door();
    let mut sensor = sensor_for_tests();
    door.lock();

    sensor.on_player_enter(&mut door);
    assert_eq!(door.state(), DoorState::Locked);
}
