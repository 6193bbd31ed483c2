//! Combat domain: unit tests for health and identity.

use super::Health;

#[test]
fn test_health_damage_until_dead() {
    let mut health = Health::new(3.0);
    assert!(health.is_alive());
    assert!(!health.is_player);

    assert_eq!(health.take_damage(2.0), 2.0);
    assert!(health.is_alive());

    assert_eq!(health.take_damage(5.0), 1.0);
    assert!(!health.is_alive());
    assert_eq!(health.percent(), 0.0);
}

#[test]
fn test_health_heal_is_capped() {
    let mut health = Health::new(6.0);
    health.take_damage(4.0);
    assert_eq!(health.heal(10.0), 4.0);
    assert_eq!(health.current, 6.0);
}

#[test]
fn test_player_health_carries_identity_marker() {
    let health = Health::player(6.0);
    assert!(health.is_player);
    assert!(health.is_alive());
}
