//! Pressure-plate puzzle: every plate must be held down at once.

use std::collections::HashSet;

use bevy::prelude::*;

use super::types::{ActivityConfigError, ActivityState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateVerdict {
    NoChange,
    Solved,
    /// Some plate is up while the puzzle is unsolved
    Relock,
}

#[derive(Debug, Clone, Default)]
pub struct PlateOccupancy {
    occupants: HashSet<Entity>,
}

impl PlateOccupancy {
    pub fn is_pressed(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.occupants.contains(&entity)
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }
}

#[derive(Debug, Clone)]
pub struct PlatePuzzle {
    plates: Vec<PlateOccupancy>,
    relock_while_unpressed: bool,
    evaluate_on_tick: bool,
    pub(crate) state: ActivityState,
}

impl PlatePuzzle {
    pub fn new(
        plate_count: usize,
        relock_while_unpressed: bool,
    ) -> Result<Self, ActivityConfigError> {
        if plate_count == 0 {
            return Err(ActivityConfigError::NoPlates);
        }
        Ok(Self {
            plates: vec![PlateOccupancy::default(); plate_count],
            relock_while_unpressed,
            evaluate_on_tick: false,
            state: ActivityState::default(),
        })
    }

    pub fn plates(&self) -> &[PlateOccupancy] {
        &self.plates
    }

    pub fn pressed_count(&self) -> usize {
        self.plates.iter().filter(|plate| plate.is_pressed()).count()
    }

    pub fn all_pressed(&self) -> bool {
        self.plates.iter().all(PlateOccupancy::is_pressed)
    }

    /// Blocks may already rest on plates, so the first tick after start evaluates
    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.evaluate_on_tick = true;
        true
    }

    pub fn tick(&mut self) -> PlateVerdict {
        if !std::mem::take(&mut self.evaluate_on_tick) {
            return PlateVerdict::NoChange;
        }
        self.evaluate()
    }

    /// Occupancy is tracked in every lifecycle state; verdicts only while running
    pub fn on_enter(&mut self, plate: usize, entity: Entity) -> PlateVerdict {
        let Some(occupancy) = self.plates.get_mut(plate) else {
            return PlateVerdict::NoChange;
        };
        if !occupancy.occupants.insert(entity) {
            return PlateVerdict::NoChange;
        }
        self.evaluate()
    }

    pub fn on_exit(&mut self, plate: usize, entity: Entity) -> PlateVerdict {
        let Some(occupancy) = self.plates.get_mut(plate) else {
            return PlateVerdict::NoChange;
        };
        if !occupancy.occupants.remove(&entity) {
            return PlateVerdict::NoChange;
        }
        self.evaluate()
    }

    fn evaluate(&mut self) -> PlateVerdict {
        if !self.state.is_running() {
            return PlateVerdict::NoChange;
        }
        if self.all_pressed() {
            self.state.complete();
            info!("[PLATES] All {} plates pressed", self.plates.len());
            return PlateVerdict::Solved;
        }
        if self.relock_while_unpressed {
            return PlateVerdict::Relock;
        }
        PlateVerdict::NoChange
    }
}
