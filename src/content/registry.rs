//! RoomCatalog resource providing ordered room definitions with lookup by id.

use bevy::prelude::*;

use super::data::RoomDef;

/// Every room loaded for this run, in file order.
#[derive(Resource, Debug, Default)]
pub struct RoomCatalog {
    rooms: Vec<RoomDef>,
}

impl RoomCatalog {
    /// Later definitions with a duplicate id replace earlier ones
    pub fn from_defs(defs: Vec<RoomDef>) -> Self {
        let mut catalog = Self::default();
        for def in defs {
            catalog.insert(def);
        }
        catalog
    }

    pub fn insert(&mut self, def: RoomDef) {
        match self.rooms.iter_mut().find(|existing| existing.id == def.id) {
            Some(existing) => {
                warn!("[CONTENT] Duplicate room id '{}', keeping the last", def.id);
                *existing = def;
            }
            None => self.rooms.push(def),
        }
    }

    pub fn get(&self, id: &str) -> Option<&RoomDef> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomDef> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let activities: usize = self.rooms.iter().map(|room| room.activities.len()).sum();
        let doors: usize = self.rooms.iter().map(|room| room.doors.len()).sum();
        format!(
            "RoomCatalog loaded:\n\
             - Rooms: {}\n\
             - Activities: {}\n\
             - Doors: {}",
            self.rooms.len(),
            activities,
            doors,
        )
    }
}
