//! Read-only view of the world handed to the narrative backend

use serde::{Deserialize, Serialize};

use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::{Attributes, Genre};

/// An owned copy of the world state at one instant.
///
/// Every field, nested ones included, is owned by the snapshot. Changing a
/// snapshot never reaches back into the `WorldState` it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub genre: Genre,
    pub health: u32,
    pub attributes: Attributes,
    pub money: u32,
    pub currency_name: String,
    pub inventory: Vec<String>,
    pub transcript: String,
    pub location: String,
    pub character: CharacterSheet,
}

impl WorldSnapshot {
    /// Inventory as a comma-joined list, or "empty"
    pub fn inventory_display(&self) -> String {
        if self.inventory.is_empty() {
            "empty".to_string()
        } else {
            self.inventory.join(", ")
        }
    }
}
