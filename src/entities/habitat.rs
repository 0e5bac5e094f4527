// 🏠 Habitat Entity - one row of the habitat inventory sheet

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habitat {
    /// Habitat type name as written in the sheet (trimmed)
    pub habitat: String,

    pub level: i64,

    /// How many habitats of this kind are built
    pub quantity: i64,

    /// Dragon slots in each one
    pub spaces_per_habitat: i64,
}

impl Habitat {
    pub fn new(habitat: impl Into<String>, level: i64, quantity: i64, spaces_per_habitat: i64) -> Self {
        let habitat: String = habitat.into();

        Habitat {
            habitat: habitat.trim().to_string(),
            level,
            quantity,
            spaces_per_habitat,
        }
    }

    /// quantity × spaces per habitat
    pub fn total_spaces(&self) -> i64 {
        self.quantity.saturating_mul(self.spaces_per_habitat)
    }
}
