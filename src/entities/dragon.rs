// 🐉 Dragon Entity - one row of the dragon sheet
//
// Immutable once parsed. Best habitat and rank are derived on demand
// by the Ranking (see ranking.rs), never stored here.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dragon {
    /// Trimmed, never empty
    pub name: String,

    /// 0 when the sheet leaves it blank
    pub level: i64,

    /// 0 when the sheet leaves it blank
    pub stars: i64,

    /// Element types in sheet order, each trimmed and non-empty
    pub types: Vec<String>,
}

impl Dragon {
    /// Build a dragon, trimming the name and every type and dropping blank types
    pub fn new<I, S>(name: impl Into<String>, level: i64, stars: i64, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name: String = name.into();

        Dragon {
            name: name.trim().to_string(),
            level,
            stars,
            types: types
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

/// `Name (Lv 30, 2*, Legend, Dark)`
impl fmt::Display for Dragon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Lv {}, {}*, {})",
            self.name,
            self.level,
            self.stars,
            self.types.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dragon_trims_and_drops_blank_types() {
        let dragon = Dragon::new("  Kinley  ", 12, 1, ["  Fire ", "", "   ", "Sea"]);

        assert_eq!(dragon.name, "Kinley");
        assert_eq!(dragon.types, vec!["Fire", "Sea"]);
    }

    #[test]
    fn test_dragon_display() {
        let dragon = Dragon::new("Chronos", 30, 2, ["Time", "Legend"]);
        assert_eq!(dragon.to_string(), "Chronos (Lv 30, 2*, Time, Legend)");
    }

    #[test]
    fn test_dragon_display_without_types() {
        let dragon = Dragon::new("Egg", 0, 0, Vec::<String>::new());
        assert_eq!(dragon.to_string(), "Egg (Lv 0, 0*, )");
    }
}
