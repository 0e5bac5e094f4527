// 🏆 Habitat Ranking - Rank Table, Alias Table and Best-Type Resolver
//
// Ranking is configuration as data: built once (built-in defaults or a JSON
// file), validated, then shared by reference with both reports.

use crate::entities::Dragon;
use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Sort key for dragons whose types match no ranked habitat
pub const UNRANKED: u32 = u32::MAX;

const DEFAULT_RANKING: [(&str, u32); 20] = [
    ("Legend", 1),
    ("Soul", 2),
    ("Pure", 3),
    ("Primal", 4),
    ("Dream", 5),
    ("War", 6),
    ("Happiness", 7),
    ("Beauty", 8),
    ("Wind", 9),
    ("Chaos", 10),
    ("Magic", 11),
    ("Light", 12),
    ("Dark", 13),
    ("Metal", 14),
    ("Ice", 15),
    ("Electric", 16),
    ("Nature", 17),
    ("Sea", 18),
    ("Flame", 19),
    ("Terra", 20),
];

const DEFAULT_ALIASES: [(&str, &str); 1] = [("time", "legend")];

/// Habitats that never contribute spaces to placement
const DEFAULT_EXCLUDED: [&str; 2] = ["Divine", "Rainbow"];

// ============================================================================
// CONFIG (serde)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    /// Canonical habitat type name (e.g., "Legend")
    pub name: String,

    /// 1 = most preferred
    pub rank: u32,
}

impl RankEntry {
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        RankEntry {
            name: name.into(),
            rank,
        }
    }
}

/// Raw ranking configuration as read from JSON. Missing fields take the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub habitats: Vec<RankEntry>,

    /// alternate type name -> habitat type it counts as
    pub aliases: BTreeMap<String, String>,

    pub excluded_habitats: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            habitats: DEFAULT_RANKING
                .iter()
                .map(|(name, rank)| RankEntry::new(*name, *rank))
                .collect(),
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            excluded_habitats: DEFAULT_EXCLUDED.iter().map(|h| h.to_string()).collect(),
        }
    }
}

// ============================================================================
// RANK TABLE
// ============================================================================

/// Ordered habitat type -> rank mapping with case-insensitive lookup
#[derive(Debug, Clone)]
pub struct RankTable {
    /// Sorted by rank ascending (ties keep config order)
    entries: Vec<RankEntry>,

    /// lowercase name -> index into entries
    by_lower: HashMap<String, usize>,
}

impl RankTable {
    pub fn new(entries: Vec<RankEntry>) -> Result<Self> {
        let mut entries: Vec<RankEntry> = entries
            .into_iter()
            .map(|e| RankEntry::new(e.name.trim(), e.rank))
            .collect();
        entries.sort_by_key(|e| e.rank);

        let mut by_lower = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(PlannerError::InvalidRanking(
                    "habitat type name must not be empty".to_string(),
                ));
            }
            if by_lower.insert(entry.name.to_lowercase(), idx).is_some() {
                return Err(PlannerError::InvalidRanking(format!(
                    "habitat type '{}' is listed more than once",
                    entry.name
                )));
            }
        }

        Ok(RankTable { entries, by_lower })
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&RankEntry> {
        self.by_lower
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    /// Entries in rank order
    pub fn iter(&self) -> impl Iterator<Item = &RankEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// ALIAS TABLE
// ============================================================================

/// lowercase alternate name -> lowercase habitat type
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new<I, K, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        AliasTable {
            aliases: aliases
                .into_iter()
                .map(|(k, v)| {
                    (
                        k.as_ref().trim().to_lowercase(),
                        v.as_ref().trim().to_lowercase(),
                    )
                })
                .collect(),
        }
    }

    /// Substitute an already-lowercased type name, or return it unchanged
    pub fn resolve<'a>(&'a self, lowered: &'a str) -> &'a str {
        self.aliases.get(lowered).map(String::as_str).unwrap_or(lowered)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// RANKING (table + aliases + exclusions)
// ============================================================================

/// Best habitat resolved for a dragon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestHabitat<'a> {
    /// Canonical name from the Rank Table
    pub habitat: &'a str,
    pub rank: u32,
}

#[derive(Debug, Clone)]
pub struct Ranking {
    table: RankTable,
    aliases: AliasTable,
    excluded: Vec<String>,
}

impl Ranking {
    /// Built-in table (Legend first ... Terra last, "Time" counts as Legend)
    pub fn with_defaults() -> Self {
        // Defaults are unique and non-empty, so validation cannot fail
        Self::from_config(RankingConfig::default())
            .unwrap_or_else(|e| unreachable!("built-in ranking is invalid: {e}"))
    }

    /// Validate a config into an immutable ranking
    pub fn from_config(config: RankingConfig) -> Result<Self> {
        let table = RankTable::new(config.habitats)?;
        let aliases = AliasTable::new(config.aliases);

        for (from, to) in aliases.iter() {
            if table.get(to).is_none() {
                warn!(alias = from, habitat = to, "alias points at an unranked habitat, ignoring");
            }
        }

        let excluded = config
            .excluded_habitats
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(Ranking {
            table,
            aliases,
            excluded,
        })
    }

    /// Load ranking config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PlannerError::from_open(path, e))?;
        let config: RankingConfig = serde_json::from_str(&content)?;
        Self::from_config(config)
    }

    pub fn table(&self) -> &RankTable {
        &self.table
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Exact-name match against the excluded habitat list
    pub fn is_excluded(&self, habitat: &str) -> bool {
        self.excluded.iter().any(|h| h == habitat)
    }

    /// Rank of a single type name after alias substitution
    pub fn rank_of(&self, type_name: &str) -> Option<&RankEntry> {
        let lowered = type_name.trim().to_lowercase();
        self.table.get(self.aliases.resolve(&lowered))
    }

    /// Highest-priority habitat among the dragon's types.
    ///
    /// Lowest rank wins; on equal ranks the first type in sheet order wins.
    /// `None` when no type (after aliasing) is in the Rank Table.
    pub fn best_habitat(&self, dragon: &Dragon) -> Option<BestHabitat<'_>> {
        let mut best: Option<BestHabitat<'_>> = None;

        for type_name in &dragon.types {
            let Some(entry) = self.rank_of(type_name) else {
                continue;
            };

            if best.map_or(true, |b| entry.rank < b.rank) {
                best = Some(BestHabitat {
                    habitat: &entry.name,
                    rank: entry.rank,
                });
            }
        }

        best
    }

    /// Rank for sorting; unranked dragons sort last
    pub fn sort_key(&self, dragon: &Dragon) -> u32 {
        self.best_habitat(dragon).map_or(UNRANKED, |b| b.rank)
    }
}

impl Default for Ranking {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================
