// 🏠 Placement Report - "How your dragons should be placed into habitats"
//
// Each dragon only competes for its best habitat type. Strongest dragons
// take the spaces first; the rest overflow. Dragons with no ranked type
// are unplaced.

use super::write_text;
use crate::entities::{Dragon, Habitat};
use crate::error::Result;
use crate::ranking::Ranking;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

pub const PLACEMENT_TITLE: &str = "How your dragons should be placed into habitats";

// ============================================================================
// CAPACITY
// ============================================================================

/// Total spaces per habitat type (quantity × spaces, summed over rows).
/// Excluded habitats (Divine, Rainbow by default) contribute nothing.
pub fn total_spaces_by_habitat(habitats: &[Habitat], ranking: &Ranking) -> BTreeMap<String, i64> {
    let mut combined: BTreeMap<String, i64> = BTreeMap::new();

    for habitat in habitats {
        if ranking.is_excluded(&habitat.habitat) {
            debug!(habitat = %habitat.habitat, "excluded from capacity");
            continue;
        }

        let spaces = combined.entry(habitat.habitat.clone()).or_insert(0);
        *spaces = spaces.saturating_add(habitat.total_spaces());
    }

    combined
}

// ============================================================================
// STRENGTH ORDER
// ============================================================================

/// Level desc, then stars desc, then name asc (case-insensitive)
pub fn strength_order(a: &Dragon, b: &Dragon) -> Ordering {
    b.level
        .cmp(&a.level)
        .then_with(|| b.stars.cmp(&a.stars))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

// ============================================================================
// PLAN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitatAllocation<'a> {
    /// Canonical habitat type
    pub habitat: &'a str,

    /// Aggregated spaces (may be zero or negative)
    pub spaces: i64,

    /// Strongest first, at most `spaces` of them
    pub placed: Vec<&'a Dragon>,

    /// Did not fit, still strongest first
    pub overflow: Vec<&'a Dragon>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan<'a> {
    /// Number of dragons in the sheet
    pub total: usize,

    /// Rank Table order; types with no dragons and no spaces are left out
    pub allocations: Vec<HabitatAllocation<'a>>,

    /// Dragons with no ranked type, sheet order
    pub unplaced: Vec<&'a Dragon>,
}

impl PlacementPlan<'_> {
    pub fn total_placed(&self) -> usize {
        self.allocations.iter().map(|a| a.placed.len()).sum()
    }

    /// Overflow across all habitats plus unplaced dragons
    pub fn total_not_placed(&self) -> usize {
        self.allocations.iter().map(|a| a.overflow.len()).sum::<usize>() + self.unplaced.len()
    }
}

pub fn plan_placement<'a>(
    dragons: &'a [Dragon],
    habitats: &[Habitat],
    ranking: &'a Ranking,
) -> PlacementPlan<'a> {
    let capacity = total_spaces_by_habitat(habitats, ranking);

    let mut buckets: HashMap<&str, Vec<&Dragon>> = HashMap::new();
    let mut unplaced = Vec::new();

    for dragon in dragons {
        match ranking.best_habitat(dragon) {
            Some(best) => buckets.entry(best.habitat).or_default().push(dragon),
            None => unplaced.push(dragon),
        }
    }

    let mut allocations = Vec::new();

    for entry in ranking.table().iter() {
        let spaces = capacity.get(&entry.name).copied().unwrap_or(0);
        let mut candidates = buckets.remove(entry.name.as_str()).unwrap_or_default();

        if candidates.is_empty() && spaces == 0 {
            continue;
        }

        candidates.sort_by(|a, b| strength_order(a, b));

        // Zero or negative spaces place nobody
        let fit = usize::try_from(spaces).unwrap_or(0).min(candidates.len());
        let overflow = candidates.split_off(fit);

        allocations.push(HabitatAllocation {
            habitat: &entry.name,
            spaces,
            placed: candidates,
            overflow,
        });
    }

    PlacementPlan {
        total: dragons.len(),
        allocations,
        unplaced,
    }
}

// ============================================================================
// RENDER
// ============================================================================

impl fmt::Display for PlacementPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", PLACEMENT_TITLE)?;
        writeln!(f, "Total dragons: {}", self.total)?;
        writeln!(f)?;

        for allocation in &self.allocations {
            writeln!(f)?;
            writeln!(f, "{} (available spaces: {})", allocation.habitat, allocation.spaces)?;
            for dragon in &allocation.placed {
                writeln!(f, "  {}", dragon)?;
            }

            if !allocation.overflow.is_empty() {
                writeln!(f)?;
                writeln!(f, "Overflow ({} dragons didn't fit):", allocation.overflow.len())?;
                for dragon in &allocation.overflow {
                    writeln!(f, "    {}", dragon)?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Total dragons placed: {}", self.total_placed())?;
        writeln!(f, "Total dragons not placed: {}", self.total_not_placed())?;

        if !self.unplaced.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unplaced Dragons (no matching habitat):")?;
            for dragon in &self.unplaced {
                writeln!(f, "  {}", dragon)?;
            }
        }

        Ok(())
    }
}

pub fn render_placement_report(dragons: &[Dragon], habitats: &[Habitat], ranking: &Ranking) -> String {
    plan_placement(dragons, habitats, ranking).to_string()
}

/// Write the placement report to `path` and print a completion notice
pub fn write_placement_report(
    path: &Path,
    dragons: &[Dragon],
    habitats: &[Habitat],
    ranking: &Ranking,
) -> Result<()> {
    let plan = plan_placement(dragons, habitats, ranking);
    write_text(path, &plan.to_string())?;

    info!(
        placed = plan.total_placed(),
        not_placed = plan.total_not_placed(),
        unplaced = plan.unplaced.len(),
        "placement report written"
    );
    println!("Dragons organized and saved to {}", path.display());

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names<'a>(dragons: &[&'a Dragon]) -> Vec<&'a str> {
        dragons.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_capacity_sums_same_habitat() {
        let ranking = Ranking::with_defaults();
        let habitats = vec![Habitat::new("Flame", 10, 2, 4), Habitat::new("Flame", 3, 1, 1)];

        let capacity = total_spaces_by_habitat(&habitats, &ranking);
        assert_eq!(capacity.get("Flame"), Some(&9));
    }

    #[test]
    fn test_capacity_skips_excluded() {
        let ranking = Ranking::with_defaults();
        let habitats = vec![
            Habitat::new("Divine", 1, 5, 10),
            Habitat::new("Rainbow", 1, 2, 3),
            Habitat::new("Sea", 1, 1, 2),
        ];

        let capacity = total_spaces_by_habitat(&habitats, &ranking);
        assert_eq!(capacity.get("Divine"), None);
        assert_eq!(capacity.get("Rainbow"), None);
        assert_eq!(capacity.get("Sea"), Some(&2));
    }

    #[test]
    fn test_strength_order() {
        let a = Dragon::new("alpha", 10, 1, ["Sea"]);
        let b = Dragon::new("Beta", 10, 1, ["Sea"]);
        let c = Dragon::new("gamma", 10, 2, ["Sea"]);
        let d = Dragon::new("delta", 12, 0, ["Sea"]);

        let mut dragons = vec![&a, &b, &c, &d];
        dragons.sort_by(|x, y| strength_order(x, y));

        assert_eq!(names(&dragons), vec!["delta", "gamma", "alpha", "Beta"]);
        assert_eq!(strength_order(&a, &b), Ordering::Less);
        assert_eq!(strength_order(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_negative_level_sorts_below_zero() {
        let egg = Dragon::new("Egg", 0, 0, ["Sea"]);
        let odd = Dragon::new("Odd", -1, 5, ["Sea"]);

        assert_eq!(strength_order(&egg, &odd), Ordering::Less);
    }

    #[test]
    fn test_overflow_after_capacity() {
        let ranking = Ranking::with_defaults();
        let dragons = vec![
            Dragon::new("Weak", 1, 0, ["Sea"]),
            Dragon::new("Strong", 30, 1, ["Sea"]),
            Dragon::new("Mid", 15, 0, ["Sea"]),
        ];
        let habitats = vec![Habitat::new("Sea", 5, 1, 2)];

        let plan = plan_placement(&dragons, &habitats, &ranking);
        let sea = &plan.allocations[0];

        assert_eq!(sea.habitat, "Sea");
        assert_eq!(names(&sea.placed), vec!["Strong", "Mid"]);
        assert_eq!(names(&sea.overflow), vec!["Weak"]);
        assert_eq!(plan.total_placed(), 2);
        assert_eq!(plan.total_not_placed(), 1);
    }

    #[test]
    fn test_no_spaces_means_all_overflow() {
        let ranking = Ranking::with_defaults();
        let dragons = vec![Dragon::new("A", 1, 0, ["Ice"]), Dragon::new("B", 2, 0, ["Ice"])];

        let plan = plan_placement(&dragons, &[], &ranking);
        let ice = &plan.allocations[0];

        assert_eq!(ice.spaces, 0);
        assert!(ice.placed.is_empty());
        assert_eq!(names(&ice.overflow), vec!["B", "A"]);
    }

    #[test]
    fn test_negative_spaces_place_nobody() {
        let ranking = Ranking::with_defaults();
        let dragons = vec![Dragon::new("A", 1, 0, ["Ice"])];
        let habitats = vec![Habitat::new("Ice", 1, 1, -3)];

        let plan = plan_placement(&dragons, &habitats, &ranking);

        assert_eq!(plan.allocations[0].spaces, -3);
        assert!(plan.allocations[0].placed.is_empty());
        assert_eq!(plan.allocations[0].overflow.len(), 1);
    }

    #[test]
    fn test_irrelevant_habitats_skipped() {
        let ranking = Ranking::with_defaults();
        let dragons = vec![Dragon::new("A", 1, 0, ["Terra"])];
        let habitats = vec![Habitat::new("Wind", 1, 1, 3)];

        let plan = plan_placement(&dragons, &habitats, &ranking);
        let listed: Vec<&str> = plan.allocations.iter().map(|a| a.habitat).collect();

        // Wind has spaces, Terra has a dragon, everything else is noise
        assert_eq!(listed, vec!["Wind", "Terra"]);
    }

    #[test]
    fn test_unplaced_counted_as_not_placed() {
        let ranking = Ranking::with_defaults();
        let dragons = vec![
            Dragon::new("Drogon", 0, 0, ["Fire"]),
            Dragon::new("Nemo", 4, 1, ["Sea"]),
        ];
        let habitats = vec![Habitat::new("Sea", 1, 1, 5)];

        let plan = plan_placement(&dragons, &habitats, &ranking);

        assert_eq!(names(&plan.unplaced), vec!["Drogon"]);
        assert_eq!(plan.total_placed(), 1);
        assert_eq!(plan.total_not_placed(), 1);
        assert_eq!(plan.total_placed() + plan.total_not_placed(), dragons.len());
    }

    #[test]
    fn test_render_placement_report() {
        let ranking = Ranking::with_defaults();
        let dragons = vec![
            Dragon::new("Chronos", 40, 3, ["Time"]),
            Dragon::new("Weak", 1, 0, ["Sea"]),
            Dragon::new("Strong", 30, 1, ["Sea", "Terra"]),
            Dragon::new("Drogon", 0, 0, ["Fire"]),
        ];
        let habitats = vec![
            Habitat::new("Sea", 5, 1, 1),
            Habitat::new("Legend", 1, 1, 2),
            Habitat::new("Divine", 1, 4, 4),
        ];

        let expected = "\
How your dragons should be placed into habitats
Total dragons: 4


Legend (available spaces: 2)
  Chronos (Lv 40, 3*, Time)

Sea (available spaces: 1)
  Strong (Lv 30, 1*, Sea, Terra)

Overflow (1 dragons didn't fit):
    Weak (Lv 1, 0*, Sea)

Total dragons placed: 2
Total dragons not placed: 2

Unplaced Dragons (no matching habitat):
  Drogon (Lv 0, 0*, Fire)
";
        assert_eq!(render_placement_report(&dragons, &habitats, &ranking), expected);
    }

    #[test]
    fn test_write_placement_report() {
        let ranking = Ranking::with_defaults();
        let dragons = vec![Dragon::new("Nemo", 4, 1, ["Sea"])];
        let habitats = vec![Habitat::new("Sea", 1, 1, 5)];
        let dir = tempdir().unwrap();
        let path = dir.path().join("organized_habitats.txt");

        write_placement_report(&path, &dragons, &habitats, &ranking).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(PLACEMENT_TITLE));
        assert!(written.contains("Sea (available spaces: 5)\n  Nemo (Lv 4, 1*, Sea)\n"));
        assert!(written.ends_with("Total dragons placed: 1\nTotal dragons not placed: 0\n"));
    }
}
