// 📚 Grouping Report - "How your dragons should be organized"

use super::{dragon_count, write_text};
use crate::entities::Dragon;
use crate::error::Result;
use crate::ranking::Ranking;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::info;

pub const GROUPING_TITLE: &str = "How your dragons should be organized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitatGroup<'a> {
    /// Canonical habitat type
    pub habitat: &'a str,
    pub rank: u32,
    pub dragons: Vec<&'a Dragon>,
}

/// Dragons bucketed by best habitat, buckets in Rank Table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitatGrouping<'a> {
    /// Number of dragons in the sheet
    pub total: usize,

    /// Non-empty groups only
    pub groups: Vec<HabitatGroup<'a>>,

    /// Dragons with no ranked type, sheet order
    pub unsorted: Vec<&'a Dragon>,
}

impl HabitatGrouping<'_> {
    /// Dragons across all groups plus unsorted
    pub fn dragon_total(&self) -> usize {
        self.groups.iter().map(|g| g.dragons.len()).sum::<usize>() + self.unsorted.len()
    }
}

pub fn group_by_habitat<'a>(dragons: &'a [Dragon], ranking: &'a Ranking) -> HabitatGrouping<'a> {
    // Stable sort: best rank first, unranked last
    let mut sorted: Vec<&Dragon> = dragons.iter().collect();
    sorted.sort_by_key(|d| ranking.sort_key(d));

    let mut buckets: HashMap<&str, Vec<&Dragon>> = HashMap::new();
    let mut unsorted = Vec::new();

    for dragon in sorted {
        match ranking.best_habitat(dragon) {
            Some(best) => buckets.entry(best.habitat).or_default().push(dragon),
            None => unsorted.push(dragon),
        }
    }

    let groups = ranking
        .table()
        .iter()
        .filter_map(|entry| {
            buckets.remove(entry.name.as_str()).map(|dragons| HabitatGroup {
                habitat: &entry.name,
                rank: entry.rank,
                dragons,
            })
        })
        .collect();

    HabitatGrouping {
        total: dragons.len(),
        groups,
        unsorted,
    }
}

impl fmt::Display for HabitatGrouping<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", GROUPING_TITLE)?;
        writeln!(f, "Total dragons: {}", self.total)?;
        writeln!(f)?;

        for group in &self.groups {
            writeln!(f)?;
            writeln!(f, "{} Habitats ({}):", group.habitat, dragon_count(group.dragons.len()))?;
            for dragon in &group.dragons {
                writeln!(f, "  {}", dragon)?;
            }
        }

        if !self.unsorted.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unsorted Dragons ({}):", dragon_count(self.unsorted.len()))?;
            for dragon in &self.unsorted {
                writeln!(f, "  {}", dragon)?;
            }
        }

        Ok(())
    }
}

pub fn render_grouping_report(dragons: &[Dragon], ranking: &Ranking) -> String {
    group_by_habitat(dragons, ranking).to_string()
}

/// Write the grouping report to `path` and print a completion notice
pub fn write_grouping_report(path: &Path, dragons: &[Dragon], ranking: &Ranking) -> Result<()> {
    let grouping = group_by_habitat(dragons, ranking);
    write_text(path, &grouping.to_string())?;

    info!(
        groups = grouping.groups.len(),
        unsorted = grouping.unsorted.len(),
        "grouping report written"
    );
    println!("Dragons sorted and saved to {}", path.display());

    Ok(())
}
