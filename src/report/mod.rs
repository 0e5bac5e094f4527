// 📝 Reports - the two text files produced from one dragon sheet
//
// - grouping: every dragon under its best habitat type
// - placement: dragons fitted into the habitat spaces actually built
//
// Both share Ranking::best_habitat but apply different policies, so they
// stay separate. Plans are built first (pure), then rendered via Display.

pub mod grouping;
pub mod placement;

pub use grouping::{
    group_by_habitat, render_grouping_report, write_grouping_report, HabitatGroup,
    HabitatGrouping,
};
pub use placement::{
    plan_placement, render_placement_report, strength_order, total_spaces_by_habitat,
    write_placement_report, HabitatAllocation, PlacementPlan,
};

use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// "1 dragon" / "N dragons"
pub(crate) fn dragon_count(count: usize) -> String {
    if count == 1 {
        "1 dragon".to_string()
    } else {
        format!("{} dragons", count)
    }
}

/// Write the whole report in one go; the handle is closed on return or error
pub(crate) fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
