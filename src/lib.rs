// Habitat Planner - Core Library
// Exposes all modules for use in the CLI and tests

pub mod entities;
pub mod error;
pub mod parser;
pub mod ranking;
pub mod report;

// Re-export commonly used types
pub use entities::{Dragon, Habitat};
pub use error::{PlannerError, Result};
pub use parser::{
    load_dragons, load_habitats, parse_dragon_row, parse_habitat_row, split_types,
    DragonParser, DragonRow, HabitatParser, HabitatRow, SheetParser, SpacesCell,
};
pub use ranking::{
    AliasTable, BestHabitat, RankEntry, RankTable, Ranking, RankingConfig, UNRANKED,
};
pub use report::{
    group_by_habitat, plan_placement, render_grouping_report, render_placement_report,
    strength_order, total_spaces_by_habitat, write_grouping_report, write_placement_report,
    HabitatAllocation, HabitatGroup, HabitatGrouping, PlacementPlan,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
