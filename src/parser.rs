// 🏗️ Sheet Parsers - dragons.csv and habitats.csv
//
// Both sheets are exported spreadsheets: header row first, cells may be
// blank, trailing cells may be missing. Blank dragon names skip the row;
// anything that should be a number and is not stops the run.

use crate::entities::{Dragon, Habitat};
use crate::error::{PlannerError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// COLUMN NAMES
// ============================================================================

pub const DRAGON_NAME: &str = "Dragon Name";
pub const DRAGON_LEVEL: &str = "Level";
pub const DRAGON_STARS: &str = "Stars";
pub const DRAGON_TYPES: &str = "Type(s)";

pub const HABITAT_NAME: &str = "Habitat";
pub const HABITAT_LEVEL: &str = "Level";
pub const HABITAT_QUANTITY: &str = "Quantity";
pub const HABITAT_SPACES: &str = "Available Spaces";
/// Misspelling found in real sheets; preferred when both headers exist
pub const HABITAT_SPACES_TYPO: &str = "Avaliable Spaces";

/// Separators accepted inside the `Type(s)` cell
pub const TYPE_SEPARATORS: [char; 4] = ['|', '/', ';', ','];

// ============================================================================
// PARSER TRAIT
// ============================================================================

/// SheetParser - turns one CSV file into typed records
pub trait SheetParser {
    type Record;

    /// Parse a file and return its records in sheet order
    fn parse(&self, file_path: &Path) -> Result<Vec<Self::Record>>;

    /// Sheet name for log lines
    fn sheet_name(&self) -> &str;
}

// ============================================================================
// ROW-LEVEL PARSING (pure)
// ============================================================================

/// A cell that should have held an integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadInteger {
    pub column: &'static str,
    pub value: String,
}

impl BadInteger {
    fn into_error(self, path: &Path, line: u64) -> PlannerError {
        PlannerError::MalformedInteger {
            path: path.to_path_buf(),
            line,
            column: self.column.to_string(),
            value: self.value,
        }
    }
}

/// Raw dragon cells; `None` when the column or cell is absent
#[derive(Debug, Clone, Copy, Default)]
pub struct DragonRow<'a> {
    pub name: Option<&'a str>,
    pub level: Option<&'a str>,
    pub stars: Option<&'a str>,
    pub types: Option<&'a str>,
}

/// Split a `Type(s)` cell on `| / ; ,`, trimming pieces and dropping empty ones
pub fn split_types(raw: &str) -> Vec<String> {
    raw.split(TYPE_SEPARATORS.as_slice())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blank (or absent) is 0; anything else must be an integer, sign allowed
fn parse_or_zero(value: Option<&str>, column: &'static str) -> std::result::Result<i64, BadInteger> {
    let trimmed = value.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed.parse().map_err(|_| BadInteger {
        column,
        value: trimmed.to_string(),
    })
}

/// Strict signed integer, blank included
fn parse_int(value: Option<&str>, column: &'static str) -> std::result::Result<i64, BadInteger> {
    let trimmed = value.unwrap_or("").trim();

    trimmed.parse().map_err(|_| BadInteger {
        column,
        value: trimmed.to_string(),
    })
}

/// Build a dragon from raw cells. `Ok(None)` means the row has no name and is skipped.
pub fn parse_dragon_row(row: &DragonRow<'_>) -> std::result::Result<Option<Dragon>, BadInteger> {
    let name = row.name.unwrap_or("").trim();
    if name.is_empty() {
        return Ok(None);
    }

    let level = parse_or_zero(row.level, DRAGON_LEVEL)?;
    let stars = parse_or_zero(row.stars, DRAGON_STARS)?;
    let types = row.types.map(split_types).unwrap_or_default();

    Ok(Some(Dragon::new(name, level, stars, types)))
}

/// Spaces cell together with the header spelling the sheet used
#[derive(Debug, Clone, Copy)]
pub struct SpacesCell<'a> {
    pub column: &'static str,

    /// `None` when the row is too short to reach the column
    pub value: Option<&'a str>,
}

/// Raw habitat cells. `spaces` is `None` when the sheet has no spaces column.
#[derive(Debug, Clone, Copy, Default)]
pub struct HabitatRow<'a> {
    pub habitat: Option<&'a str>,
    pub level: Option<&'a str>,
    pub quantity: Option<&'a str>,
    pub spaces: Option<SpacesCell<'a>>,
}

/// Build a habitat from raw cells; level, quantity and spaces (when the column exists) must be integers
pub fn parse_habitat_row(row: &HabitatRow<'_>) -> std::result::Result<Habitat, BadInteger> {
    let level = parse_int(row.level, HABITAT_LEVEL)?;
    let quantity = parse_int(row.quantity, HABITAT_QUANTITY)?;
    let spaces = match row.spaces {
        Some(spaces_cell) => parse_int(spaces_cell.value, spaces_cell.column)?,
        None => 0,
    };

    Ok(Habitat::new(row.habitat.unwrap_or(""), level, quantity, spaces))
}

// ============================================================================
// CSV PLUMBING
// ============================================================================

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| PlannerError::from_open(path, e))?;

    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

/// Header position, ignoring surrounding whitespace and a UTF-8 BOM
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
}

fn require_column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    column_index(headers, name).ok_or_else(|| PlannerError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn cell(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i))
}

fn line_of(record: &StringRecord, row_idx: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(row_idx as u64 + 2) // 1-indexed + header row
}

// ============================================================================
// DRAGON SHEET
// ============================================================================

/// dragons.csv: `Dragon Name, Level, Stars, Type(s)`
pub struct DragonParser;

impl DragonParser {
    pub fn new() -> Self {
        DragonParser
    }
}

impl Default for DragonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetParser for DragonParser {
    type Record = Dragon;

    fn parse(&self, file_path: &Path) -> Result<Vec<Dragon>> {
        let mut reader = open_reader(file_path)?;
        let headers = reader.headers()?.clone();

        let name_col = require_column(&headers, DRAGON_NAME, file_path)?;
        let level_col = column_index(&headers, DRAGON_LEVEL);
        let stars_col = column_index(&headers, DRAGON_STARS);
        let types_col = column_index(&headers, DRAGON_TYPES);

        let mut dragons = Vec::new();
        let mut skipped = 0usize;

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let line = line_of(&record, row_idx);

            let row = DragonRow {
                name: record.get(name_col),
                level: cell(&record, level_col),
                stars: cell(&record, stars_col),
                types: cell(&record, types_col),
            };

            match parse_dragon_row(&row).map_err(|e| e.into_error(file_path, line))? {
                Some(dragon) => dragons.push(dragon),
                None => {
                    debug!(line, "skipping row without a dragon name");
                    skipped += 1;
                }
            }
        }

        info!(
            sheet = self.sheet_name(),
            loaded = dragons.len(),
            skipped,
            "loaded {}",
            file_path.display()
        );

        Ok(dragons)
    }

    fn sheet_name(&self) -> &str {
        "dragons"
    }
}

// ============================================================================
// HABITAT SHEET
// ============================================================================

/// habitats.csv: `Habitat, Level, Quantity, Available Spaces`
pub struct HabitatParser;

impl HabitatParser {
    pub fn new() -> Self {
        HabitatParser
    }
}

impl Default for HabitatParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetParser for HabitatParser {
    type Record = Habitat;

    fn parse(&self, file_path: &Path) -> Result<Vec<Habitat>> {
        let mut reader = open_reader(file_path)?;
        let headers = reader.headers()?.clone();

        let name_col = require_column(&headers, HABITAT_NAME, file_path)?;
        let level_col = require_column(&headers, HABITAT_LEVEL, file_path)?;
        let quantity_col = require_column(&headers, HABITAT_QUANTITY, file_path)?;
        let spaces_col = [HABITAT_SPACES_TYPO, HABITAT_SPACES]
            .into_iter()
            .find_map(|column| column_index(&headers, column).map(|idx| (idx, column)));

        let mut habitats = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let line = line_of(&record, row_idx);

            let row = HabitatRow {
                habitat: record.get(name_col),
                level: record.get(level_col),
                quantity: record.get(quantity_col),
                spaces: spaces_col.map(|(idx, column)| SpacesCell {
                    column,
                    value: record.get(idx),
                }),
            };

            let habitat = parse_habitat_row(&row).map_err(|e| e.into_error(file_path, line))?;
            habitats.push(habitat);
        }

        info!(
            sheet = self.sheet_name(),
            loaded = habitats.len(),
            "loaded {}",
            file_path.display()
        );

        Ok(habitats)
    }

    fn sheet_name(&self) -> &str {
        "habitats"
    }
}

// ============================================================================
// CONVENIENCE LOADERS
// ============================================================================

pub fn load_dragons<P: AsRef<Path>>(path: P) -> Result<Vec<Dragon>> {
    DragonParser::new().parse(path.as_ref())
}

pub fn load_habitats<P: AsRef<Path>>(path: P) -> Result<Vec<Habitat>> {
    HabitatParser::new().parse(path.as_ref())
}

// ============================================================================
// TESTS
// ============================================================================
