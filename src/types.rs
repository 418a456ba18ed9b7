//! Data model for the extraction engine
//!
//! Input side: `Row` / `CellValue` — already-parsed spreadsheet rows as
//! ordered column-key/value pairs. The engine never mutates them.
//!
//! Output side: `WorkItemRecord` plus run-level aggregates
//! (`ExtractionSummary`, `ExtractionResult`). A processed row always yields
//! a `RowOutcome`: either an accepted record or an explicit rejection
//! reason, never a half-filled record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single raw cell value as delivered by the ingestion layer.
///
/// Serializes untagged, so JSON rows map naturally:
/// string → `Text`, number → `Number`, null → `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// A cell is empty when it is `Empty` or whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Trimmed text content, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// One spreadsheet row: an ordered mapping from column key to cell value.
///
/// Column keys carry no fixed semantics across source files; the order
/// within the row is preserved and used for adjacency heuristics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    /// Append a column, preserving insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((key.into(), value.into()));
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Value of the first column with the given key.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &CellValue)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, (k, v))| (i, k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row has no non-empty cell.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}

/// Work category assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkCategory {
    /// Volume-based work (concrete, masonry, earthwork)
    BulkMaterial,
    /// Area-based surface work (formwork, plaster, paving)
    AreaWork,
    /// Mass-based work (reinforcement, structural steel)
    MassWork,
    Other,
}

impl std::fmt::Display for WorkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkCategory::BulkMaterial => write!(f, "bulk_material"),
            WorkCategory::AreaWork => write!(f, "area_work"),
            WorkCategory::MassWork => write!(f, "mass_work"),
            WorkCategory::Other => write!(f, "other"),
        }
    }
}

/// Which quantity-resolution strategy produced the record's quantity.
///
/// Kept on the record for auditability: operators reviewing low-confidence
/// output can see whether a value came from a named column or a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityStrategy {
    /// A column header named the quantity explicitly.
    NamedColumn,
    /// The column immediately preceding the unit cell.
    UnitAdjacent,
    /// Highest additive score among the numeric candidates.
    Scored,
    /// Last resort: decimal values preferred over bare integers.
    DecimalFallback,
}

impl std::fmt::Display for QuantityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityStrategy::NamedColumn => write!(f, "named_column"),
            QuantityStrategy::UnitAdjacent => write!(f, "unit_adjacent"),
            QuantityStrategy::Scored => write!(f, "scored"),
            QuantityStrategy::DecimalFallback => write!(f, "decimal_fallback"),
        }
    }
}

/// Where a record came from in the source sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProvenance {
    pub row_index: usize,
    /// Column keys that contributed fields to the record.
    pub matched_column_keys: Vec<String>,
}

/// One validated, classified work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemRecord {
    pub description: String,

    pub category: WorkCategory,

    /// Normalized canonical unit token (M3, M2, T, KG, KS).
    pub unit: String,

    /// Always > 0; rows with unresolved or zero quantity are rejected.
    pub quantity: f64,

    /// Material strength class, e.g. "C25/30".
    pub classification_grade: Option<String>,

    /// Fixed-format catalog identifier, e.g. "317325".
    pub classification_code: Option<String>,

    pub unit_price: Option<f64>,

    pub total_price: Option<f64>,

    pub source_provenance: SourceProvenance,

    pub extraction_strategy: QuantityStrategy,
}

/// Why a row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    SectionHeader,
    DescriptiveNote,
    MissingDescription,
    MissingUnit,
    QuantityUnresolved,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::SectionHeader => write!(f, "section header row"),
            RejectReason::DescriptiveNote => write!(f, "descriptive note row"),
            RejectReason::MissingDescription => write!(f, "no description cell found"),
            RejectReason::MissingUnit => write!(f, "no recognized unit"),
            RejectReason::QuantityUnresolved => write!(f, "quantity could not be resolved"),
        }
    }
}

/// Outcome of processing one candidate row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(Box<WorkItemRecord>),
    Rejected(RejectReason),
}

/// A skipped row with its reason, for operator review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub row_index: usize,
    pub reason: RejectReason,
}

/// Per-category aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub count: usize,
    pub total_quantity: f64,
}

/// Aggregate over all records from one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    /// Counts and quantity sums grouped by category.
    /// BTreeMap keeps serialized output deterministic.
    pub by_category: BTreeMap<WorkCategory, CategoryTotals>,
    pub rejected_rows: usize,
}

/// Full result of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub records: Vec<WorkItemRecord>,
    pub summary: ExtractionSummary,
    pub rejections: Vec<RejectedRow>,
}

impl ExtractionResult {
    pub fn rejected_count(&self) -> usize {
        self.rejections.len()
    }
}

/// Extraction mode selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Only rows inside the named section are considered.
    Scoped { section: String },
    /// Every non-empty row is a work-item candidate.
    AutoDetect,
    /// Rows must be recognizable work items; header and note rows are
    /// rejected and counted rather than silently ignored.
    Exhaustive,
}
