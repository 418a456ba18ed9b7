//! Column role detection
//!
//! Classifies each non-empty cell of a row into its semantic role:
//! row-type marker, unit, catalog code, description, or numeric candidate.
//! Column layouts vary per author, so nothing here relies on fixed column
//! positions; only content and header keywords.
//!
//! Description detection is a greedy early-exit scan: the first qualifying
//! cell wins and is never overwritten, even when a later cell also carries
//! domain keywords.

use crate::config::EngineConfig;
use crate::numeric::{decimal_digits, parse_number, raw_text};
use crate::patterns::{extract_grade, is_catalog_code, normalize_unit};
use crate::types::{CellValue, Row};

/// Row-type marker found in the row, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    WorkItem,
    SectionHeader,
    Note,
}

/// A cell pinned to a semantic role, with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedCell {
    pub column_index: usize,
    pub column_key: String,
    /// Role-specific content: trimmed text for descriptions, the canonical
    /// token for units, the raw token for codes.
    pub value: String,
}

/// A numeric cell that may be the quantity or a price.
///
/// Transient: lives only while one row is being processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub column_key: String,
    pub raw_value: String,
    pub numeric_value: f64,
    pub column_index: usize,
    /// Whole token matches the catalog-code pattern.
    pub is_code_like: bool,
    /// Large round multiple of 100, or sits under a price column header.
    pub is_price_like: bool,
    /// Column header names the quantity column.
    pub is_quantity_column: bool,
    /// Decimal digits in the raw text form.
    pub decimal_digits: u32,
}

/// All per-row signals extracted by the detector.
#[derive(Debug, Clone, Default)]
pub struct RoleAssignment {
    pub row_type: Option<RowType>,
    pub description: Option<DetectedCell>,
    pub unit: Option<DetectedCell>,
    pub grade: Option<String>,
    pub code: Option<DetectedCell>,
    pub candidates: Vec<Candidate>,
}

/// Classify every non-empty cell of the row.
pub fn detect_roles(row: &Row, config: &EngineConfig) -> RoleAssignment {
    let mut assignment = RoleAssignment::default();
    // whether the current code cell sits under a code-keyword header
    let mut code_has_header = false;

    for (index, key, value) in row.iter() {
        if value.is_empty() {
            continue;
        }
        let text = raw_text(value);

        // row-type marker: exact token from the closed marker sets
        if assignment.row_type.is_none() && matches!(value, CellValue::Text(_)) {
            if let Some(row_type) = match_marker(&text, config) {
                assignment.row_type = Some(row_type);
                continue;
            }
        }

        // unit: exact-token match, first hit wins
        if assignment.unit.is_none() {
            if let Some(canonical) = normalize_unit(&text) {
                assignment.unit = Some(DetectedCell {
                    column_index: index,
                    column_key: key.to_string(),
                    value: canonical.to_string(),
                });
                continue;
            }
        }

        // grade can live inside any text cell, typically the description
        if assignment.grade.is_none() {
            if let Some(grade) = extract_grade(&text) {
                assignment.grade = Some(grade);
            }
        }

        // catalog code: header-keyword columns beat bare positional matches
        let code_like = is_catalog_code(&text);
        if code_like {
            let has_header = config.is_code_column(key);
            let replace = match &assignment.code {
                None => true,
                Some(_) => has_header && !code_has_header,
            };
            if replace {
                assignment.code = Some(DetectedCell {
                    column_index: index,
                    column_key: key.to_string(),
                    value: text.clone(),
                });
                code_has_header = has_header;
            }
        }

        // description: first sufficiently long keyword-bearing text cell
        if assignment.description.is_none() {
            if let Some(desc) = value.as_text() {
                if desc.chars().count() >= config.min_description_len
                    && config.has_description_keyword(desc)
                {
                    assignment.description = Some(DetectedCell {
                        column_index: index,
                        column_key: key.to_string(),
                        value: desc.to_string(),
                    });
                    continue;
                }
            }
        }

        // everything else that parses to a positive number is a candidate
        let numeric = parse_number(value);
        if numeric > 0.0 {
            assignment.candidates.push(Candidate {
                column_key: key.to_string(),
                raw_value: text.clone(),
                numeric_value: numeric,
                column_index: index,
                is_code_like: code_like,
                is_price_like: is_price_like(numeric, key, config),
                is_quantity_column: config.is_quantity_column(key),
                decimal_digits: decimal_digits(&text),
            });
        }
    }

    assignment
}

/// Row-type marker detection only, for cheap pre-scans (section scoping).
pub fn detect_row_type(row: &Row, config: &EngineConfig) -> Option<RowType> {
    for (_, _, value) in row.iter() {
        if let Some(text) = value.as_text() {
            if let Some(row_type) = match_marker(text, config) {
                return Some(row_type);
            }
        }
    }
    None
}

fn match_marker(text: &str, config: &EngineConfig) -> Option<RowType> {
    let token = text.trim().to_uppercase();
    if config.work_item_markers.iter().any(|m| *m == token) {
        Some(RowType::WorkItem)
    } else if config.section_markers.iter().any(|m| *m == token) {
        Some(RowType::SectionHeader)
    } else if config.note_markers.iter().any(|m| *m == token) {
        Some(RowType::Note)
    } else {
        None
    }
}

/// Price-shaped values: large and a round multiple of 100, or sitting
/// under a price column header.
fn is_price_like(value: f64, column_key: &str, config: &EngineConfig) -> bool {
    let round_hundred = value >= 1000.0 && (value % 100.0).abs() < 1e-9;
    round_hundred
        || config.is_unit_price_column(column_key)
        || config.is_total_price_column(column_key)
}
