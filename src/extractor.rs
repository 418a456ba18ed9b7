//! Extraction orchestration
//!
//! Drives row-by-row processing across the three extraction modes,
//! aggregates accepted records, and accounts for rejected rows.
//!
//! Failure semantics: a malformed row never aborts a run. Each row is
//! processed in isolation and yields a [`RowOutcome`]; rejections are
//! logged with the row index and counted, and processing continues.
//! Empty input yields an empty result plus a warning.

use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::detector::{detect_roles, detect_row_type, RowType};
use crate::price::reconcile;
use crate::quantity::resolve;
use crate::types::{
    CategoryTotals, ExtractionMode, ExtractionResult, RejectReason, RejectedRow, Row, RowOutcome,
    SourceProvenance, WorkItemRecord,
};

/// Stateless extraction engine; one instance can serve any number of runs.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: EngineConfig,
}

impl Extractor {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process a full row sequence in the given mode.
    pub fn run(&self, rows: &[Row], mode: &ExtractionMode) -> ExtractionResult {
        if rows.is_empty() {
            tracing::warn!("empty row sequence, nothing to extract");
            return ExtractionResult::default();
        }

        let mut result = ExtractionResult::default();

        match mode {
            ExtractionMode::Scoped { section } => self.run_scoped(rows, section, &mut result),
            ExtractionMode::AutoDetect => self.run_linear(rows, false, &mut result),
            ExtractionMode::Exhaustive => self.run_linear(rows, true, &mut result),
        }

        self.summarize(&mut result);
        result
    }

    fn run_linear(&self, rows: &[Row], exhaustive: bool, result: &mut ExtractionResult) {
        for (index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            let outcome = self.process_row(index, row, exhaustive);
            self.record_outcome(index, outcome, result);
        }
    }

    /// Scoped mode: discard rows until the target section header appears,
    /// process rows inside the section, stop at the next different section.
    fn run_scoped(&self, rows: &[Row], section: &str, result: &mut ExtractionResult) {
        let mut in_section = false;

        for (index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                continue;
            }

            if detect_row_type(row, &self.config) == Some(RowType::SectionHeader) {
                if section_matches(row, section) {
                    in_section = true;
                    continue;
                }
                if in_section {
                    // a different section begins; the scope is closed
                    break;
                }
                continue;
            }

            if in_section {
                let outcome = self.process_row(index, row, false);
                self.record_outcome(index, outcome, result);
            }
        }

        if !in_section {
            tracing::warn!("section '{}' not found in input", section);
        }
    }

    /// Run the per-row pipeline: role detection, quantity resolution,
    /// price reconciliation, classification.
    fn process_row(&self, index: usize, row: &Row, exhaustive: bool) -> RowOutcome {
        let assignment = detect_roles(row, &self.config);

        match assignment.row_type {
            Some(RowType::SectionHeader) => return RowOutcome::Rejected(RejectReason::SectionHeader),
            Some(RowType::Note) => return RowOutcome::Rejected(RejectReason::DescriptiveNote),
            Some(RowType::WorkItem) | None => {}
        }

        // exhaustive mode insists on recognizable work items: an explicit
        // work-item marker, or no marker at all plus a recognized unit
        if exhaustive && assignment.row_type.is_none() && assignment.unit.is_none() {
            return RowOutcome::Rejected(RejectReason::MissingUnit);
        }

        let description = match &assignment.description {
            Some(cell) => cell.clone(),
            None => return RowOutcome::Rejected(RejectReason::MissingDescription),
        };
        let unit = match &assignment.unit {
            Some(cell) => cell.clone(),
            None => return RowOutcome::Rejected(RejectReason::MissingUnit),
        };

        let quantity = match resolve(&assignment, &self.config) {
            Some(resolved) => resolved,
            None => return RowOutcome::Rejected(RejectReason::QuantityUnresolved),
        };

        let prices = reconcile(&assignment, quantity.value, &quantity.column_key, &self.config);
        let category = classify(&unit.value, &description.value, &self.config);

        let mut matched_column_keys = vec![
            description.column_key.clone(),
            unit.column_key.clone(),
            quantity.column_key.clone(),
        ];
        if let Some(code) = &assignment.code {
            matched_column_keys.push(code.column_key.clone());
        }
        matched_column_keys.extend(prices.matched_column_keys.clone());

        RowOutcome::Accepted(Box::new(WorkItemRecord {
            description: description.value,
            category,
            unit: unit.value,
            quantity: quantity.value,
            classification_grade: assignment.grade,
            classification_code: assignment.code.map(|c| c.value),
            unit_price: prices.unit_price,
            total_price: prices.total_price,
            source_provenance: SourceProvenance {
                row_index: index,
                matched_column_keys,
            },
            extraction_strategy: quantity.strategy,
        }))
    }

    fn record_outcome(&self, index: usize, outcome: RowOutcome, result: &mut ExtractionResult) {
        match outcome {
            RowOutcome::Accepted(record) => result.records.push(*record),
            RowOutcome::Rejected(reason) => {
                tracing::debug!("row {} skipped: {}", index, reason);
                result.rejections.push(RejectedRow {
                    row_index: index,
                    reason,
                });
            }
        }
    }

    fn summarize(&self, result: &mut ExtractionResult) {
        let ExtractionResult {
            records,
            summary,
            rejections,
        } = result;

        for record in records.iter() {
            let totals = summary
                .by_category
                .entry(record.category)
                .or_insert_with(CategoryTotals::default);
            totals.count += 1;
            totals.total_quantity += record.quantity;
        }
        summary.rejected_rows = rejections.len();
    }
}

/// Whether any text cell of a header row names the target section.
fn section_matches(row: &Row, section: &str) -> bool {
    let target = section.to_lowercase();
    row.iter()
        .filter_map(|(_, _, value)| value.as_text())
        .any(|text| text.to_lowercase().contains(&target))
}

/// Convenience wrapper: run one extraction with the default configuration.
pub fn extract(rows: &[Row], mode: &ExtractionMode) -> ExtractionResult {
    Extractor::default().run(rows, mode)
}
