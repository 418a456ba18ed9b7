//! Quantity resolution
//!
//! The central disambiguation step. A row's numeric cells mix the
//! quantity with catalog codes and prices in arbitrary column order, so
//! resolution runs an ordered chain of strategies and accepts the first
//! plausible value:
//!
//! 1. named column — a header keyword names the quantity column;
//! 2. unit adjacency — the column immediately preceding the unit cell
//!    (the conventional "quantity | unit" layout);
//! 3. additive scoring over all remaining candidates;
//! 4. decimal preference — non-integer values beat bare integers.
//!
//! Every strategy is a pure function over the role assignment; the winning
//! strategy is recorded on the emitted record for auditability.

use crate::config::EngineConfig;
use crate::detector::{Candidate, RoleAssignment};
use crate::types::QuantityStrategy;

/// Scoring weights for strategy 3.
const WEIGHT_NAMED_COLUMN: f64 = 3.0;
const WEIGHT_TWO_DECIMALS: f64 = 1.5;
const WEIGHT_TYPICAL_RANGE: f64 = 1.0;
const PENALTY_ROUND_INTEGER: f64 = -0.5;
const PENALTY_FAR_FROM_UNIT: f64 = -1.0;
const PENALTY_CODE_LIKE: f64 = -3.0;
const PENALTY_PRICE_LIKE: f64 = -2.0;

/// Minimum score for strategy 3 to claim a candidate; below this the
/// chain falls through to the decimal-preference fallback.
const SCORE_FLOOR: f64 = 1.0;

/// A resolved quantity with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuantity {
    pub value: f64,
    pub strategy: QuantityStrategy,
    pub column_key: String,
}

/// Run the strategy chain. `None` means the row has no plausible quantity
/// and must be rejected.
pub fn resolve(assignment: &RoleAssignment, config: &EngineConfig) -> Option<ResolvedQuantity> {
    if let Some(candidate) = named_column(assignment, config) {
        return Some(resolved(candidate, QuantityStrategy::NamedColumn));
    }
    if let Some(candidate) = unit_adjacent(assignment, config) {
        return Some(resolved(candidate, QuantityStrategy::UnitAdjacent));
    }
    if let Some(candidate) = scored(assignment, config) {
        return Some(resolved(candidate, QuantityStrategy::Scored));
    }
    decimal_fallback(assignment, config).map(|c| resolved(c, QuantityStrategy::DecimalFallback))
}

fn resolved(candidate: &Candidate, strategy: QuantityStrategy) -> ResolvedQuantity {
    ResolvedQuantity {
        value: candidate.numeric_value,
        strategy,
        column_key: candidate.column_key.clone(),
    }
}

fn in_range(value: f64, config: &EngineConfig) -> bool {
    value > 0.0 && value <= config.max_quantity
}

/// Strategy 1: a column header names the quantity explicitly.
fn named_column<'a>(
    assignment: &'a RoleAssignment,
    config: &EngineConfig,
) -> Option<&'a Candidate> {
    assignment
        .candidates
        .iter()
        .find(|c| c.is_quantity_column && in_range(c.numeric_value, config))
}

/// Strategy 2: the column immediately preceding the unit cell.
fn unit_adjacent<'a>(
    assignment: &'a RoleAssignment,
    config: &EngineConfig,
) -> Option<&'a Candidate> {
    let unit_index = assignment.unit.as_ref()?.column_index;
    let target = unit_index.checked_sub(1)?;
    assignment
        .candidates
        .iter()
        .find(|c| c.column_index == target && in_range(c.numeric_value, config))
}

/// Strategy 3: additive scoring over all in-range candidates.
fn scored<'a>(assignment: &'a RoleAssignment, config: &EngineConfig) -> Option<&'a Candidate> {
    let unit_index = assignment.unit.as_ref().map(|u| u.column_index);

    let best = assignment
        .candidates
        .iter()
        .filter(|c| in_range(c.numeric_value, config))
        .map(|c| (c, score(c, unit_index, config)))
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;

    if best.1 >= SCORE_FLOOR {
        Some(best.0)
    } else {
        None
    }
}

fn score(candidate: &Candidate, unit_index: Option<usize>, config: &EngineConfig) -> f64 {
    let mut total = 0.0;

    if candidate.is_quantity_column {
        total += WEIGHT_NAMED_COLUMN;
    }

    // closeness to the unit cell; beyond 3 columns the association is noise
    if let Some(unit_index) = unit_index {
        let distance = candidate.column_index.abs_diff(unit_index);
        total += match distance {
            0 => 0.0,
            1 => 2.5,
            2 => 1.5,
            3 => 0.5,
            _ => PENALTY_FAR_FROM_UNIT,
        };
    }

    // measured quantities usually carry decimals; round integers are suspect
    if candidate.decimal_digits >= 2 {
        total += WEIGHT_TWO_DECIMALS;
    } else if candidate.decimal_digits == 0 && candidate.numeric_value.fract() == 0.0 {
        total += PENALTY_ROUND_INTEGER;
    }

    if candidate.numeric_value >= 0.1 && candidate.numeric_value <= config.typical_quantity_max {
        total += WEIGHT_TYPICAL_RANGE;
    }

    if candidate.is_code_like {
        total += PENALTY_CODE_LIKE;
    }
    if candidate.is_price_like {
        total += PENALTY_PRICE_LIKE;
    }

    total
}

/// Strategy 4: prefer any non-integer candidate, then any in-range one.
fn decimal_fallback<'a>(
    assignment: &'a RoleAssignment,
    config: &EngineConfig,
) -> Option<&'a Candidate> {
    let in_bounds: Vec<&Candidate> = assignment
        .candidates
        .iter()
        .filter(|c| in_range(c.numeric_value, config))
        .collect();

    in_bounds
        .iter()
        .find(|c| c.numeric_value.fract() != 0.0)
        .or_else(|| in_bounds.first())
        .copied()
}
