//! Price reconciliation
//!
//! Rows may carry a unit price, a total price, both, or neither. Detection
//! is by named column first, then by position (prices conventionally sit in
//! the columns right after the unit cell). Whenever only one of the two is
//! known, the other is derived from the quantity, so emitted records are
//! never mutually inconsistent. Both absent is valid.

use crate::config::EngineConfig;
use crate::detector::RoleAssignment;

/// Reconciled price pair plus the column keys that contributed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPrices {
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub matched_column_keys: Vec<String>,
}

/// Detect and reconcile prices for a row whose quantity is already known.
///
/// `quantity_key` is excluded from detection so the quantity cell can never
/// double as a price. When both prices were detected independently, the
/// higher value is kept as the total (a unit price should not exceed the
/// total for quantity ≥ 1) and no derivation happens.
pub fn reconcile(
    assignment: &RoleAssignment,
    quantity: f64,
    quantity_key: &str,
    config: &EngineConfig,
) -> ResolvedPrices {
    let mut unit_price: Option<(f64, String)> = None;
    let mut total_price: Option<(f64, String)> = None;

    // named columns first
    for candidate in &assignment.candidates {
        if candidate.column_key == quantity_key || candidate.is_code_like {
            continue;
        }
        if unit_price.is_none() && config.is_unit_price_column(&candidate.column_key) {
            unit_price = Some((candidate.numeric_value, candidate.column_key.clone()));
        } else if total_price.is_none() && config.is_total_price_column(&candidate.column_key) {
            total_price = Some((candidate.numeric_value, candidate.column_key.clone()));
        }
    }

    // positional fallback: "… | quantity | unit | unit price | total price"
    if let Some(unit_cell) = &assignment.unit {
        if unit_price.is_none() {
            unit_price = positional(assignment, unit_cell.column_index + 1, quantity_key)
                .filter(|(_, key)| total_price.as_ref().map(|(_, k)| k) != Some(key));
        }
        if total_price.is_none() {
            total_price = positional(assignment, unit_cell.column_index + 2, quantity_key)
                .filter(|(_, key)| unit_price.as_ref().map(|(_, k)| k) != Some(key));
        }
    }

    match (unit_price, total_price) {
        (Some((u, uk)), Some((t, tk))) => {
            // both detected independently: higher value wins as total
            let (unit_value, total_value) = if u > t { (t, u) } else { (u, t) };
            ResolvedPrices {
                unit_price: Some(unit_value),
                total_price: Some(total_value),
                matched_column_keys: vec![uk, tk],
            }
        }
        (Some((u, uk)), None) => ResolvedPrices {
            unit_price: Some(u),
            total_price: Some(u * quantity),
            matched_column_keys: vec![uk],
        },
        (None, Some((t, tk))) => ResolvedPrices {
            unit_price: Some(t / quantity),
            total_price: Some(t),
            matched_column_keys: vec![tk],
        },
        (None, None) => ResolvedPrices::default(),
    }
}

fn positional(
    assignment: &RoleAssignment,
    column_index: usize,
    quantity_key: &str,
) -> Option<(f64, String)> {
    assignment
        .candidates
        .iter()
        .find(|c| {
            c.column_index == column_index && c.column_key != quantity_key && !c.is_code_like
        })
        .map(|c| (c.numeric_value, c.column_key.clone()))
}
