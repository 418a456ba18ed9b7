//! Locale-aware number parsing
//!
//! BOQ exports format numbers with a comma decimal separator and spaces
//! (often non-breaking) as thousands separators: `"2 832,000"` means 2832.
//!
//! Contract: [`parse_number`] returns `0.0` for anything unparsable.
//! Callers treat `0.0` as "absent", not as a measured zero, and exclude
//! such values downstream. Blank and malformed cells are the common case
//! in this data, so the silent zero is deliberate.

use crate::types::CellValue;

/// Parse a cell into a number, returning `0.0` when no number is present.
pub fn parse_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => parse_number_str(s),
        CellValue::Empty => 0.0,
    }
}

/// Parse locale-formatted numeric text, returning `0.0` on failure.
///
/// Strips all whitespace (thousands separators), then replaces the first
/// comma with a decimal point before standard parsing.
pub fn parse_number_str(text: &str) -> f64 {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return 0.0;
    }

    let normalized = stripped.replacen(',', ".", 1);
    normalized.parse::<f64>().unwrap_or(0.0)
}

/// Count of decimal digits in the raw text form of a number.
///
/// `"23,570"` → 3, `"150"` → 0. Used by the quantity scorer: measured
/// quantities are rarely bare round integers.
pub fn decimal_digits(text: &str) -> u32 {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = stripped.replacen(',', ".", 1);

    match normalized.split_once('.') {
        Some((_, frac)) => frac.chars().take_while(|c| c.is_ascii_digit()).count() as u32,
        None => 0,
    }
}

/// Render a cell's raw content as text, for pattern matching and
/// decimal-precision inspection. Whole numbers lose the trailing `.0`
/// so `317325.0` matches the catalog-code pattern.
pub fn raw_text(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        CellValue::Empty => String::new(),
    }
}
