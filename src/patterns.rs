//! Pattern recognizers
//!
//! Regular-expression matchers for the fixed-format tokens that appear in
//! BOQ rows: material strength grades, catalog codes, and measurement
//! units. Unit matching is exact-token, never substring, so "m3" inside a
//! longer description does not count as a unit cell.

use regex::Regex;

/// Semantic family of a canonical unit token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    /// m3 — volume
    Volume,
    /// m2 — area
    Area,
    /// t, kg — mass
    Mass,
    /// ks — count
    Count,
}

/// Normalize a unit token to its canonical uppercase form.
///
/// Accepts typographic variants: superscript digits (`m³`, `m²`) and an
/// internal space (`m 3`). Returns `None` for anything that is not exactly
/// a known unit token.
pub fn normalize_unit(token: &str) -> Option<&'static str> {
    lazy_static::lazy_static! {
        static ref VOLUME_RE: Regex = Regex::new(r"(?i)^m\s?[3³]$").unwrap();
        static ref AREA_RE: Regex = Regex::new(r"(?i)^m\s?[2²]$").unwrap();
    }

    let trimmed = token.trim();
    if VOLUME_RE.is_match(trimmed) {
        return Some("M3");
    }
    if AREA_RE.is_match(trimmed) {
        return Some("M2");
    }

    match trimmed.to_lowercase().as_str() {
        "t" => Some("T"),
        "kg" => Some("KG"),
        "ks" | "kus" => Some("KS"),
        _ => None,
    }
}

/// Unit class of a canonical token produced by [`normalize_unit`].
pub fn unit_class(canonical: &str) -> Option<UnitClass> {
    match canonical {
        "M3" => Some(UnitClass::Volume),
        "M2" => Some(UnitClass::Area),
        "T" | "KG" => Some(UnitClass::Mass),
        "KS" => Some(UnitClass::Count),
        _ => None,
    }
}

/// Extract a material strength grade from free text.
///
/// Two accepted shapes, normalized to uppercase with internal whitespace
/// removed:
/// - slash form: optional 1–2 letter prefix, anchor `C`, 1–3 digits,
///   `/`, 1–3 digits — `"Beton C25/30"` → `"C25/30"`, `"lc 25/28"` →
///   `"LC25/28"`;
/// - high-range form: anchor `C` directly followed by a 3-digit value in
///   the 500–999 range, for high-performance variants — `"C500"`.
///
/// The slash form is tried first; the first match in the text wins.
pub fn extract_grade(text: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref GRADE_RE: Regex =
            Regex::new(r"(?i)\b([A-Z]{0,2}C)\s*(\d{1,3})\s*/\s*(\d{1,3})\b").unwrap();
        static ref GRADE_HIGH_RE: Regex =
            Regex::new(r"(?i)\b([A-Z]{0,2}C)\s?([5-9]\d{2})\b").unwrap();
    }

    if let Some(cap) = GRADE_RE.captures(text) {
        return Some(format!(
            "{}{}/{}",
            cap[1].to_uppercase(),
            &cap[2],
            &cap[3]
        ));
    }

    GRADE_HIGH_RE
        .captures(text)
        .map(|cap| format!("{}{}", cap[1].to_uppercase(), &cap[2]))
}

/// Whether a whole token is a catalog code: 5–6 digits with an optional
/// revision suffix (dash, letter, digits), e.g. `"317325"` or `"27453-R1"`.
pub fn is_catalog_code(token: &str) -> bool {
    lazy_static::lazy_static! {
        static ref CODE_RE: Regex = Regex::new(r"^\d{5,6}(-[A-Za-z]\d{1,3})?$").unwrap();
    }

    CODE_RE.is_match(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_volume_variants() {
        assert_eq!(normalize_unit("m3"), Some("M3"));
        assert_eq!(normalize_unit("M3"), Some("M3"));
        assert_eq!(normalize_unit("m³"), Some("M3"));
        assert_eq!(normalize_unit("m 3"), Some("M3"));
    }

    #[test]
    fn test_normalize_unit_area_mass_count() {
        assert_eq!(normalize_unit("m2"), Some("M2"));
        assert_eq!(normalize_unit("m²"), Some("M2"));
        assert_eq!(normalize_unit(" t "), Some("T"));
        assert_eq!(normalize_unit("kg"), Some("KG"));
        assert_eq!(normalize_unit("ks"), Some("KS"));
        assert_eq!(normalize_unit("kus"), Some("KS"));
    }

    #[test]
    fn test_normalize_unit_rejects_substrings() {
        // exact-token only: no unit inside longer text
        assert_eq!(normalize_unit("beton m3"), None);
        assert_eq!(normalize_unit("m33"), None);
        assert_eq!(normalize_unit("km"), None);
        assert_eq!(normalize_unit(""), None);
    }

    #[test]
    fn test_extract_grade_slash_form() {
        assert_eq!(extract_grade("Beton C30/37"), Some("C30/37".to_string()));
        assert_eq!(extract_grade("beton c 30 / 37"), Some("C30/37".to_string()));
        assert_eq!(
            extract_grade("Lehký beton LC 25/28 do bednění"),
            Some("LC25/28".to_string())
        );
    }

    #[test]
    fn test_extract_grade_high_range() {
        assert_eq!(extract_grade("Výztuž C500"), Some("C500".to_string()));
        assert_eq!(extract_grade("c 550 svařovaná"), Some("C550".to_string()));
        // below the reserved range, a bare number is not a grade
        assert_eq!(extract_grade("C300 bez lomítka"), None);
    }

    #[test]
    fn test_extract_grade_slash_wins_over_high() {
        // "C500/600" is a slash grade, not the high-range form
        assert_eq!(extract_grade("C500/600"), Some("C500/600".to_string()));
    }

    #[test]
    fn test_extract_grade_none() {
        assert_eq!(extract_grade("Bednění stěn"), None);
        assert_eq!(extract_grade("30/37 bez kotvy"), None);
        assert_eq!(extract_grade(""), None);
    }

    #[test]
    fn test_is_catalog_code() {
        assert!(is_catalog_code("317325"));
        assert!(is_catalog_code("27453"));
        assert!(is_catalog_code("317325-R1"));
        assert!(is_catalog_code(" 317325 "));
    }

    #[test]
    fn test_is_catalog_code_rejects() {
        assert!(!is_catalog_code("1234"));      // too short
        assert!(!is_catalog_code("1234567"));   // too long
        assert!(!is_catalog_code("31732a"));
        assert!(!is_catalog_code("317325-"));
        assert!(!is_catalog_code("23,570"));
    }

    #[test]
    fn test_unit_class() {
        assert_eq!(unit_class("M3"), Some(UnitClass::Volume));
        assert_eq!(unit_class("M2"), Some(UnitClass::Area));
        assert_eq!(unit_class("T"), Some(UnitClass::Mass));
        assert_eq!(unit_class("KG"), Some(UnitClass::Mass));
        assert_eq!(unit_class("KS"), Some(UnitClass::Count));
        assert_eq!(unit_class("XX"), None);
    }
}
