//! Work classification
//!
//! Maps a unit plus description keywords to a work category. The unit is
//! authoritative when its class is unambiguous; count units and missing
//! units fall back to a keyword scan over the description.

use crate::config::EngineConfig;
use crate::patterns::{unit_class, UnitClass};
use crate::types::WorkCategory;

/// Classify a work item by its canonical unit and description text.
pub fn classify(unit: &str, description: &str, config: &EngineConfig) -> WorkCategory {
    match unit_class(unit) {
        Some(UnitClass::Volume) => WorkCategory::BulkMaterial,
        Some(UnitClass::Area) => WorkCategory::AreaWork,
        Some(UnitClass::Mass) => WorkCategory::MassWork,
        Some(UnitClass::Count) | None => classify_by_keywords(description, config),
    }
}

fn classify_by_keywords(description: &str, config: &EngineConfig) -> WorkCategory {
    if config.has_reinforcement_keyword(description) {
        return WorkCategory::MassWork;
    }
    if config.has_formwork_keyword(description) {
        return WorkCategory::AreaWork;
    }
    if config.has_description_keyword(description) {
        return WorkCategory::BulkMaterial;
    }
    WorkCategory::Other
}
