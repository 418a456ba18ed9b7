//! BOQ Extraction Engine
//!
//! Recovers structured work-item records from heterogeneous
//! bill-of-quantities spreadsheet rows: inconsistent column layouts,
//! locale-formatted numbers, free-text units. Input rows arrive already
//! parsed as ordered column-key/value mappings; the engine is a pure,
//! synchronous transformation with no I/O, so hosts can run invocations
//! in parallel freely.
//!
//! ## Pipeline
//! 1. Column role detection — which cell plays which semantic role
//! 2. Quantity resolution — ordered strategy chain with scoring fallback
//! 3. Price reconciliation — derive the missing of unit/total price
//! 4. Work classification — unit-first, keyword fallback
//!
//! Malformed rows degrade to counted rejections; a run never aborts.

pub mod classifier;
pub mod config;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod numeric;
pub mod patterns;
pub mod price;
pub mod quantity;
pub mod types;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use extractor::{extract, Extractor};
pub use numeric::parse_number;
pub use types::{
    CellValue, ExtractionMode, ExtractionResult, ExtractionSummary, QuantityStrategy,
    RejectReason, RejectedRow, Row, RowOutcome, WorkCategory, WorkItemRecord,
};
