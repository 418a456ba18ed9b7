//! End-to-end extraction tests over synthetic BOQ row sequences.

use boq_extract::types::QuantityStrategy;
use boq_extract::{extract, CellValue, ExtractionMode, Row, WorkCategory};

fn item_row(code: &str, description: &str, quantity: &str, unit: &str) -> Row {
    Row::new()
        .with("Kód", code)
        .with("Popis", description)
        .with("Množství", quantity)
        .with("MJ", unit)
}

#[test]
fn test_exhaustive_three_row_scenario() {
    let rows = vec![
        Row::new()
            .with("Kód", "317325")
            .with("Popis", "Beton základové desky C25/30")
            .with("Množství", "23,570")
            .with("MJ", "m3"),
        Row::new().with("Typ", "D").with("Popis", "Svislé konstrukce"),
        Row::new()
            .with("Popis", "Bednění stěn základové vany")
            .with("MJ", "m2")
            .with("Množství", "150,0"),
    ];

    let result = extract(&rows, &ExtractionMode::Exhaustive);

    assert_eq!(result.records.len(), 2, "exactly two work items expected");
    assert_eq!(result.rejected_count(), 1, "the header row must be counted");

    let concrete = &result.records[0];
    assert_eq!(concrete.category, WorkCategory::BulkMaterial);
    assert_eq!(concrete.quantity, 23.57);
    assert_eq!(concrete.unit, "M3");
    assert_eq!(concrete.classification_grade.as_deref(), Some("C25/30"));
    assert_eq!(concrete.classification_code.as_deref(), Some("317325"));

    let formwork = &result.records[1];
    assert_eq!(formwork.category, WorkCategory::AreaWork);
    assert_eq!(formwork.quantity, 150.0);
    assert_eq!(formwork.unit, "M2");
    assert_eq!(formwork.classification_grade, None);
}

#[test]
fn test_named_quantity_column_takes_precedence() {
    // a decoy value sits right before the unit cell; the named column
    // must still win
    let row = Row::new()
        .with("Popis", "Zdivo nosné z cihel pálených")
        .with("Množství", "55,250")
        .with("Odhad", "12,0")
        .with("MJ", "m3");

    let result = extract(&[row], &ExtractionMode::AutoDetect);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].quantity, 55.25);
    assert_eq!(
        result.records[0].extraction_strategy,
        QuantityStrategy::NamedColumn
    );
}

#[test]
fn test_total_price_derived_within_tolerance() {
    let row = Row::new()
        .with("Popis", "Beton základové desky C25/30")
        .with("Množství", "23,570")
        .with("MJ", "m3")
        .with("J.cena", "2 450,00");

    let result = extract(&[row], &ExtractionMode::AutoDetect);
    let record = &result.records[0];

    assert_eq!(record.unit_price, Some(2450.0));
    let total = record.total_price.expect("total must be derived");
    assert!(
        (total - 2450.0 * 23.57).abs() < 1e-6,
        "total {} does not match unit_price × quantity",
        total
    );
}

#[test]
fn test_unit_price_derived_from_total() {
    let row = Row::new()
        .with("Popis", "Výztuž základových desek ze svařovaných sítí")
        .with("Množství", "2,000")
        .with("MJ", "t")
        .with("Cena celkem", "49 000,00");

    let result = extract(&[row], &ExtractionMode::AutoDetect);
    let record = &result.records[0];

    assert_eq!(record.total_price, Some(49_000.0));
    let unit_price = record.unit_price.expect("unit price must be derived");
    assert!((unit_price - 24_500.0).abs() < 1e-6);
    assert_eq!(record.category, WorkCategory::MassWork);
}

#[test]
fn test_idempotence() {
    let rows = vec![
        item_row("317325", "Beton základové desky C25/30", "23,570", "m3"),
        Row::new().with("Typ", "D").with("Popis", "Zakládání"),
        item_row("273354", "Bednění základových desek", "41,200", "m2"),
        Row::new().with("Poznámka", "mezisoučet"),
    ];

    let first = extract(&rows, &ExtractionMode::AutoDetect);
    let second = extract(&rows, &ExtractionMode::AutoDetect);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_code_only_row_rejected_not_zero_filled() {
    // description and a 6-digit code, but no unit and no plausible
    // quantity: must be skipped, never emitted with quantity 0
    let rows = vec![Row::new()
        .with("Kód", "317325")
        .with("Popis", "Beton základové desky C25/30")];

    let result = extract(&rows, &ExtractionMode::AutoDetect);
    assert!(result.records.is_empty());
    assert_eq!(result.rejected_count(), 1);
}

#[test]
fn test_grade_variants_end_to_end() {
    let rows = vec![
        item_row("317325", "Beton C30/37 do základových pasů", "10,500", "m3"),
        item_row("317326", "beton c 30 / 37 se sníženou teplotou", "8,250", "m3"),
    ];

    let result = extract(&rows, &ExtractionMode::AutoDetect);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].classification_grade.as_deref(), Some("C30/37"));
    assert_eq!(result.records[1].classification_grade.as_deref(), Some("C30/37"));
}

#[test]
fn test_locale_numbers_end_to_end() {
    let rows = vec![
        item_row("111111", "Výkop jam nezapažených v hornině", "2 832,000", "m3"),
        item_row("222222", "Násyp pod základové konstrukce", "204,646", "m3"),
    ];

    let result = extract(&rows, &ExtractionMode::AutoDetect);
    assert_eq!(result.records[0].quantity, 2832.0);
    assert_eq!(result.records[1].quantity, 204.646);
}

#[test]
fn test_rows_from_json_input() {
    // hosts deliver rows as JSON; untagged cell values map directly
    let rows: Vec<Row> = serde_json::from_str(
        r#"[
            [["Kód", "317325"],
             ["Popis", "Beton základové desky C25/30"],
             ["Množství", "23,570"],
             ["MJ", "m3"],
             ["Pozn", null]]
        ]"#,
    )
    .expect("rows parse");

    assert_eq!(rows[0].get("Pozn"), Some(&CellValue::Empty));

    let result = extract(&rows, &ExtractionMode::AutoDetect);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].quantity, 23.57);
}

#[test]
fn test_summary_totals_by_category() {
    let rows = vec![
        item_row("317325", "Beton základové desky C25/30", "23,570", "m3"),
        item_row("311321", "Zdivo nosné z cihel pálených", "55,000", "m3"),
        item_row("273354", "Bednění základových desek", "41,200", "m2"),
        item_row("273321", "Výztuž základových desek", "1,250", "t"),
        Row::new().with("Typ", "D").with("Popis", "Součet oddílu"),
    ];

    let result = extract(&rows, &ExtractionMode::AutoDetect);

    let bulk = &result.summary.by_category[&WorkCategory::BulkMaterial];
    assert_eq!(bulk.count, 2);
    assert!((bulk.total_quantity - 78.57).abs() < 1e-9);

    let area = &result.summary.by_category[&WorkCategory::AreaWork];
    assert_eq!(area.count, 1);
    assert!((area.total_quantity - 41.2).abs() < 1e-9);

    let mass = &result.summary.by_category[&WorkCategory::MassWork];
    assert_eq!(mass.count, 1);

    assert_eq!(result.summary.rejected_rows, 1);
}

#[test]
fn test_mixed_column_layouts_in_one_run() {
    // two different authors, two different layouts in the same sequence
    let rows = vec![
        item_row("317325", "Beton základové desky C25/30", "23,570", "m3"),
        Row::new()
            .with("Položka", "Zdivo nosné z cihel pálených P15")
            .with("Výměra", "55,000")
            .with("Jednotka", "m3"),
    ];

    let result = extract(&rows, &ExtractionMode::AutoDetect);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[1].quantity, 55.0);
    assert_eq!(result.records[1].unit, "M3");
}
