use fraudwatch::grid::{display_cell, export_value, value_to_text, CellValue, Column, Row, RowKey, Tone};
use serde_json::{json, Value};

fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_header_defaults_to_field() {
    let column = Column::new("account_number");
    assert_eq!(column.header_name(), "account_number");

    let column = Column::new("account_number").header("Account");
    assert_eq!(column.header_name(), "Account");
}

#[test]
fn test_display_prefers_renderer_then_formatter() {
    let r = row(json!({"amount": 1200}));

    let plain = Column::new("amount");
    assert_eq!(display_cell(&plain, &r), CellValue::text("1200"));

    let formatted = Column::new("amount").value_formatter(|v| format!("{} MAD", value_to_text(v)));
    assert_eq!(display_cell(&formatted, &r), CellValue::text("1200 MAD"));

    let rendered = Column::new("amount")
        .value_formatter(|_| "formatted".to_string())
        .render_cell(|_, _| CellValue::badge("big", Tone::Danger));
    assert_eq!(display_cell(&rendered, &r), CellValue::badge("big", Tone::Danger));
}

#[test]
fn test_export_precedence() {
    let r = row(json!({"status": "nouveau", "score": 91}));

    // Formatter wins over renderer
    let column = Column::new("status")
        .value_formatter(|_| "New".to_string())
        .render_cell(|_, _| CellValue::text("rendered"));
    assert_eq!(export_value(&column, &r), json!("New"));

    // Text renderer output is exported
    let column = Column::new("score").render_cell(|v, _| CellValue::text(format!("{}%", value_to_text(v))));
    assert_eq!(export_value(&column, &r), json!("91%"));

    // Badge falls back to the raw value
    let column = Column::new("status").render_cell(|_, _| CellValue::badge("New", Tone::Info));
    assert_eq!(export_value(&column, &r), json!("nouveau"));

    assert_eq!(export_value(&Column::new("score"), &r), json!(91));
}

#[test]
fn test_missing_field_reads_as_null() {
    let r = row(json!({"id": 1}));

    assert_eq!(display_cell(&Column::new("missing"), &r), CellValue::text(""));
    assert_eq!(export_value(&Column::new("missing"), &r), Value::Null);

    let formatted = Column::new("missing").value_formatter(|v| if v.is_null() { "N/A".into() } else { "x".into() });
    assert_eq!(export_value(&formatted, &r), json!("N/A"));
}

#[test]
fn test_renderer_sees_whole_row() {
    let r = row(json!({"first": "Amina", "last": "Benali"}));
    let column = Column::new("first")
        .render_cell(|v, row| CellValue::text(format!("{} {}", value_to_text(v), value_to_text(&row["last"]))));
    assert_eq!(display_cell(&column, &r).display_text(), "Amina Benali");
}

#[test]
fn test_actions_column() {
    let column = Column::actions("Actions");
    assert!(column.is_actions());
    assert_eq!(column.header_name(), "Actions");
    assert!(!Column::new("id").is_actions());
}

#[test]
fn test_custom_row_key() {
    let key = RowKey::custom("account and date", |row: &Row| {
        let account = row.get("account")?.as_str()?;
        let date = row.get("date")?.as_str()?;
        Some(format!("{account}@{date}"))
    });

    assert_eq!(
        key.key_of(&row(json!({"account": "A1", "date": "2025-01-01"}))),
        Some("A1@2025-01-01".to_string())
    );
    assert_eq!(key.key_of(&row(json!({"account": "A1"}))), None);

    let keyed = key.partition(vec![
        row(json!({"account": "A1", "date": "d1"})),
        row(json!({"account": "A1"})),
        row(json!({"account": "A2", "date": "d1"})),
    ]);
    assert_eq!(keyed.keys, vec!["A1@d1", "A2@d1"]);
    assert_eq!(keyed.rejected.len(), 1);
}
