use chrono::NaiveDate;
use fraudwatch::export::{
    derive_document, encode_records, export_file_name, export_headers, records_from_objects, write_csv_dated,
    write_file, ExportError, ExportRecord, GridExporter, UTF8_BOM,
};
use fraudwatch::grid::{value_to_text, CellValue, Column, Row, Tone};
use serde_json::{json, Value};
use tempfile::TempDir;

fn rows(values: Value) -> Vec<Row> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

fn account_columns() -> Vec<Column> {
    vec![
        Column::new("account").header("Account"),
        Column::new("amount").header("Amount").value_formatter(|v| {
            let amount = if v.is_null() { "0".to_string() } else { value_to_text(v) };
            format!("{} MAD", amount)
        }),
        Column::actions("Actions").render_cell(|_, _| CellValue::badge("Details", Tone::Info)),
    ]
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

#[test]
fn test_export_matches_displayed_values() {
    let data = rows(json!([{"account": "A1", "amount": 1200}, {"account": "A2", "amount": null}]));
    let records = derive_document(&data, &account_columns()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Amount"), Some(&json!("1200 MAD")));
    assert_eq!(records[1].get("Amount"), Some(&json!("0 MAD")));
}

#[test]
fn test_actions_excluded_and_order_kept() {
    let columns = account_columns();
    assert_eq!(export_headers(&columns), vec!["Account", "Amount"]);

    let data = rows(json!([{"account": "B"}, {"account": "A"}, {"account": "C"}]));
    let records = derive_document(&data, &columns).unwrap();
    let keys: Vec<&str> = records[0].keys().collect();
    assert_eq!(keys, vec!["Account", "Amount"]);

    let accounts: Vec<&Value> = records.iter().filter_map(|r| r.get("Account")).collect();
    assert_eq!(accounts, vec![&json!("B"), &json!("A"), &json!("C")]);
}

#[test]
fn test_accounts_scenario() {
    let dir = TempDir::new().unwrap();
    let data = rows(json!([{"account": "A1", "amount": 1200}, {"account": "A2", "amount": null}]));
    let records = derive_document(&data, &account_columns()).unwrap();

    let path = write_csv_dated(&records, "accounts", dir.path(), date()).unwrap().unwrap();
    assert_eq!(path.file_name().unwrap(), "accounts_2025-03-14.csv");

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, format!("{}Account,Amount\nA1,1200 MAD\nA2,0 MAD\n", UTF8_BOM));
}

#[test]
fn test_escaping_round_trip() {
    let tricky = ["plain", "with, comma", "with \"quotes\"", "multi\nline", ""];
    let data: Vec<Row> = tricky
        .iter()
        .enumerate()
        .map(|(i, text)| json!({"id": i, "note": text}).as_object().cloned().unwrap())
        .collect();
    let columns = vec![Column::new("id").header("ID"), Column::new("note").header("Note")];

    let bytes = encode_records(&derive_document(&data, &columns).unwrap()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let body = text.strip_prefix(UTF8_BOM).unwrap();
    assert!(body.contains("\"with \"\"quotes\"\"\""));
    assert!(body.starts_with("ID,Note\n0,plain\n"));

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["ID", "Note"]);

    let notes: Vec<String> = reader.records().map(|r| r.unwrap()[1].to_string()).collect();
    assert_eq!(notes, tricky);
}

#[test]
fn test_single_column_empty_cell_is_empty_line() {
    let data = rows(json!([{"note": "x"}, {"note": null}, {"note": ""}, {"note": "y"}]));
    let columns = vec![Column::new("note").header("Note")];

    let bytes = encode_records(&derive_document(&data, &columns).unwrap()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, format!("{}Note\nx\n\n\ny\n", UTF8_BOM));
}

#[test]
fn test_nested_values_as_compact_json() {
    let record: ExportRecord = vec![("meta", json!({"a": [1, 2]})), ("flag", json!(true))]
        .into_iter()
        .collect();
    let text = String::from_utf8(encode_records(&[record]).unwrap()).unwrap();
    assert!(text.ends_with("meta,flag\n\"{\"\"a\"\":[1,2]}\",true\n"));
}

#[test]
fn test_empty_export_guard() {
    let dir = TempDir::new().unwrap();
    let exporter = GridExporter::new(dir.path());
    let empty: Vec<Row> = Vec::new();

    assert!(matches!(
        exporter.export(None, &account_columns(), "accounts"),
        Err(ExportError::NoData)
    ));
    assert!(matches!(
        exporter.export(Some(empty.as_slice()), &account_columns(), "accounts"),
        Err(ExportError::NoData)
    ));
    assert!(write_csv_dated(&[], "accounts", dir.path(), date()).unwrap().is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_exporter_writes_into_directory() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("exports");
    let exporter = GridExporter::new(&target);

    let data = rows(json!([{"account": "A1", "amount": 5}]));
    let path = exporter.export(Some(&data), &account_columns(), "accounts").unwrap();

    assert!(path.starts_with(&target));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("accounts_") && name.ends_with(".csv"));
    // No staging files left behind
    assert_eq!(std::fs::read_dir(&target).unwrap().count(), 1);
}

#[test]
fn test_export_is_deterministic() {
    let data = rows(json!([{"account": "A1", "amount": 1}, {"account": "A2", "amount": 2}]));
    let first = encode_records(&derive_document(&data, &account_columns()).unwrap()).unwrap();
    let second = encode_records(&derive_document(&data, &account_columns()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_write_file_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = write_file(b"raw,report\n1,2\n", "parameters_2025-03-14.csv", dir.path()).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"raw,report\n1,2\n");
}

#[test]
fn test_records_from_objects() {
    let records = records_from_objects(&[json!({"b": 1, "a": 2}), json!("skip me"), json!({"b": 3})]);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["b", "a"]);

    let text = String::from_utf8(encode_records(&records).unwrap()).unwrap();
    assert_eq!(text, format!("{}b,a\n1,2\n3,\n", UTF8_BOM));
}

#[test]
fn test_export_file_name() {
    assert_eq!(export_file_name("alerts", date()), "alerts_2025-03-14.csv");
}
