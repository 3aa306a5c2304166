use chrono::NaiveDate;
use fraudwatch::backend::{ListResource, Overview, ReportKind, Statistics};
use fraudwatch::export::{derive_document, encode_records, export_headers, records_from_objects, UTF8_BOM};
use fraudwatch::grid::{display_cell, CellValue, Row, Tone};
use fraudwatch::pages::{self, StatCard};
use serde_json::{json, Value};

fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_definitions_match_resources() {
    for resource in ListResource::ALL {
        let page = pages::definition(resource);
        assert_eq!(page.resource, resource);
        assert!(!page.columns.is_empty());
        assert!(page.sort_fields.iter().any(|(field, _)| *field == page.sort_by));
        assert_eq!(page.stat_cards.len(), 4);
    }
}

#[test]
fn test_alerts_export_skips_actions() {
    let page = pages::definition(ListResource::Alerts);
    let headers = export_headers(&page.columns);
    assert!(!headers.iter().any(|h| h == "Actions"));
    assert_eq!(headers.len(), page.columns.len() - 1);
}

#[test]
fn test_transactions_export_uses_rendered_text() {
    let page = pages::definition(ListResource::Transactions);
    let rows = vec![row(json!({
        "id": "TX-1",
        "amount": 1200,
        "risk_level": "High",
        "risk_score": 87,
        "date": null
    }))];

    let records = derive_document(&rows, &page.columns).unwrap();

    assert_eq!(records[0].get("Amount"), Some(&json!("1,200 MAD")));
    assert_eq!(records[0].get("Risk Score"), Some(&json!("87%")));
    assert_eq!(records[0].get("Date"), Some(&json!("N/A")));
    // Badges export the raw field value
    assert_eq!(records[0].get("Risk Level"), Some(&json!("High")));
    assert_eq!(records[0].get("Agency"), Some(&Value::Null));
}

#[test]
fn test_alert_badges() {
    let page = pages::definition(ListResource::Alerts);
    let score = page.columns.iter().find(|c| c.field() == "score_risque").unwrap();

    assert_eq!(
        display_cell(score, &row(json!({"score_risque": 92}))),
        CellValue::badge("92%", Tone::Danger)
    );
    assert_eq!(
        display_cell(score, &row(json!({"score_risque": 60}))),
        CellValue::badge("60%", Tone::Warning)
    );
}

#[test]
fn test_sort_field_cycling() {
    let page = pages::definition(ListResource::Reactivations);
    assert_eq!(page.next_sort_field("created_at"), "days_dormant");
    assert_eq!(page.next_sort_field("amount"), "created_at");
    assert_eq!(page.next_sort_field("unknown"), "created_at");
    assert_eq!(page.sort_label("days_dormant"), "Dormancy Period");
    assert_eq!(page.sort_label("other"), "other");
}

#[test]
fn test_stat_card_values() {
    let mut stats = Statistics::new();
    stats.insert("avg_dormancy".to_string(), json!(412.6));
    stats.insert("total".to_string(), json!("15300"));

    assert_eq!(StatCard::with_suffix("avg_dormancy", "Avg Dormancy", " days").value(&stats), "413 days");
    assert_eq!(StatCard::new("total", "Total").value(&stats), "15,300");
    assert_eq!(StatCard::new("high_risk", "High Risk").value(&stats), "0");
}

#[test]
fn test_page_controller_uses_defaults() {
    let page = pages::definition(ListResource::Alerts);
    let controller = page.controller(20);

    assert_eq!(controller.resource(), ListResource::Alerts);
    assert_eq!(controller.per_page(), 20);
    assert_eq!(controller.sort_by(), "created_at");
    assert_eq!(controller.filters().len(), page.filters.len());
}

#[test]
fn test_report_form_builds_request() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let mut form = pages::reports::form(today);
    form.field_mut(0).unwrap().cycle_choice();

    let request = pages::reports::request(&form).unwrap();
    assert_eq!(request.kind, ReportKind::Transactions);
    assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 2, 12).unwrap());
    assert_eq!(request.end_date, today);
    assert_eq!(request.file_name(), "cd01_transactions_2025-02-12_2025-03-14.csv");
}

#[test]
fn test_report_form_rejects_bad_input() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    let mut form = pages::reports::form(today);
    form.set(pages::reports::FIELD_START, Some("14/03/2025".to_string()));
    assert!(pages::reports::request(&form).unwrap_err().contains("14/03/2025"));

    let mut form = pages::reports::form(today);
    form.set(pages::reports::FIELD_START, Some("2025-04-01".to_string()));
    assert!(pages::reports::request(&form).is_err());

    let mut form = pages::reports::form(today);
    form.set(pages::reports::FIELD_TYPE, None);
    assert!(pages::reports::request(&form).is_err());
}

#[test]
fn test_overview_card_precision() {
    let stats: Statistics = json!({"accuracy": 94.26, "avg_transaction_amount": "1534.256"})
        .as_object()
        .cloned()
        .unwrap();
    let cards = pages::overview::MODEL_CARDS;
    assert_eq!(cards[0].value(&stats), "94.3%");
    assert_eq!(cards[1].value(&stats), "0%");
    assert_eq!(pages::overview::COUNTER_CARDS[5].value(&stats), "1,534.26 MAD");
}

#[test]
fn test_overview_export_matches_cards() {
    let overview = Overview {
        counters: json!({"total_transactions": 12543}).as_object().cloned().unwrap(),
        model: json!({"recall": 88.5}).as_object().cloned().unwrap(),
    };
    let records = records_from_objects(&pages::overview::metric_rows(&overview));
    assert_eq!(records.len(), 10);

    let text = String::from_utf8(encode_records(&records).unwrap()).unwrap();
    let body = text.strip_prefix(UTF8_BOM).unwrap();
    assert!(body.starts_with("Section,Metric,Value\nActivity,Total Transactions,\"12,543\"\n"));
    assert!(body.contains("Model,Recall,88.5%\n"));
    assert!(body.contains("Activity,Avg Amount,0 MAD\n"));
}
