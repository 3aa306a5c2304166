//! Account reactivations page

use serde_json::Value;

use super::{cells, PageDefinition, StatCard};
use crate::backend::{ListResource, SortOrder};
use crate::grid::{value_to_text, CellValue, Column, RowKey, Tone};
use crate::list::{FilterField, FilterSet};
use crate::utils::format;

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("reactivation_id")
            .header("ID")
            .width(8)
            .render_cell(|value, _| cells::hash_id(value, "")),
        Column::new("account_id").header("Account").width(14),
        Column::new("client_name").header("Client Name").width(18),
        Column::new("transaction_date")
            .header("Reactivation Date")
            .width(12)
            .render_cell(|value, _| cells::date(value)),
        Column::new("transaction_type")
            .header("Transaction Type")
            .width(14)
            .render_cell(|value, _| cells::movement_type(value, "")),
        Column::new("amount")
            .header("Amount")
            .width(14)
            .render_cell(|value, _| cells::amount(value)),
        Column::new("days_dormant")
            .header("Dormancy Period")
            .width(12)
            .render_cell(|value, _| dormancy_badge(value)),
        Column::new("risk_level")
            .header("Risk Level")
            .width(10)
            .render_cell(|value, _| risk_level_badge(value)),
        Column::new("risk_score")
            .header("Risk Score")
            .width(10)
            .render_cell(|value, _| cells::risk_score_badge(value)),
        Column::new("alert_generated")
            .header("Alert")
            .width(10)
            .render_cell(|value, _| {
                if format::is_truthy(value) {
                    CellValue::badge("Generated", Tone::Danger)
                } else {
                    CellValue::badge("No Alert", Tone::Neutral)
                }
            }),
        Column::new("agency_name").header("Agency").width(14),
        Column::new("operator_name").header("Operator").width(14),
    ]
}

/// Dormancy in days, coarsened to months past 180 days and years past 365
fn dormancy_badge(value: &Value) -> CellValue {
    let Some(days) = format::as_number(value) else {
        return CellValue::badge(format!("{} days", value_to_text(value)), Tone::Neutral);
    };
    if days >= 365.0 {
        CellValue::badge(format!("{}+ years", (days / 365.0).floor()), Tone::Danger)
    } else if days >= 180.0 {
        CellValue::badge(format!("{} months", (days / 30.0).floor()), Tone::Warning)
    } else {
        CellValue::badge(format!("{} days", format::group_thousands(days)), Tone::Neutral)
    }
}

fn risk_level_badge(value: &Value) -> CellValue {
    let label = value_to_text(value);
    let tone = match label.as_str() {
        "HIGH" => Tone::Danger,
        "MEDIUM" => Tone::Warning,
        _ => Tone::Success,
    };
    CellValue::badge(label, tone)
}

pub fn filters() -> FilterSet {
    FilterSet::new(vec![
        FilterField::text("account_id", "Account ID"),
        FilterField::select(
            "risk_level",
            "Risk Level",
            &[("HIGH", "High"), ("MEDIUM", "Medium"), ("LOW", "Low")],
        ),
        FilterField::text("min_dormancy", "Min Dormancy (days)"),
        FilterField::text("max_dormancy", "Max Dormancy (days)"),
        FilterField::text("start_date", "Start Date"),
        FilterField::text("end_date", "End Date"),
        FilterField::select("alert_generated", "Alert Generated", &[("true", "Yes"), ("false", "No")]),
    ])
}

pub fn page() -> PageDefinition {
    PageDefinition {
        resource: ListResource::Reactivations,
        title: "Account Reactivations",
        export_name: "reactivations",
        row_key: RowKey::field("reactivation_id"),
        columns: columns(),
        filters: filters(),
        sort_by: "created_at",
        sort_order: SortOrder::Desc,
        sort_fields: vec![
            ("created_at", "Date"),
            ("days_dormant", "Dormancy Period"),
            ("risk_score", "Risk Score"),
            ("amount", "Amount"),
        ],
        stat_cards: vec![
            StatCard::new("total", "Total Reactivations"),
            StatCard::new("high_risk", "High Risk"),
            StatCard::new("alerts_generated", "Alerts Generated"),
            StatCard::with_suffix("avg_dormancy", "Avg Dormancy", " days"),
        ],
    }
}
