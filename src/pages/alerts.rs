//! Fraud alerts page

use serde_json::Value;

use super::{cells, PageDefinition, StatCard};
use crate::backend::{AlertStatus, ListResource, SortOrder};
use crate::grid::{value_to_text, CellValue, Column, RowKey, Tone};
use crate::list::{FilterField, FilterSet};
use crate::utils::format;

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("alert_id")
            .header("Alert ID")
            .width(9)
            .render_cell(|value, _| cells::hash_id(value, "N/A")),
        Column::new("numero_compte").header("Account").width(14),
        Column::new("nom_titulaire").header("Account Holder").width(18),
        Column::new("type_mouvement")
            .header("Transaction Type")
            .width(14)
            .render_cell(|value, _| cells::movement_type(value, "Unknown")),
        Column::new("montant_recent")
            .header("Amount")
            .width(14)
            .render_cell(|value, _| cells::amount(value)),
        Column::new("duree_inactivite_jours")
            .header("Dormancy")
            .width(10)
            .render_cell(|value, _| {
                let days = if format::is_truthy(value) { value_to_text(value) } else { "0".to_string() };
                CellValue::Text(format!("{days} days"))
            }),
        Column::new("score_risque")
            .header("Risk Score")
            .width(10)
            .render_cell(|value, _| cells::risk_score_badge(value)),
        Column::new("priorite")
            .header("Priority")
            .width(10)
            .render_cell(|value, _| priority_badge(value)),
        Column::new("statut_alerte")
            .header("Status")
            .width(14)
            .render_cell(|value, _| status_badge(value)),
        Column::new("agency_name").header("Agency").width(14),
        Column::new("created_at")
            .header("Created")
            .width(20)
            .render_cell(|value, _| cells::datetime(value)),
        Column::actions("Actions")
            .width(9)
            .render_cell(|_, _| CellValue::badge("Details", Tone::Info)),
    ]
}

fn priority_badge(value: &Value) -> CellValue {
    let priority = match value_to_text(value) {
        p if p.is_empty() => "NORMALE".to_string(),
        p => p,
    };
    let tone = match priority.to_uppercase().as_str() {
        "CRITIQUE" => Tone::Danger,
        "ÉLEVÉE" => Tone::Warning,
        _ => Tone::Success,
    };
    CellValue::badge(priority, tone)
}

fn status_badge(value: &Value) -> CellValue {
    let code = value_to_text(value);
    match AlertStatus::from_code(&code) {
        Some(status) => {
            let tone = match status {
                AlertStatus::New => Tone::Info,
                AlertStatus::InProgress => Tone::Warning,
                AlertStatus::Processed => Tone::Success,
                AlertStatus::FalsePositive => Tone::Neutral,
            };
            CellValue::badge(status.label(), tone)
        }
        None if code.is_empty() => CellValue::badge("Unknown", Tone::Neutral),
        None => CellValue::badge(code, Tone::Neutral),
    }
}

pub fn filters() -> FilterSet {
    FilterSet::new(vec![
        FilterField::select(
            "status",
            "Status",
            &[
                ("nouveau", "New"),
                ("en_cours", "In Progress"),
                ("traité", "Processed"),
                ("faux_positif", "False Positive"),
            ],
        ),
        FilterField::select(
            "priority",
            "Priority",
            &[
                ("CRITIQUE", "Critical"),
                ("ÉLEVÉE", "High"),
                ("NORMALE", "Normal"),
                ("BASSE", "Low"),
            ],
        ),
        FilterField::text("min_score", "Min Risk Score"),
        FilterField::text("max_score", "Max Risk Score"),
        FilterField::select(
            "fraud_type",
            "Fraud Type",
            &[
                ("fraude_montant", "Amount Fraud"),
                ("fraude_geographique", "Geographic Fraud"),
                ("fraude_temporelle", "Temporal Fraud"),
                ("reactivation_suspecte", "Suspicious Reactivation"),
            ],
        ),
        FilterField::text("start_date", "Start Date"),
        FilterField::text("end_date", "End Date"),
    ])
}

pub fn page() -> PageDefinition {
    PageDefinition {
        resource: ListResource::Alerts,
        title: "Fraud Alerts",
        export_name: "fraud_alerts",
        row_key: RowKey::field("alert_id"),
        columns: columns(),
        filters: filters(),
        sort_by: "created_at",
        sort_order: SortOrder::Desc,
        sort_fields: vec![
            ("created_at", "Creation Date"),
            ("score_risque", "Risk Score"),
            ("montant_recent", "Amount"),
            ("duree_inactivite_jours", "Dormancy Days"),
            ("priorite", "Priority"),
        ],
        stat_cards: vec![
            StatCard::new("new", "New Alerts"),
            StatCard::new("critical", "Critical Priority"),
            StatCard::new("high", "High Priority"),
            StatCard::new("processed_today", "Processed Today"),
        ],
    }
}
