//! Transactions page

use serde_json::Value;

use super::{cells, PageDefinition, StatCard};
use crate::backend::{ListResource, SortOrder};
use crate::grid::{CellValue, Column, RowKey, Tone};
use crate::list::{FilterField, FilterSet};
use crate::utils::format;

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("id").header("Transaction ID").width(16),
        Column::new("account_number").header("Account Number").width(16),
        Column::new("account_holder").header("Account Holder").width(20),
        Column::new("date")
            .header("Date")
            .width(20)
            .render_cell(|value, _| cells::datetime(value)),
        Column::new("type")
            .header("Type")
            .width(14)
            .render_cell(|value, _| cells::movement_type(value, "")),
        Column::new("amount")
            .header("Amount")
            .width(14)
            .render_cell(|value, _| cells::amount(value)),
        Column::new("risk_level")
            .header("Risk Level")
            .width(11)
            .render_cell(|value, _| risk_level_badge(value)),
        Column::new("risk_score")
            .header("Risk Score")
            .width(10)
            .render_cell(|value, _| {
                let score = format::as_number(value).filter(|s| *s != 0.0).unwrap_or(0.0);
                CellValue::Text(format!("{}%", format::group_thousands(score)))
            }),
        Column::new("operator_name").header("Operator").width(16),
        Column::new("agency_name").header("Agency").width(16),
        Column::new("agency_city").header("City").width(12),
        Column::new("status")
            .header("Status")
            .width(10)
            .render_cell(|value, _| {
                let label = crate::grid::value_to_text(value);
                let tone = if label == "validée" { Tone::Success } else { Tone::Neutral };
                CellValue::badge(label, tone)
            }),
    ]
}

fn risk_level_badge(value: &Value) -> CellValue {
    let label = crate::grid::value_to_text(value);
    let tone = match label.as_str() {
        "High" => Tone::Danger,
        "Medium" => Tone::Warning,
        "Low" => Tone::Success,
        _ => Tone::Neutral,
    };
    CellValue::badge(label, tone)
}

pub fn filters() -> FilterSet {
    FilterSet::new(vec![
        FilterField::text("account_number", "Account Number"),
        FilterField::select(
            "transaction_type",
            "Transaction Type",
            &[
                ("retrait", "Withdrawal"),
                ("depot", "Deposit"),
                ("virement", "Transfer"),
                ("virement_national", "National Transfer"),
                ("virement_international", "International Transfer"),
                ("paiement_facture", "Bill Payment"),
                ("recharge_mobile", "Mobile Recharge"),
            ],
        ),
        FilterField::text("min_amount", "Min Amount"),
        FilterField::text("max_amount", "Max Amount"),
        FilterField::text("start_date", "Start Date"),
        FilterField::text("end_date", "End Date"),
        FilterField::select(
            "risk_level",
            "Risk Level",
            &[("High", "High Risk"), ("Medium", "Medium Risk"), ("Low", "Low Risk")],
        ),
    ])
}

pub fn page() -> PageDefinition {
    PageDefinition {
        resource: ListResource::Transactions,
        title: "Transactions",
        export_name: "transactions",
        row_key: RowKey::field("id"),
        columns: columns(),
        filters: filters(),
        sort_by: "opr_lib_date",
        sort_order: SortOrder::Desc,
        sort_fields: vec![
            ("opr_lib_date", "Date"),
            ("opr_lib_montant", "Amount"),
            ("risk_score", "Risk Score"),
        ],
        stat_cards: vec![
            StatCard::new("total", "Total"),
            StatCard::new("total_withdrawals", "Withdrawals"),
            StatCard::new("total_deposits", "Deposits"),
            StatCard::new("high_risk", "High Risk"),
        ],
    }
}
