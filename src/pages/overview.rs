//! Dashboard overview: activity counters and model metrics

use serde_json::{json, Value};

use super::StatCard;
use crate::backend::Overview;

/// Base name of overview exports
pub const EXPORT_NAME: &str = "dashboard_overview";

/// `/monitoring/dashboard-overview` counters, two rows of three
pub const COUNTER_CARDS: [StatCard; 6] = [
    StatCard::new("total_transactions", "Total Transactions"),
    StatCard::new("flagged_transactions", "Flagged Transactions"),
    StatCard::new("processed_alerts", "Processed Alerts"),
    StatCard::new("total_alerts", "Total Alerts"),
    StatCard::new("total_reactivations", "Reactivations"),
    StatCard::with_suffix("avg_transaction_amount", "Avg Amount", " MAD").with_decimals(2),
];

/// `/monitoring/model-performance` metrics
pub const MODEL_CARDS: [StatCard; 4] = [
    StatCard::with_suffix("accuracy", "Accuracy", "%").with_decimals(1),
    StatCard::with_suffix("precision", "Precision", "%").with_decimals(1),
    StatCard::with_suffix("recall", "Recall", "%").with_decimals(1),
    StatCard::with_suffix("f1_score", "F1 Score", "%").with_decimals(1),
];

/// One `{Section, Metric, Value}` object per card, values as displayed
pub fn metric_rows(overview: &Overview) -> Vec<Value> {
    let activity = COUNTER_CARDS.iter().map(|card| ("Activity", card, &overview.counters));
    let model = MODEL_CARDS.iter().map(|card| ("Model", card, &overview.model));

    activity
        .chain(model)
        .map(|(section, card, statistics)| {
            json!({
                "Section": section,
                "Metric": card.label,
                "Value": card.value(statistics),
            })
        })
        .collect()
}
