//! Cell renderers shared by several pages

use serde_json::Value;

use super::CURRENCY;
use crate::grid::{value_to_text, CellValue, Tone};
use crate::utils::{datetime, format};

const NOT_AVAILABLE: &str = "N/A";

/// Amount with grouped digits and the currency suffix
pub fn amount(value: &Value) -> CellValue {
    CellValue::Text(format::format_amount(value, CURRENCY))
}

/// Local date and time, `N/A` when missing
pub fn datetime(value: &Value) -> CellValue {
    match value {
        Value::String(s) if !s.is_empty() => CellValue::Text(datetime::format_display_datetime(s)),
        _ => CellValue::text(NOT_AVAILABLE),
    }
}

/// Local calendar date, `N/A` when missing
pub fn date(value: &Value) -> CellValue {
    match value {
        Value::String(s) if !s.is_empty() => CellValue::Text(datetime::format_display_date(s)),
        _ => CellValue::text(NOT_AVAILABLE),
    }
}

/// Capitalized movement type, shown as a neutral badge
pub fn movement_type(value: &Value, fallback: &str) -> CellValue {
    let text = value_to_text(value);
    let text = if text.is_empty() { fallback.to_string() } else { text };
    let mut chars = text.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    CellValue::badge(label, Tone::Neutral)
}

/// Risk score as a badge, colored by threshold
pub fn risk_score_badge(value: &Value) -> CellValue {
    let score = format::as_number(value).unwrap_or(0.0);
    let tone = if score >= 80.0 {
        Tone::Danger
    } else if score >= 50.0 {
        Tone::Warning
    } else {
        Tone::Success
    };
    CellValue::badge(format!("{}%", format::group_thousands(score)), tone)
}

/// `#<id>`
pub fn hash_id(value: &Value, fallback: &str) -> CellValue {
    let id = value_to_text(value);
    if id.is_empty() {
        CellValue::Text(format!("#{fallback}"))
    } else {
        CellValue::Text(format!("#{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movement_type_is_capitalized_badge() {
        assert_eq!(movement_type(&json!("retrait"), "Unknown"), CellValue::badge("Retrait", Tone::Neutral));
        assert_eq!(movement_type(&Value::Null, "Unknown"), CellValue::badge("Unknown", Tone::Neutral));
    }

    #[test]
    fn risk_score_thresholds() {
        assert_eq!(risk_score_badge(&json!(85)), CellValue::badge("85%", Tone::Danger));
        assert_eq!(risk_score_badge(&json!(50)), CellValue::badge("50%", Tone::Warning));
        assert_eq!(risk_score_badge(&Value::Null), CellValue::badge("0%", Tone::Success));
    }

    #[test]
    fn missing_dates_read_not_available() {
        assert_eq!(datetime(&Value::Null), CellValue::text("N/A"));
        assert_eq!(date(&json!("")), CellValue::text("N/A"));
    }
}
