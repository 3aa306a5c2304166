//! Number formatting helpers

use serde_json::Value;

/// Maximum number of fraction digits kept when grouping a number
const MAX_FRACTION_DIGITS: usize = 3;

/// Group the integer part of a number with commas (`1234567.5` -> `1,234,567.5`).
///
/// Fraction digits are rounded to three places and trailing zeros dropped.
pub fn group_thousands(number: f64) -> String {
    if !number.is_finite() {
        return number.to_string();
    }

    let rendered = format!("{:.*}", MAX_FRACTION_DIGITS, number.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = number < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Numeric view of a JSON value; numeric strings count as numbers
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Whether a value would read as "present" in a truthiness check:
/// not null, not false, not zero and not an empty string
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Amount with grouped digits and a currency suffix; missing amounts read as `0`
pub fn format_amount(value: &Value, currency: &str) -> String {
    let grouped = match as_number(value) {
        Some(n) => group_thousands(n),
        None => match value {
            Value::String(s) if !s.is_empty() => s.clone(),
            _ => "0".to_string(),
        },
    };
    format!("{grouped} {currency}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_integer_part() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1200.0), "1,200");
        assert_eq!(group_thousands(1234567.5), "1,234,567.5");
        assert_eq!(group_thousands(-15000.25), "-15,000.25");
    }

    #[test]
    fn amount_defaults_to_zero() {
        assert_eq!(format_amount(&Value::Null, "MAD"), "0 MAD");
        assert_eq!(format_amount(&json!(2500), "MAD"), "2,500 MAD");
        assert_eq!(format_amount(&json!("830.5"), "MAD"), "830.5 MAD");
    }

    #[test]
    fn truthiness_matches_form_semantics() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(12)));
    }
}
