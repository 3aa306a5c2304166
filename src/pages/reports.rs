//! CD01 report form
//!
//! The form is an ordinary [`FilterSet`] so it edits like the filter dialog:
//! a report type to cycle through and two free-text dates.

use chrono::{Days, NaiveDate};

use crate::backend::{ReportKind, ReportRequest};
use crate::list::{FilterField, FilterSet};
use crate::utils::datetime;

/// Days covered by the preselected range
pub const DEFAULT_RANGE_DAYS: u64 = 30;

pub const FIELD_TYPE: &str = "type";
pub const FIELD_START: &str = "start_date";
pub const FIELD_END: &str = "end_date";

fn with_default(field: FilterField, value: String) -> FilterField {
    FilterField {
        default: Some(value),
        ..field
    }
}

/// Alerts report over the last 30 days ending `today`
pub fn form(today: NaiveDate) -> FilterSet {
    let choices: Vec<(&str, &str)> = ReportKind::ALL.iter().map(|kind| (kind.code(), kind.label())).collect();
    let start = today.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS)).unwrap_or(today);

    FilterSet::new(vec![
        with_default(
            FilterField::select(FIELD_TYPE, "Report", &choices),
            ReportKind::Alerts.code().to_string(),
        ),
        with_default(FilterField::text(FIELD_START, "Start date"), datetime::format_ymd(start)),
        with_default(FilterField::text(FIELD_END, "End date"), datetime::format_ymd(today)),
    ])
}

fn date_field(form: &FilterSet, name: &str, label: &str) -> Result<NaiveDate, String> {
    let value = form.get(name).unwrap_or_default().trim();
    datetime::parse_date(value).map_err(|_| format!("{} '{}' is not a YYYY-MM-DD date", label, value))
}

/// Read a filled-in form back as a request
pub fn request(form: &FilterSet) -> Result<ReportRequest, String> {
    let kind = form
        .get(FIELD_TYPE)
        .and_then(ReportKind::from_code)
        .ok_or_else(|| "choose a report type".to_string())?;
    let start = date_field(form, FIELD_START, "Start date")?;
    let end = date_field(form, FIELD_END, "End date")?;
    ReportRequest::new(kind, start, end).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_ends_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let form = form(today);
        assert_eq!(form.get(FIELD_TYPE), Some("alerts"));
        assert_eq!(form.get(FIELD_START), Some("2025-02-12"));
        assert_eq!(form.get(FIELD_END), Some("2025-03-14"));
    }
}
