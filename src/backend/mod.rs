//! Backend abstraction layer for the fraud-monitoring REST API.
//!
//! This module defines the interface the dashboard needs from the monitoring
//! service (paginated lists, statistics, the dashboard overview, alert
//! updates, parameter store and report blobs), along with the wire types and
//! error handling shared by implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::grid::Row;

pub mod factory;
pub mod http;

/// Common error types for backend operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// The paginated collections exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListResource {
    Transactions,
    Alerts,
    Reactivations,
}

impl ListResource {
    pub const ALL: [ListResource; 3] = [Self::Transactions, Self::Alerts, Self::Reactivations];

    /// URL path segment under the API base
    pub fn path(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Alerts => "alerts",
            Self::Reactivations => "reactivations",
        }
    }

    /// Key of the row array inside the response `data` envelope
    pub fn list_key(self) -> &'static str {
        self.path()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Transactions => "Transactions",
            Self::Alerts => "Alerts",
            Self::Reactivations => "Reactivations",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|resource| resource.path().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ListResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Sort direction accepted by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Query sent to a list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
    /// Only filters that carry a value
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// Flatten into query-string pairs: paging and sorting first, then filters
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
            ("sort_by".to_string(), self.sort_by.clone()),
            ("sort_order".to_string(), self.sort_order.as_str().to_string()),
        ];
        for (name, value) in &self.filters {
            if let Some(existing) = params.iter_mut().find(|(key, _)| key == name) {
                existing.1 = value.clone();
            } else {
                params.push((name.clone(), value.clone()));
            }
        }
        params
    }
}

/// Pagination counters returned with every list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

/// One page of rows and the counters that came with it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub rows: Vec<Row>,
    pub pagination: Pagination,
}

/// Aggregate counters from a statistics endpoint
pub type Statistics = Map<String, Value>;

/// Review outcome recorded on an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    #[serde(rename = "nouveau")]
    New,
    #[serde(rename = "en_cours")]
    InProgress,
    #[serde(rename = "traité")]
    Processed,
    #[serde(rename = "faux_positif")]
    FalsePositive,
}

impl AlertStatus {
    pub fn code(self) -> &'static str {
        match self {
            Self::New => "nouveau",
            Self::InProgress => "en_cours",
            Self::Processed => "traité",
            Self::FalsePositive => "faux_positif",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Processed => "Processed",
            Self::FalsePositive => "False Positive",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [Self::New, Self::InProgress, Self::Processed, Self::FalsePositive]
            .into_iter()
            .find(|status| status.code() == code)
    }
}

/// Body of an alert update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertUpdate {
    pub statut_alerte: AlertStatus,
    pub processed_by: String,
}

/// Dashboard counters and model metrics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overview {
    /// `/monitoring/dashboard-overview` counters
    pub counters: Statistics,
    /// `/monitoring/model-performance` metrics
    pub model: Statistics,
}

/// CD01 report families the server can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Alerts,
    Transactions,
    Summary,
    Operators,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [Self::Alerts, Self::Transactions, Self::Summary, Self::Operators];

    pub fn code(self) -> &'static str {
        match self {
            Self::Alerts => "alerts",
            Self::Transactions => "transactions",
            Self::Summary => "summary",
            Self::Operators => "operators",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Alerts => "Alerts Report",
            Self::Transactions => "Transactions Report",
            Self::Summary => "Executive Summary",
            Self::Operators => "Operators Report",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Body of a CD01 report generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportRequest {
    /// A report over `start..=end`; the range may not run backwards
    pub fn new(kind: ReportKind, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, BackendError> {
        if start_date > end_date {
            return Err(BackendError::InvalidData(format!(
                "report starts after it ends ({} > {})",
                start_date, end_date
            )));
        }
        Ok(Self {
            kind,
            start_date,
            end_date,
        })
    }

    /// `cd01_{type}_{start}_{end}.csv`
    pub fn file_name(&self) -> String {
        format!(
            "cd01_{}_{}_{}.csv",
            self.kind,
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

/// Parse a list response of the shape
/// `{data: {<list_key>: [...], pagination: {...}}}`.
///
/// A missing row array reads as an empty page. Missing pagination falls back
/// to the counters implied by the query and the rows received.
pub fn parse_list_envelope(body: Value, resource: ListResource, query: &ListQuery) -> Result<ListPage, BackendError> {
    let Value::Object(mut envelope) = body else {
        return Err(BackendError::InvalidData("response is not a JSON object".to_string()));
    };
    let Some(Value::Object(mut data)) = envelope.remove("data") else {
        return Err(BackendError::InvalidData("response has no data envelope".to_string()));
    };

    let rows = match data.remove(resource.list_key()) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(BackendError::InvalidData(format!(
                    "{} entry is not an object: {}",
                    resource, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(BackendError::InvalidData(format!(
                "'{}' is not an array: {}",
                resource.list_key(),
                other
            )))
        }
    };

    let pagination = match data.remove("pagination") {
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map_err(|e| BackendError::InvalidData(format!("malformed pagination: {e}")))?,
        _ => Pagination {
            page: query.page,
            per_page: query.per_page,
            total_count: rows.len() as u64,
            total_pages: u32::from(!rows.is_empty()),
        },
    };

    Ok(ListPage { rows, pagination })
}

/// Parse a `{data: {...}}` statistics response
pub fn parse_statistics_envelope(body: Value) -> Result<Statistics, BackendError> {
    match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Object(stats)) => Ok(stats),
            _ => Err(BackendError::InvalidData("statistics response has no data object".to_string())),
        },
        _ => Err(BackendError::InvalidData("statistics response is not a JSON object".to_string())),
    }
}

/// Parse a model-performance response. Metrics sit either at the top level
/// or inside a `data` object.
pub fn parse_model_performance(body: Value) -> Result<Statistics, BackendError> {
    match body {
        Value::Object(mut metrics) => match metrics.remove("data") {
            Some(Value::Object(data)) => Ok(data),
            Some(other) => {
                metrics.insert("data".to_string(), other);
                Ok(metrics)
            }
            None => Ok(metrics),
        },
        _ => Err(BackendError::InvalidData("model performance response is not a JSON object".to_string())),
    }
}

/// Interface to the monitoring service.
#[async_trait]
pub trait MonitoringBackend: Send + Sync {
    /// Base URL requests are sent to, for diagnostics
    fn base_url(&self) -> &str;

    async fn health_check(&self) -> Result<Value, BackendError>;

    // Lists and counters
    async fn fetch_list(&self, resource: ListResource, query: &ListQuery) -> Result<ListPage, BackendError>;
    async fn fetch_statistics(&self, resource: ListResource) -> Result<Statistics, BackendError>;

    // Dashboard overview
    async fn fetch_overview(&self) -> Result<Statistics, BackendError>;
    async fn fetch_model_performance(&self) -> Result<Statistics, BackendError>;

    // Alert review
    async fn update_alert(&self, alert_id: &str, update: &AlertUpdate) -> Result<(), BackendError>;

    // Parameter store
    async fn fetch_parameters(&self) -> Result<Value, BackendError>;
    async fn update_parameters(&self, batch: &Value) -> Result<Value, BackendError>;
    async fn reset_parameters(&self, request: &Value) -> Result<Value, BackendError>;

    // Server-generated files, returned verbatim
    async fn generate_report(&self, request: &ReportRequest) -> Result<Vec<u8>, BackendError>;
    async fn download_alert_details(&self, alert_id: &str) -> Result<Vec<u8>, BackendError>;
    async fn export_parameters(&self) -> Result<Vec<u8>, BackendError>;
}
