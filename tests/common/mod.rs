//! Shared test doubles.

#![allow(dead_code)]

use async_trait::async_trait;
use fraudwatch::backend::{
    AlertUpdate, BackendError, ListPage, ListQuery, ListResource, MonitoringBackend, Pagination, ReportRequest,
    Statistics,
};
use fraudwatch::grid::Row;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

/// Backend that records every list query and answers with canned rows
pub struct RecordingBackend {
    queries: Mutex<Vec<ListQuery>>,
    rows: Vec<Row>,
    total_pages: u32,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingBackend {
    pub fn new(rows: Value, total_pages: u32) -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            rows: rows
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_object().cloned().unwrap())
                .collect(),
            total_pages,
            fail: false,
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(json!([]), 0)
        }
    }

    /// Answer every list and statistics request after `delay`
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn last_query(&self) -> ListQuery {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl MonitoringBackend for RecordingBackend {
    fn base_url(&self) -> &str {
        "memory://"
    }

    async fn health_check(&self) -> Result<Value, BackendError> {
        Ok(json!({"status": "ok"}))
    }

    async fn fetch_list(&self, _resource: ListResource, query: &ListQuery) -> Result<ListPage, BackendError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(BackendError::Timeout(30));
        }
        Ok(ListPage {
            rows: self.rows.clone(),
            pagination: Pagination {
                page: query.page,
                per_page: query.per_page,
                total_count: self.rows.len() as u64,
                total_pages: self.total_pages,
            },
        })
    }

    async fn fetch_statistics(&self, _resource: ListResource) -> Result<Statistics, BackendError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(BackendError::Network("connection refused".to_string()));
        }
        let mut statistics = Statistics::new();
        statistics.insert("total".to_string(), json!(self.rows.len()));
        Ok(statistics)
    }

    async fn fetch_overview(&self) -> Result<Statistics, BackendError> {
        if self.fail {
            return Err(BackendError::Timeout(30));
        }
        let overview = json!({
            "total_transactions": self.rows.len() * 1000,
            "flagged_transactions": 12,
            "avg_transaction_amount": "1534.256",
        });
        Ok(overview.as_object().cloned().unwrap())
    }

    async fn fetch_model_performance(&self) -> Result<Statistics, BackendError> {
        if self.fail {
            return Err(BackendError::Network("connection refused".to_string()));
        }
        Ok(json!({"accuracy": 94.24, "f1_score": 0.9}).as_object().cloned().unwrap())
    }

    async fn update_alert(&self, _alert_id: &str, _update: &AlertUpdate) -> Result<(), BackendError> {
        Ok(())
    }

    async fn fetch_parameters(&self) -> Result<Value, BackendError> {
        Ok(json!({}))
    }

    async fn update_parameters(&self, batch: &Value) -> Result<Value, BackendError> {
        Ok(batch.clone())
    }

    async fn reset_parameters(&self, request: &Value) -> Result<Value, BackendError> {
        Ok(request.clone())
    }

    async fn generate_report(&self, request: &ReportRequest) -> Result<Vec<u8>, BackendError> {
        if self.fail {
            return Err(BackendError::Status {
                status: 500,
                message: "report failed".to_string(),
            });
        }
        Ok(format!("type;start;end\n{};{};{}\n", request.kind, request.start_date, request.end_date).into_bytes())
    }

    async fn download_alert_details(&self, _alert_id: &str) -> Result<Vec<u8>, BackendError> {
        Ok(Vec::new())
    }

    async fn export_parameters(&self) -> Result<Vec<u8>, BackendError> {
        Ok(Vec::new())
    }
}
