//! HTTP implementation of [`MonitoringBackend`] on top of `reqwest`.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

use super::{
    parse_list_envelope, parse_model_performance, parse_statistics_envelope, AlertUpdate, BackendError, ListPage,
    ListQuery, ListResource, MonitoringBackend, ReportRequest, Statistics,
};
use crate::utils::datetime;

/// Longest error body echoed back in a [`BackendError::Status`]
const MAX_ERROR_BODY: usize = 200;

/// REST client for the monitoring service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBackend {
    /// Create a client for `base_url` (e.g. `http://localhost:5001/api`)
    /// with a fixed per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout.as_secs())
        } else {
            BackendError::Network(err.to_string())
        }
    }

    /// Send a request and return the response if its status is a success
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|e| {
            let err = self.map_transport_error(e);
            error!("API Error ({}): {}", what, err);
            err
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut message = response.text().await.unwrap_or_default();
        if message.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY).rev().find(|i| message.is_char_boundary(*i)).unwrap_or(0);
            message.truncate(cut);
        }
        let err = BackendError::Status {
            status: status.as_u16(),
            message,
        };
        error!("API Error ({}): {}", what, err);
        Err(err)
    }

    async fn get_json(&self, path: &str) -> Result<Value, BackendError> {
        let response = self.send(self.client.get(self.url(path)), path).await?;
        read_json(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, BackendError> {
        let response = self.send(self.client.post(self.url(path)).json(body), path).await?;
        read_json(response).await
    }

    async fn read_bytes(&self, request: RequestBuilder, what: &str) -> Result<Vec<u8>, BackendError> {
        let response = self.send(request, what).await?;
        let bytes = response.bytes().await.map_err(|e| self.map_transport_error(e))?;
        Ok(bytes.to_vec())
    }
}

async fn read_json(response: Response) -> Result<Value, BackendError> {
    response
        .json::<Value>()
        .await
        .map_err(|e| BackendError::InvalidData(format!("response is not valid JSON: {e}")))
}

#[async_trait]
impl MonitoringBackend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health_check(&self) -> Result<Value, BackendError> {
        self.get_json("health").await
    }

    async fn fetch_list(&self, resource: ListResource, query: &ListQuery) -> Result<ListPage, BackendError> {
        let params = query.to_params();
        debug!("GET /{} {:?}", resource.path(), params);

        let request = self.client.get(self.url(resource.path())).query(&params);
        let response = self.send(request, resource.path()).await?;
        let body = read_json(response).await?;
        parse_list_envelope(body, resource, query)
    }

    async fn fetch_statistics(&self, resource: ListResource) -> Result<Statistics, BackendError> {
        let body = self.get_json(&format!("{}/statistics", resource.path())).await?;
        parse_statistics_envelope(body)
    }

    async fn fetch_overview(&self) -> Result<Statistics, BackendError> {
        let body = self.get_json("monitoring/dashboard-overview").await?;
        parse_statistics_envelope(body)
    }

    async fn fetch_model_performance(&self) -> Result<Statistics, BackendError> {
        let body = self.get_json("monitoring/model-performance").await?;
        parse_model_performance(body)
    }

    async fn update_alert(&self, alert_id: &str, update: &AlertUpdate) -> Result<(), BackendError> {
        let body = json!({
            "statut_alerte": update.statut_alerte,
            "processed_by": update.processed_by,
            "processed_at": datetime::now_iso(),
        });
        let path = format!("alerts/{}", alert_id);
        self.send(self.client.put(self.url(&path)).json(&body), &path).await?;
        Ok(())
    }

    async fn fetch_parameters(&self) -> Result<Value, BackendError> {
        self.get_json("parameters").await
    }

    async fn update_parameters(&self, batch: &Value) -> Result<Value, BackendError> {
        self.post_json("parameters/batch", batch).await
    }

    async fn reset_parameters(&self, request: &Value) -> Result<Value, BackendError> {
        self.post_json("parameters/reset", request).await
    }

    async fn generate_report(&self, request: &ReportRequest) -> Result<Vec<u8>, BackendError> {
        let path = "reports/cd01/generate";
        debug!("POST /{} {:?}", path, request);
        self.read_bytes(self.client.post(self.url(path)).json(request), path).await
    }

    async fn download_alert_details(&self, alert_id: &str) -> Result<Vec<u8>, BackendError> {
        let path = format!("reports/cd01/download/{}", alert_id);
        self.read_bytes(self.client.get(self.url(&path)), &path).await
    }

    async fn export_parameters(&self) -> Result<Vec<u8>, BackendError> {
        let path = "reports/export/parameters";
        self.read_bytes(self.client.get(self.url(path)), path).await
    }
}
