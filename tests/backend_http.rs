//! Integration tests for the HTTP backend against a mock server.

use fraudwatch::backend::http::HttpBackend;
use chrono::NaiveDate;
use fraudwatch::backend::{
    AlertStatus, AlertUpdate, BackendError, ListQuery, ListResource, MonitoringBackend, ReportKind, ReportRequest,
    SortOrder,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&format!("{}/api/", server.uri()), Duration::from_secs(5)).unwrap()
}

fn query() -> ListQuery {
    ListQuery {
        page: 2,
        per_page: 20,
        sort_by: "opr_lib_date".to_string(),
        sort_order: SortOrder::Desc,
        filters: vec![("risk_level".to_string(), "High".to_string())],
    }
}

#[tokio::test]
async fn test_fetch_list_sends_query_and_parses_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "20"))
        .and(query_param("sort_by", "opr_lib_date"))
        .and(query_param("sort_order", "DESC"))
        .and(query_param("risk_level", "High"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "transactions": [{"id": "T1", "amount": 10}, {"id": "T2", "amount": 20}],
                "pagination": {"page": 2, "per_page": 20, "total_count": 42, "total_pages": 3}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = backend(&server)
        .fetch_list(ListResource::Transactions, &query())
        .await
        .unwrap();

    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0]["id"], json!("T1"));
    assert_eq!(page.pagination.total_count, 42);
    assert_eq!(page.pagination.total_pages, 3);
}

#[tokio::test]
async fn test_missing_list_is_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let page = backend(&server).fetch_list(ListResource::Alerts, &query()).await.unwrap();

    assert!(page.rows.is_empty());
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total_pages, 0);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reactivations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = backend(&server)
        .fetch_list(ListResource::Reactivations, &query())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BackendError::Status {
            status: 500,
            message: "database unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(&format!("{}/api", server.uri()), Duration::from_secs(1)).unwrap();
    let err = backend
        .fetch_list(ListResource::Transactions, &query())
        .await
        .unwrap_err();

    assert_eq!(err, BackendError::Timeout(1));
}

#[tokio::test]
async fn test_statistics_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alerts/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"new": 4, "critical": 1}})))
        .mount(&server)
        .await;

    let stats = backend(&server).fetch_statistics(ListResource::Alerts).await.unwrap();

    assert_eq!(stats["new"], json!(4));
    assert_eq!(stats["critical"], json!(1));
}

#[tokio::test]
async fn test_update_alert_sends_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/alerts/17"))
        .and(body_partial_json(json!({"statut_alerte": "faux_positif", "processed_by": "analyst"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let update = AlertUpdate {
        statut_alerte: AlertStatus::FalsePositive,
        processed_by: "analyst".to_string(),
    };
    backend(&server).update_alert("17", &update).await.unwrap();
}

#[tokio::test]
async fn test_report_download_is_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/cd01/download/9"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"id;amount\n9;100\n".to_vec()))
        .mount(&server)
        .await;

    let bytes = backend(&server).download_alert_details("9").await.unwrap();
    assert_eq!(bytes, b"id;amount\n9;100\n");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let backend = HttpBackend::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
    let err = backend.health_check().await.unwrap_err();
    assert!(matches!(err, BackendError::Network(_)));
}

#[tokio::test]
async fn test_parameter_store_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/parameters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"seuil_montant": 50000}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/parameters/batch"))
        .and(body_partial_json(json!({"updates": [{"key": "seuil_montant", "value": 75000}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let parameters = backend.fetch_parameters().await.unwrap();
    assert_eq!(parameters["data"]["seuil_montant"], json!(50000));

    let batch = json!({"updates": [{"key": "seuil_montant", "value": 75000}]});
    let response = backend.update_parameters(&batch).await.unwrap();
    assert_eq!(response["success"], json!(true));
}

#[tokio::test]
async fn test_generate_report_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reports/cd01/generate"))
        .and(body_partial_json(json!({
            "type": "transactions",
            "start_date": "2025-01-01",
            "end_date": "2025-01-31"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"CD01;report".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let request = ReportRequest::new(
        ReportKind::Transactions,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    )
    .unwrap();
    let bytes = backend(&server).generate_report(&request).await.unwrap();
    assert_eq!(bytes, b"CD01;report");
}

#[tokio::test]
async fn test_dashboard_overview_and_model_performance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/monitoring/dashboard-overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"total_transactions": 12543, "flagged_transactions": 1234, "avg_transaction_amount": "845.5"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/monitoring/model-performance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accuracy": 94.2, "precision": 91.0, "recall": 88.5, "f1_score": 89.7,
            "model_types": {"xgboost": "active"}
        })))
        .mount(&server)
        .await;

    let backend = backend(&server);
    let overview = backend.fetch_overview().await.unwrap();
    assert_eq!(overview["total_transactions"], json!(12543));
    assert_eq!(overview["avg_transaction_amount"], json!("845.5"));

    let model = backend.fetch_model_performance().await.unwrap();
    assert_eq!(model["accuracy"], json!(94.2));
    assert_eq!(model["f1_score"], json!(89.7));
}

#[tokio::test]
async fn test_model_performance_inside_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/monitoring/model-performance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"recall": 0.81}})))
        .mount(&server)
        .await;

    let model = backend(&server).fetch_model_performance().await.unwrap();
    assert_eq!(model["recall"], json!(0.81));
}

#[tokio::test]
async fn test_overview_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/monitoring/dashboard-overview"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .mount(&server)
        .await;

    let err = backend(&server).fetch_overview().await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 503, .. }));
}
