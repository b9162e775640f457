#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mailauth_api::{create_api_routes, AppState};
use mailauth_application::ports::{DnsResolution, DnsResolver};
use mailauth_domain::config::MailServiceConfig;
use mailauth_domain::{DnsQuery, DomainError, RecordType};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

// ============================================================================
// Mock DnsResolver
// ============================================================================

#[derive(Clone, Default)]
pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<(String, RecordType), DnsResolution>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_response(&self, name: &str, record_type: RecordType, resolution: DnsResolution) {
        self.responses
            .write()
            .await
            .insert((name.to_string(), record_type), resolution);
    }

    pub async fn set_txt(&self, name: &str, records: &[&str]) {
        let resolution = records
            .iter()
            .fold(DnsResolution::new(), |r, record| r.with_txt([*record]));
        self.set_response(name, RecordType::TXT, resolution).await;
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::AllUpstreamsUnreachable);
        }

        self.responses
            .read()
            .await
            .get(&(query.domain.to_string(), query.record_type))
            .cloned()
            .ok_or_else(|| DomainError::NxDomain(query.domain.to_string()))
    }
}

// ============================================================================
// Request helpers
// ============================================================================

pub fn app(resolver: MockDnsResolver) -> Router {
    app_with_config(resolver, &MailServiceConfig::default())
}

pub fn app_with_config(resolver: MockDnsResolver, config: &MailServiceConfig) -> Router {
    create_api_routes(AppState::new(Arc::new(resolver), config))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
