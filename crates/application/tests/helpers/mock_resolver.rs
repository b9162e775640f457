#![allow(dead_code)]

use async_trait::async_trait;
use mailauth_application::ports::{DnsResolution, DnsResolver};
use mailauth_domain::{DnsQuery, DomainError, RecordType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock DnsResolver
// ============================================================================

type Key = (String, RecordType);

#[derive(Clone)]
pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<Key, Result<DnsResolution, DomainError>>>>,
    should_fail: Arc<RwLock<bool>>,
    calls: Arc<AtomicUsize>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer for `name`/`record_type`; unknown names are NXDOMAIN.
    pub async fn set_response(&self, name: &str, record_type: RecordType, resolution: DnsResolution) {
        self.responses
            .write()
            .await
            .insert((name.to_string(), record_type), Ok(resolution));
    }

    pub async fn set_error(&self, name: &str, record_type: RecordType, error: DomainError) {
        self.responses
            .write()
            .await
            .insert((name.to_string(), record_type), Err(error));
    }

    pub async fn set_txt(&self, name: &str, records: &[&str]) {
        let resolution = records
            .iter()
            .fold(DnsResolution::new(), |r, record| r.with_txt([*record]));
        self.set_response(name, RecordType::TXT, resolution).await;
    }

    /// Every query times out, as if no upstream were reachable.
    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if *self.should_fail.read().await {
            return Err(DomainError::TransportTimeout {
                server: "mock".to_string(),
            });
        }

        self.responses
            .read()
            .await
            .get(&(query.domain.to_string(), query.record_type))
            .cloned()
            .unwrap_or_else(|| Err(DomainError::NxDomain(query.domain.to_string())))
    }
}
