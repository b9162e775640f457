use axum::extract::{Query, State};
use axum::Json;
use tracing::{debug, error, instrument};

use crate::dto::{DnsRecordsResponse, DomainParams};
use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn dns_query(
    State(state): State<AppState>,
    Query(params): Query<DomainParams>,
) -> Result<Json<DnsRecordsResponse>, ApiError> {
    let domain = params.domain.as_deref().unwrap_or_default();

    match state.resolve_records.execute(domain).await {
        Ok(bundle) => {
            debug!(domain = %domain, "DNS records retrieved");
            Ok(Json(DnsRecordsResponse::from(bundle)))
        }
        Err(e) if e.is_transport() => {
            error!(error = %e, domain = %domain, "Failed to query DNS records");
            Err(ApiError::from_resolve(&e))
        }
        Err(e) => {
            debug!(error = %e, "Rejected DNS query");
            Err(ApiError::from_resolve(&e))
        }
    }
}
