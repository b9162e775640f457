use axum::extract::{Query, State};
use axum::Json;
use mailauth_domain::DomainReport;
use tracing::{error, instrument};

use crate::dto::DomainParams;
use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn check_domain(
    State(state): State<AppState>,
    Query(params): Query<DomainParams>,
) -> Result<Json<DomainReport>, ApiError> {
    let domain = params.domain.as_deref().unwrap_or_default();

    state
        .check_domain
        .execute(domain)
        .await
        .map(Json)
        .map_err(|e| {
            if e.is_transport() {
                error!(error = %e, domain = %domain, "Domain check failed");
            }
            ApiError::from_resolve(&e)
        })
}
