use axum::extract::{Query, State};
use axum::Json;
use tracing::{debug, instrument};

use crate::dto::{DkimLookupParams, DkimLookupResponse};
use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn dkim_lookup(
    State(state): State<AppState>,
    Query(params): Query<DkimLookupParams>,
) -> Result<Json<DkimLookupResponse>, ApiError> {
    let domain = params.domain.as_deref().unwrap_or_default();
    let selector = params.selector.as_deref().unwrap_or_default();

    let record = state
        .lookup_dkim
        .execute(domain, selector)
        .await
        .map_err(|e| {
            debug!(error = %e, "DKIM lookup unsuccessful");
            ApiError::from_dkim_lookup(&e)
        })?;

    Ok(Json(DkimLookupResponse { record }))
}
