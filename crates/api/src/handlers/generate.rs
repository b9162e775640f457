use axum::extract::State;
use axum::Json;
use mailauth_domain::DomainError;
use tracing::{debug, instrument};

use crate::dto::{GenerateRequest, GenerateResponse};
use crate::errors::ApiError;
use crate::state::AppState;

#[instrument(skip(state, req), fields(domain = %req.domain))]
pub async fn generate_records(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let records = state
        .generate_records
        .execute(
            &req.domain,
            req.spf_record.as_deref(),
            req.dmarc_present,
            &req.dkim(),
        )
        .map_err(|e| {
            debug!(error = %e, "Rejected generate request");
            match e {
                DomainError::MissingParameter("dkim_value") => {
                    ApiError::BadRequest("DKIM value is required".to_string())
                }
                DomainError::GenerationSuppressed(_) => ApiError::GenerationSuppressed,
                other => ApiError::from_resolve(&other),
            }
        })?;

    Ok(Json(GenerateResponse::from(records)))
}
