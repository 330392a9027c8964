use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::airtable::{RecordsEnvelope, UpstreamError, Verification};
use crate::auth::Authorized;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub authenticated: Option<Value>,
    pub record_id: Option<String>,
}

pub async fn list(
    _auth: Authorized,
    State(state): State<SharedState>,
) -> Result<Response, AppError> {
    let api_key = state
        .config
        .usable_airtable_key()
        .ok_or_else(|| AppError::BadRequest("Airtable API key is required".to_string()))?;

    match state.airtable.list_pending(api_key).await? {
        RecordsEnvelope::Records(records) => {
            tracing::debug!(count = records.len(), "Listed pending submissions");
            Ok(Json(records).into_response())
        }
        // Whatever Airtable said goes back to the caller untouched.
        RecordsEnvelope::Other(raw) => {
            tracing::warn!("Airtable response has no records array, passing it through");
            Ok(Json(raw).into_response())
        }
    }
}

pub async fn update(
    _auth: Authorized,
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    // Only a JSON object is accepted; derived structs would also take arrays.
    let req: UpdateRequest = serde_json::from_slice::<Map<String, Value>>(&body)
        .and_then(|fields| serde_json::from_value(Value::Object(fields)))
        .map_err(|_| AppError::BadRequest("Invalid request body".to_string()))?;

    let record_id = req
        .record_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Record ID is required".to_string()))?;

    let verification = Verification::from_flag(req.authenticated.as_ref())
        .ok_or_else(|| AppError::BadRequest("Invalid authentication value".to_string()))?;

    let api_key = state
        .config
        .usable_airtable_key()
        .ok_or(UpstreamError::MissingKey)?;

    state
        .airtable
        .update_verification(api_key, &record_id, verification)
        .await?;

    tracing::info!(%record_id, status = verification.as_str(), "Submission updated");

    Ok(Json(json!({
        "message": format!(
            "Record updated to [{}] successfully",
            verification.as_str().to_uppercase()
        ),
    })))
}
