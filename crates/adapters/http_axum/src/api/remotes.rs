//! JSON handlers for remotes and their service calls.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};

use irhub_app::ports::{RemoteTransport, StateStore};
use irhub_app::services::RemoteSummary;
use irhub_domain::error::IrHubError;
use irhub_domain::id::RemoteId;
use irhub_domain::service::ServiceCall;

use crate::error::ApiError;
use crate::state::AppState;

fn parse_id(id: &str) -> Result<RemoteId, ApiError> {
    RemoteId::from_str(id).map_err(|err| ApiError::from(IrHubError::from(err)))
}

/// `GET /api/remotes`
pub async fn list<T, S>(State(state): State<AppState<T, S>>) -> Json<Vec<RemoteSummary>>
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    Json(state.remote_service.list_remotes())
}

/// `GET /api/remotes/{id}`
pub async fn get<T, S>(
    State(state): State<AppState<T, S>>,
    Path(id): Path<String>,
) -> Result<Json<RemoteSummary>, ApiError>
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    let id = parse_id(&id)?;
    Ok(Json(state.remote_service.get_remote(&id)?))
}

/// `POST /api/remotes/{id}/services`
///
/// The body is one [`ServiceCall`]; the response is the remote's summary
/// after the call completed.
pub async fn call_service<T, S>(
    State(state): State<AppState<T, S>>,
    Path(id): Path<String>,
    Json(call): Json<ServiceCall>,
) -> Result<Json<RemoteSummary>, ApiError>
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    let id = parse_id(&id)?;
    let summary = state.remote_service.handle_service_call(&id, call).await?;
    Ok(Json(summary))
}
