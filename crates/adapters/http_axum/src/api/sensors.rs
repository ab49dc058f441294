//! Host push endpoint for power sensor values.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use irhub_app::ports::{RemoteTransport, StateStore};
use irhub_domain::error::IrHubError;
use irhub_domain::id::SensorId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for a sensor update. `state` is the host's raw value.
#[derive(Deserialize)]
pub struct UpdateSensorRequest {
    pub state: String,
}

/// `PUT /api/sensors/{id}`
pub async fn update<T, S>(
    State(state): State<AppState<T, S>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSensorRequest>,
) -> Result<StatusCode, ApiError>
where
    T: RemoteTransport + 'static,
    S: StateStore + 'static,
{
    let sensor_id = SensorId::from_str(&id).map_err(|err| ApiError::from(IrHubError::from(err)))?;
    let reading = state
        .remote_service
        .sensors()
        .publish(sensor_id.clone(), &req.state);
    tracing::debug!(%sensor_id, ?reading, "sensor value received");
    Ok(StatusCode::NO_CONTENT)
}
