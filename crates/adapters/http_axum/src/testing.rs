//! Shared fixtures for handler tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::response::Response;

use irhub_adapter_virtual::{InMemoryStateStore, RecordingTransport, StaticDiscovery};
use irhub_app::event_bus::InProcessEventBus;
use irhub_app::sensor_hub::SensorHub;
use irhub_app::services::RemoteService;
use irhub_domain::catalog::CommandCatalog;
use irhub_domain::device::RemoteDevice;
use irhub_domain::device_type::DeviceType;
use irhub_domain::id::{RemoteId, SensorId};
use irhub_domain::options::RemoteOptions;

use crate::state::AppState;

pub(crate) type TestState = AppState<Arc<RecordingTransport>, InMemoryStateStore>;

/// A lamp, a TV bound to sensor `plug.tv` and a fan.
pub(crate) async fn test_state() -> (Arc<RecordingTransport>, TestState) {
    let transport = Arc::new(RecordingTransport::new());
    let mut options = HashMap::new();
    options.insert(
        RemoteId::new("tv"),
        RemoteOptions {
            power_sensor: Some(SensorId::new("plug.tv")),
            ..RemoteOptions::default()
        },
    );
    let service = RemoteService::new(
        Arc::new(CommandCatalog::builtin()),
        Arc::clone(&transport),
        InMemoryStateStore::new(),
        Arc::new(SensorHub::new(16)),
        Arc::new(InProcessEventBus::new(64)),
        options,
    );
    let discovery = StaticDiscovery::new(vec![
        RemoteDevice::new(RemoteId::new("lamp"), "Lamp", DeviceType::Light).unwrap(),
        RemoteDevice::new(RemoteId::new("tv"), "Living Room TV", DeviceType::Tv).unwrap(),
        RemoteDevice::new(RemoteId::new("fan"), "Fan", DeviceType::Fan).unwrap(),
    ]);
    service.setup(&discovery).await.unwrap();
    (transport, AppState::new(service))
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub(crate) fn json_body(value: &serde_json::Value) -> Body {
    Body::from(serde_json::to_vec(value).unwrap())
}
