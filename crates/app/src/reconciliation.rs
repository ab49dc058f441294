//! Power reconciliation: keeps power belief in line with an external sensor.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use irhub_domain::id::SensorId;

use crate::belief::Belief;
use crate::sensor_hub::SensorHub;

/// Subscription of one entity to one power sensor.
///
/// Dropping the binding stops the listener task.
pub struct PowerBinding {
    sensor_id: SensorId,
    task: JoinHandle<()>,
}

impl PowerBinding {
    /// Bind `belief` to `sensor_id`.
    ///
    /// Reconciles right away when the hub already knows a trusted value.
    /// Must be called from within a tokio runtime.
    pub fn bind(sensor_id: SensorId, hub: &Arc<SensorHub>, belief: Arc<Belief>) -> Self {
        let mut rx = hub.subscribe();
        if let Some(reading) = hub.current(&sensor_id) {
            belief.reconcile(reading);
        }

        let hub = Arc::clone(hub);
        let watched = sensor_id.clone();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) if change.sensor_id == watched => {
                        belief.reconcile(change.reading);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(sensor_id = %watched, skipped, "sensor listener lagged");
                        if let Some(reading) = hub.current(&watched) {
                            belief.reconcile(reading);
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self { sensor_id, task }
    }

    #[must_use]
    pub fn sensor_id(&self) -> &SensorId {
        &self.sensor_id
    }
}

impl Drop for PowerBinding {
    fn drop(&mut self) {
        self.task.abort();
    }
}
