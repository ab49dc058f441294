//! Sensor hub: where the host pushes power observable values.
//!
//! The hub remembers the latest reading of every sensor and fans each push
//! out to bound entities over a broadcast channel.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use irhub_domain::id::SensorId;
use irhub_domain::sensor::{SensorChange, SensorReading};

pub struct SensorHub {
    latest: Mutex<HashMap<SensorId, SensorReading>>,
    sender: broadcast::Sender<SensorChange>,
}

impl SensorHub {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            latest: Mutex::new(HashMap::new()),
            sender,
        }
    }

    /// Record a raw host value and notify subscribers.
    ///
    /// Returns the parsed reading.
    pub fn publish(&self, sensor_id: SensorId, raw: &str) -> SensorReading {
        let reading = SensorReading::parse(raw);
        tracing::debug!(sensor_id = %sensor_id, raw, ?reading, "sensor value pushed");
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(sensor_id.clone(), reading);
        let _ = self.sender.send(SensorChange { sensor_id, reading });
        reading
    }

    /// Latest reading of `sensor_id`, if it ever pushed one.
    #[must_use]
    pub fn current(&self, sensor_id: &SensorId) -> Option<SensorReading> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(sensor_id)
            .copied()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SensorChange> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_remember_latest_reading() {
        let hub = SensorHub::new(8);
        let id = SensorId::new("binary_sensor.tv");
        assert_eq!(hub.current(&id), None);

        hub.publish(id.clone(), "on");
        hub.publish(id.clone(), "off");

        assert_eq!(hub.current(&id), Some(SensorReading::Off));
    }

    #[tokio::test]
    async fn should_broadcast_parsed_change() {
        let hub = SensorHub::new(8);
        let mut rx = hub.subscribe();

        let reading = hub.publish(SensorId::new("plug"), "home");

        assert_eq!(reading, SensorReading::On);
        let change = rx.recv().await.unwrap();
        assert_eq!(change.sensor_id, SensorId::new("plug"));
        assert_eq!(change.reading, SensorReading::On);
    }
}
