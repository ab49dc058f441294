//! Shared belief cell of one remote.

use std::sync::{Arc, Mutex, PoisonError};

use irhub_domain::event::{Event, EventType};
use irhub_domain::id::RemoteId;
use irhub_domain::sensor::SensorReading;
use irhub_domain::simulator::PowerProfile;
use irhub_domain::state::EntityState;

use crate::event_bus::InProcessEventBus;

/// Belief state behind a short-held lock.
///
/// The lock is never held across an `.await`, so readers and sensor
/// reconciliation never wait on an in-flight action.
pub struct Belief {
    remote_id: RemoteId,
    profile: PowerProfile,
    state: Mutex<EntityState>,
    events: Arc<InProcessEventBus>,
}

impl Belief {
    pub fn new(
        remote_id: RemoteId,
        profile: PowerProfile,
        initial: EntityState,
        events: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            remote_id,
            profile,
            state: Mutex::new(initial),
            events,
        }
    }

    #[must_use]
    pub fn profile(&self) -> PowerProfile {
        self.profile
    }

    #[must_use]
    pub fn snapshot(&self) -> EntityState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `change` and publish a `state_changed` event if anything moved.
    pub fn update(&self, change: impl FnOnce(&mut EntityState)) -> EntityState {
        let (before, after) = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let before = state.clone();
            change(&mut state);
            (before, state.clone())
        };
        if before != after {
            self.publish_change(&before, &after, "action");
        }
        after
    }

    /// Override power from a sensor reading. Returns `true` on change.
    pub fn reconcile(&self, reading: SensorReading) -> bool {
        let changed = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let before = state.clone();
            self.profile
                .reconcile(&mut state, reading)
                .then(|| (before, state.clone()))
        };
        match changed {
            Some((before, after)) => {
                tracing::debug!(
                    remote_id = %self.remote_id,
                    ?reading,
                    power = %after.power,
                    "power reconciled from sensor"
                );
                self.publish_change(&before, &after, "sensor");
                true
            }
            None => false,
        }
    }

    fn publish_change(&self, before: &EntityState, after: &EntityState, origin: &str) {
        self.events.publish(Event::new(
            self.remote_id.clone(),
            EventType::StateChanged,
            serde_json::json!({
                "from": before.display(),
                "to": after.display(),
                "origin": origin,
                "attributes": after,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irhub_domain::device_type::DeviceType;
    use irhub_domain::state::{Brightness, PowerState};

    fn belief(ty: DeviceType, bus: &Arc<InProcessEventBus>) -> Belief {
        Belief::new(
            RemoteId::new("r1"),
            PowerProfile::for_device(ty),
            EntityState::default(),
            Arc::clone(bus),
        )
    }

    #[tokio::test]
    async fn should_publish_state_changed_on_update() {
        let bus = Arc::new(InProcessEventBus::new(8));
        let mut rx = bus.subscribe();
        let belief = belief(DeviceType::Light, &bus);

        belief.update(|s| s.power = PowerState::On);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::StateChanged);
        assert_eq!(event.data["from"], "off");
        assert_eq!(event.data["to"], "on");
    }

    #[test]
    fn should_not_publish_when_nothing_changed() {
        let bus = Arc::new(InProcessEventBus::new(8));
        let mut rx = bus.subscribe();
        let belief = belief(DeviceType::Light, &bus);

        belief.update(|s| s.brightness = Brightness::MAX);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn should_reconcile_speaker_to_idle() {
        let bus = Arc::new(InProcessEventBus::new(8));
        let belief = belief(DeviceType::Speaker, &bus);

        assert!(belief.reconcile(SensorReading::On));
        assert!(!belief.reconcile(SensorReading::On));
        assert_eq!(belief.snapshot().power, PowerState::Idle);
    }
}
