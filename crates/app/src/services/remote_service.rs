//! Remote service: builds entities for discovered remotes and routes host
//! service calls to them.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;

use irhub_domain::capability::CapabilitySet;
use irhub_domain::catalog::CommandCatalog;
use irhub_domain::device::RemoteDevice;
use irhub_domain::device_type::{DeviceClass, DeviceType};
use irhub_domain::error::{IrHubError, NotFoundError};
use irhub_domain::id::{RemoteId, SensorId};
use irhub_domain::options::RemoteOptions;
use irhub_domain::service::ServiceCall;
use irhub_domain::simulator::PowerProfile;
use irhub_domain::state::{Brightness, DisplayState, EntityState};

use crate::belief::Belief;
use crate::cancel::CancelToken;
use crate::dispatcher::CommandDispatcher;
use crate::entities::{Button, ButtonGroup, EntityCore, LightEntity, MediaPlayerEntity, SwitchEntity};
use crate::event_bus::InProcessEventBus;
use crate::ports::{RemoteDiscovery, RemoteTransport, StateStore};
use crate::reconciliation::PowerBinding;
use crate::sensor_hub::SensorHub;

/// Primary entity of a remote.
pub enum PrimaryEntity<T> {
    Light(LightEntity<T>),
    MediaPlayer(MediaPlayerEntity<T>),
    Switch(SwitchEntity<T>),
}

impl<T> PrimaryEntity<T> {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Light(_) => "light",
            Self::MediaPlayer(_) => "media_player",
            Self::Switch(_) => "switch",
        }
    }
}

impl<T: RemoteTransport> PrimaryEntity<T> {
    fn core(&self) -> &EntityCore<T> {
        match self {
            Self::Light(entity) => entity.core(),
            Self::MediaPlayer(entity) => entity.core(),
            Self::Switch(entity) => entity.core(),
        }
    }
}

/// Everything irhub holds for one discovered remote.
pub struct Remote<T> {
    device: RemoteDevice,
    primary: PrimaryEntity<T>,
    buttons: ButtonGroup<T>,
    belief: Arc<Belief>,
    cancel: CancelToken,
    binding: Mutex<Option<PowerBinding>>,
}

/// Host-facing view of one remote.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteSummary {
    pub id: RemoteId,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub class: DeviceClass,
    pub kind: &'static str,
    pub model: String,
    pub icon: &'static str,
    pub capabilities: Vec<String>,
    pub state: DisplayState,
    pub attributes: EntityState,
    pub buttons: Vec<Button>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_sensor: Option<SensorId>,
}

impl<T: RemoteTransport> Remote<T> {
    #[must_use]
    pub fn device(&self) -> &RemoteDevice {
        &self.device
    }

    #[must_use]
    pub fn primary(&self) -> &PrimaryEntity<T> {
        &self.primary
    }

    #[must_use]
    pub fn buttons(&self) -> &ButtonGroup<T> {
        &self.buttons
    }

    #[must_use]
    pub fn summary(&self) -> RemoteSummary {
        let capabilities = match &self.primary {
            PrimaryEntity::MediaPlayer(player) => player.capabilities(),
            PrimaryEntity::Light(_) | PrimaryEntity::Switch(_) => CapabilitySet::POWER,
        };
        let state = self.belief.snapshot();
        let power_sensor = self
            .binding
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|binding| binding.sensor_id().clone());
        RemoteSummary {
            id: self.device.id.clone(),
            name: self.device.name.clone(),
            device_type: self.device.device_type,
            class: self.device.class(),
            kind: self.primary.kind(),
            model: self.device.model(),
            icon: self.device.class().icon(),
            capabilities: capabilities
                .iter_names()
                .map(|(name, _)| name.to_ascii_lowercase())
                .collect(),
            state: state.display(),
            attributes: state,
            buttons: self.buttons.buttons().to_vec(),
            power_sensor,
        }
    }

    async fn handle(&self, call: ServiceCall) -> Result<(), IrHubError> {
        if let ServiceCall::Press { command } = &call {
            return self.buttons.press(command).await;
        }
        match (&self.primary, call) {
            (PrimaryEntity::Light(light), ServiceCall::TurnOn { brightness }) => {
                light.turn_on(brightness.map(Brightness::clamped)).await
            }
            (PrimaryEntity::Light(light), ServiceCall::SetBrightness { brightness }) => {
                light.set_brightness(Brightness::clamped(brightness)).await
            }
            (PrimaryEntity::Light(light), ServiceCall::TurnOff) => light.turn_off().await,

            (PrimaryEntity::Switch(switch), ServiceCall::TurnOn { .. }) => switch.turn_on().await,
            (PrimaryEntity::Switch(switch), ServiceCall::TurnOff) => switch.turn_off().await,

            (PrimaryEntity::MediaPlayer(player), call) => match call {
                ServiceCall::TurnOn { .. } => player.turn_on().await,
                ServiceCall::TurnOff => player.turn_off().await,
                ServiceCall::VolumeUp => player.volume_up().await,
                ServiceCall::VolumeDown => player.volume_down().await,
                ServiceCall::Mute => player.mute().await,
                ServiceCall::Play => player.play().await,
                ServiceCall::Pause => player.pause().await,
                ServiceCall::PlayPause => player.play_pause().await,
                ServiceCall::Stop => player.stop().await,
                ServiceCall::NextTrack => player.next_track().await,
                ServiceCall::PreviousTrack => player.previous_track().await,
                ServiceCall::ChannelUp => player.channel_up().await,
                ServiceCall::ChannelDown => player.channel_down().await,
                ServiceCall::PlayMedia {
                    media_type,
                    media_id,
                } => player.play_media(&media_type, &media_id).await,
                other => Err(player.core().unknown(other.name())),
            },

            (PrimaryEntity::Light(light), other) => Err(light.core().unknown(other.name())),
            (PrimaryEntity::Switch(switch), other) => Err(switch.core().unknown(other.name())),
        }
    }
}

/// Owns every remote and its entities.
pub struct RemoteService<T, S> {
    dispatcher: Arc<CommandDispatcher<T>>,
    store: S,
    sensors: Arc<SensorHub>,
    events: Arc<InProcessEventBus>,
    options: HashMap<RemoteId, RemoteOptions>,
    remotes: RwLock<BTreeMap<RemoteId, Arc<Remote<T>>>>,
}

impl<T, S> RemoteService<T, S>
where
    T: RemoteTransport + 'static,
    S: StateStore,
{
    pub fn new(
        catalog: Arc<CommandCatalog>,
        transport: T,
        store: S,
        sensors: Arc<SensorHub>,
        events: Arc<InProcessEventBus>,
        options: HashMap<RemoteId, RemoteOptions>,
    ) -> Self {
        Self {
            dispatcher: Arc::new(CommandDispatcher::new(
                catalog,
                transport,
                Arc::clone(&events),
            )),
            store,
            sensors,
            events,
            options,
            remotes: RwLock::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn events(&self) -> &Arc<InProcessEventBus> {
        &self.events
    }

    #[must_use]
    pub fn sensors(&self) -> &Arc<SensorHub> {
        &self.sensors
    }

    /// Discover remotes and build their entities. Returns how many remotes
    /// were set up.
    ///
    /// Must run inside a tokio runtime (sensor bindings spawn a task).
    ///
    /// # Errors
    ///
    /// Returns the discovery error if listing remotes fails. Restore
    /// failures are logged and the remote starts from default belief.
    pub async fn setup(&self, discovery: &impl RemoteDiscovery) -> Result<usize, IrHubError> {
        let devices = discovery.list_remotes().await?;
        let mut built = Vec::with_capacity(devices.len());

        for device in devices {
            if let Err(err) = device.validate() {
                tracing::warn!(remote_id = %device.id, error = %err, "skipping invalid remote");
                continue;
            }
            let last = match self.store.load_last_state(&device.id).await {
                Ok(last) => last,
                Err(err) => {
                    tracing::warn!(remote_id = %device.id, error = %err, "could not restore state");
                    None
                }
            };
            let options = self.options.get(&device.id).cloned().unwrap_or_default();
            built.push(self.build(device, EntityState::restored(last.as_ref()), &options));
        }

        let count = built.len();
        let mut remotes = self.remotes.write().unwrap_or_else(PoisonError::into_inner);
        for remote in built {
            tracing::info!(
                remote_id = %remote.device.id,
                device_type = %remote.device.device_type,
                kind = remote.primary.kind(),
                buttons = remote.buttons.buttons().len(),
                "remote ready"
            );
            remotes.insert(remote.device.id.clone(), Arc::new(remote));
        }
        Ok(count)
    }

    fn build(&self, device: RemoteDevice, initial: EntityState, options: &RemoteOptions) -> Remote<T> {
        let cancel = CancelToken::new();
        let belief = Arc::new(Belief::new(
            device.id.clone(),
            PowerProfile::for_device(device.device_type),
            initial,
            Arc::clone(&self.events),
        ));
        let core = EntityCore::new(
            device.clone(),
            Arc::clone(&self.dispatcher),
            Arc::clone(&belief),
            cancel.clone(),
        );
        let primary = match device.class() {
            DeviceClass::Light => PrimaryEntity::Light(LightEntity::new(core)),
            DeviceClass::Media => PrimaryEntity::MediaPlayer(MediaPlayerEntity::new(core)),
            _ => PrimaryEntity::Switch(SwitchEntity::new(core, options)),
        };
        let buttons = ButtonGroup::new(
            device.clone(),
            Arc::clone(&self.dispatcher),
            cancel.clone(),
            options,
        );
        let binding = options
            .power_sensor
            .clone()
            .filter(|id| !id.is_empty())
            .map(|sensor_id| PowerBinding::bind(sensor_id, &self.sensors, Arc::clone(&belief)));

        Remote {
            device,
            primary,
            buttons,
            belief,
            cancel,
            binding: Mutex::new(binding),
        }
    }

    fn remote(&self, id: &RemoteId) -> Result<Arc<Remote<T>>, IrHubError> {
        self.remotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Remote",
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// # Errors
    ///
    /// Returns [`IrHubError::NotFound`] when no remote has `id`.
    pub fn get_remote(&self, id: &RemoteId) -> Result<RemoteSummary, IrHubError> {
        Ok(self.remote(id)?.summary())
    }

    #[must_use]
    pub fn list_remotes(&self) -> Vec<RemoteSummary> {
        self.remotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|remote| remote.summary())
            .collect()
    }

    /// Run one host service call and return the remote's updated summary.
    ///
    /// # Errors
    ///
    /// [`IrHubError::NotFound`] for an unknown remote,
    /// [`IrHubError::UnknownCommand`] when the remote cannot serve the call,
    /// plus whatever the entity action returns.
    pub async fn handle_service_call(
        &self,
        id: &RemoteId,
        call: ServiceCall,
    ) -> Result<RemoteSummary, IrHubError> {
        let remote = self.remote(id)?;
        tracing::info!(remote_id = %id, service = call.name(), "service call");
        remote.handle(call).await?;
        Ok(remote.summary())
    }

    /// Cancel every remote, release sensor bindings and save restore
    /// snapshots once the in-flight pulse has landed. Saving is best-effort.
    pub async fn shutdown(&self) {
        let remotes: Vec<Arc<Remote<T>>> = self
            .remotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        for remote in remotes {
            remote.cancel.cancel();
            remote
                .binding
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            remote.primary.core().settle().await;
            let with_brightness = matches!(remote.primary, PrimaryEntity::Light(_));
            let snapshot = remote.belief.snapshot().last_state(with_brightness);
            match self.store.save_last_state(&remote.device.id, snapshot).await {
                Ok(()) => tracing::debug!(remote_id = %remote.device.id, "state saved"),
                Err(err) => {
                    tracing::warn!(remote_id = %remote.device.id, error = %err, "could not save state");
                }
            }
        }
        tracing::info!("remotes shut down");
    }
}
