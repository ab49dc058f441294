//! Media player entity: capability-driven controls for TVs, boxes,
//! disc players, speakers and projectors.

use std::collections::BTreeMap;

use irhub_domain::capability::{self, CapabilitySet};
use irhub_domain::catalog::CommandEntry;
use irhub_domain::device_type::MediaFamily;
use irhub_domain::error::IrHubError;
use irhub_domain::simulator::ChannelSelection;
use irhub_domain::state::{EntityState, Playback};

use super::EntityCore;
use crate::ports::RemoteTransport;

const SET_CHANNEL: &str = "set_channel";

pub struct MediaPlayerEntity<T> {
    core: EntityCore<T>,
    capabilities: CapabilitySet,
    controls: BTreeMap<&'static str, CommandEntry>,
}

impl<T: RemoteTransport> MediaPlayerEntity<T> {
    pub fn new(core: EntityCore<T>) -> Self {
        let device_type = core.device().device_type;
        let capabilities = capability::resolve(device_type);
        let family = device_type.media_family();

        let mut wanted: Vec<(&'static str, &'static str)> = Vec::new();
        for (flag, commands) in [
            (CapabilitySet::POWER, &["turn_on", "turn_off"][..]),
            (CapabilitySet::VOLUME_STEP, &["volume_up", "volume_down"][..]),
            (CapabilitySet::MUTE, &["mute"][..]),
            (
                CapabilitySet::PLAY_MEDIA,
                &[SET_CHANNEL, "channel_up", "channel_down"][..],
            ),
            (CapabilitySet::PLAY, &["play"][..]),
            (CapabilitySet::PAUSE, &["pause"][..]),
            (
                CapabilitySet::PREVIOUS_NEXT,
                &["next_track", "previous_track"][..],
            ),
            (CapabilitySet::STOP, &["stop"][..]),
        ] {
            if capabilities.contains(flag) {
                wanted.extend(commands.iter().map(|name| (*name, *name)));
            }
        }
        // IPTV boxes have a single play/pause toggle bound to the play key.
        if family == Some(MediaFamily::Iptv) && capabilities.contains(CapabilitySet::PLAY) {
            wanted.push(("pause", "play"));
        }

        let mut controls = BTreeMap::new();
        for (control, catalog_key) in wanted {
            if let Some(entry) = core.control(catalog_key) {
                controls.insert(control, entry);
            }
        }

        Self {
            core,
            capabilities,
            controls,
        }
    }

    #[must_use]
    pub fn core(&self) -> &EntityCore<T> {
        &self.core
    }

    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    /// Names of the controls that were actually instantiated.
    pub fn controls(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.controls.keys().copied()
    }

    fn entry(&self, name: &str) -> Result<&CommandEntry, IrHubError> {
        self.core.require(self.controls.get(name), name)
    }

    /// Send one control and, on success, apply `change` to belief.
    async fn act(
        &self,
        name: &str,
        param: Option<String>,
        change: impl FnOnce(&mut EntityState),
    ) -> Result<(), IrHubError> {
        let _guard = self.core.begin().await?;
        self.act_locked(name, param, change).await
    }

    // Caller holds the action lock.
    async fn act_locked(
        &self,
        name: &str,
        param: Option<String>,
        change: impl FnOnce(&mut EntityState),
    ) -> Result<(), IrHubError> {
        let entry = self.entry(name)?;
        self.core.send(entry, param).await?;
        self.core.belief().update(change);
        Ok(())
    }

    /// # Errors
    ///
    /// Every action returns [`IrHubError::UnknownCommand`] when the control
    /// was not instantiated, [`IrHubError::CommandFailed`] on transport
    /// failure and [`IrHubError::Cancelled`] on teardown.
    pub async fn turn_on(&self) -> Result<(), IrHubError> {
        let profile = self.core.belief().profile();
        self.act("turn_on", None, |state| profile.turn_on(state))
            .await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn turn_off(&self) -> Result<(), IrHubError> {
        let profile = self.core.belief().profile();
        self.act("turn_off", None, |state| profile.turn_off(state))
            .await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn volume_up(&self) -> Result<(), IrHubError> {
        self.act("volume_up", None, |_| {}).await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn volume_down(&self) -> Result<(), IrHubError> {
        self.act("volume_down", None, |_| {}).await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn mute(&self) -> Result<(), IrHubError> {
        self.act("mute", None, |_| {}).await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn play(&self) -> Result<(), IrHubError> {
        self.act("play", None, |state| state.playback = Playback::Playing)
            .await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn pause(&self) -> Result<(), IrHubError> {
        self.act("pause", None, |state| state.playback = Playback::Paused)
            .await
    }

    /// Pause when playing, play otherwise.
    ///
    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn play_pause(&self) -> Result<(), IrHubError> {
        let _guard = self.core.begin().await?;
        if self.core.belief().snapshot().playback == Playback::Playing {
            self.act_locked("pause", None, |state| state.playback = Playback::Paused)
                .await
        } else {
            self.act_locked("play", None, |state| state.playback = Playback::Playing)
                .await
        }
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn stop(&self) -> Result<(), IrHubError> {
        self.act("stop", None, |state| state.playback = Playback::Idle)
            .await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn next_track(&self) -> Result<(), IrHubError> {
        self.act("next_track", None, |_| {}).await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn previous_track(&self) -> Result<(), IrHubError> {
        self.act("previous_track", None, |_| {}).await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn channel_up(&self) -> Result<(), IrHubError> {
        self.act("channel_up", None, |_| {}).await
    }

    /// # Errors
    ///
    /// See [`turn_on`](Self::turn_on).
    pub async fn channel_down(&self) -> Result<(), IrHubError> {
        self.act("channel_down", None, |_| {}).await
    }

    /// Tune to a numeric channel, powering on first if needed.
    ///
    /// # Errors
    ///
    /// [`IrHubError::InvalidParameter`] before any transport call when the
    /// media type is not `channel` or the id is not numeric; otherwise as
    /// [`turn_on`](Self::turn_on).
    pub async fn play_media(&self, media_type: &str, media_id: &str) -> Result<(), IrHubError> {
        let selection = ChannelSelection::parse(media_type, media_id)?;
        let set_channel = self.entry(SET_CHANNEL)?;

        let _guard = self.core.begin().await?;
        let belief = self.core.belief();
        if !belief.snapshot().power.is_on() {
            let turn_on = self.entry("turn_on")?;
            self.core.send(turn_on, None).await?;
            belief.update(|state| belief.profile().turn_on(state));
        }
        self.core
            .send(set_channel, Some(selection.channel.clone()))
            .await?;
        belief.update(|state| state.source = Some(selection.source_label()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use irhub_domain::device_type::DeviceType;
    use irhub_domain::state::PowerState;

    use super::*;
    use crate::dispatcher::testing::StubTransport;
    use crate::entities::testing::{Harness, harness};

    fn player(ty: DeviceType, initial: EntityState) -> (Harness, MediaPlayerEntity<Arc<StubTransport>>) {
        let (h, core) = harness(ty, initial, StubTransport::default());
        (h, MediaPlayerEntity::new(core))
    }

    fn powered(power: PowerState) -> EntityState {
        EntityState {
            power,
            ..EntityState::default()
        }
    }

    #[tokio::test]
    async fn should_send_play_action_for_pause_on_iptv() {
        let (h, player) = player(DeviceType::Iptv, powered(PowerState::On));

        player.play().await.unwrap();
        player.pause().await.unwrap();

        let actions = h.transport.actions();
        assert_eq!(actions, ["23", "23"]);
        assert_eq!(player.core().belief().snapshot().playback, Playback::Paused);
    }

    #[tokio::test]
    async fn should_idle_disc_player_on_turn_on() {
        let (h, player) = player(DeviceType::Dvd, EntityState::default());

        player.turn_on().await.unwrap();

        assert_eq!(h.transport.actions(), ["turnOn"]);
        assert_eq!(player.core().belief().snapshot().power, PowerState::Idle);
    }

    #[tokio::test]
    async fn should_clear_source_on_turn_off() {
        let initial = EntityState {
            power: PowerState::On,
            source: Some("Channel 5".to_string()),
            ..EntityState::default()
        };
        let (_h, player) = player(DeviceType::Tv, initial);

        player.turn_off().await.unwrap();

        let state = player.core().belief().snapshot();
        assert_eq!(state.power, PowerState::Off);
        assert_eq!(state.source, None);
    }

    #[tokio::test]
    async fn should_power_on_then_set_channel() {
        let (h, player) = player(DeviceType::SetTopBox, EntityState::default());

        player.play_media("channel", "42").await.unwrap();

        let sent = h.transport.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].action, "turnOn");
        assert_eq!(sent[1].action, "SetChannel");
        assert_eq!(sent[1].param.as_deref(), Some("42"));
        let state = player.core().belief().snapshot();
        assert_eq!(state.power, PowerState::On);
        assert_eq!(state.source.as_deref(), Some("Channel 42"));
    }

    #[tokio::test]
    async fn should_reject_invalid_channel_without_transport_call() {
        let (h, player) = player(DeviceType::Tv, EntityState::default());

        let result = player.play_media("channel", "abc").await;

        assert!(matches!(result, Err(IrHubError::InvalidParameter(_))));
        assert!(h.transport.actions().is_empty());
        assert_eq!(player.core().belief().snapshot().power, PowerState::Off);
    }

    #[tokio::test]
    async fn should_not_instantiate_unadvertised_controls() {
        let (h, player) = player(DeviceType::SetTopBox, powered(PowerState::On));

        let result = player.mute().await;

        assert!(matches!(result, Err(IrHubError::UnknownCommand(_))));
        assert!(h.transport.actions().is_empty());
        assert!(!player.controls().any(|c| c == "mute"));
    }

    #[tokio::test]
    async fn should_skip_controls_missing_from_catalog_for_diy_types() {
        let (_h, player) = player(DeviceType::DiyTv, EntityState::default());

        assert_eq!(player.controls().collect::<Vec<_>>(), ["turn_off", "turn_on"]);
        assert!(matches!(
            player.volume_up().await,
            Err(IrHubError::UnknownCommand(_))
        ));
    }

    #[tokio::test]
    async fn should_toggle_play_pause() {
        let (h, player) = player(DeviceType::Speaker, powered(PowerState::Idle));

        player.play_pause().await.unwrap();
        assert_eq!(player.core().belief().snapshot().playback, Playback::Playing);
        player.play_pause().await.unwrap();
        assert_eq!(player.core().belief().snapshot().playback, Playback::Paused);

        assert_eq!(h.transport.actions(), ["Play", "Pause"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn should_toggle_twice_when_play_pause_calls_overlap() {
        let (h, core) = harness(
            DeviceType::Speaker,
            powered(PowerState::Idle),
            StubTransport::with_latency(Duration::from_millis(20)),
        );
        let player = Arc::new(MediaPlayerEntity::new(core));

        let first = {
            let player = Arc::clone(&player);
            tokio::spawn(async move { player.play_pause().await })
        };
        let second = {
            let player = Arc::clone(&player);
            tokio::spawn(async move { player.play_pause().await })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(h.transport.actions(), ["Play", "Pause"]);
        assert_eq!(player.core().belief().snapshot().playback, Playback::Paused);
    }

    #[tokio::test]
    async fn should_return_to_idle_on_stop() {
        let initial = EntityState {
            power: PowerState::Idle,
            playback: Playback::Playing,
            ..EntityState::default()
        };
        let (_h, player) = player(DeviceType::Dvd, initial);

        player.stop().await.unwrap();

        assert_eq!(player.core().belief().snapshot().display().as_str(), "idle");
    }

    #[tokio::test]
    async fn should_not_track_volume() {
        let (h, player) = player(DeviceType::Projector, powered(PowerState::On));
        let before = player.core().belief().snapshot();

        player.volume_up().await.unwrap();
        player.volume_down().await.unwrap();

        assert_eq!(h.transport.actions(), ["33", "35"]);
        assert_eq!(player.core().belief().snapshot(), before);
    }
}
