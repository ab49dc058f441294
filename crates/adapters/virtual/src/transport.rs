//! Recording transport: accepts every command and remembers it.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use irhub_app::ports::{RemoteCommand, RemoteTransport};
use irhub_domain::error::TransportError;

/// When the recording transport should refuse a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FailurePlan {
    #[default]
    Never,
    /// Accept the first `n` commands, refuse every later one.
    AfterCalls(usize),
    /// Refuse every command carrying this action.
    OnAction(String),
}

#[derive(Debug, thiserror::Error)]
#[error("virtual bridge refused action {action:?}")]
struct Refused {
    action: String,
}

/// Transport that never touches hardware.
///
/// Every accepted command is logged at `info` and kept in memory, so a
/// dry run shows exactly what a real bridge would have emitted.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<RemoteCommand>>,
    attempts: Mutex<usize>,
    latency: Option<Duration>,
    failure: FailurePlan,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every send, simulating a slow bridge.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    #[must_use]
    pub fn with_failure(mut self, failure: FailurePlan) -> Self {
        self.failure = failure;
        self
    }

    /// Commands accepted so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<RemoteCommand> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn should_fail(&self, command: &RemoteCommand) -> bool {
        let mut attempts = self.attempts.lock().unwrap_or_else(PoisonError::into_inner);
        *attempts += 1;
        match &self.failure {
            FailurePlan::Never => false,
            FailurePlan::AfterCalls(n) => *attempts > *n,
            FailurePlan::OnAction(action) => *action == command.action,
        }
    }
}

impl RemoteTransport for RecordingTransport {
    fn send(
        &self,
        command: RemoteCommand,
    ) -> impl Future<Output = Result<(), TransportError>> + Send {
        let fail = self.should_fail(&command);
        async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            if fail {
                return Err(TransportError::new(Refused {
                    action: command.action,
                }));
            }
            tracing::info!(
                remote_id = %command.remote_id,
                action = %command.action,
                param = ?command.param,
                customizable = command.customizable,
                "ir command emitted"
            );
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(command);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irhub_domain::id::RemoteId;

    fn command(action: &str) -> RemoteCommand {
        RemoteCommand {
            remote_id: RemoteId::new("r1"),
            action: action.to_string(),
            param: None,
            customizable: false,
        }
    }

    #[tokio::test]
    async fn should_record_accepted_commands_in_order() {
        let transport = RecordingTransport::new();

        transport.send(command("turnOn")).await.unwrap();
        transport.send(command("volumeAdd")).await.unwrap();

        let actions: Vec<String> = transport.sent().into_iter().map(|c| c.action).collect();
        assert_eq!(actions, ["turnOn", "volumeAdd"]);
    }

    #[tokio::test]
    async fn should_fail_after_configured_number_of_calls() {
        let transport = RecordingTransport::new().with_failure(FailurePlan::AfterCalls(1));

        assert!(transport.send(command("a")).await.is_ok());
        assert!(transport.send(command("b")).await.is_err());
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn should_fail_only_on_matching_action() {
        let transport = RecordingTransport::new()
            .with_failure(FailurePlan::OnAction("turnOff".to_string()));

        assert!(transport.send(command("turnOn")).await.is_ok());
        assert!(transport.send(command("turnOff")).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn should_wait_for_configured_latency() {
        let transport = RecordingTransport::new().with_latency(Duration::from_secs(2));
        let started = tokio::time::Instant::now();

        transport.send(command("turnOn")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
