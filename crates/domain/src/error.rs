//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`IrHubError`]
//! via `#[from]`. No error in this crate is fatal to the process: every
//! failure is scoped to one remote and one action.

use crate::device_type::DeviceType;
use crate::id::RemoteId;

/// Top-level error returned across port and service boundaries.
#[derive(Debug, thiserror::Error)]
pub enum IrHubError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The requested control was never instantiated for this remote.
    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommandError),

    /// Rejected before any transport call was issued.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),

    /// The transport refused or failed to deliver a command.
    #[error(transparent)]
    CommandFailed(#[from] CommandFailedError),

    /// The entity was torn down while the action was queued or in flight.
    #[error("action cancelled because the remote is shutting down")]
    Cancelled,

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("remote id must not be empty")]
    EmptyRemoteId,

    #[error("sensor id must not be empty")]
    EmptySensorId,

    #[error("name must not be empty")]
    EmptyName,

    #[error("unknown device type {0:?}")]
    UnknownDeviceType(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A control that the remote does not expose.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device_type} remote has no {command:?} command")]
pub struct UnknownCommandError {
    pub device_type: DeviceType,
    pub command: String,
}

/// A caller-supplied parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}: {reason}")]
pub struct InvalidParameterError {
    pub name: &'static str,
    pub reason: String,
}

/// A transport call failed; belief state was left untouched.
#[derive(Debug, thiserror::Error)]
#[error("command {action:?} to remote {remote_id} failed")]
pub struct CommandFailedError {
    pub remote_id: RemoteId,
    pub action: String,
    #[source]
    pub source: TransportError,
}

/// Opaque failure reported by a transport adapter.
#[derive(Debug, thiserror::Error)]
#[error("transport error")]
pub struct TransportError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    /// Wrap any error raised by a transport implementation.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Remote",
            id: "01-abc".to_string(),
        };
        assert_eq!(err.to_string(), "Remote 01-abc not found");
    }

    #[test]
    fn should_display_unknown_command_with_device_type() {
        let err = UnknownCommandError {
            device_type: DeviceType::SetTopBox,
            command: "mute".to_string(),
        };
        assert_eq!(err.to_string(), "Set Top Box remote has no \"mute\" command");
    }

    #[test]
    fn should_convert_validation_error_into_irhub_error() {
        let err: IrHubError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            IrHubError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_keep_transport_error_as_source_of_command_failed() {
        let err = CommandFailedError {
            remote_id: RemoteId::new("01-abc"),
            action: "turnOn".to_string(),
            source: TransportError::new("bridge offline"),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "transport error");
    }
}
