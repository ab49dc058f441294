//! Transport port: emits one IR command through a bridge.

use std::future::Future;
use std::sync::Arc;

use irhub_domain::error::TransportError;
use irhub_domain::id::RemoteId;

/// Everything a bridge needs to emit one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    pub remote_id: RemoteId,
    /// Canonical action name or learned code.
    pub action: String,
    /// Optional argument, e.g. a channel number for `SetChannel`.
    pub param: Option<String>,
    /// `true` when `action` is a learned code rather than a canonical name.
    pub customizable: bool,
}

/// Send-only IR transport.
///
/// Implementations must tolerate concurrent calls: remotes sharing one
/// bridge dispatch independently.
pub trait RemoteTransport: Send + Sync {
    /// Emit one command. Success means the bridge accepted it, nothing more.
    fn send(&self, command: RemoteCommand)
    -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl<T: RemoteTransport> RemoteTransport for Arc<T> {
    fn send(
        &self,
        command: RemoteCommand,
    ) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).send(command)
    }
}
