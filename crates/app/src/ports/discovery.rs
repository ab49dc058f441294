//! Discovery port: lists the remotes a bridge knows about.

use std::future::Future;

use irhub_domain::device::RemoteDevice;
use irhub_domain::error::IrHubError;

pub trait RemoteDiscovery: Send + Sync {
    /// All remotes currently registered with the bridge.
    fn list_remotes(&self) -> impl Future<Output = Result<Vec<RemoteDevice>, IrHubError>> + Send;
}
