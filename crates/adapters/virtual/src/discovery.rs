//! Static discovery: a fixed list of remotes.

use std::future::Future;

use irhub_app::ports::RemoteDiscovery;
use irhub_domain::device::RemoteDevice;
use irhub_domain::error::IrHubError;

#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    remotes: Vec<RemoteDevice>,
}

impl StaticDiscovery {
    #[must_use]
    pub fn new(remotes: Vec<RemoteDevice>) -> Self {
        Self { remotes }
    }
}

impl RemoteDiscovery for StaticDiscovery {
    fn list_remotes(&self) -> impl Future<Output = Result<Vec<RemoteDevice>, IrHubError>> + Send {
        let remotes = self.remotes.clone();
        async move { Ok(remotes) }
    }
}
