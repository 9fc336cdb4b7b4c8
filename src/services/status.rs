use crate::domain::{ComposeRuntime, ServiceStatus, classify_ps_output};
use crate::infra::ComposeDiscovery;
use std::path::Path;
use std::sync::Arc;
use tracing::error;

/// Resolves the live run state of a service by running `ps` in its directory
pub struct StatusProber {
    discovery: Arc<ComposeDiscovery>,
    runtime: Arc<dyn ComposeRuntime>,
}

impl StatusProber {
    pub fn new(discovery: Arc<ComposeDiscovery>, runtime: Arc<dyn ComposeRuntime>) -> Self {
        Self { discovery, runtime }
    }

    /// Never fails: every problem collapses into a status sentinel.
    ///
    /// An unresolvable key answers `unknown` (distinct from `unconfigured`,
    /// which means the CLI ran but does not know the service). Spawn failures
    /// and non-zero exits answer `error`.
    pub fn probe(&self, key: &str, service: &str) -> ServiceStatus {
        let Some(path) = self.discovery.resolve(key) else {
            return ServiceStatus::Unknown;
        };

        let workdir = path.parent().unwrap_or_else(|| Path::new("."));

        match self.runtime.ps(workdir, service) {
            Ok(ps) if ps.success => classify_ps_output(&ps.output, service),
            Ok(_) => ServiceStatus::Error,
            Err(e) => {
                error!("Erro consultando status de {}/{}: {}", key, service, e);
                ServiceStatus::Error
            }
        }
    }
}
