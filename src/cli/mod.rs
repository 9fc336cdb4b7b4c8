pub mod catalog;
pub mod doctor;
pub mod service;

pub use catalog::ListOptions;

use crate::domain::ComposeRuntime;
use crate::infra::config::parse_base_paths;
use crate::infra::{ComposeDiscovery, DockerComposeCli};
use crate::services::{ActionService, CatalogService};
use std::sync::Arc;
use std::time::Duration;

/// Wires the real runtime and the services for one CLI invocation
pub struct AppContext {
    pub discovery: Arc<ComposeDiscovery>,
    pub runtime: Arc<dyn ComposeRuntime>,
    pub catalog: CatalogService,
    pub actions: ActionService,
}

impl AppContext {
    pub fn new(base_paths: &str, command_timeout: Duration) -> Self {
        let discovery = Arc::new(ComposeDiscovery::new(parse_base_paths(base_paths)));
        let runtime: Arc<dyn ComposeRuntime> = Arc::new(DockerComposeCli::new(command_timeout));

        Self {
            catalog: CatalogService::new(discovery.clone(), runtime.clone()),
            actions: ActionService::new(discovery.clone(), runtime.clone()),
            discovery,
            runtime,
        }
    }
}
