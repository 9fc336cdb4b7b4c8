pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
// In a real production crate, we might use a feature flag "test-utils"
pub mod test_support;

pub use domain::{
    Catalog, ComposeAction, ComposeRuntime, PsOutput, SearchCriteria, ServiceDirectory,
    ServiceInfo, ServiceStatus,
};
pub use infra::{ComposeDiscovery, ComposeStore, DockerComposeCli};
pub use services::{ActionService, CatalogService, StatusProber, UpdateOutcome};
