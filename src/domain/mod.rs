mod service;
pub mod traits;

pub use service::{
    Catalog, SearchCriteria, ServiceDirectory, ServiceInfo, ServiceStatus, classify_ps_output,
    image_version, matches_search, retag_image,
};
pub use traits::{ComposeAction, ComposeRuntime, PsOutput};
