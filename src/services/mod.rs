mod actions;
mod catalog;
mod status;

pub use actions::{ActionService, UpdateOutcome};
pub use catalog::CatalogService;
pub use status::StatusProber;
