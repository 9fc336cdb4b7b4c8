pub mod compose_cli;
pub mod compose_file;
pub mod config;
pub mod discovery;

pub use compose_cli::DockerComposeCli;
pub use compose_file::ComposeStore;
pub use discovery::ComposeDiscovery;
