use anyhow::Result;
use std::fmt;
use std::fmt::Debug;
use std::path::Path;

/// Captured result of a `ps` invocation
#[derive(Debug, Clone)]
pub struct PsOutput {
    /// stdout and stderr combined
    pub output: String,
    /// Exit code was zero
    pub success: bool,
}

/// Lifecycle subcommands of the orchestration CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    Pull,
    Up,
    Stop,
    Restart,
}

impl ComposeAction {
    /// Argv form of the subcommand (`up` always detaches)
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            ComposeAction::Pull => &["pull"],
            ComposeAction::Up => &["up", "-d"],
            ComposeAction::Stop => &["stop"],
            ComposeAction::Restart => &["restart"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComposeAction::Pull => "pull",
            ComposeAction::Up => "up",
            ComposeAction::Stop => "stop",
            ComposeAction::Restart => "restart",
        }
    }
}

impl fmt::Display for ComposeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for driving the external compose CLI from a working directory
pub trait ComposeRuntime: Send + Sync + Debug {
    /// Run the process-status subcommand scoped to one service
    fn ps(&self, workdir: &Path, service: &str) -> Result<PsOutput>;

    /// Run a lifecycle subcommand scoped to one service; Ok only on exit 0
    fn run(&self, workdir: &Path, action: ComposeAction, service: &str) -> Result<()>;

    /// Check if the compose CLI is available on PATH
    fn is_available(&self) -> bool;
}
