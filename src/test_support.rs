use crate::domain::{ComposeAction, ComposeRuntime, PsOutput};
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Recording mock of the compose CLI.
///
/// `ps` output is scripted per service name; unscripted services answer with
/// empty successful output (how the real CLI reports an unknown service).
#[derive(Debug)]
pub struct MockComposeRuntime {
    ps_outputs: RwLock<HashMap<String, PsOutput>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    available: RwLock<bool>,
}

impl MockComposeRuntime {
    pub fn new() -> Self {
        Self {
            ps_outputs: RwLock::new(HashMap::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            available: RwLock::new(true),
        }
    }

    pub fn set_ps_output(&self, service: &str, output: &str) {
        self.ps_outputs.write().unwrap().insert(
            service.to_string(),
            PsOutput {
                output: output.to_string(),
                success: true,
            },
        );
    }

    /// Scripted non-zero exit for `ps`
    pub fn set_ps_failure(&self, service: &str, output: &str) {
        self.ps_outputs.write().unwrap().insert(
            service.to_string(),
            PsOutput {
                output: output.to_string(),
                success: false,
            },
        );
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn set_available(&self, available: bool) {
        *self.available.write().unwrap() = available;
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl Default for MockComposeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeRuntime for MockComposeRuntime {
    fn ps(&self, _workdir: &Path, service: &str) -> Result<PsOutput> {
        self.record_command(&format!("ps:{}", service));
        self.check_fail("ps")?;

        Ok(self
            .ps_outputs
            .read()
            .unwrap()
            .get(service)
            .cloned()
            .unwrap_or(PsOutput {
                output: String::new(),
                success: true,
            }))
    }

    fn run(&self, _workdir: &Path, action: ComposeAction, service: &str) -> Result<()> {
        self.record_command(&format!("{}:{}", action.name(), service));
        self.check_fail(action.name())?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.record_command("is_available");
        *self.available.read().unwrap()
    }
}
