use crate::domain::{ComposeAction, ComposeRuntime, PsOutput};
use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const COMPOSE_BIN: &str = "docker-compose";

/// Status probes must not stall a catalog build
const PS_TIMEOUT: Duration = Duration::from_secs(10);

/// `pull` of a large image is the slowest operation we wait on
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Drives the `docker-compose` binary on PATH, one subprocess per call,
/// working directory set to the compose file's directory.
#[derive(Debug, Clone)]
pub struct DockerComposeCli {
    command_timeout: Duration,
}

impl DockerComposeCli {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }
}

impl Default for DockerComposeCli {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl ComposeRuntime for DockerComposeCli {
    fn ps(&self, workdir: &Path, service: &str) -> Result<PsOutput> {
        let mut child = Command::new(COMPOSE_BIN)
            .arg("ps")
            .arg(service)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("executando {COMPOSE_BIN} ps {service}"))?;

        let status = wait_with_timeout(&mut child, PS_TIMEOUT)
            .with_context(|| format!("aguardando {COMPOSE_BIN} ps {service}"))?;

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_string(&mut output).ok();
        }
        if let Some(mut stderr) = child.stderr.take() {
            stderr.read_to_string(&mut output).ok();
        }

        Ok(PsOutput {
            output,
            success: status.success(),
        })
    }

    fn run(&self, workdir: &Path, action: ComposeAction, service: &str) -> Result<()> {
        debug!("{} {} {} em {:?}", COMPOSE_BIN, action, service, workdir);

        // Only the exit code matters here; pull progress alone could fill
        // a pipe nobody drains.
        let mut child = Command::new(COMPOSE_BIN)
            .args(action.args())
            .arg(service)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("executando {COMPOSE_BIN} {action} {service}"))?;

        let status = wait_with_timeout(&mut child, self.command_timeout)
            .with_context(|| format!("aguardando {COMPOSE_BIN} {action} {service}"))?;

        if !status.success() {
            bail!("{COMPOSE_BIN} {action} {service} retornou status {:?}", status);
        }

        Ok(())
    }

    fn is_available(&self) -> bool {
        Command::new(COMPOSE_BIN)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Polls the child until it exits or the deadline passes, then kills it.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            bail!("Timeout após {:?}", timeout);
        }

        thread::sleep(POLL_INTERVAL);
    }
}
