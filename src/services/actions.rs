use crate::domain::{ComposeAction, ComposeRuntime, retag_image};
use crate::infra::compose_file::{service_image, set_service_image};
use crate::infra::{ComposeDiscovery, ComposeStore};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// Result of the compound version update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Tag rewritten and the service redeployed
    Updated,
    /// Tag rewritten but pull/up failed; the file already carries the new tag
    RedeployFailed,
    Failed,
}

/// Runs lifecycle subcommands against a service and the compound
/// version-update sequence.
pub struct ActionService {
    discovery: Arc<ComposeDiscovery>,
    store: ComposeStore,
    runtime: Arc<dyn ComposeRuntime>,
    /// One lock per directory key, held across read-mutate-write-redeploy so
    /// concurrent updates of the same stack cannot lose a write
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ActionService {
    pub fn new(discovery: Arc<ComposeDiscovery>, runtime: Arc<dyn ComposeRuntime>) -> Self {
        Self {
            store: ComposeStore::new(discovery.clone()),
            discovery,
            runtime,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// True iff the CLI exits 0. Spawn failures are logged, never propagated.
    pub fn execute(&self, key: &str, service: &str, action: ComposeAction) -> bool {
        let Some(path) = self.discovery.resolve(key) else {
            warn!("Diretório desconhecido: {}", key);
            return false;
        };

        let workdir = path.parent().unwrap_or_else(|| Path::new("."));

        match self.runtime.run(workdir, action, service) {
            Ok(()) => true,
            Err(e) => {
                error!("Falha em {} para {}/{}: {}", action, key, service, e);
                false
            }
        }
    }

    pub fn start(&self, key: &str, service: &str) -> bool {
        self.execute(key, service, ComposeAction::Up)
    }

    pub fn stop(&self, key: &str, service: &str) -> bool {
        self.execute(key, service, ComposeAction::Stop)
    }

    pub fn restart(&self, key: &str, service: &str) -> bool {
        self.execute(key, service, ComposeAction::Restart)
    }

    /// Rewrites the image tag in the compose file, then pulls and redeploys.
    ///
    /// The whole sequence holds the key's lock. Redeploy failure is reported
    /// apart from total failure because the file is already mutated at that
    /// point.
    pub fn update_version(&self, key: &str, service: &str, new_version: &str) -> UpdateOutcome {
        let lock = self.lock_for(key);
        let _held = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut doc = match self.store.read(key) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                warn!("Diretório desconhecido: {}", key);
                return UpdateOutcome::Failed;
            }
            Err(e) => {
                error!("Erro lendo {}: {}", key, e);
                return UpdateOutcome::Failed;
            }
        };

        let new_image = match service_image(&doc, service) {
            Some(image) if !image.is_empty() => retag_image(image, new_version),
            _ => {
                warn!("Serviço {}/{} sem campo 'image'", key, service);
                return UpdateOutcome::Failed;
            }
        };

        if !set_service_image(&mut doc, service, &new_image) {
            return UpdateOutcome::Failed;
        }

        if let Err(e) = self.store.write(key, &doc) {
            error!("Erro gravando {}: {}", key, e);
            return UpdateOutcome::Failed;
        }

        info!("Imagem de {}/{} atualizada para {}", key, service, new_image);

        // Both steps run even if the pull fails; `up -d` may still converge
        // on a previously pulled image.
        let pulled = self.execute(key, service, ComposeAction::Pull);
        let redeployed = self.execute(key, service, ComposeAction::Up);

        if pulled && redeployed {
            UpdateOutcome::Updated
        } else {
            UpdateOutcome::RedeployFailed
        }
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(key.to_string()).or_default().clone()
    }
}
