use crate::domain::{
    Catalog, ComposeRuntime, SearchCriteria, ServiceDirectory, ServiceInfo, ServiceStatus,
    image_version, matches_search,
};
use crate::infra::{ComposeDiscovery, ComposeStore};
use crate::services::StatusProber;
use serde_yml::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Builds the filtered, status-annotated catalog of discovered services
pub struct CatalogService {
    discovery: Arc<ComposeDiscovery>,
    store: ComposeStore,
    prober: StatusProber,
}

impl CatalogService {
    pub fn new(discovery: Arc<ComposeDiscovery>, runtime: Arc<dyn ComposeRuntime>) -> Self {
        Self {
            store: ComposeStore::new(discovery.clone()),
            prober: StatusProber::new(discovery.clone(), runtime),
            discovery,
        }
    }

    /// One discovery pass, filtered by the criteria.
    ///
    /// Status is resolved lazily: probing spawns one subprocess per service,
    /// so unless status itself is a filter predicate (or there is no filter
    /// at all) services are returned as `pending` and the caller refreshes
    /// them one by one.
    pub fn list(&self, criteria: &SearchCriteria) -> Catalog {
        let criteria = criteria.normalized();
        let resolve_status = criteria.status.is_some() || criteria.is_empty();

        let mut directories = BTreeMap::new();
        let mut total_services = 0;

        for (key, path) in self.discovery.discover() {
            if !matches_directory(&key, &criteria) {
                continue;
            }

            let doc = match self.store.read(&key) {
                Ok(Some(doc)) => doc,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Ignorando {}: {}", key, e);
                    continue;
                }
            };

            let Some(services) = doc.get("services").and_then(Value::as_mapping) else {
                continue;
            };

            let mut directory = ServiceDirectory {
                path,
                services: BTreeMap::new(),
            };

            for (name, entry) in services {
                let Some(name) = name.as_str() else {
                    continue;
                };
                if !entry.is_mapping() {
                    continue;
                }

                let image = entry.get("image").and_then(Value::as_str).unwrap_or("");
                if !matches_search(image, criteria.image.as_deref()) {
                    continue;
                }

                let version = image_version(image);
                if !matches_search(version, criteria.version.as_deref()) {
                    continue;
                }

                let status = if resolve_status {
                    let status = self.prober.probe(&key, name);
                    if !matches_search(status.as_str(), criteria.status.as_deref()) {
                        continue;
                    }
                    status
                } else {
                    ServiceStatus::Pending
                };

                directory.services.insert(
                    name.to_string(),
                    ServiceInfo {
                        image: image.to_string(),
                        version: version.to_string(),
                        status,
                    },
                );
            }

            // A directory only shows up with at least one surviving service
            if !directory.services.is_empty() {
                total_services += directory.services.len();
                directories.insert(key, directory);
            }
        }

        Catalog {
            directories,
            total_services,
        }
    }

    /// Live status of a single service (a client-triggered refresh)
    pub fn status(&self, key: &str, service: &str) -> ServiceStatus {
        self.prober.probe(key, service)
    }
}

/// Coarse directory pre-filter: matching either the dir or the name search
/// keeps the directory in contention. Name search narrows services within a
/// directory conceptually, but also prunes directories early.
fn matches_directory(key: &str, criteria: &SearchCriteria) -> bool {
    let dir_ok = matches_search(key, criteria.dir.as_deref());
    let name_ok = criteria
        .name
        .as_deref()
        .is_some_and(|name| matches_search(key, Some(name)));

    dir_ok || name_ok
}
