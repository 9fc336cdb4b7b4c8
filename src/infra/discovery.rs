use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name that marks a subdirectory as a deployment directory
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// Locates compose files under the configured base directories.
///
/// Every call rescans the filesystem; directories may appear or disappear
/// between requests and the compose files are the only system of record.
#[derive(Debug, Clone)]
pub struct ComposeDiscovery {
    base_paths: Vec<PathBuf>,
}

impl ComposeDiscovery {
    pub fn new(base_paths: Vec<PathBuf>) -> Self {
        Self { base_paths }
    }

    /// Maps `{baseDirName}/{subDirName}` to the compose file path.
    ///
    /// Scans one level deep only. A missing or unreadable base path is
    /// skipped with a warning; the remaining base paths still contribute.
    pub fn discover(&self) -> BTreeMap<String, PathBuf> {
        let mut files = BTreeMap::new();

        for base_path in &self.base_paths {
            if !base_path.is_dir() {
                warn!("Diretório base não existe: {:?}", base_path);
                continue;
            }

            let entries = match fs::read_dir(base_path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Erro lendo diretório base {:?}: {}", base_path, e);
                    continue;
                }
            };

            let base_name = dir_name(base_path);

            for entry in entries.flatten() {
                let dir = entry.path();
                if !dir.is_dir() {
                    continue;
                }

                let compose_file = dir.join(COMPOSE_FILE_NAME);
                if !compose_file.is_file() {
                    debug!("Ignorando {:?} - sem {}", dir.file_name(), COMPOSE_FILE_NAME);
                    continue;
                }

                let key = format!("{}/{}", base_name, dir_name(&dir));

                // Last write wins on purpose; the warning is the only trace
                // a stack in an earlier base path was shadowed.
                if let Some(previous) = files.insert(key.clone(), compose_file) {
                    warn!("Chave duplicada '{}', sobrescrevendo {:?}", key, previous);
                }
            }
        }

        files
    }

    /// Resolves a directory key against a fresh discovery pass
    pub fn resolve(&self, key: &str) -> Option<PathBuf> {
        self.discover().remove(key)
    }

    pub fn base_paths(&self) -> &[PathBuf] {
        &self.base_paths
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn stack(base: &Path, name: &str, yaml: &str) {
        let dir = base.join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(COMPOSE_FILE_NAME), yaml).unwrap();
    }

    #[test]
    fn empty_base_path_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let discovery = ComposeDiscovery::new(vec![temp.path().to_path_buf()]);

        assert!(discovery.discover().is_empty());
    }

    #[test]
    fn subdirectory_without_compose_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("not-a-stack")).unwrap();

        let discovery = ComposeDiscovery::new(vec![temp.path().to_path_buf()]);
        assert!(discovery.discover().is_empty());
    }

    #[test]
    fn discovers_stacks_with_composite_keys() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("docker");
        fs::create_dir(&base).unwrap();
        stack(&base, "web", "services: {}\n");
        stack(&base, "db", "services: {}\n");
        fs::create_dir(base.join("empty")).unwrap();

        let discovery = ComposeDiscovery::new(vec![base.clone()]);
        let files = discovery.discover();

        assert_eq!(files.len(), 2);
        assert_eq!(
            files.get("docker/web"),
            Some(&base.join("web").join(COMPOSE_FILE_NAME))
        );
        assert_eq!(
            files.get("docker/db"),
            Some(&base.join("db").join(COMPOSE_FILE_NAME))
        );
    }

    #[test]
    fn missing_base_path_is_skipped() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("docker");
        fs::create_dir(&base).unwrap();
        stack(&base, "web", "services: {}\n");

        let discovery =
            ComposeDiscovery::new(vec![temp.path().join("does-not-exist"), base.clone()]);
        let files = discovery.discover();

        assert_eq!(files.len(), 1);
        assert!(files.contains_key("docker/web"));
    }

    #[test]
    fn duplicate_key_keeps_last_base_path() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("a").join("stacks");
        let second = temp.path().join("b").join("stacks");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        stack(&first, "web", "services: {}\n");
        stack(&second, "web", "services: {}\n");

        let discovery = ComposeDiscovery::new(vec![first, second.clone()]);
        let files = discovery.discover();

        assert_eq!(files.len(), 1);
        assert_eq!(
            files.get("stacks/web"),
            Some(&second.join("web").join(COMPOSE_FILE_NAME))
        );
    }

    #[test]
    fn resolve_finds_known_key() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("docker");
        fs::create_dir(&base).unwrap();
        stack(&base, "web", "services: {}\n");

        let discovery = ComposeDiscovery::new(vec![base.clone()]);

        assert_eq!(
            discovery.resolve("docker/web"),
            Some(base.join("web").join(COMPOSE_FILE_NAME))
        );
        assert_eq!(discovery.resolve("docker/gone"), None);
    }
}
