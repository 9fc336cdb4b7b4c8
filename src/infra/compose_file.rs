use crate::infra::ComposeDiscovery;
use anyhow::{Context, Result, bail};
use serde_yml::Value;
use std::fs;
use std::sync::Arc;

/// Reads and writes compose documents addressed by directory key.
///
/// Keys are re-resolved on every call; a document is never cached in memory.
/// `read` returning `Ok(None)` is the legitimate "directory vanished" case,
/// while parse and IO problems surface as errors for the caller to log.
#[derive(Debug, Clone)]
pub struct ComposeStore {
    discovery: Arc<ComposeDiscovery>,
}

impl ComposeStore {
    pub fn new(discovery: Arc<ComposeDiscovery>) -> Self {
        Self { discovery }
    }

    pub fn read(&self, key: &str) -> Result<Option<Value>> {
        let Some(path) = self.discovery.resolve(key) else {
            return Ok(None);
        };

        let content = fs::read_to_string(&path).with_context(|| format!("lendo {:?}", path))?;
        let doc: Value =
            serde_yml::from_str(&content).with_context(|| format!("parse de {:?}", path))?;

        Ok(Some(doc))
    }

    /// Serializes the whole document back over the compose file.
    ///
    /// Plain overwrite; a crash mid-write leaves a partial file. Key ordering
    /// and quoting may differ from the original formatting.
    pub fn write(&self, key: &str, doc: &Value) -> Result<()> {
        let Some(path) = self.discovery.resolve(key) else {
            bail!("Diretório desconhecido: {key}");
        };

        let yaml = serde_yml::to_string(doc).with_context(|| format!("serializando {key}"))?;
        fs::write(&path, yaml).with_context(|| format!("gravando {:?}", path))
    }
}

/// Image reference of one service, if the document defines it
pub fn service_image<'a>(doc: &'a Value, service: &str) -> Option<&'a str> {
    doc.get("services")?.get(service)?.get("image")?.as_str()
}

/// Replaces the image of one service; false when the entry has no image field
pub fn set_service_image(doc: &mut Value, service: &str, image: &str) -> bool {
    let Some(field) = doc
        .get_mut("services")
        .and_then(|services| services.get_mut(service))
        .and_then(|entry| entry.get_mut("image"))
    else {
        return false;
    };

    *field = Value::String(image.to_string());
    true
}
