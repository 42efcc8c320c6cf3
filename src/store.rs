//! Configuration and credential persistence
//!
//! Two durable files, always rewritten in full:
//! - a JSON document holding the ordered `items` list the dashboard edits
//! - a `NAME=VALUE` env file holding provider API keys
//!
//! Saves are a total-state snapshot, not a merge: keys absent from the input
//! are dropped from disk. Writes go to a temp file first and are renamed into
//! place so a concurrent reader never observes a half-written file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::credentials::{self, CredentialSet, KNOWN_CREDENTIALS};

/// The persisted configuration document.
///
/// `items` is an ordered list of opaque records (styles/channels); the
/// schema of each record is owned by the dashboard and not validated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persists the configuration document and credential file.
pub struct ConfigStore {
    config_path: PathBuf,
    env_path: PathBuf,
    // Serializes saves within this process; last writer wins at file
    // granularity either way.
    write_lock: Mutex<()>,
}

impl ConfigStore {
    pub fn new(config_path: impl Into<PathBuf>, env_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            env_path: env_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Overwrite both backing files with the given state.
    ///
    /// Filesystem errors surface to the caller; this is the only store
    /// operation permitted to fail.
    pub async fn save(
        &self,
        document: &ConfigDocument,
        api_keys: &CredentialSet,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let config_json = serde_json::to_string_pretty(document)?;
        write_atomic(&self.config_path, config_json.as_bytes()).await?;

        let env_content = credentials::serialize_env_lines(api_keys);
        write_atomic(&self.env_path, env_content.as_bytes()).await?;

        Ok(())
    }

    /// Read back the current state. Never fails: a missing or malformed
    /// config file is treated as "no prior config" and yields an empty
    /// document.
    ///
    /// The returned credential set contains exactly the known credential
    /// names, defaulting to the empty string when absent from the file.
    /// Other names saved to the env file stay on disk but are not surfaced
    /// here.
    pub async fn load(&self) -> (ConfigDocument, CredentialSet) {
        let document = match fs::read_to_string(&self.config_path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(error = %err, path = %self.config_path.display(),
                    "config file is malformed, starting from empty");
                ConfigDocument::default()
            }),
            Err(_) => ConfigDocument::default(),
        };

        let on_disk = match fs::read_to_string(&self.env_path).await {
            Ok(content) => credentials::parse_env_lines(&content),
            Err(_) => CredentialSet::new(),
        };

        let api_keys = KNOWN_CREDENTIALS
            .iter()
            .map(|&name| {
                let value = on_disk.get(name).cloned().unwrap_or_default();
                (name.to_string(), value)
            })
            .collect();

        (document, api_keys)
    }
}

/// Write to a uniquely named temp file in the target directory, then rename
/// over the destination.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    fs::write(&temp_path, contents).await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}
