//! Settings reads for the completion pipeline
//!
//! Two keys gate the pipeline: `sweep.enabled` and `sweep.maxContextFiles`.
//! Reads go through the `Settings` trait so the editor host can back them
//! with its own configuration storage; `FileSettings` is the standalone
//! JSON-file backend.
//!
//! Values are read fresh on every invocation so live setting changes take
//! effect on the next keystroke. Reads fail open: unreadable storage means
//! defaults, never an error.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;

pub const ENABLED_KEY: &str = "sweep.enabled";
pub const MAX_CONTEXT_FILES_KEY: &str = "sweep.maxContextFiles";

/// Recent-buffer count bound used when `sweep.maxContextFiles` is unset.
pub const DEFAULT_MAX_CONTEXT_FILES: usize = 10;

/// Namespaced-key configuration reads with defaults.
pub trait Settings: Send + Sync {
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_usize(&self, key: &str, default: usize) -> usize;
}

/// Whether the completion pipeline is enabled. Defaults to true.
pub fn is_enabled(settings: &dyn Settings) -> bool {
    settings.get_bool(ENABLED_KEY, true)
}

/// Upper bound on recent buffers included in a request.
pub fn max_context_files(settings: &dyn Settings) -> usize {
    settings.get_usize(MAX_CONTEXT_FILES_KEY, DEFAULT_MAX_CONTEXT_FILES)
}

/// JSON-file settings store in the user config directory.
///
/// The file is a flat object of namespaced keys. Every read loads the file
/// from disk; a missing or corrupt file yields defaults.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: Option<PathBuf>,
}

impl FileSettings {
    /// Store backed by `<config dir>/sweep/settings.json`.
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join("sweep").join("settings.json")),
        }
    }

    /// Store backed by an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn read(&self, key: &str) -> Option<Value> {
        let path = self.path.as_ref()?;
        let content = fs::read_to_string(path).ok()?;
        let map: Value = serde_json::from_str(&content).ok()?;
        map.get(key).cloned()
    }

    /// Write a single key, creating the file and parent directory if needed.
    pub fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("could not determine settings path"))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut map = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or(Value::Null),
            Err(_) => Value::Null,
        };
        if !map.is_object() {
            map = Value::Object(serde_json::Map::new());
        }
        if let Some(obj) = map.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
        fs::write(path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings for FileSettings {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.read(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }

    fn get_usize(&self, key: &str, default: usize) -> usize {
        self.read(key)
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .unwrap_or(default)
    }
}
