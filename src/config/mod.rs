//! Hierarchical config store backed by one YAML document.
//!
//! Keys are dot-separated paths (`defaults.color`, `permissions.rename`). The store is
//! loaded once, healed with the built-in defaults ([`ensure_defaults`]) and flushed
//! once if healing added anything. After that every [`ConfigStore::set`] flushes the
//! whole document immediately; writes are rare admin actions.
//!
//! Read or write failures are fatal for the process: a corrupt config would silently
//! corrupt the defaults of every container created afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde_norway::{Mapping, Value};

use crate::error::{Result, SatchelError};

mod access;
mod schema;

pub use access::Recipe;
pub use schema::{default_entries, ensure_defaults};


/// In-memory view of the config document plus its location on disk.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    root: Value,
    dirty: bool,
}

impl ConfigStore {
    /// What: Load the document at `path`, insert missing defaults and flush once if needed.
    ///
    /// Inputs:
    /// - `path`: Location of the YAML document; it may not exist yet
    ///
    /// Output:
    /// - Ready-to-use store
    ///
    /// # Errors
    /// - `PersistenceFailure` when the file cannot be read, parsed or written back
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let root = load_document(&path)?;
        let mut store = Self {
            path,
            root,
            dirty: false,
        };
        let inserted = ensure_defaults(&mut store);
        if store.dirty {
            tracing::info!(
                path = %store.path.display(),
                inserted,
                "[Config] Inserted missing defaults"
            );
            store.flush()?;
        }
        tracing::debug!(path = %store.path.display(), "[Config] Loaded config store");
        Ok(store)
    }

    /// What: [`Self::open`], terminating the process on failure.
    ///
    /// Details:
    /// - Logs the failure with `error!` before exiting with status 1.
    #[must_use]
    pub fn open_or_exit(path: impl Into<PathBuf>) -> Self {
        Self::open(path).unwrap_or_else(|err| exit_on_persistence_failure(&err))
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when in-memory changes have not been flushed.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The whole document.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// What: Read the value at a dot-separated key path.
    ///
    /// Output:
    /// - `None` when any segment is missing or walks through a non-mapping value
    #[must_use]
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        let mut cursor = &self.root;
        for segment in key_path.split('.') {
            cursor = cursor.as_mapping()?.get(segment)?;
        }
        Some(cursor)
    }

    /// True when `key_path` resolves to a value.
    #[must_use]
    pub fn contains(&self, key_path: &str) -> bool {
        self.get(key_path).is_some()
    }

    /// String value at `key_path`.
    #[must_use]
    pub fn get_str(&self, key_path: &str) -> Option<&str> {
        self.get(key_path)?.as_str()
    }

    /// Boolean value at `key_path`.
    #[must_use]
    pub fn get_bool(&self, key_path: &str) -> Option<bool> {
        self.get(key_path)?.as_bool()
    }

    /// What: Write `value` at `key_path` and flush the document.
    ///
    /// Details:
    /// - Intermediate mappings are created; a scalar in the way is replaced by a mapping.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty path or empty segment
    /// - `PersistenceFailure` when the flush fails
    pub fn set(&mut self, key_path: &str, value: Value) -> Result<()> {
        self.write(key_path, value)?;
        tracing::info!(key = key_path, "[Config] Updated key");
        self.flush()
    }

    /// What: [`Self::set`], terminating the process when persisting fails.
    ///
    /// Details:
    /// - Path errors are still returned; only persistence failures are fatal.
    ///
    /// # Errors
    /// - `InvalidArgument` for a malformed key path
    pub fn set_or_exit(&mut self, key_path: &str, value: Value) -> Result<()> {
        match self.set(key_path, value) {
            Err(err @ SatchelError::PersistenceFailure { .. }) => exit_on_persistence_failure(&err),
            other => other,
        }
    }

    /// What: Insert `value` only if `key_path` is absent, marking the store dirty.
    ///
    /// Output:
    /// - `true` when the value was inserted
    pub(crate) fn insert_default(&mut self, key_path: &str, value: Value) -> bool {
        if self.contains(key_path) {
            return false;
        }
        match self.write(key_path, value) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key = key_path, error = %err, "[Config] Skipped default");
                false
            }
        }
    }

    /// What: Persist the whole document.
    ///
    /// # Errors
    /// - `PersistenceFailure` when serializing or writing fails
    pub fn flush(&mut self) -> Result<()> {
        let text = serde_norway::to_string(&self.root)
            .map_err(|e| SatchelError::persistence(&self.path, e))?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| SatchelError::persistence(dir, e))?;
        }
        fs::write(&self.path, &text).map_err(|e| SatchelError::persistence(&self.path, e))?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = text.len(),
            "[Config] Config persisted"
        );
        self.dirty = false;
        Ok(())
    }

    fn write(&mut self, key_path: &str, value: Value) -> Result<()> {
        let segments: Vec<&str> = key_path.split('.').collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(SatchelError::invalid_argument(format!(
                "malformed config key path '{key_path}'"
            )));
        }
        let Some((last, parents)) = segments.split_last() else {
            return Err(SatchelError::invalid_argument("empty config key path"));
        };
        let not_a_mapping =
            || SatchelError::invalid_state(format!("config path '{key_path}' is not a mapping"));
        let mut cursor = &mut self.root;
        for segment in parents {
            cursor = child_mapping(cursor, segment).ok_or_else(not_a_mapping)?;
        }
        ensure_mapping(cursor)
            .ok_or_else(not_a_mapping)?
            .insert(Value::String((*last).to_string()), value);
        self.dirty = true;
        Ok(())
    }
}

impl Drop for ConfigStore {
    fn drop(&mut self) {
        if self.dirty
            && let Err(err) = self.flush()
        {
            tracing::error!(error = %err, "[Config] Failed to flush config on teardown");
        }
    }
}

/// What: Log a persistence failure and terminate the process.
pub fn exit_on_persistence_failure(err: &SatchelError) -> ! {
    tracing::error!(error = %err, "[Config] Config persistence failed; shutting down");
    eprintln!("satchel: {err}");
    std::process::exit(1);
}

fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    let content = fs::read_to_string(path).map_err(|e| SatchelError::persistence(path, e))?;
    if content.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    let doc: Value =
        serde_norway::from_str(&content).map_err(|e| SatchelError::persistence(path, e))?;
    match doc {
        Value::Mapping(_) => Ok(doc),
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        _ => Err(SatchelError::persistence(
            path,
            "top level of the config document must be a mapping",
        )),
    }
}

fn ensure_mapping(value: &mut Value) -> Option<&mut Mapping> {
    if !value.is_mapping() {
        *value = Value::Mapping(Mapping::new());
    }
    value.as_mapping_mut()
}

fn child_mapping<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    let child = ensure_mapping(value)?
        .entry(Value::String(segment.to_string()))
        .or_insert(Value::Mapping(Mapping::new()));
    if !child.is_mapping() {
        *child = Value::Mapping(Mapping::new());
    }
    Some(child)
}
