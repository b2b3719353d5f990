//! The key-value settings collaborator the log persists through, and the
//! bundled backends.
//!
//! - [`MemorySettingsStore`]: in-memory storage for tests and transient runs
//! - [`FileSettingsStore`]: one JSON file per context, with an in-process
//!   cache and explicit refresh

use std::{
    collections::HashMap,
    fmt::Debug,
    fs,
    path::PathBuf,
    sync::RwLock,
};

use serde_json::Value;

use crate::{error::Result, record::ContextId};

/// External key-value settings store, scoped by context.
///
/// The host usually brings its own implementation backed by whatever it
/// persists plugin state in; the bundled backends cover tests and simple
/// deployments.
pub trait SettingsStore: Send + Sync + Debug {
    /// The value stored under (`context`, `name`), if any.
    ///
    /// Backends with an in-process cache may serve a stale value here;
    /// callers that need externally written state call [`refresh`] first.
    ///
    /// [`refresh`]: SettingsStore::refresh
    ///
    /// # Errors
    /// If the backing medium cannot be read or the stored value decoded.
    fn get(&self, context: ContextId, name: &str) -> Result<Option<Value>>;

    /// Store `value` under (`context`, `name`), replacing any previous value.
    ///
    /// # Errors
    /// If the backing medium cannot be written.
    fn update(&self, context: ContextId, name: &str, value: Value) -> Result<()>;

    /// Drop any in-process cache for `context` so the next read observes the
    /// backing medium. A no-op for backends without a cache.
    ///
    /// # Errors
    /// If the cache cannot be accessed.
    fn refresh(&self, context: ContextId) -> Result<()>;
}

/// In-memory settings store.
///
/// Backed by a `HashMap` behind an `RwLock`, in the same shape as a
/// memory-backed spool: intended for tests, usable for transient runs.
/// There is no cache layer, so [`SettingsStore::refresh`] is a no-op.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<HashMap<(ContextId, String), Value>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, context: ContextId, name: &str) -> Result<Option<Value>> {
        Ok(self
            .settings
            .read()?
            .get(&(context, name.to_string()))
            .cloned())
    }

    fn update(&self, context: ContextId, name: &str, value: Value) -> Result<()> {
        self.settings
            .write()?
            .insert((context, name.to_string()), value);
        Ok(())
    }

    fn refresh(&self, _context: ContextId) -> Result<()> {
        Ok(())
    }
}

/// File-backed settings store.
///
/// Stores each context's settings as a JSON object in
/// `context_{id}.json` under the configured directory. Reads are served
/// from an in-process cache that is filled on first access; writes rewrite
/// the whole file through a temp-file-then-rename so a crash never leaves a
/// half-written settings file behind.
///
/// Because of the cache, a value written through one handle is not visible
/// to another handle over the same directory until that handle refreshes
/// the context.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    cache: RwLock<HashMap<ContextId, HashMap<String, Value>>>,
}

impl FileSettingsStore {
    /// Open a settings store rooted at `path`, creating the directory if it
    /// does not exist.
    ///
    /// # Errors
    /// If the directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            cache: RwLock::default(),
        })
    }

    fn context_file(&self, context: ContextId) -> PathBuf {
        self.path.join(format!("context_{context}.json"))
    }

    fn load(&self, context: ContextId) -> Result<HashMap<String, Value>> {
        let file = self.context_file(context);
        if !file.exists() {
            return Ok(HashMap::new());
        }

        let data = fs::read(&file)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn persist(&self, context: ContextId, settings: &HashMap<String, Value>) -> Result<()> {
        let file = self.context_file(context);
        let staged = file.with_extension("json.tmp");

        fs::write(&staged, serde_json::to_vec_pretty(settings)?)?;
        fs::rename(&staged, &file)?;

        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, context: ContextId, name: &str) -> Result<Option<Value>> {
        {
            let cache = self.cache.read()?;
            if let Some(settings) = cache.get(&context) {
                return Ok(settings.get(name).cloned());
            }
        }

        let settings = self.load(context)?;
        let value = settings.get(name).cloned();
        self.cache.write()?.insert(context, settings);

        Ok(value)
    }

    fn update(&self, context: ContextId, name: &str, value: Value) -> Result<()> {
        let mut cache = self.cache.write()?;
        let mut settings = match cache.remove(&context) {
            Some(settings) => settings,
            None => self.load(context)?,
        };

        settings.insert(name.to_string(), value);
        self.persist(context, &settings)?;
        cache.insert(context, settings);

        Ok(())
    }

    fn refresh(&self, context: ContextId) -> Result<()> {
        self.cache.write()?.remove(&context);
        Ok(())
    }
}
