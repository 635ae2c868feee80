use crate::{CommonError, CommonResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key-value storage abstraction for persisted scripts
///
/// Keys are flat strings. Implementations are synchronous and local:
/// a call either completes or fails immediately.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> CommonResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> CommonResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> CommonResult<()>;

    /// All keys currently stored, in a stable order
    fn keys(&self) -> CommonResult<Vec<String>>;

    /// First key starting with `prefix`
    fn find_key(&self, prefix: &str) -> CommonResult<Option<String>> {
        Ok(self.keys()?.into_iter().find(|k| k.starts_with(prefix)))
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> CommonResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> CommonResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> CommonResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> CommonResult<Vec<String>> {
        (**self).keys()
    }
}

fn validate_key(key: &str) -> CommonResult<()> {
    let invalid = key.is_empty()
        || key.contains(['/', '\\'])
        || key.starts_with('.')
        || key.chars().any(char::is_control);

    if invalid {
        return Err(CommonError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Directory-backed storage: each key is a `<key>.json` file under `root`
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    const EXTENSION: &'static str = "json";

    /// Open storage rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> CommonResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> CommonResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, Self::EXTENSION)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> CommonResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> CommonResult<()> {
        let path = self.path_for(key)?;
        // Write-then-rename so a crash never leaves a half-written record
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(key, bytes = value.len(), "wrote storage record");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CommonResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> CommonResult<Vec<String>> {
        let mut keys = Vec::new();

        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(Self::EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }
}

/// In-memory storage for tests and browser hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total bytes (keys + values) this storage accepts
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> CommonResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CommonResult<()> {
        validate_key(key)?;

        if let Some(limit) = self.quota {
            let used = self.used_without(key) + key.len() + value.len();
            if used > limit {
                return Err(CommonError::QuotaExceeded { used, limit });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CommonResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> CommonResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
