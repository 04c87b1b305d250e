//! Read-aloud paragraph tracking.
//!
//! Instructions are split into paragraphs; the reader ticks paragraphs off as
//! they go. Progress for each meal is persisted through a [`KeyValueStore`].

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

const KEY_PREFIX: &str = "readParagraphs";

/// Splits text on runs of newlines, dropping blank paragraphs.
///
/// ```rust
/// use gitchen::reading::segment_paragraphs;
///
/// let paragraphs = segment_paragraphs("Boil water.\r\n\r\n  \nAdd pasta.\n");
/// assert_eq!(paragraphs, vec!["Boil water.", "Add pasta."]);
/// ```
#[must_use]
pub fn segment_paragraphs(text: &str) -> Vec<String> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// String key/value persistence, e.g. browser local storage or a file.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in a single JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("file store lock poisoned"))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("file store lock poisoned"))?;

        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&all)?)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Which paragraphs of one recipe's instructions have been read.
pub struct ReadingProgress<'a> {
    store: &'a dyn KeyValueStore,
    meal_id: String,
    checked: BTreeSet<usize>,
}

impl<'a> ReadingProgress<'a> {
    /// Loads saved progress. Unreadable saved state starts fresh.
    pub fn load(store: &'a dyn KeyValueStore, meal_id: &str) -> Result<Self> {
        let checked = store
            .get(&Self::key(meal_id))?
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Ok(Self {
            store,
            meal_id: meal_id.to_string(),
            checked,
        })
    }

    fn key(meal_id: &str) -> String {
        format!("{KEY_PREFIX}:{meal_id}")
    }

    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.contains(&index)
    }

    #[must_use]
    pub fn checked(&self) -> Vec<usize> {
        self.checked.iter().copied().collect()
    }

    pub fn mark(&mut self, index: usize) -> Result<()> {
        if self.checked.insert(index) {
            self.save()?;
        }
        Ok(())
    }

    pub fn unmark(&mut self, index: usize) -> Result<()> {
        if self.checked.remove(&index) {
            self.save()?;
        }
        Ok(())
    }

    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        if self.checked.contains(&index) {
            self.unmark(index)?;
            Ok(false)
        } else {
            self.mark(index)?;
            Ok(true)
        }
    }

    pub fn reset(&mut self) -> Result<()> {
        self.checked.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.checked)?;
        self.store.set(&Self::key(&self.meal_id), &raw)
    }
}
