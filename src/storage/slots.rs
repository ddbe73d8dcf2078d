use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use parking_lot::Mutex;

/// A persistent key-value slot holding one serialized payload per name.
pub trait SlotStorage: Send + Sync {
    /// Returns the payload stored under `slot`, or `None` when it was never written.
    fn read_slot(&self, slot: &str) -> Result<Option<String>>;
    /// Replaces the payload stored under `slot`.
    fn write_slot(&self, slot: &str, payload: &str) -> Result<()>;
}

/// Slots stored as `<root>/<slot>.json` files.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    root: PathBuf,
}

impl FileSlotStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        if slot.is_empty() || slot.contains(|c: char| c == '/' || c == '\\') || slot.starts_with('.') {
            bail!("Invalid slot name {slot:?}");
        }
        Ok(self.root.join(format!("{slot}.json")))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read slot {}", path.display()))?;
        Ok(Some(data))
    }

    fn write_slot(&self, slot: &str, payload: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create directory {}", self.root.display()))?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, payload)
            .with_context(|| format!("Failed to write slot {}", staging.display()))?;
        fs::rename(&staging, &path)
            .with_context(|| format!("Failed to replace slot {}", path.display()))?;
        Ok(())
    }
}

/// Process-local slots, used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(slot: impl Into<String>, payload: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.slots.lock().insert(slot.into(), payload.into());
        storage
    }

    pub fn snapshot(&self, slot: &str) -> Option<String> {
        self.slots.lock().get(slot).cloned()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().get(slot).cloned())
    }

    fn write_slot(&self, slot: &str, payload: &str) -> Result<()> {
        self.slots.lock().insert(slot.to_string(), payload.to_string());
        Ok(())
    }
}
