//! The nine fixed category slots.

use crate::config::CATEGORY_SLOTS;
use crate::error::{Result, SortError};
use crate::settings::CategoryRecord;
use std::path::{Path, PathBuf};

/// One destination slot. Slots are blanked, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub destination: PathBuf,
}

impl Category {
    /// A category can receive images only when both fields are set.
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty() && !self.destination.as_os_str().is_empty()
    }
}

/// What the shell needs to draw one category button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub slot: usize,
    pub label: String,
    pub usable: bool,
}

/// Fixed array of category slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStore {
    slots: [Category; CATEGORY_SLOTS],
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from persisted records; extra records are ignored and
    /// missing ones stay blank.
    pub fn from_records(records: &[CategoryRecord]) -> Self {
        let mut store = Self::new();
        for (slot, record) in store.slots.iter_mut().zip(records) {
            slot.name = record.name.clone();
            slot.destination = PathBuf::from(&record.path);
        }
        store
    }

    /// Always returns all nine slots.
    pub fn to_records(&self) -> Vec<CategoryRecord> {
        self.slots
            .iter()
            .map(|c| CategoryRecord {
                name: c.name.clone(),
                path: c.destination.to_string_lossy().into_owned(),
            })
            .collect()
    }

    fn check_slot(slot: usize) -> Result<()> {
        if slot < CATEGORY_SLOTS {
            Ok(())
        } else {
            Err(SortError::SlotOutOfRange(slot))
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Category> {
        self.slots.get(slot)
    }

    /// The category in `slot` if it is usable.
    pub fn usable(&self, slot: usize) -> Option<&Category> {
        self.get(slot).filter(|c| c.is_usable())
    }

    /// Stores a new name and destination. Both must be non-blank.
    pub fn set(&mut self, slot: usize, name: &str, destination: &Path) -> Result<()> {
        Self::check_slot(slot)?;
        let name = name.trim();
        if name.is_empty() || destination.to_string_lossy().trim().is_empty() {
            return Err(SortError::InvalidCategoryInput);
        }
        self.slots[slot] = Category {
            name: name.to_string(),
            destination: destination.to_path_buf(),
        };
        Ok(())
    }

    pub fn clear(&mut self, slot: usize) -> Result<()> {
        Self::check_slot(slot)?;
        self.slots[slot] = Category::default();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.slots = Default::default();
    }

    /// Button labels: `"1: Keep"` or `"1: Select a category"`.
    pub fn views(&self) -> Vec<CategoryView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, c)| {
                let usable = c.is_usable();
                let label = if usable {
                    format!("{}: {}", slot + 1, c.name)
                } else {
                    format!("{}: Select a category", slot + 1)
                };
                CategoryView { slot, label, usable }
            })
            .collect()
    }
}
