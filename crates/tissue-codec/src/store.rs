//! Hierarchical key/value group store.
//!
//! The hierarchical tissue format is written through the [`GroupStore`]
//! trait so any container with groups, typed datasets and string attributes
//! can back it. [`MemoryGroupStore`] is a path-keyed implementation that can
//! be persisted as JSON.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Access to a container of nested groups addressed by `/`-separated paths.
pub trait GroupStore {
    /// Create a group. Parent groups must already exist.
    fn create_group(&mut self, path: &str) -> Result<()>;

    /// Write an integer vector dataset.
    fn write_ints(&mut self, path: &str, values: &[i32]) -> Result<()>;

    /// Write a float vector dataset.
    fn write_floats(&mut self, path: &str, values: &[f32]) -> Result<()>;

    /// Write a string attribute.
    fn write_attribute(&mut self, path: &str, value: &str) -> Result<()>;

    /// Names of the direct members of a group, in store order.
    fn list_group(&self, path: &str) -> Result<Vec<String>>;

    fn read_ints(&self, path: &str) -> Result<Vec<i32>>;

    fn read_floats(&self, path: &str) -> Result<Vec<f32>>;

    fn read_attribute(&self, path: &str) -> Result<String>;

    /// Whether any entry exists at `path`.
    fn contains(&self, path: &str) -> bool;
}

/// A single entry of a [`MemoryGroupStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoreEntry {
    Group,
    Ints(Vec<i32>),
    Floats(Vec<f32>),
    Attribute(String),
}

/// In-memory group store keyed by absolute path. Members are listed in
/// lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryGroupStore {
    entries: BTreeMap<String, StoreEntry>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store previously written by [`MemoryGroupStore::save_json`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CodecError::from_open(e, path))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn entry(&self, path: &str) -> Option<&StoreEntry> {
        self.entries.get(path)
    }

    fn insert(&mut self, path: &str, entry: StoreEntry) -> Result<()> {
        let path = normalize(path)?;
        let parent = parent_of(&path);
        if !parent.is_empty() && self.entries.get(parent) != Some(&StoreEntry::Group) {
            return Err(CodecError::missing_entry(parent));
        }
        self.entries.insert(path, entry);
        Ok(())
    }

    fn get(&self, path: &str) -> Result<&StoreEntry> {
        self.entries
            .get(path)
            .ok_or_else(|| CodecError::missing_entry(path))
    }
}

impl GroupStore for MemoryGroupStore {
    fn create_group(&mut self, path: &str) -> Result<()> {
        let path = normalize(path)?;
        if self.entries.contains_key(&path) {
            return Err(CodecError::format_violation(format!(
                "entry already exists: {path}"
            )));
        }
        self.insert(&path, StoreEntry::Group)
    }

    fn write_ints(&mut self, path: &str, values: &[i32]) -> Result<()> {
        self.insert(path, StoreEntry::Ints(values.to_vec()))
    }

    fn write_floats(&mut self, path: &str, values: &[f32]) -> Result<()> {
        self.insert(path, StoreEntry::Floats(values.to_vec()))
    }

    fn write_attribute(&mut self, path: &str, value: &str) -> Result<()> {
        self.insert(path, StoreEntry::Attribute(value.to_string()))
    }

    fn list_group(&self, path: &str) -> Result<Vec<String>> {
        if self.get(path)? != &StoreEntry::Group {
            return Err(CodecError::format_violation(format!(
                "{path} is not a group"
            )));
        }
        let prefix = format!("{}/", path.trim_end_matches('/'));
        Ok(self
            .entries
            .range(prefix.clone()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(&prefix))
            .filter_map(|key| {
                let member = &key[prefix.len()..];
                (!member.contains('/')).then(|| member.to_string())
            })
            .collect())
    }

    fn read_ints(&self, path: &str) -> Result<Vec<i32>> {
        match self.get(path)? {
            StoreEntry::Ints(values) => Ok(values.clone()),
            _ => Err(CodecError::format_violation(format!(
                "{path} is not an integer dataset"
            ))),
        }
    }

    fn read_floats(&self, path: &str) -> Result<Vec<f32>> {
        match self.get(path)? {
            StoreEntry::Floats(values) => Ok(values.clone()),
            _ => Err(CodecError::format_violation(format!(
                "{path} is not a float dataset"
            ))),
        }
    }

    fn read_attribute(&self, path: &str) -> Result<String> {
        match self.get(path)? {
            StoreEntry::Attribute(value) => Ok(value.clone()),
            _ => Err(CodecError::format_violation(format!(
                "{path} is not a string attribute"
            ))),
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}

/// Require an absolute path without a trailing separator.
fn normalize(path: &str) -> Result<String> {
    if !path.starts_with('/') || path.len() < 2 {
        return Err(CodecError::format_violation(format!(
            "invalid store path: {path:?}"
        )));
    }
    Ok(path.trim_end_matches('/').to_string())
}

fn parent_of(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_direct_members_only() {
        let mut store = MemoryGroupStore::new();
        store.create_group("/Tissues").unwrap();
        store.write_ints("/Tissues/version", &[1]).unwrap();
        store.create_group("/Tissues/Bone").unwrap();
        store.write_floats("/Tissues/Bone/rgbo", &[1.0; 4]).unwrap();
        store.create_group("/TissuesExtra").unwrap();

        let members = store.list_group("/Tissues").unwrap();
        assert_eq!(members, vec!["Bone".to_string(), "version".to_string()]);
    }

    #[test]
    fn test_requires_parent_group() {
        let mut store = MemoryGroupStore::new();
        let err = store.write_ints("/Tissues/version", &[1]).unwrap_err();
        assert!(matches!(err, CodecError::MissingEntry { .. }));
    }

    #[test]
    fn test_typed_reads() {
        let mut store = MemoryGroupStore::new();
        store.create_group("/G").unwrap();
        store.write_attribute("/G/path", "Organs").unwrap();
        assert_eq!(store.read_attribute("/G/path").unwrap(), "Organs");
        assert!(store.read_ints("/G/path").is_err());
        assert!(store.read_floats("/G/missing").is_err());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let mut store = MemoryGroupStore::new();
        store.create_group("/G").unwrap();
        assert!(store.create_group("/G").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut store = MemoryGroupStore::new();
        store.create_group("/G").unwrap();
        store.write_floats("/G/rgbo", &[0.5, 0.25, 1.0, 0.5]).unwrap();
        let json = serde_json::to_string(&store).unwrap();
        let round: MemoryGroupStore = serde_json::from_str(&json).unwrap();
        assert_eq!(round, store);
    }
}
