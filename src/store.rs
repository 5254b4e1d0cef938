use std::fmt::Display;
use std::fs::{read_to_string, File};
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::transcript::Transcript;

/// Persisted mapping from show identifier to transcript, one JSON object.
/// Entries keep insertion order, so the file mirrors the processing order of
/// the input list. Saving truncates any previous file: each scraper run
/// starts from an empty store, never merging with an earlier one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TranscriptStore {
    entries: Vec<(String, Transcript)>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Replacing keeps the original position of the key.
    pub fn insert(&mut self, id: String, transcript: Transcript) {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, t)) => *t = transcript,
            None => self.entries.push((id, transcript)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Transcript> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Transcript)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = read_to_string(path).map_err(StoreError::IOError)?;
        serde_json::from_str(&raw).map_err(StoreError::JsonError)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let file = File::create(path).map_err(StoreError::IOError)?;
        serde_json::to_writer(file, self).map_err(StoreError::JsonError)
    }
}

impl Serialize for TranscriptStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, transcript) in &self.entries {
            map.serialize_entry(id, transcript)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TranscriptStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = TranscriptStore;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of show identifiers to transcripts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut store = TranscriptStore::new();
                while let Some((id, transcript)) = access.next_entry()? {
                    store.insert(id, transcript);
                }
                Ok(store)
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}

#[derive(Debug)]
pub enum StoreError {
    IOError(std::io::Error),
    JsonError(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IOError(e) => write!(f, "IO error: {}", e),
            StoreError::JsonError(e) => write!(f, "Json error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}
