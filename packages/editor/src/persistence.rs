//! Persisted script record and its storage keys
//!
//! Characters are not stored; they re-derive from the elements on load.

use crate::EditorError;
use chrono::{DateTime, Utc};
use scripta_common::KeyValueStorage;
use scripta_model::{Element, Scene};
use serde::{Deserialize, Serialize};

/// Every script key starts with this prefix
pub const STORAGE_KEY_PREFIX: &str = "scripta-script-";

pub fn storage_key(script_id: &str) -> String {
    format!("{}{}", STORAGE_KEY_PREFIX, script_id)
}

/// On-disk shape of a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScript {
    pub id: String,
    pub title: String,
    pub author: String,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    pub saved_at: DateTime<Utc>,
}

impl SavedScript {
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write a record under its id's key
pub fn write_record<S: KeyValueStorage + ?Sized>(
    storage: &mut S,
    record: &SavedScript,
) -> Result<(), EditorError> {
    let json = record.to_json()?;
    storage.set(&storage_key(&record.id), &json)?;
    Ok(())
}

/// Read the record for `script_id`, or the first script record when `None`
pub fn read_record<S: KeyValueStorage + ?Sized>(
    storage: &S,
    script_id: Option<&str>,
) -> Result<SavedScript, EditorError> {
    let key = match script_id {
        Some(id) => storage_key(id),
        None => storage
            .find_key(STORAGE_KEY_PREFIX)?
            .ok_or(EditorError::NoSavedScript)?,
    };

    let json = storage.get(&key)?.ok_or(EditorError::NoSavedScript)?;
    SavedScript::from_json(&json)
}

/// Ids of every stored script, in storage key order
pub fn list_script_ids<S: KeyValueStorage + ?Sized>(storage: &S) -> Result<Vec<String>, EditorError> {
    Ok(storage
        .keys()?
        .into_iter()
        .filter_map(|k| k.strip_prefix(STORAGE_KEY_PREFIX).map(str::to_string))
        .collect())
}
