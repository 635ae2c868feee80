pub mod edit;
pub mod export;
pub mod init;
pub mod new;
pub mod scenes;
pub mod stats;

pub use edit::{edit, EditArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use new::{new_script, NewArgs};
pub use scenes::scenes;
pub use stats::stats;

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use scripta_common::{FileStorage, KeyValueStorage};
use scripta_editor::{list_script_ids, read_record, SavedScript, ScriptStore};

/// Which stored script a command works on
#[derive(Debug, Args)]
pub struct ScriptTarget {
    /// Script id
    #[arg(required_unless_present = "latest", conflicts_with = "latest")]
    pub id: Option<String>,

    /// Use the most recently saved script
    #[arg(long)]
    pub latest: bool,
}

pub(crate) fn open_store(config: &Config, cwd: &str) -> Result<ScriptStore<FileStorage>> {
    let dir = config.get_storage_dir(cwd);
    let storage = FileStorage::open(&dir)
        .with_context(|| format!("Cannot open storage directory {}", dir.display()))?;
    Ok(ScriptStore::new(storage))
}

pub(crate) fn load_target<S: KeyValueStorage>(
    store: &mut ScriptStore<S>,
    target: &ScriptTarget,
) -> Result<()> {
    let id = match &target.id {
        Some(id) => id.clone(),
        None => latest_script_id(store.storage())?
            .ok_or_else(|| anyhow!("No saved scripts found"))?,
    };

    store
        .try_load(Some(&id))
        .with_context(|| format!("Cannot load script {}", id))
}

/// Id of the script with the newest `savedAt`
///
/// Unreadable records are skipped.
pub(crate) fn latest_script_id<S: KeyValueStorage>(storage: &S) -> Result<Option<String>> {
    let mut latest: Option<SavedScript> = None;

    for id in list_script_ids(storage)? {
        let record = match read_record(storage, Some(&id)) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "skipping unreadable script");
                continue;
            }
        };

        let newer = latest
            .as_ref()
            .map_or(true, |current| record.saved_at > current.saved_at);
        if newer {
            latest = Some(record);
        }
    }

    Ok(latest.map(|record| record.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use scripta_common::MemoryStorage;
    use scripta_editor::{storage_key, write_record};

    fn record(id: &str, hour: u32) -> SavedScript {
        SavedScript {
            id: id.to_string(),
            title: id.to_uppercase(),
            author: String::new(),
            elements: vec![],
            scenes: vec![],
            saved_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_latest_script_id_picks_newest_save() {
        let mut storage = MemoryStorage::new();
        write_record(&mut storage, &record("aaa", 9)).unwrap();
        write_record(&mut storage, &record("bbb", 17)).unwrap();
        write_record(&mut storage, &record("ccc", 12)).unwrap();
        storage.set(&storage_key("broken"), "{").unwrap();

        assert_eq!(latest_script_id(&storage).unwrap(), Some("bbb".to_string()));
    }

    #[test]
    fn test_load_target() {
        let mut storage = MemoryStorage::new();
        write_record(&mut storage, &record("aaa", 9)).unwrap();
        write_record(&mut storage, &record("bbb", 10)).unwrap();
        let mut store = ScriptStore::new(storage);

        let latest = ScriptTarget { id: None, latest: true };
        load_target(&mut store, &latest).unwrap();
        assert_eq!(store.document().title(), "BBB");

        let by_id = ScriptTarget { id: Some("aaa".to_string()), latest: false };
        load_target(&mut store, &by_id).unwrap();
        assert_eq!(store.document().title(), "AAA");

        let missing = ScriptTarget { id: Some("zzz".to_string()), latest: false };
        assert!(load_target(&mut store, &missing).is_err());
    }

    #[test]
    fn test_load_target_with_empty_storage() {
        let mut store = ScriptStore::new(MemoryStorage::new());
        let latest = ScriptTarget { id: None, latest: true };
        assert!(load_target(&mut store, &latest).is_err());
    }
}
