//! Integration tests for the script store: persistence, autosave and
//! keyboard commands working together

use scripta_common::{FileStorage, KeyValueStorage, MemoryStorage};
use scripta_editor::{
    list_script_ids, read_record, resolve, storage_key, Command, CommandOutcome, ElementKeyContext,
    Key, KeyChord, ManualClock, ScriptStore, StoreOptions,
};
use scripta_model::ElementType;
use std::time::Duration;

fn memory_store() -> (ScriptStore<MemoryStorage>, ManualClock) {
    let clock = ManualClock::new();
    let store = ScriptStore::with_clock(
        MemoryStorage::new(),
        StoreOptions::default(),
        Box::new(clock.clone()),
    );
    (store, clock)
}

fn write_short_scene<S: KeyValueStorage>(store: &mut ScriptStore<S>) {
    let heading = store.document().elements()[0].id.clone();
    store.update_element(&heading, "int. bus station - night");
    store.set_active_element(Some(&heading));

    let action = store
        .insert_element_after(&heading, ElementType::Action, "Rain hits glass.")
        .unwrap();
    let cue = store
        .insert_element_after(&action.id, ElementType::Character, "marla")
        .unwrap();
    store.insert_element_after(&cue.id, ElementType::Dialogue, "Get out.");
}

#[test]
fn test_save_load_round_trip() -> anyhow::Result<()> {
    let (mut store, _) = memory_store();
    store.set_title("Night Bus");
    store.set_author("R. Writer");
    write_short_scene(&mut store);
    store.save()?;

    let saved_id = store.document().id().to_string();
    let elements = store.document().elements().to_vec();
    let scenes = store.document().scenes().to_vec();
    let characters = store.document().characters().clone();

    store.new_script();
    assert_ne!(store.document().id(), saved_id);

    assert!(store.load(Some(&saved_id)));
    let doc = store.document();
    assert_eq!(doc.title(), "Night Bus");
    assert_eq!(doc.author(), "R. Writer");
    assert_eq!(doc.elements(), elements.as_slice());
    assert_eq!(doc.scenes(), scenes.as_slice());
    assert_eq!(doc.characters(), &characters);
    assert!(!doc.is_dirty());
    assert_eq!(doc.active_element_id(), Some(elements[0].id.as_str()));

    Ok(())
}

#[test]
fn test_load_without_id_picks_stored_script() {
    let (mut store, _) = memory_store();
    write_short_scene(&mut store);
    store.save().unwrap();
    let saved_id = store.document().id().to_string();

    store.new_script();
    assert!(store.load(None));
    assert_eq!(store.document().id(), saved_id);
}

#[test]
fn test_load_missing_keeps_current_document() {
    let (mut store, _) = memory_store();
    store.set_title("Keep me");

    assert!(!store.load(None));
    assert!(!store.load(Some("unknown")));
    assert_eq!(store.document().title(), "Keep me");
}

#[test]
fn test_stored_record_does_not_carry_characters() {
    let (mut store, _) = memory_store();
    write_short_scene(&mut store);
    store.save().unwrap();

    let key = storage_key(store.document().id());
    let json = store.storage().get(&key).unwrap().unwrap();
    assert!(json.contains("\"elements\""));
    assert!(json.contains("\"scenes\""));
    assert!(!json.contains("\"characters\""));
    assert!(!json.contains("focus"));
}

#[test]
fn test_autosave_writes_once_after_burst() {
    let (mut store, clock) = memory_store();
    let heading = store.document().elements()[0].id.clone();

    for (i, text) in ["i", "in", "int", "int.", "int. roof"].iter().enumerate() {
        store.update_element(&heading, *text);
        clock.advance(Duration::from_millis(300 * (i as u64 + 1)));
        store.tick();
    }
    // Last edit at t=3000ms (after the 4th advance), then +1500ms
    assert!(store.storage().is_empty());

    clock.advance(Duration::from_millis(500));
    assert!(store.tick());

    let record = read_record(store.storage(), None).unwrap();
    assert_eq!(record.elements[0].content, "INT. ROOF");
    assert!(store.document().last_saved().is_some());
}

#[test]
fn test_flush_autosave_writes_pending_changes() {
    let (mut store, _) = memory_store();
    assert!(!store.flush_autosave());

    store.set_title("Flushed");
    assert!(store.flush_autosave());
    assert!(!store.autosave_pending());
    assert_eq!(store.storage().len(), 1);
}

#[test]
fn test_custom_debounce() {
    let clock = ManualClock::new();
    let options = StoreOptions {
        autosave_debounce: Duration::from_millis(100),
    };
    let mut store = ScriptStore::with_clock(MemoryStorage::new(), options, Box::new(clock.clone()));

    store.toggle_focus_mode();
    clock.advance(Duration::from_millis(100));
    assert!(store.tick());
}

#[test]
fn test_quota_failure_keeps_dirty_and_reports_error() {
    let clock = ManualClock::new();
    let mut store = ScriptStore::with_clock(
        MemoryStorage::with_quota(64),
        StoreOptions::default(),
        Box::new(clock.clone()),
    );
    write_short_scene(&mut store);

    assert!(store.save().is_err());
    assert!(store.document().is_dirty());
    assert!(store.document().last_saved().is_none());
}

#[test]
fn test_file_storage_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let saved_id = {
        let mut store = ScriptStore::new(FileStorage::open(dir.path())?);
        store.set_title("On Disk");
        write_short_scene(&mut store);
        store.save()?;
        store.document().id().to_string()
    };

    let storage = FileStorage::open(dir.path())?;
    assert_eq!(list_script_ids(&storage)?, vec![saved_id.clone()]);

    let mut store = ScriptStore::new(storage);
    assert!(store.load(Some(&saved_id)));
    assert_eq!(store.document().title(), "On Disk");
    assert_eq!(store.document().scenes().len(), 1);

    Ok(())
}

#[test]
fn test_analytics_for_short_scene() {
    let (mut store, _) = memory_store();
    write_short_scene(&mut store);

    let analytics = store.analytics();
    assert_eq!(analytics.page_count, 1);
    assert_eq!(analytics.scene_count, 1);
    assert_eq!(analytics.character_count, 1);
    // "Get out." is 8 chars against 16 of action
    assert_eq!((analytics.dialogue, analytics.action), (33, 67));
    assert_eq!(analytics.ratio, "33:67");
    assert_eq!(analytics.characters[0].name, "MARLA");
}

#[test]
fn test_act_groups_cover_every_scene() {
    let (mut store, _) = memory_store();
    let mut last = store.document().elements()[0].id.clone();
    for i in 0..7 {
        let heading = store
            .insert_element_after(&last, ElementType::SceneHeading, format!("int. room {} - day", i))
            .unwrap();
        last = heading.id;
    }

    let acts = store.act_groups();
    let total = acts.act_one.len() + acts.act_two.len() + acts.act_three.len();
    assert_eq!(total, 8);
    assert_eq!(acts.act_one.len(), 3);
    assert_eq!(acts.act_two.len(), 4);
    assert_eq!(acts.act_three.len(), 1);
}

#[test]
fn test_keyboard_flow() {
    let (mut store, _) = memory_store();
    let heading = store.document().elements()[0].id.clone();
    store.update_element(&heading, "ext. pier - dawn");

    let ctx = ElementKeyContext::default();

    // Enter after a heading gives an action line
    let enter = resolve(&KeyChord::plain(Key::Enter), Some(&ctx)).unwrap();
    assert_eq!(store.execute(Some(&heading), enter), CommandOutcome::Applied);
    let action_id = store.document().active_element_id().unwrap().to_string();
    assert_eq!(
        store.document().element(&action_id).unwrap().element_type,
        ElementType::Action
    );

    // Mod+3 makes it a character cue, Tab cycles to dialogue
    let set_character = resolve(&KeyChord::with_mod(Key::Char('3')), Some(&ctx)).unwrap();
    store.execute(Some(&action_id), set_character);
    let tab = resolve(&KeyChord::plain(Key::Tab), Some(&ctx)).unwrap();
    store.execute(Some(&action_id), tab);
    assert_eq!(
        store.document().element(&action_id).unwrap().element_type,
        ElementType::Dialogue
    );

    // Backspace on the empty line removes it and focuses the heading
    let empty = ElementKeyContext { content_empty: true, ..ctx };
    let backspace = resolve(&KeyChord::plain(Key::Backspace), Some(&empty)).unwrap();
    assert_eq!(store.execute(Some(&action_id), backspace), CommandOutcome::Applied);
    assert_eq!(store.document().active_element_id(), Some(heading.as_str()));

    // Palette from outside an element is a shell concern
    let palette = resolve(&KeyChord::plain(Key::Char('/')), None).unwrap();
    assert_eq!(palette, Command::OpenCommandPalette);
    assert_eq!(store.execute(None, palette), CommandOutcome::Shell);
}
