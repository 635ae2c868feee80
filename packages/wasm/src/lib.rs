use scripta_common::{KeyValueStorage, MemoryStorage};
use scripta_compiler_fountain::{compile_to_fountain, fountain_file_name};
use scripta_compiler_html::{compile_to_html, CompileOptions};
use scripta_editor::{
    storage_key, write_record, ManualClock, Mutation, SavedScript, ScriptStore, StoreOptions,
};
use scripta_model::{suggestions, CharacterMap, Element, ElementType, Scene};
use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Snapshot handed to the browser shell after each change
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateView<'a> {
    id: &'a str,
    title: &'a str,
    author: &'a str,
    elements: &'a [Element],
    scenes: &'a [Scene],
    characters: &'a CharacterMap,
    active_element_id: Option<&'a str>,
    current_scene_id: Option<&'a str>,
    focus_mode: bool,
    left_panel_open: bool,
    right_panel_open: bool,
    is_dirty: bool,
    version: u64,
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

/// Script store driven from JavaScript
///
/// The host owns the timer: it calls `tick(nowMs)` periodically and reads
/// `saveJson()` when it wants to persist to its own storage.
#[wasm_bindgen]
pub struct ScriptEditor {
    store: ScriptStore<MemoryStorage>,
    clock: ManualClock,
}

#[wasm_bindgen]
impl ScriptEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(autosave_debounce_ms: Option<u32>) -> ScriptEditor {
        let clock = ManualClock::new();
        let mut options = StoreOptions::default();
        if let Some(ms) = autosave_debounce_ms {
            options.autosave_debounce = Duration::from_millis(u64::from(ms));
        }

        let store = ScriptStore::with_clock(MemoryStorage::new(), options, Box::new(clock.clone()));
        ScriptEditor { store, clock }
    }

    /// Apply one JSON-encoded mutation; false when it changed nothing
    pub fn apply(&mut self, mutation_json: &str) -> Result<bool, JsValue> {
        let mutation: Mutation =
            serde_json::from_str(mutation_json).map_err(|e| js_error("Invalid mutation", e))?;
        Ok(self.store.dispatch(mutation).is_some())
    }

    /// Insert after `after_id`; returns the new element's id
    #[wasm_bindgen(js_name = insertElementAfter)]
    pub fn insert_element_after(
        &mut self,
        after_id: &str,
        element_type: &str,
        content: &str,
    ) -> Result<Option<String>, JsValue> {
        let element_type: ElementType = element_type
            .parse()
            .map_err(|e| js_error("Invalid element type", e))?;

        Ok(self
            .store
            .insert_element_after(after_id, element_type, content)
            .map(|element| element.id))
    }

    #[wasm_bindgen(js_name = newScript)]
    pub fn new_script(&mut self) {
        self.store.new_script();
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        let doc = self.store.document();
        let ui = doc.ui();
        let view = StateView {
            id: doc.id(),
            title: doc.title(),
            author: doc.author(),
            elements: doc.elements(),
            scenes: doc.scenes(),
            characters: doc.characters(),
            active_element_id: doc.active_element_id(),
            current_scene_id: doc.current_scene_id(),
            focus_mode: ui.focus_mode,
            left_panel_open: ui.left_panel_open,
            right_panel_open: ui.right_panel_open,
            is_dirty: doc.is_dirty(),
            version: doc.version(),
        };

        serde_json::to_string(&view).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = analyticsJson)]
    pub fn analytics_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.store.analytics())
            .map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = exportFountain)]
    pub fn export_fountain(&self) -> String {
        let doc = self.store.document();
        compile_to_fountain(&doc.export_options(), doc.elements())
    }

    #[wasm_bindgen(js_name = fountainFileName)]
    pub fn fountain_file_name(&self) -> String {
        fountain_file_name(self.store.document().title())
    }

    /// Print HTML; the host opens it in a window and calls `print()`
    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self, include_title_page: bool) -> String {
        let doc = self.store.document();
        let options = doc.export_options().with_title_page(include_title_page);
        compile_to_html(&options, doc.elements(), CompileOptions::default())
    }

    /// Replace the current script with a saved record
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, record_json: &str) -> Result<(), JsValue> {
        let record =
            SavedScript::from_json(record_json).map_err(|e| js_error("Invalid script", e))?;
        let id = record.id.clone();

        write_record(self.store.storage_mut(), &record).map_err(|e| js_error("Storage error", e))?;
        self.store
            .try_load(Some(&id))
            .map_err(|e| js_error("Load error", e))
    }

    /// Save now and return the persisted record
    #[wasm_bindgen(js_name = saveJson)]
    pub fn save_json(&mut self) -> Result<String, JsValue> {
        self.store.save().map_err(|e| js_error("Save error", e))?;

        let key = storage_key(self.store.document().id());
        self.store
            .storage()
            .get(&key)
            .map_err(|e| js_error("Storage error", e))?
            .ok_or_else(|| JsValue::from_str("Saved script missing from storage"))
    }

    /// Advance the clock; true when a pending autosave was written
    ///
    /// A timestamp that does not fit a `Duration` leaves the clock alone.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Ok(now) = Duration::try_from_secs_f64(now_ms.max(0.0) / 1000.0) else {
            return false;
        };
        self.clock.set(now);
        self.store.tick()
    }

    #[wasm_bindgen(getter, js_name = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.store.document().is_dirty()
    }
}

/// Autocomplete entries for the content typed so far, as a JSON array
#[wasm_bindgen(js_name = suggestionsJson)]
pub fn suggestions_json(element_type: &str, content: &str) -> Result<String, JsValue> {
    let element_type: ElementType = element_type
        .parse()
        .map_err(|e| js_error("Invalid element type", e))?;

    serde_json::to_string(&suggestions(element_type, content))
        .map_err(|e| js_error("Serialization error", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    // JsValue only exists on wasm targets, so tests stick to the Ok paths

    #[test]
    fn test_apply_and_export() {
        let mut editor = ScriptEditor::new(None);
        let state: serde_json::Value = serde_json::from_str(&editor.state_json().unwrap()).unwrap();
        let heading = state["elements"][0]["id"].as_str().unwrap().to_string();

        let update = format!(
            r#"{{"UpdateElement":{{"element_id":"{}","content":"int. pier - dawn"}}}}"#,
            heading
        );
        assert!(editor.apply(&update).unwrap());
        assert!(editor.apply(r#"{"SetTitle":{"title":"Pier"}}"#).unwrap());

        let fountain = editor.export_fountain();
        assert!(fountain.starts_with("Title: Pier\n"));
        assert!(fountain.contains("\nINT. PIER - DAWN\n\n"));

        let html = editor.export_html(false);
        assert!(html.contains("<p class=\"element scene-heading\">INT. PIER - DAWN</p>"));
        assert!(!html.contains("Written by"));
        assert_eq!(editor.fountain_file_name(), "Pier.fountain");
    }

    #[test]
    fn test_state_json_shape() {
        let editor = ScriptEditor::new(None);
        let state: serde_json::Value = serde_json::from_str(&editor.state_json().unwrap()).unwrap();

        assert_eq!(state["elements"][0]["type"], "scene-heading");
        assert_eq!(state["leftPanelOpen"], true);
        assert_eq!(state["isDirty"], false);
        assert!(state["activeElementId"].is_string());
        assert_eq!(state["scenes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_rejected_mutation_reports_false() {
        let mut editor = ScriptEditor::new(None);
        assert!(!editor
            .apply(r#"{"DeleteElement":{"element_id":"missing"}}"#)
            .unwrap());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_tick_autosaves_after_debounce() {
        let mut editor = ScriptEditor::new(Some(1000));
        editor.apply(r#""ToggleFocusMode""#).unwrap();

        assert!(!editor.tick(999.0));
        assert!(editor.tick(1000.0));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_tick_ignores_unrepresentable_time() {
        let mut editor = ScriptEditor::new(Some(1000));
        editor.apply(r#""ToggleFocusMode""#).unwrap();

        assert!(!editor.tick(f64::INFINITY));
        assert!(!editor.tick(f64::MAX));
        assert!(editor.is_dirty());

        assert!(editor.tick(1000.0));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut editor = ScriptEditor::new(None);
        editor.apply(r#"{"SetAuthor":{"author":"Q"}}"#).unwrap();
        let saved = editor.save_json().unwrap();

        let mut other = ScriptEditor::new(None);
        other.load_json(&saved).unwrap();

        assert_eq!(other.export_fountain(), editor.export_fountain());
        assert!(!other.is_dirty());
    }

    #[test]
    fn test_analytics_json() {
        let editor = ScriptEditor::new(None);
        let analytics: serde_json::Value =
            serde_json::from_str(&editor.analytics_json().unwrap()).unwrap();
        assert_eq!(analytics["pageCount"], 1);
        assert_eq!(analytics["ratio"], "0:0");
    }

    #[test]
    fn test_suggestions_json() {
        let json = suggestions_json("scene-heading", "in").unwrap();
        let entries: Vec<String> = serde_json::from_str(&json).unwrap();
        assert!(entries.contains(&"INT.".to_string()));
    }
}
