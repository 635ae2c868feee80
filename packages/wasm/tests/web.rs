//! Browser-only checks for the JS error paths
#![cfg(target_arch = "wasm32")]

use scripta_wasm::{suggestions_json, ScriptEditor};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn invalid_mutation_json_is_an_error() {
    let mut editor = ScriptEditor::new(None);
    assert!(editor.apply("{ nope").is_err());
}

#[wasm_bindgen_test]
fn unknown_element_type_is_an_error() {
    let mut editor = ScriptEditor::new(None);
    let state = editor.state_json().unwrap();
    assert!(state.contains("scene-heading"));

    assert!(editor.insert_element_after("x", "montage", "").is_err());
    assert!(suggestions_json("montage", "").is_err());
}

#[wasm_bindgen_test]
fn load_rejects_malformed_record() {
    let mut editor = ScriptEditor::new(None);
    assert!(editor.load_json("{}").is_err());
}
