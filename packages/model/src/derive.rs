//! # Derive Pass
//!
//! Recomputes scenes and the character registry from the element sequence.
//! Scenes are opened and filled in one left-to-right pass, then characters
//! are collected from the freshly stamped scene ids. Runs after every
//! structural or content mutation; there is no incremental diffing.
//!
//! ```text
//! [HEADING a] [ACTION b] [CHARACTER c] [HEADING d] [DIALOGUE e]
//!  └──── scene-a (1) ──────────────┘   └── scene-d (2) ──┘
//! ```

use crate::element::{Element, ElementType};
use crate::scene::{normalize_character_name, Character, Scene};
use indexmap::IndexMap;

/// Character registry keyed by normalized name, in order of first cue
pub type CharacterMap = IndexMap<String, Character>;

/// Output of a derive pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedState {
    pub scenes: Vec<Scene>,
    pub characters: CharacterMap,
}

/// Rebuild scenes and characters, stamping each element's `scene_id`
pub fn derive(elements: &mut [Element]) -> DerivedState {
    let mut scenes: Vec<Scene> = Vec::new();

    for element in elements.iter_mut() {
        if element.element_type == ElementType::SceneHeading {
            scenes.push(Scene {
                id: Scene::id_for_heading(&element.id),
                number: scenes.len() + 1,
                heading: element.content.clone(),
                element_ids: vec![element.id.clone()],
            });
        } else if let Some(scene) = scenes.last_mut() {
            scene.element_ids.push(element.id.clone());
        }

        element.scene_id = scenes.last().map(|s| s.id.clone());
    }

    let characters = extract_characters(elements);

    tracing::debug!(
        elements = elements.len(),
        scenes = scenes.len(),
        characters = characters.len(),
        "derive pass complete"
    );

    DerivedState { scenes, characters }
}

/// Character registry only, without touching element scene ids
///
/// Uses whatever `scene_id` the elements currently carry.
pub fn extract_characters(elements: &[Element]) -> CharacterMap {
    let mut characters = CharacterMap::new();

    for element in elements {
        if element.element_type != ElementType::Character {
            continue;
        }
        let Some(name) = normalize_character_name(&element.content) else {
            continue;
        };
        let scene_id = element.scene_id.as_deref();
        match characters.get_mut(&name) {
            Some(existing) => existing.record_cue(scene_id),
            None => {
                characters.insert(name.clone(), Character::new(name, scene_id));
            }
        }
    }

    characters
}
