//! # Script Document
//!
//! The single in-memory script: metadata, the ordered element sequence,
//! derived scenes and characters, and editor-only state (active element,
//! panel flags) that is never persisted.
//!
//! ## Lifecycle
//!
//! ```text
//! new/load → apply(Mutation) → derive → snapshot → save
//!                 ↑_________________________|
//! ```

use crate::persistence::SavedScript;
use crate::{Mutation, MutationError, MutationResult};
use chrono::{DateTime, Utc};
use scripta_model::{
    derive, fresh_seed, ActGroups, CharacterMap, Element, ElementType, ExportOptions, IdGenerator,
    Scene,
};

pub const DEFAULT_TITLE: &str = scripta_model::UNTITLED_SCREENPLAY;

/// Panel and focus flags. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiFlags {
    pub focus_mode: bool,
    pub left_panel_open: bool,
    pub right_panel_open: bool,
}

impl Default for UiFlags {
    fn default() -> Self {
        Self {
            focus_mode: false,
            left_panel_open: true,
            right_panel_open: true,
        }
    }
}

/// Editable screenplay
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) elements: Vec<Element>,
    pub(crate) scenes: Vec<Scene>,
    pub(crate) characters: CharacterMap,
    pub(crate) active_element_id: Option<String>,
    pub(crate) ui: UiFlags,
    pub(crate) dirty: bool,
    pub(crate) last_saved: Option<DateTime<Utc>>,
    /// Increments on each applied mutation
    pub(crate) version: u64,
    pub(crate) ids: IdGenerator,
}

impl Document {
    /// Fresh script with a single empty scene heading
    pub fn new() -> Self {
        let mut ids = IdGenerator::new();
        let first = Element::new(ids.new_id(), ElementType::SceneHeading, "");
        let active = Some(first.id.clone());

        let mut doc = Self {
            id: fresh_seed(),
            title: DEFAULT_TITLE.to_string(),
            author: String::new(),
            elements: vec![first],
            scenes: Vec::new(),
            characters: CharacterMap::new(),
            active_element_id: active,
            ui: UiFlags::default(),
            dirty: false,
            last_saved: None,
            version: 0,
            ids,
        };
        doc.rederive();
        doc
    }

    /// Rebuild a document from its persisted record
    ///
    /// Scenes and characters are re-derived from the elements; the stored
    /// scene list is only used by readers of the raw record.
    pub fn from_record(record: SavedScript) -> Self {
        let mut ids = IdGenerator::new();
        let mut elements = record.elements;

        if elements.is_empty() {
            tracing::warn!(id = %record.id, "saved script has no elements, seeding a scene heading");
            elements.push(Element::new(ids.new_id(), ElementType::SceneHeading, ""));
        }

        let active = elements.first().map(|e| e.id.clone());

        let mut doc = Self {
            id: record.id,
            title: record.title,
            author: record.author,
            elements,
            scenes: Vec::new(),
            characters: CharacterMap::new(),
            active_element_id: active,
            ui: UiFlags::default(),
            dirty: false,
            last_saved: Some(record.saved_at),
            version: 0,
            ids,
        };
        doc.rederive();
        doc
    }

    /// Snapshot for persistence
    pub fn to_record(&self, saved_at: DateTime<Utc>) -> SavedScript {
        SavedScript {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            elements: self.elements.clone(),
            scenes: self.scenes.clone(),
            saved_at,
        }
    }

    /// Apply a mutation, re-deriving scenes and characters when needed
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        let inserted_id = mutation.apply(self)?;

        if mutation.affects_elements() {
            self.rederive();
        }

        self.version += 1;
        self.dirty = true;

        Ok(MutationResult {
            version: self.version,
            inserted_id,
        })
    }

    /// Full derive pass over the element sequence
    pub fn rederive(&mut self) {
        let derived = derive(&mut self.elements);
        self.scenes = derived.scenes;
        self.characters = derived.characters;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn characters(&self) -> &CharacterMap {
        &self.characters
    }

    pub fn ui(&self) -> UiFlags {
        self.ui
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub(crate) fn mark_saved(&mut self, at: DateTime<Utc>) {
        self.dirty = false;
        self.last_saved = Some(at);
    }

    pub fn index_of(&self, element_id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == element_id)
    }

    pub fn element(&self, element_id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    pub fn active_element_id(&self) -> Option<&str> {
        self.active_element_id.as_deref()
    }

    pub fn active_element(&self) -> Option<&Element> {
        self.active_element_id().and_then(|id| self.element(id))
    }

    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }

    /// Scene containing the active element
    pub fn current_scene_id(&self) -> Option<&str> {
        self.active_element().and_then(|e| e.scene_id.as_deref())
    }

    pub fn act_groups(&self) -> ActGroups<'_> {
        ActGroups::split(&self.scenes)
    }

    /// Title and author as the exporters see them
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::new(self.title.clone(), self.author.clone())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
