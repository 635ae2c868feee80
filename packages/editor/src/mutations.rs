//! # Script Mutations
//!
//! Every change to a script goes through a [`Mutation`]. Mutations are
//! serializable so a shell (CLI batch file, browser host) can send them as
//! JSON.
//!
//! ## Semantics
//!
//! - Unknown element ids fail validation; the store reports them as no-ops
//! - Deleting the only remaining element fails validation
//! - Content is normalized with the element type's casing rule on write
//! - Element-affecting mutations are followed by a full derive pass
//!   (see [`Document::apply`](crate::Document::apply))

use crate::document::Document;
use scripta_model::{Element, ElementType};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Semantic mutations on a script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    SetTitle {
        title: String,
    },

    SetAuthor {
        author: String,
    },

    /// Replace an element's content (atomic, not a character diff)
    UpdateElement {
        element_id: String,
        content: String,
    },

    SetElementType {
        element_id: String,
        element_type: ElementType,
    },

    /// Insert a new element right after `after_id` and focus it
    InsertElementAfter {
        after_id: String,
        element_type: ElementType,
        #[serde(default)]
        content: String,
    },

    DeleteElement {
        element_id: String,
    },

    /// Advance the element's type through the Tab cycle
    CycleElementType {
        element_id: String,
    },

    /// Move a scene (with all its elements) to a new position
    ReorderScenes {
        from_index: usize,
        to_index: usize,
    },

    SetActiveElement {
        element_id: Option<String>,
    },

    MoveToNextElement,

    MoveToPrevElement,

    ToggleFocusMode,

    ToggleLeftPanel,

    ToggleRightPanel,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Cannot delete the last remaining element")]
    LastElement,

    #[error("Scene index {index} out of range ({len} scenes)")]
    SceneIndexOutOfRange { index: usize, len: usize },

    #[error("No active element")]
    NoActiveElement,

    #[error("Already at the {0} of the script")]
    AtBoundary(&'static str),
}

/// What a successful mutation changed
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// Id of the element created by `InsertElementAfter`
    pub inserted_id: Option<String>,
}

impl Mutation {
    /// Whether scenes and characters must be re-derived afterwards
    pub fn affects_elements(&self) -> bool {
        matches!(
            self,
            Mutation::UpdateElement { .. }
                | Mutation::SetElementType { .. }
                | Mutation::InsertElementAfter { .. }
                | Mutation::DeleteElement { .. }
                | Mutation::CycleElementType { .. }
                | Mutation::ReorderScenes { .. }
        )
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateElement { element_id, .. }
            | Mutation::SetElementType { element_id, .. }
            | Mutation::CycleElementType { element_id } => {
                require_element(doc, element_id).map(|_| ())
            }

            Mutation::InsertElementAfter { after_id, .. } => {
                require_element(doc, after_id).map(|_| ())
            }

            Mutation::DeleteElement { element_id } => {
                require_element(doc, element_id)?;
                if doc.elements.len() <= 1 {
                    return Err(MutationError::LastElement);
                }
                Ok(())
            }

            Mutation::ReorderScenes { from_index, .. } => {
                let len = doc.scenes.len();
                if *from_index >= len {
                    return Err(MutationError::SceneIndexOutOfRange {
                        index: *from_index,
                        len,
                    });
                }
                Ok(())
            }

            Mutation::SetActiveElement { element_id } => match element_id {
                Some(id) => require_element(doc, id).map(|_| ()),
                None => Ok(()),
            },

            Mutation::MoveToNextElement => {
                let index = active_index(doc)?;
                if index + 1 >= doc.elements.len() {
                    return Err(MutationError::AtBoundary("end"));
                }
                Ok(())
            }

            Mutation::MoveToPrevElement => {
                if active_index(doc)? == 0 {
                    return Err(MutationError::AtBoundary("start"));
                }
                Ok(())
            }

            Mutation::SetTitle { .. }
            | Mutation::SetAuthor { .. }
            | Mutation::ToggleFocusMode
            | Mutation::ToggleLeftPanel
            | Mutation::ToggleRightPanel => Ok(()),
        }
    }

    /// Apply to the document's raw state, validating first
    ///
    /// Does not re-derive or bump the version; [`Document::apply`] does both.
    pub(crate) fn apply(&self, doc: &mut Document) -> Result<Option<String>, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::SetTitle { title } => {
                doc.title = title.clone();
            }

            Mutation::SetAuthor { author } => {
                doc.author = author.clone();
            }

            Mutation::UpdateElement { element_id, content } => {
                let index = require_element(doc, element_id)?;
                let element = &mut doc.elements[index];
                element.content = element.element_type.normalize_content(content);
            }

            Mutation::SetElementType { element_id, element_type } => {
                let index = require_element(doc, element_id)?;
                doc.elements[index].element_type = *element_type;
            }

            Mutation::InsertElementAfter { after_id, element_type, content } => {
                return Self::apply_insert(doc, after_id, *element_type, content).map(Some);
            }

            Mutation::DeleteElement { element_id } => {
                let index = require_element(doc, element_id)?;
                doc.elements.remove(index);
                let next_active = &doc.elements[index.saturating_sub(1)];
                doc.active_element_id = Some(next_active.id.clone());
            }

            Mutation::CycleElementType { element_id } => {
                let index = require_element(doc, element_id)?;
                let element = &mut doc.elements[index];
                element.element_type = element.element_type.cycled();
            }

            Mutation::ReorderScenes { from_index, to_index } => {
                Self::apply_reorder(doc, *from_index, *to_index);
            }

            Mutation::SetActiveElement { element_id } => {
                doc.active_element_id = element_id.clone();
            }

            Mutation::MoveToNextElement => {
                let index = active_index(doc)?;
                doc.active_element_id = Some(doc.elements[index + 1].id.clone());
            }

            Mutation::MoveToPrevElement => {
                let index = active_index(doc)?;
                doc.active_element_id = Some(doc.elements[index - 1].id.clone());
            }

            Mutation::ToggleFocusMode => {
                doc.ui.focus_mode = !doc.ui.focus_mode;
            }

            Mutation::ToggleLeftPanel => {
                doc.ui.left_panel_open = !doc.ui.left_panel_open;
            }

            Mutation::ToggleRightPanel => {
                doc.ui.right_panel_open = !doc.ui.right_panel_open;
            }
        }

        Ok(None)
    }

    fn apply_insert(
        doc: &mut Document,
        after_id: &str,
        element_type: ElementType,
        content: &str,
    ) -> Result<String, MutationError> {
        let index = require_element(doc, after_id)?;

        let mut element = Element::new(
            doc.ids.new_id(),
            element_type,
            element_type.normalize_content(content),
        );
        // Provisional until the derive pass runs
        element.scene_id = doc.elements[index].scene_id.clone();

        let id = element.id.clone();
        doc.elements.insert(index + 1, element);
        doc.active_element_id = Some(id.clone());

        Ok(id)
    }

    fn apply_reorder(doc: &mut Document, from_index: usize, to_index: usize) {
        let mut scenes = std::mem::take(&mut doc.scenes);
        let moved = scenes.remove(from_index);
        let to_index = to_index.min(scenes.len());
        scenes.insert(to_index, moved);

        for (i, scene) in scenes.iter_mut().enumerate() {
            scene.number = i + 1;
        }

        let positions: HashMap<&str, usize> = doc
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.as_str(), i))
            .collect();

        let mut placed: HashSet<usize> = HashSet::with_capacity(doc.elements.len());
        let mut order: Vec<usize> = Vec::with_capacity(doc.elements.len());

        for scene in &scenes {
            for element_id in &scene.element_ids {
                if let Some(&i) = positions.get(element_id.as_str()) {
                    if placed.insert(i) {
                        order.push(i);
                    }
                }
            }
        }

        // Elements outside every scene keep their relative order at the end
        let unattached: Vec<usize> = (0..doc.elements.len()).filter(|i| !placed.contains(i)).collect();
        if !unattached.is_empty() {
            tracing::debug!(count = unattached.len(), "appending unattached elements after reorder");
        }
        order.extend(unattached);

        let mut old: Vec<Option<Element>> = std::mem::take(&mut doc.elements).into_iter().map(Some).collect();
        doc.elements = order.into_iter().filter_map(|i| old[i].take()).collect();
        doc.scenes = scenes;
    }
}

fn require_element(doc: &Document, element_id: &str) -> Result<usize, MutationError> {
    doc.index_of(element_id)
        .ok_or_else(|| MutationError::ElementNotFound(element_id.to_string()))
}

fn active_index(doc: &Document) -> Result<usize, MutationError> {
    let active = doc
        .active_element_id
        .as_deref()
        .ok_or(MutationError::NoActiveElement)?;
    require_element(doc, active)
}
