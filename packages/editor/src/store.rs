//! # Script Store
//!
//! Owns the one active [`Document`], its subscribers, the autosave
//! scheduler and the storage backend. It is the sole mutator of document
//! state; readers get `&Document` snapshots.
//!
//! ```text
//! operation → Mutation → Document::apply → derive → notify → schedule autosave
//!                                                              ↓ (tick)
//!                                                            storage
//! ```
//!
//! Operations never fail loudly: an unknown id or a forbidden delete is
//! logged at debug level and reported as "nothing changed".

use crate::autosave::{AutosaveScheduler, Clock, SystemClock, DEFAULT_AUTOSAVE_DEBOUNCE};
use crate::keymap::Command;
use crate::persistence::{read_record, write_record};
use crate::{Document, EditorError, Mutation, MutationResult};
use chrono::Utc;
use scripta_common::KeyValueStorage;
use scripta_model::{ActGroups, Element, ElementType, ScriptAnalytics};
use std::time::Duration;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Quiet period before a pending autosave is written
    pub autosave_debounce: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            autosave_debounce: DEFAULT_AUTOSAVE_DEBOUNCE,
        }
    }
}

/// Handle returned by [`ScriptStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Document)>;

/// How the store handled a keyboard command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The store applied it
    Applied,
    /// Valid command, but nothing changed (boundary, unknown id, ...)
    NoChange,
    /// Belongs to the shell (palette, export, literal newline)
    Shell,
}

pub struct ScriptStore<S: KeyValueStorage> {
    document: Document,
    storage: S,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    autosave: AutosaveScheduler,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStorage> ScriptStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: S, options: StoreOptions) -> Self {
        Self::with_clock(storage, options, Box::new(SystemClock::new()))
    }

    pub fn with_clock(storage: S, options: StoreOptions, clock: Box<dyn Clock>) -> Self {
        Self {
            document: Document::new(),
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
            autosave: AutosaveScheduler::new(options.autosave_debounce),
            clock,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    // ---------------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------------

    /// Register a listener called synchronously after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&Document) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let document = &self.document;
        for (_, listener) in self.listeners.iter_mut() {
            listener(document);
        }
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Apply a mutation, reporting why it was rejected
    pub fn try_apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(&mutation)?;
        self.notify();
        self.autosave.schedule(self.clock.now());
        Ok(result)
    }

    /// Apply a mutation; rejected mutations are no-ops
    pub fn dispatch(&mut self, mutation: Mutation) -> Option<MutationResult> {
        match self.try_apply(mutation) {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::debug!(error = %err, "mutation ignored");
                None
            }
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.dispatch(Mutation::SetTitle { title: title.into() });
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.dispatch(Mutation::SetAuthor { author: author.into() });
    }

    pub fn update_element(&mut self, element_id: &str, content: impl Into<String>) -> bool {
        self.dispatch(Mutation::UpdateElement {
            element_id: element_id.to_string(),
            content: content.into(),
        })
        .is_some()
    }

    pub fn set_element_type(&mut self, element_id: &str, element_type: ElementType) -> bool {
        self.dispatch(Mutation::SetElementType {
            element_id: element_id.to_string(),
            element_type,
        })
        .is_some()
    }

    /// Insert after `after_id` and focus the new element
    pub fn insert_element_after(
        &mut self,
        after_id: &str,
        element_type: ElementType,
        content: impl Into<String>,
    ) -> Option<Element> {
        let result = self.dispatch(Mutation::InsertElementAfter {
            after_id: after_id.to_string(),
            element_type,
            content: content.into(),
        })?;

        result
            .inserted_id
            .and_then(|id| self.document.element(&id).cloned())
    }

    pub fn delete_element(&mut self, element_id: &str) -> bool {
        self.dispatch(Mutation::DeleteElement {
            element_id: element_id.to_string(),
        })
        .is_some()
    }

    pub fn cycle_element_type(&mut self, element_id: &str) -> bool {
        self.dispatch(Mutation::CycleElementType {
            element_id: element_id.to_string(),
        })
        .is_some()
    }

    pub fn set_active_element(&mut self, element_id: Option<&str>) -> bool {
        self.dispatch(Mutation::SetActiveElement {
            element_id: element_id.map(str::to_string),
        })
        .is_some()
    }

    pub fn move_to_next_element(&mut self) -> bool {
        self.dispatch(Mutation::MoveToNextElement).is_some()
    }

    pub fn move_to_prev_element(&mut self) -> bool {
        self.dispatch(Mutation::MoveToPrevElement).is_some()
    }

    /// Type that Enter produces after `current`
    pub fn get_next_element_type(current: ElementType) -> ElementType {
        current.next_element()
    }

    pub fn toggle_focus_mode(&mut self) {
        self.dispatch(Mutation::ToggleFocusMode);
    }

    pub fn toggle_left_panel(&mut self) {
        self.dispatch(Mutation::ToggleLeftPanel);
    }

    pub fn toggle_right_panel(&mut self) {
        self.dispatch(Mutation::ToggleRightPanel);
    }

    pub fn reorder_scenes(&mut self, from_index: usize, to_index: usize) -> bool {
        self.dispatch(Mutation::ReorderScenes { from_index, to_index })
            .is_some()
    }

    /// Focus the heading of `scene_id`
    pub fn navigate_to_scene(&mut self, scene_id: &str) -> bool {
        let Some(heading) = self
            .document
            .scene(scene_id)
            .and_then(|s| s.heading_element_id())
            .map(str::to_string)
        else {
            return false;
        };
        self.set_active_element(Some(&heading))
    }

    /// Discard the current script for a fresh one. The old one is not saved.
    pub fn new_script(&mut self) {
        self.autosave.cancel();
        self.document = Document::new();
        tracing::info!(id = %self.document.id(), "started new script");
        self.notify();
    }

    /// Run a resolved keyboard command against `element_id`
    pub fn execute(&mut self, element_id: Option<&str>, command: Command) -> CommandOutcome {
        let applied = match command {
            Command::OpenCommandPalette | Command::Export | Command::LineBreak => {
                return CommandOutcome::Shell;
            }
            Command::ToggleFocusMode => {
                self.toggle_focus_mode();
                true
            }
            Command::ToggleLeftPanel => {
                self.toggle_left_panel();
                true
            }
            Command::ToggleRightPanel => {
                self.toggle_right_panel();
                true
            }
            Command::Save => self.save().is_ok(),
            Command::MovePrev => self.move_to_prev_element(),
            Command::MoveNext => self.move_to_next_element(),
            Command::CycleType
            | Command::InsertNext
            | Command::DeleteAndMoveUp
            | Command::SetType(_) => match element_id {
                Some(id) => self.execute_on_element(id, command),
                None => false,
            },
        };

        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::NoChange
        }
    }

    fn execute_on_element(&mut self, element_id: &str, command: Command) -> bool {
        let Some(index) = self.document.index_of(element_id) else {
            return false;
        };
        let element_type = self.document.elements()[index].element_type;

        match command {
            Command::CycleType => self.cycle_element_type(element_id),
            Command::InsertNext => self
                .insert_element_after(element_id, element_type.next_element(), "")
                .is_some(),
            // The first element is never removed from the keyboard
            Command::DeleteAndMoveUp if index > 0 => self.delete_element(element_id),
            Command::DeleteAndMoveUp => false,
            Command::SetType(ty) => self.set_element_type(element_id, ty),
            _ => false,
        }
    }

    // ---------------------------------------------------------------------
    // Read-side helpers
    // ---------------------------------------------------------------------

    pub fn analytics(&self) -> ScriptAnalytics {
        ScriptAnalytics::compute(
            self.document.elements(),
            self.document.scenes(),
            self.document.characters(),
        )
    }

    pub fn act_groups(&self) -> ActGroups<'_> {
        self.document.act_groups()
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Write the current script now
    ///
    /// On failure the document stays dirty and the error is logged; no
    /// retry is scheduled beyond the next mutation's autosave.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let saved_at = Utc::now();
        let record = self.document.to_record(saved_at);

        match write_record(&mut self.storage, &record) {
            Ok(()) => {
                self.autosave.cancel();
                self.document.mark_saved(saved_at);
                tracing::info!(id = %record.id, elements = record.elements.len(), "script saved");
                self.notify();
                Ok(())
            }
            Err(err) => {
                tracing::error!(id = %record.id, error = %err, "failed to save script");
                Err(err)
            }
        }
    }

    /// Load a script by id, or the first stored script when `None`
    pub fn try_load(&mut self, script_id: Option<&str>) -> Result<(), EditorError> {
        let record = read_record(&self.storage, script_id)?;

        self.autosave.cancel();
        self.document = Document::from_record(record);
        tracing::info!(id = %self.document.id(), "script loaded");
        self.notify();
        Ok(())
    }

    /// Returns false and keeps the current document if nothing loads
    pub fn load(&mut self, script_id: Option<&str>) -> bool {
        match self.try_load(script_id) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(script_id = ?script_id, error = %err, "no script loaded");
                false
            }
        }
    }

    /// Write the pending autosave if its quiet period has elapsed
    ///
    /// Returns true when a write happened and succeeded.
    pub fn tick(&mut self) -> bool {
        if !self.autosave.take_due(self.clock.now()) {
            return false;
        }
        self.save().is_ok()
    }

    /// Write a pending autosave immediately, e.g. on shutdown
    pub fn flush_autosave(&mut self) -> bool {
        if !self.autosave.is_pending() {
            return false;
        }
        self.autosave.cancel();
        self.save().is_ok()
    }
}
