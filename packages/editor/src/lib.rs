//! # Scripta Editor
//!
//! Document store for a single screenplay.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ shell: keys → Command, JSON → Mutation      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: ScriptStore                         │
//! │  - Apply mutations with validation          │
//! │  - Re-derive scenes and characters          │
//! │  - Notify subscribers                       │
//! │  - Debounced autosave to key-value storage  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: Fountain text, print HTML        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scripta_common::MemoryStorage;
//! use scripta_editor::ScriptStore;
//! use scripta_model::ElementType;
//!
//! let mut store = ScriptStore::new(MemoryStorage::new());
//! let heading = store.document().elements()[0].id.clone();
//!
//! store.update_element(&heading, "int. diner - night");
//! store.insert_element_after(&heading, ElementType::Action, "Rain on the glass.");
//!
//! store.save()?;
//! ```

mod autosave;
mod document;
mod errors;
mod keymap;
mod mutations;
mod persistence;
mod store;

pub use autosave::{AutosaveScheduler, Clock, ManualClock, SystemClock, DEFAULT_AUTOSAVE_DEBOUNCE};
pub use document::{Document, UiFlags, DEFAULT_TITLE};
pub use errors::EditorError;
pub use keymap::{resolve, resolve_element, resolve_global, Command, ElementKeyContext, Key, KeyChord};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use persistence::{
    list_script_ids, read_record, storage_key, write_record, SavedScript, STORAGE_KEY_PREFIX,
};
pub use store::{CommandOutcome, ScriptStore, StoreOptions, SubscriptionId};
