//! # Scripta Model
//!
//! The screenplay document model: a script is an ordered sequence of typed
//! elements, and everything else (scenes, characters, page estimates) is
//! derived from that sequence.
//!
//! ```text
//! elements ──derive()──▶ scenes + characters
//!     └──────analytics──▶ page count, dialogue/action split
//! ```

pub mod analytics;
pub mod derive;
pub mod element;
pub mod export;
pub mod id_generator;
pub mod scene;
pub mod suggest;
pub mod visitor;

pub use analytics::{
    dialogue_action_ratio, element_lines, page_count, DialogueActionRatio, ScriptAnalytics,
};
pub use derive::{derive, extract_characters, CharacterMap, DerivedState};
pub use element::{Element, ElementConfig, ElementType, UnknownElementType};
pub use export::{ExportOptions, UNKNOWN_AUTHOR, UNTITLED_SCREENPLAY};
pub use id_generator::{fresh_seed, get_seed, IdGenerator};
pub use scene::{normalize_character_name, ActGroups, Character, Scene};
pub use suggest::suggestions;
pub use visitor::{walk_element, walk_elements, ElementVisitor};
