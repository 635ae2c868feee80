//! # Screenplay Elements
//!
//! An element is one typed line-unit of a script. The type taxonomy is
//! closed; every per-type rule (label, shortcut, placeholder, auto-advance,
//! casing) lives in [`ElementType::config`], so adding a type is a
//! single-point change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of screenplay element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Shot,
}

/// Static per-type configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementConfig {
    pub label: &'static str,
    /// Digit used with Ctrl/Cmd to force this type
    pub shortcut: char,
    pub placeholder: &'static str,
    /// Type produced by Enter after an element of this type
    pub next_element: ElementType,
    /// Content is upper-cased on every edit
    pub auto_uppercase: bool,
}

impl ElementType {
    /// Fixed ordering used for shortcuts and menus
    pub const ALL: [ElementType; 7] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
        ElementType::Shot,
    ];

    /// Tab cycle. `Shot` is not part of it.
    pub const CYCLE: [ElementType; 6] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
    ];

    pub const fn config(self) -> ElementConfig {
        match self {
            ElementType::SceneHeading => ElementConfig {
                label: "Scene Heading",
                shortcut: '1',
                placeholder: "INT./EXT. LOCATION - TIME",
                next_element: ElementType::Action,
                auto_uppercase: true,
            },
            ElementType::Action => ElementConfig {
                label: "Action",
                shortcut: '2',
                placeholder: "Action description...",
                next_element: ElementType::Action,
                auto_uppercase: false,
            },
            ElementType::Character => ElementConfig {
                label: "Character",
                shortcut: '3',
                placeholder: "CHARACTER NAME",
                next_element: ElementType::Dialogue,
                auto_uppercase: true,
            },
            ElementType::Dialogue => ElementConfig {
                label: "Dialogue",
                shortcut: '4',
                placeholder: "Dialogue...",
                next_element: ElementType::Character,
                auto_uppercase: false,
            },
            ElementType::Parenthetical => ElementConfig {
                label: "Parenthetical",
                shortcut: '5',
                placeholder: "(emotion/direction)",
                next_element: ElementType::Dialogue,
                auto_uppercase: false,
            },
            ElementType::Transition => ElementConfig {
                label: "Transition",
                shortcut: '6',
                placeholder: "CUT TO:",
                next_element: ElementType::SceneHeading,
                auto_uppercase: true,
            },
            ElementType::Shot => ElementConfig {
                label: "Shot",
                shortcut: '7',
                placeholder: "ANGLE ON:",
                next_element: ElementType::Action,
                auto_uppercase: true,
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.config().label
    }

    pub fn next_element(self) -> ElementType {
        self.config().next_element
    }

    /// Next type in the Tab cycle. Types outside the cycle restart it.
    pub fn cycled(self) -> ElementType {
        let next = Self::CYCLE
            .iter()
            .position(|t| *t == self)
            .map(|i| i + 1)
            .unwrap_or(0);
        Self::CYCLE[next % Self::CYCLE.len()]
    }

    /// Type bound to a shortcut digit ('1'..='7')
    pub fn from_shortcut(digit: char) -> Option<ElementType> {
        Self::ALL.iter().copied().find(|t| t.config().shortcut == digit)
    }

    /// Apply this type's casing rule to user-entered content
    pub fn normalize_content(self, content: &str) -> String {
        if self.config().auto_uppercase {
            content.to_uppercase()
        } else {
            content.to_string()
        }
    }

    /// Kebab-case name, also used as the CSS class in print output
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene-heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Shot => "shot",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown element type: {0}")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

/// Atomic unit of a screenplay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,

    #[serde(rename = "type")]
    pub element_type: ElementType,

    pub content: String,

    /// Owning scene. Stamped by the derive pass, never authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
}

impl Element {
    pub fn new(id: impl Into<String>, element_type: ElementType, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element_type,
            content: content.into(),
            scene_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of characters in the content
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
