//! Keyboard command surface.
//!
//! Resolves key chords to editor commands. Rendering and caret tracking
//! stay in the shell; it reports the caret facts in [`ElementKeyContext`].

use scripta_model::ElementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Tab,
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn with_mod(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl on Linux/Windows, Cmd on macOS
    pub fn has_mod(&self) -> bool {
        self.ctrl || self.meta
    }

    fn char_lower(&self) -> Option<char> {
        match self.key {
            Key::Char(c) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

/// Caret facts about the focused element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementKeyContext {
    pub content_empty: bool,
    pub caret_at_start: bool,
    pub caret_at_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Global
    OpenCommandPalette,
    ToggleFocusMode,
    ToggleLeftPanel,
    ToggleRightPanel,
    Save,
    Export,

    // Element-scoped
    CycleType,
    InsertNext,
    /// Literal newline inside the element; the shell inserts it
    LineBreak,
    DeleteAndMoveUp,
    SetType(ElementType),
    MovePrev,
    MoveNext,
}

/// Shortcuts that work anywhere in the editor
///
/// A bare `/` only opens the palette outside an element, so it stays
/// typeable inside scene headings like `INT./EXT.`.
pub fn resolve_global(chord: &KeyChord, editing: bool) -> Option<Command> {
    let key = chord.char_lower();

    if chord.has_mod() {
        return match key? {
            'k' => Some(Command::OpenCommandPalette),
            'f' if chord.shift => Some(Command::ToggleFocusMode),
            '[' => Some(Command::ToggleLeftPanel),
            ']' => Some(Command::ToggleRightPanel),
            's' => Some(Command::Save),
            'e' => Some(Command::Export),
            _ => None,
        };
    }

    match key {
        Some('/') if !editing => Some(Command::OpenCommandPalette),
        _ => None,
    }
}

/// Shortcuts handled by the focused element
pub fn resolve_element(chord: &KeyChord, ctx: &ElementKeyContext) -> Option<Command> {
    match chord.key {
        Key::Tab if !chord.shift => Some(Command::CycleType),
        Key::Enter if chord.shift => Some(Command::LineBreak),
        Key::Enter => Some(Command::InsertNext),
        Key::Backspace if ctx.content_empty => Some(Command::DeleteAndMoveUp),
        Key::Char(c) if chord.has_mod() => ElementType::from_shortcut(c).map(Command::SetType),
        Key::ArrowUp if ctx.caret_at_start => Some(Command::MovePrev),
        Key::ArrowDown if ctx.caret_at_end => Some(Command::MoveNext),
        _ => None,
    }
}

/// Element handling first, then global shortcuts
pub fn resolve(chord: &KeyChord, element: Option<&ElementKeyContext>) -> Option<Command> {
    element
        .and_then(|ctx| resolve_element(chord, ctx))
        .or_else(|| resolve_global(chord, element.is_some()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ElementKeyContext {
        ElementKeyContext::default()
    }

    #[test]
    fn test_global_shortcuts() {
        let cases = [
            (KeyChord::with_mod(Key::Char('k')), Command::OpenCommandPalette),
            (KeyChord::with_mod(Key::Char('F')).with_shift(), Command::ToggleFocusMode),
            (KeyChord::with_mod(Key::Char('[')), Command::ToggleLeftPanel),
            (KeyChord::with_mod(Key::Char(']')), Command::ToggleRightPanel),
            (KeyChord::with_mod(Key::Char('S')), Command::Save),
            (KeyChord::with_mod(Key::Char('e')), Command::Export),
        ];

        for (chord, expected) in cases {
            assert_eq!(resolve_global(&chord, false), Some(expected), "{:?}", chord);
        }

        // Mod+F without Shift is not bound
        assert_eq!(resolve_global(&KeyChord::with_mod(Key::Char('f')), false), None);
    }

    #[test]
    fn test_slash_only_outside_elements() {
        let slash = KeyChord::plain(Key::Char('/'));
        assert_eq!(resolve(&slash, None), Some(Command::OpenCommandPalette));
        assert_eq!(resolve(&slash, Some(&ctx())), None);
    }

    #[test]
    fn test_meta_acts_as_mod() {
        let chord = KeyChord {
            meta: true,
            ..KeyChord::plain(Key::Char('3'))
        };
        assert_eq!(
            resolve_element(&chord, &ctx()),
            Some(Command::SetType(ElementType::Character))
        );
    }

    #[test]
    fn test_element_shortcuts() {
        assert_eq!(resolve_element(&KeyChord::plain(Key::Tab), &ctx()), Some(Command::CycleType));
        assert_eq!(resolve_element(&KeyChord::plain(Key::Tab).with_shift(), &ctx()), None);
        assert_eq!(resolve_element(&KeyChord::plain(Key::Enter), &ctx()), Some(Command::InsertNext));
        assert_eq!(
            resolve_element(&KeyChord::plain(Key::Enter).with_shift(), &ctx()),
            Some(Command::LineBreak)
        );
        assert_eq!(
            resolve_element(&KeyChord::with_mod(Key::Char('7')), &ctx()),
            Some(Command::SetType(ElementType::Shot))
        );
        assert_eq!(resolve_element(&KeyChord::with_mod(Key::Char('8')), &ctx()), None);
    }

    #[test]
    fn test_backspace_needs_empty_content() {
        let backspace = KeyChord::plain(Key::Backspace);
        let empty = ElementKeyContext { content_empty: true, ..ctx() };

        assert_eq!(resolve_element(&backspace, &empty), Some(Command::DeleteAndMoveUp));
        assert_eq!(resolve_element(&backspace, &ctx()), None);
    }

    #[test]
    fn test_arrows_need_caret_at_boundary() {
        let up = KeyChord::plain(Key::ArrowUp);
        let down = KeyChord::plain(Key::ArrowDown);
        let at_start = ElementKeyContext { caret_at_start: true, ..ctx() };
        let at_end = ElementKeyContext { caret_at_end: true, ..ctx() };

        assert_eq!(resolve_element(&up, &at_start), Some(Command::MovePrev));
        assert_eq!(resolve_element(&up, &at_end), None);
        assert_eq!(resolve_element(&down, &at_end), Some(Command::MoveNext));
        assert_eq!(resolve_element(&down, &at_start), None);
    }

    #[test]
    fn test_element_falls_through_to_global() {
        let save = KeyChord::with_mod(Key::Char('s'));
        assert_eq!(resolve(&save, Some(&ctx())), Some(Command::Save));
    }
}
