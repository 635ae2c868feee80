use crate::element::ElementType;

pub const SCENE_PREFIXES: [&str; 4] = ["INT.", "EXT.", "INT./EXT.", "I/E."];

pub const TIME_SUFFIXES: [&str; 7] = [
    "DAY",
    "NIGHT",
    "MORNING",
    "EVENING",
    "LATER",
    "CONTINUOUS",
    "SAME",
];

pub const TRANSITIONS: [&str; 9] = [
    "CUT TO:",
    "FADE IN:",
    "FADE OUT.",
    "FADE TO BLACK.",
    "DISSOLVE TO:",
    "SMASH CUT TO:",
    "MATCH CUT TO:",
    "JUMP CUT TO:",
    "TIME CUT:",
];

/// Prefixes only complete while the heading is still short
const SCENE_PREFIX_MAX_INPUT: usize = 4;

/// Autocomplete candidates for the content being typed
pub fn suggestions(element_type: ElementType, content: &str) -> Vec<&'static str> {
    if content.is_empty() {
        return Vec::new();
    }

    let upper = content.to_uppercase();
    let candidates: &[&'static str] = match element_type {
        ElementType::SceneHeading if content.chars().count() <= SCENE_PREFIX_MAX_INPUT => {
            &SCENE_PREFIXES
        }
        ElementType::Transition => &TRANSITIONS,
        _ => return Vec::new(),
    };

    candidates
        .iter()
        .copied()
        .filter(|c| c.starts_with(&upper) && *c != upper)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_prefix_suggestions() {
        assert_eq!(suggestions(ElementType::SceneHeading, "in"), vec!["INT.", "INT./EXT."]);
        assert_eq!(suggestions(ElementType::SceneHeading, "INT."), vec!["INT./EXT."]);
        assert!(suggestions(ElementType::SceneHeading, "INT. H").is_empty());
    }

    #[test]
    fn test_transition_suggestions() {
        assert_eq!(
            suggestions(ElementType::Transition, "fade"),
            vec!["FADE IN:", "FADE OUT.", "FADE TO BLACK."]
        );
        assert!(suggestions(ElementType::Transition, "CUT TO:").is_empty());
    }

    #[test]
    fn test_no_suggestions_for_other_types_or_empty() {
        assert!(suggestions(ElementType::Action, "int").is_empty());
        assert!(suggestions(ElementType::Transition, "").is_empty());
    }
}
