//! Page-count and dialogue/action estimates. Pure functions of the element
//! sequence, computed on demand and never cached.

use crate::derive::CharacterMap;
use crate::element::{Element, ElementType};
use crate::scene::{Character, Scene};
use serde::{Deserialize, Serialize};

/// Characters per printed line
pub const CHARS_PER_LINE: usize = 60;

/// Printed lines per page
pub const LINES_PER_PAGE: usize = 55;

/// Lines one element occupies on the page
pub fn element_lines(element: &Element) -> usize {
    let content_lines = element.char_len().div_ceil(CHARS_PER_LINE).max(1);

    match element.element_type {
        ElementType::SceneHeading => content_lines + 2,
        ElementType::Action => content_lines + 1,
        ElementType::Character => 1,
        ElementType::Dialogue => content_lines,
        ElementType::Parenthetical => 1,
        ElementType::Transition => 2,
        ElementType::Shot => 2,
    }
}

/// Estimated page count, never less than one
pub fn page_count(elements: &[Element]) -> usize {
    let lines: usize = elements.iter().map(element_lines).sum();
    lines.div_ceil(LINES_PER_PAGE).max(1)
}

/// Share of dialogue vs action text, in whole percent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueActionRatio {
    pub dialogue: u32,
    pub action: u32,
}

impl DialogueActionRatio {
    /// `"<dialogue>:<action>"`
    pub fn ratio(&self) -> String {
        format!("{}:{}", self.dialogue, self.action)
    }
}

pub fn dialogue_action_ratio(elements: &[Element]) -> DialogueActionRatio {
    let mut dialogue_chars = 0usize;
    let mut action_chars = 0usize;

    for element in elements {
        match element.element_type {
            ElementType::Dialogue => dialogue_chars += element.char_len(),
            ElementType::Action => action_chars += element.char_len(),
            _ => {}
        }
    }

    let total = dialogue_chars + action_chars;
    if total == 0 {
        return DialogueActionRatio { dialogue: 0, action: 0 };
    }

    // round(d / total * 100), half rounds up
    let dialogue = ((dialogue_chars * 200 + total) / (total * 2)) as u32;

    DialogueActionRatio {
        dialogue,
        action: 100 - dialogue,
    }
}

/// Everything the tools panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptAnalytics {
    pub page_count: usize,
    /// One page is roughly one minute of screen time
    pub runtime_minutes: usize,
    pub scene_count: usize,
    pub character_count: usize,
    pub dialogue: u32,
    pub action: u32,
    pub ratio: String,
    /// Most cues first, ties by name
    pub characters: Vec<Character>,
}

impl ScriptAnalytics {
    pub fn compute(elements: &[Element], scenes: &[Scene], characters: &CharacterMap) -> Self {
        let page_count = page_count(elements);
        let split = dialogue_action_ratio(elements);

        // Stable sort, so ties stay in order of first appearance
        let mut ranked: Vec<Character> = characters.values().cloned().collect();
        ranked.sort_by(|a, b| b.dialogue_count.cmp(&a.dialogue_count));

        Self {
            page_count,
            runtime_minutes: page_count,
            scene_count: scenes.len(),
            character_count: characters.len(),
            ratio: split.ratio(),
            dialogue: split.dialogue,
            action: split.action,
            characters: ranked,
        }
    }

    pub fn top_characters(&self, n: usize) -> &[Character] {
        &self.characters[..n.min(self.characters.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive;

    fn el(ty: ElementType, content: &str) -> Element {
        Element::new("x", ty, content)
    }

    #[test]
    fn test_empty_content_counts_one_line() {
        assert_eq!(element_lines(&el(ElementType::Dialogue, "")), 1);
        assert_eq!(element_lines(&el(ElementType::SceneHeading, "")), 3);
        assert_eq!(element_lines(&el(ElementType::Action, "")), 2);
    }

    #[test]
    fn test_long_content_wraps_at_sixty() {
        let sixty = "a".repeat(60);
        let sixty_one = "a".repeat(61);

        assert_eq!(element_lines(&el(ElementType::Dialogue, &sixty)), 1);
        assert_eq!(element_lines(&el(ElementType::Dialogue, &sixty_one)), 2);
        assert_eq!(element_lines(&el(ElementType::Action, &sixty_one)), 3);
        // Fixed-height types ignore length
        assert_eq!(element_lines(&el(ElementType::Character, &sixty_one)), 1);
        assert_eq!(element_lines(&el(ElementType::Transition, &sixty_one)), 2);
        assert_eq!(element_lines(&el(ElementType::Shot, "")), 2);
        assert_eq!(element_lines(&el(ElementType::Parenthetical, &sixty_one)), 1);
    }

    #[test]
    fn test_page_count_minimum_and_rollover() {
        assert_eq!(page_count(&[]), 1);

        // 55 single-line dialogue elements fill exactly one page
        let page: Vec<Element> = (0..55).map(|_| el(ElementType::Dialogue, "Hi")).collect();
        assert_eq!(page_count(&page), 1);

        let mut over = page.clone();
        over.push(el(ElementType::Dialogue, "Hi"));
        assert_eq!(page_count(&over), 2);
    }

    #[test]
    fn test_ratio_rounds_and_sums_to_100() {
        let elements = vec![el(ElementType::Dialogue, "Hi"), el(ElementType::Action, "Hiya")];
        let split = dialogue_action_ratio(&elements);

        assert_eq!(split.dialogue, 33);
        assert_eq!(split.action, 67);
        assert_eq!(split.ratio(), "33:67");
    }

    #[test]
    fn test_ratio_half_rounds_up() {
        // 1 of 8 chars = 12.5%
        let elements = vec![el(ElementType::Dialogue, "a"), el(ElementType::Action, "abcdefg")];
        assert_eq!(dialogue_action_ratio(&elements).dialogue, 13);
    }

    #[test]
    fn test_ratio_zero_when_no_text() {
        let elements = vec![el(ElementType::Character, "JOHN"), el(ElementType::Dialogue, "")];
        let split = dialogue_action_ratio(&elements);

        assert_eq!(split, DialogueActionRatio { dialogue: 0, action: 0 });
        assert_eq!(split.ratio(), "0:0");
    }

    #[test]
    fn test_analytics_ranks_characters() {
        let mut elements = vec![
            Element::new("h", ElementType::SceneHeading, "INT. A - DAY"),
            Element::new("c1", ElementType::Character, "BOB"),
            Element::new("c2", ElementType::Character, "ANN"),
            Element::new("c3", ElementType::Character, "ANN"),
            Element::new("c4", ElementType::Character, "CAL"),
        ];
        let derived = derive(&mut elements);
        let analytics = ScriptAnalytics::compute(&elements, &derived.scenes, &derived.characters);

        let names: Vec<&str> = analytics.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ANN", "BOB", "CAL"]);
        assert_eq!(analytics.scene_count, 1);
        assert_eq!(analytics.character_count, 3);
        assert_eq!(analytics.runtime_minutes, analytics.page_count);
        assert_eq!(analytics.top_characters(2).len(), 2);
        assert_eq!(analytics.top_characters(10).len(), 3);
    }

    #[test]
    fn test_analytics_ties_keep_script_order() {
        let mut elements = vec![
            Element::new("h", ElementType::SceneHeading, "INT. A - DAY"),
            Element::new("c1", ElementType::Character, "ZED"),
            Element::new("c2", ElementType::Character, "ANN"),
        ];
        let derived = derive(&mut elements);
        let analytics = ScriptAnalytics::compute(&elements, &derived.scenes, &derived.characters);

        let names: Vec<&str> = analytics.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ZED", "ANN"]);
    }
}
