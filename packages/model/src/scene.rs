use serde::{Deserialize, Serialize};

/// Contiguous run of elements anchored by a scene heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    /// 1-based position in document order
    pub number: usize,
    pub heading: String,
    /// Member element ids, heading first
    pub element_ids: Vec<String>,
}

impl Scene {
    /// Scene ids are keyed on their heading so re-deriving is stable
    pub fn id_for_heading(heading_element_id: &str) -> String {
        format!("scene-{}", heading_element_id)
    }

    pub fn heading_element_id(&self) -> Option<&str> {
        self.element_ids.first().map(String::as_str)
    }

    pub fn contains(&self, element_id: &str) -> bool {
        self.element_ids.iter().any(|id| id == element_id)
    }
}

/// Aggregate derived from character cues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    /// Number of character cues carrying this name
    pub dialogue_count: usize,
    /// Scene ids in first-appearance order, no duplicates
    pub scene_appearances: Vec<String>,
}

impl Character {
    pub fn new(name: impl Into<String>, scene_id: Option<&str>) -> Self {
        Self {
            name: name.into(),
            dialogue_count: 1,
            scene_appearances: scene_id.map(|s| vec![s.to_string()]).unwrap_or_default(),
        }
    }

    pub(crate) fn record_cue(&mut self, scene_id: Option<&str>) {
        self.dialogue_count += 1;
        if let Some(scene_id) = scene_id {
            if !self.scene_appearances.iter().any(|s| s == scene_id) {
                self.scene_appearances.push(scene_id.to_string());
            }
        }
    }
}

/// Normalize a character cue into its registry key
pub fn normalize_character_name(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Scenes split into a simple three-act structure by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActGroups<'a> {
    pub act_one: &'a [Scene],
    pub act_two: &'a [Scene],
    pub act_three: &'a [Scene],
}

impl<'a> ActGroups<'a> {
    pub fn split(scenes: &'a [Scene]) -> Self {
        let total = scenes.len();
        // Act I ends at the 25% mark, Act II at 75%, both inclusive
        let act_one_end = (total / 4 + 1).min(total);
        let act_two_end = (total * 3 / 4 + 1).clamp(act_one_end, total);

        Self {
            act_one: &scenes[..act_one_end],
            act_two: &scenes[act_one_end..act_two_end],
            act_three: &scenes[act_two_end..],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'a [Scene])> {
        [
            ("Act I", self.act_one),
            ("Act II", self.act_two),
            ("Act III", self.act_three),
        ]
        .into_iter()
    }
}
