use crate::element::{Element, ElementType};

/// Visitor over a screenplay's element sequence
///
/// Default implementations walk every element and dispatch on its type.
/// Override the per-type methods to emit output.
pub trait ElementVisitor: Sized {
    fn visit_elements(&mut self, elements: &[Element]) {
        walk_elements(self, elements);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_scene_heading(&mut self, _element: &Element) {}

    fn visit_action(&mut self, _element: &Element) {}

    fn visit_character(&mut self, _element: &Element) {}

    fn visit_dialogue(&mut self, _element: &Element) {}

    fn visit_parenthetical(&mut self, _element: &Element) {}

    fn visit_transition(&mut self, _element: &Element) {}

    fn visit_shot(&mut self, _element: &Element) {}
}

pub fn walk_elements<V: ElementVisitor>(visitor: &mut V, elements: &[Element]) {
    for element in elements {
        visitor.visit_element(element);
    }
}

pub fn walk_element<V: ElementVisitor>(visitor: &mut V, element: &Element) {
    match element.element_type {
        ElementType::SceneHeading => visitor.visit_scene_heading(element),
        ElementType::Action => visitor.visit_action(element),
        ElementType::Character => visitor.visit_character(element),
        ElementType::Dialogue => visitor.visit_dialogue(element),
        ElementType::Parenthetical => visitor.visit_parenthetical(element),
        ElementType::Transition => visitor.visit_transition(element),
        ElementType::Shot => visitor.visit_shot(element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CueCounter {
        cues: usize,
        lines: usize,
    }

    impl ElementVisitor for CueCounter {
        fn visit_element(&mut self, element: &Element) {
            self.lines += 1;
            walk_element(self, element);
        }

        fn visit_character(&mut self, _element: &Element) {
            self.cues += 1;
        }
    }

    #[test]
    fn test_visitor_dispatches_by_type() {
        let elements = vec![
            Element::new("1", ElementType::SceneHeading, "INT. A - DAY"),
            Element::new("2", ElementType::Character, "ANN"),
            Element::new("3", ElementType::Dialogue, "Hi."),
            Element::new("4", ElementType::Character, "BOB"),
        ];

        let mut counter = CueCounter::default();
        counter.visit_elements(&elements);

        assert_eq!(counter.cues, 2);
        assert_eq!(counter.lines, 4);
    }
}
