use scripta_model::{Element, ElementVisitor, ExportOptions};

pub const FOUNTAIN_EXTENSION: &str = "fountain";

struct Context {
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// `before` + content + `after`
    fn add_block(&mut self, before: &str, content: &str, after: &str) {
        self.add(before);
        self.add(content);
        self.add(after);
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

impl ElementVisitor for Context {
    fn visit_scene_heading(&mut self, element: &Element) {
        self.add_block("\n", &element.content.to_uppercase(), "\n\n");
    }

    fn visit_action(&mut self, element: &Element) {
        self.add_block("", &element.content, "\n\n");
    }

    fn visit_character(&mut self, element: &Element) {
        self.add_block("\n", &element.content.to_uppercase(), "\n");
    }

    fn visit_dialogue(&mut self, element: &Element) {
        self.add_block("", &element.content, "\n");
    }

    fn visit_parenthetical(&mut self, element: &Element) {
        self.add_block("(", strip_parens(&element.content), ")\n");
    }

    fn visit_transition(&mut self, element: &Element) {
        self.add_block("\n> ", &element.content.to_uppercase(), "\n\n");
    }

    fn visit_shot(&mut self, element: &Element) {
        self.add_block("\n", &element.content.to_uppercase(), "\n\n");
    }
}

/// One leading `(` and one trailing `)`, if present
fn strip_parens(content: &str) -> &str {
    let content = content.strip_prefix('(').unwrap_or(content);
    content.strip_suffix(')').unwrap_or(content)
}

/// Compile a screenplay to Fountain text
pub fn compile_to_fountain(options: &ExportOptions, elements: &[Element]) -> String {
    let mut ctx = Context::new();

    ctx.add_block("Title: ", options.display_title(), "\n");
    ctx.add_block("Author: ", options.display_author(), "\n");
    ctx.add("\n===\n\n");

    ctx.visit_elements(elements);

    ctx.get_output()
}

/// Download name: `<title or "screenplay">.fountain`
pub fn fountain_file_name(title: &str) -> String {
    let stem = if title.is_empty() { "screenplay" } else { title };
    format!("{}.{}", stem, FOUNTAIN_EXTENSION)
}
