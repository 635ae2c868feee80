use scripta_model::{Element, ExportOptions};

/// Letter page, 1in margins with a 1.5in binding edge, 12pt Courier
pub const PRINT_STYLES: &str = r#"
@page {
  size: letter;
  margin: 1in 1in 1in 1.5in;
}

* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: 'Courier Prime', 'Courier New', Courier, monospace;
  font-size: 12pt;
  line-height: 1;
  color: #000;
  background: #fff;
}

.title-page {
  height: 100vh;
  display: flex;
  flex-direction: column;
  justify-content: center;
  align-items: center;
  text-align: center;
  page-break-after: always;
}

.title-page h1 {
  font-size: 24pt;
  font-weight: normal;
  text-transform: uppercase;
  margin-bottom: 24pt;
}

.title-page .author {
  font-size: 12pt;
  margin-top: 48pt;
}

.screenplay {
  max-width: 6in;
}

.element {
  margin: 0;
  padding: 0;
}

.scene-heading {
  text-transform: uppercase;
  font-weight: bold;
  margin-top: 24pt;
  margin-bottom: 12pt;
}

.action {
  margin-top: 12pt;
  margin-bottom: 12pt;
}

.character {
  text-transform: uppercase;
  margin-left: 2.2in;
  margin-top: 12pt;
  margin-bottom: 0;
}

.dialogue {
  margin-left: 1in;
  margin-right: 1in;
  margin-top: 0;
  margin-bottom: 12pt;
}

.parenthetical {
  margin-left: 1.5in;
  margin-right: 1.5in;
  margin-top: 0;
  margin-bottom: 0;
}

.transition {
  text-transform: uppercase;
  text-align: right;
  margin-top: 12pt;
  margin-bottom: 12pt;
}

.shot {
  text-transform: uppercase;
  margin-top: 12pt;
  margin-bottom: 12pt;
}

@media print {
  body {
    -webkit-print-color-adjust: exact;
    print-color-adjust: exact;
  }
}
"#;

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a screenplay to a self-contained, print-ready HTML page
pub fn compile_to_html(
    export: &ExportOptions,
    elements: &[Element],
    options: CompileOptions,
) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(export, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();

    if export.include_title_page {
        compile_title_page(export, &mut ctx);
    }

    ctx.add_line("<div class=\"screenplay\">");
    ctx.indent();
    for element in elements {
        compile_element(element, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</div>");

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    tracing::debug!(elements = elements.len(), "compiled print html");

    ctx.get_output()
}

fn compile_head(export: &ExportOptions, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"utf-8\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(export.display_title())));
    ctx.add_line("<style>");
    // Stylesheet goes in verbatim, unindented
    ctx.add(PRINT_STYLES);
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_title_page(export: &ExportOptions, ctx: &mut Context) {
    ctx.add_line("<div class=\"title-page\">");
    ctx.indent();
    ctx.add_line(&format!("<h1>{}</h1>", escape_html(export.display_title())));
    ctx.add_line("<div class=\"author\">");
    ctx.indent();
    ctx.add_line("<p>Written by</p>");
    ctx.add_line(&format!("<p>{}</p>", escape_html(export.display_author())));
    ctx.dedent();
    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_element(element: &Element, ctx: &mut Context) {
    ctx.add_line(&format!(
        "<p class=\"element {}\">{}</p>",
        element.element_type.as_str(),
        escape_html(&element.content)
    ));
}

/// Escape text so it can never be read as markup
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
