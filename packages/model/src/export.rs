//! Metadata shared by the exporters

/// Fallback title for exports and new scripts
pub const UNTITLED_SCREENPLAY: &str = "Untitled Screenplay";

/// Fallback author line
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// What an exporter needs besides the element sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub title: String,
    pub author: String,
    /// Print output only; the plain-text header is always written
    pub include_title_page: bool,
}

impl ExportOptions {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            include_title_page: true,
        }
    }

    pub fn with_title_page(mut self, include: bool) -> Self {
        self.include_title_page = include;
        self
    }

    pub fn display_title(&self) -> &str {
        non_empty_or(&self.title, UNTITLED_SCREENPLAY)
    }

    pub fn display_author(&self) -> &str {
        non_empty_or(&self.author, UNKNOWN_AUTHOR)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new("", "")
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
