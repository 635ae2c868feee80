use scripta_compiler_html::{PrintError, Printer};
use std::fs;
use std::path::PathBuf;

/// "Prints" by writing the formatted HTML to a file for a browser to print
pub struct FilePrinter {
    path: PathBuf,
}

impl FilePrinter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Printer for FilePrinter {
    fn print(&mut self, html: &str) -> Result<(), PrintError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, html)?;
        Ok(())
    }
}
