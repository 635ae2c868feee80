//! Hand-off to the platform print pipeline

use crate::{compile_to_html, CompileOptions};
use scripta_model::{Element, ExportOptions};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintError {
    /// The platform refused a rendering surface (e.g. a blocked popup)
    #[error("Could not open print surface: {0}")]
    SurfaceDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a formatted document to paper or PDF
pub trait Printer {
    fn print(&mut self, html: &str) -> Result<(), PrintError>;
}

/// Compile the print HTML and hand it to `printer`
///
/// Failure only affects this export attempt.
pub fn export_to_print<P: Printer + ?Sized>(
    printer: &mut P,
    export: &ExportOptions,
    elements: &[Element],
) -> Result<(), PrintError> {
    let html = compile_to_html(export, elements, CompileOptions::default());

    printer.print(&html).map_err(|err| {
        tracing::error!(error = %err, "print export failed");
        err
    })
}
