mod compiler;
mod print;

pub use compiler::{compile_to_html, escape_html, CompileOptions, PRINT_STYLES};
pub use print::{export_to_print, PrintError, Printer};
