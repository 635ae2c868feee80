//! Fountain export.
//!
//! Writes a screenplay as Fountain-style plain text: a title/author header,
//! a `===` separator, then one block per element with fixed blank-line
//! framing. Output is byte-for-byte deterministic for a given input.

mod compiler;

pub use compiler::{compile_to_fountain, fountain_file_name, FOUNTAIN_EXTENSION};
