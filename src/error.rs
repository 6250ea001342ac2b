//! Fatal error conditions raised by [`crate::file::File`] and the layout engine.
//!
//! Recoverable conditions (duplicate labels, empty color-modification ranges,
//! content slices outside a line) are not represented here; they are logged
//! via [`crate::logging::DiagnosticLogger`] and silently skipped.

use thiserror::Error;

/// Fatal errors that abort rendering. There is no retry or partial-output
/// policy: any of these variants short-circuits `emit`.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RenderError {
    /// `get_range_for_line(n)` was called with `n` outside `1..=line_count`.
    #[error("Line is out of bounds of the file.")]
    InvalidLineNumber { file: String, line: u32 },

    /// A line's leading whitespace mixed spaces and tabs relative to the
    /// group's already-established indent character.
    #[error("Mixed indentation found in file {file} at line {line}.")]
    MixedIndentation { file: String, line: u32 },

    /// `range(start, end)` was called with `start < 1` or `end` past the
    /// file's content length.
    #[error("Range [{start}, {end}] is out of bounds of file {file} (length {len}).")]
    InvalidRangeBounds {
        file: String,
        start: u32,
        end: u32,
        len: u32,
    },
}
