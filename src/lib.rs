//! Layout engine and renderer for terminal diagnostic snippets: headers,
//! source excerpts, single- and multi-line underlines, and notes.
//!
//! The data model ([`Diagnostic`], [`Label`], [`FileRange`]) is built up
//! against a [`FileRegistry`] of ingested [`File`]s, then handed to
//! [`layout::emit`] to produce the final string.

mod diagnostic;
mod error;
mod file;
mod layout;
mod logging;
mod range;
mod style;

pub use diagnostic::{Color, Diagnostic, FileRange, Header, Label, LabelStyle, Severity};
pub use error::RenderError;
pub use file::{File, FileId, FileRegistry};
pub use layout::{emit, emit_to, EmitError, RenderConfig};
pub use logging::{DiagnosticLogger, TracingLogger};
pub use range::Range;
pub use style::StyleFn;
