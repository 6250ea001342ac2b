//! Core diagnostic types for structured, pre-render diagnostic descriptions.
//!
//! Defines [`Diagnostic`], [`Label`], [`Severity`], [`Color`] and [`Header`],
//! the building blocks a caller assembles before handing the result to
//! [`crate::layout::emit`].

use std::fmt;

use crate::file::FileId;
use crate::logging::{DiagnosticLogger, TracingLogger};
use crate::range::Range;
use crate::style::StyleFn;

/// Severity level for a diagnostic. Determines header color and primary
/// underline color (see `SPEC_FULL.md` §6).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Bug,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Bug => write!(f, "bug"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// Label style: primary uses severity color and `^`, secondary uses the
/// default cyan color and `-`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

/// A range anchored to a specific file, by non-owning [`FileId`] handle.
///
/// `should_be_trimmed` affects only the relative-range conversion offset
/// used when translating a color modification into line-local columns
/// (`SPEC_FULL.md` §4.6, §9).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FileRange {
    file: FileId,
    range: Range,
    should_be_trimmed: bool,
}

impl FileRange {
    #[must_use]
    pub fn new(file: FileId, range: Range) -> Self {
        FileRange {
            file,
            range,
            should_be_trimmed: false,
        }
    }

    /// Mark this range as trimmed: indentation is stripped relative to the
    /// line's own indent rather than to the snippet's minimum indent.
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.should_be_trimmed = true;
        self
    }

    #[must_use]
    pub fn file(&self) -> FileId {
        self.file
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn should_be_trimmed(&self) -> bool {
        self.should_be_trimmed
    }
}

/// An optional `(code, message)` header shown above the snippet.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Header {
    pub code: String,
    pub message: String,
}

/// A `(style, range, content)` annotation pointing at a source region.
///
/// Multi-line stacking depth is assigned per render pass, not stored here;
/// see `layout::multi_line::assign_depths`. Keeping it out of `Label` means
/// a `Diagnostic` stays immutable and safely shared across concurrent
/// renders.
#[derive(Clone, Debug)]
pub struct Label {
    style: LabelStyle,
    range: FileRange,
    content: String,
}

impl Label {
    #[must_use]
    pub fn style(&self) -> LabelStyle {
        self.style
    }

    #[must_use]
    pub fn range(&self) -> FileRange {
        self.range
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(self.style, LabelStyle::Primary)
    }
}

/// A free-form colorization applied over a [`FileRange`], independent of any
/// label. Multiple `Color` entries may overlap; resolution is priority-based
/// (`SPEC_FULL.md` §4.6).
#[derive(Clone, Debug)]
pub struct Color {
    range: FileRange,
    color: Vec<StyleFn>,
}

impl Color {
    #[must_use]
    pub fn range(&self) -> FileRange {
        self.range
    }

    #[must_use]
    pub fn style(&self) -> &[StyleFn] {
        &self.color
    }
}

/// A mutable builder accumulating everything needed to render one diagnostic.
///
/// Construct with [`Diagnostic::new`], mutate with the chainable `add_*`
/// methods, then hand an immutable reference to [`crate::layout::emit`].
#[derive(Clone, Debug)]
pub struct Diagnostic {
    severity: Severity,
    header: Option<Header>,
    ranges: Vec<FileRange>,
    labels: Vec<Label>,
    notes: Vec<String>,
    colors: Vec<Color>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Diagnostic {
            severity,
            header: None,
            ranges: Vec::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            colors: Vec::new(),
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn ranges(&self) -> &[FileRange] {
        &self.ranges
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn set_header(&mut self, code: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.header = Some(Header {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    pub fn add_range(&mut self, range: FileRange) -> &mut Self {
        self.ranges.push(range);
        self
    }

    /// Add a label, deduplicating on identical `(file, start, end)`.
    ///
    /// Equivalent to [`Diagnostic::add_label_with_logger`] with the default
    /// [`TracingLogger`].
    pub fn add_label(
        &mut self,
        style: LabelStyle,
        range: FileRange,
        content: impl Into<String>,
    ) -> &mut Self {
        self.add_label_with_logger(style, range, content, &TracingLogger)
    }

    /// Add a label using an explicit logger (used by tests to capture the
    /// duplicate-label warning without a global `tracing` subscriber).
    pub fn add_label_with_logger(
        &mut self,
        style: LabelStyle,
        range: FileRange,
        content: impl Into<String>,
        logger: &dyn DiagnosticLogger,
    ) -> &mut Self {
        let is_duplicate = self.labels.iter().any(|existing| {
            existing.range.file == range.file && existing.range.range == range.range
        });
        if is_duplicate {
            let (start, end) = range.range.get();
            logger.warn(&format!(
                "duplicate label range [{start}, {end}] ignored"
            ));
            return self;
        }
        self.labels.push(Label {
            style,
            range,
            content: content.into(),
        });
        self
    }

    pub fn add_note(&mut self, note: impl Into<String>) -> &mut Self {
        self.notes.push(note.into());
        self
    }

    pub fn add_color(&mut self, range: FileRange, color: Vec<StyleFn>) -> &mut Self {
        self.colors.push(Color { range, color });
        self
    }
}

#[cfg(test)]
mod tests;
