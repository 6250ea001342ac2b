//! Named source files decomposed into line [`Range`]s, with indentation
//! normalization used by the layout engine when slicing multi-line snippets.

use std::collections::BTreeMap;

use crate::range::Range;
use crate::RenderError;

/// Number of spaces a tab character expands to on ingestion.
const TAB_WIDTH: usize = 4;

/// Opaque, `Copy` handle to a [`File`] owned by a [`FileRegistry`].
///
/// Stored by [`crate::diagnostic::FileRange`] instead of a reference so that
/// `Diagnostic`/`Label` values carry no lifetime tied to a particular file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FileId(u32);

/// A named source file, decomposed into 1-indexed line ranges over
/// tab-expanded content.
#[derive(Clone, Debug)]
pub struct File {
    name: String,
    content: String,
    lines: Vec<Range>,
    /// First leading-whitespace character of each line, as it appeared
    /// *before* tab expansion (`None` for blank lines). Tab expansion makes
    /// every line's stored indent visually space-only, so mixed-indentation
    /// detection (§4.2) needs this recorded separately at ingestion time.
    original_indent_chars: Vec<Option<char>>,
}

impl File {
    /// Build a `File` from raw content: tabs are expanded to four spaces,
    /// then the content is split into line ranges (each including its
    /// trailing newline, if any).
    #[must_use]
    pub fn from_string(name: impl Into<String>, content: impl AsRef<str>) -> Self {
        let raw = content.as_ref();
        let original_indent_chars = raw.split('\n').map(leading_indent_char).collect();
        let expanded = expand_tabs(raw);
        let lines = split_lines(&expanded);
        File {
            name: name.into(),
            content: expanded,
            lines,
            original_indent_chars,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 1-based line number and its range containing `pos`.
    ///
    /// # Panics
    /// Panics if no line contains `pos`; callers are expected to only pass
    /// positions known to be valid within this file's content.
    #[must_use]
    pub fn position_to_line(&self, pos: u32) -> (u32, Range) {
        for (idx, line) in self.lines.iter().enumerate() {
            if pos >= line.get_start() && pos <= line.get_end() {
                return (idx as u32 + 1, *line);
            }
        }
        let last = self.lines.len() as u32;
        (last, self.lines[self.lines.len() - 1])
    }

    /// Range for 1-based line number `n`.
    pub fn get_range_for_line(&self, n: u32) -> Result<Range, RenderError> {
        if n == 0 || n as usize > self.lines.len() {
            return Err(RenderError::InvalidLineNumber {
                file: self.name.clone(),
                line: n,
            });
        }
        Ok(self.lines[n as usize - 1])
    }

    /// Range spanning lines `a..=b` (1-based, inclusive).
    pub fn get_line_range(&self, a: u32, b: u32) -> Result<Range, RenderError> {
        let start = self.get_range_for_line(a)?;
        let end = self.get_range_for_line(b)?;
        Ok(start.merge(&end))
    }

    /// Build a [`Range`] over `[start, end]`, validating bounds against the
    /// content length (1-based positions).
    pub fn range(&self, start: u32, end: u32) -> Result<Range, RenderError> {
        let len = self.content.chars().count() as u32;
        if start < 1 || end > len {
            return Err(RenderError::InvalidRangeBounds {
                file: self.name.clone(),
                start,
                end,
                len,
            });
        }
        Ok(Range::new(start, end))
    }

    /// Substring covered by `r`, by character position (1-based, inclusive).
    #[must_use]
    pub fn get_content_for_range(&self, r: &Range) -> String {
        let (start, end) = r.get();
        self.content
            .chars()
            .skip((start - 1) as usize)
            .take((end - start + 1) as usize)
            .collect()
    }

    /// Every line whose range loosely overlaps `r`.
    #[must_use]
    pub fn get_lines_in_range(&self, r: &Range) -> Vec<u32> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.loosely_fits_in(r).is_some())
            .map(|(idx, _)| idx as u32 + 1)
            .collect()
    }

    /// Expand `r` to whole lines, strip the group's minimum indentation from
    /// each covered line, and return `(text, per_line_indent, min_indent)`.
    ///
    /// `text` reproduces the snippet with uniform de-indentation, each
    /// covered line retaining its own trailing newline. `per_line_indent`
    /// maps 1-based line number to the line's *original* indent width (before
    /// stripping), and `min_indent` is the scalar subtracted from every line.
    pub fn get_normalized_content_for_range(
        &self,
        r: &Range,
    ) -> Result<(String, BTreeMap<u32, u32>, u32), RenderError> {
        let covered = self.get_lines_in_range(r);
        let first = *covered.first().unwrap_or(&1);
        let last = *covered.last().unwrap_or(&1);

        let mut indents: BTreeMap<u32, u32> = BTreeMap::new();
        let mut indent_char: Option<char> = None;
        let mut min_indent = u32::MAX;

        for &line_no in &covered {
            let line_range = self.get_range_for_line(line_no)?;
            let text = self.get_content_for_range(&line_range);
            let trimmed = text.trim_end_matches(['\n', '\r']);
            if trimmed.trim().is_empty() {
                indents.insert(line_no, 0);
                continue;
            }

            let indent_len = trimmed.chars().take_while(|c| *c == ' ').count() as u32;

            if let Some(c) = self
                .original_indent_chars
                .get((line_no - 1) as usize)
                .copied()
                .flatten()
            {
                if let Some(established) = indent_char {
                    if established != c {
                        return Err(RenderError::MixedIndentation {
                            file: self.name.clone(),
                            line: line_no,
                        });
                    }
                } else {
                    indent_char = Some(c);
                }
            }

            indents.insert(line_no, indent_len);
            min_indent = min_indent.min(indent_len);
        }

        if min_indent == u32::MAX {
            min_indent = 0;
        }

        let mut out = String::new();
        for line_no in first..=last {
            let line_range = self.get_range_for_line(line_no)?;
            let text = self.get_content_for_range(&line_range);
            let strip = min_indent.min(indents.get(&line_no).copied().unwrap_or(0)) as usize;
            out.push_str(&strip_leading(&text, strip));
        }

        Ok((out, indents, min_indent))
    }
}

/// First leading-whitespace character of a raw (pre-expansion) line, or
/// `None` if the line is blank or has no leading whitespace.
fn leading_indent_char(raw_line: &str) -> Option<char> {
    let trimmed = raw_line.trim_end_matches('\r');
    if trimmed.trim().is_empty() {
        return None;
    }
    match trimmed.chars().next() {
        Some(c @ (' ' | '\t')) => Some(c),
        _ => None,
    }
}

fn strip_leading(text: &str, n: usize) -> String {
    text.chars().skip(n).collect()
}

fn expand_tabs(content: &str) -> String {
    content.replace('\t', &" ".repeat(TAB_WIDTH))
}

fn split_lines(content: &str) -> Vec<Range> {
    if content.is_empty() {
        return vec![Range::new(1, 1)];
    }
    let chars: Vec<char> = content.chars().collect();
    let mut lines = Vec::new();
    let mut start = 1u32;
    let mut pos = 1u32;
    for &c in &chars {
        if c == '\n' {
            lines.push(Range::new(start, pos));
            start = pos + 1;
        }
        pos += 1;
    }
    if start <= chars.len() as u32 {
        lines.push(Range::new(start, chars.len() as u32));
    }
    lines
}

/// Owns a collection of [`File`]s, assigning each a stable [`FileId`] on
/// insertion. The layout engine resolves `FileRange`s against a registry
/// instead of storing file references directly (see `SPEC_FULL.md` §3.1).
#[derive(Clone, Debug, Default)]
pub struct FileRegistry {
    files: Vec<File>,
}

impl FileRegistry {
    #[must_use]
    pub fn new() -> Self {
        FileRegistry { files: Vec::new() }
    }

    pub fn add_file(&mut self, file: File) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(file);
        id
    }

    #[must_use]
    pub fn get(&self, id: FileId) -> &File {
        &self.files[id.0 as usize]
    }
}
