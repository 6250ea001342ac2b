//! The per-row character canvas the layout engine paints into.
//!
//! Every emitted line (a numbered code line, an underline sub-line, a
//! bracket/connector row, a gap marker) is represented the same way: a
//! fixed-width gutter of up to `max_depth` columns (for multi-line label
//! brackets), followed by a body of positioned, optionally styled
//! characters. Overwriting a cell follows the "replaceable characters"
//! table from `SPEC_FULL.md` §4.8.

use crate::style::StyleFn;

/// A single rendered character with an optional terminal style.
#[derive(Clone)]
pub struct StyledChar {
    pub ch: char,
    pub style: Option<StyleFn>,
}

impl StyledChar {
    #[must_use]
    pub fn plain(ch: char) -> Self {
        StyledChar { ch, style: None }
    }

    #[must_use]
    pub fn styled(ch: char, style: StyleFn) -> Self {
        StyledChar {
            ch,
            style: Some(style),
        }
    }

    fn render(&self) -> String {
        match &self.style {
            Some(style) => style.apply(&self.ch.to_string()),
            None => self.ch.to_string(),
        }
    }
}

/// Overwrite policy used when placing a character over one that may already
/// be there.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Overwrite {
    /// Always replace, regardless of what is there.
    Always,
    /// Replace only if the existing cell is empty or one of the horizontal
    /// "replaceable" characters: space, `-`, `─`. Excludes `│`, so a run of
    /// horizontal padding never clobbers a vertical connector crossing it.
    HorizontalPad,
}

fn is_horizontal_pad_replaceable(c: char) -> bool {
    matches!(c, ' ' | '-' | '─')
}

/// A sparse, 1-indexed row of cells (gutter columns, or body columns).
#[derive(Clone, Default)]
pub struct CellRow {
    cells: Vec<Option<StyledChar>>,
}

impl CellRow {
    #[must_use]
    pub fn new() -> Self {
        CellRow { cells: Vec::new() }
    }

    /// Ensure the row has at least `len` columns (1-indexed, so length `len`
    /// covers columns `1..=len`).
    pub fn ensure_len(&mut self, len: usize) {
        if self.cells.len() < len {
            self.cells.resize(len, None);
        }
    }

    /// Set the 1-indexed column `col` to `value`, honoring `policy`.
    pub fn set(&mut self, col: usize, value: StyledChar, policy: Overwrite) {
        assert!(col >= 1, "columns are 1-indexed");
        self.ensure_len(col);
        let slot = &mut self.cells[col - 1];
        let allowed = match (slot.as_ref(), policy) {
            (_, Overwrite::Always) => true,
            (None, _) => true,
            (Some(existing), Overwrite::HorizontalPad) => is_horizontal_pad_replaceable(existing.ch),
        };
        if allowed {
            *slot = Some(value);
        }
    }

    /// Write `text` left-to-right starting at 1-indexed column `start`, each
    /// character sharing `style`.
    pub fn write_str(&mut self, start: usize, text: &str, style: Option<StyleFn>) {
        for (i, ch) in text.chars().enumerate() {
            let cell = match &style {
                Some(s) => StyledChar::styled(ch, s.clone()),
                None => StyledChar::plain(ch),
            };
            self.set(start + i, cell, Overwrite::Always);
        }
    }

    /// Render columns `1..=width` (padding missing/empty cells with spaces).
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let mut out = String::new();
        for i in 0..width {
            match self.cells.get(i).and_then(Option::as_ref) {
                Some(c) => out.push_str(&c.render()),
                None => out.push(' '),
            }
        }
        out
    }

    /// Render every column that was ever written to (no trailing padding).
    #[must_use]
    pub fn render_trimmed(&self) -> String {
        self.render(self.cells.len())
    }
}
