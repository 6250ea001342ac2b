//! Priority-based color modification model (`SPEC_FULL.md` §4.6).
//!
//! A code line can be touched by several overlapping recolorings: a user
//! [`crate::diagnostic::Color`], a primary label's underline recoloring the
//! source text itself, a secondary label doing the same. Each is recorded as
//! a `ColorModification` over a half-open run of relative (1-based) columns;
//! the highest-priority modification covering a column wins.

use crate::layout::canvas::CellRow;
use crate::style::StyleFn;

/// Priority of a code line's own, unmodified text.
pub const PRIORITY_BASE: i32 = 0;
/// Priority of a caller-supplied [`crate::diagnostic::Color`].
pub const PRIORITY_USER_COLOR: i32 = 20;
/// Priority of a secondary label's recoloring.
pub const PRIORITY_SECONDARY_UNDERLINE: i32 = 29;
/// Priority of a primary label's recoloring, always the highest.
pub const PRIORITY_PRIMARY_UNDERLINE: i32 = 30;

#[derive(Clone)]
pub struct ColorModification {
    /// Inclusive, 1-based relative column range.
    pub start: i64,
    pub end: i64,
    pub style: StyleFn,
    pub priority: i32,
}

/// Resolve `mods` against `text`, producing a row whose columns carry the
/// highest-priority style covering them (ties keep the first-applied).
#[must_use]
pub fn resolve(text: &str, mods: &[ColorModification]) -> CellRow {
    let chars: Vec<char> = text.chars().collect();
    let mut priorities = vec![PRIORITY_BASE - 1; chars.len()];
    let mut styles: Vec<Option<StyleFn>> = vec![None; chars.len()];

    for m in mods {
        let start = m.start.max(1) as usize;
        let end = (m.end as usize).min(chars.len());
        if start > end {
            continue;
        }
        for col in start..=end {
            let idx = col - 1;
            if m.priority > priorities[idx] {
                priorities[idx] = m.priority;
                styles[idx] = Some(m.style.clone());
            }
        }
    }

    let mut row = CellRow::new();
    for (idx, ch) in chars.into_iter().enumerate() {
        row.write_str(idx + 1, &ch.to_string(), styles[idx].clone());
    }
    row
}

/// Translate a file-absolute `[start, end]` position range into columns
/// relative to a single line's normalized (de-indented) display text.
///
/// `line_start` is the line's first absolute position. `indent` is that
/// line's own original indent width; `min_indent` is the minimum indent
/// stripped from every line of the enclosing snippet. When
/// `should_be_trimmed` is set the line's own indent is restored relative to
/// the group minimum instead of being dropped entirely.
#[must_use]
pub fn convert_range_to_relative(
    line_start: u32,
    pos_start: u32,
    pos_end: u32,
    indent: u32,
    min_indent: u32,
    should_be_trimmed: bool,
) -> (i64, i64) {
    let effective_indent: i64 = if should_be_trimmed {
        i64::from(indent) - i64::from(min_indent)
    } else {
        0
    };
    let new_start = i64::from(pos_start) - i64::from(line_start) + 1 + effective_indent;
    let new_end = i64::from(pos_end) - i64::from(line_start) + 1 - i64::from(min_indent);
    (new_start, new_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleFn;

    #[test]
    fn test_higher_priority_wins() {
        let low = ColorModification {
            start: 1,
            end: 3,
            style: StyleFn::red(),
            priority: PRIORITY_USER_COLOR,
        };
        let high = ColorModification {
            start: 2,
            end: 2,
            style: StyleFn::bold(),
            priority: PRIORITY_PRIMARY_UNDERLINE,
        };
        let row = resolve("abc", &[low, high]);
        assert_eq!(row.render_trimmed(), "a\u{1b}[1mb\u{1b}[0mc");
    }

    #[test]
    fn test_convert_range_to_relative_no_trim() {
        let (s, e) = convert_range_to_relative(10, 12, 14, 2, 2, false);
        assert_eq!((s, e), (3, 3));
    }

    #[test]
    fn test_convert_range_to_relative_trimmed() {
        let (s, e) = convert_range_to_relative(10, 14, 16, 4, 2, true);
        assert_eq!((s, e), (7, 5));
    }
}
