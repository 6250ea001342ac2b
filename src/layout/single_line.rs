//! Placement of labels confined to a single source line (`SPEC_FULL.md` §4.7).

use crate::layout::canvas::{CellRow, Overwrite, StyledChar};
use crate::style::StyleFn;

/// One label's placement on a single line, already converted to relative,
/// 1-based columns.
pub struct LineLabel {
    pub start: i64,
    pub end: i64,
    pub is_primary: bool,
    pub content: String,
    pub style: StyleFn,
}

/// Write `content`'s first line into `row` at 1-indexed column `col`, then
/// return one continuation row per additional line, each aligned under that
/// same column (`SPEC_FULL.md` §4.7).
fn write_content_lines(row: &mut CellRow, col: usize, content: &str, style: &StyleFn) -> Vec<CellRow> {
    let mut lines = content.split('\n');
    if let Some(first) = lines.next() {
        row.write_str(col, first, Some(style.clone()));
    }
    lines
        .map(|cont| {
            let mut r = CellRow::new();
            r.write_str(col, cont, Some(style.clone()));
            r
        })
        .collect()
}

/// Build the underline row plus any stacked content rows needed when more
/// than one label with content shares a line.
///
/// Labels are processed by `start` descending, so the latest-starting label
/// is handled first: its row carries a `│` connector for every label not yet
/// processed, and the earliest-starting label ends up in the bottom row with
/// no connector of its own, matching the classic nested-bracket layout.
#[must_use]
pub fn build_rows(mut labels: Vec<LineLabel>) -> Vec<CellRow> {
    labels.sort_by_key(|l| std::cmp::Reverse(l.start));

    let mut underline = CellRow::new();
    for label in &labels {
        let marker = if label.is_primary { '^' } else { '-' };
        let start = label.start.max(1) as usize;
        let end = label.end.max(label.start).max(1) as usize;
        for col in start..=end {
            underline.set(col, StyledChar::styled(marker, label.style.clone()), Overwrite::Always);
        }
    }

    let with_content: Vec<&LineLabel> = labels.iter().filter(|l| !l.content.is_empty()).collect();

    if with_content.len() <= 1 {
        let mut rows = vec![underline];
        if let Some(label) = with_content.first() {
            let col = label.end.max(label.start).max(1) as usize + 2;
            let continuation = write_content_lines(&mut rows[0], col, &label.content, &label.style);
            rows.extend(continuation);
        }
        return rows;
    }

    let mut rows = vec![underline];
    for (i, label) in with_content.iter().enumerate() {
        let mut row = CellRow::new();
        for remaining in &with_content[i + 1..] {
            let col = remaining.start.max(1) as usize;
            row.set(col, StyledChar::styled('│', remaining.style.clone()), Overwrite::Always);
        }
        let col = label.start.max(1) as usize;
        let continuation = write_content_lines(&mut row, col, &label.content, &label.style);
        rows.push(row);
        rows.extend(continuation);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleFn;

    #[test]
    fn test_single_label_inline_content() {
        let labels = vec![LineLabel {
            start: 5,
            end: 5,
            is_primary: true,
            content: "binding".to_string(),
            style: StyleFn::red(),
        }];
        let rows = build_rows(labels);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].render(14), "    ^ binding ");
    }

    #[test]
    fn test_two_labels_stack_rows() {
        let labels = vec![
            LineLabel {
                start: 1,
                end: 1,
                is_primary: true,
                content: "first".to_string(),
                style: StyleFn::red(),
            },
            LineLabel {
                start: 5,
                end: 5,
                is_primary: false,
                content: "second".to_string(),
                style: StyleFn::cyan(),
            },
        ];
        let rows = build_rows(labels);
        assert_eq!(rows.len(), 3);
        // The later-starting label ("second") is processed first, so its row
        // still carries a connector down to "first"; "first" lands last with
        // no connector of its own.
        assert!(rows[1].render_trimmed().contains('│'));
        assert!(rows[1].render_trimmed().contains("second"));
        assert!(!rows[2].render_trimmed().contains('│'));
        assert!(rows[2].render_trimmed().contains("first"));
    }

    #[test]
    fn test_single_label_multi_line_content_gets_continuation_rows() {
        let labels = vec![LineLabel {
            start: 1,
            end: 1,
            is_primary: true,
            content: "first line\nsecond line".to_string(),
            style: StyleFn::red(),
        }];
        let rows = build_rows(labels);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].render_trimmed().contains("first line"));
        assert_eq!(rows[1].render_trimmed(), "  second line");
    }
}
