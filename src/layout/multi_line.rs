//! Placement of labels spanning more than one source line (`SPEC_FULL.md` §4.8).
//!
//! Each multi-line label owns one gutter column ("depth") for its whole run:
//! `╭` where it starts, `│` through the lines in between, `╰` where it ends,
//! followed by a dedicated annotation row carrying the closing underline and
//! message.

use crate::layout::canvas::{CellRow, Overwrite, StyledChar};
use crate::style::StyleFn;

/// A multi-line label before it has been assigned a gutter column. Columns
/// are only meaningful relative to the other labels active in the same line
/// group (`SPEC_FULL.md` §4.8), so this carries everything needed to compute
/// them except the depth itself.
#[derive(Clone)]
pub struct RawMultiLineLabel {
    pub first_line: u32,
    pub last_line: u32,
    pub start_col: i64,
    pub end_col: i64,
    pub is_primary: bool,
    pub content: String,
    pub style: StyleFn,
}

pub struct MultiLineLabel {
    pub first_line: u32,
    pub last_line: u32,
    pub start_col: i64,
    pub end_col: i64,
    pub is_primary: bool,
    pub content: String,
    pub style: StyleFn,
    pub depth: u32,
}

/// Assign each label a gutter column. Labels are ordered by first line
/// ascending, ties broken by the later-ending label coming first (so the
/// outermost label of a tied start owns the smaller column), then each gets
/// `(rank + 1) * 2` as its depth.
#[must_use]
pub fn assign_depths(spans: &[(u32, u32)]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by(|&a, &b| {
        let (a_first, a_last) = spans[a];
        let (b_first, b_last) = spans[b];
        a_first
            .cmp(&b_first)
            .then_with(|| (b_first + b_last).cmp(&(a_first + a_last)))
    });
    let mut depths = vec![0u32; spans.len()];
    for (rank, &idx) in order.iter().enumerate() {
        depths[idx] = (rank as u32 + 1) * 2;
    }
    depths
}

/// Select the labels overlapping one line group and assign their depths
/// within just that group, independent of any other group in the same file.
/// Two disjoint multi-line spans (e.g. one in lines 1-3, an unrelated one in
/// lines 50-55) never share a group, so each gets its own depth numbering
/// starting at 2 rather than depths that keep climbing across the whole file.
#[must_use]
pub fn labels_for_group(raw: &[RawMultiLineLabel], group_first: u32, group_last: u32) -> Vec<MultiLineLabel> {
    let overlapping: Vec<&RawMultiLineLabel> = raw
        .iter()
        .filter(|l| l.first_line <= group_last && l.last_line >= group_first)
        .collect();
    let spans: Vec<(u32, u32)> = overlapping.iter().map(|l| (l.first_line, l.last_line)).collect();
    let depths = assign_depths(&spans);
    overlapping
        .into_iter()
        .zip(depths)
        .map(|(l, depth)| MultiLineLabel {
            first_line: l.first_line,
            last_line: l.last_line,
            start_col: l.start_col,
            end_col: l.end_col,
            is_primary: l.is_primary,
            content: l.content.clone(),
            style: l.style.clone(),
            depth,
        })
        .collect()
}

/// Highest depth among `labels`, or `0` if there are none.
#[must_use]
pub fn max_depth(labels: &[MultiLineLabel]) -> usize {
    labels.iter().map(|l| l.depth as usize).max().unwrap_or(0)
}

/// Gutter contributed by `labels` for the *code* row at `line`: a corner at
/// a label's own column where it starts or ends, `│` through the lines in
/// between, with `─` padding out to `max_depth` on corner rows.
#[must_use]
pub fn gutter_for_line(labels: &[MultiLineLabel], line: u32, max_depth: usize) -> CellRow {
    let mut gutter = CellRow::new();
    gutter.ensure_len(max_depth);
    for label in labels {
        if line < label.first_line || line > label.last_line {
            continue;
        }
        let col = label.depth as usize;
        let is_edge = line == label.first_line || line == label.last_line;
        let ch = if line == label.first_line { '╭' } else if line == label.last_line { '╰' } else { '│' };
        gutter.set(col, StyledChar::styled(ch, label.style.clone()), Overwrite::Always);
        if is_edge {
            for pad in (col + 1)..=max_depth {
                gutter.set(pad, StyledChar::styled('─', label.style.clone()), Overwrite::HorizontalPad);
            }
        }
    }
    gutter
}

/// Gutter for a sub-line (an annotation row) attached to `line`: a plain
/// `│` for every label still open at `line` (started, not yet ended).
#[must_use]
pub fn passthrough_gutter(labels: &[MultiLineLabel], line: u32, max_depth: usize) -> CellRow {
    let mut gutter = CellRow::new();
    gutter.ensure_len(max_depth);
    for label in labels {
        if label.first_line <= line && line < label.last_line {
            let col = label.depth as usize;
            gutter.set(col, StyledChar::styled('│', label.style.clone()), Overwrite::Always);
        }
    }
    gutter
}

/// Build the closing annotation row(s): dashes from column 1 up to the
/// label's end column, then a caret/dash marker, then its message. A
/// `content` with more than one line gets one continuation row per
/// additional line, each aligned under the first line's text.
///
/// `start_col`/`end_col` are already de-indented relative columns (see
/// `color::convert_range_to_relative`), so `diff` is their plain difference,
/// clamped to zero for labels whose end precedes their start (e.g. one
/// covering only the newline at the end of its first line).
#[must_use]
pub fn end_annotation_body(label: &MultiLineLabel) -> Vec<CellRow> {
    let diff = (label.end_col - label.start_col).max(0) as usize;
    let marker = if label.is_primary { '^' } else { '-' };
    let mut row = CellRow::new();
    for i in 0..diff {
        row.set(i + 1, StyledChar::styled('─', label.style.clone()), Overwrite::Always);
    }
    row.set(diff + 1, StyledChar::styled(marker, label.style.clone()), Overwrite::Always);

    let mut lines = label.content.split('\n');
    if let Some(first) = lines.next() {
        if !first.is_empty() {
            row.write_str(diff + 3, first, Some(label.style.clone()));
        }
    }
    let mut rows = vec![row];
    for cont in lines {
        let mut cont_row = CellRow::new();
        cont_row.write_str(diff + 3, cont, Some(label.style.clone()));
        rows.push(cont_row);
    }
    rows
}
