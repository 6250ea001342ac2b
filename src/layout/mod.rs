//! The layout engine: turns a [`Diagnostic`] plus its [`FileRegistry`] into a
//! terminal-ready string (`SPEC_FULL.md` §4, §6).

mod canvas;
mod color;
mod lines;
mod multi_line;
mod single_line;

use std::io;

use crate::diagnostic::Diagnostic;
use crate::error::RenderError;
use crate::file::{File, FileId, FileRegistry};
use crate::style::{self, StyleFn};

use canvas::CellRow;
use color::ColorModification;
use lines::{collect_containers, LineGroupContainer};
use multi_line::{MultiLineLabel, RawMultiLineLabel};
use single_line::LineLabel;

/// Render-time knobs that don't belong on [`Diagnostic`] itself, since they
/// describe how to print rather than what went wrong (`SPEC_FULL.md` §4.13).
#[derive(Copy, Clone, Debug)]
pub struct RenderConfig {
    /// Spaces a tab expands to; must match what [`File::from_string`] used.
    pub tab_width: usize,
    /// When set, every style function is replaced with the identity, useful
    /// for non-TTY output or `NO_COLOR`-style environments.
    pub force_no_color: bool,
    /// Currently informational; reserved for a future context-line window
    /// around a group's touched lines.
    pub context_lines: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            tab_width: 4,
            force_no_color: false,
            context_lines: 0,
        }
    }
}

fn pick(enabled: bool, f: StyleFn) -> StyleFn {
    if enabled {
        f
    } else {
        StyleFn::identity()
    }
}

/// Render `diagnostic` to a plain `String`.
pub fn emit(diagnostic: &Diagnostic, files: &FileRegistry, config: &RenderConfig) -> Result<String, RenderError> {
    let colors = !config.force_no_color;
    let mut out: Vec<String> = Vec::new();

    if let Some(header) = diagnostic.header() {
        let sev = diagnostic.severity();
        let sev_code = format!("{sev}[{}]", header.code);
        let sev_code = pick(colors, style::severity_color(sev)).apply(&sev_code);
        let sev_code = pick(colors, StyleFn::bold()).apply(&sev_code);
        let message = pick(colors, StyleFn::white()).apply(&header.message);
        let message = pick(colors, StyleFn::bold()).apply(&message);
        out.push(format!("{sev_code}: {message}"));
    }

    let containers = collect_containers(diagnostic, files);
    let width = line_number_width(&containers, files);

    for (container_idx, container) in containers.iter().enumerate() {
        render_container(diagnostic, files, config, container_idx, container, width, &mut out)?;
    }

    if !diagnostic.notes().is_empty() {
        let pad = " ".repeat(width);
        for note in diagnostic.notes() {
            out.push(format!("{pad}= {note}"));
        }
    }

    Ok(out.join("\n"))
}

/// Render `diagnostic` and write it to `writer`, followed by a newline.
///
/// # Errors
/// Returns [`EmitError::Render`] if layout fails, or [`EmitError::Io`] if the
/// subsequent write to `writer` fails.
pub fn emit_to(
    writer: &mut impl io::Write,
    diagnostic: &Diagnostic,
    files: &FileRegistry,
    config: &RenderConfig,
) -> Result<(), EmitError> {
    let text = emit(diagnostic, files, config)?;
    writer.write_all(text.as_bytes()).map_err(EmitError::Io)?;
    writer.write_all(b"\n").map_err(EmitError::Io)
}

/// Either layout failed, or the subsequent write to the sink failed.
#[derive(Debug)]
pub enum EmitError {
    Render(RenderError),
    Io(io::Error),
}

impl From<RenderError> for EmitError {
    fn from(e: RenderError) -> Self {
        EmitError::Render(e)
    }
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitError::Render(e) => write!(f, "{e}"),
            EmitError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EmitError {}

fn line_number_width(containers: &[LineGroupContainer], files: &FileRegistry) -> usize {
    let mut max_line = 1u32;
    for container in containers {
        let file = files.get(container.file);
        max_line = max_line.max(file.line_count() as u32);
    }
    max_line.to_string().len()
}

fn relative_col(line_start: u32, pos: u32) -> i64 {
    i64::from(pos) - i64::from(line_start) + 1
}

fn render_container(
    diagnostic: &Diagnostic,
    files: &FileRegistry,
    config: &RenderConfig,
    container_idx: usize,
    container: &LineGroupContainer,
    width: usize,
    out: &mut Vec<String>,
) -> Result<(), RenderError> {
    let colors = !config.force_no_color;
    let file = files.get(container.file);
    let pad = " ".repeat(width);
    let border = if container_idx == 0 { "┌─" } else { "├─" };
    let first = container.groups.first().map_or(1, |g| g.first());
    let last = container.groups.last().map_or(1, |g| g.last());
    out.push(format!("{pad}{border} {}:{first}:{last}", file.name()));

    let raw_multi_line = collect_multi_line_spans(diagnostic, file, container.file, colors)?;

    for (group_idx, group) in container.groups.iter().enumerate() {
        if group_idx > 0 {
            out.push(format!("{pad}·"));
        }
        let group_labels = multi_line::labels_for_group(&raw_multi_line, group.first(), group.last());
        let max_depth = multi_line::max_depth(&group_labels);
        for &line in &group.lines {
            render_code_line(
                diagnostic,
                file,
                container.file,
                config,
                &group_labels,
                max_depth,
                line,
                width,
                out,
            )?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_code_line(
    diagnostic: &Diagnostic,
    file: &File,
    file_id: FileId,
    config: &RenderConfig,
    multi_line_labels: &[MultiLineLabel],
    max_depth: usize,
    line: u32,
    width: usize,
    out: &mut Vec<String>,
) -> Result<(), RenderError> {
    let colors = !config.force_no_color;
    let line_range = file.get_range_for_line(line)?;
    let (line_start, _) = line_range.get();
    let raw_text = file.get_content_for_range(&line_range);
    let text = raw_text.trim_end_matches(['\n', '\r']);

    let body = apply_line_mods(diagnostic, file, file_id, line, line_start, text, colors);

    let gutter = multi_line::gutter_for_line(multi_line_labels, line, max_depth);
    let number = format!("{line:>width$}");
    let number = pick(colors, style::line_number_color()).apply(&number);
    let bar = pick(colors, style::line_number_color()).apply("│");
    let gutter_str = if max_depth > 0 { gutter.render(max_depth) } else { String::new() };
    out.push(format!("{number} {bar}{gutter_str} {}", body.render_trimmed()));

    let same_line_labels = single_line_labels_for(diagnostic, file, file_id, line, colors);
    if !same_line_labels.is_empty() {
        for row in single_line::build_rows(same_line_labels) {
            push_sub_line(out, width, multi_line_labels, line, max_depth, &row, colors);
        }
    }

    for label in multi_line_labels.iter().filter(|l| l.last_line == line) {
        for body in multi_line::end_annotation_body(label) {
            push_sub_line(out, width, multi_line_labels, line, max_depth, &body, colors);
        }
    }

    Ok(())
}

fn push_sub_line(
    out: &mut Vec<String>,
    width: usize,
    multi_line_labels: &[MultiLineLabel],
    line: u32,
    max_depth: usize,
    body: &CellRow,
    colors: bool,
) {
    let blank = " ".repeat(width);
    let bar = pick(colors, style::line_number_color()).apply("│");
    let gutter = multi_line::passthrough_gutter(multi_line_labels, line, max_depth);
    let gutter_str = if max_depth > 0 { gutter.render(max_depth) } else { String::new() };
    out.push(format!("{blank} {bar}{gutter_str} {}", body.render_trimmed()));
}

/// Labels anchored to `file_id` and confined to a single line, i.e. both
/// endpoints fall on `line`.
fn single_line_labels_for(
    diagnostic: &Diagnostic,
    file: &File,
    file_id: FileId,
    line: u32,
    colors: bool,
) -> Vec<LineLabel> {
    let Ok(line_range) = file.get_range_for_line(line) else {
        return Vec::new();
    };
    let (line_start, _) = line_range.get();
    let mut result = Vec::new();
    for label in diagnostic.labels() {
        let fr = label.range();
        if fr.file() != file_id {
            continue;
        }
        let (lo, _) = file.position_to_line(fr.range().get_start());
        let (hi, _) = file.position_to_line(fr.range().get_end());
        if lo != hi || lo != line {
            continue;
        }
        let start = relative_col(line_start, fr.range().get_start());
        let end = relative_col(line_start, fr.range().get_end());
        let style = if label.is_primary() {
            pick(colors, style::severity_color(diagnostic.severity()))
        } else {
            pick(colors, style::secondary_color())
        };
        result.push(LineLabel {
            start,
            end,
            is_primary: label.is_primary(),
            content: label.content().to_string(),
            style,
        });
    }
    result
}

/// Multi-line labels anchored to `file_id`, with start/end columns converted
/// into each label's own de-indented snippet coordinates (`SPEC_FULL.md`
/// §4.6, §9). Depths are not assigned here: they depend on which other
/// labels share a line group, so that happens per group in
/// `multi_line::labels_for_group`.
fn collect_multi_line_spans(
    diagnostic: &Diagnostic,
    file: &File,
    file_id: FileId,
    colors: bool,
) -> Result<Vec<RawMultiLineLabel>, RenderError> {
    let mut raw = Vec::new();
    for label in diagnostic.labels() {
        let fr = label.range();
        if fr.file() != file_id {
            continue;
        }
        let (first, first_range) = file.position_to_line(fr.range().get_start());
        let (last, last_range) = file.position_to_line(fr.range().get_end());
        if first == last {
            continue;
        }
        let whole = file.get_line_range(first, last)?;
        let (_, indents, min_indent) = file.get_normalized_content_for_range(&whole)?;
        let indent_first = indents.get(&first).copied().unwrap_or(0);
        let indent_last = indents.get(&last).copied().unwrap_or(0);
        let trimmed = fr.should_be_trimmed();

        let (start_col, _) = color::convert_range_to_relative(
            first_range.get_start(),
            fr.range().get_start(),
            fr.range().get_start(),
            indent_first,
            min_indent,
            trimmed,
        );
        let (_, end_col) = color::convert_range_to_relative(
            last_range.get_start(),
            fr.range().get_end(),
            fr.range().get_end(),
            indent_last,
            min_indent,
            trimmed,
        );

        let style = if label.is_primary() {
            pick(colors, style::severity_color(diagnostic.severity()))
        } else {
            pick(colors, style::secondary_color())
        };
        raw.push(RawMultiLineLabel {
            first_line: first,
            last_line: last,
            start_col,
            end_col,
            is_primary: label.is_primary(),
            content: label.content().to_string(),
            style,
        });
    }
    Ok(raw)
}

/// Resolve every color modification touching `line`'s own displayed text:
/// the plain base color, user [`crate::diagnostic::Color`] entries anchored
/// to `file_id`, and the recoloring contributed by labels (single- or
/// multi-line) covering this line.
#[allow(clippy::too_many_arguments)]
fn apply_line_mods(
    diagnostic: &Diagnostic,
    file: &File,
    file_id: FileId,
    line: u32,
    line_start: u32,
    text: &str,
    colors_enabled: bool,
) -> CellRow {
    let line_len = text.chars().count() as i64;
    let mut mods: Vec<ColorModification> = vec![ColorModification {
        start: 1,
        end: line_len.max(1),
        style: pick(colors_enabled, style::code_color()),
        priority: color::PRIORITY_BASE,
    }];

    for c in diagnostic.colors() {
        let fr = c.range();
        if fr.file() != file_id {
            continue;
        }
        let (lo, _) = file.position_to_line(fr.range().get_start());
        let (hi, _) = file.position_to_line(fr.range().get_end());
        if line < lo || line > hi {
            continue;
        }
        let start = if line == lo {
            relative_col(line_start, fr.range().get_start())
        } else {
            1
        };
        let end = if line == hi {
            relative_col(line_start, fr.range().get_end())
        } else {
            line_len
        };
        let applied = c.style().to_vec();
        let style = StyleFn::new(move |s: &str| StyleFn::compose(&applied, s));
        mods.push(ColorModification {
            start,
            end,
            style: pick(colors_enabled, style),
            priority: color::PRIORITY_USER_COLOR,
        });
    }

    for label in diagnostic.labels() {
        let fr = label.range();
        if fr.file() != file_id {
            continue;
        }
        let (lo, _) = file.position_to_line(fr.range().get_start());
        let (hi, _) = file.position_to_line(fr.range().get_end());
        if line < lo || line > hi {
            continue;
        }
        let start = if line == lo {
            relative_col(line_start, fr.range().get_start())
        } else {
            1
        };
        let end = if line == hi {
            relative_col(line_start, fr.range().get_end())
        } else {
            line_len
        };
        let priority = if label.is_primary() {
            color::PRIORITY_PRIMARY_UNDERLINE
        } else {
            color::PRIORITY_SECONDARY_UNDERLINE
        };
        let style = if label.is_primary() {
            pick(colors_enabled, style::severity_color(diagnostic.severity()))
        } else {
            pick(colors_enabled, style::secondary_color())
        };
        mods.push(ColorModification { start, end, style, priority });
    }

    color::resolve(text, &mods)
}

#[cfg(test)]
mod tests;
