use pretty_assertions::assert_eq;

use crate::diagnostic::{Diagnostic, FileRange, LabelStyle, Severity};
use crate::file::{File, FileRegistry};
use crate::layout::{emit, RenderConfig};
use crate::range::Range;

fn no_color_config() -> RenderConfig {
    RenderConfig {
        force_no_color: true,
        ..RenderConfig::default()
    }
}

#[test]
fn test_single_line_primary_label_with_header() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string("a.txt", "let x = 1;\n"));

    let mut diag = Diagnostic::new(Severity::Error);
    diag.set_header("E001", "something went wrong").add_label(
        LabelStyle::Primary,
        FileRange::new(file, Range::new(5, 5)),
        "binding",
    );

    let out = emit(&diag, &files, &no_color_config()).unwrap();
    assert_eq!(
        out,
        "error[E001]: something went wrong\n ┌─ a.txt:1:1\n1 │ let x = 1;\n  │     ^ binding"
    );
}

#[test]
fn test_label_without_content_has_no_message_row() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string("a.txt", "abc\n"));

    let mut diag = Diagnostic::new(Severity::Warning);
    diag.add_label(LabelStyle::Primary, FileRange::new(file, Range::new(1, 1)), "");

    let out = emit(&diag, &files, &no_color_config()).unwrap();
    assert_eq!(out, " ┌─ a.txt:1:1\n1 │ abc\n  │ ^");
}

#[test]
fn test_two_labels_on_one_line_stack() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string("a.txt", "abc def\n"));

    let mut diag = Diagnostic::new(Severity::Error);
    diag.add_label(LabelStyle::Primary, FileRange::new(file, Range::new(1, 3)), "first")
        .add_label(LabelStyle::Secondary, FileRange::new(file, Range::new(5, 7)), "second");

    let out = emit(&diag, &files, &no_color_config()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    // file header, code line, underline row, then two stacked content rows.
    // "second" starts later, so it is processed first and still carries a
    // connector down to "first"; "first" lands last with no connector.
    assert_eq!(lines.len(), 5);
    assert!(lines[2].contains("^^^") && lines[2].contains("---"));
    assert!(lines[3].contains('│') && lines[3].contains("second"));
    assert!(lines[4].contains("first"));
}

#[test]
fn test_multi_line_label_brackets_the_group() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string("a.txt", "line1\nline2\nline3\n"));

    let mut diag = Diagnostic::new(Severity::Error);
    diag.add_label(
        LabelStyle::Primary,
        FileRange::new(file, Range::new(1, 17)),
        "spans three lines",
    );

    let out = emit(&diag, &files, &no_color_config()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].contains('╭'), "expected opening bracket: {lines:?}");
    assert!(lines[2].contains('│'), "expected passthrough bracket: {lines:?}");
    assert!(lines[3].contains('╰'), "expected closing bracket: {lines:?}");
    assert!(lines.last().unwrap().contains("spans three lines"));
}

#[test]
fn test_non_consecutive_lines_get_gap_marker() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string(
        "a.txt",
        "line1\nline2\nline3\nline4\nline5\nline6\nline7\n",
    ));

    let mut diag = Diagnostic::new(Severity::Note);
    diag.add_label(LabelStyle::Primary, FileRange::new(file, Range::new(1, 1)), "a")
        .add_label(LabelStyle::Primary, FileRange::new(file, Range::new(37, 37)), "b");

    let out = emit(&diag, &files, &no_color_config()).unwrap();
    assert!(out.contains('·'), "expected a gap marker line: {out}");
}

#[test]
fn test_second_container_uses_tee_border() {
    let mut files = FileRegistry::new();
    let a = files.add_file(File::from_string("a.txt", "one\n"));
    let b = files.add_file(File::from_string("b.txt", "two\n"));

    let mut diag = Diagnostic::new(Severity::Help);
    diag.add_label(LabelStyle::Primary, FileRange::new(a, Range::new(1, 1)), "x")
        .add_label(LabelStyle::Secondary, FileRange::new(b, Range::new(1, 1)), "y");

    let out = emit(&diag, &files, &no_color_config()).unwrap();
    assert!(out.contains("┌─ a.txt"));
    assert!(out.contains("├─ b.txt"));
}

#[test]
fn test_notes_are_appended() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string("a.txt", "abc\n"));

    let mut diag = Diagnostic::new(Severity::Note);
    diag.add_label(LabelStyle::Primary, FileRange::new(file, Range::new(1, 1)), "x")
        .add_note("consider renaming this");

    let out = emit(&diag, &files, &no_color_config()).unwrap();
    assert!(out.ends_with("= consider renaming this"));
}

#[test]
fn test_colors_enabled_emit_ansi_codes() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string("a.txt", "abc\n"));

    let mut diag = Diagnostic::new(Severity::Error);
    diag.set_header("E002", "bad thing").add_label(
        LabelStyle::Primary,
        FileRange::new(file, Range::new(1, 1)),
        "here",
    );

    let out = emit(&diag, &files, &RenderConfig::default()).unwrap();
    assert!(out.contains("\u{1b}["));
}

#[test]
fn test_mixed_indentation_in_a_multi_line_span_is_a_render_error() {
    let mut files = FileRegistry::new();
    let file = files.add_file(File::from_string("a.txt", "  a\n\tb\n"));

    let mut diag = Diagnostic::new(Severity::Error);
    diag.add_label(
        LabelStyle::Primary,
        FileRange::new(file, Range::new(1, 10)),
        "spans both lines",
    );

    let err = emit(&diag, &files, &no_color_config()).unwrap_err();
    assert_eq!(err.to_string(), "Mixed indentation found in file a.txt at line 2.");
}
