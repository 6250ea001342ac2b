use crate::diagnostic::*;
use crate::file::{File, FileRegistry};
use crate::logging::tests::CapturingLogger;

fn sample_file_range(registry: &mut FileRegistry) -> (FileId, crate::range::Range) {
    let file = File::from_string("a.txt", "abc def ghi\n");
    let id = registry.add_file(file);
    (id, crate::range::Range::new(1, 3))
}

#[test]
fn test_builder_chaining() {
    let mut registry = FileRegistry::new();
    let (file, range) = sample_file_range(&mut registry);

    let mut diag = Diagnostic::new(Severity::Error);
    diag.set_header("E001", "something went wrong")
        .add_range(FileRange::new(file, range))
        .add_label(LabelStyle::Primary, FileRange::new(file, range), "here")
        .add_note("a note");

    assert_eq!(diag.severity(), Severity::Error);
    assert_eq!(diag.header().unwrap().code, "E001");
    assert_eq!(diag.ranges().len(), 1);
    assert_eq!(diag.labels().len(), 1);
    assert!(diag.labels()[0].is_primary());
    assert_eq!(diag.notes(), &["a note".to_string()]);
}

#[test]
fn test_duplicate_label_is_dropped_and_logged() {
    let mut registry = FileRegistry::new();
    let (file, range) = sample_file_range(&mut registry);
    let logger = CapturingLogger::default();

    let mut diag = Diagnostic::new(Severity::Warning);
    diag.add_label_with_logger(LabelStyle::Primary, FileRange::new(file, range), "first", &logger);
    diag.add_label_with_logger(
        LabelStyle::Secondary,
        FileRange::new(file, range),
        "second",
        &logger,
    );

    assert_eq!(diag.labels().len(), 1);
    assert_eq!(diag.labels()[0].content(), "first");
    assert_eq!(logger.messages.borrow().len(), 1);
}

#[test]
fn test_severity_display() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Bug.to_string(), "bug");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Note.to_string(), "note");
    assert_eq!(Severity::Help.to_string(), "help");
}

#[test]
fn test_file_range_trim_flag() {
    let mut registry = FileRegistry::new();
    let (file, range) = sample_file_range(&mut registry);
    let fr = FileRange::new(file, range);
    assert!(!fr.should_be_trimmed());
    assert!(fr.trim().should_be_trimmed());
}
