use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(
        diagnostics.iter().next().unwrap().to_string(),
        @"error at 0..5: expected an expression"
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownFragmentSpecifier, range(3, 8))
        .message("expression")
        .hint("did you mean `expr`?")
        .emit();

    insta::assert_snapshot!(
        diagnostics.iter().next().unwrap().to_string(),
        @"error at 3..8: `expression` is not a fragment specifier (hint: did you mean `expr`?)"
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyMacroRepetition, range(0, 4))
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedDelimiter, range(0, 5))
        .message("(")
        .related_to("opened here", range(6, 10))
        .emit();

    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: unclosed `(`
      |
    1 | hello world!
      | ^^^^^ ---- opened here
      | |
      | unclosed `(`
    ");
}

#[test]
fn containment_suppresses_lower_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedDelimiter, range(0, 20))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(5, 6))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].kind(), DiagnosticKind::UnclosedDelimiter);
}

#[test]
fn root_cause_suppresses_structural_at_same_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedDelimiter, range(4, 9))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(4, 5))
        .emit();

    let kinds: Vec<_> = diagnostics.filtered().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::ExpectedExpression]);
}

#[test]
fn disjoint_diagnostics_survive_filtering() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::LexicalError, range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedType, range(10, 12))
        .emit();

    assert_eq!(diagnostics.filtered().len(), 2);
    assert_eq!(
        diagnostics.kinds(),
        [DiagnosticKind::LexicalError, DiagnosticKind::ExpectedType]
    );
}
