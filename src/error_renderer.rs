//! Error rendering using ariadne
//!
//! Syntax errors point at the offending character of the pattern; the
//! other errors are reported against the whole pattern.

use std::io::Write;
use std::ops::Range;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use condcfg_core::SyntaxErrorKind;

use crate::PatternError;

const SOURCE_ID: &str = "<pattern>";

/// Render a pattern error to stderr.
///
/// # Example
/// ```no_run
/// use condcfg::{Pattern, render_error};
///
/// let pattern = Pattern::new("N>1|N<0");
/// if let Err(e) = pattern.check_int(3) {
///     render_error(pattern.source(), &e);
/// }
/// ```
pub fn render_error(source: &str, error: &PatternError) {
    render_error_to_writer(source, error, &mut std::io::stderr(), true).ok();
}

/// Render a pattern error to a specific writer.
pub fn render_error_to(
    source: &str,
    error: &PatternError,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    render_error_to_writer(source, error, writer, true)
}

/// Render a pattern error to a String.
pub fn render_error_to_string(source: &str, error: &PatternError) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Same as [`render_error_to_string`] without ANSI color codes.
pub fn render_error_to_string_no_color(source: &str, error: &PatternError) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Short error code shown in the report header.
pub fn error_code(error: &PatternError) -> &'static str {
    match error {
        PatternError::Syntax(err) => match err.kind {
            SyntaxErrorKind::InvalidToken { .. } => "P001",
            SyntaxErrorKind::UnexpectedEnd => "P002",
            SyntaxErrorKind::UnmatchedParen => "P003",
        },
        PatternError::Execution { .. } => "E001",
        PatternError::Regex(_) => "R001",
    }
}

fn render_error_to_writer(
    source: &str,
    error: &PatternError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let whole: Range<usize> = 0..source.len();
    let (message, span, label, help) = match error {
        PatternError::Syntax(err) => (
            format!("'{}' {}", err.pattern, err.kind),
            clamp(err.span(), source.len()),
            err.label(),
            syntax_help(err.kind),
        ),
        PatternError::Execution { n, source: cause, .. } => (
            format!("evaluation failed for N={}", n),
            whole,
            cause.to_string(),
            None,
        ),
        PatternError::Regex(err) => (
            "invalid regular expression".to_string(),
            whole,
            err.to_string(),
            None,
        ),
    };

    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_message(&message)
        .with_config(ariadne::Config::default().with_color(use_color))
        .with_code(error_code(error))
        .with_label(
            Label::new((SOURCE_ID, span))
                .with_message(label)
                .with_color(colors.next()),
        );

    if let Some(help) = help {
        report = report.with_help(help);
    }

    report.finish().write((SOURCE_ID, Source::from(source)), &mut *writer)
}

/// Keeps the span inside the source so the caret never points past it.
fn clamp(span: Range<usize>, len: usize) -> Range<usize> {
    span.start.min(len)..span.end.min(len)
}

fn syntax_help(kind: SyntaxErrorKind) -> Option<&'static str> {
    match kind {
        SyntaxErrorKind::InvalidToken { .. } => {
            Some("conditions use N, numbers, parentheses and + - * / % > < >= <= == != && || !")
        }
        SyntaxErrorKind::UnexpectedEnd => Some("complete the operator: ||, &&, == or !="),
        SyntaxErrorKind::UnmatchedParen => None,
    }
}
