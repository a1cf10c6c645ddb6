//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Renders diagnostics as annotated snippets of their definition text.
///
/// Messages without source text or span fall back to one plain line each.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    colored: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }

            match (&diag.source, &diag.span) {
                (Some(source), Some(span)) => {
                    self.format_snippet(w, &renderer, diag, source, span.clone())?
                }
                _ => writeln!(w, "{}: {} [{}]", diag.severity, diag.message, diag.definition)?,
            }

            for hint in &diag.hints {
                writeln!(w, "  = help: {hint}")?;
            }
        }

        Ok(())
    }

    fn format_snippet(
        &self,
        w: &mut impl Write,
        renderer: &Renderer,
        diag: &DiagnosticMessage,
        source: &str,
        span: Range<usize>,
    ) -> std::fmt::Result {
        let range = adjust_range(span, source);
        let snippet = Snippet::source(source)
            .line_start(1)
            .path(diag.definition.as_str())
            .annotation(AnnotationKind::Primary.span(range).label(&diag.message));

        let level = severity_to_level(diag.severity);
        let report: Vec<Group> = vec![level.primary_title(&diag.message).element(snippet)];
        writeln!(w, "{}", renderer.render(&report))
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Widens empty spans to one character, clamped to the source and snapped
/// to char boundaries.
pub(super) fn adjust_range(range: Range<usize>, source: &str) -> Range<usize> {
    let limit = source.len();
    let start = floor_char_boundary(source, range.start.min(limit));
    let end = floor_char_boundary(source, range.end.min(limit)).max(start);

    if start != end {
        return start..end;
    }
    match source[start..].chars().next() {
        Some(c) => start..start + c.len_utf8(),
        None => match source[..start].chars().next_back() {
            Some(c) => start - c.len_utf8()..start,
            None => start..start,
        },
    }
}

fn floor_char_boundary(source: &str, mut index: usize) -> usize {
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}
