//! Pretty failure rendering using ariadne.
//!
//! Converts a [`ParseFailure`] into an ariadne [`Report`] for coloured,
//! source-annotated terminal output. Machine consumers get the failure as
//! structured JSON instead.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use cmdgram_diagnostics::ParseFailure;

/// Output format for subcommand results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Resolve an explicit `--output` value, defaulting to pretty for
    /// interactive terminals and JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

/// Render one parse failure in pretty (ariadne) format to stderr.
///
/// Failures with a span are rendered with source context (underline over
/// the offending tokens); spanless failures point at the end of the line.
pub(crate) fn render_failure_pretty(source: &str, filename: &str, failure: &ParseFailure) {
    // Clamp the span to the source length to avoid panics on odd input.
    let (start, end) = match failure.span {
        Some(span) => {
            let start = span.start.min(source.len());
            (start, span.end.min(source.len()).max(start))
        }
        None => (source.len(), source.len()),
    };

    let label_msg = if failure.params.is_empty() {
        failure.message_key.to_string()
    } else {
        failure.params.join(", ")
    };

    let mut builder = Report::build(ReportKind::Error, (filename, start..end))
        .with_code(failure.message_key.as_ref())
        .with_message(failure.to_string())
        .with_config(Config::default().with_compact(false))
        .with_label(
            Label::new((filename, start..end))
                .with_message(label_msg)
                .with_color(Color::Red),
        );

    if let Some(explanation) = failure.explain() {
        builder = builder.with_help(explanation);
    }

    let mut cache = (filename, Source::from(source));
    builder.finish().eprint(&mut cache).ok();
}
