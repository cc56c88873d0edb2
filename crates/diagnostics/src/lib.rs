//! Diagnostics for the cmdgram toolchain.
//!
//! Provides [`ParseFailure`], [`Span`], and the [`keys`] module of message
//! key constants. A parse failure is never a rendered string: it is a
//! localizable message key plus an ordered list of substitution parameters,
//! relayed verbatim to the command issuer for client-side localization.

#![warn(missing_docs)]

/// Message key constants and their explanations.
pub mod keys;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// A structured, localizable parse or build failure.
///
/// `message_key` selects the client-side localization template; `params` are
/// the ordered substitution arguments for that template. The pair is the only
/// error shape the parser and command builder ever return for per-call
/// failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Localization key (e.g., `"commands.generic.syntax"`).
    pub message_key: Cow<'static, str>,
    /// Ordered substitution parameters for the localized template.
    pub params: Vec<String>,
    /// Optional byte span in the input line that the failure relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ParseFailure {
    /// Create a failure with the given key and substitution parameters.
    pub fn new(
        message_key: impl Into<Cow<'static, str>>,
        params: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            message_key: message_key.into(),
            params: params.into_iter().collect(),
            span: None,
        }
    }

    /// Create a failure with a single substitution parameter.
    pub fn with_param(
        message_key: impl Into<Cow<'static, str>>,
        param: impl Into<String>,
    ) -> Self {
        Self::new(message_key, [param.into()])
    }

    /// Attach the input span the failure relates to (builder pattern).
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Returns the human-readable explanation for this failure's key, if any.
    pub fn explain(&self) -> Option<&'static str> {
        keys::explain(&self.message_key)
    }
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message_key)?;
        if !self.params.is_empty() {
            write!(f, " [{}]", self.params.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Span ────────────────────────────────────────────────────────────

    #[test]
    fn span_new_valid() {
        let s = Span::new(5, 10);
        assert_eq!(s.start, 5);
        assert_eq!(s.end, 10);
    }

    #[test]
    fn span_empty() {
        let s = Span::empty(7);
        assert_eq!(s.start, 7);
        assert_eq!(s.end, 7);
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    // ── ParseFailure constructors ───────────────────────────────────────

    #[test]
    fn failure_constructor() {
        let f = ParseFailure::new(keys::SYNTAX, ["~oops".to_string()]);
        assert_eq!(f.message_key, "commands.generic.syntax");
        assert_eq!(f.params, vec!["~oops"]);
        assert!(f.span.is_none());
    }

    #[test]
    fn failure_with_param() {
        let f = ParseFailure::with_param(keys::MISSING_PARAMETER, "victim");
        assert_eq!(f.params, vec!["victim"]);
    }

    #[test]
    fn failure_at_span() {
        let f = ParseFailure::with_param(keys::INVALID_INT, "abc").at(Span::new(3, 6));
        assert_eq!(f.span, Some(Span::new(3, 6)));
    }

    // ── Display ─────────────────────────────────────────────────────────

    #[test]
    fn failure_display() {
        let f = ParseFailure::new(keys::INVALID_ENUM_VALUE, ["up".into(), "mode".into()]);
        assert_eq!(
            format!("{f}"),
            "commands.generic.parameter.invalid [up, mode]"
        );
    }

    #[test]
    fn failure_display_no_params() {
        let f = ParseFailure::new(keys::SYNTAX, []);
        assert_eq!(format!("{f}"), "commands.generic.syntax");
    }

    // ── explain ─────────────────────────────────────────────────────────

    #[test]
    fn explain_known() {
        let f = ParseFailure::with_param(keys::INVALID_INT, "x");
        assert!(f.explain().is_some());
        assert!(f.explain().unwrap().contains("integer"));
    }

    #[test]
    fn explain_unknown() {
        let f = ParseFailure::new("commands.custom.whatever", []);
        assert!(f.explain().is_none());
    }

    #[test]
    fn all_keys_have_explanations() {
        let all = [
            keys::UNKNOWN_COMMAND,
            keys::SYNTAX,
            keys::TRAILING_ARGUMENT,
            keys::MISSING_PARAMETER,
            keys::VERSION_MISMATCH,
            keys::INVALID_INT,
            keys::INVALID_FLOAT,
            keys::INVALID_ENUM_VALUE,
            keys::INVALID_SELECTOR,
            keys::INVALID_COORDINATE,
            keys::INVALID_RANGE,
            keys::INVALID_JSON,
            keys::INVALID_BLOCK_STATE,
            keys::INVALID_POSTFIX,
            keys::REQUIRES_CHEATS,
            keys::REQUIRES_PERMISSION,
            keys::UNKNOWN_SUBCOMMAND,
        ];
        for key in &all {
            assert!(
                keys::explain(key).is_some(),
                "message key {key} has no explain() entry"
            );
        }
    }

    // ── Serde round-trip ────────────────────────────────────────────────

    #[test]
    fn failure_serde_roundtrip() {
        let f = ParseFailure::new(keys::VERSION_MISMATCH, ["10".into()]).at(Span::new(0, 2));
        let json = serde_json::to_string(&f).unwrap();
        let f2: ParseFailure = serde_json::from_str(&json).unwrap();
        assert_eq!(f, f2);
    }

    #[test]
    fn failure_serde_omits_none_span() {
        let f = ParseFailure::new(keys::SYNTAX, []);
        let json = serde_json::to_string(&f).unwrap();
        assert!(!json.contains("span"), "None span should be omitted: {json}");
    }
}
