//! Command-line lexer — tokenizes raw input into a stream of borrowed tokens.

/// Classification of a lexer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    /// A run of non-whitespace, non-quote, non-operator characters.
    Word,
    /// A double-quoted string. `text` excludes the quotes; the span covers
    /// them.
    Quoted,
    /// An operator token (`=`, `+=`, `><`, `<=`, ...).
    Operator,
}

/// A token that borrows its text directly from the source input — zero
/// allocation.
///
/// For `Word` tokens `text` is exactly `&input[start..end]`. For `Quoted`
/// tokens `text` is the content between the quotes while `start`/`end` cover
/// the quote characters, so spans always slice the source faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The classification of this token.
    pub kind: TokKind,
    /// Borrowed slice of the source input for this token.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Characters that always start an operator token outside brackets.
const fn is_op_char(b: u8) -> bool {
    matches!(b, b'=' | b'<' | b'>')
}

/// Whether the byte at `i` begins a compound assignment such as `+=`.
fn starts_compound_op(b: &[u8], i: usize) -> bool {
    matches!(b[i], b'+' | b'-' | b'*' | b'/' | b'%') && b.get(i + 1) == Some(&b'=')
}

/// Tokenize one command line into a sequence of borrowed tokens.
///
/// Splitting happens at ASCII whitespace boundaries and at recognized
/// operator characters (`=`, `<`, `>`, and arithmetic assignments like
/// `+=`), except inside a double-quoted string, which becomes a single
/// `Quoted` token with its whitespace preserved, and inside `[...]`/`{...}`
/// nesting, where `=` belongs to selector arguments and block states. An
/// unterminated quote runs to end of input. No escape processing is
/// performed; the remote protocol has none.
///
/// UTF-8 safety follows the same reasoning as any ASCII-delimiter scanner:
/// the split characters are all below 0x80, and UTF-8 continuation bytes
/// are in 0x80–0xBF, so byte-wise tests never split a multi-byte character.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let b = input.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0usize;
    let mut depth = 0usize; // bracket nesting, shields `=` in selectors
    while i < b.len() {
        if b[i].is_ascii_whitespace() {
            i += 1;
        } else if b[i] == b'"' {
            let start = i;
            i += 1;
            let content_start = i;
            while i < b.len() && b[i] != b'"' {
                i += 1;
            }
            let content_end = i;
            if i < b.len() {
                i += 1; // closing quote
            }
            toks.push(Token {
                kind: TokKind::Quoted,
                text: &input[content_start..content_end],
                start,
                end: i,
            });
        } else if depth == 0 && is_op_char(b[i]) {
            let start = i;
            while i < b.len() && is_op_char(b[i]) {
                i += 1;
            }
            toks.push(Token {
                kind: TokKind::Operator,
                text: &input[start..i],
                start,
                end: i,
            });
        } else if depth == 0 && starts_compound_op(b, i) {
            let start = i;
            i += 2;
            toks.push(Token {
                kind: TokKind::Operator,
                text: &input[start..i],
                start,
                end: i,
            });
        } else {
            let start = i;
            loop {
                match b[i] {
                    b'[' | b'{' => depth += 1,
                    b']' | b'}' => depth = depth.saturating_sub(1),
                    _ => {}
                }
                i += 1;
                if i >= b.len() || b[i].is_ascii_whitespace() || b[i] == b'"' {
                    break;
                }
                if depth == 0 && (is_op_char(b[i]) || starts_compound_op(b, i)) {
                    break;
                }
            }
            toks.push(Token {
                kind: TokKind::Word,
                text: &input[start..i],
                start,
                end: i,
            });
        }
    }
    toks
}
