//! Placeholder grammar and variable substitution.
//!
//! Template content uses `{{.name}}`-shaped placeholders (the leading dot
//! and surrounding whitespace are optional). Content is tokenized into
//! literal and placeholder tokens in one linear pass, then substituted in
//! a second pass. A well-formed placeholder always resolves: to the
//! supplied value, or to `[name]` when the value is absent or empty.
//! Malformed brace sequences stay literal text.

use super::types::RenderData;

/// A lexical unit of template content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of plain text, emitted unchanged
    Literal(&'a str),

    /// A well-formed `{{.name}}` placeholder
    Placeholder {
        /// The variable name inside the braces
        name: &'a str,

        /// The full source span, including braces
        raw: &'a str,
    },
}

/// Split template content into literal and placeholder tokens.
///
/// Never fails; anything that does not parse as a placeholder is folded
/// into the surrounding literal text.
pub fn tokenize(content: &str) -> Vec<Token<'_>> {
    let bytes = content.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'{') {
            if let Some((name_start, name_end, end)) = parse_placeholder(bytes, i) {
                if literal_start < i {
                    tokens.push(Token::Literal(&content[literal_start..i]));
                }
                tokens.push(Token::Placeholder {
                    name: &content[name_start..name_end],
                    raw: &content[i..end],
                });
                literal_start = end;
                i = end;
                continue;
            }
        }
        i += 1;
    }

    if literal_start < content.len() {
        tokens.push(Token::Literal(&content[literal_start..]));
    }

    tokens
}

/// Try to parse a placeholder starting at `start` (which points at `{{`).
///
/// Returns the name span and the index one past the closing `}}`.
fn parse_placeholder(bytes: &[u8], start: usize) -> Option<(usize, usize, usize)> {
    let mut i = start + 2;

    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
    }

    let name_start = i;
    while bytes
        .get(i)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
    {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name_end = i;

    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }

    if bytes.get(i) == Some(&b'}') && bytes.get(i + 1) == Some(&b'}') {
        Some((name_start, name_end, i + 2))
    } else {
        None
    }
}

/// Substitute placeholders in content using the supplied data.
///
/// A placeholder resolves to its value when the key is present with a
/// non-empty value, and to the literal `[name]` otherwise. Pure and
/// deterministic.
pub fn substitute(content: &str, data: &RenderData) -> String {
    let mut out = String::with_capacity(content.len());

    for token in tokenize(content) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder { name, .. } => match data.get(name) {
                Some(value) if !value.is_empty() => out.push_str(value),
                _ => {
                    out.push('[');
                    out.push_str(name);
                    out.push(']');
                }
            },
        }
    }

    out
}
