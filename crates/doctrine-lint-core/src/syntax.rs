//! Identifier scanning for getter and method bodies.
//!
//! Derivation rules only need to know which member names a body mentions.
//! Bodies are tokenized with `proc-macro2`, which already drops comments and
//! keeps string literals opaque. C-family expression syntax lexes cleanly in
//! practice; when it does not (stray backticks, unbalanced delimiters in a
//! truncated snippet) a plain character scanner takes over.
//!
//! Interpolated strings (`$"..."`, `$@"..."`, `@$"..."`) are the one kind
//! of literal whose contents matter: each `{hole}` is code. Before either
//! pass runs, every interpolated string is replaced by its holes, each in
//! parentheses, with the literal text and format specifiers dropped.

use proc_macro2::{TokenStream, TokenTree};
use std::borrow::Cow;
use std::str::FromStr;

/// Returns the distinct identifiers referenced by `source`, in first-seen
/// order.
#[must_use]
pub fn referenced_identifiers(source: &str) -> Vec<String> {
    let source = expand_interpolations(source);
    let mut out = Vec::new();
    match TokenStream::from_str(&source) {
        Ok(stream) => collect_tokens(stream, &mut out),
        Err(e) => {
            tracing::debug!("falling back to plain identifier scan: {e}");
            scan_identifiers(&source, &mut out);
        }
    }
    out
}

/// Rewrites interpolated strings so that only their holes remain.
///
/// Comments, plain strings and character literals are copied through
/// untouched so a `$` inside them is never mistaken for an interpolation.
fn expand_interpolations(source: &str) -> Cow<'_, str> {
    if !source.contains('$') {
        return Cow::Borrowed(source);
    }

    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '/' if chars.get(i + 1) == Some(&'/') => {
                let end = chars[i..]
                    .iter()
                    .position(|&c| c == '\n')
                    .map_or(chars.len(), |n| i + n);
                out.extend(&chars[i..end]);
                i = end;
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                let end = chars[i + 2..]
                    .windows(2)
                    .position(|w| w == ['*', '/'])
                    .map_or(chars.len(), |n| i + 2 + n + 2);
                out.extend(&chars[i..end]);
                i = end;
            }
            '"' => {
                let verbatim = i > 0 && chars[i - 1] == '@';
                let end = literal_end(&chars, i + 1, '"', verbatim);
                out.extend(&chars[i..end]);
                i = end;
            }
            '\'' => {
                let end = literal_end(&chars, i + 1, '\'', false);
                out.extend(&chars[i..end]);
                i = end;
            }
            '$' | '@' => match interpolation_prefix(&chars[i..]) {
                Some((prefix_len, verbatim)) => {
                    i = expand_holes(&chars, i + prefix_len, verbatim, &mut out);
                }
                None => {
                    out.push(chars[i]);
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    Cow::Owned(out)
}

/// Length of an interpolated-string opener at the start of `chars`
/// (including the quote) and whether the string is verbatim.
fn interpolation_prefix(chars: &[char]) -> Option<(usize, bool)> {
    match chars {
        ['$', '"', ..] => Some((2, false)),
        ['$', '@', '"', ..] | ['@', '$', '"', ..] => Some((3, true)),
        _ => None,
    }
}

/// Index just past the closing `quote` of a literal whose body starts at
/// `start`.
fn literal_end(chars: &[char], start: usize, quote: char, verbatim: bool) -> usize {
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '\\' if !verbatim => i += 2,
            c if c == quote && verbatim && chars.get(i + 1) == Some(&quote) => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

/// Emits the holes of an interpolated string whose body starts at `start`
/// and returns the index just past its closing quote.
fn expand_holes(chars: &[char], start: usize, verbatim: bool, out: &mut String) -> usize {
    let mut i = start;
    out.push(' ');
    while i < chars.len() {
        match chars[i] {
            '\\' if !verbatim => i += 2,
            '"' if verbatim && chars.get(i + 1) == Some(&'"') => i += 2,
            '"' => return i + 1,
            '{' | '}' if chars.get(i + 1) == Some(&chars[i]) => i += 2,
            '{' => {
                let (expr_end, close) = hole_end(chars, i + 1);
                let hole: String = chars[i + 1..expr_end].iter().collect();
                out.push('(');
                out.push_str(&expand_interpolations(&hole));
                out.push_str(") ");
                i = close + 1;
            }
            _ => i += 1,
        }
    }
    chars.len()
}

/// Finds where the expression of a hole starting at `start` ends (before
/// any `:format` suffix) and where its closing brace sits.
fn hole_end(chars: &[char], start: usize) -> (usize, usize) {
    let mut depth = 0usize;
    let mut expr_end = None;
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '"' => {
                let verbatim = i > 0 && chars[i - 1] == '@';
                i = literal_end(chars, i + 1, '"', verbatim);
                continue;
            }
            '\'' => {
                i = literal_end(chars, i + 1, '\'', false);
                continue;
            }
            '(' | '[' | '{' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '}' if depth == 0 => return (expr_end.unwrap_or(i), i),
            '}' => depth -= 1,
            ':' if depth == 0 && expr_end.is_none() => expr_end = Some(i),
            _ => {}
        }
        i += 1;
    }
    (expr_end.unwrap_or(chars.len()), chars.len())
}

fn collect_tokens(stream: TokenStream, out: &mut Vec<String>) {
    for tree in stream {
        match tree {
            TokenTree::Ident(ident) => push_unique(out, ident.to_string()),
            TokenTree::Group(group) => collect_tokens(group.stream(), out),
            TokenTree::Punct(_) | TokenTree::Literal(_) => {}
        }
    }
}

fn push_unique(out: &mut Vec<String>, ident: String) {
    let ident = ident.strip_prefix("r#").map(String::from).unwrap_or(ident);
    if !out.contains(&ident) {
        out.push(ident);
    }
}

fn scan_identifiers(source: &str, out: &mut Vec<String>) {
    let bytes = source.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
            }
            b'"' | b'\'' => {
                i += 1;
                while i < bytes.len() && bytes[i] != c {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                push_unique(out, source[start..i].to_string());
            }
            c if c.is_ascii_digit() => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
}
