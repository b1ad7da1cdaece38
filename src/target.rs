//! Target ingestion: whitespace-separated 16-bit integers.
//!
//! Every token is checked before any search starts. A bad token becomes an
//! [`Error::InvalidTarget`] whose diagnostic points at the token's bytes.

use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::span::{Span, Spanned};

/// Split `source` into whitespace-separated tokens with their spans.
pub fn tokenize(source: &str) -> Vec<Spanned<&str>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in source.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push(Spanned::new(&source[s..i], Span::new(s as u32, i as u32)));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Spanned::new(
            &source[s..],
            Span::new(s as u32, source.len() as u32),
        ));
    }
    tokens
}

/// Parse a target sequence.
pub fn parse_target(source: &str) -> Result<Vec<u16>> {
    let tokens = tokenize(source);
    let mut values = Vec::with_capacity(tokens.len());
    for token in tokens {
        values.push(parse_value(token)?);
    }
    if values.is_empty() {
        return Err(Error::EmptyTarget);
    }
    Ok(values)
}

/// The source text for targets given as separate command-line arguments.
/// Diagnostic spans refer to this joined string.
pub fn join_args(args: &[String]) -> String {
    args.join(" ")
}

fn parse_value(token: Spanned<&str>) -> Result<u16> {
    let text = token.node;
    if let Ok(value) = text.parse::<u16>() {
        return Ok(value);
    }
    let diagnostic = if text.parse::<i128>().is_ok() || is_integer_literal(text) {
        Diagnostic::error(format!("value `{}` is out of range", text), token.span)
            .with_help("target values must lie in 0..=65535".to_string())
    } else {
        Diagnostic::error(format!("`{}` is not an integer", text), token.span)
            .with_note("targets are whitespace-separated decimal integers".to_string())
    };
    Err(Error::InvalidTarget(Box::new(diagnostic)))
}

/// Digits with an optional sign, too long for `i128`.
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(result: Result<Vec<u16>>) -> Diagnostic {
        match result {
            Err(Error::InvalidTarget(d)) => *d,
            other => panic!("expected InvalidTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_sequence() {
        assert_eq!(parse_target("5 10 15").unwrap(), vec![5, 10, 15]);
        assert_eq!(parse_target("  0\n65535\t7 \n").unwrap(), vec![0, 65535, 7]);
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize(" 12  345\n6");
        let spans: Vec<(&str, u32, u32)> = tokens
            .iter()
            .map(|t| (t.node, t.span.start, t.span.end))
            .collect();
        assert_eq!(spans, vec![("12", 1, 3), ("345", 5, 8), ("6", 9, 10)]);
    }

    #[test]
    fn test_non_integer_token() {
        let d = diagnostic(parse_target("1 2 abc 4"));
        assert_eq!(d.message, "`abc` is not an integer");
        assert_eq!(d.span, Span::new(4, 7));
    }

    #[test]
    fn test_out_of_range_token() {
        let d = diagnostic(parse_target("1 65536"));
        assert_eq!(d.message, "value `65536` is out of range");
        assert_eq!(d.span, Span::new(2, 7));
        assert!(d.help.is_some());
    }

    #[test]
    fn test_negative_value_is_out_of_range() {
        let d = diagnostic(parse_target("-3"));
        assert_eq!(d.message, "value `-3` is out of range");
    }

    #[test]
    fn test_huge_literal_is_out_of_range() {
        let d = diagnostic(parse_target("123456789012345678901234567890123456789012"));
        assert!(d.message.contains("out of range"));
    }

    #[test]
    fn test_decimal_point_is_not_an_integer() {
        let d = diagnostic(parse_target("1.5"));
        assert!(d.message.contains("not an integer"));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_target(" \n "), Err(Error::EmptyTarget)));
    }

    #[test]
    fn test_args_spans_follow_joined_source() {
        let args: Vec<String> = ["3", "x9"].iter().map(|s| s.to_string()).collect();
        let source = join_args(&args);
        let d = diagnostic(parse_target(&source));
        assert_eq!(&source[d.span.range()], "x9");
    }
}
