use logos::Logos;

use crate::{
    interpreter::{
        grammar::Grammar,
        value::core::{Cache, Kind},
    },
    util::{
        num::{IntLiteral, format_double, format_float, parse_int_literal},
        text::encloses,
    },
};

/// Numeric literal shapes.
///
/// A text is numeric only when a single one of these tokens spans all of it.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    #[token("inf")]
    #[token("-inf")]
    #[token("nan")]
    #[token("-nan")]
    #[token("-nan(ind)")]
    NonFinite,
    #[regex(r"-?[0-9]+")]
    Decimal,
    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"0[bB][01]+")]
    Prefixed,
    #[regex(r"-?([0-9]+\.[0-9]*|\.[0-9]+)f")]
    Float,
    #[regex(r"-?([0-9]+\.[0-9]*|\.[0-9]+)")]
    Double,
}

fn literal_shape(text: &str) -> Option<Literal> {
    let mut lexer = Literal::lexer(text);
    let shape = lexer.next()?.ok()?;

    (lexer.span() == (0..text.len()) && lexer.next().is_none()).then_some(shape)
}

/// The result of classifying a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// The canonical text.
    pub text:  String,
    pub kind:  Kind,
    pub cache: Cache,
}

impl Classified {
    const fn new(text: String, kind: Kind, cache: Cache) -> Self {
        Self { text, kind, cache }
    }

    fn plain(text: &str, kind: Kind) -> Self {
        Self::new(text.to_owned(), kind, Cache::Empty)
    }

    /// The canonical form of a double, including non-finite results.
    #[must_use]
    pub fn double(value: f64) -> Self {
        Self::new(format_double(value), Kind::Double, Cache::Double(value))
    }

    /// The canonical form of a float. Non-finite floats become doubles.
    #[must_use]
    pub fn float(value: f32) -> Self {
        if value.is_finite() {
            Self::new(format!("{}f", format_float(value)), Kind::Float, Cache::Float(value))
        } else {
            Self::double(f64::from(value))
        }
    }

    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::new(value.to_string(), Kind::Int, Cache::Int(value))
    }
}

/// Infers the kind of `text` and normalises it.
///
/// Classification tries, in order: numeric literal shapes, quoted strings and
/// chars, a single balanced array or parenthesised group, symbols and
/// operators, and keywords. Anything else is `Undefined`: a name, a call or a
/// subscript waiting to be resolved.
///
/// Integer literals that overflow become `inf` or `-inf`, and a char literal
/// with nothing between its quotes becomes `'\0'`.
///
/// # Example
/// ```
/// use cll::interpreter::{
///     grammar::Grammar,
///     value::{classify::classify, core::Kind},
/// };
///
/// let grammar = Grammar::STANDARD;
///
/// assert_eq!(classify("3.0f", &grammar).kind, Kind::Float);
/// assert_eq!(classify("007", &grammar).text, "7");
/// assert_eq!(classify("arr[0]", &grammar).kind, Kind::Undefined);
/// assert_eq!(classify("[1][0]", &grammar).kind, Kind::Undefined);
/// ```
#[must_use]
pub fn classify(text: &str, grammar: &Grammar) -> Classified {
    if text.is_empty() {
        return Classified::plain(text, Kind::Undefined);
    }

    if let Some(shape) = literal_shape(text) {
        return numeric(text, shape);
    }

    let quoted = |q: char| text.len() > 1 && text.starts_with(q) && text.ends_with(q);

    if quoted('"') {
        Classified::plain(text, Kind::String)
    } else if quoted('\'') {
        let text = if text.chars().count() < 3 { "'\\0'" } else { text };
        let cache = super::element::decode_char(text).map_or(Cache::Empty, Cache::Char);
        Classified::new(text.to_owned(), Kind::Char, cache)
    } else if encloses(text, '[', ']') {
        Classified::plain(text, Kind::Array)
    } else if encloses(text, '(', ')') {
        Classified::plain(text, Kind::Parenthesis)
    } else if grammar.is_symbol(text) {
        Classified::plain(text, Kind::Symbol)
    } else if grammar.is_keyword(text) {
        Classified::plain(text, Kind::Bare)
    } else {
        Classified::plain(text, Kind::Undefined)
    }
}

fn numeric(text: &str, shape: Literal) -> Classified {
    match shape {
        Literal::NonFinite => match text {
            "inf" => Classified::double(f64::INFINITY),
            "-inf" => Classified::double(f64::NEG_INFINITY),
            _ => Classified::double(f64::NAN),
        },
        Literal::Decimal | Literal::Prefixed => match parse_int_literal(text) {
            IntLiteral::Value(value) => Classified::int(value),
            IntLiteral::Overflow if text.starts_with('-') => Classified::double(f64::NEG_INFINITY),
            IntLiteral::Overflow => Classified::double(f64::INFINITY),
            IntLiteral::Invalid => Classified::plain(super::core::INVALID_VALUE, Kind::Undefined),
        },
        Literal::Float => match text.trim_end_matches('f').parse::<f32>() {
            Ok(value) => Classified::float(value),
            Err(_) => Classified::plain(super::core::INVALID_VALUE, Kind::Undefined),
        },
        Literal::Double => match text.parse::<f64>() {
            Ok(value) => Classified::double(value),
            Err(_) => Classified::plain(super::core::INVALID_VALUE, Kind::Undefined),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> Kind {
        classify(text, &Grammar::STANDARD).kind
    }

    #[test]
    fn numeric_shapes() {
        assert_eq!(kind("42"), Kind::Int);
        assert_eq!(kind("-42"), Kind::Int);
        assert_eq!(kind("0x1A"), Kind::Int);
        assert_eq!(kind("0b11"), Kind::Int);
        assert_eq!(kind("3.0"), Kind::Double);
        assert_eq!(kind(".5"), Kind::Double);
        assert_eq!(kind("3.0f"), Kind::Float);
        assert_eq!(kind("inf"), Kind::Double);
        assert_eq!(kind("3f"), Kind::Undefined);
        assert_eq!(kind("1.2.3"), Kind::Undefined);
    }

    #[test]
    fn normalised_text() {
        let grammar = Grammar::STANDARD;

        assert_eq!(classify("0x1A", &grammar).text, "26");
        assert_eq!(classify("3.50", &grammar).text, "3.5");
        assert_eq!(classify("2.f", &grammar).text, "2.0f");
        assert_eq!(classify("99999999999999999999", &grammar).text, "inf");
        assert_eq!(classify("''", &grammar).text, "'\\0'");
    }

    #[test]
    fn groups_and_words() {
        assert_eq!(kind("\"a[b]\""), Kind::String);
        assert_eq!(kind("'x'"), Kind::Char);
        assert_eq!(kind("[1, [2, 3]]"), Kind::Array);
        assert_eq!(kind("(1 + 2)"), Kind::Parenthesis);
        assert_eq!(kind("(1)(2)"), Kind::Undefined);
        assert_eq!(kind(">>="), Kind::Symbol);
        assert_eq!(kind("while"), Kind::Bare);
        assert_eq!(kind("f(1)"), Kind::Undefined);
        assert_eq!(kind("\""), Kind::Symbol);
    }
}
