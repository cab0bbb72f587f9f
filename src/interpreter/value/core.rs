use std::fmt;

use crate::{
    interpreter::{
        grammar::Grammar,
        value::classify::{Classified, classify},
    },
    util::{
        num::{f64_to_f32, f64_to_i64, i64_to_f64, usize_to_i64},
        text::{escape, interior, split_subscript, unescape},
    },
};

/// Name stored on a value whose requested name was rejected.
pub const INVALID_NAME: &str = "INVALID_NAME";
/// Text stored on a value whose literal could not be read.
pub const INVALID_VALUE: &str = "INVALID_VALUE";

/// The kind of a value, always derived from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A name, call or subscript that has not been resolved, or nothing.
    Undefined,
    Int,
    /// A single precision number, written with a trailing `f`.
    Float,
    Double,
    Char,
    String,
    /// A bracketed, comma separated list kept as text.
    Array,
    /// A parenthesised group awaiting evaluation.
    Parenthesis,
    /// A punctuation character or a multi-character operator.
    Symbol,
    /// A keyword.
    Bare,
}

impl Kind {
    /// The upper-case name scripts see through `typeof`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Char => "CHAR",
            Self::String => "STRING",
            Self::Array => "ARRAY",
            Self::Parenthesis => "PARENTHESIS",
            Self::Symbol => "SYMBOL",
            Self::Bare => "BARE",
        }
    }

    /// Returns `true` for kinds that take part in numeric promotion.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Double | Self::Char)
    }

    /// Returns `true` for kinds an operator can consume.
    #[must_use]
    pub const fn is_operand(self) -> bool {
        !matches!(self, Self::Undefined | Self::Symbol | Self::Bare)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary form of a numeric or char value, filled at classification time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cache {
    Empty,
    Int(i64),
    Float(f32),
    Double(f64),
    Char(char),
}

/// An error condition carried by a value instead of being raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFault {
    /// The value was given a name that cannot hold a variable.
    InvalidName,
    /// The value's literal could not be read.
    InvalidValue,
}

/// The universal runtime datum.
///
/// A `Value` is a token produced by the lexer, the content of a variable and
/// the result of every operator. It keeps the canonical text it was built
/// from, the kind inferred from that text and a cache of its numeric form.
/// Arrays and strings stay flat text: there is no nested structure to share,
/// so copies never alias.
///
/// # Example
/// ```
/// use cll::interpreter::value::core::{Kind, Value};
///
/// let sum = &Value::new("3") + &Value::new("4.5f");
///
/// assert_eq!(sum.kind(), Kind::Float);
/// assert_eq!(sum.text(), "7.5f");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub(crate) name:  String,
    pub(crate) text:  String,
    pub(crate) kind:  Kind,
    pub(crate) cache: Cache,
}

impl Value {
    /// Builds an anonymous value from literal text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::with_grammar(text, &Grammar::STANDARD)
    }

    /// Builds an anonymous value, classifying keywords and symbols with
    /// `grammar`.
    #[must_use]
    pub fn with_grammar(text: &str, grammar: &Grammar) -> Self {
        Self::from(classify(text, grammar))
    }

    /// Builds a named value from literal text.
    ///
    /// A name that cannot hold a variable is replaced by `INVALID_NAME`;
    /// see [`Value::fault`].
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::{Value, ValueFault};
    ///
    /// assert_eq!(Value::named("x", "1").fault(), None);
    /// assert_eq!(Value::named("if", "1").fault(), Some(ValueFault::InvalidName));
    /// assert_eq!(Value::named("3d", "1").fault(), Some(ValueFault::InvalidName));
    /// ```
    #[must_use]
    pub fn named(name: &str, text: &str) -> Self {
        Self::new(text).renamed(name)
    }

    /// Returns this value under a new name, validated like [`Value::named`].
    #[must_use]
    pub fn renamed(mut self, name: &str) -> Self {
        self.name = if name.is_empty() || is_valid_target(name, &Grammar::STANDARD) {
            name.to_owned()
        } else {
            INVALID_NAME.to_owned()
        };
        self
    }

    /// The empty value: `Undefined` with no text. Functions return it for
    /// "no result".
    #[must_use]
    pub const fn empty() -> Self {
        Self { name:  String::new(),
               text:  String::new(),
               kind:  Kind::Undefined,
               cache: Cache::Empty, }
    }

    /// An `Undefined` value standing for a name or expression that could not
    /// be resolved. Its text is kept for diagnostics.
    #[must_use]
    pub fn unresolved(text: &str) -> Self {
        Self { text: text.to_owned(),
               ..Self::empty() }
    }

    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::from(Classified::int(value))
    }

    /// A float result. Non-finite floats are stored as doubles.
    #[must_use]
    pub fn float(value: f32) -> Self {
        Self::from(Classified::float(value))
    }

    #[must_use]
    pub fn double(value: f64) -> Self {
        Self::from(Classified::double(value))
    }

    /// The language has no boolean kind: truth is the int `1`, falsehood `0`.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::int(i64::from(value))
    }

    /// A string literal holding `content`, escaped as needed.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::Value;
    ///
    /// let s = Value::string("say \"hi\"");
    ///
    /// assert_eq!(s.text(), r#""say \"hi\"""#);
    /// assert_eq!(s.as_string(), "say \"hi\"");
    /// ```
    #[must_use]
    pub fn string(content: &str) -> Self {
        Self::new(&format!("\"{}\"", escape(content, '"')))
    }

    #[must_use]
    pub fn character(c: char) -> Self {
        let mut buffer = [0; 4];
        Self::new(&format!("'{}'", escape(c.encode_utf8(&mut buffer), '\'')))
    }

    /// An array literal holding `items` in order.
    #[must_use]
    pub fn array(items: &[Self]) -> Self {
        let texts: Vec<&str> = items.iter().map(Self::text).collect();
        Self::new(&format!("[{}]", texts.join(",")))
    }

    /// Replaces the content, keeping the name, and reclassifies.
    pub fn set_value(&mut self, text: &str) {
        let Classified { text, kind, cache } = classify(text, &Grammar::STANDARD);
        self.text = text;
        self.kind = kind;
        self.cache = cache;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical textual form.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Reports an error condition carried by this value, if any.
    #[must_use]
    pub fn fault(&self) -> Option<ValueFault> {
        if self.name == INVALID_NAME {
            Some(ValueFault::InvalidName)
        } else if self.text == INVALID_VALUE {
            Some(ValueFault::InvalidValue)
        } else {
            None
        }
    }

    /// Reads the value as an integer.
    ///
    /// Strings and arrays read as their length, chars as their code point and
    /// floating-point values truncate toward zero.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::new("7.9").as_int(), 7);
    /// assert_eq!(Value::new("'A'").as_int(), 65);
    /// assert_eq!(Value::new("\"abc\"").as_int(), 3);
    /// assert_eq!(Value::new("[1,2]").as_int(), 2);
    /// ```
    #[must_use]
    pub fn as_int(&self) -> i64 {
        match (self.kind, self.cache) {
            (_, Cache::Int(n)) => n,
            (_, Cache::Char(c)) => i64::from(u32::from(c)),
            (_, Cache::Float(x)) => f64_to_i64(f64::from(x)),
            (_, Cache::Double(x)) => f64_to_i64(x),
            (Kind::String | Kind::Array, _) => usize_to_i64(self.size()),
            _ => self.text.parse().unwrap_or(0),
        }
    }

    /// Reads the value as a double, following the rules of [`Value::as_int`].
    #[must_use]
    pub fn as_double(&self) -> f64 {
        match self.cache {
            Cache::Float(x) => f64::from(x),
            Cache::Double(x) => x,
            _ => i64_to_f64(self.as_int()),
        }
    }

    /// Reads the value as a float, following the rules of [`Value::as_int`].
    #[must_use]
    pub fn as_float(&self) -> f32 {
        match self.cache {
            Cache::Float(x) => x,
            _ => f64_to_f32(self.as_double()),
        }
    }

    /// Reads the value as a char.
    ///
    /// Numbers are read as a code point, strings give their first char and
    /// anything unreadable gives `'\0'`.
    #[must_use]
    pub fn as_char(&self) -> char {
        match (self.kind, self.cache) {
            (_, Cache::Char(c)) => c,
            (Kind::String, _) => self.as_string().chars().next().unwrap_or('\0'),
            (Kind::Int | Kind::Float | Kind::Double, _) => {
                u32::try_from(self.as_int()).ok().and_then(char::from_u32).unwrap_or('\0')
            },
            _ => '\0',
        }
    }

    /// Reads the value as a truth value.
    ///
    /// Floating-point values are true when non-zero. Everything else is true
    /// when it reads as a non-zero integer, so empty text, `0` and empty
    /// strings are false.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        if self.text.is_empty() || self.text == "0" {
            return false;
        }
        match self.kind {
            Kind::Float | Kind::Double => self.as_double() != 0.0,
            _ => self.as_int() != 0,
        }
    }

    /// Reads the value as text: the decoded content of strings and chars, the
    /// canonical text of everything else.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self.kind {
            Kind::String | Kind::Char => unescape(interior(&self.text)),
            _ => self.text.clone(),
        }
    }
}

impl From<Classified> for Value {
    fn from(c: Classified) -> Self {
        Self { name:  String::new(),
               text:  c.text,
               kind:  c.kind,
               cache: c.cache, }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Checks whether `name` can be written to: a legal name, or a legal name
/// followed by one or more subscripts.
#[must_use]
pub fn is_valid_target(name: &str, grammar: &Grammar) -> bool {
    match split_subscript(name) {
        Some((base, _)) => is_valid_target(base, grammar),
        None => grammar.is_valid_name(name),
    }
}
