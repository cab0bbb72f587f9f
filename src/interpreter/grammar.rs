/// Describes the lexical vocabulary of the language.
///
/// A `Grammar` is plain static data. The tokenizer reads it to decide where a
/// token ends and which operators exist, and value classification reads it to
/// recognise keywords and symbols and to validate names.
///
/// # Example
/// ```
/// use cll::interpreter::grammar::Grammar;
///
/// let grammar = Grammar::STANDARD;
///
/// assert!(grammar.is_keyword("while"));
/// assert!(grammar.is_operator(">>="));
/// assert_eq!(grammar.longest_operator("<<= 2"), Some("<<="));
/// assert!(!grammar.is_valid_name("2fast"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    /// Statement keywords. They classify as bare words.
    pub keywords:   &'static [&'static str],
    /// Reserved names that can never be used for variables.
    pub sentinels:  &'static [&'static str],
    /// Multi-character operators, longest first.
    pub operators:  &'static [&'static str],
    /// Characters that end the current token outside literals and groups.
    pub separators: &'static str,
    /// Characters that classify as symbols and are illegal in names.
    pub symbols:    &'static str,
}

impl Grammar {
    /// The grammar every interpreter uses unless told otherwise.
    pub const STANDARD: Self = Self { keywords:   &["break", "cin", "cll", "continue", "cout", "delete",
                                                    "do", "else", "endl", "for", "function", "if",
                                                    "include", "pause", "return", "while"],
                                      sentinels:  &["-inf", "-nan", "INVALID_NAME", "INVALID_VALUE",
                                                    "UNDEFINED", "inf", "nan"],
                                      operators:  &[">>=", "<<=", "!==", "===", ">=", "<=", "==",
                                                    "!=", "**", "&&", "||", "<<", ">>", "+=", "-=",
                                                    "/=", "*=", "%=", "|=", "&=", "^=", "//"],
                                      separators: " \t`~{}/,<>\\|&*!@#$%^+-=;:?",
                                      symbols:    "`~{}/,.<>\\|&*!@#$%^()[]+-=;:'\"?" };

    #[must_use]
    pub fn is_keyword(&self, text: &str) -> bool {
        self.keywords.contains(&text)
    }

    #[must_use]
    pub fn is_sentinel(&self, text: &str) -> bool {
        self.sentinels.contains(&text)
    }

    #[must_use]
    pub fn is_operator(&self, text: &str) -> bool {
        self.operators.contains(&text)
    }

    /// Returns `true` for a single symbol character or a known operator.
    #[must_use]
    pub fn is_symbol(&self, text: &str) -> bool {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.symbols.contains(c),
            _ => self.is_operator(text),
        }
    }

    #[must_use]
    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(c)
    }

    /// Returns the longest operator that `rest` starts with.
    #[must_use]
    pub fn longest_operator<'a>(&self, rest: &'a str) -> Option<&'a str> {
        self.operators
            .iter()
            .filter(|op| rest.starts_with(**op))
            .max_by_key(|op| op.len())
            .map(|op| &rest[..op.len()])
    }

    /// Checks whether `name` may be used for a variable or a function.
    ///
    /// A name is legal when it is not empty, does not start with a digit,
    /// holds no symbol or whitespace character and is neither a keyword nor
    /// a reserved sentinel.
    #[must_use]
    pub fn is_valid_name(&self, name: &str) -> bool {
        !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && !name.chars().any(|c| c.is_whitespace() || self.symbols.contains(c))
        && !self.is_keyword(name)
        && !self.is_sentinel(name)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::STANDARD
    }
}
