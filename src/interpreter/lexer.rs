use crate::{
    interpreter::{grammar::Grammar, value::core::Value},
    util::text::Nesting,
};

/// Splits source lines into value tokens.
///
/// The lexer scans left to right. Inside string and char literals and inside
/// open parentheses or brackets every character is kept, so `"a b"`,
/// `[1, 2]` and `f(x, y)` each come out as one token. Outside of them a
/// separator character ends the current token:
/// - spaces and tabs produce no token of their own,
/// - any other separator becomes a symbol token, extended to the longest
///   matching multi-character operator,
/// - `//` ends the line; the rest is a comment.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'g> {
    grammar: &'g Grammar,
}

impl<'g> Lexer<'g> {
    #[must_use]
    pub const fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Tokenizes one line of source text.
    ///
    /// # Parameters
    /// - `line`: The raw line, without its line terminator.
    ///
    /// # Returns
    /// The tokens in source order, each classified by the lexer's grammar.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::{grammar::Grammar, lexer::Lexer, value::core::Kind};
    ///
    /// let grammar = Grammar::STANDARD;
    /// let tokens = Lexer::new(&grammar).tokenize("x += f(1, 2) // bump");
    ///
    /// let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    /// assert_eq!(texts, ["x", "+=", "f(1, 2)"]);
    /// assert_eq!(tokens[1].kind(), Kind::Symbol);
    /// ```
    #[must_use]
    pub fn tokenize(&self, line: &str) -> Vec<Value> {
        let mut tokens = Vec::new();
        let mut buffer = String::new();
        let mut nesting = Nesting::default();
        let mut rest = line;

        while let Some(c) = rest.chars().next() {
            if nesting.is_open() || !self.grammar.is_separator(c) {
                nesting.feed(c);
                buffer.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            }

            self.flush(&mut buffer, &mut tokens);

            if c == ' ' || c == '\t' {
                rest = &rest[1..];
                continue;
            }

            let symbol = self.grammar
                             .longest_operator(rest)
                             .unwrap_or(&rest[..c.len_utf8()]);
            if symbol == "//" {
                return tokens;
            }

            tokens.push(Value::with_grammar(symbol, self.grammar));
            rest = &rest[symbol.len()..];
        }

        self.flush(&mut buffer, &mut tokens);
        tokens
    }

    fn flush(&self, buffer: &mut String, tokens: &mut Vec<Value>) {
        if !buffer.is_empty() {
            tokens.push(Value::with_grammar(buffer, self.grammar));
            buffer.clear();
        }
    }
}

/// Tokenizes a line with the standard grammar.
///
/// # Example
/// ```
/// use cll::interpreter::lexer::tokenize;
///
/// let tokens = tokenize("\"a[b]\"");
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].text(), "\"a[b]\"");
/// ```
#[must_use]
pub fn tokenize(line: &str) -> Vec<Value> {
    Lexer::new(&Grammar::STANDARD).tokenize(line)
}
