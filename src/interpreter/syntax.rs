use crate::{
    error::{RuntimeError, ScriptResult, SyntaxError},
    interpreter::{
        engine::{core::Interpreter, line::join},
        evaluator::core::is_comma,
        value::core::{Kind, Value},
    },
    util::text::{interior, split_call, split_subscript},
};

fn is_symbol(value: Option<&Value>, text: &str) -> bool {
    value.is_some_and(|value| value.kind() == Kind::Symbol && value.text() == text)
}

/// Strips every subscript: `m[1][2]` gives `m`.
fn root_base(name: &str) -> &str {
    let mut base = name;
    while let Some((inner, _)) = split_subscript(base) {
        base = inner;
    }
    base
}

impl Interpreter {
    /// Validates a statement's raw tokens before anything is evaluated.
    ///
    /// Names followed by `=` count as declared for the rest of the
    /// statement, so `x = 1, y = x` passes for a fresh `x`.
    pub(crate) fn check_syntax(&self, tokens: &[Value]) -> ScriptResult<()> {
        let Some(first) = tokens.first() else {
            return Ok(());
        };
        let mut declared = Vec::new();

        if first.kind() == Kind::Bare && !self.check_statement(tokens)? {
            return Ok(());
        }
        self.check_sequence(tokens, &mut declared, None)
    }

    /// Checks the shape of a keyword statement. Returns `false` when its
    /// operands are not expressions and need no further checking.
    fn check_statement(&self, tokens: &[Value]) -> ScriptResult<bool> {
        let keyword = tokens[0].text();
        let rest = &tokens[1..];

        if keyword == "else" {
            if let Some(next) = rest.first().filter(|next| next.text() != "if") {
                return Err(SyntaxError::UnexpectedAfterElse { name: next.text().to_owned() }.into());
            }
            if rest.len() == 1 {
                return Err(SyntaxError::TooFewArguments { command: "else if".to_owned() }.into());
            }
        }

        for (i, token) in tokens.iter().enumerate().skip(1) {
            let allowed = (keyword == "cout" && token.text() == "endl") || (keyword == "else" && i == 1);
            if token.kind() == Kind::Bare && !allowed {
                return Err(SyntaxError::UnexpectedAfterStatement { found:     token.text().to_owned(),
                                                                   statement: keyword.to_owned(), }.into());
            }
        }

        match keyword {
            "cout" | "cin" | "cll" | "include" | "delete" | "if" | "while" | "for" if rest.is_empty() => {
                Err(SyntaxError::TooFewArguments { command: keyword.to_owned() }.into())
            },
            "break" | "continue" | "pause" | "do" if !rest.is_empty() => {
                Err(SyntaxError::UnexpectedArguments { command: keyword.to_owned() }.into())
            },
            "endl" => Err(SyntaxError::MisplacedKeyword { keyword: keyword.to_owned() }.into()),
            "function" => match rest {
                [name] if name.kind() == Kind::Undefined && self.is_valid_name(name.text()) => Ok(false),
                _ => Err(SyntaxError::IllegalFunctionName { name: join(rest) }.into()),
            },
            "cin" => {
                for target in rest.iter().filter(|token| !is_comma(token)) {
                    let name = root_base(target.text());
                    if target.kind() != Kind::Undefined || !self.is_valid_name(name) {
                        return Err(SyntaxError::IllegalName { name: target.text().to_owned() }.into());
                    }
                }
                Ok(false)
            },
            "delete" => {
                for target in rest.iter().filter(|token| !is_comma(token)) {
                    if target.kind() == Kind::Symbol {
                        return Err(SyntaxError::DeleteSymbol { symbol: target.text().to_owned() }.into());
                    }
                    if !self.store.contains(root_base(target.text())) {
                        return Err(SyntaxError::UndefinedDelete { name: target.text().to_owned() }.into());
                    }
                }
                Ok(false)
            },
            _ => Ok(true),
        }
    }

    /// Checks a statement, or the interior of a group when `group` names
    /// it.
    fn check_sequence(&self,
                      tokens: &[Value],
                      declared: &mut Vec<String>,
                      group: Option<&'static str>)
                      -> ScriptResult<()> {
        for (i, token) in tokens.iter().enumerate() {
            let next = tokens.get(i + 1);

            match token.kind() {
                Kind::Bare => {
                    if let Some(group) = group {
                        return Err(SyntaxError::NameInGroup { name: token.text().to_owned(),
                                                              group }.into());
                    }
                    if i > 0 && tokens[0].kind() != Kind::Bare {
                        return Err(SyntaxError::MisplacedKeyword { keyword: token.text().to_owned() }.into());
                    }
                },
                Kind::Symbol => Self::check_symbol(tokens, i)?,
                Kind::Array => self.check_group(token, "array", declared)?,
                Kind::Parenthesis => self.check_group(token, "parenthesis", declared)?,
                Kind::Undefined if !token.is_empty() => self.check_name(token, next, declared)?,
                _ if is_symbol(next, "=") => {
                    return Err(SyntaxError::AssignToValue { target: token.text().to_owned() }.into());
                },
                _ => {},
            }
        }

        Ok(())
    }

    /// Checks the symbol at `i` against its neighbours. Prefix operators are
    /// never checked.
    fn check_symbol(tokens: &[Value], i: usize) -> ScriptResult<()> {
        let symbol = tokens[i].text();
        if i == 0 || matches!(symbol, "-" | "!" | "~") {
            return Ok(());
        }

        if symbol == "?" {
            match tokens.get(i + 2) {
                None => return Err(SyntaxError::TernaryTooFewArguments.into()),
                Some(token) if token.kind() != Kind::Symbol => {
                    return Err(SyntaxError::TernaryMissingColon.into());
                },
                Some(_) => {},
            }
        }

        let previous = &tokens[i - 1];
        match previous.kind() {
            Kind::Bare => {
                return Err(SyntaxError::SymbolAfterCommand { symbol:  symbol.to_owned(),
                                                             command: previous.text().to_owned(), }.into());
            },
            Kind::Symbol => {
                return Err(SyntaxError::SymbolAfterSymbol { symbol:   symbol.to_owned(),
                                                            previous: previous.text().to_owned(), }.into());
            },
            _ => {},
        }

        if i + 1 == tokens.len() {
            return Err(SyntaxError::ExpectedAfterSymbol { symbol: symbol.to_owned() }.into());
        }
        Ok(())
    }

    fn check_group(&self, token: &Value, group: &'static str, declared: &mut Vec<String>) -> ScriptResult<()> {
        let inner = self.lexer().tokenize(interior(token.text()));
        self.check_sequence(&inner, declared, Some(group))
    }

    /// Checks a call, a subscript or a plain name.
    fn check_name(&self, token: &Value, next: Option<&Value>, declared: &mut Vec<String>) -> ScriptResult<()> {
        let text = token.text();

        if let Some((name, args)) = split_call(text) {
            if !self.functions.borrow().contains(name) {
                return Err(SyntaxError::UnknownFunction { name: name.to_owned() }.into());
            }
            let inner = self.lexer().tokenize(args);
            return self.check_sequence(&inner, declared, Some("parenthesis"));
        }

        if let Some((base, index)) = split_subscript(text) {
            let inner = self.lexer().tokenize(index);
            self.check_sequence(&inner, declared, Some("array"))?;

            let base_token = Value::with_grammar(base, &self.grammar);
            if base_token.kind() == Kind::Undefined {
                return self.check_name(&base_token, None, declared);
            }
            let inner = self.lexer().tokenize(base);
            return self.check_sequence(&inner, declared, Some("parenthesis"));
        }

        if !self.is_valid_name(text) {
            return Err(SyntaxError::IllegalName { name: text.to_owned() }.into());
        }
        if is_symbol(next, "=") {
            declared.push(text.to_owned());
            return Ok(());
        }
        if self.store.contains(text) || declared.iter().any(|name| name == text) {
            return Ok(());
        }

        Err(RuntimeError::NameNotRecognized { name: text.to_owned() }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CllError, interpreter::lexer::tokenize};

    fn check(line: &str) -> Result<(), String> {
        let mut cll = Interpreter::new();
        cll.read_line("x = 1; a = [1, 2]");
        cll.check_syntax(&tokenize(line)).map_err(|e| e.to_string())
    }

    #[test]
    fn accepts_well_formed_statements() {
        for line in ["y = x + 1",
                     "x = -x",
                     "x = !x ? 1 : 2",
                     "cout x, \"a\", endl",
                     "else if (x)",
                     "y = z = 3, y + z",
                     "a[0] = sqrt(x)",
                     "for (i = 0, i < 3, i += 1)",
                     "delete x, a",
                     "cin fresh"]
        {
            assert_eq!(check(line), Ok(()), "{line}");
        }
    }

    #[test]
    fn rejects_malformed_statements() {
        let cases = [("x +", "Expected something after '+' symbol!"),
                     ("x + * 2", "Unexpected symbol '*' after '+' symbol!"),
                     ("x ? 1", "Ternary operator got too few arguments!"),
                     ("x ? 1 2", "Expected symbol ':' after a ternary operator!"),
                     ("if while", "Unexpected 'while' after 'if' statement!"),
                     ("else x", "Unexpected name 'x' after 'else' statement!"),
                     ("else if", "Command 'else if' got too few arguments!"),
                     ("cout", "Command 'cout' got too few arguments!"),
                     ("break 1", "Command 'break' takes no arguments!"),
                     ("delete nope", "Undefined name 'nope' after 'delete' statement!"),
                     ("delete x +", "Unexpected symbol '+' after 'delete' statement!"),
                     ("(x, if)", "Unexpected name 'if' in parenthesis!"),
                     ("[if]", "Unexpected name 'if' in array!"),
                     ("3 = x", "Unexpected symbol '=' after '3'!"),
                     ("1abc = 2", "Name '1abc' is illegal!"),
                     ("y = nope", "Name 'nope' not recognized!"),
                     ("y = nope(1)", "Function 'nope' not recognized!"),
                     ("function sqrt", "Function name 'sqrt' is illegal!")];

        for (line, message) in cases {
            assert_eq!(check(line), Err(message.to_owned()), "{line}");
        }
    }

    #[test]
    fn unknown_names_are_runtime_errors() {
        let cll = Interpreter::new();
        let error = cll.check_syntax(&tokenize("nope + 1")).unwrap_err();
        assert!(matches!(error, CllError::Runtime(RuntimeError::NameNotRecognized { .. })));
    }
}
