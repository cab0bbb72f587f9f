use crate::{
    error::{RuntimeError, ScriptResult, SyntaxError},
    interpreter::{
        engine::{
            core::{Action, Flow, ForHeader, Interpreter},
            line::{join, load},
        },
        evaluator::core::is_comma,
        store::Store,
        value::core::{Kind, Value},
    },
    util::text::{interior, split_top_level},
};

impl Interpreter {
    /// Checks and runs one statement.
    pub(crate) fn statement(&mut self, tokens: Vec<Value>) -> ScriptResult<()> {
        if self.flags.debug {
            self.trace("DEBUG", &tokens);
        }
        self.check_syntax(&tokens)?;

        let keyword = tokens.first()
                            .filter(|token| token.kind() == Kind::Bare)
                            .map(|token| token.text().to_owned());
        let keyword = keyword.as_deref();

        if let Some(pending) = self.pending_do.take() {
            return match keyword {
                Some("while") => self.finish_do(pending, &join(&tokens[1..])),
                _ => Err(SyntaxError::DoWithoutWhile.into()),
            };
        }
        if keyword != Some("else") {
            self.previous = None;
        }

        match keyword {
            None => self.expression(tokens),
            Some("if") => self.open(Action::If(join(&tokens[1..]))),
            Some("else") => self.open_else(&tokens[1..]),
            Some("while") => self.open(Action::While(join(&tokens[1..]))),
            Some("do") => self.open(Action::Do),
            Some("for") => {
                let header = for_header(&tokens[1..])?;
                self.open(Action::For(header))
            },
            Some("function") => self.open(Action::Function(tokens[1].text().to_owned())),
            Some("return") => self.return_value(&tokens[1..]),
            Some("break") => {
                self.flow = Flow::Break;
                Ok(())
            },
            Some("continue") => {
                self.flow = Flow::Continue;
                Ok(())
            },
            Some("delete") => {
                for target in tokens[1..].iter().filter(|token| !is_comma(token)) {
                    self.delete_var(target.text());
                }
                Ok(())
            },
            Some("cll") => {
                let args = self.operands(&tokens[1..])?;
                self.run_script(args)
            },
            Some("include") => {
                for path in self.operands(&tokens[1..])? {
                    self.include(&path.as_string())?;
                }
                Ok(())
            },
            Some("cout") => self.cout(&tokens[1..]),
            Some("cin") => {
                self.cin(&tokens[1..]);
                Ok(())
            },
            Some("pause") => {
                if self.flags.io {
                    self.console.borrow_mut().read_line();
                }
                Ok(())
            },
            Some(other) => Err(SyntaxError::MisplacedKeyword { keyword: other.to_owned() }.into()),
        }
    }

    #[allow(clippy::unnecessary_wraps)]
    fn open(&mut self, action: Action) -> ScriptResult<()> {
        self.action = Some(action);
        Ok(())
    }

    /// `else` and `else if` continue the chain of the `if` right before them.
    fn open_else(&mut self, rest: &[Value]) -> ScriptResult<()> {
        let Some(taken) = self.previous else {
            return Err(SyntaxError::ElseWithoutIf.into());
        };

        let action = match rest {
            [] if taken => Action::Skip(None),
            [] => Action::Else,
            _ if taken => Action::Skip(Some(true)),
            [_, condition @ ..] => Action::If(join(condition)),
        };
        self.open(action)
    }

    /// A statement without a keyword. With output capture on, the values it
    /// leaves are recorded unless it assigned something.
    fn expression(&mut self, tokens: Vec<Value>) -> ScriptResult<()> {
        let evaluation = self.evaluate_checked(tokens, true)?;

        if self.flags.output && !evaluation.assigned {
            self.output
                .extend(evaluation.values.into_iter().filter(|value| !is_comma(value)));
        }
        Ok(())
    }

    /// Evaluates a keyword's operands, dropping the commas between them.
    fn operands(&mut self, tokens: &[Value]) -> ScriptResult<Vec<Value>> {
        let evaluation = self.evaluate_checked(tokens.to_vec(), true)?;
        Ok(evaluation.values
                     .into_iter()
                     .filter(|value| !is_comma(value))
                     .collect())
    }

    fn return_value(&mut self, tokens: &[Value]) -> ScriptResult<()> {
        let value = if tokens.is_empty() {
            Value::empty()
        } else {
            self.operands(tokens)?.into_iter().next().unwrap_or_default()
        };

        self.returned = Some(value);
        self.flow = Flow::Return;
        Ok(())
    }

    /// Prints its operands without separators. `endl` prints a newline.
    fn cout(&mut self, tokens: &[Value]) -> ScriptResult<()> {
        let values = self.evaluate_checked(tokens.to_vec(), true)?.values;
        if !self.flags.io {
            return Ok(());
        }

        let mut text = String::new();
        for value in &values {
            match value.kind() {
                Kind::Symbol if value.text() == "," => {},
                Kind::Bare if value.text() == "endl" => text.push('\n'),
                Kind::Char => text.push(value.as_char()),
                _ => text.push_str(&value.as_string()),
            }
        }
        self.console.borrow_mut().write(&text);
        Ok(())
    }

    /// Reads one console line per target. Input that is not a literal value
    /// is stored as a string.
    fn cin(&mut self, targets: &[Value]) {
        if !self.flags.io {
            return;
        }

        for target in targets.iter().filter(|token| !is_comma(token)) {
            let line = self.console.borrow_mut().read_line().unwrap_or_default();

            let mut value = Value::with_grammar(line.trim(), &self.grammar);
            if !value.kind().is_operand() || value.kind() == Kind::Parenthesis {
                value = Value::string(&line);
            }
            self.set_var(target.text(), value);
        }
    }

    /// Runs another script in a fresh interpreter.
    ///
    /// The script sees the default variables, the native functions and
    /// `argv`, which holds every operand of the statement, the path first.
    fn run_script(&mut self, args: Vec<Value>) -> ScriptResult<()> {
        let path = args.first().map(Value::as_string).unwrap_or_default();
        let lines = load(&path)?;
        tracing::debug!(path = %path, args = args.len(), "running nested script");

        let mut store = Store::with_defaults();
        store.insert(Value::array(&args).renamed("argv"));

        let mut script = self.spawn(store);
        script.functions = self.functions.borrow().natives_only().shared();
        script.filename = Some(path.clone());
        script.line = 0;

        let result = script.run_source(&lines);
        self.output.append(&mut script.output);

        result.map_err(|inner| {
                  RuntimeError::InFile { file: path,
                                         line: script.line,
                                         inner: Box::new(inner) }.into()
              })
    }

    /// Runs a script file's lines here, as if they were written in place of
    /// the `include`.
    fn include(&mut self, path: &str) -> ScriptResult<()> {
        let lines = load(path)?;
        tracing::debug!(path, lines = lines.len(), "including script");

        let file = self.filename.replace(path.to_owned());
        let line = self.line;

        let result = self.run_source(&lines);
        let failed_line = self.line;

        self.filename = file;
        self.line = line;

        result.map_err(|inner| {
                  RuntimeError::InFile { file: path.to_owned(),
                                         line: failed_line,
                                         inner: Box::new(inner) }.into()
              })
    }
}

/// Splits `for (init, condition, increment)` into its parts.
fn for_header(rest: &[Value]) -> ScriptResult<ForHeader> {
    let text = match rest {
        [group] if group.kind() == Kind::Parenthesis => interior(group.text()).to_owned(),
        _ => join(rest),
    };

    match split_top_level(&text).as_slice() {
        [init, condition, increment] => Ok(ForHeader { init:      (*init).to_owned(),
                                                       condition: (*condition).to_owned(),
                                                       increment: (*increment).to_owned(), }),
        _ => Err(SyntaxError::ForHeader.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    #[test]
    fn for_headers_split_into_three_parts() {
        let tokens = tokenize("(i = 0, i < max(3, 4), i += 1)");
        let header = for_header(&tokens).unwrap();

        assert_eq!(header.init, "i = 0");
        assert_eq!(header.condition, "i < max(3, 4)");
        assert_eq!(header.increment, "i += 1");
    }

    #[test]
    fn for_headers_need_three_parts() {
        let tokens = tokenize("(i = 0, i < 3)");
        assert!(for_header(&tokens).is_err());
    }
}
