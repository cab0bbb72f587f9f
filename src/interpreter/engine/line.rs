use std::{fs, mem};

use crate::{
    error::{CllError, RuntimeError, ScriptResult, SyntaxError},
    interpreter::{
        engine::core::{Action, Flow, Interpreter, SourceLine},
        value::core::{Kind, Value},
    },
    util::text::split_call,
};

/// A piece of a line between `;`, `{` and `}`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Open,
    Close,
    Statement(Vec<Value>),
}

/// Splits a line's tokens at its `;`, `{` and `}` symbols. Empty statements
/// are dropped.
pub(crate) fn segments(tokens: Vec<Value>) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut statement = Vec::new();

    for token in tokens {
        let boundary = token.kind() == Kind::Symbol && matches!(token.text(), ";" | "{" | "}");
        if !boundary {
            statement.push(token);
            continue;
        }

        if !statement.is_empty() {
            segments.push(Segment::Statement(mem::take(&mut statement)));
        }
        match token.text() {
            "{" => segments.push(Segment::Open),
            "}" => segments.push(Segment::Close),
            _ => {},
        }
    }

    if !statement.is_empty() {
        segments.push(Segment::Statement(statement));
    }
    segments
}

/// Joins tokens back into a line of source.
pub(crate) fn join(tokens: &[Value]) -> String {
    tokens.iter().map(Value::text).collect::<Vec<_>>().join(" ")
}

/// Reads a script file into numbered lines.
pub(crate) fn load(path: &str) -> ScriptResult<Vec<SourceLine>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.lines()
                                 .enumerate()
                                 .map(|(i, text)| SourceLine::new(i + 1, text))
                                 .collect()),
        Err(error) => {
            tracing::debug!(path, %error, "cannot read script");
            Err(RuntimeError::FileNotOpened { path: path.to_owned() }.into())
        },
    }
}

impl Interpreter {
    /// Executes one line of source.
    ///
    /// A line may hold several statements separated by `;`, and may open or
    /// close scopes. Lines inside an open scope are buffered until the scope
    /// closes, so an `if` or `while` spans as many calls as it has lines.
    ///
    /// Returns `false` if the line failed, with the error available from
    /// [`Interpreter::error`], or if it ran a `return`.
    ///
    /// # Example
    /// ```
    /// use cll::Interpreter;
    ///
    /// let mut cll = Interpreter::new();
    ///
    /// assert!(cll.read_line("n = 0"));
    /// assert!(cll.read_line("while (n < 5) {"));
    /// assert_eq!(cll.scope_depth(), 1);
    /// assert!(cll.read_line("    n += 1"));
    /// assert!(cll.read_line("}"));
    ///
    /// assert_eq!(cll.get_var("n").unwrap().as_int(), 5);
    /// ```
    pub fn read_line(&mut self, line: &str) -> bool {
        self.flow = Flow::Normal;
        match self.execute(line) {
            Ok(()) => self.settle(),
            Err(error) => {
                self.report(error);
                false
            },
        }
    }

    /// Executes a script file.
    ///
    /// On failure the interpreter keeps the file name and the failing line
    /// number. Returns `true` when the script ran to its end or to a
    /// top-level `return`.
    pub fn read_file(&mut self, path: &str) -> bool {
        self.flow = Flow::Normal;
        let lines = match load(path) {
            Ok(lines) => lines,
            Err(error) => {
                self.report(error);
                return false;
            },
        };

        tracing::debug!(path, lines = lines.len(), "running script file");
        self.filename = Some(path.to_owned());
        self.line = 0;

        match self.run_source(&lines) {
            Ok(()) => {
                self.settle();
                self.filename = None;
                self.line = 0;
                true
            },
            Err(error) => {
                self.report(error);
                false
            },
        }
    }

    /// Executes lines of source as one script, numbered from 1.
    ///
    /// Fails if a scope is still open after the last line.
    ///
    /// # Example
    /// ```
    /// use cll::Interpreter;
    ///
    /// let mut cll = Interpreter::new();
    /// assert!(cll.read_vector(&["x = 1", "if (x) {", "x = 2", "}"]));
    /// assert_eq!(cll.get_var("x").unwrap().as_int(), 2);
    ///
    /// assert!(!cll.read_vector(&["while (1) {"]));
    /// assert_eq!(cll.error_message(), "Expected '}' before the end of input!");
    /// ```
    pub fn read_vector<S: AsRef<str>>(&mut self, lines: &[S]) -> bool {
        self.flow = Flow::Normal;
        let lines: Vec<SourceLine> = lines.iter()
                                          .enumerate()
                                          .map(|(i, text)| SourceLine::new(i + 1, text.as_ref()))
                                          .collect();

        match self.run_source(&lines) {
            Ok(()) => {
                self.settle();
                true
            },
            Err(error) => {
                self.report(error);
                false
            },
        }
    }

    /// Resets the flow after a host-level run. Returns `false` if a `return`
    /// ended it; a `break` or `continue` outside of any loop just stops the
    /// line.
    fn settle(&mut self) -> bool {
        mem::take(&mut self.flow) != Flow::Return
    }

    /// Records an error, printing it first when logging is on, and drops any
    /// half-read scope.
    pub(crate) fn report(&mut self, error: CllError) {
        if self.flags.logging {
            let location = self.filename
                               .as_ref()
                               .map(|file| format!("Error in file '{file}' on line {}:\n", self.line))
                               .unwrap_or_default();
            self.console
                .borrow_mut()
                .write(&format!("\nERROR: {location}{error}\n"));
        }
        tracing::debug!(line = self.line, file = ?self.filename, %error, "script error");

        self.error = Some(error);
        self.scope = 0;
        self.buffer.clear();
        self.action = None;
        self.previous = None;
        self.pending_do = None;
        self.flow = Flow::Normal;
    }

    /// Runs lines as a complete script: afterwards no scope may be open and
    /// no `do` may wait for its `while`.
    pub(crate) fn run_source(&mut self, lines: &[SourceLine]) -> ScriptResult<()> {
        self.run_lines(lines)?;

        if self.flow == Flow::Normal && (self.scope > 0 || self.action.is_some()) {
            self.scope = 0;
            self.buffer.clear();
            self.action = None;
            return Err(RuntimeError::UnclosedScope.into());
        }
        Ok(())
    }

    /// Runs lines until they end or a `break`, `continue` or `return` stops
    /// them.
    pub(crate) fn run_lines(&mut self, lines: &[SourceLine]) -> ScriptResult<Flow> {
        for line in lines {
            self.line = line.number;
            self.execute(&line.text)?;
            if self.flow != Flow::Normal {
                return Ok(self.flow);
            }
        }

        if self.pending_do.take().is_some() {
            return Err(SyntaxError::DoWithoutWhile.into());
        }
        Ok(self.flow)
    }

    pub(crate) fn execute(&mut self, line: &str) -> ScriptResult<()> {
        tracing::trace!(line = self.line, text = line, "execute");

        let tokens = self.unglue_keywords(self.lexer().tokenize(line));
        for segment in segments(tokens) {
            if self.flow != Flow::Normal {
                break;
            }
            self.segment(segment)?;
        }
        Ok(())
    }

    /// Splits `while(x)` and the like, which the lexer reads as one call, into
    /// the keyword and its group.
    fn unglue_keywords(&self, tokens: Vec<Value>) -> Vec<Value> {
        let mut unglued = Vec::with_capacity(tokens.len());

        for token in tokens {
            let glued = split_call(token.text()).filter(|(name, _)| {
                                                    token.kind() == Kind::Undefined
                                                    && self.grammar.is_keyword(name)
                                                })
                                                .map(|(name, args)| {
                                                    [Value::with_grammar(name, &self.grammar),
                                                     Value::with_grammar(&format!("({args})"), &self.grammar)]
                                                });
            match glued {
                Some(pair) => unglued.extend(pair),
                None => unglued.push(token),
            }
        }

        unglued
    }

    fn segment(&mut self, segment: Segment) -> ScriptResult<()> {
        match segment {
            Segment::Open if self.scope > 0 => {
                self.scope += 1;
                self.buffer.push(SourceLine::new(self.line, "{"));
            },
            Segment::Open => {
                self.action.get_or_insert(Action::Block);
                self.scope = 1;
            },
            Segment::Close => match self.scope {
                0 => return Err(SyntaxError::NothingToClose.into()),
                1 => {
                    self.scope = 0;
                    let lines = mem::take(&mut self.buffer);
                    let action = self.action.take().unwrap_or(Action::Block);
                    return self.close_scope(action, lines);
                },
                _ => {
                    self.scope -= 1;
                    self.buffer.push(SourceLine::new(self.line, "}"));
                },
            },
            Segment::Statement(tokens) if self.scope > 0 => {
                self.buffer.push(SourceLine::new(self.line, join(&tokens)));
            },
            Segment::Statement(tokens) => {
                if let Some(action) = &self.action {
                    return Err(SyntaxError::ExpectedScope { statement: action.keyword().to_owned() }.into());
                }
                return self.statement(tokens);
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    #[test]
    fn lines_split_at_braces_and_semicolons() {
        let parts = segments(tokenize("if (x) { y = 1; z = 2 } ;"));

        assert_eq!(parts.len(), 5);
        assert!(matches!(&parts[0], Segment::Statement(t) if join(t) == "if (x)"));
        assert_eq!(parts[1], Segment::Open);
        assert!(matches!(&parts[2], Segment::Statement(t) if join(t) == "y = 1"));
        assert!(matches!(&parts[3], Segment::Statement(t) if join(t) == "z = 2"));
        assert_eq!(parts[4], Segment::Close);
    }

    #[test]
    fn braces_inside_strings_do_not_split() {
        let parts = segments(tokenize("s = \"{;}\""));
        assert_eq!(parts.len(), 1);
    }
}
