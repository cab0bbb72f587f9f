use crate::{
    error::{RuntimeError, ScriptResult},
    interpreter::{
        engine::core::Interpreter,
        evaluator::reduce::is_assignment,
        value::core::{Kind, Value},
    },
    util::text::{interior, split_call},
};

/// The values left after evaluating a token sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub values:   Vec<Value>,
    /// At least one assignment ran.
    pub assigned: bool,
}

pub(crate) fn is_comma(value: &Value) -> bool {
    value.kind() == Kind::Symbol && value.text() == ","
}

/// A name or expression that evaluation left behind. The empty value is a
/// legitimate "no result" and does not count.
pub(crate) fn is_unresolved(value: &Value) -> bool {
    value.kind() == Kind::Undefined && !value.is_empty()
}

/// Picks the unresolved value to report. A skipped assignment leaves its
/// target undeclared, so targets come last: `y = a[9]` names `a[9]`.
fn first_unresolved(values: &[Value]) -> Option<&Value> {
    let target = |i: usize| values.get(i + 1).is_some_and(is_assignment);

    values.iter()
          .enumerate()
          .find(|&(i, value)| is_unresolved(value) && !target(i))
          .or_else(|| values.iter().enumerate().find(|(_, value)| is_unresolved(value)))
          .map(|(_, value)| value)
}

/// Checks that operands and commas alternate, starting with an operand.
fn is_tuple(values: &[Value]) -> bool {
    values.iter().enumerate().all(|(i, value)| {
                                 if i % 2 == 0 {
                                     value.kind().is_operand()
                                 } else {
                                     is_comma(value)
                                 }
                             })
}

/// Picks the token to report for a group that did not evaluate cleanly: the
/// first unresolved name inside it, or else the whole group.
fn unresolved_in(group: &Value, values: &[Value]) -> Value {
    values.iter()
          .find(|value| is_unresolved(value))
          .cloned()
          .unwrap_or_else(|| Value::unresolved(group.text()))
}

impl Interpreter {
    /// Evaluates a token sequence and returns the values left over.
    ///
    /// Groups, calls and names are resolved first, then the operators are
    /// reduced. With `allow_comma` a comma separated list stays a list of
    /// values with the commas between them.
    ///
    /// Names that cannot be resolved stay in the result as `Undefined`
    /// values; errors raised by called functions are kept for the statement
    /// that triggered them.
    ///
    /// # Example
    /// ```
    /// use cll::{Interpreter, interpreter::lexer::tokenize};
    ///
    /// let mut cll = Interpreter::new();
    /// let values = cll.evaluate(tokenize("(1 + 2) * 3, \"a\" + 'b'"), true);
    ///
    /// let texts: Vec<&str> = values.iter().map(|v| v.text()).collect();
    /// assert_eq!(texts, ["9", ",", "\"ab\""]);
    /// ```
    pub fn evaluate(&mut self, tokens: Vec<Value>, allow_comma: bool) -> Vec<Value> {
        self.evaluation(tokens, allow_comma).values
    }

    pub(crate) fn evaluation(&mut self, tokens: Vec<Value>, allow_comma: bool) -> Evaluation {
        let resolved = self.resolve(tokens);
        let mut evaluation = self.reduce(resolved, allow_comma);

        // Names declared by the assignments may now resolve.
        if evaluation.assigned && evaluation.values.len() > 1 {
            let values = std::mem::take(&mut evaluation.values);
            let resolved = self.resolve(values);
            evaluation.values = self.reduce(resolved, allow_comma).values;
        }

        evaluation
    }

    /// Evaluates a statement's tokens and turns anything left unresolved
    /// into an error.
    pub(crate) fn evaluate_checked(&mut self,
                                   tokens: Vec<Value>,
                                   allow_comma: bool)
                                   -> ScriptResult<Evaluation> {
        self.fault = None;
        let evaluation = self.evaluation(tokens, allow_comma);

        if let Some(error) = self.fault.take() {
            return Err(error);
        }
        if self.flags.debug {
            self.trace("DMATH", &evaluation.values);
        }

        match first_unresolved(&evaluation.values) {
            Some(value) => Err(RuntimeError::NameNotRecognized { name: value.text().to_owned() }.into()),
            None => Ok(evaluation),
        }
    }

    /// Writes a debug trace line such as `DEBUG: x UNDEFINED | = SYMBOL`.
    pub(crate) fn trace(&self, label: &str, tokens: &[Value]) {
        let parts: Vec<String> = tokens.iter()
                                       .map(|token| format!("{} {}", token.text(), token.kind()))
                                       .collect();
        self.console
            .borrow_mut()
            .write(&format!("{label}: {}\n", parts.join(" | ")));
    }

    /// Replaces every group, array literal, call and name with its value.
    fn resolve(&mut self, tokens: Vec<Value>) -> Vec<Value> {
        let mut resolved = Vec::with_capacity(tokens.len());

        for token in tokens {
            match token.kind() {
                Kind::Parenthesis => match self.evaluate_group(&token) {
                    Ok(values) => resolved.extend(values),
                    Err(unresolved) => resolved.push(unresolved),
                },
                Kind::Array => match self.evaluate_group(&token) {
                    Ok(values) => {
                        let items: String = values.iter().map(Value::text).collect();
                        resolved.push(Value::new(&format!("[{items}]")));
                    },
                    Err(unresolved) => resolved.push(unresolved),
                },
                Kind::Undefined if !token.is_empty() => {
                    let value = match split_call(token.text()) {
                        Some((name, args)) => self.call(name, args, &token),
                        None => self.get_var(token.text()).unwrap_or(token),
                    };
                    resolved.push(value);
                },
                _ => resolved.push(token),
            }
        }

        resolved
    }

    /// Evaluates the interior of a parenthesised group or an array literal.
    ///
    /// Fails with the token to report when the interior is not a clean comma
    /// separated list of values.
    pub(crate) fn evaluate_group(&mut self, group: &Value) -> Result<Vec<Value>, Value> {
        let tokens = self.lexer().tokenize(interior(group.text()));
        let values = self.evaluate(tokens, true);

        if is_tuple(&values) {
            Ok(values)
        } else {
            Err(unresolved_in(group, &values))
        }
    }
}
