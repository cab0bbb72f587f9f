use crate::{
    error::ScriptResult,
    interpreter::{
        engine::core::{Action, Flow, ForHeader, Interpreter, PendingDo, SourceLine},
        value::core::Value,
    },
};

impl Interpreter {
    /// Runs the statement whose scope just closed over the buffered lines.
    pub(crate) fn close_scope(&mut self, action: Action, lines: Vec<SourceLine>) -> ScriptResult<()> {
        tracing::trace!(action = action.keyword(), lines = lines.len(), "scope closed");

        match action {
            Action::Block => {
                let flow = self.run_block(&lines)?;
                self.propagate(flow);
            },
            Action::If(condition) => {
                let taken = self.condition(&condition)?;
                if taken {
                    let flow = self.run_block(&lines)?;
                    self.propagate(flow);
                }
                self.previous = Some(taken);
            },
            Action::Else => {
                let flow = self.run_block(&lines)?;
                self.propagate(flow);
                self.previous = None;
            },
            Action::Skip(previous) => self.previous = previous,
            Action::While(condition) => self.run_while(&condition, &lines)?,
            Action::Do => {
                let flow = self.run_block(&lines)?;
                if flow == Flow::Return {
                    self.flow = Flow::Return;
                } else {
                    self.pending_do = Some(PendingDo { lines,
                                                       done: flow == Flow::Break });
                }
            },
            Action::For(header) => self.run_for(&header, &lines)?,
            Action::Function(name) => {
                tracing::debug!(function = %name, lines = lines.len(), "defining function");
                self.functions.borrow_mut().define(&name, lines);
            },
        }

        Ok(())
    }

    /// Runs lines in a child scope.
    ///
    /// The child starts with a copy of every variable. When it ends, the
    /// variables that existed here before are updated from the child; the
    /// ones it declared are dropped.
    pub(crate) fn run_block(&mut self, lines: &[SourceLine]) -> ScriptResult<Flow> {
        let mut child = self.spawn(self.store.clone());
        let result = child.run_lines(lines);
        self.output.append(&mut child.output);

        let flow = match result {
            Ok(flow) => flow,
            Err(error) => {
                self.line = child.line;
                return Err(error);
            },
        };

        for value in child.store.iter() {
            if self.store.contains(value.name()) {
                self.store.insert(value.clone());
            }
        }
        if flow == Flow::Return {
            self.returned = child.returned.take();
        }

        Ok(flow)
    }

    /// Hands a `break`, `continue` or `return` to whatever runs this
    /// interpreter's lines.
    const fn propagate(&mut self, flow: Flow) {
        if !matches!(flow, Flow::Normal) {
            self.flow = flow;
        }
    }

    /// Evaluates a condition's text as a truth value.
    fn condition(&mut self, text: &str) -> ScriptResult<bool> {
        let tokens = self.lexer().tokenize(text);
        let values = self.evaluate_checked(tokens, true)?.values;
        Ok(values.first().is_some_and(Value::as_bool))
    }

    fn run_expression(&mut self, text: &str) -> ScriptResult<()> {
        let tokens = self.lexer().tokenize(text);
        self.evaluate_checked(tokens, true)?;
        Ok(())
    }

    /// Runs the body while the condition holds.
    fn run_while(&mut self, condition: &str, lines: &[SourceLine]) -> ScriptResult<()> {
        while self.condition(condition)? {
            match self.run_block(lines)? {
                Flow::Break => break,
                Flow::Return => {
                    self.flow = Flow::Return;
                    break;
                },
                Flow::Normal | Flow::Continue => {},
            }
        }
        Ok(())
    }

    /// Completes `do { ... } while cond` once the condition arrives.
    pub(crate) fn finish_do(&mut self, pending: PendingDo, condition: &str) -> ScriptResult<()> {
        if pending.done {
            return Ok(());
        }
        self.run_while(condition, &pending.lines)
    }

    /// Runs a `for` loop. Variables declared by its header do not outlive
    /// it.
    fn run_for(&mut self, header: &ForHeader, lines: &[SourceLine]) -> ScriptResult<()> {
        let existing: Vec<String> = self.store.names().into_iter().map(str::to_owned).collect();

        let result = self.for_loop(header, lines);

        self.store
            .retain(|value| existing.binary_search_by(|name| name.as_str().cmp(value.name())).is_ok());
        result
    }

    fn for_loop(&mut self, header: &ForHeader, lines: &[SourceLine]) -> ScriptResult<()> {
        self.run_expression(&header.init)?;

        while self.condition(&header.condition)? {
            match self.run_block(lines)? {
                Flow::Break => break,
                Flow::Return => {
                    self.flow = Flow::Return;
                    break;
                },
                Flow::Normal | Flow::Continue => {},
            }
            self.run_expression(&header.increment)?;
        }

        Ok(())
    }
}
