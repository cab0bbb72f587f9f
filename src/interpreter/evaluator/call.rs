use crate::{
    error::ScriptResult,
    interpreter::{
        engine::core::{Interpreter, SourceLine},
        evaluator::core::is_unresolved,
        function::core::arguments,
        store::Store,
        value::core::Value,
    },
};

impl Interpreter {
    /// Resolves the call `token`, written as `name(args)`.
    ///
    /// Script-defined functions shadow native ones. An unknown function, or
    /// an argument that does not resolve, leaves an `Undefined` value behind
    /// for the statement to report.
    pub(crate) fn call(&mut self, name: &str, args: &str, token: &Value) -> Value {
        let tokens = self.lexer().tokenize(args);
        let values = self.evaluate(tokens, true);
        if let Some(unresolved) = values.iter().find(|value| is_unresolved(value)) {
            return unresolved.clone();
        }
        let args = arguments(values);

        let defined = self.functions.borrow().defined(name);
        if let Some(lines) = defined {
            return match self.call_defined(name, &lines, args) {
                Ok(value) => value,
                Err(error) => {
                    self.fault.get_or_insert(error);
                    Value::empty()
                },
            };
        }

        let native = self.functions.borrow().native(name);
        match native {
            Some(function) => function(&args),
            None => token.clone(),
        }
    }

    /// Runs a script-defined function in a fresh interpreter.
    ///
    /// The callee sees the default variables and `argv`, an array of the
    /// arguments; nothing of the caller's scope. Its result is the value of
    /// the `return` it ran, or the empty value. The result comes back
    /// unnamed, so the caller never reads it through one of its own names.
    pub(crate) fn call_defined(&mut self,
                               name: &str,
                               lines: &[SourceLine],
                               args: Vec<Value>)
                               -> ScriptResult<Value> {
        tracing::debug!(function = name, args = args.len(), "calling script function");

        let mut store = Store::with_defaults();
        store.insert(Value::array(&args).renamed("argv"));

        let mut callee = self.spawn(store);
        let result = callee.run_lines(lines);
        self.output.append(&mut callee.output);
        result?;

        Ok(callee.returned.take().map(|value| value.renamed("")).unwrap_or_default())
    }
}
