use crate::{
    interpreter::{
        engine::core::Interpreter,
        value::core::{Kind, Value},
    },
    util::{num::i64_to_index, text::split_subscript},
};

/// A container that lost its last element and should go as well.
fn is_exhausted(value: &Value) -> bool {
    match value.kind() {
        Kind::String | Kind::Array => false,
        Kind::Char => value.as_char() == '\0',
        _ => value.is_empty(),
    }
}

impl Interpreter {
    /// Evaluates a subscript's index expression.
    ///
    /// Returns the element index and the index text to use in the element's
    /// name, or `None` if the index is not a non-negative number.
    fn index_of(&mut self, index: &str) -> Option<(usize, String)> {
        let tokens = self.lexer().tokenize(index);
        let values = self.evaluate(tokens, false);

        let index = values.first().filter(|value| value.kind().is_numeric())?;
        let position = i64_to_index(index.as_int())?;
        Some((position, index.text().to_owned()))
    }

    /// Reads a variable.
    ///
    /// `name` may carry subscripts: `a[i + 1]` evaluates `i + 1` and returns
    /// that element of `a`, named `a[2]` (or whatever the index was) so it
    /// can be assigned back. The base of a subscript may also be a literal,
    /// as in `"abc"[1]`.
    ///
    /// Returns `None` for undeclared names and missing elements.
    ///
    /// # Example
    /// ```
    /// use cll::Interpreter;
    ///
    /// let mut cll = Interpreter::new();
    /// cll.read_line("m = [[1,2],[3,4]]; i = 1");
    ///
    /// let cell = cll.get_var("m[i][0]").unwrap();
    /// assert_eq!(cell.text(), "3");
    /// assert_eq!(cell.name(), "m[1][0]");
    ///
    /// assert!(cll.get_var("m[5]").is_none());
    /// assert!(cll.get_var("nope").is_none());
    /// ```
    pub fn get_var(&mut self, name: &str) -> Option<Value> {
        let Some((base, index)) = split_subscript(name) else {
            return self.store.get(name).cloned();
        };

        let (position, index) = self.index_of(index)?;

        let named = self.grammar.is_valid_name(base) || split_subscript(base).is_some();
        let container = if named {
            self.get_var(base)?
        } else {
            let tokens = self.lexer().tokenize(base);
            self.evaluate(tokens, false).into_iter().next()?
        };

        let mut element = container.element(position);
        if element.is_empty() {
            return None;
        }
        if named {
            element.name = format!("{}[{index}]", container.name());
        }
        Some(element)
    }

    /// Writes a variable, declaring it if it is a new plain name.
    ///
    /// A subscripted name replaces one element of an existing variable;
    /// writing the empty value removes it. Returns `false` if the name cannot
    /// hold a variable, the base of a subscript is undeclared, or the index
    /// is not a number.
    pub fn set_var(&mut self, name: &str, mut value: Value) -> bool {
        if let Some((base, index)) = split_subscript(name) {
            let Some((position, _)) = self.index_of(index) else {
                return false;
            };
            let Some(mut container) = self.get_var(base) else {
                return false;
            };

            container.set_element(position, &value);
            let base = container.name().to_owned();
            return self.set_var(&base, container);
        }

        if !self.is_valid_name(name) {
            tracing::debug!(name, "rejected variable name");
            return false;
        }

        value.name = name.to_owned();
        self.store.insert(value);
        true
    }

    /// Deletes a variable or one element of it.
    ///
    /// A variable whose last element is deleted goes as well, unless it is a
    /// string or an array, which are left empty. Returns `false` if there was
    /// nothing to delete.
    ///
    /// # Example
    /// ```
    /// use cll::Interpreter;
    ///
    /// let mut cll = Interpreter::new();
    /// cll.read_line("a = [1, 2, 3]; c = 'x'");
    ///
    /// assert!(cll.delete_var("a[0]"));
    /// assert_eq!(cll.get_var("a").unwrap().text(), "[2,3]");
    ///
    /// assert!(cll.delete_var("c[0]"));
    /// assert!(cll.get_var("c").is_none());
    /// ```
    pub fn delete_var(&mut self, name: &str) -> bool {
        let Some((base, index)) = split_subscript(name) else {
            return self.store.remove(name).is_some();
        };

        let Some((position, _)) = self.index_of(index) else {
            return false;
        };
        let Some(mut container) = self.get_var(base) else {
            return false;
        };
        if container.element(position).is_empty() {
            return false;
        }

        container.delete_element(position);
        let base = container.name().to_owned();
        if is_exhausted(&container) {
            self.delete_var(&base)
        } else {
            self.set_var(&base, container)
        }
    }
}
