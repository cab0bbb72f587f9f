use crate::interpreter::{
    engine::core::Interpreter,
    evaluator::core::{Evaluation, is_comma},
    value::core::{Kind, Value},
};

/// Binary operators from the tightest binding tier to the loosest. Every
/// tier associates to the left.
const BINARY_TIERS: &[&[&str]] = &[&["**"],
                                   &["*", "/", "%"],
                                   &["+", "-"],
                                   &["<<", ">>"],
                                   &["<=", ">=", "<", ">"],
                                   &["==", "!=", "===", "!=="],
                                   &["&"],
                                   &["^"],
                                   &["|"],
                                   &["&&"],
                                   &["||"]];

const ASSIGNMENTS: &[&str] = &["=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>="];

fn is_symbol(value: &Value, text: &str) -> bool {
    value.kind() == Kind::Symbol && value.text() == text
}

pub(crate) fn is_assignment(value: &Value) -> bool {
    value.kind() == Kind::Symbol && ASSIGNMENTS.contains(&value.text())
}

fn is_operand(value: &Value) -> bool {
    value.kind().is_operand()
}

/// Applies prefix `!`, `~` and `-`.
///
/// A `-` is a prefix only at the start of the sequence or right after a
/// symbol or keyword; anywhere else it is left for subtraction.
fn reduce_prefix(tokens: &mut Vec<Value>) {
    let mut i = 1;

    while i < tokens.len() {
        let result = {
            let (op, operand) = (&tokens[i - 1], &tokens[i]);
            let prefix = op.kind() == Kind::Symbol
                         && is_operand(operand)
                         && match op.text() {
                             "!" | "~" => true,
                             "-" => i < 2 || matches!(tokens[i - 2].kind(), Kind::Symbol | Kind::Bare),
                             _ => false,
                         };

            prefix.then(|| match op.text() {
                      "!" => !operand,
                      "~" => operand.bit_not(),
                      _ => -operand,
                  })
        };

        match result {
            Some(value) => {
                tokens.splice(i - 1..=i, [value]);
                i = (i - 1).max(1);
            },
            None => i += 1,
        }
    }
}

fn reduce_binary(tokens: &mut Vec<Value>, ops: &[&str]) {
    let mut i = 1;

    while i + 1 < tokens.len() {
        let result = {
            let (lhs, op, rhs) = (&tokens[i - 1], &tokens[i], &tokens[i + 1]);
            if op.kind() == Kind::Symbol && ops.contains(&op.text()) && is_operand(lhs) && is_operand(rhs) {
                lhs.apply(op.text(), rhs)
            } else {
                None
            }
        };

        match result {
            Some(value) => {
                tokens.splice(i - 1..=i + 1, [value]);
            },
            None => i += 1,
        }
    }
}

/// Finds the `:` that belongs to the `?` at `question`, skipping nested
/// ternaries.
fn matching_colon(tokens: &[Value], question: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (j, token) in tokens.iter().enumerate().skip(question + 1) {
        if is_symbol(token, "?") {
            depth += 1;
        } else if is_symbol(token, ":") {
            if depth == 0 {
                return Some(j);
            }
            depth -= 1;
        }
    }

    None
}

/// Replaces `cond ? a : b` with the live branch. The false branch runs up to
/// the next comma.
fn reduce_ternary(tokens: &mut Vec<Value>) {
    let mut i = 1;

    while i < tokens.len() {
        if !(is_symbol(&tokens[i], "?") && is_operand(&tokens[i - 1])) {
            i += 1;
            continue;
        }
        let Some(colon) = matching_colon(tokens, i) else {
            i += 1;
            continue;
        };

        let end = tokens[colon + 1..].iter()
                                     .position(is_comma)
                                     .map_or(tokens.len(), |offset| colon + 1 + offset);
        let live = if tokens[i - 1].as_bool() {
            tokens[i + 1..colon].to_vec()
        } else {
            tokens[colon + 1..end].to_vec()
        };

        tokens.splice(i - 1..end, live);
        i = (i - 1).max(1);
    }
}

/// Removes leading, trailing and doubled commas.
fn drop_stray_commas(tokens: &mut Vec<Value>) {
    let mut after_comma = true;
    tokens.retain(|token| {
              let comma = is_comma(token);
              let keep = !(comma && after_comma);
              after_comma = comma;
              keep
          });

    if tokens.last().is_some_and(is_comma) {
        tokens.pop();
    }
}

impl Interpreter {
    /// Collapses resolved values one precedence tier at a time.
    pub(crate) fn reduce(&mut self, mut tokens: Vec<Value>, allow_comma: bool) -> Evaluation {
        reduce_prefix(&mut tokens);
        for ops in BINARY_TIERS {
            reduce_binary(&mut tokens, ops);
        }
        reduce_ternary(&mut tokens);

        let assigned = self.reduce_assignments(&mut tokens);
        if allow_comma && !assigned {
            drop_stray_commas(&mut tokens);
        }

        Evaluation { values: tokens,
                     assigned }
    }

    /// Runs assignments from right to left, so `a = b = 1` stores into `b`
    /// first.
    fn reduce_assignments(&mut self, tokens: &mut Vec<Value>) -> bool {
        let mut assigned = false;
        let mut i = tokens.len().saturating_sub(2);

        while i >= 1 {
            match self.assign(&tokens[i - 1], &tokens[i], &tokens[i + 1]) {
                Some(value) => {
                    tokens.splice(i - 1..=i + 1, [value]);
                    assigned = true;
                    match i.checked_sub(2) {
                        Some(next) => i = next,
                        None => break,
                    }
                },
                None => i -= 1,
            }
        }

        assigned
    }

    /// Runs `target op value` and returns the stored value under the
    /// target's name.
    ///
    /// Returns `None` when this is not an assignment that can run: the target
    /// is not a name, the value is unresolved, a compound assignment targets
    /// an undeclared name or the name cannot be written.
    fn assign(&mut self, target: &Value, op: &Value, value: &Value) -> Option<Value> {
        if !is_assignment(op) || !is_operand(value) {
            return None;
        }

        let name = match target.kind() {
            Kind::Undefined if !target.is_empty() => target.text().to_owned(),
            kind if kind.is_operand() && !target.name().is_empty() => target.name().to_owned(),
            _ => return None,
        };

        // A named value may have been reassigned further right.
        let value = match value.name() {
            "" => value.clone(),
            source => self.get_var(source).unwrap_or_else(|| value.clone()),
        };

        let mut stored = match op.text() {
            "=" => value,
            compound => {
                let current = self.get_var(&name)?;
                current.apply(&compound[..compound.len() - 1], &value)?
            },
        };
        stored.name.clone_from(&name);

        tracing::trace!(name = %name, value = %stored, "assign");
        self.set_var(&name, stored.clone()).then_some(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn texts(values: &[Value]) -> Vec<&str> {
        values.iter().map(Value::text).collect()
    }

    #[test]
    fn prefix_minus_only_after_symbols() {
        let mut tokens = tokenize("3 - -2");
        reduce_prefix(&mut tokens);
        assert_eq!(texts(&tokens), ["3", "-", "-2"]);

        let mut tokens = tokenize("- - 1");
        reduce_prefix(&mut tokens);
        assert_eq!(texts(&tokens), ["1"]);
    }

    #[test]
    fn binary_tiers_are_left_associative() {
        let mut tokens = tokenize("10 - 4 - 3");
        reduce_binary(&mut tokens, &["+", "-"]);
        assert_eq!(texts(&tokens), ["3"]);
    }

    #[test]
    fn nested_ternaries_pick_the_live_branch() {
        let mut tokens = tokenize("0 ? 1 : 1 ? 2 : 3, 4");
        reduce_ternary(&mut tokens);
        assert_eq!(texts(&tokens), ["2", ",", "4"]);

        let mut tokens = tokenize("1 ? 0 ? 5 : 6 : 7");
        reduce_ternary(&mut tokens);
        assert_eq!(texts(&tokens), ["6"]);
    }

    #[test]
    fn stray_commas_are_dropped() {
        let mut tokens = tokenize(", 1 , , 2 ,");
        drop_stray_commas(&mut tokens);
        assert_eq!(texts(&tokens), ["1", ",", "2"]);
    }
}
