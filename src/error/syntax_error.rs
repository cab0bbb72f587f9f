#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors found by the syntax check of a single statement.
pub enum SyntaxError {
    /// A keyword appeared after the statement keyword.
    #[error("Unexpected '{found}' after '{statement}' statement!")]
    UnexpectedAfterStatement {
        /// The misplaced keyword.
        found:     String,
        /// The keyword that opened the statement.
        statement: String,
    },
    /// A statement keyword got fewer operands than it needs.
    #[error("Command '{command}' got too few arguments!")]
    TooFewArguments {
        /// The statement keyword, `else if` included.
        command: String,
    },
    /// `else` was followed by something other than `if`.
    #[error("Unexpected name '{name}' after 'else' statement!")]
    UnexpectedAfterElse {
        /// The token following `else`.
        name: String,
    },
    /// `delete` was given a symbol other than a separating comma.
    #[error("Unexpected symbol '{symbol}' after 'delete' statement!")]
    DeleteSymbol {
        /// The offending symbol.
        symbol: String,
    },
    /// `delete` named a variable that does not exist.
    #[error("Undefined name '{name}' after 'delete' statement!")]
    UndefinedDelete {
        /// The missing name.
        name: String,
    },
    #[error("Expected symbol ':' after a ternary operator!")]
    TernaryMissingColon,
    #[error("Ternary operator got too few arguments!")]
    TernaryTooFewArguments,
    /// A symbol directly followed a statement keyword.
    #[error("Unexpected symbol '{symbol}' after '{command}' command!")]
    SymbolAfterCommand {
        /// The offending symbol.
        symbol:  String,
        /// The keyword in front of it.
        command: String,
    },
    /// Two operators in a row where the second cannot be a prefix.
    #[error("Unexpected symbol '{symbol}' after '{previous}' symbol!")]
    SymbolAfterSymbol {
        /// The offending symbol.
        symbol:   String,
        /// The symbol in front of it.
        previous: String,
    },
    /// An operator ended the statement.
    #[error("Expected something after '{symbol}' symbol!")]
    ExpectedAfterSymbol {
        /// The trailing operator.
        symbol: String,
    },
    /// A keyword appeared inside an array literal or a parenthesised group.
    #[error("Unexpected name '{name}' in {group}!")]
    NameInGroup {
        /// The keyword found inside the group.
        name:  String,
        /// `array` or `parenthesis`.
        group: &'static str,
    },
    /// A name starts with a digit, holds a reserved symbol or is reserved.
    #[error("Name '{name}' is illegal!")]
    IllegalName {
        /// The rejected name.
        name: String,
    },
    /// `=` followed something that cannot be assigned to.
    #[error("Unexpected symbol '=' after '{target}'!")]
    AssignToValue {
        /// The token in front of `=`.
        target: String,
    },
    #[error("Unexpected symbol '}}' - nothing to close!")]
    NothingToClose,
    /// `else` with no `if` or `else if` right before it.
    #[error("Unexpected 'else' without a preceding 'if'!")]
    ElseWithoutIf,
    /// A `for` header did not split into exactly three comma separated parts.
    #[error("Command 'for' expects 'init, condition, increment'!")]
    ForHeader,
    /// `function` was not followed by exactly one legal, free name.
    #[error("Function name '{name}' is illegal!")]
    IllegalFunctionName {
        /// The rejected name.
        name: String,
    },
    /// A call names a function that is neither defined nor native.
    #[error("Function '{name}' not recognized!")]
    UnknownFunction {
        /// The called name.
        name: String,
    },
    /// A block statement was not followed by `{`.
    #[error("Expected '{{' after '{statement}' statement!")]
    ExpectedScope {
        /// The statement waiting for its scope.
        statement: String,
    },
    /// A `do` scope was closed without a `while` condition.
    #[error("Expected 'while' after 'do' scope!")]
    DoWithoutWhile,
    /// `break`, `continue` or `pause` got arguments.
    #[error("Command '{command}' takes no arguments!")]
    UnexpectedArguments {
        /// The statement keyword.
        command: String,
    },
    /// A keyword where no keyword may stand, such as `endl` opening a
    /// statement or `if` inside an expression.
    #[error("Unexpected keyword '{keyword}'!")]
    MisplacedKeyword {
        /// The keyword.
        keyword: String,
    },
}
