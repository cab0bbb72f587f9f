use std::{fmt, rc::Rc};

use crate::{
    error::CllError,
    interpreter::{
        console::{SharedConsole, StdConsole},
        function::{
            core::{Registry, SharedRegistry},
            time::start_clock,
        },
        grammar::Grammar,
        lexer::Lexer,
        store::Store,
        value::core::Value,
    },
};

/// A line of source together with the line number it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text:   String,
}

impl SourceLine {
    #[must_use]
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self { number,
               text: text.into() }
    }
}

/// Switches that shape how an interpreter talks to the outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Print errors to the console as they reach this interpreter.
    pub logging: bool,
    /// Trace every statement's tokens before and after evaluation.
    pub debug:   bool,
    /// Let `cout`, `cin` and `pause` use the console.
    pub io:      bool,
    /// Record the values of bare expression statements.
    pub output:  bool,
}

/// How a run of statements ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Normal,
    Break,
    Continue,
    /// `return` ran; the value is in `returned`.
    Return,
}

/// The three parts of a `for` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForHeader {
    pub init:      String,
    pub condition: String,
    pub increment: String,
}

/// A block statement waiting for its scope to close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A bare `{ ... }` block.
    Block,
    /// `if` or a live `else if`, with the condition text.
    If(String),
    Else,
    /// A branch of an `if` chain that will not run. Holds the chain state to
    /// restore once the scope closes.
    Skip(Option<bool>),
    While(String),
    Do,
    For(ForHeader),
    Function(String),
}

impl Action {
    /// The keyword that opened this action.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Block => "{",
            Self::If(_) => "if",
            Self::Else | Self::Skip(_) => "else",
            Self::While(_) => "while",
            Self::Do => "do",
            Self::For(_) => "for",
            Self::Function(_) => "function",
        }
    }
}

/// A `do` body that ran once and waits for its `while` condition.
#[derive(Debug, Clone)]
pub(crate) struct PendingDo {
    pub(crate) lines: Vec<SourceLine>,
    /// The first run ended with `break` or `return`.
    pub(crate) done:  bool,
}

/// An interpreter instance: the execution context for one script, one scope
/// or one function call.
///
/// Each instance owns its variables. Scopes and calls run in child instances
/// that share the function registry and the console with their parent.
///
/// # Example
/// ```
/// use cll::Interpreter;
///
/// let mut cll = Interpreter::new();
///
/// assert!(cll.read_line("x = 2 + 3 * 4"));
/// assert_eq!(cll.get_var("x").map(|v| v.to_string()), Some("14".to_owned()));
///
/// assert!(!cll.read_line("y = missing + 1"));
/// assert_eq!(cll.error_message(), "Name 'missing' not recognized!");
/// ```
pub struct Interpreter {
    pub(crate) store:      Store,
    pub(crate) functions:  SharedRegistry,
    pub(crate) grammar:    Grammar,
    pub(crate) console:    SharedConsole,
    pub(crate) flags:      Flags,
    pub(crate) error:      Option<CllError>,
    /// First error raised inside the expression being evaluated.
    pub(crate) fault:      Option<CllError>,
    pub(crate) filename:   Option<String>,
    pub(crate) line:       usize,
    /// Open brace depth while buffering a scope.
    pub(crate) scope:      usize,
    pub(crate) buffer:     Vec<SourceLine>,
    pub(crate) action:     Option<Action>,
    /// Whether the last `if` chain ran a branch; `None` outside a chain.
    pub(crate) previous:   Option<bool>,
    pub(crate) pending_do: Option<PendingDo>,
    pub(crate) flow:       Flow,
    pub(crate) returned:   Option<Value>,
    pub(crate) output:     Vec<Value>,
}

impl Interpreter {
    /// Creates an interpreter with the default variables and the builtin
    /// library, talking to the terminal.
    #[must_use]
    pub fn new() -> Self {
        start_clock();
        Self::with_parts(Store::with_defaults(),
                         Registry::with_builtins().shared(),
                         StdConsole::shared(),
                         Flags::default())
    }

    fn with_parts(store: Store, functions: SharedRegistry, console: SharedConsole, flags: Flags) -> Self {
        Self { store,
               functions,
               grammar: Grammar::STANDARD,
               console,
               flags,
               error: None,
               fault: None,
               filename: None,
               line: 0,
               scope: 0,
               buffer: Vec::new(),
               action: None,
               previous: None,
               pending_do: None,
               flow: Flow::Normal,
               returned: None,
               output: Vec::new() }
    }

    /// Creates an interpreter whose store also holds `vars`.
    ///
    /// Values without a valid name are skipped.
    #[must_use]
    pub fn with_vars(vars: impl IntoIterator<Item = Value>) -> Self {
        let mut interpreter = Self::new();
        for var in vars {
            let name = var.name().to_owned();
            interpreter.set_var(&name, var);
        }
        interpreter
    }

    /// Creates an interpreter and runs the file at `path` right away.
    ///
    /// Check [`Interpreter::error`] for the outcome.
    #[must_use]
    pub fn from_file(path: &str) -> Self {
        let mut interpreter = Self::new();
        interpreter.read_file(path);
        interpreter
    }

    /// Replaces the console, returning the interpreter.
    #[must_use]
    pub fn with_console(mut self, console: SharedConsole) -> Self {
        self.console = console;
        self
    }

    pub fn set_console(&mut self, console: SharedConsole) {
        self.console = console;
    }

    /// A child sharing this interpreter's registry, console and position.
    ///
    /// Children never log errors themselves; the error travels up to the
    /// instance the host talks to.
    pub(crate) fn spawn(&self, store: Store) -> Self {
        let mut child = Self::with_parts(store,
                                         Rc::clone(&self.functions),
                                         Rc::clone(&self.console),
                                         Flags { logging: false,
                                                 ..self.flags });
        child.grammar = self.grammar;
        child.filename.clone_from(&self.filename);
        child.line = self.line;
        child
    }

    pub(crate) const fn lexer(&self) -> Lexer<'_> {
        Lexer::new(&self.grammar)
    }

    /// Checks whether `name` may hold a variable: a legal name that is not
    /// taken by a native function.
    #[must_use]
    pub fn is_valid_name(&self, name: &str) -> bool {
        self.grammar.is_valid_name(name) && !self.functions.borrow().is_native(name)
    }

    /// The message of the current error, or an empty string.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&CllError> {
        self.error.as_ref()
    }

    /// Forgets the current error so execution can go on.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Values recorded by bare expression statements while output capture
    /// is on.
    #[must_use]
    pub fn output(&self) -> &[Value] {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// The value of the last `return`, empty for a bare `return`.
    #[must_use]
    pub const fn returned(&self) -> Option<&Value> {
        self.returned.as_ref()
    }

    /// How many braces are open.
    #[must_use]
    pub const fn scope_depth(&self) -> usize {
        self.scope
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The file being executed, if any.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    #[must_use]
    pub const fn version(&self) -> &'static str {
        crate::VERSION
    }

    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    pub const fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// Registers a host function callable from scripts.
    ///
    /// # Example
    /// ```
    /// use cll::{Interpreter, Value};
    ///
    /// let mut cll = Interpreter::new();
    /// cll.add_function("answer", |_: &[Value]| Value::int(42));
    ///
    /// assert!(cll.read_line("x = answer() + 1"));
    /// assert_eq!(cll.get_var("x").map(|v| v.as_int()), Some(43));
    /// ```
    pub fn add_function(&mut self, name: &str, function: impl Fn(&[Value]) -> Value + 'static) {
        self.functions.borrow_mut().add_native(name, Rc::new(function));
    }

    /// Removes a host, builtin or script function. Returns `false` if none
    /// existed.
    pub fn delete_function(&mut self, name: &str) -> bool {
        self.functions.borrow_mut().remove(name)
    }

    /// The names of all variables, in order.
    #[must_use]
    pub fn var_names(&self) -> Vec<&str> {
        self.store.names()
    }
}

macro_rules! flag_switches {
    ($($flag:ident: $enable:ident, $disable:ident, $toggle:ident;)*) => {
        impl Interpreter {
            $(
                #[doc = concat!("Turns the `", stringify!($flag), "` flag on.")]
                pub const fn $enable(&mut self) {
                    self.flags.$flag = true;
                }

                #[doc = concat!("Turns the `", stringify!($flag), "` flag off.")]
                pub const fn $disable(&mut self) {
                    self.flags.$flag = false;
                }

                #[doc = concat!("Flips the `", stringify!($flag), "` flag.")]
                pub const fn $toggle(&mut self) {
                    self.flags.$flag = !self.flags.$flag;
                }
            )*
        }
    };
}

flag_switches! {
    logging: enable_logging, disable_logging, toggle_logging;
    debug:   enable_debug,   disable_debug,   toggle_debug;
    io:      enable_io,      disable_io,      toggle_io;
    output:  enable_output,  disable_output,  toggle_output;
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
         .field("store", &self.store)
         .field("functions", &self.functions.borrow())
         .field("flags", &self.flags)
         .field("error", &self.error)
         .field("filename", &self.filename)
         .field("line", &self.line)
         .field("scope", &self.scope)
         .field("action", &self.action)
         .field("flow", &self.flow)
         .field("returned", &self.returned)
         .finish_non_exhaustive()
    }
}
