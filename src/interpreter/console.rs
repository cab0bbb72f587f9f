use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, BufRead, Write},
    rc::Rc,
};

/// The text channel behind `cout`, `cin` and `pause`.
pub trait Console {
    /// Writes `text` as is; no newline is added.
    fn write(&mut self, text: &str);

    /// Reads one line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

/// A console handle shared by an interpreter and every child it spawns.
pub type SharedConsole = Rc<RefCell<dyn Console>>;

/// The process terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl StdConsole {
    /// Wraps a terminal console into a shareable handle.
    #[must_use]
    pub fn shared() -> SharedConsole {
        Rc::new(RefCell::new(Self))
    }
}

impl Console for StdConsole {
    fn write(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        if stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()).is_err() {
            tracing::warn!("failed to write to stdout");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_owned()),
        }
    }
}

/// An in-memory console.
///
/// Everything written is collected, and reads are served from a queue of
/// prepared lines.
///
/// # Example
/// ```
/// use cll::interpreter::console::{BufferConsole, Console};
///
/// let mut console = BufferConsole::with_input(["42"]);
/// console.write("n = ");
///
/// assert_eq!(console.read_line().as_deref(), Some("42"));
/// assert_eq!(console.read_line(), None);
/// assert_eq!(console.written(), "n = ");
/// ```
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    written: String,
    input:   VecDeque<String>,
}

impl BufferConsole {
    /// A console whose reads return `lines` in order.
    #[must_use]
    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { written: String::new(),
               input:   lines.into_iter().map(Into::into).collect(), }
    }

    /// Everything written so far.
    #[must_use]
    pub fn written(&self) -> &str {
        &self.written
    }

    /// Queues one more input line.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }
}

impl Console for BufferConsole {
    fn write(&mut self, text: &str) {
        self.written.push_str(text);
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }
}
