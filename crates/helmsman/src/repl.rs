//! Interactive read-dispatch loop.
//!
//! [`Repl`] reads one line at a time, tokenizes it with the splitter,
//! and dispatches it through a [`Commander`]. User-input errors are
//! reported and the loop continues; schema-shape errors are bugs in the
//! command declarations and abort the loop.

use std::io::{self, BufRead};

use console::Term;

use crate::commander::Commander;
use crate::error::Error;

/// Abstraction over prompt writing and line reading, for testability.
pub trait LineSource {
    /// Writes the prompt, without a trailing newline.
    fn write_prompt(&mut self, prompt: &str) -> io::Result<()>;

    /// Reads one line, without its trailing newline. `None` means end of
    /// input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// The real terminal: prompt to stdout, lines from stdin.
pub struct TerminalLines {
    term: Term,
}

impl TerminalLines {
    /// Creates a line source over the process's terminal.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalLines {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for TerminalLines {
    fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.term.write_str(prompt)?;
        self.term.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// An interactive loop over a [`Commander`].
///
/// Empty lines are skipped; `exit` and `quit` (or end of input) end the
/// loop. Unknown commands print the error and the program's usage;
/// other user-input errors print and the loop continues.
///
/// # Example
///
/// ```rust,no_run
/// use helmsman::{Commander, Repl};
///
/// let commander = Commander::new("shell", "0.1.0");
/// Repl::new(&commander).prompt("shell> ").run().unwrap();
/// ```
pub struct Repl<'a, S: LineSource = TerminalLines> {
    commander: &'a Commander,
    prompt: String,
    source: S,
}

impl<'a> Repl<'a, TerminalLines> {
    /// Creates a loop over the process's terminal with a `> ` prompt.
    pub fn new(commander: &'a Commander) -> Self {
        Self::with_source(commander, TerminalLines::new())
    }
}

impl<'a, S: LineSource> Repl<'a, S> {
    /// Creates a loop reading from a custom line source.
    pub fn with_source(commander: &'a Commander, source: S) -> Self {
        Self {
            commander,
            prompt: "> ".to_string(),
            source,
        }
    }

    /// Sets the prompt string.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Runs until end of input or an `exit`/`quit` line.
    ///
    /// Returns an error for I/O failures and for schema-shape errors
    /// surfacing from a command declaration; everything else is printed
    /// and swallowed.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.source.write_prompt(&self.prompt)?;

            let Some(line) = self.source.read_line()? else {
                return Ok(());
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "exit" || line == "quit" {
                return Ok(());
            }

            match self.commander.dispatch_line(line) {
                Ok(()) => {}
                Err(err) if err.is_schema_error() => return Err(err.into()),
                Err(err @ Error::UnknownCommand(_)) => {
                    println!("{}", err);
                    println!("{}", self.commander.usage());
                }
                Err(err) => println!("{}", err),
            }
        }
    }
}
