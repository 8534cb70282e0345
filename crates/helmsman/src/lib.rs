//! Declarative command schemas with typed argument binding.
//!
//! `helmsman` maps tokenized argument sequences onto declared command
//! schemas: ordered positional parameters plus long-form `--options`, with
//! per-type text-to-value conversion. It pairs with `helmsman-splitter`,
//! which turns a raw line into tokens.
//!
//! # Features
//!
//! - **Typed parameters**: string, integer, flag, and variadic string-array
//!   built-ins, plus pluggable custom types
//! - **Argument binding**: a single scan that interleaves options with
//!   positionals and absorbs trailing tokens into a variadic parameter
//! - **Command registry**: name-based dispatch with a built-in `help`
//!   command, help topics, and usage rendering
//! - **Interactive loop**: a small REPL that reads, splits, and dispatches
//!   lines until EOF or `exit`
//!
//! # Example
//!
//! ```rust
//! use helmsman::{Command, ParamType, Parameter, CommandOption};
//!
//! let greet = Command::new("greet")
//!     .description("Greet someone")
//!     .parameter(Parameter::new("name", ParamType::String))
//!     .option(CommandOption::new("loud"))
//!     .action(|args| {
//!         let name = args.get_str("name").unwrap_or("world");
//!         if args.get_bool("loud").unwrap_or(false) {
//!             println!("HELLO, {}!", name.to_uppercase());
//!         } else {
//!             println!("hello, {}", name);
//!         }
//!         Ok(())
//!     });
//!
//! let bound = greet.bind(&["--loud".into(), "ada".into()]).unwrap();
//! assert_eq!(bound.get_str("name"), Some("ada"));
//! assert_eq!(bound.get_bool("loud"), Some(true));
//! ```
//!
//! # Error Classes
//!
//! [`Error`] is a closed taxonomy. Schema-shape errors (a flag-typed
//! parameter, a required parameter after an optional one, a misplaced
//! string-array parameter, a custom conversion contradicting its declared
//! shape) indicate a bug in the command declaration and should be treated
//! as fatal; everything else is bad user input and should be reported to
//! the user without terminating the process. [`Error::is_schema_error`]
//! makes the split.

// Core modules
mod bind;
mod command;
mod commander;
mod error;
mod help;
mod repl;
mod schema;
mod types;

// Re-export core types
pub use bind::BoundArgs;
pub use command::Command;
pub use commander::Commander;
pub use error::Error;
pub use repl::{LineSource, Repl, TerminalLines};
pub use schema::{CommandOption, Parameter};
pub use types::{builtin_types, ConvertError, CustomType, ParamType, Value, ValueKind};

// Re-export the tokenizer so applications need only one dependency.
pub use helmsman_splitter::{split_args, UnmatchedQuote};
