//! The command registry and dispatch entry points.

use helmsman_splitter::split_args;

use crate::bind::bind_args;
use crate::command::Command;
use crate::error::Error;
use crate::help;
use crate::schema::Parameter;
use crate::types::ParamType;

/// A registry of commands for one program, with name-based dispatch.
///
/// The registry is insertion-ordered, which is also the order commands
/// appear in general help. `help` is built in: `help` alone renders
/// general help, `help <command>` renders that command's page, and
/// `help <topic>` renders a registered free-form topic.
///
/// # Example
///
/// ```rust
/// use helmsman::{Command, Commander, ParamType, Parameter};
///
/// let commander = Commander::new("filer", "1.2.0")
///     .command(
///         Command::new("touch")
///             .description("Create an empty file")
///             .parameter(Parameter::new("path", ParamType::String))
///             .action(|_args| Ok(())),
///     );
///
/// commander.dispatch_line("touch notes.txt").unwrap();
/// assert!(commander.dispatch_line("bogus").is_err());
/// ```
#[derive(Debug)]
pub struct Commander {
    program_name: String,
    version: String,
    commands: Vec<Command>,
    help_topics: Vec<(String, String)>,
}

impl Commander {
    /// Creates an empty registry for the given program name and version.
    pub fn new(program_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            version: version.into(),
            commands: Vec::new(),
            help_topics: Vec::new(),
        }
    }

    /// Registers a command. Registration order is listing order.
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Registers a free-form help topic reachable as `help <name>`.
    /// Topic names are matched case-insensitively.
    pub fn help_topic(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.help_topics.push((name.into(), text.into()));
        self
    }

    /// The program name used in usage lines.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// The program version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The registered commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The registered help topics, in registration order.
    pub fn help_topics(&self) -> &[(String, String)] {
        &self.help_topics
    }

    /// Looks up a command by name.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// The distinct parameter types referenced across all registered
    /// commands, in first-use order. Rendered in the "Types:" section of
    /// general help.
    pub fn parameter_types(&self) -> Vec<&ParamType> {
        let mut types: Vec<&ParamType> = Vec::new();
        for command in &self.commands {
            for ty in command.parameter_types() {
                if !types.contains(&ty) {
                    types.push(ty);
                }
            }
        }
        types
    }

    /// Dispatches a tokenized argument sequence: the first token names
    /// the command, the rest are its arguments.
    ///
    /// An empty sequence or an unmatched name fails with
    /// [`Error::UnknownCommand`]; callers usually respond by printing
    /// [`Commander::usage`].
    pub fn dispatch(&self, args: &[String]) -> Result<(), Error> {
        let Some((name, rest)) = args.split_first() else {
            return Err(Error::UnknownCommand(String::new()));
        };

        if name == "help" {
            return self.run_help(rest);
        }

        match self.find(name) {
            Some(command) => command.execute(rest),
            None => Err(Error::UnknownCommand(name.clone())),
        }
    }

    /// Tokenizes a raw line with `helmsman-splitter` and dispatches it.
    pub fn dispatch_line(&self, line: &str) -> Result<(), Error> {
        let tokens = split_args(line)?;
        self.dispatch(&tokens)
    }

    /// The program's usage text.
    pub fn usage(&self) -> String {
        help::usage(&self.program_name)
    }

    /// The one-line version banner.
    pub fn version_line(&self) -> String {
        help::version(&self.program_name, &self.version)
    }

    /// General help: usage, commands, help topics, and the types they
    /// reference.
    pub fn general_help(&self) -> String {
        help::general_help(self)
    }

    /// The help page for one command.
    pub fn command_help(&self, command: &Command) -> String {
        help::command_help(&self.program_name, command)
    }

    /// The built-in `help` command. Its single optional `topic`
    /// parameter goes through the regular binder.
    fn run_help(&self, args: &[String]) -> Result<(), Error> {
        let params = vec![Parameter::new("topic", ParamType::String).optional()];
        let bound = bind_args(&params, &[], args)?;

        let Some(topic) = bound.get_str("topic") else {
            println!("{}", self.general_help());
            return Ok(());
        };

        let topic = topic.to_lowercase();
        if let Some(command) = self.find(&topic) {
            println!("{}", self.command_help(command));
        } else if let Some((_, text)) = self
            .help_topics
            .iter()
            .find(|(name, _)| name.to_lowercase() == topic)
        {
            println!("{}", text);
        } else {
            println!("Unknown topic: \"{}\"", topic);
            println!("{}", self.usage());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CommandOption;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_commander() -> (Commander, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let commander = Commander::new("testprog", "0.0.1").command(
            Command::new("bump")
                .description("Increment the counter")
                .parameter(Parameter::new("by", ParamType::Integer).optional())
                .option(CommandOption::new("twice"))
                .action(move |args| {
                    let by = args.get_int("by").unwrap_or(1) as usize;
                    let times = if args.get_bool("twice").unwrap_or(false) {
                        2
                    } else {
                        1
                    };
                    count_clone.fetch_add(by * times, Ordering::SeqCst);
                    Ok(())
                }),
        );
        (commander, count)
    }

    #[test]
    fn dispatch_routes_to_the_named_command() {
        let (commander, count) = counting_commander();
        commander
            .dispatch(&["bump".to_string(), "3".to_string()])
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn dispatch_line_tokenizes_first() {
        let (commander, count) = counting_commander();
        commander.dispatch_line("bump --twice 2").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn unknown_command_is_an_error() {
        let (commander, _) = counting_commander();
        let err = commander.dispatch_line("missing").unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(name) if name == "missing"));
    }

    #[test]
    fn empty_input_is_an_unknown_command() {
        let (commander, _) = counting_commander();
        let err = commander.dispatch(&[]).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(name) if name.is_empty()));
    }

    #[test]
    fn unmatched_quote_surfaces_from_dispatch_line() {
        let (commander, _) = counting_commander();
        let err = commander.dispatch_line("bump 'oops").unwrap_err();
        assert!(matches!(err, Error::UnmatchedQuote(_)));
    }

    #[test]
    fn help_is_built_in() {
        let (commander, count) = counting_commander();
        commander.dispatch_line("help").unwrap();
        commander.dispatch_line("help bump").unwrap();
        commander.dispatch_line("help nothing-here").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn distinct_types_collect_across_commands() {
        let (commander, _) = counting_commander();
        let commander = commander.command(
            Command::new("echo").parameter(Parameter::new("words", ParamType::StringArray)),
        );
        let names: Vec<_> = commander
            .parameter_types()
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["integer", "flag", "string array"]);
    }
}
