//! Command declarations.

use std::fmt;

use crate::bind::{bind_args, BoundArgs};
use crate::error::Error;
use crate::schema::{CommandOption, Parameter};
use crate::types::ParamType;

type Action = Box<dyn Fn(&BoundArgs) -> anyhow::Result<()> + Send + Sync>;

/// A named command: an ordered parameter list, an option set, and a
/// behavior to run with the bound arguments.
///
/// Commands are built once, up front, and are immutable afterwards. The
/// action receives the bound mapping and reports failure through
/// `anyhow`, so applications can carry whatever error context they like.
///
/// # Example
///
/// ```rust
/// use helmsman::{Command, CommandOption, ParamType, Parameter};
///
/// let copy = Command::new("copy")
///     .description("Copy a file")
///     .parameter(Parameter::new("source", ParamType::String))
///     .parameter(Parameter::new("dest", ParamType::String).optional())
///     .option(CommandOption::new("force").description("Overwrite the destination"))
///     .action(|args| {
///         let _source = args.get_str("source");
///         Ok(())
///     });
///
/// copy.execute(&["notes.txt".into()]).unwrap();
/// ```
pub struct Command {
    name: String,
    description: String,
    help_text: String,
    params: Vec<Parameter>,
    options: Vec<CommandOption>,
    action: Option<Action>,
}

impl Command {
    /// Creates a command with the given name and an empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            help_text: String::new(),
            params: Vec::new(),
            options: Vec::new(),
            action: None,
        }
    }

    /// Sets the one-line description shown in command listings.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets free-form help text appended to the command's help page.
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    /// Appends a positional parameter. Order of calls is binding order.
    pub fn parameter(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a long-form option.
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the behavior invoked by [`Command::execute`] with the bound
    /// arguments.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&BoundArgs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// The command's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The one-line description.
    pub fn describe(&self) -> &str {
        &self.description
    }

    /// The free-form help text.
    pub fn help(&self) -> &str {
        &self.help_text
    }

    /// The ordered parameter list.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// The option set.
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// The distinct parameter types referenced by this command's
    /// parameters and options, in first-use order.
    pub fn parameter_types(&self) -> Vec<&ParamType> {
        let mut types: Vec<&ParamType> = Vec::new();
        let referenced = self
            .params
            .iter()
            .map(Parameter::ty)
            .chain(self.options.iter().map(CommandOption::ty));
        for ty in referenced {
            if !types.contains(&ty) {
                types.push(ty);
            }
        }
        types
    }

    /// Binds a token sequence against this command's schema without
    /// running the action. The schema is validated on every call.
    pub fn bind(&self, tokens: &[String]) -> Result<BoundArgs, Error> {
        bind_args(&self.params, &self.options, tokens)
    }

    /// Binds the tokens and invokes the action, if one is set.
    ///
    /// Action failures surface as [`Error::Action`]; everything else is
    /// a binding error.
    pub fn execute(&self, tokens: &[String]) -> Result<(), Error> {
        let bound = self.bind(tokens)?;
        if let Some(action) = &self.action {
            action(&bound).map_err(Error::Action)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("options", &self.options)
            .field("has_action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn execute_runs_the_action_with_bound_args() {
        let seen = Arc::new(AtomicBool::new(false));
        let seen_clone = Arc::clone(&seen);
        let cmd = Command::new("probe")
            .parameter(Parameter::new("value", ParamType::Integer))
            .action(move |args| {
                assert_eq!(args.get_int("value"), Some(9));
                seen_clone.store(true, Ordering::SeqCst);
                Ok(())
            });

        cmd.execute(&["9".to_string()]).unwrap();
        assert!(seen.load(Ordering::SeqCst));
    }

    #[test]
    fn execute_without_action_is_a_noop() {
        let cmd = Command::new("silent");
        cmd.execute(&["ignored".to_string()]).unwrap();
    }

    #[test]
    fn action_failure_wraps_as_action_error() {
        let cmd = Command::new("failing").action(|_| anyhow::bail!("boom"));
        let err = cmd.execute(&[]).unwrap_err();
        assert!(matches!(err, Error::Action(_)));
        assert!(err.to_string().contains("command failed"));
    }

    #[test]
    fn binding_error_prevents_the_action() {
        let cmd = Command::new("guarded")
            .parameter(Parameter::new("needed", ParamType::String))
            .action(|_| panic!("must not run"));
        let err = cmd.execute(&[]).unwrap_err();
        assert!(matches!(err, Error::NotEnoughArgumentsForParameter(_)));
    }

    #[test]
    fn parameter_types_deduplicate_in_first_use_order() {
        let cmd = Command::new("typed")
            .parameter(Parameter::new("a", ParamType::String))
            .parameter(Parameter::new("b", ParamType::Integer))
            .parameter(Parameter::new("c", ParamType::String).optional())
            .option(CommandOption::new("verbose"));
        let names: Vec<_> = cmd.parameter_types().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["string", "integer", "flag"]);
    }
}
