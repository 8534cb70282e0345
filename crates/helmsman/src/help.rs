//! Help and usage rendering.
//!
//! Pure string producers; printing is the caller's concern. Headings are
//! styled with [`console::Style`], which degrades to plain text when the
//! output is not a terminal.

use std::fmt::Write;

use console::style;

use crate::command::Command;
use crate::commander::Commander;
use crate::schema::Parameter;

/// The program's usage text.
pub(crate) fn usage(program: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Usage:").bold());
    let _ = writeln!(out, "    {} [options]", program);
    let _ = writeln!(out, "    {} help [command_or_topic]", program);
    let _ = writeln!(out, "    {} command [args...]", program);
    out
}

/// The one-line version banner.
pub(crate) fn version(program: &str, version: &str) -> String {
    format!("{} version {}", program, version)
}

/// How a parameter appears in a usage line: `<name>` when required,
/// `[name]` when optional, `[name...]` when variadic.
fn usage_marker(param: &Parameter) -> String {
    if param.ty().is_variadic() {
        format!("[{}...]", param.name())
    } else if param.is_optional() {
        format!("[{}]", param.name())
    } else {
        format!("<{}>", param.name())
    }
}

/// General help: usage, the command table, help topics, and the distinct
/// parameter types the commands reference.
pub(crate) fn general_help(commander: &Commander) -> String {
    let mut out = usage(commander.program_name());

    if !commander.commands().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("Commands:").bold());
        for command in commander.commands() {
            let _ = writeln!(out, "    {:<10} {}", command.name(), command.describe());
        }
    }

    if !commander.help_topics().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("Help topics:").bold());
        for (name, _) in commander.help_topics() {
            let _ = writeln!(out, "    {}", name);
        }
    }

    let types = commander.parameter_types();
    if !types.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("Types:").bold());
        for ty in types {
            let _ = writeln!(out, "    {:<12} {}", ty.name(), ty.description());
        }
    }

    out
}

/// The help page for one command: usage line, description, parameter and
/// option tables, and the command's free-form help text.
pub(crate) fn command_help(program: &str, command: &Command) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", style("Usage:").bold());
    let mut line = format!("    {} {}", program, command.name());
    if !command.options().is_empty() {
        line.push_str(" [options]");
    }
    for param in command.params() {
        line.push(' ');
        line.push_str(&usage_marker(param));
    }
    let _ = writeln!(out, "{}", line);

    if !command.describe().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", command.describe());
    }

    if !command.params().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("Parameters:").bold());
        for param in command.params() {
            let optional = if param.is_optional() { "Optional " } else { "" };
            let _ = writeln!(
                out,
                "    {:<10} {}{} - {}",
                param.name(),
                optional,
                param.ty().name(),
                param.describe()
            );
        }
    }

    if !command.options().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("Options:").bold());
        for option in command.options() {
            let name = format!("--{}", option.name());
            let _ = writeln!(
                out,
                "    {:<12} {} - {}",
                name,
                option.ty().name(),
                option.describe()
            );
        }
    }

    if !command.help().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", command.help());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CommandOption;
    use crate::types::ParamType;

    fn sample_command() -> Command {
        Command::new("copy")
            .description("Copy files around")
            .help_text("Copies never overwrite unless --force is given.")
            .parameter(Parameter::new("source", ParamType::String).description("File to copy"))
            .parameter(Parameter::new("dest", ParamType::String).optional())
            .parameter(Parameter::new("extras", ParamType::StringArray).optional())
            .option(CommandOption::new("force").description("Overwrite the destination"))
    }

    #[test]
    fn usage_names_the_program_on_every_line() {
        let text = usage("prog");
        for line in text.lines().skip(1) {
            assert!(line.contains("prog"), "missing program in: {line}");
        }
    }

    #[test]
    fn version_banner_format() {
        assert_eq!(version("prog", "1.2.3"), "prog version 1.2.3");
    }

    #[test]
    fn command_usage_line_marks_parameter_shapes() {
        let text = command_help("prog", &sample_command());
        assert!(text.contains("prog copy [options] <source> [dest] [extras...]"));
    }

    #[test]
    fn command_help_lists_parameters_and_options() {
        let text = command_help("prog", &sample_command());
        assert!(text.contains("source"));
        assert!(text.contains("Optional string"));
        assert!(text.contains("--force"));
        assert!(text.contains("Overwrite the destination"));
        assert!(text.contains("Copies never overwrite"));
    }

    #[test]
    fn general_help_lists_commands_topics_and_types() {
        let commander = Commander::new("prog", "0.1.0")
            .command(sample_command())
            .help_topic("quoting", "Quote arguments with ' or \".");
        let text = general_help(&commander);
        assert!(text.contains("copy"));
        assert!(text.contains("Copy files around"));
        assert!(text.contains("quoting"));
        assert!(text.contains("string array"));
        assert!(text.contains("flag"));
    }
}
