//! `hclc`: a small calculator shell built on helmsman.
//!
//! Run with arguments to execute one command (`hclc add 2 3`), or with
//! none to get an interactive prompt. Try `help` for the command list
//! and `help add` for a command page.

use anyhow::Result;
use helmsman::{Command, CommandOption, Commander, ParamType, Parameter, Repl, Value};

fn build_commander() -> Commander {
    Commander::new("hclc", env!("CARGO_PKG_VERSION"))
        .command(
            Command::new("add")
                .description("Add two integers")
                .parameter(Parameter::new("a", ParamType::Integer).description("First addend"))
                .parameter(Parameter::new("b", ParamType::Integer).description("Second addend"))
                .option(CommandOption::new("verbose").description("Show the full equation"))
                .action(|args| {
                    let a = args.get_int("a").unwrap_or(0);
                    let b = args.get_int("b").unwrap_or(0);
                    if args.get_bool("verbose").unwrap_or(false) {
                        println!("{} + {} = {}", a, b, a + b);
                    } else {
                        println!("{}", a + b);
                    }
                    Ok(())
                }),
        )
        .command(
            Command::new("sum")
                .description("Sum any number of integers")
                .parameter(
                    Parameter::new("values", ParamType::StringArray)
                        .description("Integers to sum"),
                )
                .option(CommandOption::new("json").description("Emit the bound arguments as JSON"))
                .action(|args| {
                    if args.get_bool("json").unwrap_or(false) {
                        println!("{}", serde_json::to_string_pretty(args)?);
                        return Ok(());
                    }
                    let mut total = 0i64;
                    for value in args.get_list("values").unwrap_or(&[]) {
                        let raw = value.as_str().unwrap_or_default();
                        let n: i64 = raw
                            .parse()
                            .map_err(|_| anyhow::anyhow!("\"{raw}\" is not an integer"))?;
                        total += n;
                    }
                    println!("{}", total);
                    Ok(())
                }),
        )
        .command(
            Command::new("echo")
                .description("Print words back")
                .help_text("Words are joined with the separator; quoting keeps spaces intact.")
                .parameter(
                    Parameter::new("words", ParamType::StringArray).description("Words to print"),
                )
                .option(
                    CommandOption::new("sep")
                        .value_type(ParamType::String)
                        .description("Separator between words"),
                )
                .option(CommandOption::new("upper").description("Uppercase the output"))
                .action(|args| {
                    let sep = args.get_str("sep").unwrap_or(" ");
                    let words: Vec<&str> = args
                        .get_list("words")
                        .unwrap_or(&[])
                        .iter()
                        .filter_map(Value::as_str)
                        .collect();
                    let mut line = words.join(sep);
                    if args.get_bool("upper").unwrap_or(false) {
                        line = line.to_uppercase();
                    }
                    println!("{}", line);
                    Ok(())
                }),
        )
        .help_topic(
            "quoting",
            "Arguments with spaces need quotes: 'like this' or \"like this\".\n\
             Backslash escapes work inside quotes; \\' puts a single quote\n\
             inside a single-quoted argument.",
        )
}

fn main() -> Result<()> {
    let commander = build_commander();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        println!("{}", commander.version_line());
        println!("Type 'help' for commands, 'exit' to leave.");
        return Repl::new(&commander).prompt("hclc> ").run();
    }

    if let Err(err) = commander.dispatch(&args) {
        if err.is_schema_error() {
            // A bug in the command declarations, not a usage mistake.
            return Err(err.into());
        }
        eprintln!("{}", err);
        eprintln!("{}", commander.usage());
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_binds_its_documented_usage() {
        let commander = build_commander();
        commander.dispatch_line("add 2 3").unwrap();
        commander.dispatch_line("add --verbose 40 2").unwrap();
        commander.dispatch_line("sum 1 2 3 4").unwrap();
        commander.dispatch_line("sum --json 1 2").unwrap();
        commander.dispatch_line("echo hello 'wide  world'").unwrap();
        commander
            .dispatch_line("echo --sep ', ' --upper a b c")
            .unwrap();
    }

    #[test]
    fn bad_input_errors_are_user_errors() {
        let commander = build_commander();
        let err = commander.dispatch_line("add two three").unwrap_err();
        assert!(!err.is_schema_error());
        let err = commander.dispatch_line("add 1").unwrap_err();
        assert!(!err.is_schema_error());
        let err = commander.dispatch_line("echo --nope").unwrap_err();
        assert!(!err.is_schema_error());
    }

    #[test]
    fn help_knows_the_topic() {
        let commander = build_commander();
        commander.dispatch_line("help quoting").unwrap();
        commander.dispatch_line("help echo").unwrap();
    }
}
