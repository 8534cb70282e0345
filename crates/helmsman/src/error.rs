//! The toolkit's error taxonomy.

use thiserror::Error;

use crate::types::ValueKind;

/// Everything that can go wrong while tokenizing, binding, or
/// dispatching.
///
/// The taxonomy is closed. Two classes hide inside it: schema-shape
/// errors are bugs in the command declaration and should be fatal, while
/// the rest is bad user input and should be reported without crashing.
/// Use [`Error::is_schema_error`] to tell them apart.
#[derive(Debug, Error)]
pub enum Error {
    /// The tokenizer reached end of input inside a quoted region.
    #[error(transparent)]
    UnmatchedQuote(#[from] helmsman_splitter::UnmatchedQuote),

    /// A declared parameter uses the flag type. Flags are option-only.
    #[error("parameter \"{0}\" may not use the flag type")]
    InvalidParameterType(String),

    /// A required parameter follows an optional one.
    #[error("required parameter \"{0}\" follows an optional parameter")]
    OptionalParameterOutOfPlace(String),

    /// A string-array parameter is not the last parameter.
    #[error("string-array parameter \"{0}\" must be the last parameter")]
    StringArrayParameterOutOfPlace(String),

    /// A required parameter was left without a value after the scan.
    #[error("no value was provided for required parameter \"{0}\"")]
    NotEnoughArgumentsForParameter(String),

    /// A value-bearing option appeared as the last token, with no value
    /// following it.
    #[error("option \"--{0}\" expects a value, but none was provided")]
    NotEnoughArgumentsForOption(String),

    /// A `--` token matched no declared option. Carries the raw token,
    /// dashes included.
    #[error("unrecognized option \"{0}\"")]
    UnrecognizedOption(String),

    /// A type's conversion function rejected the raw text.
    #[error("\"{argument}\" is not a valid value for \"{name}\": {reason}")]
    Conversion {
        /// The parameter or option being bound.
        name: String,
        /// The offending raw token.
        argument: String,
        /// The conversion's own explanation.
        reason: String,
    },

    /// A custom conversion returned a value whose shape contradicts the
    /// type's declaration. A bug in the type, not in the input.
    #[error(
        "converting \"{argument}\" for \"{name}\" produced a {actual} value, \
         but the type declares {expected}"
    )]
    BadConversionOutput {
        /// The parameter or option being bound.
        name: String,
        /// The raw token that was converted.
        argument: String,
        /// The shape the type declares.
        expected: ValueKind,
        /// The shape the conversion produced.
        actual: ValueKind,
    },

    /// Dispatch: the first token matched no registered command.
    #[error("unknown command \"{0}\"")]
    UnknownCommand(String),

    /// A command's action returned an error.
    #[error("command failed: {0}")]
    Action(#[source] anyhow::Error),
}

impl Error {
    /// True for errors that indicate a bug in the command declaration or
    /// a custom type, as opposed to bad user input. Callers should treat
    /// these as fatal rather than reporting them as usage mistakes.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameterType(_)
                | Error::OptionalParameterOutOfPlace(_)
                | Error::StringArrayParameterOutOfPlace(_)
                | Error::BadConversionOutput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_errors_are_flagged() {
        assert!(Error::InvalidParameterType("p".into()).is_schema_error());
        assert!(Error::OptionalParameterOutOfPlace("p".into()).is_schema_error());
        assert!(Error::StringArrayParameterOutOfPlace("p".into()).is_schema_error());
        assert!(Error::BadConversionOutput {
            name: "p".into(),
            argument: "x".into(),
            expected: ValueKind::Str,
            actual: ValueKind::Int,
        }
        .is_schema_error());
    }

    #[test]
    fn user_input_errors_are_not() {
        assert!(!Error::NotEnoughArgumentsForParameter("p".into()).is_schema_error());
        assert!(!Error::NotEnoughArgumentsForOption("o".into()).is_schema_error());
        assert!(!Error::UnrecognizedOption("--x".into()).is_schema_error());
        assert!(!Error::UnknownCommand("nope".into()).is_schema_error());
        let quote = helmsman_splitter::split_args("'open").unwrap_err();
        assert!(!Error::from(quote).is_schema_error());
    }

    #[test]
    fn conversion_message_names_argument_and_target() {
        let err = Error::Conversion {
            name: "count".into(),
            argument: "abc".into(),
            reason: "not a valid integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "\"abc\" is not a valid value for \"count\": not a valid integer"
        );
    }
}
