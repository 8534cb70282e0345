//! Parameter types and typed values.
//!
//! [`ParamType`] is a closed union over the built-in value kinds, with
//! [`CustomType`] as the extension point for application-defined
//! conversions. [`Value`] is the tagged sum the binder produces.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

/// The shape of a bound value.
///
/// Used to sanity-check a custom conversion's output against what its
/// type declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string value.
    Str,
    /// A 64-bit signed integer.
    Int,
    /// A boolean (flag) value.
    Bool,
    /// An ordered sequence of values.
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Str => "string",
            ValueKind::Int => "integer",
            ValueKind::Bool => "boolean",
            ValueKind::List => "list",
        };
        f.write_str(name)
    }
}

/// A typed argument value produced by the binder.
///
/// Serializes untagged, so a bound mapping renders as plain JSON:
/// strings, numbers, booleans, arrays, and `null` for [`Value::None`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// A boolean, used for flag options.
    Bool(bool),
    /// An ordered sequence, used for string-array parameters and options.
    List(Vec<Value>),
    /// Absent: a declared non-flag option that never appeared.
    None,
}

impl Value {
    /// The shape of this value. [`Value::None`] has no shape and reports
    /// as [`ValueKind::Str`] only for error display; it never reaches a
    /// shape check.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) | Value::None => ValueKind::Str,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Returns the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the sequence content, if this is a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for the absent value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

/// Why a conversion rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The raw text is not a valid value of this type. Bad user input.
    #[error("{0}")]
    Invalid(String),

    /// The conversion function returned a value whose shape contradicts
    /// the type's declaration. A bug in the type, not in the input.
    #[error("conversion produced a {actual} value but the type declares {expected}")]
    WrongShape {
        /// The shape the type declares.
        expected: ValueKind,
        /// The shape the conversion actually produced.
        actual: ValueKind,
    },
}

/// An application-defined parameter type.
///
/// Custom types are not registered anywhere; a [`Parameter`] or
/// [`CommandOption`] references one directly through
/// [`ParamType::Custom`].
///
/// [`Parameter`]: crate::Parameter
/// [`CommandOption`]: crate::CommandOption
///
/// # Example
///
/// ```rust
/// use helmsman::{CustomType, ParamType, Value, ValueKind, ConvertError};
///
/// let port = ParamType::custom(
///     CustomType::new("port", ValueKind::Int, |raw| {
///         raw.parse::<u16>()
///             .map(|p| Value::Int(p as i64))
///             .map_err(|_| ConvertError::Invalid("not a valid port number".into()))
///     })
///     .description("A TCP port, 0-65535"),
/// );
///
/// assert_eq!(port.convert("8080"), Ok(Value::Int(8080)));
/// assert!(port.convert("99999").is_err());
/// ```
pub struct CustomType {
    name: String,
    description: String,
    help_text: String,
    kind: ValueKind,
    convert: Box<dyn Fn(&str) -> Result<Value, ConvertError> + Send + Sync>,
}

impl CustomType {
    /// Creates a custom type with the given name, declared output shape,
    /// and conversion function.
    pub fn new<F>(name: impl Into<String>, kind: ValueKind, convert: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            help_text: String::new(),
            kind,
            convert: Box::new(convert),
        }
    }

    /// Sets the one-line description shown in type listings.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the longer help text.
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The type of a parameter or option.
///
/// The four built-ins are matched directly; custom conversions plug in
/// through [`ParamType::Custom`]. Cloning is cheap (custom types sit
/// behind an [`Arc`]).
#[derive(Debug, Clone)]
pub enum ParamType {
    /// A string; no conversion is performed.
    String,
    /// A whole number, positive or negative (`i64`).
    Integer,
    /// A boolean flag. Option-only: it takes no value token, and a
    /// parameter declared with this type is a schema error.
    Flag,
    /// The rest of the arguments, as strings. Variadic: as a parameter it
    /// absorbs all remaining positional tokens; as an option it may
    /// appear repeatedly, accumulating values.
    StringArray,
    /// An application-defined type.
    Custom(Arc<CustomType>),
}

impl ParamType {
    /// Wraps a [`CustomType`] for use in a schema.
    pub fn custom(custom: CustomType) -> Self {
        ParamType::Custom(Arc::new(custom))
    }

    /// The type's unique name, e.g. `"integer"`.
    pub fn name(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Flag => "flag",
            ParamType::StringArray => "string array",
            ParamType::Custom(c) => &c.name,
        }
    }

    /// One-line description shown in type listings.
    pub fn description(&self) -> &str {
        match self {
            ParamType::String => "A string; no conversion is performed",
            ParamType::Integer => "A whole number, positive or negative",
            ParamType::Flag => "A boolean flag; present binds true",
            ParamType::StringArray => "The rest of the arguments, as strings",
            ParamType::Custom(c) => &c.description,
        }
    }

    /// Longer help text, where the type has one.
    pub fn help_text(&self) -> String {
        match self {
            ParamType::Integer => {
                format!("Any integer from {} to {}", i64::MIN, i64::MAX)
            }
            ParamType::Custom(c) => c.help_text.clone(),
            _ => String::new(),
        }
    }

    /// The shape a bound value of this type has.
    pub fn kind(&self) -> ValueKind {
        match self {
            ParamType::String => ValueKind::Str,
            ParamType::Integer => ValueKind::Int,
            ParamType::Flag => ValueKind::Bool,
            ParamType::StringArray => ValueKind::List,
            ParamType::Custom(c) => c.kind,
        }
    }

    /// True for the accumulating string-array type.
    pub fn is_variadic(&self) -> bool {
        matches!(self, ParamType::StringArray)
    }

    /// True for the flag type.
    pub fn is_flag(&self) -> bool {
        matches!(self, ParamType::Flag)
    }

    /// Converts one raw token to a typed value.
    ///
    /// For [`ParamType::StringArray`] this converts a single element; the
    /// binder assembles the elements into a list. A flag's presence is
    /// its value, so the flag conversion is constant `true`.
    ///
    /// Custom conversions are shape-checked after the fact: a result
    /// whose [`ValueKind`] contradicts the type's declaration is
    /// [`ConvertError::WrongShape`], an internal consistency failure
    /// rather than bad input.
    pub fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        match self {
            ParamType::String | ParamType::StringArray => Ok(Value::Str(raw.to_string())),
            ParamType::Integer => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ConvertError::Invalid("not a valid integer".to_string())),
            ParamType::Flag => Ok(Value::Bool(true)),
            ParamType::Custom(c) => {
                let value = (c.convert)(raw)?;
                if value.kind() != c.kind {
                    return Err(ConvertError::WrongShape {
                        expected: c.kind,
                        actual: value.kind(),
                    });
                }
                Ok(value)
            }
        }
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamType::Custom(a), ParamType::Custom(b)) => Arc::ptr_eq(a, b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

static BUILTINS: Lazy<Vec<ParamType>> = Lazy::new(|| {
    vec![
        ParamType::String,
        ParamType::Integer,
        ParamType::Flag,
        ParamType::StringArray,
    ]
});

/// The process-wide registry of built-in parameter types, in declaration
/// order. Read-only; initialized once and shared freely.
pub fn builtin_types() -> &'static [ParamType] {
    &BUILTINS
}
