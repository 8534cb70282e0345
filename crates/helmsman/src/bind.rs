//! The argument binder.
//!
//! Maps a token sequence onto a command's declared schema in four phases:
//! schema validation, option pre-seeding, a single left-to-right scan
//! that separates option tokens from positionals, and finalization of
//! the positional cursor. The output is a fresh [`BoundArgs`] mapping
//! per call; there is no shared mutable state.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Error;
use crate::schema::{CommandOption, Parameter};
use crate::types::{ConvertError, ParamType, Value};

/// The binder's output: parameter and option names mapped to typed
/// values.
///
/// Parameter and option names share one namespace. Every declared option
/// is present (flags as `false`, value-bearing options as
/// [`Value::None`] when unset); positional parameters appear only once a
/// token was bound to them, except a trailing string-array parameter,
/// which binds even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundArgs {
    values: BTreeMap<String, Value>,
}

impl BoundArgs {
    /// Looks up a value by parameter or option name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Looks up a string value. `None` if absent or differently typed.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Looks up an integer value. `None` if absent or differently typed.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Looks up a boolean value. `None` if absent or differently typed.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Looks up a list value. `None` if absent or differently typed.
    pub fn get_list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// True if the name is present, whatever its value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates bound names and values in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }
}

impl<'a> IntoIterator for &'a BoundArgs {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Phase A: validates the declared parameter list, independent of input.
///
/// Rejects flag-typed parameters, a required parameter after an optional
/// one, and a string-array parameter that is not last.
pub(crate) fn validate_schema(params: &[Parameter]) -> Result<(), Error> {
    let mut optional_seen = false;
    for (i, param) in params.iter().enumerate() {
        if param.ty.is_flag() {
            return Err(Error::InvalidParameterType(param.name.clone()));
        }
        if param.ty.is_variadic() && i + 1 != params.len() {
            return Err(Error::StringArrayParameterOutOfPlace(param.name.clone()));
        }
        if param.optional {
            optional_seen = true;
        } else if optional_seen {
            return Err(Error::OptionalParameterOutOfPlace(param.name.clone()));
        }
    }
    Ok(())
}

fn convert_for(ty: &ParamType, name: &str, raw: &str) -> Result<Value, Error> {
    ty.convert(raw).map_err(|err| match err {
        ConvertError::Invalid(reason) => Error::Conversion {
            name: name.to_string(),
            argument: raw.to_string(),
            reason,
        },
        ConvertError::WrongShape { expected, actual } => Error::BadConversionOutput {
            name: name.to_string(),
            argument: raw.to_string(),
            expected,
            actual,
        },
    })
}

/// Binds a token sequence against a declared schema.
///
/// The schema is re-validated on every call. Option tokens (`--name`)
/// are recognized anywhere in the stream, including in the middle of a
/// variadic parameter's run; a value-bearing option consumes the very
/// next token as its raw value, whatever it looks like. Positional
/// tokens beyond the declared parameter count are silently discarded.
pub(crate) fn bind_args(
    params: &[Parameter],
    options: &[CommandOption],
    tokens: &[String],
) -> Result<BoundArgs, Error> {
    validate_schema(params)?;

    let mut bound = BoundArgs::default();
    for opt in options {
        let seed = if opt.ty.is_flag() {
            Value::Bool(false)
        } else {
            Value::None
        };
        bound.insert(opt.name.clone(), seed);
    }

    // Positional cursor and the accumulator for a trailing string-array
    // parameter.
    let mut cursor = 0usize;
    let mut rest: Vec<Value> = Vec::new();

    let mut i = 0usize;
    while i < tokens.len() {
        let token = &tokens[i];

        if let Some(name) = token.strip_prefix("--") {
            let opt = options
                .iter()
                .find(|o| o.name == name)
                .ok_or_else(|| Error::UnrecognizedOption(token.clone()))?;

            if opt.ty.is_flag() {
                bound.insert(opt.name.clone(), Value::Bool(true));
            } else {
                i += 1;
                let raw = tokens
                    .get(i)
                    .ok_or_else(|| Error::NotEnoughArgumentsForOption(opt.name.clone()))?;
                let value = convert_for(&opt.ty, &opt.name, raw)?;
                if opt.ty.is_variadic() {
                    if let Some(slot) = bound.get_mut(&opt.name) {
                        match slot {
                            Value::List(items) => items.push(value),
                            other => *other = Value::List(vec![value]),
                        }
                    }
                } else {
                    bound.insert(opt.name.clone(), value);
                }
            }
        } else if cursor < params.len() {
            let param = &params[cursor];
            if param.ty.is_variadic() {
                // Keep absorbing without advancing; options are still
                // recognized out of this stream.
                rest.push(Value::Str(token.clone()));
            } else {
                let value = convert_for(&param.ty, &param.name, token)?;
                bound.insert(param.name.clone(), value);
                cursor += 1;
            }
        }
        // else: extra positional tokens beyond the declared parameters
        // are discarded, not an error.

        i += 1;
    }

    if let Some(param) = params.get(cursor) {
        if param.ty.is_variadic() {
            bound.insert(param.name.clone(), Value::List(rest));
        } else if !param.optional {
            return Err(Error::NotEnoughArgumentsForParameter(param.name.clone()));
        }
    }

    Ok(bound)
}
