//! Command schema descriptors.
//!
//! [`Parameter`] and [`CommandOption`] are plain declarations owned by a
//! [`Command`](crate::Command). Shape rules (optional parameters forming a
//! suffix, a variadic parameter coming last, flags being option-only) are
//! enforced at bind time, not at construction.

use crate::types::ParamType;

/// A positional parameter in a command's ordered parameter list.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub(crate) name: String,
    pub(crate) ty: ParamType,
    pub(crate) optional: bool,
    pub(crate) description: String,
}

impl Parameter {
    /// Creates a required parameter of the given type.
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            description: String::new(),
        }
    }

    /// Marks the parameter optional. Optional parameters must form a
    /// contiguous suffix of the parameter list.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the description shown in command help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The parameter's name, unique within its command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter's type.
    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    /// True if the parameter may be omitted.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The description shown in command help.
    pub fn describe(&self) -> &str {
        &self.description
    }
}

/// A long-form option in a command's option set, written `--name` on the
/// command line.
///
/// The type defaults to [`ParamType::Flag`]: present binds `true`, absent
/// binds `false`, and no value token is consumed. Any other type consumes
/// exactly one following token; a [`ParamType::StringArray`] option may
/// appear repeatedly, each occurrence appending one converted value.
#[derive(Debug, Clone)]
pub struct CommandOption {
    pub(crate) name: String,
    pub(crate) ty: ParamType,
    pub(crate) description: String,
}

impl CommandOption {
    /// Creates a flag option with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ParamType::Flag,
            description: String::new(),
        }
    }

    /// Makes the option value-bearing with the given type.
    pub fn value_type(mut self, ty: ParamType) -> Self {
        self.ty = ty;
        self
    }

    /// Sets the description shown in command help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The option's name, without the leading dashes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The option's type.
    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    /// The description shown in command help.
    pub fn describe(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_are_required_by_default() {
        let param = Parameter::new("path", ParamType::String);
        assert!(!param.is_optional());
        assert!(Parameter::new("path", ParamType::String).optional().is_optional());
    }

    #[test]
    fn options_default_to_flag_type() {
        let opt = CommandOption::new("verbose");
        assert!(opt.ty().is_flag());
    }

    #[test]
    fn value_type_replaces_flag_default() {
        let opt = CommandOption::new("count").value_type(ParamType::Integer);
        assert_eq!(opt.ty().name(), "integer");
    }
}
