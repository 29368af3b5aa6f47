//! Parameter validation at the dispatch boundary.
//!
//! An invocation's raw parameters are checked against the command's
//! declaration before any handler runs; handlers then pull their typed
//! arguments out of the validated map via `FromArgs`.

use std::collections::HashMap;

use crate::error::CommandError;
use crate::types::{CommandSpec, InvocationParam, ParamValue};

#[derive(Debug, Clone, Default)]
pub struct ArgMap {
    values: HashMap<String, ParamValue>,
}

impl ArgMap {
    /// Check `params` against `spec`: no undeclared or repeated names, every
    /// value of its declared type, every required parameter present.
    pub fn validate(spec: &CommandSpec, params: &[InvocationParam]) -> Result<Self, CommandError> {
        let mut values = HashMap::new();
        for param in params {
            let Some(decl) = spec.find_param(&param.name) else {
                return Err(CommandError::malformed(format!(
                    "/{} has no parameter `{}`",
                    spec.name, param.name
                )));
            };
            if param.value.param_type() != Some(decl.param_type) {
                return Err(CommandError::malformed(format!(
                    "parameter `{}` of /{} expects {:?}, got {:?}",
                    param.name, spec.name, decl.param_type, param.value
                )));
            }
            if values.insert(param.name.clone(), param.value.clone()).is_some() {
                return Err(CommandError::malformed(format!(
                    "parameter `{}` supplied twice",
                    param.name
                )));
            }
        }
        for decl in spec.parameters.iter().filter(|p| p.required) {
            if !values.contains_key(&decl.name) {
                return Err(CommandError::malformed(format!(
                    "/{} is missing required parameter `{}`",
                    spec.name, decl.name
                )));
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn string(&self, name: &str) -> Result<&str, CommandError> {
        match self.get(name) {
            Some(ParamValue::String(s)) => Ok(s),
            _ => Err(CommandError::malformed(format!("missing string parameter `{name}`"))),
        }
    }
}

/// Typed arguments for one command, extracted from a validated `ArgMap`.
pub trait FromArgs: Sized {
    fn from_args(args: &ArgMap) -> Result<Self, CommandError>;
}

/// For commands that declare no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArgs;

impl FromArgs for NoArgs {
    fn from_args(_args: &ArgMap) -> Result<Self, CommandError> {
        Ok(NoArgs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSpec;

    fn spec() -> CommandSpec {
        CommandSpec::new("translate", "Translate text")
            .param(ParameterSpec::required_string("text", "Text to translate"))
    }

    #[test]
    fn accepts_declared_parameters() {
        let args = ArgMap::validate(&spec(), &[InvocationParam::string("text", "hola")]).unwrap();
        assert_eq!(args.string("text").unwrap(), "hola");
    }

    #[test]
    fn rejects_missing_required() {
        let err = ArgMap::validate(&spec(), &[]).unwrap_err();
        assert!(err.to_string().contains("missing required parameter `text`"));
    }

    #[test]
    fn rejects_undeclared() {
        let params = [
            InvocationParam::string("text", "hola"),
            InvocationParam::string("lang", "es"),
        ];
        let err = ArgMap::validate(&spec(), &params).unwrap_err();
        assert!(err.to_string().contains("no parameter `lang`"));
    }

    #[test]
    fn rejects_wrong_type() {
        let params = [InvocationParam {
            name: "text".into(),
            value: ParamValue::Integer(7),
        }];
        assert!(ArgMap::validate(&spec(), &params).is_err());
    }

    #[test]
    fn rejects_unsupported_kinds() {
        let params = [InvocationParam {
            name: "text".into(),
            value: ParamValue::Unsupported("attachment".into()),
        }];
        assert!(ArgMap::validate(&spec(), &params).is_err());
    }

    #[test]
    fn rejects_duplicates() {
        let params = [
            InvocationParam::string("text", "a"),
            InvocationParam::string("text", "b"),
        ];
        assert!(ArgMap::validate(&spec(), &params).is_err());
    }
}
