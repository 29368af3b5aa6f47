//! Command registry: the ordered, validated set of declared commands and
//! its compilation to the platform's registration payload.

use std::collections::HashSet;
use std::sync::LazyLock;

use parley_core::ParleyError;
use regex::Regex;
use serde::Serialize;

use crate::types::CommandSpec;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-_a-z0-9]{1,32}$").unwrap());

const MAX_DESCRIPTION_CHARS: usize = 100;
const MAX_OPTIONS: usize = 25;

/// Application-command type for chat-input (slash) commands.
const CHAT_INPUT: u8 = 1;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct WireCommand<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(rename = "type")]
    pub kind: u8,
    pub options: Vec<WireOption<'a>>,
}

#[derive(Debug, Serialize)]
pub struct WireOption<'a> {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: &'a str,
    pub description: &'a str,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Build a registry, rejecting anything the platform would refuse.
    pub fn new(commands: Vec<CommandSpec>) -> Result<Self, ParleyError> {
        let mut seen = HashSet::new();
        for spec in &commands {
            validate_spec(spec)?;
            if !seen.insert(spec.name.as_str()) {
                return Err(ParleyError::Registration(format!(
                    "duplicate command name `{}`",
                    spec.name
                )));
            }
        }
        Ok(Self { commands })
    }

    /// Every command, in registration order.
    pub fn all(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Check the names the platform reports after a bulk overwrite against
    /// this registry. Any missing, extra or repeated name is an error.
    pub fn verify_registered<'a>(
        &self,
        registered: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ParleyError> {
        let mut expected: Vec<&str> = self.commands.iter().map(|c| c.name.as_str()).collect();
        let mut actual: Vec<&str> = registered.into_iter().collect();
        expected.sort_unstable();
        actual.sort_unstable();
        if expected != actual {
            return Err(ParleyError::Registration(format!(
                "platform registered {actual:?}, expected {expected:?}"
            )));
        }
        Ok(())
    }

    /// The batch registration payload for the whole command set.
    pub fn to_wire(&self) -> Vec<WireCommand<'_>> {
        self.commands
            .iter()
            .map(|spec| WireCommand {
                name: &spec.name,
                description: &spec.description,
                kind: CHAT_INPUT,
                options: spec
                    .parameters
                    .iter()
                    .map(|p| WireOption {
                        kind: p.param_type.wire_code(),
                        name: &p.name,
                        description: &p.description,
                        required: p.required,
                    })
                    .collect(),
            })
            .collect()
    }
}

fn validate_spec(spec: &CommandSpec) -> Result<(), ParleyError> {
    let fail = |msg: String| Err(ParleyError::Registration(format!("/{}: {msg}", spec.name)));

    if !NAME_RE.is_match(&spec.name) {
        return fail("command name must be 1-32 lowercase letters, digits, `-` or `_`".into());
    }
    check_description(&spec.description).or_else(|msg| fail(msg))?;
    if spec.parameters.len() > MAX_OPTIONS {
        return fail(format!("at most {MAX_OPTIONS} parameters are allowed"));
    }

    let mut names = HashSet::new();
    let mut seen_optional = false;
    for p in &spec.parameters {
        if !NAME_RE.is_match(&p.name) {
            return fail(format!("invalid parameter name `{}`", p.name));
        }
        if !names.insert(p.name.as_str()) {
            return fail(format!("duplicate parameter `{}`", p.name));
        }
        check_description(&p.description).or_else(|msg| fail(msg))?;
        if p.required && seen_optional {
            return fail(format!("required parameter `{}` follows an optional one", p.name));
        }
        seen_optional |= !p.required;
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), String> {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_CHARS {
        return Err(format!(
            "description must be 1-{MAX_DESCRIPTION_CHARS} characters, got {len}"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParamType, ParameterSpec};
    use serde_json::json;

    fn ask() -> CommandSpec {
        CommandSpec::new("ask", "Ask the assistant a question")
            .param(ParameterSpec::required_string("question", "Your question"))
    }

    #[test]
    fn compiles_to_platform_payload() {
        let registry = CommandRegistry::new(vec![CommandSpec::new("help", "Show all commands"), ask()])
            .unwrap();
        let wire = serde_json::to_value(registry.to_wire()).unwrap();
        assert_eq!(
            wire,
            json!([
                {"name": "help", "description": "Show all commands", "type": 1, "options": []},
                {"name": "ask", "description": "Ask the assistant a question", "type": 1, "options": [
                    {"type": 3, "name": "question", "description": "Your question", "required": true}
                ]}
            ])
        );
    }

    fn uptime() -> CommandSpec {
        CommandSpec::new("uptime", "Show bot uptime")
    }

    #[test]
    fn registered_set_matches_in_any_order() {
        let registry = CommandRegistry::new(vec![ask(), uptime()]).unwrap();
        registry.verify_registered(["uptime", "ask"]).unwrap();
    }

    #[test]
    fn missing_registered_command_is_an_error() {
        let registry = CommandRegistry::new(vec![ask(), uptime()]).unwrap();
        let err = registry.verify_registered(["ask"]).unwrap_err();
        assert!(matches!(err, ParleyError::Registration(_)));
    }

    #[test]
    fn duplicate_or_extra_registered_command_is_an_error() {
        let registry = CommandRegistry::new(vec![ask(), uptime()]).unwrap();
        assert!(matches!(
            registry.verify_registered(["ask", "uptime", "ask"]),
            Err(ParleyError::Registration(_))
        ));
        assert!(matches!(
            registry.verify_registered(["ask", "uptime", "stale"]),
            Err(ParleyError::Registration(_))
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = CommandRegistry::new(vec![ask(), ask()]).unwrap_err();
        assert!(matches!(err, ParleyError::Registration(_)));
        assert!(err.to_string().contains("duplicate command name"));
    }

    #[test]
    fn rejects_uppercase_names() {
        let err = CommandRegistry::new(vec![CommandSpec::new("Ask", "x")]).unwrap_err();
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn rejects_empty_description() {
        assert!(CommandRegistry::new(vec![CommandSpec::new("ask", "")]).is_err());
    }

    #[test]
    fn rejects_required_after_optional() {
        let spec = CommandSpec::new("pair", "Two params")
            .param(ParameterSpec {
                name: "first".into(),
                description: "optional".into(),
                param_type: ParamType::Integer,
                required: false,
            })
            .param(ParameterSpec::required_string("second", "required"));
        let err = CommandRegistry::new(vec![spec]).unwrap_err();
        assert!(err.to_string().contains("follows an optional"));
    }

    #[test]
    fn find_and_order() {
        let registry =
            CommandRegistry::new(vec![ask(), CommandSpec::new("uptime", "Show bot uptime")]).unwrap();
        assert!(registry.find("uptime").is_some());
        assert!(registry.find("nope").is_none());
        let names: Vec<_> = registry.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["ask", "uptime"]);
    }
}
