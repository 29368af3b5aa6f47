//! Slash command types: declarations, invocations and replies.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Boolean,
    Number,
}

impl ParamType {
    /// Application-command option type code used in the registration payload.
    pub fn wire_code(self) -> u8 {
        match self {
            ParamType::String => 3,
            ParamType::Integer => 4,
            ParamType::Boolean => 5,
            ParamType::Number => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
}

impl ParameterSpec {
    pub fn required_string(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            param_type: ParamType::String,
            required: true,
        }
    }
}

/// A command as declared to the platform. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Unique lowercase name (e.g. "ask").
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl CommandSpec {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters: vec![],
        }
    }

    pub fn param(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn find_param(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Usage line shown by `/help`, e.g. `/ask [question]`.
    pub fn usage(&self) -> String {
        let mut usage = format!("/{}", self.name);
        for p in &self.parameters {
            usage.push_str(&format!(" [{}]", p.name));
        }
        usage
    }
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// A supplied parameter value. Serialized untagged for the interaction log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Number(f64),
    /// A value kind this bot never declares (user, channel, attachment...).
    Unsupported(String),
}

impl ParamValue {
    pub fn param_type(&self) -> Option<ParamType> {
        match self {
            ParamValue::String(_) => Some(ParamType::String),
            ParamValue::Integer(_) => Some(ParamType::Integer),
            ParamValue::Boolean(_) => Some(ParamType::Boolean),
            ParamValue::Number(_) => Some(ParamType::Number),
            ParamValue::Unsupported(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationParam {
    pub name: String,
    pub value: ParamValue,
}

impl InvocationParam {
    pub fn string(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: ParamValue::String(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokingUser {
    pub id: String,
    /// Display tag, e.g. `ada` or `ada#1234`.
    pub tag: String,
}

/// One user-triggered command event, as received from the platform.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command_name: String,
    pub user: InvokingUser,
    /// Supplied values in platform order.
    pub parameters: Vec<InvocationParam>,
}

/// The bot's own identity on the platform, learned when the session is ready.
#[derive(Debug, Clone, Default)]
pub struct BotProfile {
    pub name: String,
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Reply
// ---------------------------------------------------------------------------

/// Sent instead of the handler's reply whenever handling fails.
pub const GENERIC_FAILURE: &str = "An error occurred while processing your command.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    /// Only visible to the invoker.
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    Plain(String),
    Embed(Embed),
}

/// The single response sent back for an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: ReplyBody,
    pub visibility: Visibility,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Plain(text.into()),
            visibility: Visibility::Public,
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            visibility: Visibility::Public,
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.visibility = Visibility::Ephemeral;
        self
    }

    pub fn failure() -> Self {
        Self::plain(GENERIC_FAILURE)
    }

    /// Text content for plain replies.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Plain(text) => Some(text),
            ReplyBody::Embed(_) => None,
        }
    }
}
