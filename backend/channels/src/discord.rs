use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use anyhow::Context as _;
use async_trait::async_trait;
use parley_commands::{
    BotProfile, CommandDispatcher, CommandError, Embed, Invocation, InvocationParam, InvokingUser, ParamValue,
    Reply, ReplyBody, Responder, Visibility,
};
use parley_core::ParleyError;
use parley_logging::truncate_message;
use serenity::all::{
    CommandDataOptionValue, CommandInteraction, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseMessage, GuildId, Http, Interaction,
};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::ChannelAdapter;

struct Handler {
    dispatcher: Arc<CommandDispatcher>,
    guild_id: GuildId,
    profile: RwLock<BotProfile>,
    registered: AtomicBool,
    fatal_tx: mpsc::Sender<ParleyError>,
}

impl Handler {
    fn profile(&self) -> BotProfile {
        self.profile.read().map(|p| p.clone()).unwrap_or_default()
    }

    /// Bulk-overwrite the guild's command set, so re-running on every
    /// `ready` never leaves duplicates behind.
    async fn register(&self, ctx: &Context, ready: &Ready) -> Result<(), ParleyError> {
        ctx.http.set_application_id(ready.application.id);

        let registry = self.dispatcher.registry();
        let payload = registry.to_wire();
        let registered = ctx
            .http
            .create_guild_commands(self.guild_id, &payload)
            .await
            .map_err(|e| ParleyError::Registration(e.to_string()))?;

        registry.verify_registered(registered.iter().map(|c| c.name.as_str()))?;

        info!(count = registered.len(), guild = %self.guild_id, "Commands registered");
        Ok(())
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        if let Ok(mut profile) = self.profile.write() {
            *profile = BotProfile {
                name: ready.user.name.clone(),
                avatar_url: Some(ready.user.face()),
            };
        }

        match self.register(&ctx, &ready).await {
            Ok(()) => self.registered.store(true, Ordering::Release),
            Err(e) => {
                error!(error = %e, "Command registration failed");
                self.registered.store(false, Ordering::Release);
                let _ = self.fatal_tx.try_send(e);
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let invocation = to_invocation(&command);
        let responder = InteractionResponder {
            http: Arc::clone(&ctx.http),
            command,
        };

        if !self.registered.load(Ordering::Acquire) {
            self.dispatcher
                .reject(invocation, CommandError::NotReady, responder)
                .await;
            return;
        }

        self.dispatcher
            .on_invocation(invocation, self.profile(), responder)
            .await;
    }
}

/// Sends the reply as the interaction's initial response.
struct InteractionResponder {
    http: Arc<Http>,
    command: CommandInteraction,
}

#[async_trait]
impl Responder for InteractionResponder {
    async fn respond(self, reply: Reply) -> anyhow::Result<()> {
        self.command
            .create_response(&self.http, CreateInteractionResponse::Message(to_message(reply)))
            .await
            .context("Failed to send interaction response")
    }
}

fn to_invocation(command: &CommandInteraction) -> Invocation {
    Invocation {
        command_name: command.data.name.clone(),
        user: InvokingUser {
            id: command.user.id.to_string(),
            tag: command.user.tag(),
        },
        parameters: command
            .data
            .options
            .iter()
            .map(|opt| InvocationParam {
                name: opt.name.clone(),
                value: to_param_value(&opt.value),
            })
            .collect(),
    }
}

fn to_param_value(value: &CommandDataOptionValue) -> ParamValue {
    match value {
        CommandDataOptionValue::String(s) => ParamValue::String(s.clone()),
        CommandDataOptionValue::Integer(i) => ParamValue::Integer(*i),
        CommandDataOptionValue::Boolean(b) => ParamValue::Boolean(*b),
        CommandDataOptionValue::Number(n) => ParamValue::Number(*n),
        other => ParamValue::Unsupported(format!("{other:?}")),
    }
}

fn to_message(reply: Reply) -> CreateInteractionResponseMessage {
    let message = CreateInteractionResponseMessage::new();
    let message = match reply.body {
        ReplyBody::Plain(text) => message.content(truncate_message(&text)),
        ReplyBody::Embed(embed) => message.embed(to_embed(embed)),
    };
    message.ephemeral(reply.visibility == Visibility::Ephemeral)
}

fn to_embed(embed: Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new();
    if let Some(title) = embed.title {
        out = out.title(title);
    }
    if let Some(description) = embed.description {
        out = out.description(description);
    }
    if let Some(color) = embed.color {
        out = out.colour(color);
    }
    for field in embed.fields {
        out = out.field(field.name, field.value, false);
    }
    if let Some(footer) = embed.footer {
        let mut builder = CreateEmbedFooter::new(footer.text);
        if let Some(url) = footer.icon_url {
            builder = builder.icon_url(url);
        }
        out = out.footer(builder);
    }
    out
}

pub struct DiscordAdapter {
    token: String,
    guild_id: GuildId,
    dispatcher: Arc<CommandDispatcher>,
}

impl DiscordAdapter {
    pub fn new(token: String, guild_id: u64, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self {
            token,
            guild_id: GuildId::new(guild_id),
            dispatcher,
        }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> anyhow::Result<()> {
        info!(guild = %self.guild_id, "Starting Discord adapter");

        let (fatal_tx, mut fatal_rx) = mpsc::channel(1);
        let handler = Handler {
            dispatcher: Arc::clone(&self.dispatcher),
            guild_id: self.guild_id,
            profile: RwLock::new(BotProfile::default()),
            registered: AtomicBool::new(false),
            fatal_tx,
        };

        let mut client = Client::builder(&self.token, GatewayIntents::GUILDS)
            .event_handler(handler)
            .await
            .context("Failed to build Discord client")?;
        let shard_manager = Arc::clone(&client.shard_manager);

        tokio::select! {
            result = client.start() => {
                if let Err(why) = result {
                    error!("Client error: {:?}", why);
                    anyhow::bail!("Discord client error: {:?}", why);
                }
                Ok(())
            }
            Some(err) = fatal_rx.recv() => {
                shard_manager.shutdown_all().await;
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_commands::{EmbedField, EmbedFooter, GENERIC_FAILURE};
    use serde_json::Value;

    fn json(message: &CreateInteractionResponseMessage) -> Value {
        serde_json::to_value(message).unwrap()
    }

    #[test]
    fn maps_supported_option_values() {
        assert_eq!(
            to_param_value(&CommandDataOptionValue::String("hola".into())),
            ParamValue::String("hola".into())
        );
        assert_eq!(
            to_param_value(&CommandDataOptionValue::Integer(3)),
            ParamValue::Integer(3)
        );
        assert_eq!(
            to_param_value(&CommandDataOptionValue::Boolean(true)),
            ParamValue::Boolean(true)
        );
    }

    #[test]
    fn other_option_kinds_are_unsupported() {
        let value = to_param_value(&CommandDataOptionValue::Unknown(99));
        assert!(matches!(value, ParamValue::Unsupported(_)));
    }

    #[test]
    fn plain_reply_becomes_public_content() {
        let message = json(&to_message(Reply::failure()));
        assert_eq!(message["content"], GENERIC_FAILURE);
        assert_ne!(message["flags"], 64);
    }

    #[test]
    fn long_content_is_truncated() {
        let message = json(&to_message(Reply::plain("x".repeat(5000))));
        assert_eq!(message["content"].as_str().unwrap().chars().count(), 2000);
    }

    #[test]
    fn ephemeral_embed_reply() {
        let embed = Embed {
            title: Some("Help - List of Commands".into()),
            description: None,
            color: Some(0x3498db),
            fields: vec![EmbedField {
                name: "/uptime".into(),
                value: "Show bot uptime".into(),
            }],
            footer: Some(EmbedFooter {
                text: "Bot by Ada".into(),
                icon_url: None,
            }),
        };
        let message = json(&to_message(Reply::embed(embed).ephemeral()));
        assert_eq!(message["flags"], 64);
        assert_eq!(message["embeds"][0]["title"], "Help - List of Commands");
        assert_eq!(message["embeds"][0]["color"], 0x3498db);
        assert_eq!(message["embeds"][0]["fields"][0]["name"], "/uptime");
        assert_eq!(message["embeds"][0]["footer"]["text"], "Bot by Ada");
    }
}
