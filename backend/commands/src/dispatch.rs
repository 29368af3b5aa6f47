//! Command dispatch: route invocations to handlers inside a failure
//! boundary and produce exactly one reply per invocation.
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use parley_core::ParleyError;
use parley_logging::{LogEvent, LogSink};
use tracing::{error, info, warn};

use crate::args::{ArgMap, FromArgs};
use crate::error::CommandError;
use crate::registry::CommandRegistry;
use crate::types::{BotProfile, CommandSpec, Invocation, InvokingUser, Reply};

// ---------------------------------------------------------------------------
// Handler traits
// ---------------------------------------------------------------------------

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub user: InvokingUser,
    pub bot: BotProfile,
    pub registry: Arc<CommandRegistry>,
}

/// Object-safe handler as stored by the dispatcher.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn spec(&self) -> CommandSpec;

    async fn handle(&self, ctx: &CommandContext, args: &ArgMap) -> Result<Reply, CommandError>;
}

/// A command with its own typed arguments. Implementors get `CommandHandler` for free.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    type Args: FromArgs + Send;

    fn definition(&self) -> CommandSpec;

    async fn run(&self, ctx: &CommandContext, args: Self::Args) -> Result<Reply>;
}

#[async_trait]
impl<C: SlashCommand> CommandHandler for C {
    fn spec(&self) -> CommandSpec {
        self.definition()
    }

    async fn handle(&self, ctx: &CommandContext, args: &ArgMap) -> Result<Reply, CommandError> {
        let args = C::Args::from_args(args)?;
        self.run(ctx, args).await.map_err(CommandError::Handler)
    }
}

/// Delivers the reply for one invocation. Consumed on use, so an
/// invocation can never be answered twice.
#[async_trait]
pub trait Responder: Send {
    async fn respond(self, reply: Reply) -> Result<()>;
}

/// How an invocation was resolved. The reply has been handed to the
/// responder in both cases.
#[derive(Debug)]
pub enum DispatchOutcome {
    Handled,
    Failed(CommandError),
}

impl DispatchOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    sink: Arc<dyn LogSink>,
}

impl CommandDispatcher {
    /// Build the registry and the name → handler map from the same list, so
    /// every registered command is dispatchable and vice versa.
    pub fn new(
        handlers: Vec<Arc<dyn CommandHandler>>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self, ParleyError> {
        let specs: Vec<CommandSpec> = handlers.iter().map(|h| h.spec()).collect();
        let handlers = specs.iter().map(|s| s.name.clone()).zip(handlers).collect();
        let registry = Arc::new(CommandRegistry::new(specs)?);
        Ok(Self {
            registry,
            handlers,
            sink,
        })
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Handle one invocation end to end and send its single reply.
    pub async fn on_invocation<R: Responder>(
        &self,
        inv: Invocation,
        bot: BotProfile,
        responder: R,
    ) -> DispatchOutcome {
        let (reply, outcome) = match self.dispatch(&inv, bot).await {
            Ok(reply) => (reply, DispatchOutcome::Handled),
            Err(err) => (Reply::failure(), DispatchOutcome::Failed(err)),
        };
        send(&inv, reply, responder).await;
        outcome
    }

    /// Refuse `inv` without running its handler. It is logged like any
    /// other failed invocation and answered with the generic failure reply.
    pub async fn reject<R: Responder>(
        &self,
        inv: Invocation,
        reason: CommandError,
        responder: R,
    ) -> DispatchOutcome {
        self.sink.emit(LogEvent::interaction(interaction_log_text(&inv)));
        warn!(command = %inv.command_name, reason = %reason, "Invocation rejected");
        self.sink.emit(LogEvent::error(error_log_text(&inv.command_name, &reason)));
        send(&inv, Reply::failure(), responder).await;
        DispatchOutcome::Failed(reason)
    }

    /// Run the handler for `inv`. Every failure is logged to the error
    /// destination before being returned.
    pub async fn dispatch(&self, inv: &Invocation, bot: BotProfile) -> Result<Reply, CommandError> {
        self.sink.emit(LogEvent::interaction(interaction_log_text(inv)));

        let result = self.run_handler(inv, bot).await;
        if let Err(err) = &result {
            error!(command = %inv.command_name, error = %err, "Command failed");
            self.sink.emit(LogEvent::error(error_log_text(&inv.command_name, err)));
        }
        result
    }

    async fn run_handler(&self, inv: &Invocation, bot: BotProfile) -> Result<Reply, CommandError> {
        let (Some(handler), Some(spec)) = (
            self.handlers.get(&inv.command_name),
            self.registry.find(&inv.command_name),
        ) else {
            return Err(CommandError::malformed(format!(
                "no handler registered for /{}",
                inv.command_name
            )));
        };

        let args = ArgMap::validate(spec, &inv.parameters)?;
        let ctx = CommandContext {
            user: inv.user.clone(),
            bot,
            registry: Arc::clone(&self.registry),
        };

        info!(command = %inv.command_name, user = %inv.user.id, "Dispatching command");
        match AssertUnwindSafe(handler.handle(&ctx, &args)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(CommandError::Panicked(panic_message(panic.as_ref()))),
        }
    }
}

async fn send<R: Responder>(inv: &Invocation, reply: Reply, responder: R) {
    if let Err(e) = responder.respond(reply).await {
        warn!(command = %inv.command_name, error = %e, "Failed to deliver reply");
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Interaction log line: who ran what, with which values.
pub fn interaction_log_text(inv: &Invocation) -> String {
    let options = serde_json::to_string(&inv.parameters).unwrap_or_else(|_| "[]".to_string());
    format!(
        "**User Interaction Log**\nUser: {} (ID: {})\nCommand: /{}\nOptions: {}",
        inv.user.tag, inv.user.id, inv.command_name, options
    )
}

pub fn error_log_text(command_name: &str, err: &CommandError) -> String {
    format!("**Error Log**\nCommand: /{command_name}\nError: {err}")
}
