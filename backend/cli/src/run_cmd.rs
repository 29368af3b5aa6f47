use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use parley_channels::{ChannelAdapter, DiscordAdapter};
use parley_commands::build_default_dispatcher;
use parley_logging::init_logger;
use tracing::info;

use crate::wiring::{build_services, build_sink};

/// Load config, wire the dispatcher and serve until the session ends.
/// Config and registration errors end the process with a non-zero status.
pub async fn run(path: &Path) -> Result<()> {
    let started = Instant::now();

    let (config, report) = parley_config::prepare(path).await?;
    init_logger(
        config.logging.dir.as_deref().map(Path::new),
        config.logging.level(),
    );
    info!(path = %path.display(), "Loaded config");
    parley_config::enforce(&report)?;

    let guild_id = config.guild_id()?;
    let config = Arc::new(config);
    let dispatcher = build_default_dispatcher(
        Arc::clone(&config),
        build_services(&config),
        build_sink(&config),
        started,
    )?;
    info!(
        commands = dispatcher.registry().all().len(),
        "Dispatcher ready"
    );

    let adapter = DiscordAdapter::new(config.token.clone(), guild_id, Arc::new(dispatcher));
    info!(adapter = adapter.name(), "Starting Parley");
    adapter.start().await
}
