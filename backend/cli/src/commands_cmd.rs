use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use parley_commands::build_default_dispatcher;
use parley_config::ParleyConfig;
use parley_logging::NullSink;

use crate::wiring::build_services;

/// The registration payload exactly as it is sent to the platform.
pub fn wire_json() -> Result<String> {
    let config = Arc::new(ParleyConfig::default());
    let services = build_services(&config);
    let dispatcher = build_default_dispatcher(config, services, Arc::new(NullSink), Instant::now())?;
    Ok(serde_json::to_string_pretty(&dispatcher.registry().to_wire())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn lists_builtin_commands_in_order() {
        let payload: Value = serde_json::from_str(&wire_json().unwrap()).unwrap();
        let names: Vec<&str> = payload
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["help", "ask", "grammarcheck", "translate", "info", "uptime"]
        );
        assert_eq!(payload[1]["options"][0]["name"], "question");
        assert_eq!(payload[1]["options"][0]["required"], true);
    }
}
