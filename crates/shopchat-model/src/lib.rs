mod error;
mod types;
mod provider;
mod http;
mod mock;

pub use error::ChatError;
pub use types::*;
pub use provider::ChatBackend;
pub use http::HttpBackend;
pub use mock::{EchoBackend, ScriptedMockBackend, ScriptedReply};

use std::time::Duration;

use shopchat_config::EndpointConfig;

/// Endpoint URL that selects the offline [`EchoBackend`].
pub const ECHO_URL: &str = "mock://echo";

/// Construct a boxed [`ChatBackend`] from configuration.
///
/// Backend selection:
/// - `mock://echo` → [`EchoBackend`] (offline, answers with the input)
/// - anything else → [`HttpBackend`]
pub fn from_config(cfg: &EndpointConfig) -> anyhow::Result<Box<dyn ChatBackend>> {
    if cfg.url == ECHO_URL {
        return Ok(Box::new(EchoBackend));
    }
    let timeout = (cfg.timeout_secs > 0).then(|| Duration::from_secs(cfg.timeout_secs));
    Ok(Box::new(HttpBackend::new(
        cfg.url.clone(),
        cfg.resolved_health_url(),
        timeout,
    )?))
}
