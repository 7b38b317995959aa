use async_trait::async_trait;

use crate::{ChatEnvelope, ChatError, ChatRequest, HealthReport};

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short backend name for logs and the status bar.
    fn name(&self) -> &str;

    /// Endpoint this backend talks to, as shown to users.
    fn endpoint(&self) -> &str;

    /// Send one user turn and return the decoded reply envelope.
    ///
    /// An `Ok` envelope may still describe an application failure; callers
    /// check it with [`ChatEnvelope::into_reply`].
    async fn send(&self, req: &ChatRequest) -> Result<ChatEnvelope, ChatError>;

    /// Probe the service's health endpoint.
    ///
    /// The default implementation reports that no probe is available.
    async fn health(&self) -> Result<HealthReport, ChatError> {
        Err(ChatError::Unavailable(format!(
            "backend {} has no health endpoint",
            self.name()
        )))
    }
}
