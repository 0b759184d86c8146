use std::sync::Arc;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum NotifyErr {
    #[error("Failed to build notification client: {0}")]
    Client(String),
    #[error("Network request failed: {0}")]
    Network(String),
    #[error("Server responded with a failure: {0}")]
    Server(String),
}

/// Outbound side effect fired after an annulation is written.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends the notification, returning whatever text the receiver answered with
    async fn notify(&self) -> Result<String, NotifyErr>;
}

/// Notifier used when no endpoint is configured
#[derive(Debug, Default, Clone)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self) -> Result<String, NotifyErr> {
        tracing::debug!("Notifications disabled, skipping");

        Ok(String::new())
    }
}

/// Fires `notifier` on a detached task.  The outcome is only logged; the returned
/// handle resolves to `()` whatever happens so callers cannot observe a failure.
pub fn spawn_notify(notifier: Arc<dyn Notifier>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify().await {
            Ok(text) => tracing::info!("Notification answered: {}", text),
            Err(err) => tracing::warn!("Notification failed: {}", err),
        }
    })
}
