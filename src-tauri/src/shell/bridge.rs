//! Usage: The shell's view of the host RPC surface and push channel.

use crate::domain::clock::ClockReading;
use crate::domain::power::PowerReading;
use crate::domain::timers::TimerListSnapshot;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Raw push payloads for one subscribed topic. Dropping the receiver unsubscribes.
pub type EventStream = mpsc::UnboundedReceiver<serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("{command} rejected: {message}")]
    Rejected {
        command: &'static str,
        message: String,
    },
    #[error("{command} invalid argument: {message}")]
    InvalidArgument {
        command: &'static str,
        message: String,
    },
    #[error("host unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn setup(&self) -> Result<(), HostError>;

    async fn greet(&self, name: &str) -> Result<String, HostError>;

    async fn get_clock(&self) -> Result<ClockReading, HostError>;

    /// `Ok(None)` models an empty response; callers skip rendering.
    async fn get_power(&self) -> Result<Option<PowerReading>, HostError>;

    async fn get_timer_list(&self) -> Result<TimerListSnapshot, HostError>;

    /// `None` is a seconds value that did not parse as an integer; it is forwarded as-is.
    async fn push_timer(&self, seconds: Option<i64>) -> Result<ClockReading, HostError>;

    async fn listen(&self, topic: &str) -> Result<EventStream, HostError>;
}
