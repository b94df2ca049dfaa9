use std::net::SocketAddr;

use thiserror::Error;

/// Startup and runtime failures of the Quire binary.
///
/// Database and socket errors are kept as sources so the whole chain reaches
/// the error report.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("could not connect to the database")]
    Connect(#[source] sqlx::Error),
    #[error("database migrations failed")]
    Migrate(#[source] sqlx::Error),
    #[error("could not listen on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("http server stopped unexpectedly")]
    Serve(#[source] std::io::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl InfraError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    /// Whether the failure comes from the storage backend rather than from
    /// this process.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Migrate(_))
    }
}
