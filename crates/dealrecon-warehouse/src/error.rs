use thiserror::Error;

/// Errors returned by the warehouse query client.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The warehouse signalled it is temporarily unavailable (HTTP 503).
    /// This is the only retried condition.
    #[error("warehouse temporarily unavailable (HTTP {status})")]
    Unavailable { status: u16 },

    /// The warehouse returned `"status": "ERROR"` with a message.
    #[error("warehouse query error: {0}")]
    Query(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
