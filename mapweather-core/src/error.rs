use thiserror::Error;

/// Failures talking to the upstream weather/geocoding provider.
///
/// Every variant collapses to the same generic notice at the boundary
/// (a fixed proxy error body, or an alert-style message in the session
/// layer); the detail here is for server-side logs only.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProviderError {
    /// Build a `Status` error, truncating the body so a large upstream
    /// error page never ends up in logs wholesale.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        const MAX: usize = 200;
        let body = if body.len() > MAX {
            let cut = body
                .char_indices()
                .take_while(|(i, _)| *i <= MAX)
                .last()
                .map_or(0, |(i, _)| i);
            format!("{}...", &body[..cut])
        } else {
            body.to_string()
        };

        ProviderError::Status {
            status: status.as_u16(),
            body,
        }
    }
}
