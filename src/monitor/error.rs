//! Error handling for the monitor API module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The response body was not the JSON the endpoint promises.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A non-success status whose body carried no usable error message.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend answered `success: false`.
    #[error("{message}")]
    Rejected { message: String },
}

impl MonitorError {
    pub async fn from_response(response: reqwest::Response) -> MonitorError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        MonitorError::Http { status, message }
    }

    /// Text shown to the user after `Error: `.
    pub fn user_message(&self) -> String {
        match self {
            MonitorError::Rejected { message } => message.clone(),
            MonitorError::Http { status, message } if message.trim().is_empty() => {
                format!("Server returned status {}", status)
            }
            MonitorError::Http { message, .. } => message.clone(),
            MonitorError::Reqwest(e) if e.is_timeout() => "Request timed out".to_string(),
            MonitorError::Reqwest(e) if e.is_connect() => "Could not reach server".to_string(),
            MonitorError::Reqwest(_) => "Network error".to_string(),
            MonitorError::Decode(_) => "Malformed server response".to_string(),
        }
    }
}
