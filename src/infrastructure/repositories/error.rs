use crate::domain::language::LanguageCode;

/// Failure talking to an upstream translation or speech provider
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{provider} rate limit exceeded, try again later")]
    RateLimited { provider: &'static str },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned an unexpected response: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} has no voice for language '{language}'")]
    UnsupportedLanguage {
        provider: &'static str,
        language: LanguageCode,
    },
}

impl UpstreamError {
    pub fn transport(provider: &'static str, err: impl std::fmt::Display) -> Self {
        UpstreamError::Transport {
            provider,
            message: err.to_string(),
        }
    }

    pub fn malformed(provider: &'static str, message: impl Into<String>) -> Self {
        UpstreamError::Malformed {
            provider,
            message: message.into(),
        }
    }

    /// Map a non-success HTTP response to an error, consuming its body
    pub async fn from_response(provider: &'static str, response: reqwest::Response) -> Self {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return UpstreamError::RateLimited { provider };
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        UpstreamError::Status {
            provider,
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        }
    }
}
