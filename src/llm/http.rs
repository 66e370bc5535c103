//! Shared HTTP plumbing for the backends: client construction, sending, and mapping of
//! failed responses onto [`ProviderError`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ProviderError;

use super::router::Provider;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Body fragments the vendors use to report a rejected key, sometimes with a 400 status.
const INVALID_KEY_PHRASES: &[&str] = &[
    "API key not valid",
    "API_KEY_INVALID",
    "invalid_api_key",
    "Incorrect API key",
    "invalid x-api-key",
];

/// All three vendors report errors as `{"error": {"message": …}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub(crate) fn build_client(provider: Provider) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|source| ProviderError::ClientSetup { provider, source })
}

/// Send `request` and decode a successful body as `T`.
///
/// Non-2xx responses go through [`classify_failure`]; a 2xx body that does not decode
/// is an [`ProviderError::EmptyResponse`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: Provider,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    // Request URLs may carry credentials, so they stay out of error text.
    let response = request.send().await.map_err(|e| ProviderError::Transport {
        provider,
        message: e.without_url().to_string(),
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| ProviderError::Transport {
        provider,
        message: format!("Failed to read response body: {}", e.without_url()),
    })?;
    debug!("{} responded with {} ({} bytes)", provider, status, body.len());

    if !status.is_success() {
        return Err(classify_failure(provider, status, &body));
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::EmptyResponse {
        provider,
        detail: e.to_string(),
    })
}

/// Map a failed response to a credential error or a transport error.
pub(crate) fn classify_failure(provider: Provider, status: StatusCode, body: &str) -> ProviderError {
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || INVALID_KEY_PHRASES.iter().any(|phrase| body.contains(phrase))
    {
        return ProviderError::InvalidCredential { provider };
    }

    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    };

    ProviderError::Transport {
        provider,
        message: format!("HTTP {}: {}", status.as_u16(), message),
    }
}
