//! One-shot JSON GET with typed failures.

use serde_json::Value;
use thiserror::Error;

/// HTTP fetch failures.
///
/// `Status` covers non-2xx responses; transport-level problems arrive
/// as `Transport`, and a 2xx body that is not JSON as `Decode`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON in response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// GET `url` and decode the body as JSON.
pub async fn fetch_json(client: &reqwest::Client, url: &str) -> Result<Value, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response.json().await.map_err(FetchError::Decode)
}
