//! Remote preset-model source.
//!
//! Fetches a pre-trained model document over HTTP. The payload is parsed
//! strictly as a structured numeric mapping; it is never evaluated as
//! code. Network and status failures surface as [`Error::Transfer`] and
//! leave whatever table the caller holds untouched.

use std::time::Duration;

use crate::{Error, Result, agent::SavedModel};

/// Default request timeout for preset downloads.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads preset models from a URL.
#[derive(Debug)]
pub struct RemoteModelSource {
    client: reqwest::blocking::Client,
}

impl RemoteModelSource {
    /// Create a source with the default timeout.
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");
        Self { client }
    }

    /// Fetch and parse a model document.
    ///
    /// # Errors
    ///
    /// [`Error::Transfer`] on connection, timeout, or non-success status;
    /// [`Error::Format`] when the body is not a valid model document.
    pub fn fetch(&self, url: &str) -> Result<SavedModel> {
        let transfer = |message: String| Error::Transfer {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| transfer(e.to_string()))?;
        let response = response
            .error_for_status()
            .map_err(|e| transfer(e.to_string()))?;
        let body = response.text().map_err(|e| transfer(e.to_string()))?;

        SavedModel::from_json(&body)
    }
}

impl Default for RemoteModelSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_a_transfer_error() {
        let source = RemoteModelSource::new();
        // Nothing listens on the discard port of the loopback interface.
        let result = source.fetch("http://127.0.0.1:9/model.json");
        assert!(matches!(result, Err(Error::Transfer { .. })));
    }
}
