pub(crate) mod matches;
pub(crate) mod stream;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, StreamedError};

/// Fetch a URL and decode the response body as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    debug!(url, "fetching json");

    let response = client.get(url).send().await.map_err(|e| StreamedError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StreamedError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| StreamedError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    serde_json::from_str(&body).map_err(|e| StreamedError::Json {
        url: url.to_owned(),
        source: e,
    })
}
