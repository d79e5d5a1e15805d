use tracing::{debug, instrument};

use crate::api;
use crate::error::Result;
use crate::model::{RawSource, StreamResponse};

pub(crate) fn stream_url(base_url: &str, source: &RawSource) -> String {
    format!("{base_url}/api/stream/{}/{}", source.source, source.id)
}

#[instrument(skip(client, source), fields(source = %source.source, id = %source.id))]
pub(crate) async fn get_stream(
    client: &reqwest::Client,
    base_url: &str,
    source: &RawSource,
) -> Result<StreamResponse> {
    let url = stream_url(base_url, source);
    let response: StreamResponse = api::get_json(client, &url).await?;
    debug!("fetched stream listing");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_url() {
        let source = RawSource {
            source: "alpha".to_string(),
            id: "arsenal-chelsea".to_string(),
        };
        assert_eq!(
            stream_url("https://streamed.su", &source),
            "https://streamed.su/api/stream/alpha/arsenal-chelsea"
        );
    }
}
