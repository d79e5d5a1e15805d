use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::api;
use crate::error::Result;
use crate::model::{Endpoint, RawMatch};

#[instrument(skip(client))]
pub(crate) async fn get_matches(
    client: &reqwest::Client,
    base_url: &str,
    endpoint: Endpoint,
) -> Result<Vec<RawMatch>> {
    let url = format!("{base_url}{}", endpoint.path());
    let records: Vec<Value> = api::get_json(client, &url).await?;
    let matches = decode_matches(records);
    debug!(count = matches.len(), %endpoint, "fetched match list");
    Ok(matches)
}

/// Decode each record on its own so one bad entry cannot sink the list.
pub(crate) fn decode_matches(records: Vec<Value>) -> Vec<RawMatch> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(error = %e, index, "skipping unparsable match record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(json: &str) -> Vec<Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_off_type_fields_keep_record() {
        let matches = decode_matches(records(
            r#"[
                {"id": 42, "title": "Numeric id", "popular": 1},
                {"id": "ok", "title": "Fine", "teams": "tbd", "poster": false}
            ]"#,
        ));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id.as_deref(), Some("42"));
        assert_eq!(matches[0].popular, Some(true));
        assert_eq!(matches[1].id.as_deref(), Some("ok"));
        assert!(matches[1].teams.is_none());
        assert!(matches[1].poster.is_none());
    }

    #[test]
    fn test_non_object_records_are_skipped() {
        let matches = decode_matches(records(r#"[null, 7, "x", {"id": "ok"}]"#));
        let ids: Vec<_> = matches.iter().map(|m| m.id.as_deref()).collect();
        assert_eq!(ids, [Some("ok")]);
    }

    #[test]
    fn test_null_source_entry_keeps_record() {
        let matches = decode_matches(records(
            r#"[
                {"id": "a", "sources": [null, {"source": "alpha", "id": "a"}]},
                {"id": "ok"}
            ]"#,
        ));
        assert_eq!(matches.len(), 2);
        assert!(matches[0].first_source().is_none());
        assert_eq!(matches[0].sources.as_ref().map(Vec::len), Some(2));
    }
}
