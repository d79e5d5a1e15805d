use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A match record exactly as the API serves it.
///
/// Every field is optional and decoded leniently: a field of the wrong type
/// reads as absent instead of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawMatch {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_millis")]
    pub date: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub poster: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub popular: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub teams: Option<RawTeams>,
    #[serde(deserialize_with = "lenient_sources")]
    pub sources: Option<Vec<Option<RawSource>>>,
}

impl RawMatch {
    /// Only the first listed source is ever resolved. A `null` first entry
    /// counts as no source.
    pub fn first_source(&self) -> Option<&RawSource> {
        self.sources
            .as_ref()
            .and_then(|s| s.first())
            .and_then(Option::as_ref)
    }

    pub fn home(&self) -> Option<&RawTeam> {
        self.teams.as_ref().and_then(|t| t.home.as_ref())
    }

    pub fn away(&self) -> Option<&RawTeam> {
        self.teams.as_ref().and_then(|t| t.away.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTeams {
    #[serde(deserialize_with = "lenient")]
    pub home: Option<RawTeam>,
    #[serde(deserialize_with = "lenient")]
    pub away: Option<RawTeam>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTeam {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub badge: Option<String>,
}

/// A provider + id pair pointing at one stream feed for a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSource {
    #[serde(deserialize_with = "lenient_text")]
    pub source: String,
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
}

/// One stream entry returned by `/api/stream/{source}/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawStream {
    #[serde(deserialize_with = "lenient")]
    pub embed_url: Option<String>,
}

/// The stream endpoint answers with either a bare object or a list.
///
/// List entries stay undecoded until needed, so a malformed entry after the
/// first never matters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StreamResponse {
    Many(Vec<Value>),
    One(RawStream),
}

impl StreamResponse {
    /// The embed URL of the object itself, or of the first list entry.
    pub fn first_embed_url(self) -> Option<String> {
        let first = match self {
            StreamResponse::One(stream) => Some(stream),
            StreamResponse::Many(streams) => streams
                .into_iter()
                .next()
                .and_then(|v| serde_json::from_value::<RawStream>(v).ok()),
        };
        first
            .and_then(|s| s.embed_url)
            .filter(|url| !url.trim().is_empty())
    }
}

/// Decodes `T` if the value has the right shape, otherwise reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Strings pass through, numbers are rendered as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Truthy values count as set: `1`, `"yes"`, non-empty containers.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }))
}

/// Keeps the position of every entry; entries that are not a source become `None`.
fn lenient_sources<'de, D>(deserializer: D) -> Result<Option<Vec<Option<RawSource>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .map(|e| match e {
                    Value::Object(_) => serde_json::from_value(e).ok(),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }))
}

/// Accepts integer or floating point milliseconds; anything else reads as absent.
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let json = r#"{
            "id": "arsenal-vs-chelsea-123",
            "title": "Arsenal vs Chelsea",
            "category": "football",
            "date": 1893456000000,
            "poster": "/api/images/proxy/abc.webp",
            "popular": true,
            "teams": {
                "home": { "name": "Arsenal", "badge": "ars" },
                "away": { "name": "Chelsea", "badge": "che" }
            },
            "sources": [
                { "source": "alpha", "id": "arsenal-chelsea" },
                { "source": "bravo", "id": "ars-che" }
            ]
        }"#;
        let raw: RawMatch = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id.as_deref(), Some("arsenal-vs-chelsea-123"));
        assert_eq!(raw.date, Some(1_893_456_000_000));
        assert_eq!(raw.home().and_then(|t| t.name.as_deref()), Some("Arsenal"));
        assert_eq!(raw.away().and_then(|t| t.badge.as_deref()), Some("che"));
        assert_eq!(raw.first_source().map(|s| s.source.as_str()), Some("alpha"));
    }

    #[test]
    fn test_parse_sparse_record() {
        let raw: RawMatch =
            serde_json::from_str(r#"{"title": "Mystery", "date": null, "sources": null, "extra": 1}"#)
                .unwrap();
        assert_eq!(raw.title.as_deref(), Some("Mystery"));
        assert_eq!(raw.date, None);
        assert!(raw.first_source().is_none());
        assert!(raw.home().is_none());

        let raw: RawMatch = serde_json::from_str(r#"{"date": 1700000000000.0, "sources": []}"#).unwrap();
        assert_eq!(raw.date, Some(1_700_000_000_000));
        assert!(raw.first_source().is_none());

        let raw: RawMatch = serde_json::from_str(r#"{"date": "tomorrow"}"#).unwrap();
        assert_eq!(raw.date, None);
    }

    #[test]
    fn test_stream_response_shapes() {
        let one: StreamResponse =
            serde_json::from_str(r#"{"embedUrl": "https://embed.example/one", "hd": true}"#).unwrap();
        assert_eq!(one.first_embed_url().as_deref(), Some("https://embed.example/one"));

        let many: StreamResponse = serde_json::from_str(
            r#"[{"streamNo": 1, "embedUrl": "https://embed.example/1"}, {"embedUrl": "https://embed.example/2"}]"#,
        )
        .unwrap();
        assert_eq!(many.first_embed_url().as_deref(), Some("https://embed.example/1"));

        let empty: StreamResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.first_embed_url(), None);

        let blank: StreamResponse = serde_json::from_str(r#"[{"embedUrl": ""}]"#).unwrap();
        assert_eq!(blank.first_embed_url(), None);

        assert!(serde_json::from_str::<StreamResponse>("null").is_err());
    }

    #[test]
    fn test_stream_entries_with_drifted_fields() {
        let drifted: StreamResponse = serde_json::from_str(
            r#"[{"streamNo": "1", "hd": "yes", "language": 3, "embedUrl": "https://embed.example/1"}, 5]"#,
        )
        .unwrap();
        assert_eq!(drifted.first_embed_url().as_deref(), Some("https://embed.example/1"));

        let first_broken: StreamResponse =
            serde_json::from_str(r#"[null, {"embedUrl": "https://embed.example/2"}]"#).unwrap();
        assert_eq!(first_broken.first_embed_url(), None);

        let numeric: StreamResponse = serde_json::from_str(r#"{"embedUrl": 12}"#).unwrap();
        assert_eq!(numeric.first_embed_url(), None);
    }

    #[test]
    fn test_lenient_scalars() {
        let raw: RawMatch = serde_json::from_str(
            r#"{"id": 42, "title": ["x"], "popular": 0, "poster": null,
                "teams": {"home": {"name": 7, "badge": {}}, "away": "tbd"},
                "sources": [{"source": "alpha", "id": 99}]}"#,
        )
        .unwrap();
        assert_eq!(raw.id.as_deref(), Some("42"));
        assert_eq!(raw.title, None);
        assert_eq!(raw.popular, Some(false));
        assert_eq!(raw.home().and_then(|t| t.name.as_deref()), Some("7"));
        assert_eq!(raw.home().and_then(|t| t.badge.as_deref()), None);
        assert!(raw.away().is_none());
        assert_eq!(raw.first_source().map(|s| s.id.as_str()), Some("99"));

        let raw: RawMatch = serde_json::from_str(r#"{"sources": "alpha"}"#).unwrap();
        assert!(raw.sources.is_none());
    }
}
