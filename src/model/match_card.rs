use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use strum_macros::Display;

/// Display bucket a match is placed in. Exactly one applies per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Live,
    Upcoming,
    Popular,
    All,
}

/// Outcome of resolving the first stream source of a match.
///
/// Serializes as `streamStatus` plus a nullable `firstStreamEmbedUrl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamLink {
    /// The match listed no sources, so nothing was requested.
    NoSource,
    /// A playable embed URL.
    Resolved(String),
    /// The request failed or the response had no embed URL.
    Unavailable,
}

impl StreamLink {
    pub fn embed_url(&self) -> Option<&str> {
        match self {
            StreamLink::Resolved(url) => Some(url),
            StreamLink::NoSource | StreamLink::Unavailable => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            StreamLink::NoSource => "noSource",
            StreamLink::Resolved(_) => "resolved",
            StreamLink::Unavailable => "unavailable",
        }
    }
}

impl Serialize for StreamLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("streamStatus", self.status())?;
        map.serialize_entry("firstStreamEmbedUrl", &self.embed_url())?;
        map.end()
    }
}

/// A view-ready match, built once per fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub title: String,
    /// Kickoff as epoch milliseconds.
    pub date: i64,
    pub poster: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_badge: Option<String>,
    pub away_badge: Option<String>,
    #[serde(flatten)]
    pub stream: StreamLink,
    pub category: MatchCategory,
    pub popular: bool,
}

impl Match {
    pub fn first_stream_embed_url(&self) -> Option<&str> {
        self.stream.embed_url()
    }

    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.date)
    }

    /// Whether kickoff lies strictly after `now_ms`.
    pub fn starts_after(&self, now_ms: i64) -> bool {
        self.date > now_ms
    }
}
