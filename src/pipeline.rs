//! The fetch, enrich, classify and filter cycle behind one filter selection.
//!
//! One list request is issued for the filter's feed, then every match with a
//! source gets its own stream request. Those requests run concurrently and
//! fail independently: a broken source leaves its match without a link but
//! never fails the cycle.

use std::future::Future;

use chrono::Utc;
use futures_util::future::join_all;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{
    Endpoint, FilterKey, Match, MatchCategory, RawMatch, RawSource, StreamLink,
};

/// The upstream calls the pipeline depends on.
pub trait MatchApi: Sync {
    /// Fetch the raw match list served by `endpoint`.
    fn list_matches(&self, endpoint: Endpoint) -> impl Future<Output = Result<Vec<RawMatch>>> + Send;

    /// Resolve the embed URL for a single stream source.
    fn first_embed_url(&self, source: &RawSource)
        -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Run one full cycle for `filter` against the wall clock.
pub async fn fetch_matches<A: MatchApi>(api: &A, filter: FilterKey) -> Result<Vec<Match>> {
    fetch_matches_at(api, filter, || Utc::now().timestamp_millis()).await
}

/// Run one full cycle, reading "now" from `clock`.
///
/// The clock is read twice: once before stream resolution for classification
/// and once at completion for the `upcoming` narrowing. A match that kicks off
/// in between is classified `upcoming` yet dropped by the narrowing.
#[instrument(skip(api, clock))]
pub async fn fetch_matches_at<A, C>(api: &A, filter: FilterKey, clock: C) -> Result<Vec<Match>>
where
    A: MatchApi,
    C: Fn() -> i64,
{
    let endpoint = filter.endpoint();
    let raw = api.list_matches(endpoint).await?;
    let now = clock();

    let streams = join_all(raw.iter().map(|m| resolve_stream(api, m))).await;

    let mut matches = raw
        .into_iter()
        .zip(streams)
        .map(|(raw, stream)| {
            let category = classify(
                raw.date,
                raw.popular.unwrap_or(false),
                filter,
                endpoint,
                now,
            );
            to_match(raw, stream, category)
        })
        .collect_vec();

    if filter == FilterKey::Upcoming {
        let completed_at = clock();
        matches.retain(|m| m.starts_after(completed_at));
    }

    debug!(count = matches.len(), %filter, "match cycle complete");
    Ok(matches)
}

async fn resolve_stream<A: MatchApi>(api: &A, raw: &RawMatch) -> StreamLink {
    let Some(source) = raw.first_source() else {
        return StreamLink::NoSource;
    };
    match api.first_embed_url(source).await {
        Ok(Some(url)) => StreamLink::Resolved(url),
        Ok(None) => StreamLink::Unavailable,
        Err(e) => {
            debug!(error = %e, source = %source.source, id = %source.id, "stream unavailable");
            StreamLink::Unavailable
        }
    }
}

/// Pick the single display category for a match. Earlier rules win.
pub fn classify(
    date: Option<i64>,
    popular: bool,
    filter: FilterKey,
    endpoint: Endpoint,
    now: i64,
) -> MatchCategory {
    if filter == FilterKey::Live || endpoint.is_live() {
        MatchCategory::Live
    } else if date.is_some_and(|d| d > now) {
        MatchCategory::Upcoming
    } else if popular {
        MatchCategory::Popular
    } else {
        MatchCategory::All
    }
}

/// Flatten a raw record into the view-ready shape.
pub fn to_match(raw: RawMatch, stream: StreamLink, category: MatchCategory) -> Match {
    let (home_team, home_badge) = raw
        .home()
        .map(|t| (t.name.clone(), t.badge.clone()))
        .unwrap_or_default();
    let (away_team, away_badge) = raw
        .away()
        .map(|t| (t.name.clone(), t.badge.clone()))
        .unwrap_or_default();

    Match {
        id: raw.id.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        date: raw.date.unwrap_or_default(),
        poster: raw.poster,
        home_team,
        away_team,
        home_badge,
        away_badge,
        stream,
        category,
        popular: raw.popular.unwrap_or(false),
    }
}
