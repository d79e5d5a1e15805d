//! Plain-text rendering of match cards and the filter bar.

use std::fmt::Display;

use chrono::TimeZone;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::model::{FilterKey, Match};

const KICKOFF_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn badge_url(base_url: &str, badge: &str) -> String {
    format!("{base_url}/api/images/badge/{badge}.webp")
}

pub fn poster_url(base_url: &str, home_badge: &str, away_badge: &str) -> String {
    format!("{base_url}/api/images/poster/{home_badge}/{away_badge}.webp")
}

/// The four filter buttons, with the active one bracketed.
pub fn render_filter_bar(active: FilterKey) -> String {
    FilterKey::iter()
        .map(|f| {
            if f == active {
                format!("[{}]", f.label())
            } else {
                format!(" {} ", f.label())
            }
        })
        .join("  ")
}

/// Render one match card, with kickoff shown in `tz`.
pub fn render_card<Tz>(m: &Match, base_url: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = vec![format!("== {} ==", m.title)];

    let home = m.home_team.as_deref().unwrap_or("TBD");
    let away = m.away_team.as_deref().unwrap_or("TBD");
    lines.push(format!("{home} VS {away}"));
    if let Some(badge) = &m.home_badge {
        lines.push(format!("  {home} badge: {}", badge_url(base_url, badge)));
    }
    if let Some(badge) = &m.away_badge {
        lines.push(format!("  {away} badge: {}", badge_url(base_url, badge)));
    }

    let kickoff = m
        .kickoff()
        .map(|d| d.with_timezone(tz).format(KICKOFF_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string());
    lines.push(format!("Kickoff: {kickoff}"));

    if let (Some(_), Some(home_badge), Some(away_badge)) = (&m.poster, &m.home_badge, &m.away_badge) {
        lines.push(format!("Poster: {}", poster_url(base_url, home_badge, away_badge)));
    }

    lines.push(match m.first_stream_embed_url() {
        Some(url) => format!("Watch Now: {url}"),
        None => "No Stream".to_string(),
    });

    lines.join("\n")
}
