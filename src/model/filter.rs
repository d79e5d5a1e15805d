use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The user-selected facet deciding which feed is queried and how results are narrowed.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    #[default]
    All,
    Live,
    Upcoming,
    Popular,
}

impl FilterKey {
    /// Human readable label for the filter button.
    pub fn label(self) -> &'static str {
        match self {
            FilterKey::All => "All",
            FilterKey::Live => "Live",
            FilterKey::Upcoming => "Upcoming",
            FilterKey::Popular => "Popular",
        }
    }

    /// The upstream feed queried for this filter.
    ///
    /// `Upcoming` shares the general football feed and is narrowed client-side.
    pub fn endpoint(self) -> Endpoint {
        match self {
            FilterKey::Live => Endpoint::Live,
            FilterKey::Popular => Endpoint::FootballPopular,
            FilterKey::All | FilterKey::Upcoming => Endpoint::Football,
        }
    }
}

/// One of the match list feeds exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Endpoint {
    Football,
    Live,
    FootballPopular,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Football => "/api/matches/football",
            Endpoint::Live => "/api/matches/live",
            Endpoint::FootballPopular => "/api/matches/football/popular",
        }
    }

    /// Whether every match served by this feed is already in play.
    pub fn is_live(self) -> bool {
        self.path().contains("live")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_endpoint_selection() {
        assert_eq!(FilterKey::All.endpoint(), Endpoint::Football);
        assert_eq!(FilterKey::Upcoming.endpoint(), Endpoint::Football);
        assert_eq!(FilterKey::Live.endpoint(), Endpoint::Live);
        assert_eq!(FilterKey::Popular.endpoint(), Endpoint::FootballPopular);
        assert!(Endpoint::Live.is_live());
        assert!(!Endpoint::FootballPopular.is_live());
    }

    #[test]
    fn test_parse_and_order() {
        assert_eq!(FilterKey::from_str("LIVE").unwrap(), FilterKey::Live);
        assert!(FilterKey::from_str("finished").is_err());
        let keys: Vec<String> = FilterKey::iter().map(|f| f.to_string()).collect();
        assert_eq!(keys, ["all", "live", "upcoming", "popular"]);
    }
}
