//! Search query and outcome types.

use serde::{Deserialize, Serialize};

use camsearch_core::Camera;

/// One user search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub raw_text: String,
    pub extracted_keyword: String,
}

/// How the matches were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Substring match on camera name/direction.
    Direct,
    /// Radius search around a geocoded point.
    Proximity,
    None,
}

/// Why a search produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchReason {
    /// The utterance was all filler.
    NoKeyword,
    /// No direct match and the geocoder did not know the place.
    UnresolvedLocation,
}

/// Result of one search invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub match_type: MatchType,
    pub keyword: String,
    pub matches: Vec<Camera>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NoMatchReason>,
}

impl SearchOutcome {
    pub fn direct(keyword: impl Into<String>, matches: Vec<Camera>) -> Self {
        Self {
            match_type: MatchType::Direct,
            keyword: keyword.into(),
            matches,
            resolved_label: None,
            reason: None,
        }
    }

    /// `matches` may be empty: the place is known but has no cameras nearby.
    pub fn proximity(
        keyword: impl Into<String>,
        matches: Vec<Camera>,
        resolved_label: impl Into<String>,
    ) -> Self {
        Self {
            match_type: MatchType::Proximity,
            keyword: keyword.into(),
            matches,
            resolved_label: Some(resolved_label.into()),
            reason: None,
        }
    }

    pub fn none(keyword: impl Into<String>, reason: NoMatchReason) -> Self {
        Self {
            match_type: MatchType::None,
            keyword: keyword.into(),
            matches: Vec::new(),
            resolved_label: None,
            reason: Some(reason),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
