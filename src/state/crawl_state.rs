/// Crawl state definitions for classifying fetch attempts
///
/// This module defines every classification a fetch attempt can end in.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of the outcome of one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    // ===== Good States =====
    /// Document was fetched for the first time
    New,

    /// Document was fetched and changed since the last crawl
    Modified,

    /// Document was fetched and did not change since the last crawl
    Unmodified,

    /// Document was fetched before its scheduled recrawl time
    Premature,

    // ===== Bad States =====
    /// Server reported the document does not exist (HTTP 404, 410)
    NotFound,

    /// Server answered with a status that does not yield a usable document
    BadStatus,

    /// Document was deleted since the last crawl
    Deleted,

    /// Document was rejected by a filter
    Rejected,

    /// Fetch could not complete (timeout, connection refused, TLS failure)
    Error,
}

impl CrawlState {
    /// Returns true if the document was successfully retrieved and is usable
    pub fn is_good_state(&self) -> bool {
        matches!(
            self,
            Self::New | Self::Modified | Self::Unmodified | Self::Premature
        )
    }

    /// Returns true for documents that are new or changed
    pub fn is_new_or_modified(&self) -> bool {
        matches!(self, Self::New | Self::Modified)
    }

    /// Returns true if this state is a member of `states`
    pub fn is_one_of(&self, states: &[CrawlState]) -> bool {
        states.contains(self)
    }

    /// Converts the crawl state to its stable string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Modified => "modified",
            Self::Unmodified => "unmodified",
            Self::Premature => "premature",
            Self::NotFound => "not_found",
            Self::BadStatus => "bad_status",
            Self::Deleted => "deleted",
            Self::Rejected => "rejected",
            Self::Error => "error",
        }
    }

    /// Parses a crawl state from its string representation
    ///
    /// Returns None if the string doesn't match any known state.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "modified" => Some(Self::Modified),
            "unmodified" => Some(Self::Unmodified),
            "premature" => Some(Self::Premature),
            "not_found" => Some(Self::NotFound),
            "bad_status" => Some(Self::BadStatus),
            "deleted" => Some(Self::Deleted),
            "rejected" => Some(Self::Rejected),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns all possible crawl states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::New,
            Self::Modified,
            Self::Unmodified,
            Self::Premature,
            Self::NotFound,
            Self::BadStatus,
            Self::Deleted,
            Self::Rejected,
            Self::Error,
        ]
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
