//! Translation of client search filters into storage queries. Fields that
//! fail validation are dropped from the query, never rejected: an empty or
//! fully-invalid filter matches every record.

use serde::Deserialize;

use super::sanitize::{is_valid_game_name, is_valid_platform, sanitize_game_name};

/// Raw filter as received from the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilter {
    pub name: Option<String>,
    pub platform: Option<String>,
}

/// Structured predicate executed by the storage collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameQuery {
    /// Case-sensitive substring match on name; already wildcard-escaped.
    pub name_contains: Option<String>,
    /// Exact platform match.
    pub platform: Option<String>,
}

impl GameQuery {
    /// Build a query from an untrusted filter, keeping only fields that pass
    /// validation.
    pub fn from_filter(filter: &SearchFilter) -> Self {
        let name_contains = filter
            .name
            .as_deref()
            .filter(|n| is_valid_game_name(Some(*n)))
            .map(sanitize_game_name);

        let platform = filter
            .platform
            .clone()
            .filter(|p| is_valid_platform(Some(p.as_str())));

        Self {
            name_contains,
            platform,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.name_contains.is_none() && self.platform.is_none()
    }
}
