use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One discoverable piece of repair content, normalized from whatever shape
/// the provider returned. Providers never supply `relevance_score`; the
/// aggregator computes it after the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,

    pub source_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub source_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub relevance_score: i32,
}

/// The closed set of content providers. Duplicate titles across providers
/// are allowed to coexist; there is no cross-source identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    IFixit,
    Reddit,
    Youtube,
}

impl SourceId {
    pub const ALL: [Self; 3] = [Self::IFixit, Self::Reddit, Self::Youtube];

    /// Parses a request-side identifier. Unknown identifiers yield `None`
    /// and are treated as inert by [`SourceSelection`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ifixit" => Some(Self::IFixit),
            "reddit" => Some(Self::Reddit),
            "youtube" => Some(Self::Youtube),
            _ => None,
        }
    }

    /// Display name as stored in `source_name` and shown to clients.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::IFixit => "iFixit",
            Self::Reddit => "Reddit",
            Self::Youtube => "YouTube",
        }
    }
}

/// Which providers a request asked for. The `all` sentinel disables
/// filtering entirely; unrecognized identifiers match nothing.
#[derive(Debug, Clone)]
pub struct SourceSelection {
    all: bool,
    ids: HashSet<SourceId>,
}

impl SourceSelection {
    #[must_use]
    pub fn all() -> Self {
        Self {
            all: true,
            ids: HashSet::new(),
        }
    }

    #[must_use]
    pub fn from_request(sources: &[String]) -> Self {
        let all = sources.iter().any(|s| s.trim().eq_ignore_ascii_case("all"));
        let ids = sources.iter().filter_map(|s| SourceId::parse(s)).collect();
        Self { all, ids }
    }

    #[must_use]
    pub fn includes(&self, id: SourceId) -> bool {
        self.all || self.ids.contains(&id)
    }

    /// Matches a stored `source_name` (e.g. `"iFixit"`) against the
    /// selection, for cache-side filtering.
    #[must_use]
    pub fn matches_name(&self, source_name: &str) -> bool {
        if self.all {
            return true;
        }
        SourceId::parse(source_name).is_some_and(|id| self.includes(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(SourceId::parse("iFixit"), Some(SourceId::IFixit));
        assert_eq!(SourceId::parse("REDDIT"), Some(SourceId::Reddit));
        assert_eq!(SourceId::parse(" youtube "), Some(SourceId::Youtube));
        assert_eq!(SourceId::parse("dailymotion"), None);
    }

    #[test]
    fn all_sentinel_disables_filtering() {
        let sel = SourceSelection::from_request(&["all".to_string()]);
        for id in SourceId::ALL {
            assert!(sel.includes(id));
        }
        assert!(sel.matches_name("iFixit"));
    }

    #[test]
    fn unknown_identifiers_are_inert() {
        let sel = SourceSelection::from_request(&["bogus".to_string()]);
        for id in SourceId::ALL {
            assert!(!sel.includes(id));
        }
        assert!(!sel.matches_name("iFixit"));
    }

    #[test]
    fn subset_selection_filters_by_name() {
        let sel = SourceSelection::from_request(&["reddit".to_string()]);
        assert!(sel.includes(SourceId::Reddit));
        assert!(!sel.includes(SourceId::IFixit));
        assert!(sel.matches_name("Reddit"));
        assert!(!sel.matches_name("YouTube"));
    }
}
