//! Facet filters over aggregated actions.
//!
//! Facets compose by logical AND. [`Facet::All`] disables a facet, which is
//! also what the `"all"` sentinel and the empty string parse to.

use std::str::FromStr;

use super::Attributed;
use crate::domain::{Action, ActionStatus, ArtistId, Urgency};

/// A single filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Facet<T> {
    /// Whether `value` passes this facet.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T> FromStr for Facet<T>
where
    T: FromStr,
{
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// Combined filter for the actions view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    pub urgency: Facet<Urgency>,
    pub status: Facet<ActionStatus>,
    pub artist: Facet<ArtistId>,
    /// Case-insensitive free-text search.
    pub search: Option<String>,
}

impl ActionFilter {
    #[must_use]
    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Facet::Only(urgency);
        self
    }

    #[must_use]
    pub fn status(mut self, status: ActionStatus) -> Self {
        self.status = Facet::Only(status);
        self
    }

    #[must_use]
    pub fn artist(mut self, artist: impl Into<ArtistId>) -> Self {
        self.artist = Facet::Only(artist.into());
        self
    }

    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Whether the entry passes every active facet.
    pub fn matches(&self, entry: &Attributed<Action>) -> bool {
        let action = &entry.item;
        self.urgency.matches(&action.urgency)
            && self.status.matches(&action.status)
            && self.artist.matches(&entry.artist.id)
            && self.matches_search(entry)
    }

    fn matches_search(&self, entry: &Attributed<Action>) -> bool {
        let Some(query) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if query.is_empty() {
            return true;
        }

        let needle = query.to_lowercase();
        let action = &entry.item;
        [
            action.title.as_str(),
            action.description.as_str(),
            action.category.as_str(),
            entry.artist.name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Keep only matching entries, preserving order.
    pub fn apply<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a Attributed<Action>>,
    ) -> Vec<Attributed<Action>> {
        entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect()
    }
}
