//! The golfer's bag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::club::{abbreviation, canonical_rank};

/// Set of clubs the golfer owns.
///
/// Storage order is irrelevant; encoding always writes the canonical
/// display order so stored blobs stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ClubBag {
    clubs: BTreeSet<String>,
}

impl ClubBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a club. Returns `false` if it was already in the bag.
    pub fn insert(&mut self, club: impl Into<String>) -> bool {
        self.clubs.insert(club.into())
    }

    /// Remove a club. Returns `false` if it was not in the bag.
    pub fn remove(&mut self, club: &str) -> bool {
        self.clubs.remove(club)
    }

    /// Find the club in the bag a typed name refers to.
    ///
    /// Matches the full name or its abbreviation, ignoring ASCII case.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.clubs
            .iter()
            .find(|club| club.eq_ignore_ascii_case(input))
            .or_else(|| {
                self.clubs
                    .iter()
                    .find(|club| abbreviation(club).eq_ignore_ascii_case(input))
            })
            .map(String::as_str)
    }

    pub fn contains(&self, club: &str) -> bool {
        self.clubs.contains(club)
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    /// Clubs in canonical display order.
    ///
    /// Driver first through Putter; names outside the catalog follow,
    /// alphabetically.
    pub fn sorted(&self) -> Vec<&str> {
        let mut clubs: Vec<&str> = self.clubs.iter().map(String::as_str).collect();
        // BTreeSet iteration is alphabetical and the sort is stable
        clubs.sort_by_key(|club| canonical_rank(club).unwrap_or(usize::MAX));
        clubs
    }
}

impl From<Vec<String>> for ClubBag {
    fn from(clubs: Vec<String>) -> Self {
        Self {
            clubs: clubs.into_iter().collect(),
        }
    }
}

impl From<ClubBag> for Vec<String> {
    fn from(bag: ClubBag) -> Self {
        bag.sorted().into_iter().map(str::to_string).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ClubBag {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            clubs: iter.into_iter().map(Into::into).collect(),
        }
    }
}
