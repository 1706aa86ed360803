//! Text encoding of genre lists.
//!
//! Genres are kept in a single text column using array literal syntax, e.g.
//! `{Jazz,Blues}`. Items with whitespace are double-quoted (`{"Hip Hop",Soul}`).
//! An empty list is stored as an empty string, never as `{}`, although `{}` is
//! accepted when decoding.
//!
//! Items must not contain `,`, `{`, `}` or `"` - see [`is_encodable`] - otherwise
//! they would not survive the round trip.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreList(Vec<String>);

const FORBIDDEN: &[char] = &[',', '{', '}', '"'];

/// Checks that a single genre can be stored without breaking the list encoding
pub fn is_encodable(genre: &str) -> bool {
    !genre.trim().is_empty() && !genre.contains(FORBIDDEN)
}

impl GenreList {
    pub fn new(genres: Vec<String>) -> Self {
        GenreList(genres)
    }

    pub fn decode(stored: &str) -> Self {
        let inner = stored.trim();
        let inner = inner.strip_prefix('{').unwrap_or(inner);
        let inner = inner.strip_suffix('}').unwrap_or(inner);
        let genres = inner
            .split(',')
            .map(|item| {
                let item = item.trim();
                item.strip_prefix('"')
                    .and_then(|i| i.strip_suffix('"'))
                    .unwrap_or(item)
            })
            .filter(|item| !item.is_empty())
            .map(|item| item.to_string())
            .collect();
        GenreList(genres)
    }

    pub fn encode(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let items = self
            .0
            .iter()
            .map(|g| {
                if g.contains(char::is_whitespace) {
                    format!("\"{g}\"")
                } else {
                    g.clone()
                }
            })
            .collect::<Vec<_>>();
        format!("{{{}}}", items.join(","))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.0.iter().any(|g| g == genre)
    }
}

impl From<Vec<String>> for GenreList {
    fn from(value: Vec<String>) -> Self {
        GenreList(value)
    }
}
