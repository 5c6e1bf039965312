//! Strongly-typed wrappers for game concepts
//!
//! Newtypes keep player names, card names and counter kinds from being
//! mixed up with each other or with free-form log text.

use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Counter kind (e.g., "+1/+1", "poison", "energy")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterType(String);

impl CounterType {
    pub fn new(s: impl Into<String>) -> Self {
        CounterType(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Common counter kinds
    pub fn plus_one_plus_one() -> Self {
        CounterType("+1/+1".to_string())
    }

    pub fn minus_one_minus_one() -> Self {
        CounterType("-1/-1".to_string())
    }

    pub fn loyalty() -> Self {
        CounterType("loyalty".to_string())
    }

    pub fn poison() -> Self {
        CounterType("poison".to_string())
    }

    pub fn energy() -> Self {
        CounterType("energy".to_string())
    }
}

impl fmt::Display for CounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CounterType {
    fn from(s: String) -> Self {
        CounterType(s)
    }
}

impl From<&str> for CounterType {
    fn from(s: &str) -> Self {
        CounterType(s.to_string())
    }
}

/// Named integer counters on a card or a player
///
/// An entry disappears as soon as its value drops to zero or below, so
/// `get` of an absent kind and of a spent kind both read 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterSet(SmallVec<[(CounterType, i32); 2]>);

impl CounterSet {
    pub fn new() -> Self {
        CounterSet(SmallVec::new())
    }

    pub fn get(&self, kind: &CounterType) -> i32 {
        self.0
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// Apply a signed delta and return the new total
    pub fn add(&mut self, kind: CounterType, delta: i32) -> i32 {
        if let Some(pos) = self.0.iter().position(|(k, _)| *k == kind) {
            let total = self.0[pos].1.saturating_add(delta);
            if total <= 0 {
                self.0.remove(pos);
                0
            } else {
                self.0[pos].1 = total;
                total
            }
        } else if delta > 0 {
            self.0.push((kind, delta));
            delta
        } else {
            0
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CounterType, i32)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }
}

/// Player name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

/// Fold a card name to lowercase ASCII with single spaces
///
/// "Jötun Grunt" and "jotun  grunt" normalize to the same key.
pub fn normalize_card_name(name: &str) -> String {
    let folded = deunicode(name).to_lowercase();
    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rank how well `query` matches `candidate` (lower is better)
///
/// Exact matches beat prefixes, prefixes beat substrings, and substrings
/// beat in-order subsequences. `None` means no match at all.
pub fn fuzzy_rank(query: &str, candidate: &str) -> Option<u32> {
    let query = normalize_card_name(query);
    let candidate = normalize_card_name(candidate);

    if query.is_empty() {
        return None;
    }
    if candidate == query {
        return Some(0);
    }
    if candidate.starts_with(&query) {
        return Some(1);
    }
    if candidate.contains(&query) {
        return Some(2);
    }

    // Subsequence: every query letter in order, penalised by gaps
    let mut gaps = 0u32;
    let mut rest = candidate.chars();
    for qc in query.chars().filter(|c| *c != ' ') {
        let mut skipped = 0u32;
        loop {
            match rest.next() {
                Some(cc) if cc == qc => break,
                Some(_) => skipped += 1,
                None => return None,
            }
        }
        gaps += skipped;
    }
    Some(3 + gaps)
}
