//! Club name -> logo URL lookup with tiered fuzzy matching

use rustc_hash::FxHashMap;

/// Which tier of [`ClubIndex::resolve_tier`] produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    CaseInsensitive,
    Substring,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
            Self::Substring => "substring",
        })
    }
}

#[derive(Debug, Clone)]
struct ClubEntry {
    name: String,
    lower: String,
    url: String,
}

/// Club name -> URL table that remembers insertion order.
///
/// The first URL seen for a name wins; later inserts of the same name are
/// ignored even when their URL differs.
#[derive(Debug, Clone, Default)]
pub struct ClubIndex {
    entries: Vec<ClubEntry>,
    exact: FxHashMap<String, usize>,
    lower: FxHashMap<String, usize>,
}

impl ClubIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name -> url` unless `name` is already present.
    /// Returns whether the entry was added.
    pub fn insert(&mut self, name: &str, url: &str) -> bool {
        if self.exact.contains_key(name) {
            return false;
        }
        let idx = self.entries.len();
        let lower = name.to_lowercase();
        self.exact.insert(name.to_string(), idx);
        self.lower.entry(lower.clone()).or_insert(idx);
        self.entries.push(ClubEntry {
            name: name.to_string(),
            lower,
            url: url.to_string(),
        });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup only
    pub fn get(&self, name: &str) -> Option<&str> {
        self.exact.get(name).map(|&i| self.entries[i].url.as_str())
    }

    /// Club names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Find the logo URL for `target`, or `None` if no tier matches.
    pub fn resolve(&self, target: &str) -> Option<&str> {
        self.resolve_tier(target).map(|(url, _)| url)
    }

    /// Like [`resolve`](Self::resolve), also reporting the matching tier.
    ///
    /// 1. exact, case-sensitive
    /// 2. case-insensitive (first inserted name wins on collisions)
    /// 3. substring either way, scanning in insertion order
    ///
    /// Tier 3 can have several candidates; the earliest inserted one wins,
    /// so the result depends on catalog order.
    pub fn resolve_tier(&self, target: &str) -> Option<(&str, MatchTier)> {
        if let Some(&i) = self.exact.get(target) {
            return Some((self.entries[i].url.as_str(), MatchTier::Exact));
        }

        let target_lower = target.to_lowercase();
        if let Some(&i) = self.lower.get(&target_lower) {
            return Some((self.entries[i].url.as_str(), MatchTier::CaseInsensitive));
        }

        self.entries
            .iter()
            .find(|e| target_lower.contains(&e.lower) || e.lower.contains(&target_lower))
            .map(|e| (e.url.as_str(), MatchTier::Substring))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ClubIndex {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (name, url) in iter {
            index.insert(name, url);
        }
        index
    }
}
