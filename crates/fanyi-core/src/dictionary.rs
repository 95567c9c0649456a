//! Bidirectional phrase dictionary built from store records.
//!
//! `PhraseBook::build` makes a single pass over raw `(english, chinese)`
//! records and produces one lookup map per direction plus the curated
//! alternatives index. Duplicate keys are last-write-wins; iteration
//! order stays the first-insertion order of keys, which downstream
//! ranking relies on for stable tie-breaking.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Translation direction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub fn other(self) -> Language {
        match self {
            Language::English => Language::Chinese,
            Language::Chinese => Language::English,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Chinese => "chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String map that remembers first-insertion key order.
///
/// Re-inserting an existing key overwrites the value in place without
/// moving the key, so `iter()` walks keys in the order they first
/// appeared in the input. Serializes as a plain JSON object in that
/// order.
#[derive(Debug, Clone, Default)]
pub struct PhraseMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, String)>,
}

impl PhraseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or overwrite. Last write wins; key order is unaffected by
    /// overwrites.
    pub fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PhraseMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = PhraseMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for PhraseMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PhraseMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PhraseMapVisitor;

        impl<'de> Visitor<'de> for PhraseMapVisitor {
            type Value = PhraseMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of phrase strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PhraseMap, A::Error> {
                // Document order becomes insertion order.
                let mut map = PhraseMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(PhraseMapVisitor)
    }
}

/// One alternative rendering of a phrase: the target-language text and a
/// gloss of what it translates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub text: String,
    pub translation: String,
}

/// English phrases that get an alternatives entry when seen in the input.
pub const ALTERNATIVE_PHRASES: [&str; 3] = ["How are you?", "Hello", "Thank you"];

pub type AlternativeMap = BTreeMap<String, Vec<Alternative>>;

/// Both lookup directions plus the alternatives index, built together.
#[derive(Debug, Clone, Default)]
pub struct PhraseBook {
    /// english → chinese
    pub forward: PhraseMap,
    /// chinese → english
    pub reverse: PhraseMap,
    /// Keyed by English phrase, only for `ALTERNATIVE_PHRASES`.
    pub alternatives: AlternativeMap,
}

impl PhraseBook {
    /// Build from raw records in one pass.
    ///
    /// Records with a blank side are skipped. A later record with a
    /// repeated key overwrites the earlier mapping (in both directions
    /// independently, so asymmetric shadowing is possible and accepted).
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut book = PhraseBook::default();
        for (english, chinese) in records {
            if english.trim().is_empty() || chinese.trim().is_empty() {
                continue;
            }
            if ALTERNATIVE_PHRASES.contains(&english.as_str()) {
                book.alternatives.insert(
                    english.clone(),
                    vec![Alternative {
                        text: chinese.clone(),
                        translation: english.clone(),
                    }],
                );
            }
            book.forward.insert(english.clone(), chinese.clone());
            book.reverse.insert(chinese, english);
        }
        book
    }

    pub fn from_pairs(pairs: &[crate::store::PhrasePair]) -> Self {
        Self::build(
            pairs
                .iter()
                .map(|p| (p.english.clone(), p.chinese.clone())),
        )
    }

    /// The lookup map translating *from* `source`.
    pub fn map_for(&self, source: Language) -> &PhraseMap {
        match source {
            Language::English => &self.forward,
            Language::Chinese => &self.reverse,
        }
    }

    /// Exact lookup of `input` in the `source` direction.
    pub fn translate(&self, source: Language, input: &str) -> Option<&str> {
        self.map_for(source).get(input)
    }

    /// Alternatives for a phrase, keyed by the literal input text.
    /// The index is keyed by English phrases, so lookups in the
    /// Chinese→English direction simply miss.
    pub fn alternatives_for(&self, phrase: &str) -> &[Alternative] {
        self.alternatives
            .get(phrase)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
