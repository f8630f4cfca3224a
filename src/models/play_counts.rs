use std::collections::HashMap;
use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Aggregate play counts keyed by song identifier
///
/// Entries keep the order in which they were first seen. Ranking uses a
/// stable sort, so songs with equal counts come out in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayCountTable {
    entries: Vec<(String, i32)>,
    positions: HashMap<String, usize>,
}

impl PlayCountTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the play count for a song
    ///
    /// An existing song keeps its position and takes the new count.
    pub fn insert(&mut self, song: impl Into<String>, count: i32) {
        let song = song.into();
        match self.positions.get(&song).copied() {
            Some(i) => self.entries[i].1 = count,
            None => {
                self.positions.insert(song.clone(), self.entries.len());
                self.entries.push((song, count));
            }
        }
    }

    pub fn get(&self, song: &str) -> Option<i32> {
        self.positions.get(song).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(song, count)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().map(|(song, count)| (song.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for PlayCountTable {
    fn from_iter<I: IntoIterator<Item = (S, i32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (song, count) in iter {
            table.insert(song, count);
        }
        table
    }
}

impl Serialize for PlayCountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (song, count) in &self.entries {
            map.serialize_entry(song, count)?;
        }
        map.end()
    }
}

struct PlayCountTableVisitor;

impl<'de> Visitor<'de> for PlayCountTableVisitor {
    type Value = PlayCountTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of song identifiers to play counts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = PlayCountTable::new();
        while let Some((song, count)) = access.next_entry::<String, i32>()? {
            table.insert(song, count);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for PlayCountTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PlayCountTableVisitor)
    }
}
