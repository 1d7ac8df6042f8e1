use std::collections::HashMap;

use serde::Serialize;

/// Documentation harvested for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub section: String,
    pub short_description: String,
    /// Filled in once the keyword's bookmark is resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

/// Keyword records keyed by link target, iterated in first-insertion order.
#[derive(Debug, Default, Clone)]
pub struct KeywordIndex {
    entries: Vec<(String, KeywordRecord)>,
    positions: HashMap<String, usize>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `link`.
    ///
    /// A replaced record keeps the position of the first insertion.
    pub fn insert(&mut self, link: String, record: KeywordRecord) {
        match self.positions.get(&link) {
            Some(&idx) => self.entries[idx].1 = record,
            None => {
                self.positions.insert(link.clone(), self.entries.len());
                self.entries.push((link, record));
            }
        }
    }

    pub fn contains(&self, link: &str) -> bool {
        self.positions.contains_key(link)
    }

    pub fn get(&self, link: &str) -> Option<&KeywordRecord> {
        self.positions.get(link).map(|&idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, link: &str) -> Option<&mut KeywordRecord> {
        let idx = *self.positions.get(link)?;
        Some(&mut self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Link targets in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(link, _)| link.as_str())
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &KeywordRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    /// Drop the link keys, keeping insertion order.
    pub fn into_records(self) -> Vec<KeywordRecord> {
        self.entries.into_iter().map(|(_, record)| record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{KeywordIndex, KeywordRecord};

    fn record(keyword: &str) -> KeywordRecord {
        KeywordRecord {
            keyword: keyword.to_string(),
            section: "GRID".to_string(),
            short_description: "desc".to_string(),
            long_description: None,
        }
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut index = KeywordIndex::new();
        index.insert("a".to_string(), record("PORO"));
        index.insert("b".to_string(), record("PERMX"));
        index.insert("a".to_string(), record("NTG"));

        let keywords: Vec<_> = index.records().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["NTG", "PERMX"]);
        assert_eq!(index.links().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn long_description_is_omitted_until_set() {
        let mut index = KeywordIndex::new();
        index.insert("a".to_string(), record("PORO"));

        let json = serde_json::to_string(&index.get("a")).expect("json");
        assert!(!json.contains("long_description"));

        if let Some(rec) = index.get_mut("a") {
            rec.long_description = Some("Porosity.".to_string());
        }
        let json = serde_json::to_string(&index.into_records()).expect("json");
        assert!(json.contains(r#""long_description":"Porosity.""#));
    }
}
