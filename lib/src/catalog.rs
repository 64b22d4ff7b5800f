use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::record::CatalogRecord;

/// Catalog records keyed by id, in the order their ids were first inserted.
/// Inserting an id that's already present replaces the record in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, CatalogRecord)>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `record` under its own id, returning the record it replaced.
    pub fn insert(&mut self, record: CatalogRecord) -> Option<CatalogRecord> {
        match self.index.get(&record.id) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, record)),
            None => {
                self.index.insert(record.id.clone(), self.entries.len());
                self.entries.push((record.id.clone(), record));
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogRecord> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Flattens the catalog into a list for paging through: one record per
    /// id, in catalog order, each with its `id` set to its key.
    pub fn to_list(&self) -> Vec<CatalogRecord> {
        self.entries.iter()
            .map(|(id, record)| keyed(id, record.clone()))
            .collect()
    }

    pub fn into_list(self) -> Vec<CatalogRecord> {
        self.entries.into_iter()
            .map(|(id, record)| keyed(&id, record))
            .collect()
    }
}

fn keyed(id: &str, mut record: CatalogRecord) -> CatalogRecord {
    if record.front_matter.id != id {
        record.front_matter.id = id.into();
    }

    record
}

impl FromIterator<CatalogRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }

        catalog
    }
}

/// Serializes as a map from id to record, in catalog order.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Defaults, RawFrontMatter};

    fn record(stem: &str, description: &str) -> CatalogRecord {
        let defaults = Defaults {
            stem,
            file_name: stem,
            today: "2024-01-01",
            description,
        };

        CatalogRecord {
            front_matter: RawFrontMatter::default().resolve(&defaults),
            tools: vec![],
            code: String::new(),
            display_code: String::new(),
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let catalog: Catalog = ["zeta", "alpha", "mid"].into_iter()
            .map(|id| record(id, "d"))
            .collect();

        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        let list = catalog.to_list();
        assert_eq!(list.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn replacing_keeps_position_and_takes_value() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(record("a", "first")).is_none());
        catalog.insert(record("b", "b"));

        let previous = catalog.insert(record("a", "second")).unwrap();
        assert_eq!(previous.description, "first");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(catalog.get("a").unwrap().description, "second");
        assert!(catalog.contains("b") && !catalog.contains("c"));

        let pairs: Vec<_> = catalog.iter().map(|(id, r)| (id, r.description.as_str())).collect();
        assert_eq!(pairs, [("a", "second"), ("b", "b")]);
    }

    #[test]
    fn list_reasserts_keys() {
        let mut catalog = Catalog::new();
        catalog.insert(record("key", "d"));
        catalog.entries[0].1.front_matter.id = "stale".into();

        assert_eq!(catalog.to_list()[0].id, "key");
        assert_eq!(catalog.clone().into_list()[0].id, "key");
        assert_eq!(catalog.to_list().len(), catalog.len());
    }

    #[test]
    fn serializes_as_ordered_map() {
        let catalog: Catalog = ["b", "a"].into_iter().map(|id| record(id, "d")).collect();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with(r#"{"b":{"id":"b""#));
        assert!(json.find(r#""a":{"id":"a""#).unwrap() > json.find(r#""b":{"#).unwrap());
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.to_list().is_empty());
        assert_eq!(serde_json::to_string(&catalog).unwrap(), "{}");
    }
}
