//! The client-side cache of all seven collections.
//!
//! The mirror is an explicitly owned object with a defined lifecycle: created
//! when the application starts (empty, or preloaded with the built-in
//! defaults so the first paint has content), mutated only by the sync client
//! after a confirmed server response, and dropped with the session.
//! Readers get per-kind slices, id lookup and typed decoding; the mutating
//! methods are crate-private so nothing bypasses the sync protocol.

use std::collections::HashMap;

use crate::model::{Document, EntityKind, EntityRecord};
use crate::seed;

#[derive(Debug, Clone, Default)]
pub struct Mirror {
    collections: HashMap<EntityKind, Vec<Document>>,
}

impl Mirror {
    /// An empty mirror.
    pub fn new() -> Self {
        Mirror::default()
    }

    /// A mirror preloaded with the built-in default records, so the page has
    /// content before the first fetch completes.
    pub fn preloaded() -> Self {
        let mut mirror = Mirror::new();
        for kind in EntityKind::ALL {
            mirror.collections.insert(kind, seed::defaults(kind));
        }
        mirror
    }

    /// All cached records of a kind, in fetch/insertion order.
    pub fn all(&self, kind: EntityKind) -> &[Document] {
        self.collections
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.all(kind).len()
    }

    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.all(kind).is_empty()
    }

    /// Find a cached record by identifier.
    pub fn find(&self, kind: EntityKind, id: &str) -> Option<&Document> {
        self.all(kind).iter().find(|doc| doc.id() == Some(id))
    }

    /// Typed view of a kind's records. Documents that fail to decode are
    /// skipped (the store normalized them, so in practice none do).
    pub fn records<T: EntityRecord>(&self) -> Vec<T> {
        self.all(T::KIND)
            .iter()
            .filter_map(|doc| doc.decode().ok())
            .collect()
    }

    pub(crate) fn replace_all(&mut self, kind: EntityKind, docs: Vec<Document>) {
        self.collections.insert(kind, docs);
    }

    /// Append a newly created record.
    pub(crate) fn insert(&mut self, kind: EntityKind, doc: Document) {
        self.collections.entry(kind).or_default().push(doc);
    }

    /// Replace a cached record in place by identifier. Records not currently
    /// cached are left alone rather than appended.
    pub(crate) fn replace(&mut self, kind: EntityKind, doc: Document) -> bool {
        let Some(id) = doc.id().map(str::to_string) else {
            return false;
        };
        let records = self.collections.entry(kind).or_default();
        match records.iter_mut().find(|cached| cached.id() == Some(&id)) {
            Some(slot) => {
                *slot = doc;
                true
            }
            None => false,
        }
    }

    /// Filter an identifier out of a kind's records.
    pub(crate) fn remove(&mut self, kind: EntityKind, id: &str) -> bool {
        let records = self.collections.entry(kind).or_default();
        let before = records.len();
        records.retain(|doc| doc.id() != Some(id));
        records.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str) -> Document {
        Document::new(json!({"_id": id, "name": id}))
    }

    #[test]
    fn test_new_mirror_is_empty_for_every_kind() {
        let mirror = Mirror::new();
        for kind in EntityKind::ALL {
            assert!(mirror.is_empty(kind));
        }
    }

    #[test]
    fn test_preloaded_mirror_has_defaults_for_every_kind() {
        let mirror = Mirror::preloaded();
        for kind in EntityKind::ALL {
            assert!(!mirror.is_empty(kind), "{kind} should be preloaded");
        }
    }

    #[test]
    fn test_insert_appends_in_order() {
        let mut mirror = Mirror::new();
        mirror.insert(EntityKind::Member, doc("m1"));
        mirror.insert(EntityKind::Member, doc("m2"));
        let ids: Vec<_> = mirror
            .all(EntityKind::Member)
            .iter()
            .map(|d| d.id().unwrap())
            .collect();
        assert_eq!(ids, ["m1", "m2"]);
    }

    #[test]
    fn test_replace_swaps_in_place_and_ignores_uncached_ids() {
        let mut mirror = Mirror::new();
        mirror.insert(EntityKind::Member, doc("m1"));
        mirror.insert(EntityKind::Member, doc("m2"));

        let swapped = Document::new(json!({"_id": "m1", "name": "renamed"}));
        assert!(mirror.replace(EntityKind::Member, swapped));
        assert_eq!(
            mirror.find(EntityKind::Member, "m1").unwrap().as_value()["name"],
            "renamed"
        );
        // Position is preserved.
        assert_eq!(mirror.all(EntityKind::Member)[0].id(), Some("m1"));

        assert!(!mirror.replace(EntityKind::Member, doc("m9")));
        assert_eq!(mirror.len(EntityKind::Member), 2);
    }

    #[test]
    fn test_remove_filters_by_id() {
        let mut mirror = Mirror::new();
        mirror.insert(EntityKind::WeeklyFee, doc("w3"));
        assert!(mirror.remove(EntityKind::WeeklyFee, "w3"));
        assert!(!mirror.remove(EntityKind::WeeklyFee, "w3"));
        assert!(mirror.is_empty(EntityKind::WeeklyFee));
    }

    #[test]
    fn test_typed_records_decode() {
        let mut mirror = Mirror::new();
        mirror.insert(
            EntityKind::Member,
            Document::new(json!({"_id": "m1", "name": "A. Smith", "contact": "a@x.com"})),
        );
        let members: Vec<crate::model::Member> = mirror.records();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name.as_deref(), Some("A. Smith"));
    }
}
