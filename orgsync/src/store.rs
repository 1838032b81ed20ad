//! The server-side document store.
//!
//! Seven independent ordered collections of JSON documents behind an interior
//! `RwLock`. The engine underneath is deliberately simple: an in-memory map,
//! optionally snapshotted to a JSON file after every successful mutation so a
//! restart picks up where it left off. Writes validate against the collection
//! registry before touching anything; side effects never leave the targeted
//! collection.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use crate::error::SyncError;
use crate::model::{Document, EntityKind};
use crate::registry;

#[derive(Debug)]
pub struct DocumentStore {
    collections: RwLock<HashMap<EntityKind, Vec<Document>>>,
    snapshot: Option<PathBuf>,
}

impl DocumentStore {
    /// An empty store with no on-disk snapshot.
    pub fn in_memory() -> Self {
        DocumentStore {
            collections: RwLock::new(HashMap::new()),
            snapshot: None,
        }
    }

    /// A store backed by a JSON snapshot file.
    ///
    /// Loads the file if it exists; every successful mutation rewrites it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let path = path.as_ref();
        let collections = if path.exists() {
            let raw = fs::read_to_string(path)
                .map_err(|err| SyncError::Store(format!("read {}: {err}", path.display())))?;
            serde_json::from_str(&raw)
                .map_err(|err| SyncError::Store(format!("parse {}: {err}", path.display())))?
        } else {
            HashMap::new()
        };
        Ok(DocumentStore {
            collections: RwLock::new(collections),
            snapshot: Some(path.to_path_buf()),
        })
    }

    /// All records of a kind, in insertion order.
    pub fn list(&self, kind: EntityKind) -> Vec<Document> {
        self.collections
            .read()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Validate, assign a fresh identifier and append.
    ///
    /// Any client-supplied `_id` is discarded; the store owns identifiers.
    pub fn create(&self, kind: EntityKind, payload: &Value) -> Result<Document, SyncError> {
        let spec = registry::find(kind);
        let normalized = (spec.normalize)(payload).map_err(SyncError::Validation)?;
        let mut doc = Document::new(normalized);
        doc.set_id(&Uuid::new_v4().to_string());

        {
            let mut collections = self.collections.write().unwrap();
            collections.entry(kind).or_default().push(doc.clone());
        }
        self.flush()?;
        log::debug!("created {} {}", kind, doc.id().unwrap_or("?"));
        Ok(doc)
    }

    /// Validate and replace the stored fields of the record matching `id`.
    ///
    /// The identifier is immutable and survives the replace.
    pub fn update(&self, kind: EntityKind, id: &str, payload: &Value) -> Result<Document, SyncError> {
        let spec = registry::find(kind);
        let normalized = (spec.normalize)(payload).map_err(SyncError::Validation)?;

        let doc = {
            let mut collections = self.collections.write().unwrap();
            let records = collections.entry(kind).or_default();
            let slot = records
                .iter_mut()
                .find(|doc| doc.id() == Some(id))
                .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
            let mut doc = Document::new(normalized);
            doc.set_id(id);
            *slot = doc.clone();
            doc
        };
        self.flush()?;
        log::debug!("updated {} {}", kind, id);
        Ok(doc)
    }

    /// Remove the record matching `id`.
    pub fn delete(&self, kind: EntityKind, id: &str) -> Result<(), SyncError> {
        {
            let mut collections = self.collections.write().unwrap();
            let records = collections.entry(kind).or_default();
            let index = records
                .iter()
                .position(|doc| doc.id() == Some(id))
                .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
            records.remove(index);
        }
        self.flush()?;
        log::debug!("deleted {} {}", kind, id);
        Ok(())
    }

    fn flush(&self) -> Result<(), SyncError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };
        let collections = self.collections.read().unwrap();
        let raw = serde_json::to_string_pretty(&*collections)
            .map_err(|err| SyncError::Store(format!("encode snapshot: {err}")))?;
        fs::write(path, raw)
            .map_err(|err| SyncError::Store(format!("write {}: {err}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_assigns_an_id_and_list_includes_it() {
        let store = DocumentStore::in_memory();
        let created = store
            .create(EntityKind::Member, &json!({"name": "A. Smith"}))
            .unwrap();
        let id = created.id().expect("store assigns an id").to_string();

        let listed = store.list(EntityKind::Member);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), Some(id.as_str()));
    }

    #[test]
    fn test_create_ignores_client_supplied_id() {
        let store = DocumentStore::in_memory();
        let created = store
            .create(EntityKind::Member, &json!({"_id": "mine", "name": "A. Smith"}))
            .unwrap();
        assert_ne!(created.id(), Some("mine"));
    }

    #[test]
    fn test_create_rejects_wrong_field_type() {
        let store = DocumentStore::in_memory();
        let err = store
            .create(EntityKind::Expense, &json!({"title": "Rent", "amount": "lots"}))
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
        assert!(store.list(EntityKind::Expense).is_empty());
    }

    #[test]
    fn test_update_replaces_fields_and_preserves_id() {
        let store = DocumentStore::in_memory();
        let created = store
            .create(
                EntityKind::Activity,
                &json!({"title": "Cleanup drive", "status": "planned"}),
            )
            .unwrap();
        let id = created.id().unwrap().to_string();

        let updated = store
            .update(EntityKind::Activity, &id, &json!({"title": "Cleanup drive", "status": "done"}))
            .unwrap();
        assert_eq!(updated.id(), Some(id.as_str()));
        assert_eq!(updated.as_value()["status"], "done");

        let listed = store.list(EntityKind::Activity);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].as_value()["status"], "done");
    }

    #[test]
    fn test_update_is_a_full_replace_of_mutable_fields() {
        let store = DocumentStore::in_memory();
        let created = store
            .create(
                EntityKind::Member,
                &json!({"name": "A. Smith", "phone": "555-0100"}),
            )
            .unwrap();
        let id = created.id().unwrap().to_string();

        // A payload without `phone` clears it; update is a replace, not a merge.
        let updated = store
            .update(EntityKind::Member, &id, &json!({"name": "A. Smith"}))
            .unwrap();
        assert!(updated.as_value().get("phone").is_none());
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let store = DocumentStore::in_memory();
        let err = store
            .update(EntityKind::WeeklyFee, "w9", &json!({"status": "paid"}))
            .unwrap_err();
        assert!(matches!(err, SyncError::NotFound(_)));
    }

    #[test]
    fn test_delete_then_delete_again_is_not_found() {
        let store = DocumentStore::in_memory();
        let created = store
            .create(EntityKind::WeeklyFee, &json!({"memberName": "A. Smith", "amount": 5.0}))
            .unwrap();
        let id = created.id().unwrap().to_string();

        store.delete(EntityKind::WeeklyFee, &id).unwrap();
        assert!(store.list(EntityKind::WeeklyFee).is_empty());

        let err = store.delete(EntityKind::WeeklyFee, &id).unwrap_err();
        assert!(matches!(err, SyncError::NotFound(_)));
    }

    #[test]
    fn test_writes_touch_only_the_targeted_collection() {
        let store = DocumentStore::in_memory();
        store
            .create(EntityKind::Donation, &json!({"donor": "Anon", "amount": 50.0}))
            .unwrap();
        let member = store
            .create(EntityKind::Member, &json!({"name": "A. Smith"}))
            .unwrap();
        store
            .delete(EntityKind::Member, member.id().unwrap())
            .unwrap();

        assert_eq!(store.list(EntityKind::Donation).len(), 1);
        assert!(store.list(EntityKind::Member).is_empty());
    }

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = DocumentStore::open(&path).unwrap();
            store
                .create(EntityKind::HeroSlide, &json!({"title": "Welcome"}))
                .unwrap();
            store
                .create(EntityKind::Donation, &json!({"donor": "Anon", "amount": 50.0}))
                .unwrap();
        }

        let reopened = DocumentStore::open(&path).unwrap();
        assert_eq!(reopened.list(EntityKind::HeroSlide).len(), 1);
        assert_eq!(reopened.list(EntityKind::Donation).len(), 1);
        assert_eq!(
            reopened.list(EntityKind::HeroSlide)[0].as_value()["title"],
            "Welcome"
        );
    }

    #[test]
    fn test_corrupt_snapshot_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let err = DocumentStore::open(&path).unwrap_err();
        assert!(matches!(err, SyncError::Store(_)));
    }
}
