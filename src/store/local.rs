use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use super::{Document, DocumentStore, Fields, Observer, Subscription};
use crate::error::StoreError;
use crate::io::file::{load_collections, save_collections, Collections};

struct ObserverEntry {
    id: u64,
    collection: String,
    observer: Observer,
}

#[derive(Default)]
struct Inner {
    collections: Collections,
    observers: Vec<ObserverEntry>,
    next_observer_id: u64,
    path: Option<PathBuf>,
}

impl Inner {
    /// Persist `next` (if file-backed), then make it the current contents of
    /// `collection` and push the new snapshot to its observers.
    fn commit(&mut self, collection: &str, next: Vec<Document>) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            let mut staged = self.collections.clone();
            staged.insert(collection.to_string(), next.clone());
            save_collections(&staged, path)?;
        }
        self.collections.insert(collection.to_string(), next);
        self.notify(collection);
        Ok(())
    }

    fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.collections.get(collection).cloned().unwrap_or_default()
    }

    fn notify(&self, collection: &str) {
        let snapshot = self.snapshot(collection);
        for entry in self.observers.iter().filter(|e| e.collection == collection) {
            (entry.observer)(snapshot.clone());
        }
    }
}

/// In-process document store shared by every clone of the handle.
///
/// Observers run with the store locked and must not call back into it.
#[derive(Clone, Default)]
pub struct LocalStore {
    inner: Arc<Mutex<Inner>>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store, loading existing collections if the file
    /// is present. Every later mutation is written back to `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let collections = load_collections(&path)?;
        tracing::info!(
            path = %path.display(),
            collections = collections.len(),
            "opened document store"
        );
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                collections,
                path: Some(path),
                ..Default::default()
            })),
        })
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.lock().ok().and_then(|inner| inner.path.clone())
    }

    /// Current contents of a collection.
    pub fn documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.lock()?.snapshot(collection))
    }

    /// Number of live subscriptions across all collections.
    pub fn observer_count(&self) -> usize {
        self.lock().map(|inner| inner.observers.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    fn not_found(collection: &str, id: &str) -> StoreError {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

impl DocumentStore for LocalStore {
    fn subscribe(&self, collection: &str, observer: Observer) -> Result<Subscription, StoreError> {
        let mut inner = self.lock()?;
        let id = inner.next_observer_id;
        inner.next_observer_id += 1;

        observer(inner.snapshot(collection));
        inner.observers.push(ObserverEntry {
            id,
            collection: collection.to_string(),
            observer,
        });
        tracing::debug!(collection, observer = id, "subscribed");

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut inner) = inner.lock() {
                    inner.observers.retain(|e| e.id != id);
                    tracing::debug!(observer = id, "unsubscribed");
                }
            }
        }))
    }

    fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let mut inner = self.lock()?;
        let id = Uuid::new_v4().to_string();
        let mut next = inner.snapshot(collection);
        next.push(Document {
            id: id.clone(),
            fields,
        });
        inner.commit(collection, next)?;
        Ok(id)
    }

    fn update_by_id(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let mut next = inner.snapshot(collection);
        let doc = next
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Self::not_found(collection, id))?;
        for (key, value) in fields {
            doc.fields.insert(key, value);
        }
        inner.commit(collection, next)
    }

    fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let mut next = inner.snapshot(collection);
        let before = next.len();
        next.retain(|d| d.id != id);
        if next.len() == before {
            return Err(Self::not_found(collection, id));
        }
        inner.commit(collection, next)
    }
}
