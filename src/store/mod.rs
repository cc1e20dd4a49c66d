//! Document store abstraction: live collection subscriptions plus
//! insert / update-by-id / delete-by-id.

pub mod local;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use local::LocalStore;

/// Named field values of a document.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A document as delivered in a snapshot: its store-assigned id plus fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Receives the full document set of a collection on every change.
pub type Observer = Box<dyn Fn(Vec<Document>) + Send + Sync>;

/// A collection store shared by any number of clients.
pub trait DocumentStore: Send + Sync {
    /// Watch a collection. The observer receives the current snapshot and
    /// then a fresh snapshot after every change, until the returned
    /// subscription is released.
    fn subscribe(&self, collection: &str, observer: Observer) -> Result<Subscription, StoreError>;

    /// Add a document and return its newly assigned id.
    fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Set the given fields on an existing document.
    fn update_by_id(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Handle to a live subscription.
///
/// The release callback runs exactly once: on [`Subscription::unsubscribe`]
/// or on drop, whichever comes first.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
