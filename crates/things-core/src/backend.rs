//! Backend Seam
//!
//! The document store the gateway forwards to. Implementations can talk to a
//! hosted database or keep everything in memory.
//!
//! Everything here is single-threaded: callbacks and futures are `!Send` so a
//! browser implementation can hold JS handles.

use async_trait::async_trait;

use crate::error::{GatewayError, GatewayResult};
use crate::model::{Thing, ThingId};

/// Receives the complete ordered collection on every change
pub type SnapshotCallback = Box<dyn FnMut(Vec<Thing>)>;

/// Receives the terminal feed failure, at most once
pub type ErrorCallback = Box<dyn FnOnce(GatewayError)>;

/// Access to the `things` collection of a document store
#[async_trait(?Send)]
pub trait ThingsBackend {
    /// Open a live feed over the collection ordered by `created` ascending.
    fn subscribe(&self, on_update: SnapshotCallback, on_error: ErrorCallback) -> Subscription;

    /// Insert a document with `content` and a server-assigned `created`.
    async fn insert(&self, content: &str) -> GatewayResult<ThingId>;

    /// Replace `content` on an existing document.
    async fn replace_content(&self, id: &ThingId, content: &str) -> GatewayResult<()>;

    /// Delete an existing document. Missing ids are `NotFound`.
    async fn delete(&self, id: &ThingId) -> GatewayResult<()>;

    /// One-shot read of the ordered collection.
    async fn fetch_ordered(&self) -> GatewayResult<Vec<Thing>>;
}

/// Handle to a live feed
///
/// `unsubscribe` consumes the handle; a handle dropped without it is released
/// on drop, so the live connection is closed exactly once.
#[must_use = "dropping a Subscription closes the live feed"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Close the live feed.
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
            .field("live", &self.release.is_some())
            .finish()
    }
}
