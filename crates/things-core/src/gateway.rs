//! Data Gateway
//!
//! The only path from the UI to the document store. Built once at startup
//! around an injected backend and handed to the view through context.

use std::cell::Cell;
use std::rc::Rc;

use crate::backend::{ErrorCallback, SnapshotCallback, Subscription, ThingsBackend};
use crate::error::{GatewayError, GatewayResult};
use crate::model::{Thing, ThingId};

/// Typed CRUD and live feed over the `things` collection
#[derive(Clone)]
pub struct Gateway {
    backend: Rc<dyn ThingsBackend>,
}

impl Gateway {
    pub fn new(backend: Rc<dyn ThingsBackend>) -> Self {
        Self { backend }
    }

    /// Open the live feed.
    ///
    /// `on_update` receives the full ordered collection on every change.
    /// `on_error` fires at most once; after it no further `on_update` calls
    /// are delivered for this subscription.
    pub fn subscribe(
        &self,
        mut on_update: impl FnMut(Vec<Thing>) + 'static,
        on_error: impl FnOnce(GatewayError) + 'static,
    ) -> Subscription {
        let failed = Rc::new(Cell::new(false));

        let closed = Rc::clone(&failed);
        let updates: SnapshotCallback = Box::new(move |things| {
            if closed.get() {
                log::debug!("dropping snapshot delivered after feed failure");
                return;
            }
            log::debug!("snapshot with {} things", things.len());
            on_update(things);
        });

        let errors: ErrorCallback = Box::new(move |err| {
            failed.set(true);
            log::error!("{err}");
            on_error(err);
        });

        log::info!("subscribing to live feed");
        self.backend.subscribe(updates, errors)
    }

    /// Insert a new thing stamped with the server clock.
    ///
    /// The result is informational; the new item shows up through the live
    /// feed, not through this return value.
    pub async fn add(&self, content: &str) -> GatewayResult<ThingId> {
        ensure_content(content)?;
        match self.backend.insert(content).await {
            Ok(id) => {
                log::info!("added thing {id}");
                Ok(id)
            }
            Err(err) => {
                log::warn!("add failed: {err}");
                Err(err)
            }
        }
    }

    /// Replace the content of an existing thing.
    pub async fn update(&self, id: &ThingId, content: &str) -> GatewayResult<()> {
        ensure_content(content)?;
        self.backend
            .replace_content(id, content)
            .await
            .map_err(|err| {
                log::warn!("update of {id} failed: {err}");
                err
            })?;
        log::info!("updated thing {id}");
        Ok(())
    }

    /// Delete a thing. Removing an id that no longer exists is `NotFound`.
    pub async fn remove(&self, id: &ThingId) -> GatewayResult<()> {
        self.backend.delete(id).await.map_err(|err| {
            log::warn!("remove of {id} failed: {err}");
            err
        })?;
        log::info!("removed thing {id}");
        Ok(())
    }

    /// One-shot read of the ordered collection.
    pub async fn list(&self) -> GatewayResult<Vec<Thing>> {
        self.backend.fetch_ordered().await
    }
}

fn ensure_content(content: &str) -> GatewayResult<()> {
    if content.is_empty() {
        return Err(GatewayError::EmptyContent);
    }
    Ok(())
}
