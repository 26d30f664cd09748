//! In-Memory Backend
//!
//! A document store living in process memory. Behaves like the hosted one as
//! far as the gateway can tell: ids and timestamps come from the "server",
//! every mutation pushes the full ordered collection to each live feed, and
//! faults can be injected.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::backend::{ErrorCallback, SnapshotCallback, Subscription, ThingsBackend};
use crate::error::{GatewayError, GatewayResult};
use crate::model::{snapshot_order, Thing, ThingId};

/// Hands out strictly increasing timestamps
#[derive(Debug, Default)]
struct ServerClock {
    last: Option<DateTime<Utc>>,
}

impl ServerClock {
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

struct Listener {
    key: u64,
    on_update: Rc<RefCell<SnapshotCallback>>,
    on_error: Option<ErrorCallback>,
}

#[derive(Default)]
struct Collection {
    docs: HashMap<ThingId, Thing>,
    next_doc: u64,
    clock: ServerClock,
    listeners: Vec<Listener>,
    next_listener: u64,
    write_failure: Option<GatewayError>,
}

impl Collection {
    fn ordered(&self) -> Vec<Thing> {
        let mut things: Vec<Thing> = self.docs.values().cloned().collect();
        things.sort_by(snapshot_order);
        things
    }

    fn check_writable(&self) -> GatewayResult<()> {
        match &self.write_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn is_listening(&self, key: u64) -> bool {
        self.listeners.iter().any(|l| l.key == key)
    }
}

/// Document store kept in memory
#[derive(Clone, Default)]
pub struct MemoryBackend {
    collection: Rc<RefCell<Collection>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail with `err` until `heal_writes`.
    pub fn fail_writes(&self, err: GatewayError) {
        self.collection.borrow_mut().write_failure = Some(err);
    }

    pub fn heal_writes(&self) {
        self.collection.borrow_mut().write_failure = None;
    }

    /// Break every live feed with `err`. Each feed's error callback runs
    /// once and the feed is closed.
    pub fn fail_feeds(&self, err: GatewayError) {
        let listeners = std::mem::take(&mut self.collection.borrow_mut().listeners);
        log::debug!("failing {} live feeds", listeners.len());
        for listener in listeners {
            if let Some(on_error) = listener.on_error {
                on_error(err.clone());
            }
        }
    }

    /// Number of open live feeds
    pub fn live_feeds(&self) -> usize {
        self.collection.borrow().listeners.len()
    }

    /// Current ordered contents
    pub fn snapshot(&self) -> Vec<Thing> {
        self.collection.borrow().ordered()
    }

    fn broadcast(&self) {
        let (things, targets) = {
            let collection = self.collection.borrow();
            let targets: Vec<(u64, Rc<RefCell<SnapshotCallback>>)> = collection
                .listeners
                .iter()
                .map(|l| (l.key, Rc::clone(&l.on_update)))
                .collect();
            (collection.ordered(), targets)
        };

        for (key, on_update) in targets {
            // A callback may have closed another feed earlier in this loop.
            if !self.collection.borrow().is_listening(key) {
                continue;
            }
            // Re-entrant delivery to a callback already on the stack is skipped;
            // it sees the newer state on the next push.
            if let Ok(mut deliver) = on_update.try_borrow_mut() {
                deliver(things.clone());
            }
        }
    }
}

fn release(collection: Weak<RefCell<Collection>>, key: u64) {
    if let Some(collection) = collection.upgrade() {
        collection.borrow_mut().listeners.retain(|l| l.key != key);
        log::debug!("live feed {key} closed");
    }
}

#[async_trait(?Send)]
impl ThingsBackend for MemoryBackend {
    fn subscribe(&self, on_update: SnapshotCallback, on_error: ErrorCallback) -> Subscription {
        let on_update = Rc::new(RefCell::new(on_update));
        let (key, initial) = {
            let mut collection = self.collection.borrow_mut();
            let key = collection.next_listener;
            collection.next_listener += 1;
            collection.listeners.push(Listener {
                key,
                on_update: Rc::clone(&on_update),
                on_error: Some(on_error),
            });
            (key, collection.ordered())
        };
        log::debug!("live feed {key} opened");

        // The first snapshot is delivered as soon as the feed is open.
        if let Ok(mut deliver) = on_update.try_borrow_mut() {
            deliver(initial);
        }

        let collection = Rc::downgrade(&self.collection);
        Subscription::new(move || release(collection, key))
    }

    async fn insert(&self, content: &str) -> GatewayResult<ThingId> {
        let id = {
            let mut collection = self.collection.borrow_mut();
            collection.check_writable()?;
            collection.next_doc += 1;
            let id = ThingId::new(format!("thing-{:06}", collection.next_doc));
            let created = collection.clock.stamp();
            collection
                .docs
                .insert(id.clone(), Thing::new(id.clone(), content, created));
            id
        };
        self.broadcast();
        Ok(id)
    }

    async fn replace_content(&self, id: &ThingId, content: &str) -> GatewayResult<()> {
        {
            let mut collection = self.collection.borrow_mut();
            collection.check_writable()?;
            let thing = collection
                .docs
                .get_mut(id)
                .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
            thing.content = content.to_string();
        }
        self.broadcast();
        Ok(())
    }

    async fn delete(&self, id: &ThingId) -> GatewayResult<()> {
        {
            let mut collection = self.collection.borrow_mut();
            collection.check_writable()?;
            collection
                .docs
                .remove(id)
                .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        }
        self.broadcast();
        Ok(())
    }

    async fn fetch_ordered(&self) -> GatewayResult<Vec<Thing>> {
        Ok(self.collection.borrow().ordered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_never_repeats() {
        let mut clock = ServerClock::default();
        let stamps: Vec<_> = (0..50).map(|_| clock.stamp()).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn dropped_subscription_closes_feed() {
        let backend = MemoryBackend::new();
        let sub = backend.subscribe(
            Box::new(|_: Vec<Thing>| {}),
            Box::new(|_: GatewayError| {}),
        );
        assert_eq!(backend.live_feeds(), 1);
        drop(sub);
        assert_eq!(backend.live_feeds(), 0);
    }

    #[test]
    fn failed_feed_reports_once_and_closes() {
        let backend = MemoryBackend::new();
        let errors = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&errors);
        let _sub = backend.subscribe(
            Box::new(|_: Vec<Thing>| {}),
            Box::new(move |err: GatewayError| seen.borrow_mut().push(err)),
        );

        backend.fail_feeds(GatewayError::subscription("unavailable", "offline"));
        backend.fail_feeds(GatewayError::subscription("unavailable", "offline"));

        assert_eq!(errors.borrow().len(), 1);
        assert_eq!(backend.live_feeds(), 0);
    }
}
