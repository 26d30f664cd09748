//! Things Core
//!
//! Layered like the app that uses it:
//! - model: the Thing entity
//! - backend: the document store seam, plus an in-memory implementation
//! - gateway: typed CRUD and live feed, the only caller of a backend
//! - list_state / notice: what the list screen keeps in memory

mod backend;
mod config;
mod error;
mod gateway;
mod list_state;
mod memory;
mod model;
mod notice;


pub use backend::{ErrorCallback, SnapshotCallback, Subscription, ThingsBackend};
pub use config::FirebaseConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::Gateway;
pub use list_state::{save_enabled, Draft, ListState, FEED_ERROR_MESSAGE};
pub use memory::MemoryBackend;
pub use model::{snapshot_order, Thing, ThingId, COLLECTION, ORDER_FIELD};
pub use notice::{notify_on_failure, Notice, NoticeBoard};
