//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use things_core::{Draft, ListState, NoticeBoard, Thing, ThingId};

/// Notices disappear on their own after this long
const NOTICE_TTL_MS: u32 = 5_000;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Mirror of the live feed, row edits and phase
    pub list: ListState,
    /// Text of the new-thing input
    pub draft: Draft,
    /// Toasts for failed mutations
    pub notices: NoticeBoard,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the list with a pushed snapshot
pub fn store_apply_snapshot(store: &AppStore, things: Vec<Thing>) {
    if !store.list().write().apply_snapshot(things) {
        log::debug!("snapshot ignored after feed failure");
    }
}

/// Put the view into its terminal error state
pub fn store_fail(store: &AppStore, message: &str) {
    store.list().write().fail(message);
}

pub fn store_set_draft(store: &AppStore, text: String) {
    store.draft().write().set(text);
}

pub fn store_edit_row(store: &AppStore, id: &ThingId, text: String) {
    store.list().write().edit_row(id, text);
}

/// Show an error toast and schedule its removal
pub fn store_notify_error(store: &AppStore, message: String) {
    let store = *store;
    let id = store.notices().write().push(message);
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(NOTICE_TTL_MS).await;
        store.notices().write().dismiss(id);
    });
}

pub fn store_dismiss_notice(store: &AppStore, id: u32) {
    store.notices().write().dismiss(id);
}
