//! Thing Row Component
//!
//! One editable row: text field, save button and delete button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use things_core::{notify_on_failure, ThingId};

use crate::components::DeleteIcon;
use crate::context::use_app_context;
use crate::store::{store_edit_row, store_notify_error, use_app_store, AppStateStoreFields};

/// A single thing in the list
///
/// Keyed by id; text and save state are read from the store so a pushed
/// snapshot updates the row in place.
#[component]
pub fn ThingRow(id: ThingId) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let id = StoredValue::new(id);

    let text = move || id.with_value(|id| store.list().with(|list| list.row_text(id).to_string()));
    let can_save = move || id.with_value(|id| store.list().with(|list| list.can_save(id)));

    let save = move |_| {
        let id = id.get_value();
        let Some(content) = store.list().with(|list| list.pending_edit(&id)) else {
            return;
        };
        let gateway = ctx.gateway();
        spawn_local(async move {
            notify_on_failure("Could not save changes", gateway.update(&id, &content), |message| {
                store_notify_error(&store, message)
            })
            .await;
        });
    };

    let remove = move |_| {
        let id = id.get_value();
        let gateway = ctx.gateway();
        spawn_local(async move {
            notify_on_failure("Could not delete", gateway.remove(&id), |message| {
                store_notify_error(&store, message)
            })
            .await;
        });
    };

    view! {
        <div class="thing-row">
            <input
                type="text"
                class=move || if text().is_empty() { "input invalid" } else { "input" }
                prop:value=text
                on:input=move |ev| {
                    id.with_value(|id| store_edit_row(&store, id, event_target_value(&ev)))
                }
            />
            <button class="btn btn-sm btn-success" disabled=move || !can_save() on:click=save>
                "Edit"
            </button>
            <button class="btn btn-square btn-sm btn-error" on:click=remove>
                <DeleteIcon />
            </button>
        </div>
    }
}
