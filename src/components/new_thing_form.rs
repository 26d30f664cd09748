//! New Thing Form Component
//!
//! Text input and submit button for adding a thing.

use leptos::prelude::*;
use leptos::task::spawn_local;
use things_core::notify_on_failure;

use crate::context::use_app_context;
use crate::store::{store_notify_error, store_set_draft, use_app_store, AppStateStoreFields};

/// Form for creating new things
///
/// The draft is cleared as soon as the add is dispatched; the new row shows up
/// through the live feed and a failed add turns into a notice.
#[component]
pub fn NewThingForm() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let add_thing = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(text) = store.draft().write().take() else {
            return;
        };
        let gateway = ctx.gateway();

        spawn_local(async move {
            let action = format!("Could not add \"{text}\"");
            notify_on_failure(&action, gateway.add(&text), |message| {
                store_notify_error(&store, message)
            })
            .await;
        });
    };

    view! {
        <form class="new-thing-form" on:submit=add_thing>
            <input
                type="text"
                id="thingInput"
                class="input"
                placeholder="Legg til en ny ting"
                prop:value=move || store.draft().with(|draft| draft.as_str().to_string())
                on:input=move |ev| store_set_draft(&store, event_target_value(&ev))
            />
            <button
                type="submit"
                class="btn btn-primary"
                disabled=move || !store.draft().with(|draft| draft.can_submit())
            >
                "Add"
            </button>
        </form>
    }
}
