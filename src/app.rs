//! Things Frontend App
//!
//! Root component: owns the live feed and switches between the list and the
//! terminal error message.

use leptos::prelude::*;
use reactive_stores::Store;
use things_core::{Gateway, FEED_ERROR_MESSAGE};

use crate::components::{NewThingForm, NoticeTray, ThingList};
use crate::context::AppContext;
use crate::store::{store_apply_snapshot, store_fail, AppState, AppStateStoreFields};

#[component]
pub fn App(gateway: Gateway) -> impl IntoView {
    let store = Store::new(AppState::default());

    // Provide context to all children
    provide_context(store);
    provide_context(AppContext::new(gateway.clone()));

    // Subscribe once on mount
    let subscription = gateway.subscribe(
        move |things| store_apply_snapshot(&store, things),
        move |err| {
            log::error!("live feed closed: {err}");
            store_fail(&store, FEED_ERROR_MESSAGE);
        },
    );

    // ...and release it exactly once on teardown
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        if let Some(subscription) = subscription.try_update_value(Option::take).flatten() {
            subscription.unsubscribe();
        }
    });

    let feed_error = move || store.list().with(|list| list.error().map(str::to_owned));

    view! {
        <Show
            when=move || feed_error().is_none()
            fallback=move || view! { <p class="feed-error">{feed_error()}</p> }
        >
            <div class="app card">
                <div class="card-body">
                    <NewThingForm />
                    <div class="divider"></div>
                    <ThingList />
                </div>
            </div>
            <NoticeTray />
        </Show>
    }
}
