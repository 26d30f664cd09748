//! Thing List Component
//!
//! Loading indicator until the first snapshot, then one row per thing in
//! feed order.

use leptos::prelude::*;

use crate::components::ThingRow;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
fn LoadingIndicator() -> impl IntoView {
    view! { <button class="btn btn-square loading" disabled=true></button> }
}

#[component]
pub fn ThingList() -> impl IntoView {
    let store = use_app_store();
    let loading = move || store.list().with(|list| list.is_loading());

    view! {
        <Show when=move || !loading() fallback=|| view! { <LoadingIndicator /> }>
            <div class="thing-list">
                <For
                    each=move || store.list().with(|list| list.items().to_vec())
                    key=|thing| thing.id.clone()
                    children=move |thing| view! { <ThingRow id=thing.id /> }
                />
            </div>
        </Show>
    }
}
