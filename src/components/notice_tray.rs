//! Notice Tray Component
//!
//! Toasts for failed adds, saves and deletes.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeTray() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="notice-tray">
            <For
                each=move || store.notices().with(|board| board.notices().to_vec())
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class="notice notice-error">
                            <span>{notice.message}</span>
                            <button
                                class="notice-dismiss"
                                on:click=move |_| store_dismiss_notice(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
