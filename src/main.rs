//! Things Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod firestore;
mod store;

use std::rc::Rc;

use app::App;
use firestore::FirestoreBackend;
use leptos::prelude::*;
use things_core::{Gateway, FEED_ERROR_MESSAGE};

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);

    // The backend client is created once here and injected into the view.
    match FirestoreBackend::connect(&config::firebase_config()) {
        Ok(backend) => {
            let gateway = Gateway::new(Rc::new(backend));
            mount_to_body(move || view! { <App gateway=gateway.clone() /> });
        }
        Err(err) => {
            log::error!("could not start the database client: {err}");
            mount_to_body(|| view! { <p class="feed-error">{FEED_ERROR_MESSAGE}</p> });
        }
    }
}
