//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use things_core::Gateway;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Data gateway; lives on the main thread, hence local storage
    gateway: StoredValue<Gateway, LocalStorage>,
}

impl AppContext {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: StoredValue::new_local(gateway),
        }
    }

    /// Cheap clone of the gateway for use inside a spawned task
    pub fn gateway(&self) -> Gateway {
        self.gateway.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
