//! Build-time Configuration
//!
//! The Firebase settings are baked in when the bundle is built, e.g.
//! `THINGS_FIREBASE_PROJECT_ID=demo trunk build`.

use things_core::FirebaseConfig;

pub fn firebase_config() -> FirebaseConfig {
    let config = FirebaseConfig::new(
        option_env!("THINGS_FIREBASE_API_KEY").unwrap_or_default(),
        option_env!("THINGS_FIREBASE_AUTH_DOMAIN").unwrap_or_default(),
        option_env!("THINGS_FIREBASE_PROJECT_ID").unwrap_or_default(),
    );
    let missing = config.missing();
    if !missing.is_empty() {
        log::warn!("firebase settings not set at build time: {}", missing.join(", "));
    }
    config
}
