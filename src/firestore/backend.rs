//! Firestore Backend
//!
//! `ThingsBackend` over the `things` collection of a Firebase project.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use things_core::{
    ErrorCallback, FirebaseConfig, GatewayError, GatewayResult, SnapshotCallback, Subscription,
    Thing, ThingId, ThingsBackend, COLLECTION, ORDER_FIELD,
};

use super::{
    initialize_app, server_timestamp, CollectionReference, DocumentReference, DocumentSnapshot,
    QuerySnapshot, Timestamp,
};

/// Options for `DocumentSnapshot.data()`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DataOptions {
    /// Read pending server timestamps as the local estimate instead of null
    server_timestamps: &'static str,
}

pub struct FirestoreBackend {
    things: CollectionReference,
}

impl FirestoreBackend {
    /// Initialize the Firebase app and open the `things` collection.
    pub fn connect(config: &FirebaseConfig) -> GatewayResult<Self> {
        let options = serde_wasm_bindgen::to_value(config)
            .map_err(|e| GatewayError::backend("invalid-config", e.to_string()))?;
        let app = initialize_app(&options).map_err(js_error)?;
        let db = app.firestore().map_err(js_error)?;
        log::info!("connected to project {}", config.project_id);
        Ok(Self {
            things: db.collection(COLLECTION),
        })
    }

    fn doc(&self, id: &ThingId) -> DocumentReference {
        self.things.doc(id.as_str())
    }
}

#[async_trait(?Send)]
impl ThingsBackend for FirestoreBackend {
    fn subscribe(&self, mut on_update: SnapshotCallback, on_error: ErrorCallback) -> Subscription {
        let on_next = Closure::<dyn FnMut(QuerySnapshot)>::new(move |snapshot: QuerySnapshot| {
            on_update(decode_snapshot(&snapshot));
        });
        let on_fail = Closure::once(move |err: JsValue| {
            let (code, message) = error_fields(&err);
            on_error(GatewayError::Subscription { code, message });
        });

        let unsubscribe = self.things.order_by(ORDER_FIELD).on_snapshot(
            on_next.as_ref().unchecked_ref(),
            on_fail.as_ref().unchecked_ref(),
        );

        Subscription::new(move || {
            if let Err(err) = unsubscribe.call0(&JsValue::NULL) {
                log::warn!("closing live feed failed: {:?}", err);
            }
            // The listener is gone; its callbacks can be freed.
            drop(on_next);
            drop(on_fail);
        })
    }

    async fn insert(&self, content: &str) -> GatewayResult<ThingId> {
        let data = js_sys::Object::new();
        set_field(&data, "content", &JsValue::from_str(content))?;
        set_field(&data, ORDER_FIELD, &server_timestamp())?;

        let reference: DocumentReference = JsFuture::from(self.things.add(&data))
            .await
            .map_err(js_error)?
            .unchecked_into();
        Ok(ThingId::new(reference.ref_id()))
    }

    async fn replace_content(&self, id: &ThingId, content: &str) -> GatewayResult<()> {
        let data = js_sys::Object::new();
        set_field(&data, "content", &JsValue::from_str(content))?;

        JsFuture::from(self.doc(id).update(&data))
            .await
            .map_err(|err| not_found_or(id, js_error(err)))?;
        Ok(())
    }

    async fn delete(&self, id: &ThingId) -> GatewayResult<()> {
        // Firestore deletes are idempotent; check first so a missing id fails.
        let reference = self.doc(id);
        let existing: DocumentSnapshot = JsFuture::from(reference.fetch_one())
            .await
            .map_err(js_error)?
            .unchecked_into();
        if !existing.exists() {
            return Err(GatewayError::NotFound(id.clone()));
        }

        JsFuture::from(reference.delete())
            .await
            .map_err(|err| not_found_or(id, js_error(err)))?;
        Ok(())
    }

    async fn fetch_ordered(&self) -> GatewayResult<Vec<Thing>> {
        let snapshot: QuerySnapshot = JsFuture::from(self.things.order_by(ORDER_FIELD).fetch_all())
            .await
            .map_err(js_error)?
            .unchecked_into();
        Ok(decode_snapshot(&snapshot))
    }
}

// ========================
// Decoding
// ========================

fn decode_snapshot(snapshot: &QuerySnapshot) -> Vec<Thing> {
    let options = serde_wasm_bindgen::to_value(&DataOptions {
        server_timestamps: "estimate",
    })
    .unwrap_or(JsValue::UNDEFINED);

    snapshot
        .docs()
        .iter()
        .filter_map(|doc| {
            let doc: DocumentSnapshot = doc.unchecked_into();
            match decode_document(&doc, &options) {
                Ok(thing) => Some(thing),
                Err(reason) => {
                    log::warn!("skipping document {}: {}", doc.id(), reason);
                    None
                }
            }
        })
        .collect()
}

fn decode_document(doc: &DocumentSnapshot, options: &JsValue) -> Result<Thing, String> {
    let data = doc.data(options);
    let content = get_field(&data, "content")
        .as_string()
        .ok_or("content is not a string")?;

    let created = get_field(&data, ORDER_FIELD);
    if created.is_null() || created.is_undefined() {
        return Err("missing created timestamp".to_string());
    }
    let millis = created.unchecked_into::<Timestamp>().to_millis();
    let created = DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .ok_or_else(|| format!("created out of range: {millis}"))?;

    Ok(Thing::new(ThingId::new(doc.id()), content, created))
}

// ========================
// JS helpers
// ========================

fn get_field(target: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn set_field(target: &js_sys::Object, key: &str, value: &JsValue) -> GatewayResult<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

/// `code` and `message` of a `FirestoreError` (or whatever was thrown)
fn error_fields(err: &JsValue) -> (String, String) {
    let code = get_field(err, "code")
        .as_string()
        .unwrap_or_else(|| "unknown".to_string());
    let message = get_field(err, "message")
        .as_string()
        .unwrap_or_else(|| format!("{:?}", err));
    (code, message)
}

fn js_error(err: JsValue) -> GatewayError {
    let (code, message) = error_fields(&err);
    GatewayError::backend(code, message)
}

fn not_found_or(id: &ThingId, err: GatewayError) -> GatewayError {
    match err {
        GatewayError::Backend { ref code, .. } if code == "not-found" => {
            GatewayError::NotFound(id.clone())
        }
        other => other,
    }
}
