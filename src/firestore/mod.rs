//! Firestore Bindings
//!
//! Frontend bindings to the Firebase JS SDK (compat build). `index.html`
//! loads the SDK, which exposes everything under the `firebase` global.

mod backend;

use wasm_bindgen::prelude::*;

pub use backend::FirestoreBackend;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = firebase, js_name = initializeApp, catch)]
    fn initialize_app(options: &JsValue) -> Result<FirebaseApp, JsValue>;

    #[wasm_bindgen(js_namespace = ["firebase", "firestore", "FieldValue"], js_name = serverTimestamp)]
    fn server_timestamp() -> JsValue;

    type FirebaseApp;

    #[wasm_bindgen(method, catch)]
    fn firestore(this: &FirebaseApp) -> Result<Firestore, JsValue>;

    type Firestore;

    #[wasm_bindgen(method)]
    fn collection(this: &Firestore, path: &str) -> CollectionReference;

    type Query;

    #[wasm_bindgen(method, js_name = orderBy)]
    fn order_by(this: &Query, field: &str) -> Query;

    /// Returns the function that closes the listener
    #[wasm_bindgen(method, js_name = onSnapshot)]
    fn on_snapshot(
        this: &Query,
        on_next: &js_sys::Function,
        on_error: &js_sys::Function,
    ) -> js_sys::Function;

    #[wasm_bindgen(method, js_name = get)]
    fn fetch_all(this: &Query) -> js_sys::Promise;

    #[wasm_bindgen(extends = Query)]
    type CollectionReference;

    #[wasm_bindgen(method)]
    fn add(this: &CollectionReference, data: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    fn doc(this: &CollectionReference, id: &str) -> DocumentReference;

    type DocumentReference;

    #[wasm_bindgen(method, getter, js_name = id)]
    fn ref_id(this: &DocumentReference) -> String;

    #[wasm_bindgen(method)]
    fn update(this: &DocumentReference, data: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    fn delete(this: &DocumentReference) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = get)]
    fn fetch_one(this: &DocumentReference) -> js_sys::Promise;

    type QuerySnapshot;

    #[wasm_bindgen(method, getter)]
    fn docs(this: &QuerySnapshot) -> js_sys::Array;

    type DocumentSnapshot;

    #[wasm_bindgen(method, getter)]
    fn id(this: &DocumentSnapshot) -> String;

    #[wasm_bindgen(method, getter)]
    fn exists(this: &DocumentSnapshot) -> bool;

    #[wasm_bindgen(method)]
    fn data(this: &DocumentSnapshot, options: &JsValue) -> JsValue;

    type Timestamp;

    #[wasm_bindgen(method, js_name = toMillis)]
    fn to_millis(this: &Timestamp) -> f64;
}
