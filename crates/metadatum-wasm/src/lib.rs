//! WASM bindings for metadatum-core.
//!
//! Exposes `convert` and `locate` as `#[wasm_bindgen]` functions so browser
//! minting tools can build CIP-68 reference datums client side. Built with
//! `wasm-bindgen-cli`:
//!
//! ```sh
//! cargo build -p metadatum-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/metadatum-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/metadatum_wasm.wasm
//! ```

use metadatum_core::Selector;
use wasm_bindgen::prelude::*;

/// Convert a metadata JSON document into compact metadatum JSON.
///
/// Throws a JS error if the document is not valid JSON or holds a value the
/// datum format cannot carry.
#[wasm_bindgen]
pub fn convert(
    json: &str,
    tag: &str,
    policy: &str,
    token: &str,
    version: u64,
) -> std::result::Result<String, JsValue> {
    let selector = Selector::new(tag, policy, token);
    metadatum_core::convert(json, &selector, version).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Derive the selector of a single-token document.
///
/// Returns `[tag, policy, token]`, or throws when the document holds more
/// than one candidate at any level.
#[wasm_bindgen]
pub fn locate(json: &str) -> std::result::Result<Vec<String>, JsValue> {
    let document: serde_json::Value =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let selector = metadatum_core::locate_single_selector(&document)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(vec![selector.tag, selector.policy, selector.token])
}
