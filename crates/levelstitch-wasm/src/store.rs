//! Line persistence in the browser's `localStorage`.

use levelstitch_core::store::{KeyValueStore, LineBook, StoreError};
use wasm_bindgen::prelude::*;
use web_sys::Storage;

use crate::geometry::{line_from_js, to_js};
use crate::types::js_error;

/// [`KeyValueStore`] backed by `window.localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Backend("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Backend("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }
}

fn line_book() -> Result<LineBook<LocalStorage>, JsValue> {
    LocalStorage::open().map(LineBook::new).map_err(js_error)
}

/// All saved lines as a plain `{ fileName: line }` object.
#[wasm_bindgen]
pub fn load_lines() -> Result<JsValue, JsValue> {
    to_js(&line_book()?.load())
}

/// The saved line for `file_name`, or `undefined`.
#[wasm_bindgen]
pub fn load_line(file_name: &str) -> Result<JsValue, JsValue> {
    match line_book()?.line_for(file_name) {
        Some(line) => to_js(&line),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Save `line` for `file_name`, replacing any earlier one.
#[wasm_bindgen]
pub fn save_line(file_name: &str, line: JsValue) -> Result<(), JsValue> {
    let line = line_from_js(line)?;
    line_book()?.save_line(file_name, line).map_err(js_error)
}

/// Forget the line for `file_name`. Returns whether one was stored.
#[wasm_bindgen]
pub fn remove_line(file_name: &str) -> Result<bool, JsValue> {
    line_book()?.remove_line(file_name).map_err(js_error)
}
