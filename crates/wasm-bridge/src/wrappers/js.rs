use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::{window, UrlSearchParams};

/// Query string of the current page as a map; later duplicates win
pub fn get_query_params() -> Result<HashMap<String, String>, JsValue> {
    let location = window()
        .ok_or_else(|| JsValue::from_str("No window object available"))?
        .location();

    // Includes the leading '?'
    let search = location.search()?;
    let params = UrlSearchParams::new_with_str(&search)?;

    let mut map = HashMap::new();

    // `entries()` yields `[key, value]` arrays
    let entries = params.entries();
    let Some(iter) = js_sys::try_iter(&entries)? else {
        return Ok(map);
    };
    for entry in iter {
        let pair = entry?;
        let key = js_sys::Reflect::get(&pair, &0.into())?.as_string();
        let value = js_sys::Reflect::get(&pair, &1.into())?.as_string();
        if let (Some(key), Some(value)) = (key, value) {
            map.insert(key, value);
        }
    }

    Ok(map)
}
