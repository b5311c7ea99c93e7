//! Small DOM helpers shared by the view and the chart backend

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

pub fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{id}")))
}

/// Value of an `<input>` or `<select>`
pub fn control_value(document: &Document, id: &str) -> Result<String, JsValue> {
    let element = element_by_id(document, id)?;
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Ok(input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Ok(select.value());
    }
    Err(JsValue::from_str(&format!("#{id} is not a form control")))
}

pub fn set_control_value(document: &Document, id: &str, value: &str) -> Result<(), JsValue> {
    let element = element_by_id(document, id)?;
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
    Ok(())
}

pub fn set_text(document: &Document, id: &str, text: &str) -> Result<(), JsValue> {
    element_by_id(document, id)?.set_text_content(Some(text));
    Ok(())
}

pub fn set_display(element: &Element, display: &str) -> Result<(), JsValue> {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.style().set_property("display", display),
        None => Ok(()),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
