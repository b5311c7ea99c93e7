//! Status badge, tag list, banner and controls on the host page

use crate::dom::{element_by_id, escape_html, set_display, set_text};
use shared_types::{ConnectionStatus, Tag};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use system_integration::{Banner, DashboardView, SelectionState};
use wasm_bindgen::prelude::*;
use web_sys::Document;

const TAGS_CONTAINER: &str = "tags-container";
const ERROR_MESSAGE: &str = "error-message";

/// Pending hide timer for the banner
struct BannerTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

pub struct DomView {
    document: Document,
    /// Generation of the banner currently shown
    shown_generation: Rc<Cell<u64>>,
    timer: RefCell<Option<BannerTimer>>,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            shown_generation: Rc::new(Cell::new(0)),
            timer: RefCell::new(None),
        }
    }

    fn set_tags_html(&self, html: &str) {
        match element_by_id(&self.document, TAGS_CONTAINER) {
            Ok(container) => container.set_inner_html(html),
            Err(e) => log::warn!("{e:?}"),
        }
    }

    fn cancel_timer(&self) {
        if let Some(timer) = self.timer.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timer.handle);
            }
        }
    }

    fn try_show_banner(&self, banner: &Banner, display_ms: u32) -> Result<(), JsValue> {
        let element = element_by_id(&self.document, ERROR_MESSAGE)?;
        element.set_text_content(Some(&banner.message));
        set_display(&element, "block")?;

        self.cancel_timer();
        self.shown_generation.set(banner.generation);

        let generation = banner.generation;
        let shown = Rc::clone(&self.shown_generation);
        let callback = Closure::wrap(Box::new(move || {
            // A newer banner owns the element now
            if shown.get() == generation {
                if let Err(e) = set_display(&element, "none") {
                    log::warn!("Failed to hide banner: {e:?}");
                }
            }
        }) as Box<dyn FnMut()>);

        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            display_ms as i32,
        )?;
        *self.timer.borrow_mut() = Some(BannerTimer {
            handle,
            _callback: callback,
        });
        Ok(())
    }

    fn try_show_status(&self, status: &ConnectionStatus) -> Result<(), JsValue> {
        let badge = element_by_id(&self.document, "status-badge")?;
        if let Some(dot) = badge.query_selector(".status-dot")? {
            dot.set_class_name(&format!("status-dot {}", status.state.as_str()));
        }
        set_text(&self.document, "status-text", &status.label)
    }

    fn try_show_polling(&self, running: bool) -> Result<(), JsValue> {
        let button = element_by_id(&self.document, "start-stop-btn")?;
        if running {
            button.set_text_content(Some("Stop Polling"));
            button.set_class_name("btn btn-danger");
        } else {
            button.set_text_content(Some("Start Polling"));
            button.set_class_name("btn btn-primary");
        }
        Ok(())
    }
}

/// Markup for the tag list; names are escaped since they come off the wire
pub fn tag_list_html(tags: &[Tag], selection: &SelectionState) -> String {
    if tags.is_empty() {
        return r#"<div class="loading-tags">No tags available</div>"#.to_string();
    }

    tags.iter()
        .map(|tag| {
            let name = escape_html(tag.as_str());
            let (item, checkbox) = if selection.is_selected(tag) {
                (" selected", " checked")
            } else {
                ("", "")
            };
            format!(
                r#"<div class="tag-item{item}" data-tag="{name}"><div class="tag-checkbox{checkbox}"></div><span class="tag-label">{name}</span></div>"#
            )
        })
        .collect()
}

impl DashboardView for DomView {
    fn show_status(&self, status: &ConnectionStatus) {
        if let Err(e) = self.try_show_status(status) {
            log::warn!("Failed to update status badge: {e:?}");
        }
    }

    fn show_tags_loading(&self) {
        self.set_tags_html(r#"<div class="loading-tags">Loading tags...</div>"#);
    }

    fn show_tags(&self, tags: &[Tag], selection: &SelectionState) {
        self.set_tags_html(&tag_list_html(tags, selection));
    }

    fn show_tags_error(&self, message: &str) {
        self.set_tags_html(&format!(
            r#"<div class="loading-tags" style="color: var(--danger);">{}</div>"#,
            escape_html(message)
        ));
    }

    fn show_banner(&self, banner: &Banner, display_ms: u32) {
        if let Err(e) = self.try_show_banner(banner, display_ms) {
            log::warn!("Failed to show banner: {e:?}");
        }
    }

    fn hide_banner(&self) {
        self.cancel_timer();
        match element_by_id(&self.document, ERROR_MESSAGE) {
            Ok(element) => {
                if let Err(e) = set_display(&element, "none") {
                    log::warn!("Failed to hide banner: {e:?}");
                }
            }
            Err(e) => log::warn!("{e:?}"),
        }
    }

    fn show_polling(&self, running: bool) {
        if let Err(e) = self.try_show_polling(running) {
            log::warn!("Failed to update polling button: {e:?}");
        }
    }

    fn show_selected_count(&self, text: &str) {
        if let Err(e) = set_text(&self.document, "selected-count", text) {
            log::warn!("Failed to update selected count: {e:?}");
        }
    }
}
