//! Browser host for the telemetry viewer
//!
//! Binds the dashboard core to an existing page: controls and containers are
//! looked up by id, requests go through `fetch` and charts are drawn on
//! canvases.
#![cfg(target_arch = "wasm32")]

use data_manager::FetchClient;
use shared_types::{Tag, ViewerConfig, ViewerError};
use system_integration::{Dashboard, TagRefresh, TickOutcome, Toggle};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Document, Element, Event};

pub mod dom;
pub mod dom_charts;
pub mod dom_view;
pub mod interval;
pub mod wrappers;

use dom::{control_value, element_by_id, set_control_value};
use dom_charts::DomChartBackend;
use dom_view::DomView;
use interval::IntervalDriver;

type WebDashboard = Dashboard<FetchClient, DomChartBackend>;
type EventListener = Closure<dyn FnMut(Event)>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn to_js_error(error: ViewerError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn refresh_to_js(result: Result<TagRefresh, ViewerError>) -> Result<JsValue, JsValue> {
    match result.map_err(to_js_error)? {
        TagRefresh::Applied(tags) => Ok(serde_wasm_bindgen::to_value(&tags)?),
        TagRefresh::Superseded => Ok(JsValue::NULL),
    }
}

/// Config from the page inputs, after applying `?api=` and `?interval=`
fn config_from_page(document: &Document) -> Result<ViewerConfig, JsValue> {
    let params = wrappers::js::get_query_params().unwrap_or_default();
    if let Some(api) = params.get("api") {
        set_control_value(document, "api-url", api)?;
    }
    if let Some(interval) = params.get("interval") {
        set_control_value(document, "poll-interval", interval)?;
    }

    let mut config = ViewerConfig::default();
    config.set_endpoint(&control_value(document, "api-url")?);
    config.set_poll_interval_input(&control_value(document, "poll-interval")?);
    if let Some(level) = params.get("log") {
        config.log_level = level.clone();
    }
    Ok(config)
}

#[wasm_bindgen]
pub struct TelemetryDashboard {
    dashboard: WebDashboard,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl TelemetryDashboard {
    /// Bind to the current page and load the tag list
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<TelemetryDashboard, JsValue> {
        let document = dom::document()?;
        let config = config_from_page(&document)?;

        match config.log_level.parse::<log::LevelFilter>() {
            Ok(level) => log::set_max_level(level),
            Err(_) => log::warn!("Unknown log level {:?}", config.log_level),
        }

        let charts = DomChartBackend::new(&document)?;
        let view = DomView::new(document.clone());
        let dashboard = Dashboard::new(
            config,
            FetchClient::new(),
            charts,
            view,
            IntervalDriver::default(),
        );

        let listeners = bind_controls(&document, &dashboard)?;
        log::info!("Telemetry dashboard ready");

        let initial = dashboard.clone();
        spawn_local(async move {
            if let Err(e) = initial.refresh_tags().await {
                log::warn!("Initial tag load failed: {e}");
            }
        });

        Ok(Self {
            dashboard,
            _listeners: listeners,
        })
    }

    /// Start or stop polling; resolves to whether polling is now on
    #[wasm_bindgen(js_name = togglePolling)]
    pub fn toggle_polling(&self) -> Result<bool, JsValue> {
        self.dashboard.toggle_polling().map_err(to_js_error)
    }

    /// Select or deselect a tag; returns true if it is now selected
    #[wasm_bindgen(js_name = toggleTag)]
    pub fn toggle_tag(&self, tag: &str) -> Result<bool, JsValue> {
        self.dashboard
            .toggle(&Tag::from(tag))
            .map(|t| t == Toggle::Selected)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = refreshTags)]
    pub fn refresh_tags(&self) -> js_sys::Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move { refresh_to_js(dashboard.refresh_tags().await) })
    }

    #[wasm_bindgen(js_name = testConnection)]
    pub fn test_connection(&self) -> js_sys::Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move { refresh_to_js(dashboard.test_connection().await) })
    }

    #[wasm_bindgen(js_name = setEndpoint)]
    pub fn set_endpoint(&self, url: String) -> js_sys::Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move { refresh_to_js(dashboard.set_endpoint(&url).await) })
    }

    /// Returns the interval in effect
    #[wasm_bindgen(js_name = setPollInterval)]
    pub fn set_poll_interval(&self, input: &str) -> u32 {
        self.dashboard.set_poll_interval(input)
    }

    /// Run one poll now; resolves to the tick outcome
    pub fn tick(&self) -> js_sys::Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move {
            let outcome: TickOutcome = dashboard.tick().await;
            Ok(serde_wasm_bindgen::to_value(&outcome)?)
        })
    }

    /// Status, selection and polling state as a plain object
    pub fn status(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.dashboard.snapshot())?)
    }
}

fn listen(
    element: &Element,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<EventListener, JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn bind_controls(
    document: &Document,
    dashboard: &WebDashboard,
) -> Result<Vec<EventListener>, JsValue> {
    let mut listeners = Vec::new();

    let d = dashboard.clone();
    listeners.push(listen(
        &element_by_id(document, "start-stop-btn")?,
        "click",
        move |_| {
            if let Err(e) = d.toggle_polling() {
                log::warn!("Polling not started: {e}");
            }
        },
    )?);

    let d = dashboard.clone();
    listeners.push(listen(
        &element_by_id(document, "test-connection-btn")?,
        "click",
        move |_| {
            let d = d.clone();
            spawn_local(async move {
                let _ = d.test_connection().await;
            });
        },
    )?);

    let d = dashboard.clone();
    listeners.push(listen(
        &element_by_id(document, "refresh-tags-btn")?,
        "click",
        move |_| {
            let d = d.clone();
            spawn_local(async move {
                let _ = d.refresh_tags().await;
            });
        },
    )?);

    let d = dashboard.clone();
    let doc = document.clone();
    listeners.push(listen(
        &element_by_id(document, "poll-interval")?,
        "change",
        move |_| match control_value(&doc, "poll-interval") {
            Ok(value) => {
                d.set_poll_interval(&value);
            }
            Err(e) => log::warn!("{e:?}"),
        },
    )?);

    let d = dashboard.clone();
    let doc = document.clone();
    listeners.push(listen(
        &element_by_id(document, "api-url")?,
        "change",
        move |_| match control_value(&doc, "api-url") {
            Ok(value) => {
                let d = d.clone();
                spawn_local(async move {
                    let _ = d.set_endpoint(&value).await;
                });
            }
            Err(e) => log::warn!("{e:?}"),
        },
    )?);

    // Tag items are re-rendered on every change, so clicks are delegated
    let d = dashboard.clone();
    listeners.push(listen(
        &element_by_id(document, "tags-container")?,
        "click",
        move |event| {
            let tag = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".tag-item").ok().flatten())
                .and_then(|item| item.get_attribute("data-tag"));
            if let Some(tag) = tag {
                let _ = d.toggle(&Tag::from(tag));
            }
        },
    )?);

    Ok(listeners)
}
