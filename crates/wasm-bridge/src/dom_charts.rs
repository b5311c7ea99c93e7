//! Chart cards on the page, one canvas chart each

use crate::dom::element_by_id;
use renderer::CanvasChart;
use shared_types::{Color, Tag, ViewerError, ViewerResult};
use std::cell::RefCell;
use std::rc::Rc;
use system_integration::ChartBackend;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent};

const EMPTY_STATE_HTML: &str = r#"<div class="empty-state"><div class="empty-icon">📊</div><h3>No Tags Selected</h3><p>Select tags from the sidebar to view their data</p></div>"#;

type PointerListener = Closure<dyn FnMut(MouseEvent)>;

/// A live card: keeps the canvas chart and its pointer listeners alive
pub struct ChartCard {
    card: Element,
    value: Element,
    chart: Rc<RefCell<CanvasChart>>,
    _listeners: Vec<PointerListener>,
}

pub struct DomChartBackend {
    document: Document,
    container: Element,
}

impl DomChartBackend {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let container = element_by_id(document, "charts-container")?;
        Ok(Self {
            document: document.clone(),
            container,
        })
    }

    fn div(&self, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(class);
        Ok(element)
    }

    fn build_card(&self, tag: &Tag, color: Color) -> Result<ChartCard, JsValue> {
        let card = self.div("sensor-card")?;
        card.set_id(&format!("card-{tag}"));

        let header = self.div("sensor-header")?;
        let title = self.div("sensor-title")?;
        title.set_text_content(Some(tag.as_str()));
        let value = self.div("sensor-value")?;
        value.set_id(&format!("value-{tag}"));
        header.append_child(&title)?;
        header.append_child(&value)?;

        let body = self.div("chart-container")?;
        let canvas: HtmlCanvasElement = self.document.create_element("canvas")?.dyn_into()?;
        canvas.set_id(&format!("chart-{tag}"));
        body.append_child(&canvas)?;

        card.append_child(&header)?;
        card.append_child(&body)?;

        let (chart, listeners) = self.mount(&card, || {
            let chart = Rc::new(RefCell::new(CanvasChart::new(canvas.clone(), color)?));
            let listeners = attach_hover(&canvas, &chart)?;
            Ok((chart, listeners))
        })?;

        // Drawn once attached so the canvas has its laid-out size
        if let Err(e) = chart.borrow().draw() {
            card.remove();
            return Err(e);
        }

        Ok(ChartCard {
            card,
            value,
            chart,
            _listeners: listeners,
        })
    }

    /// Run `build` and only put `card` on the page if it succeeded
    fn mount<T>(
        &self,
        card: &Element,
        build: impl FnOnce() -> Result<T, JsValue>,
    ) -> Result<T, JsValue> {
        let built = build()?;
        self.container.append_child(card)?;
        Ok(built)
    }
}

fn attach_hover(
    canvas: &HtmlCanvasElement,
    chart: &Rc<RefCell<CanvasChart>>,
) -> Result<Vec<PointerListener>, JsValue> {
    let moved = {
        let chart = Rc::clone(chart);
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let result = chart.borrow_mut().hover_at(f64::from(event.offset_x()));
            if let Err(e) = result {
                log::warn!("Hover redraw failed: {e:?}");
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let left = {
        let chart = Rc::clone(chart);
        Closure::wrap(Box::new(move |_event: MouseEvent| {
            if let Err(e) = chart.borrow_mut().clear_hover() {
                log::warn!("Hover redraw failed: {e:?}");
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    canvas.add_event_listener_with_callback("mousemove", moved.as_ref().unchecked_ref())?;
    canvas.add_event_listener_with_callback("mouseleave", left.as_ref().unchecked_ref())?;
    Ok(vec![moved, left])
}

impl ChartBackend for DomChartBackend {
    type Handle = ChartCard;

    fn create_chart(&mut self, tag: &Tag, color: Color) -> ViewerResult<ChartCard> {
        self.build_card(tag, color).map_err(ViewerError::from)
    }

    fn update_chart(
        &mut self,
        handle: &mut ChartCard,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> ViewerResult<()> {
        handle
            .chart
            .borrow_mut()
            .set_data(labels, values)
            .map_err(ViewerError::from)
    }

    fn set_latest_value(&mut self, handle: &mut ChartCard, text: &str) {
        handle.value.set_text_content(Some(text));
    }

    fn destroy_chart(&mut self, _tag: &Tag, handle: ChartCard) {
        handle.chart.borrow_mut().destroy();
        handle.card.remove();
    }

    fn set_empty_state(&mut self, empty: bool) {
        let existing = match self.container.query_selector(".empty-state") {
            Ok(existing) => existing,
            Err(e) => {
                log::warn!("Failed to query empty state: {e:?}");
                return;
            }
        };

        match (empty, existing) {
            (true, None) => {
                if let Err(e) = self
                    .container
                    .insert_adjacent_html("afterbegin", EMPTY_STATE_HTML)
                {
                    log::warn!("Failed to show empty state: {e:?}");
                }
            }
            (false, Some(placeholder)) => placeholder.remove(),
            _ => {}
        }
    }
}
