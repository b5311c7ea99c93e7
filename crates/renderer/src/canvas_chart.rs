//! Canvas 2D backend: sizes the canvas for the device pixel ratio and
//! replays a [`Scene`] on it.

use crate::layout::{nearest_index, PlotArea};
use crate::scene::{build_scene, ChartModel, DrawCommand, Point, Scene};
use crate::style::ChartStyle;
use shared_types::Color;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Used until the canvas has been laid out
const FALLBACK_WIDTH: f64 = 400.0;
const FALLBACK_HEIGHT: f64 = 250.0;

pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    model: ChartModel,
    style: ChartStyle,
    hover: Option<usize>,
}

impl CanvasChart {
    pub fn new(canvas: HtmlCanvasElement, color: Color) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            context,
            model: ChartModel::new(color),
            style: ChartStyle::default(),
            hover: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    /// Replace the plotted data and redraw
    pub fn set_data(&mut self, labels: Vec<String>, values: Vec<f64>) -> Result<(), JsValue> {
        self.model.set_data(labels, values);
        if self.hover.is_some_and(|i| i >= self.model.len()) {
            self.hover = None;
        }
        self.draw()
    }

    /// Track the pointer at `x` CSS pixels from the canvas's left edge
    pub fn hover_at(&mut self, x: f64) -> Result<(), JsValue> {
        let (width, height) = self.css_size();
        let area = PlotArea::for_canvas(width, height, &self.style);
        let hover = nearest_index(x, self.model.len(), &area);
        if hover != self.hover {
            self.hover = hover;
            self.draw()?;
        }
        Ok(())
    }

    pub fn clear_hover(&mut self) -> Result<(), JsValue> {
        if self.hover.take().is_some() {
            self.draw()?;
        }
        Ok(())
    }

    fn css_size(&self) -> (f64, f64) {
        let width = self.canvas.client_width() as f64;
        let height = self.canvas.client_height() as f64;
        if width > 0.0 && height > 0.0 {
            (width, height)
        } else {
            (FALLBACK_WIDTH, FALLBACK_HEIGHT)
        }
    }

    pub fn draw(&self) -> Result<(), JsValue> {
        let (width, height) = self.css_size();
        let ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| *r > 0.0)
            .unwrap_or(1.0);

        let backing_width = (width * ratio).round() as u32;
        let backing_height = (height * ratio).round() as u32;
        if self.canvas.width() != backing_width || self.canvas.height() != backing_height {
            self.canvas.set_width(backing_width);
            self.canvas.set_height(backing_height);
        }

        self.context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)?;
        self.context.clear_rect(0.0, 0.0, width, height);

        let scene = build_scene(&self.model, width, height, self.hover, &self.style);
        self.execute(&scene)
    }

    fn execute(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.context;
        for command in &scene.commands {
            match command {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    ctx.begin_path();
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width);
                    ctx.move_to(from.x, from.y);
                    ctx.line_to(to.x, to.y);
                    ctx.stroke();
                }
                DrawCommand::Polyline {
                    points,
                    color,
                    width,
                } => {
                    self.trace(points);
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width);
                    ctx.set_line_join("round");
                    ctx.stroke();
                }
                DrawCommand::FillPolygon { points, color } => {
                    self.trace(points);
                    ctx.close_path();
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    fill,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)?;
                    ctx.set_fill_style_str(fill);
                    ctx.fill();
                }
                DrawCommand::Rect {
                    origin,
                    width,
                    height,
                    fill,
                } => {
                    ctx.set_fill_style_str(fill);
                    ctx.fill_rect(origin.x, origin.y, *width, *height);
                }
                DrawCommand::Text {
                    text,
                    at,
                    color,
                    font,
                    align,
                    baseline,
                    rotation,
                } => {
                    ctx.save();
                    ctx.translate(at.x, at.y)?;
                    if *rotation != 0.0 {
                        ctx.rotate(*rotation)?;
                    }
                    ctx.set_fill_style_str(color);
                    ctx.set_font(font);
                    ctx.set_text_align(align.as_str());
                    ctx.set_text_baseline(baseline.as_str());
                    ctx.fill_text(text, 0.0, 0.0)?;
                    ctx.restore();
                }
            }
        }
        Ok(())
    }

    fn trace(&self, points: &[Point]) {
        self.context.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.context.move_to(first.x, first.y);
        }
        for point in iter {
            self.context.line_to(point.x, point.y);
        }
    }

    /// Blank the canvas; the element itself is owned by the page
    pub fn destroy(&mut self) {
        self.model.set_data(Vec::new(), Vec::new());
        self.hover = None;
        let (width, height) = self.css_size();
        self.context.clear_rect(0.0, 0.0, width, height);
    }
}
