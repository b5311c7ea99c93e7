//! Backend-neutral draw list for one chart.
//!
//! Building the scene is pure so the chart's geometry can be checked
//! without a canvas; `canvas_chart` replays it on a 2D context.

use crate::drawables::{plot, tooltip, x_axis, y_axis};
use crate::layout::{PlotArea, YAxisScale};
use crate::style::ChartStyle;
use shared_types::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: String,
        width: f64,
    },
    Polyline {
        points: Vec<Point>,
        color: String,
        width: f64,
    },
    FillPolygon {
        points: Vec<Point>,
        color: String,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: String,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: String,
    },
    Text {
        text: String,
        at: Point,
        color: String,
        font: String,
        align: TextAlign,
        baseline: TextBaseline,
        /// Radians, counter-clockwise is negative as on a canvas
        rotation: f64,
    },
}

/// Labels and values currently plotted by one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: Color,
}

impl ChartModel {
    pub fn new(color: Color) -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
            color,
        }
    }

    /// Replace the plotted data; the shorter of the two lists wins
    pub fn set_data(&mut self, mut labels: Vec<String>, mut values: Vec<f64>) {
        let len = labels.len().min(values.len());
        labels.truncate(len);
        values.truncate(len);
        self.labels = labels;
        self.values = values;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub area: PlotArea,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Lay out `model` on a `width` x `height` canvas, with the tooltip for
/// `hover` if it names a plotted point.
pub fn build_scene(
    model: &ChartModel,
    width: f64,
    height: f64,
    hover: Option<usize>,
    style: &ChartStyle,
) -> Scene {
    let area = PlotArea::for_canvas(width, height, style);
    let mut scene = Scene {
        width,
        height,
        area,
        commands: Vec::new(),
    };

    let scale = YAxisScale::from_values(&model.values);
    y_axis::draw(&mut scene, scale.as_ref(), style);
    x_axis::draw(&mut scene, &model.labels, style);

    if let Some(scale) = scale {
        plot::draw(&mut scene, model, &scale, style);
        if let Some(index) = hover.filter(|i| *i < model.len()) {
            tooltip::draw(&mut scene, model, &scale, index, style);
        }
    }

    scene
}
