//! Hover marker and tooltip box for the point under the pointer

use crate::formatting::{format_tooltip_title, format_tooltip_value};
use crate::layout::{x_position, YAxisScale};
use crate::scene::{ChartModel, DrawCommand, Point, Scene, TextAlign, TextBaseline};
use crate::style::ChartStyle;

/// Rough glyph advance for the tooltip font; the pure scene has no text metrics
const CHAR_WIDTH: f64 = 6.5;
const LINE_HEIGHT: f64 = 16.0;

pub fn draw(
    scene: &mut Scene,
    model: &ChartModel,
    scale: &YAxisScale,
    index: usize,
    style: &ChartStyle,
) {
    let value = model.values[index];
    if !value.is_finite() {
        return;
    }
    let area = scene.area;
    let anchor = Point::new(
        x_position(index, model.len(), &area),
        scale.to_screen(value, &area),
    );

    scene.push(DrawCommand::Circle {
        center: anchor,
        radius: style.point_hover_radius,
        fill: model.color.to_css(1.0),
    });

    let title = model
        .labels
        .get(index)
        .map(|label| format_tooltip_title(label))
        .unwrap_or_default();
    let body = format_tooltip_value(value);

    let lines: Vec<String> = [title, body].into_iter().filter(|l| !l.is_empty()).collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let pad = style.tooltip_padding;
    let width = longest as f64 * CHAR_WIDTH + pad * 2.0;
    let height = lines.len() as f64 * LINE_HEIGHT + pad * 2.0;

    // Prefer the right of the point, flip left when it would overflow
    let mut x = anchor.x + 10.0;
    if x + width > scene.width {
        x = (anchor.x - 10.0 - width).max(0.0);
    }
    let y = (anchor.y - height / 2.0).clamp(0.0, (scene.height - height).max(0.0));

    scene.push(DrawCommand::Rect {
        origin: Point::new(x, y),
        width,
        height,
        fill: style.tooltip_background.clone(),
    });

    for (i, line) in lines.into_iter().enumerate() {
        scene.push(DrawCommand::Text {
            text: line,
            at: Point::new(x + pad, y + pad + i as f64 * LINE_HEIGHT),
            color: style.tooltip_text_color.clone(),
            font: style.font.clone(),
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            rotation: 0.0,
        });
    }
}
