//! Vertical grid lines, time labels and the "Time" title

use crate::formatting::format_tick_label;
use crate::layout::{x_position, x_tick_indices};
use crate::scene::{DrawCommand, Point, Scene, TextAlign, TextBaseline};
use crate::style::ChartStyle;

pub fn draw(scene: &mut Scene, labels: &[String], style: &ChartStyle) {
    let area = scene.area;

    for index in x_tick_indices(labels.len(), style.max_x_ticks) {
        let x = x_position(index, labels.len(), &area);
        scene.push(DrawCommand::Line {
            from: Point::new(x, area.top),
            to: Point::new(x, area.bottom()),
            color: style.grid_color.clone(),
            width: 1.0,
        });
        scene.push(DrawCommand::Text {
            text: format_tick_label(&labels[index]),
            at: Point::new(x, area.bottom() + 6.0),
            color: style.text_color.clone(),
            font: style.font.clone(),
            align: TextAlign::Center,
            baseline: TextBaseline::Top,
            rotation: 0.0,
        });
    }

    scene.push(DrawCommand::Text {
        text: style.x_title.clone(),
        at: Point::new(area.left + area.width / 2.0, scene.height - 4.0),
        color: style.text_color.clone(),
        font: style.title_font.clone(),
        align: TextAlign::Center,
        baseline: TextBaseline::Bottom,
        rotation: 0.0,
    });
}
