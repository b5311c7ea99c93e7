//! Horizontal grid lines, value labels and the "Value" title

use crate::formatting::format_axis_value;
use crate::layout::YAxisScale;
use crate::scene::{DrawCommand, Point, Scene, TextAlign, TextBaseline};
use crate::style::ChartStyle;

pub fn draw(scene: &mut Scene, scale: Option<&YAxisScale>, style: &ChartStyle) {
    let area = scene.area;

    if let Some(scale) = scale {
        for tick in scale.ticks() {
            let y = scale.to_screen(tick, &area);
            scene.push(DrawCommand::Line {
                from: Point::new(area.left, y),
                to: Point::new(area.right(), y),
                color: style.grid_color.clone(),
                width: 1.0,
            });
            scene.push(DrawCommand::Text {
                text: format_axis_value(tick, scale.interval),
                at: Point::new(area.left - 6.0, y),
                color: style.text_color.clone(),
                font: style.font.clone(),
                align: TextAlign::Right,
                baseline: TextBaseline::Middle,
                rotation: 0.0,
            });
        }
    }

    scene.push(DrawCommand::Text {
        text: style.y_title.clone(),
        at: Point::new(14.0, area.top + area.height / 2.0),
        color: style.text_color.clone(),
        font: style.title_font.clone(),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        rotation: -std::f64::consts::FRAC_PI_2,
    });
}
