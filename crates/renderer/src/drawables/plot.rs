//! The series line and the translucent fill beneath it

use crate::layout::{x_position, YAxisScale};
use crate::scene::{ChartModel, DrawCommand, Point, Scene};
use crate::style::ChartStyle;

pub fn line_points(model: &ChartModel, scale: &YAxisScale, scene: &Scene) -> Vec<Point> {
    let count = model.len();
    model
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| {
            Point::new(
                x_position(i, count, &scene.area),
                scale.to_screen(*v, &scene.area),
            )
        })
        .collect()
}

pub fn draw(scene: &mut Scene, model: &ChartModel, scale: &YAxisScale, style: &ChartStyle) {
    let points = line_points(model, scale, scene);
    let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
        return;
    };

    let baseline = scene.area.bottom();
    let mut fill = points.clone();
    fill.push(Point::new(last.x, baseline));
    fill.push(Point::new(first.x, baseline));
    scene.push(DrawCommand::FillPolygon {
        points: fill,
        color: model.color.to_css(style.fill_alpha),
    });

    scene.push(DrawCommand::Polyline {
        points,
        color: model.color.to_css(1.0),
        width: style.line_width,
    });
}
