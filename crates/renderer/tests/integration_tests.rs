//! Integration tests for the chart scene

use renderer::layout::PlotArea;
use renderer::{build_scene, format_tick_label, ChartModel, ChartStyle, DrawCommand};
use shared_types::PALETTE;

fn full_window() -> ChartModel {
    let mut model = ChartModel::new(PALETTE[2]);
    let start = 1_700_000_000_000i64;
    model.set_data(
        (0..100).map(|i| (start + i * 1000).to_string()).collect(),
        (0..100).map(|i| (i as f64 / 10.0).sin() * 20.0 + 50.0).collect(),
    );
    model
}

fn tick_labels(commands: &[DrawCommand], area: &PlotArea) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, at, .. } if at.y > area.bottom() && text != "Time" => {
                Some(text.clone())
            }
            _ => None,
        })
        .collect()
}

#[test]
fn test_full_window_renders_within_canvas() {
    let style = ChartStyle::default();
    let scene = build_scene(&full_window(), 480.0, 260.0, None, &style);

    let labels = tick_labels(&scene.commands, &scene.area);
    assert!(!labels.is_empty() && labels.len() <= style.max_x_ticks);
    assert_eq!(labels[0], format_tick_label("1700000000000"));

    for command in &scene.commands {
        if let DrawCommand::Polyline { points, color, .. } = command {
            assert_eq!(points.len(), 100);
            assert_eq!(color, &PALETTE[2].to_css(1.0));
            assert!(points.iter().all(|p| {
                p.x >= scene.area.left
                    && p.x <= scene.area.right()
                    && p.y >= scene.area.top
                    && p.y <= scene.area.bottom()
            }));
        }
    }
}

#[test]
fn test_tooltip_stays_on_canvas_at_right_edge() {
    let scene = build_scene(&full_window(), 480.0, 260.0, Some(99), &ChartStyle::default());
    let rect = scene.commands.iter().find_map(|c| match c {
        DrawCommand::Rect { origin, width, .. } => Some((origin.x, *width)),
        _ => None,
    });
    let (x, width) = rect.expect("tooltip box");
    assert!(x >= 0.0);
    assert!(x + width <= 480.0);
}
