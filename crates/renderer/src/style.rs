//! Visual constants for the per-tag line charts

/// Space reserved around the plot for tick labels and axis titles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub grid_color: String,
    pub text_color: String,
    pub font: String,
    pub title_font: String,
    pub line_width: f64,
    /// Opacity of the area fill under the line
    pub fill_alpha: f32,
    pub point_hover_radius: f64,
    pub tooltip_background: String,
    pub tooltip_text_color: String,
    pub tooltip_padding: f64,
    pub margins: Margins,
    pub max_x_ticks: usize,
    pub x_title: String,
    pub y_title: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            grid_color: "rgba(71, 85, 105, 0.3)".to_string(),
            text_color: "#94a3b8".to_string(),
            font: "11px sans-serif".to_string(),
            title_font: "12px sans-serif".to_string(),
            line_width: 2.0,
            fill_alpha: 0.1,
            point_hover_radius: 4.0,
            tooltip_background: "rgba(15, 23, 42, 0.9)".to_string(),
            tooltip_text_color: "#e2e8f0".to_string(),
            tooltip_padding: 6.0,
            margins: Margins {
                top: 10.0,
                right: 12.0,
                bottom: 44.0,
                left: 64.0,
            },
            max_x_ticks: 8,
            x_title: "Time".to_string(),
            y_title: "Value".to_string(),
        }
    }
}
