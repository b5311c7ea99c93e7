//! Headless chart backend and view that report through `tracing`

use renderer::format_tooltip_title;
use shared_types::{Color, ConnectionState, ConnectionStatus, Tag, ViewerResult};
use std::cell::RefCell;
use system_integration::{Banner, ChartBackend, DashboardView, SelectionState};
use tracing::{debug, error, info, warn};

/// What a terminal "chart" keeps: enough to print the newest point
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleChart {
    pub tag: Tag,
    pub color: Color,
    pub points: usize,
    pub last_label: Option<String>,
    pub latest: String,
}

#[derive(Debug, Default)]
pub struct ConsoleCharts {
    empty: bool,
}

impl ConsoleCharts {
    pub fn is_empty_state(&self) -> bool {
        self.empty
    }
}

impl ChartBackend for ConsoleCharts {
    type Handle = ConsoleChart;

    fn create_chart(&mut self, tag: &Tag, color: Color) -> ViewerResult<ConsoleChart> {
        info!(tag = %tag, color = %color.to_css(1.0), "watching tag");
        Ok(ConsoleChart {
            tag: tag.clone(),
            color,
            points: 0,
            last_label: None,
            latest: String::new(),
        })
    }

    fn update_chart(
        &mut self,
        handle: &mut ConsoleChart,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> ViewerResult<()> {
        handle.points = labels.len().min(values.len());
        handle.last_label = labels.into_iter().last();
        debug!(tag = %handle.tag, points = handle.points, "series updated");
        Ok(())
    }

    fn set_latest_value(&mut self, handle: &mut ConsoleChart, text: &str) {
        handle.latest = text.to_string();
        match &handle.last_label {
            Some(label) => info!(
                tag = %handle.tag,
                at = %format_tooltip_title(label),
                "{text}"
            ),
            None => debug!(tag = %handle.tag, "{text}"),
        }
    }

    fn destroy_chart(&mut self, tag: &Tag, _handle: ConsoleChart) {
        info!(tag = %tag, "stopped watching tag");
    }

    fn set_empty_state(&mut self, empty: bool) {
        self.empty = empty;
    }
}

/// Logs status changes and banners. Repeated statuses are collapsed so a
/// healthy poll loop does not print on every tick.
#[derive(Debug, Default)]
pub struct TracingView {
    last_status: RefCell<Option<ConnectionStatus>>,
}

impl DashboardView for TracingView {
    fn show_status(&self, status: &ConnectionStatus) {
        let mut last = self.last_status.borrow_mut();
        if last.as_ref() == Some(status) {
            return;
        }
        match status.state {
            ConnectionState::Connected => info!(status = %status.label),
            ConnectionState::Connecting => debug!(status = %status.label),
            ConnectionState::Disconnected => warn!(status = %status.label),
        }
        *last = Some(status.clone());
    }

    fn show_tags(&self, tags: &[Tag], selection: &SelectionState) {
        if tags.is_empty() {
            info!("No tags available");
            return;
        }
        for tag in tags {
            let mark = if selection.is_selected(tag) { "*" } else { " " };
            info!("{mark} {tag}");
        }
    }

    fn show_tags_error(&self, message: &str) {
        error!("{message}");
    }

    fn show_banner(&self, banner: &Banner, _display_ms: u32) {
        error!("{}", banner.message);
    }

    fn show_polling(&self, running: bool) {
        debug!(running, "polling");
    }

    fn show_selected_count(&self, text: &str) {
        debug!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_manager::Series;
    use shared_types::{Sample, PALETTE};
    use system_integration::ChartLifecycle;

    #[test]
    fn test_lifecycle_tracks_latest_value() {
        let tag = Tag::from("temp1");
        let mut charts = ChartLifecycle::new(ConsoleCharts::default());
        assert!(charts.backend().is_empty_state());

        assert!(charts.create(&tag, PALETTE[0]).unwrap());
        assert!(!charts.backend().is_empty_state());

        let mut series = Series::new(10);
        series.merge_samples([
            Sample::new(1_700_000_000_000, 21.456),
            Sample::new(1_700_000_001_000, 22.0),
        ]);
        assert!(charts.update(&tag, &series).unwrap());

        assert!(charts.destroy(&tag));
        assert!(charts.backend().is_empty_state());
    }

    #[test]
    fn test_create_chart_starts_blank() {
        let mut backend = ConsoleCharts::default();
        let mut chart = backend.create_chart(&Tag::from("t"), PALETTE[1]).unwrap();
        assert_eq!(chart.points, 0);

        backend
            .update_chart(&mut chart, vec!["1".into(), "2".into()], vec![1.0, 2.0])
            .unwrap();
        backend.set_latest_value(&mut chart, "2.00");
        assert_eq!(chart.points, 2);
        assert_eq!(chart.last_label.as_deref(), Some("2"));
        assert_eq!(chart.latest, "2.00");
    }

    #[test]
    fn test_repeated_status_is_collapsed() {
        let view = TracingView::default();
        let status = ConnectionStatus::connected("Connected");
        view.show_status(&status);
        view.show_status(&status);
        assert_eq!(view.last_status.borrow().as_ref(), Some(&status));
    }
}
