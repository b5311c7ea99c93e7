//! One chart per selected tag, created and torn down with the selection

use data_manager::Series;
use renderer::format_value;
use shared_types::{Color, Tag, ViewerResult};
use std::collections::HashMap;

/// Text shown in a card before its first sample arrives
pub const NO_VALUE: &str = "--";

/// Host-specific chart implementation.
///
/// The browser draws on canvases, the command line host logs; tests record
/// calls. The lifecycle manager guarantees at most one live handle per tag.
pub trait ChartBackend {
    type Handle;

    /// Build an empty chart (and its card) for `tag` drawn in `color`
    fn create_chart(&mut self, tag: &Tag, color: Color) -> ViewerResult<Self::Handle>;

    /// Replace the plotted data without animation
    fn update_chart(
        &mut self,
        handle: &mut Self::Handle,
        labels: Vec<String>,
        values: Vec<f64>,
    ) -> ViewerResult<()>;

    /// Latest-value text in the card header
    fn set_latest_value(&mut self, handle: &mut Self::Handle, text: &str);

    fn destroy_chart(&mut self, tag: &Tag, handle: Self::Handle);

    /// Show or hide the "No Tags Selected" placeholder
    fn set_empty_state(&mut self, empty: bool);
}

pub struct ChartLifecycle<B: ChartBackend> {
    backend: B,
    charts: HashMap<Tag, B::Handle>,
}

impl<B: ChartBackend> ChartLifecycle<B> {
    pub fn new(mut backend: B) -> Self {
        backend.set_empty_state(true);
        Self {
            backend,
            charts: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.charts.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Create the chart for `tag`. Returns false if one already exists.
    pub fn create(&mut self, tag: &Tag, color: Color) -> ViewerResult<bool> {
        if self.charts.contains_key(tag) {
            return Ok(false);
        }

        let was_empty = self.charts.is_empty();
        let mut handle = self.backend.create_chart(tag, color)?;
        self.backend.set_latest_value(&mut handle, NO_VALUE);
        self.charts.insert(tag.clone(), handle);

        if was_empty {
            self.backend.set_empty_state(false);
        }
        log::debug!("Created chart for {tag}");
        Ok(true)
    }

    /// Push the series into the tag's chart. A tag without a chart is
    /// skipped and reported as `Ok(false)`.
    pub fn update(&mut self, tag: &Tag, series: &Series) -> ViewerResult<bool> {
        let Some(handle) = self.charts.get_mut(tag) else {
            return Ok(false);
        };

        self.backend
            .update_chart(handle, series.labels(), series.values())?;
        let latest = series
            .latest()
            .map(|s| format_value(s.value))
            .unwrap_or_else(|| NO_VALUE.to_string());
        self.backend.set_latest_value(handle, &latest);
        Ok(true)
    }

    /// Dispose of the tag's chart; shows the empty state after the last one
    pub fn destroy(&mut self, tag: &Tag) -> bool {
        let Some(handle) = self.charts.remove(tag) else {
            return false;
        };
        self.backend.destroy_chart(tag, handle);
        if self.charts.is_empty() {
            self.backend.set_empty_state(true);
        }
        log::debug!("Destroyed chart for {tag}");
        true
    }

    pub fn destroy_all(&mut self) {
        let tags: Vec<Tag> = self.charts.keys().cloned().collect();
        for tag in tags {
            self.destroy(&tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Sample, ViewerError, PALETTE};

    #[derive(Default)]
    struct LogBackend {
        calls: Vec<String>,
        fail_next_create: bool,
    }

    impl ChartBackend for LogBackend {
        type Handle = Tag;

        fn create_chart(&mut self, tag: &Tag, _color: Color) -> ViewerResult<Tag> {
            if std::mem::take(&mut self.fail_next_create) {
                return Err(ViewerError::Chart {
                    message: "no canvas".to_string(),
                });
            }
            self.calls.push(format!("create {tag}"));
            Ok(tag.clone())
        }

        fn update_chart(
            &mut self,
            handle: &mut Tag,
            labels: Vec<String>,
            _values: Vec<f64>,
        ) -> ViewerResult<()> {
            self.calls.push(format!("update {handle} {}", labels.join(",")));
            Ok(())
        }

        fn set_latest_value(&mut self, handle: &mut Tag, text: &str) {
            self.calls.push(format!("value {handle} {text}"));
        }

        fn destroy_chart(&mut self, tag: &Tag, _handle: Tag) {
            self.calls.push(format!("destroy {tag}"));
        }

        fn set_empty_state(&mut self, empty: bool) {
            self.calls.push(format!("empty {empty}"));
        }
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut charts = ChartLifecycle::new(LogBackend::default());
        let tag = Tag::from("temp1");
        assert!(charts.create(&tag, PALETTE[0]).unwrap());
        assert!(!charts.create(&tag, PALETTE[0]).unwrap());
        assert_eq!(
            charts.backend().calls,
            vec!["empty true", "create temp1", "value temp1 --", "empty false"]
        );
    }

    #[test]
    fn test_update_sets_latest_value() {
        let mut charts = ChartLifecycle::new(LogBackend::default());
        let tag = Tag::from("temp1");
        charts.create(&tag, PALETTE[0]).unwrap();

        let mut series = Series::new(10);
        series.merge_samples([Sample::new(500, 3.0), Sample::new(1000, 5.0)]);
        assert!(charts.update(&tag, &series).unwrap());

        let calls = &charts.backend().calls;
        assert_eq!(calls[calls.len() - 2], "update temp1 500,1000");
        assert_eq!(calls[calls.len() - 1], "value temp1 5.00");
        assert!(!charts.update(&Tag::from("other"), &series).unwrap());
    }

    #[test]
    fn test_last_destroy_shows_empty_state() {
        let mut charts = ChartLifecycle::new(LogBackend::default());
        let (a, b) = (Tag::from("a"), Tag::from("b"));
        charts.create(&a, PALETTE[0]).unwrap();
        charts.create(&b, PALETTE[1]).unwrap();

        assert!(charts.destroy(&a));
        assert_ne!(charts.backend().calls.last().unwrap(), "empty true");
        assert!(charts.destroy(&b));
        assert_eq!(charts.backend().calls.last().unwrap(), "empty true");
        assert!(!charts.destroy(&b));
    }

    #[test]
    fn test_failed_create_leaves_no_chart() {
        let mut charts = ChartLifecycle::new(LogBackend {
            fail_next_create: true,
            ..Default::default()
        });
        let tag = Tag::from("temp1");
        assert!(charts.create(&tag, PALETTE[0]).is_err());
        assert!(!charts.contains(&tag));
        assert!(charts.create(&tag, PALETTE[0]).unwrap());
    }
}
