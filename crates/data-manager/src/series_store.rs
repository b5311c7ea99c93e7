//! Bounded per-tag time series backing each chart

use crate::sample_parser::{parse_sample, warn_if_suspicious};
use serde_json::Value;
use shared_types::{Sample, Tag};
use std::collections::HashMap;

pub use shared_types::config::DEFAULT_MAX_POINTS;

/// Samples for one tag, strictly ascending by timestamp and never longer
/// than `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
    capacity: usize,
}

impl Series {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Stringified timestamps, as fed to the chart's x axis
    pub fn labels(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.timestamp.to_string()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Merge already validated samples.
    ///
    /// The result is sorted, holds one sample per timestamp (the one merged
    /// last wins) and keeps only the newest `capacity` entries.
    pub fn merge_samples<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = Sample>,
    {
        let before = self.samples.len();
        self.samples.extend(incoming);
        let applied = self.samples.len() - before;
        if applied == 0 {
            return 0;
        }

        // Stable sort keeps arrival order within equal timestamps
        self.samples.sort_by_key(|s| s.timestamp);

        let mut deduped: Vec<Sample> = Vec::with_capacity(self.samples.len());
        for sample in self.samples.drain(..) {
            match deduped.last_mut() {
                Some(last) if last.timestamp == sample.timestamp => *last = sample,
                _ => deduped.push(sample),
            }
        }
        self.samples = deduped;

        if self.samples.len() > self.capacity {
            let excess = self.samples.len() - self.capacity;
            self.samples.drain(..excess);
        }

        applied
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// One series per selected tag
#[derive(Debug)]
pub struct SeriesStore {
    series: HashMap<Tag, Series>,
    capacity: usize,
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}

impl SeriesStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            series: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Start a fresh, empty series for `tag`, discarding any previous one
    pub fn create(&mut self, tag: &Tag) {
        self.series.insert(tag.clone(), Series::new(self.capacity));
    }

    pub fn remove(&mut self, tag: &Tag) -> Option<Series> {
        self.series.remove(tag)
    }

    pub fn get(&self, tag: &Tag) -> Option<&Series> {
        self.series.get(tag)
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.series.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    /// Validate `raw` entries and merge the good ones into the tag's series.
    ///
    /// Returns how many entries were accepted. Bad entries are logged and
    /// skipped; they never affect their siblings. A tag without a series
    /// (deselected while its request was in flight) accepts nothing.
    pub fn merge(&mut self, tag: &Tag, raw: &[Value]) -> usize {
        let Some(series) = self.series.get_mut(tag) else {
            log::debug!("Dropping {} samples for unselected tag {tag}", raw.len());
            return 0;
        };

        let mut accepted = Vec::with_capacity(raw.len());
        for entry in raw {
            match parse_sample(entry) {
                Ok(sample) => {
                    warn_if_suspicious(tag.as_str(), &sample);
                    accepted.push(sample);
                }
                Err(reason) => log::warn!("Invalid sample for {tag}: {reason}"),
            }
        }

        if accepted.is_empty() && !raw.is_empty() {
            log::warn!("No valid data points for {tag}");
        }

        series.merge_samples(accepted)
    }
}
