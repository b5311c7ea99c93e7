//! Everything one dashboard owns, with the synchronous halves of each
//! operation. Nothing here awaits; [`crate::Dashboard`] sequences these
//! steps around the network calls.

use crate::chart_lifecycle::{ChartBackend, ChartLifecycle};
use crate::poll_loop::{PollLoop, TagFailure, TagUpdate, TickOutcome, TickTicket};
use crate::selection::{SelectionState, Toggle};
use crate::status_reporter::{BannerChange, StatusReporter, LABEL_POLLING, LABEL_STOPPED};
use data_manager::{Series, SeriesStore, TagRegistry};
use serde::Serialize;
use serde_json::Value;
use shared_types::{ConnectionStatus, Tag, ViewerConfig, ViewerError, ViewerResult};

/// First half of a tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickPlan {
    /// Request these tags from `base`
    Fetch {
        ticket: TickTicket,
        base: String,
        tags: Vec<Tag>,
    },
    /// Nothing to request; the outcome is already known
    Done(TickOutcome),
}

/// Plain-data view of the session for hosts and JavaScript
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub status: ConnectionStatus,
    pub polling: bool,
    pub interval_ms: u32,
    pub endpoint: String,
    pub tags: Vec<Tag>,
    pub selected: Vec<Tag>,
    pub banner: Option<String>,
}

pub struct DashboardSession<B: ChartBackend> {
    config: ViewerConfig,
    registry: TagRegistry,
    selection: SelectionState,
    series: SeriesStore,
    charts: ChartLifecycle<B>,
    poll: PollLoop,
    reporter: StatusReporter,
    /// Bumped per tag refresh; only the newest refresh may apply
    tag_request: u64,
}

impl<B: ChartBackend> DashboardSession<B> {
    pub fn new(config: ViewerConfig, backend: B) -> Self {
        let validation = config.validate();
        for warning in &validation.warnings {
            log::warn!("Config: {warning}");
        }
        for error in &validation.errors {
            log::error!("Config: {error}");
        }

        Self {
            registry: TagRegistry::new(),
            selection: SelectionState::new(),
            series: SeriesStore::new(config.max_points),
            charts: ChartLifecycle::new(backend),
            poll: PollLoop::new(config.poll_interval_ms),
            reporter: StatusReporter::new(config.error_display_ms),
            tag_request: 0,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn series(&self, tag: &Tag) -> Option<&Series> {
        self.series.get(tag)
    }

    pub fn charts(&self) -> &ChartLifecycle<B> {
        &self.charts
    }

    pub fn charts_mut(&mut self) -> &mut ChartLifecycle<B> {
        &mut self.charts
    }

    pub fn poll(&self) -> &PollLoop {
        &self.poll
    }

    pub fn reporter(&self) -> &StatusReporter {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut StatusReporter {
        &mut self.reporter
    }

    pub fn status(&self) -> &ConnectionStatus {
        self.reporter.status()
    }

    pub fn set_endpoint(&mut self, raw: &str) {
        self.config.set_endpoint(raw);
        log::info!("API endpoint set to {:?}", self.config.endpoint);
    }

    /// Returns the effective interval
    pub fn set_poll_interval_input(&mut self, input: &str) -> u32 {
        self.config.set_poll_interval_input(input);
        let interval = self.config.poll_interval_ms;
        self.poll.set_interval(interval);
        interval
    }

    pub fn set_poll_interval_ms(&mut self, interval_ms: u32) -> u32 {
        self.poll.set_interval(interval_ms);
        self.config.poll_interval_ms = self.poll.interval_ms();
        self.config.poll_interval_ms
    }

    /// Select or deselect `tag`, keeping selection, charts and series in
    /// lock step. A failed chart creation leaves the tag unselected.
    pub fn toggle(&mut self, tag: &Tag) -> ViewerResult<Toggle> {
        if self.selection.remove(tag) {
            self.charts.destroy(tag);
            self.series.remove(tag);
            log::info!("Deselected {tag}");
            return Ok(Toggle::Deselected);
        }

        let color = self.registry.ensure_color(tag);
        self.charts.create(tag, color)?;
        self.selection.insert(tag.clone());
        self.series.create(tag);
        log::info!("Selected {tag}");
        Ok(Toggle::Selected)
    }

    /// Start the loop's bookkeeping. Refuses an empty selection.
    pub fn start_polling(&mut self) -> ViewerResult<bool> {
        if self.poll.is_running() {
            return Ok(false);
        }
        if self.selection.is_empty() {
            return Err(ViewerError::NoTagsSelected);
        }
        self.poll.start();
        log::info!(
            "Polling {} tag(s) every {} ms",
            self.selection.len(),
            self.poll.interval_ms()
        );
        Ok(true)
    }

    /// Bump the loop's epoch so in-flight ticks go stale, keeping it
    /// running. Unlike `start_polling` an empty selection is fine here.
    /// Returns false when the loop was not running.
    pub fn restart_polling(&mut self) -> bool {
        if !self.poll.stop() {
            return false;
        }
        self.poll.start();
        log::info!("Polling restarted every {} ms", self.poll.interval_ms());
        true
    }

    pub fn stop_polling(&mut self) -> bool {
        if !self.poll.stop() {
            return false;
        }
        self.reporter
            .set_status(ConnectionStatus::disconnected(LABEL_STOPPED));
        log::info!("Polling stopped");
        true
    }

    pub fn plan_tick(&mut self, now_ms: i64) -> (TickPlan, BannerChange) {
        let Some(ticket) = self.poll.begin_tick() else {
            return (TickPlan::Done(TickOutcome::NotRunning), BannerChange::Unchanged);
        };

        let outcome = match self.config.endpoint_base() {
            None => TickOutcome::MissingEndpoint,
            Some(_) if self.selection.is_empty() => TickOutcome::Idle,
            Some(base) => {
                self.reporter
                    .set_status(ConnectionStatus::connecting(LABEL_POLLING));
                let plan = TickPlan::Fetch {
                    ticket,
                    base,
                    tags: self.selection.tags().to_vec(),
                };
                return (plan, BannerChange::Unchanged);
            }
        };

        let change = self.reporter.apply_outcome(&outcome, now_ms);
        (TickPlan::Done(outcome), change)
    }

    /// Second half of a tick: merge whatever arrived, unless a stop,
    /// restart or newer tick got there first.
    pub fn apply_tick(
        &mut self,
        ticket: TickTicket,
        results: Vec<(Tag, ViewerResult<Vec<Value>>)>,
        now_ms: i64,
    ) -> (TickOutcome, BannerChange) {
        if !self.poll.commit(ticket) {
            log::debug!(
                "Discarding stale tick {} (epoch {})",
                ticket.sequence,
                ticket.epoch
            );
            return (TickOutcome::Stale, BannerChange::Unchanged);
        }

        let mut updated = Vec::new();
        let mut failed = Vec::new();
        for (tag, result) in results {
            match result {
                Ok(raw) => {
                    let applied = self.series.merge(&tag, &raw);
                    if applied > 0 {
                        if let Some(series) = self.series.get(&tag) {
                            if let Err(e) = self.charts.update(&tag, series) {
                                log::error!("Failed to update chart for {tag}: {e}");
                            }
                        }
                    }
                    updated.push(TagUpdate { tag, applied });
                }
                Err(error) => {
                    log::error!("Error fetching data for {tag}: {error}");
                    failed.push(TagFailure { tag, error });
                }
            }
        }

        let outcome = TickOutcome::from_results(updated, failed);
        let change = self.reporter.apply_outcome(&outcome, now_ms);
        (outcome, change)
    }

    /// Claim a tag refresh; returns its request number and endpoint base
    pub fn begin_tag_refresh(&mut self) -> ViewerResult<(u64, String)> {
        let base = self
            .config
            .endpoint_base()
            .ok_or(ViewerError::MissingEndpoint)?;
        self.tag_request += 1;
        Ok((self.tag_request, base))
    }

    /// Apply a finished refresh. Returns false when a newer refresh has
    /// started since, in which case nothing changes.
    pub fn finish_tag_refresh(&mut self, request: u64, tags: Vec<Tag>) -> bool {
        if request != self.tag_request {
            log::debug!("Ignoring superseded tag refresh #{request}");
            return false;
        }
        self.registry.replace(tags);
        true
    }

    pub fn is_current_tag_refresh(&self, request: u64) -> bool {
        request == self.tag_request
    }

    pub fn snapshot(&self, now_ms: i64) -> DashboardSnapshot {
        DashboardSnapshot {
            status: self.reporter.status().clone(),
            polling: self.poll.is_running(),
            interval_ms: self.poll.interval_ms(),
            endpoint: self.config.endpoint.clone(),
            tags: self.registry.tags().to_vec(),
            selected: self.selection.tags().to_vec(),
            banner: self.reporter.banner_at(now_ms).map(|b| b.message.clone()),
        }
    }
}
