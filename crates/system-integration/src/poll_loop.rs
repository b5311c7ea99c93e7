//! Poll loop state: running flag, interval and the epoch/sequence guards
//! that decide whether a finished tick may still touch the session.

use data_manager::{ApiClient, HttpTransport};
use futures::future::{join_all, LocalBoxFuture};
use serde::Serialize;
use serde_json::Value;
use shared_types::config::{parse_poll_interval, DEFAULT_POLL_INTERVAL_MS};
use shared_types::{Tag, ViewerError, ViewerResult};
use std::rc::Rc;

/// Callback a [`PollDriver`] invokes on every period
pub type TickFn = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Host timer that drives the loop.
///
/// `start` must fire the first tick right away and then one every
/// `interval_ms`. A driver is only ever started while stopped.
pub trait PollDriver {
    fn start(&mut self, interval_ms: u32, tick: TickFn);
    fn stop(&mut self);
}

/// Identifies one tick for the staleness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTicket {
    pub epoch: u64,
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagUpdate {
    pub tag: Tag,
    /// Samples accepted from this response
    pub applied: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagFailure {
    pub tag: Tag,
    pub error: ViewerError,
}

/// What one tick did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum TickOutcome {
    /// No endpoint configured; nothing was requested
    MissingEndpoint,
    /// Nothing selected
    Idle,
    /// Every selected tag answered
    Healthy { updated: Vec<TagUpdate> },
    /// At least one tag failed; the others were still applied
    Degraded {
        updated: Vec<TagUpdate>,
        failed: Vec<TagFailure>,
    },
    /// Finished after a stop, restart or newer tick; results discarded
    Stale,
    /// Tick requested while the loop is stopped
    NotRunning,
}

impl TickOutcome {
    pub fn from_results(updated: Vec<TagUpdate>, failed: Vec<TagFailure>) -> Self {
        if failed.is_empty() {
            TickOutcome::Healthy { updated }
        } else {
            TickOutcome::Degraded { updated, failed }
        }
    }

    pub fn failed_tags(&self) -> Vec<&Tag> {
        match self {
            TickOutcome::Degraded { failed, .. } => failed.iter().map(|f| &f.tag).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollLoop {
    running: bool,
    interval_ms: u32,
    epoch: u64,
    next_sequence: u64,
    last_applied: u64,
}

impl Default for PollLoop {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL_MS)
    }
}

impl PollLoop {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            running: false,
            interval_ms: normalize_interval(interval_ms),
            epoch: 0,
            next_sequence: 1,
            last_applied: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Zero falls back to the default interval
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = normalize_interval(interval_ms);
    }

    pub fn set_interval_input(&mut self, input: &str) -> u32 {
        self.interval_ms = parse_poll_interval(input);
        self.interval_ms
    }

    /// Returns false when already running
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.epoch += 1;
        true
    }

    /// Returns false when already stopped
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.epoch += 1;
        true
    }

    /// Hand out a ticket for a new tick, `None` while stopped
    pub fn begin_tick(&mut self) -> Option<TickTicket> {
        if !self.running {
            return None;
        }
        let ticket = TickTicket {
            epoch: self.epoch,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        Some(ticket)
    }

    /// Same epoch and nothing newer applied yet
    pub fn is_current(&self, ticket: TickTicket) -> bool {
        self.running && ticket.epoch == self.epoch && ticket.sequence > self.last_applied
    }

    /// Claim the right to apply `ticket`'s results
    pub fn commit(&mut self, ticket: TickTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.last_applied = ticket.sequence;
        true
    }
}

fn normalize_interval(interval_ms: u32) -> u32 {
    if interval_ms == 0 {
        DEFAULT_POLL_INTERVAL_MS
    } else {
        interval_ms
    }
}

/// Fetch every tag concurrently and wait for all of them.
///
/// Results come back in `tags` order; one failure never cancels the rest.
pub async fn fetch_all<T: HttpTransport>(
    client: &ApiClient<T>,
    base: &str,
    tags: &[Tag],
) -> Vec<(Tag, ViewerResult<Vec<Value>>)> {
    join_all(tags.iter().map(|tag| async move {
        let result = client.fetch_samples(base, tag).await;
        (tag.clone(), result)
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop_are_idempotent() {
        let mut poll = PollLoop::default();
        assert!(poll.start());
        let epoch = poll.epoch();
        assert!(!poll.start());
        assert_eq!(poll.epoch(), epoch);

        assert!(poll.stop());
        assert!(!poll.stop());
        assert_eq!(poll.epoch(), epoch + 1);
    }

    #[test]
    fn test_no_ticket_while_stopped() {
        let mut poll = PollLoop::default();
        assert_eq!(poll.begin_tick(), None);
    }

    #[test]
    fn test_stop_makes_ticket_stale() {
        let mut poll = PollLoop::default();
        poll.start();
        let ticket = poll.begin_tick().unwrap();
        poll.stop();
        poll.start();
        assert!(!poll.commit(ticket));
    }

    #[test]
    fn test_older_tick_loses_to_newer() {
        let mut poll = PollLoop::default();
        poll.start();
        let older = poll.begin_tick().unwrap();
        let newer = poll.begin_tick().unwrap();

        assert!(poll.commit(newer));
        assert!(!poll.commit(older));
    }

    #[test]
    fn test_in_order_ticks_both_apply() {
        let mut poll = PollLoop::default();
        poll.start();
        let first = poll.begin_tick().unwrap();
        let second = poll.begin_tick().unwrap();
        assert!(poll.commit(first));
        assert!(poll.commit(second));
        assert!(!poll.commit(second));
    }

    #[test]
    fn test_interval_falls_back_to_default() {
        let mut poll = PollLoop::new(0);
        assert_eq!(poll.interval_ms(), 1000);
        assert_eq!(poll.set_interval_input("abc"), 1000);
        assert_eq!(poll.set_interval_input("250"), 250);
        poll.set_interval(0);
        assert_eq!(poll.interval_ms(), 1000);
    }

    #[test]
    fn test_outcome_classification() {
        let update = TagUpdate {
            tag: Tag::from("a"),
            applied: 2,
        };
        assert!(matches!(
            TickOutcome::from_results(vec![update.clone()], vec![]),
            TickOutcome::Healthy { .. }
        ));
        let outcome = TickOutcome::from_results(
            vec![update],
            vec![TagFailure {
                tag: Tag::from("b"),
                error: ViewerError::Http {
                    status: 500,
                    status_text: "Internal Server Error".to_string(),
                },
            }],
        );
        assert_eq!(outcome.failed_tags(), vec![&Tag::from("b")]);
    }
}
