//! The handle hosts hold: sequences the session's synchronous steps around
//! network awaits and pushes every change out to the view.

use crate::chart_lifecycle::ChartBackend;
use crate::poll_loop::{fetch_all, PollDriver, TickFn, TickOutcome};
use crate::selection::{SelectionState, Toggle};
use crate::session::{DashboardSession, DashboardSnapshot, TickPlan};
use crate::status_reporter::{
    Banner, BannerChange, LABEL_TESTING, LABEL_TEST_FAILED, LABEL_TEST_OK,
};
use data_manager::{ApiClient, HttpTransport, Series};
use futures::FutureExt;
use shared_types::{now_ms, ConnectionStatus, Tag, ViewerConfig, ViewerError, ViewerResult};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Page-level output: status badge, tag list, banner and controls.
///
/// Every method has a no-op default so headless hosts only implement what
/// they display.
pub trait DashboardView {
    fn show_status(&self, _status: &ConnectionStatus) {}

    /// A tag refresh is in flight
    fn show_tags_loading(&self) {}

    /// Known tags with their selection marks; `tags` may be empty
    fn show_tags(&self, _tags: &[Tag], _selection: &SelectionState) {}

    fn show_tags_error(&self, _message: &str) {}

    /// Show `banner` for `display_ms`. A later banner replaces it.
    fn show_banner(&self, _banner: &Banner, _display_ms: u32) {}

    fn hide_banner(&self) {}

    fn show_polling(&self, _running: bool) {}

    fn show_selected_count(&self, _text: &str) {}
}

/// Result of a tag refresh that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRefresh {
    Applied(Vec<Tag>),
    /// A newer refresh started while this one was in flight
    Superseded,
}

struct Inner<T, B: ChartBackend> {
    session: RefCell<DashboardSession<B>>,
    client: ApiClient<T>,
    view: Box<dyn DashboardView>,
    driver: RefCell<Box<dyn PollDriver>>,
}

/// Cheap-to-clone dashboard handle.
///
/// Session borrows never cross an await, so any callback may call back in
/// while a request is outstanding.
pub struct Dashboard<T, B: ChartBackend> {
    inner: Rc<Inner<T, B>>,
}

impl<T, B: ChartBackend> Clone for Dashboard<T, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, B> Dashboard<T, B>
where
    T: HttpTransport + 'static,
    B: ChartBackend + 'static,
{
    pub fn new(
        config: ViewerConfig,
        transport: T,
        backend: B,
        view: impl DashboardView + 'static,
        driver: impl PollDriver + 'static,
    ) -> Self {
        let dashboard = Self {
            inner: Rc::new(Inner {
                session: RefCell::new(DashboardSession::new(config, backend)),
                client: ApiClient::new(transport),
                view: Box::new(view),
                driver: RefCell::new(Box::new(driver)),
            }),
        };

        dashboard.render_status();
        dashboard.render_selected_count();
        dashboard.inner.view.show_polling(false);
        dashboard
    }

    pub fn session(&self) -> Ref<'_, DashboardSession<B>> {
        self.inner.session.borrow()
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.inner.client
    }

    pub fn status(&self) -> ConnectionStatus {
        self.session().status().clone()
    }

    pub fn is_polling(&self) -> bool {
        self.session().poll().is_running()
    }

    pub fn series(&self, tag: &Tag) -> Option<Series> {
        self.session().series(tag).cloned()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.session().snapshot(now_ms())
    }

    /// Select or deselect a tag, creating or tearing down its chart
    pub fn toggle(&self, tag: &Tag) -> ViewerResult<Toggle> {
        let result = self.inner.session.borrow_mut().toggle(tag);
        if let Err(error) = &result {
            log::error!("Failed to toggle {tag}: {error}");
            self.report_error(error.to_string());
        }
        self.render_tags();
        self.render_selected_count();
        result
    }

    /// Start polling; `Ok(false)` if it was already running
    pub fn start(&self) -> ViewerResult<bool> {
        let started = self.inner.session.borrow_mut().start_polling();
        match started {
            Ok(true) => {
                let interval = self.session().poll().interval_ms();
                self.inner.view.show_polling(true);
                self.inner
                    .driver
                    .borrow_mut()
                    .start(interval, self.tick_fn());
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(error) => {
                self.report_error(error.to_string());
                Err(error)
            }
        }
    }

    /// Stop polling; false if it was not running
    pub fn stop(&self) -> bool {
        if !self.inner.session.borrow_mut().stop_polling() {
            return false;
        }
        self.inner.driver.borrow_mut().stop();
        self.inner.view.show_polling(false);
        self.render_status();
        true
    }

    /// Start when stopped, stop when running. Returns whether it now runs.
    pub fn toggle_polling(&self) -> ViewerResult<bool> {
        if self.is_polling() {
            self.stop();
            return Ok(false);
        }
        self.start().map(|_| true)
    }

    /// One poll of every selected tag
    pub async fn tick(&self) -> TickOutcome {
        let (plan, change) = self.inner.session.borrow_mut().plan_tick(now_ms());
        self.render_status();
        self.publish_banner(change);

        let (ticket, base, tags) = match plan {
            TickPlan::Done(outcome) => return outcome,
            TickPlan::Fetch { ticket, base, tags } => (ticket, base, tags),
        };

        let results = fetch_all(&self.inner.client, &base, &tags).await;

        let (outcome, change) = self
            .inner
            .session
            .borrow_mut()
            .apply_tick(ticket, results, now_ms());
        if outcome != TickOutcome::Stale {
            self.render_status();
        }
        self.publish_banner(change);
        outcome
    }

    /// Reload the tag list from `/tags`
    pub async fn refresh_tags(&self) -> ViewerResult<TagRefresh> {
        let begun = self.inner.session.borrow_mut().begin_tag_refresh();
        let (request, base) = match begun {
            Ok(begun) => begun,
            Err(error) => {
                self.report_error(error.to_string());
                return Err(error);
            }
        };

        self.inner.view.show_tags_loading();
        let result = self.inner.client.fetch_tags(&base).await;

        match result {
            Ok(tags) => {
                let applied = self
                    .inner
                    .session
                    .borrow_mut()
                    .finish_tag_refresh(request, tags.clone());
                if !applied {
                    return Ok(TagRefresh::Superseded);
                }
                self.render_tags();
                Ok(TagRefresh::Applied(tags))
            }
            Err(error) => {
                if !self.session().is_current_tag_refresh(request) {
                    return Ok(TagRefresh::Superseded);
                }
                log::error!("Error loading tags: {error}");
                self.inner.view.show_tags_error(&format!("Error: {error}"));
                self.report_error(format!("Failed to load tags: {error}"));
                Err(error)
            }
        }
    }

    /// Probe `/tags` and report the result, then refresh the tag list
    pub async fn test_connection(&self) -> ViewerResult<TagRefresh> {
        let base = self.session().config().endpoint_base();
        let Some(base) = base else {
            let error = ViewerError::MissingEndpoint;
            self.report_error(error.to_string());
            return Err(error);
        };

        self.set_status(ConnectionStatus::connecting(LABEL_TESTING));
        match self.inner.client.fetch_tags(&base).await {
            Ok(tags) => {
                log::info!("Connection test OK: {} tags available", tags.len());
                self.set_status(ConnectionStatus::connected(LABEL_TEST_OK));
                self.refresh_tags().await
            }
            Err(error) => {
                log::error!("Connection test failed: {error}");
                self.set_status(ConnectionStatus::disconnected(LABEL_TEST_FAILED));
                self.report_error(format!("Connection test failed: {error}"));
                Err(error)
            }
        }
    }

    /// Change the endpoint, restart a running loop and reload the tags
    pub async fn set_endpoint(&self, raw: &str) -> ViewerResult<TagRefresh> {
        self.inner.session.borrow_mut().set_endpoint(raw);
        self.restart_if_running();
        self.refresh_tags().await
    }

    /// Change the interval from user input and restart a running loop.
    /// Returns the interval in effect.
    pub fn set_poll_interval(&self, input: &str) -> u32 {
        let interval = self
            .inner
            .session
            .borrow_mut()
            .set_poll_interval_input(input);
        self.restart_if_running();
        interval
    }

    fn restart_if_running(&self) {
        if !self.inner.session.borrow_mut().restart_polling() {
            return;
        }
        let interval = self.session().poll().interval_ms();
        let mut driver = self.inner.driver.borrow_mut();
        driver.stop();
        driver.start(interval, self.tick_fn());
    }

    fn tick_fn(&self) -> TickFn {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move || {
            let weak = weak.clone();
            async move {
                if let Some(inner) = weak.upgrade() {
                    let dashboard = Dashboard { inner };
                    dashboard.tick().await;
                }
            }
            .boxed_local()
        })
    }

    fn set_status(&self, status: ConnectionStatus) {
        self.inner.session.borrow_mut().reporter_mut().set_status(status);
        self.render_status();
    }

    fn report_error(&self, message: String) {
        let (banner, display_ms) = {
            let mut session = self.inner.session.borrow_mut();
            let reporter = session.reporter_mut();
            (reporter.raise(message, now_ms()), reporter.display_ms())
        };
        self.inner.view.show_banner(&banner, display_ms);
    }

    fn publish_banner(&self, change: BannerChange) {
        match change {
            BannerChange::Raised(banner) => {
                let display_ms = self.session().reporter().display_ms();
                self.inner.view.show_banner(&banner, display_ms);
            }
            BannerChange::Cleared => self.inner.view.hide_banner(),
            BannerChange::Unchanged => {}
        }
    }

    fn render_status(&self) {
        let status = self.status();
        self.inner.view.show_status(&status);
    }

    fn render_tags(&self) {
        let session = self.session();
        self.inner
            .view
            .show_tags(session.registry().tags(), session.selection());
    }

    fn render_selected_count(&self) {
        let text = self.session().selection().summary();
        self.inner.view.show_selected_count(&text);
    }
}
