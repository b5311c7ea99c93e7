//! tokio-backed poll driver. Must run inside a `LocalSet`: ticks are
//! `!Send` and are spawned with `spawn_local`.

use std::time::Duration;
use system_integration::{PollDriver, TickFn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Default)]
pub struct TokioDriver {
    task: Option<JoinHandle<()>>,
}

impl PollDriver for TokioDriver {
    fn start(&mut self, interval_ms: u32, tick: TickFn) {
        self.stop();

        let period = Duration::from_millis(u64::from(interval_ms.max(1)));
        self.task = Some(tokio::task::spawn_local(async move {
            // The first tick of a tokio interval completes immediately
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Ticks may overlap like browser intervals; the poll loop's
                // sequence check sorts them out
                tokio::task::spawn_local(tick());
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::cell::Cell;
    use std::rc::Rc;
    use tokio::task::LocalSet;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_immediately_then_every_period() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let count = Rc::new(Cell::new(0));
                let counter = Rc::clone(&count);
                let tick: TickFn = Rc::new(move || {
                    let counter = Rc::clone(&counter);
                    async move { counter.set(counter.get() + 1) }.boxed_local()
                });

                let mut driver = TokioDriver::default();
                driver.start(100, tick);

                tokio::time::sleep(Duration::from_millis(250)).await;
                assert_eq!(count.get(), 3);

                driver.stop();
                tokio::time::sleep(Duration::from_millis(500)).await;
                assert_eq!(count.get(), 3);
            })
            .await;
    }
}
