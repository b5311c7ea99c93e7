//! `setInterval`-backed poll driver

use system_integration::{PollDriver, TickFn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

struct ActiveInterval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

#[derive(Default)]
pub struct IntervalDriver {
    active: Option<ActiveInterval>,
}

impl PollDriver for IntervalDriver {
    fn start(&mut self, interval_ms: u32, tick: TickFn) {
        self.stop();

        // First poll right away, the interval only fires after one period
        spawn_local(tick());

        let callback = Closure::wrap(Box::new(move || {
            spawn_local(tick());
        }) as Box<dyn FnMut()>);

        let Some(window) = web_sys::window() else {
            log::error!("No window object available; polling will not repeat");
            return;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => {
                self.active = Some(ActiveInterval {
                    handle,
                    _callback: callback,
                })
            }
            Err(e) => log::error!("Failed to start poll interval: {e:?}"),
        }
    }

    fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(active.handle);
            }
        }
    }
}
