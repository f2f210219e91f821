//! Browser collaborators

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::sim::{Layout, Size, Target, TimerHandle, Timers};

/// Measures elements by id (`offsetWidth` / `offsetHeight`)
#[derive(Debug, Default, Clone, Copy)]
pub struct DomLayout;

impl Layout for DomLayout {
    fn measure(&self, target: Target) -> Option<Size> {
        let document = web_sys::window()?.document()?;
        let el: HtmlElement = document
            .get_element_by_id(&target.element_id())?
            .dyn_into()
            .ok()?;
        Some(Size::new(
            el.offset_width().max(0) as u32,
            el.offset_height().max(0) as u32,
        ))
    }
}

/// `setTimeout` timers. Fired handles queue up until the frame loop drains
/// them, so timeout callbacks never need to borrow the game.
#[derive(Debug, Default)]
pub struct WebTimers {
    next_id: u32,
    /// Our handle -> browser timeout id
    live: HashMap<TimerHandle, i32>,
    fired: Rc<RefCell<Vec<TimerHandle>>>,
}

impl WebTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles fired since the last call, in firing order
    pub fn drain_fired(&mut self) -> Vec<TimerHandle> {
        let fired: Vec<TimerHandle> = self.fired.borrow_mut().drain(..).collect();
        for handle in &fired {
            self.live.remove(handle);
        }
        fired
    }
}

impl Timers for WebTimers {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);

        let Some(window) = web_sys::window() else {
            log::error!("No window, timer {:?} will never fire", handle);
            return handle;
        };

        let fired = self.fired.clone();
        let callback = Closure::once_into_js(move || {
            fired.borrow_mut().push(handle);
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay.as_millis().min(i32::MAX as u128) as i32,
        ) {
            Ok(id) => {
                self.live.insert(handle, id);
            }
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(id) = self.live.remove(&handle) {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(id);
            }
        }
        // Already fired but not drained yet
        self.fired.borrow_mut().retain(|h| *h != handle);
    }
}

/// Value of a query-string parameter
pub fn query_param(key: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(key)
}

/// Seed for a new session
pub fn session_seed() -> u64 {
    js_sys::Date::now() as u64
}
