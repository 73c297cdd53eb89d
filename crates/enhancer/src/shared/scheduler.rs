//! Delayed task scheduling
//!
//! The host renders in several passes without a completion signal, so scans
//! are retried after fixed delays. The trait keeps that testable.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

pub type Task = Box<dyn FnOnce() + 'static>;

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task);
}

/// Runs tasks on the page event loop after `delay_ms`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            task();
        });
    }
}

/// Queues tasks until the test drains them.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ManualScheduler {
    queue: std::cell::RefCell<Vec<(u32, Task)>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn pending_delays(&self) -> Vec<u32> {
        self.queue.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Runs queued tasks in delay order, including ones they schedule.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                if queue.is_empty() {
                    break;
                }
                // stable: equal delays run in scheduling order
                queue.sort_by_key(|(delay, _)| *delay);
                queue.remove(0)
            };
            (next.1)();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        self.queue.borrow_mut().push((delay_ms, task));
    }
}
