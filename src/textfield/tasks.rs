//! Deferred "next tick" work.
//!
//! The field is single-threaded and event-driven; the only asynchrony it
//! needs is deferring work until after the current update pass (requesting
//! focus, focus-change side effects). Tasks are fire-and-forget, run in FIFO
//! order at the end of the next update, and are skipped wholesale once the
//! field has been detached.

use super::model::Model;

/// A unit of deferred work run against the field on the next update pass.
pub(super) type DeferredTask = Box<dyn FnOnce(&mut Model) + Send>;

/// FIFO queue of deferred tasks.
#[derive(Default)]
pub(super) struct DeferredQueue {
    tasks: Vec<DeferredTask>,
}

impl DeferredQueue {
    pub(super) fn push(&mut self, task: DeferredTask) {
        self.tasks.push(task);
    }

    /// Takes the currently queued tasks. Tasks deferred while draining land
    /// in the queue again and run on the following pass.
    pub(super) fn take(&mut self) -> Vec<DeferredTask> {
        std::mem::take(&mut self.tasks)
    }

    pub(super) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
