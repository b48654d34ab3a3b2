//! The output channel (section 6): an installable sink for tasks the
//! engine judges worth surfacing to a driver, separate from the recorder's
//! diagnostic event stream. Mirrors the recorder's null-object pattern.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::task::Task;

pub trait OutputSink: Send + Sync {
    fn emit(&self, task: &Task);
}

pub struct NullOutputSink;

impl OutputSink for NullOutputSink {
    fn emit(&self, _task: &Task) {}
}

pub type SharedOutputSink = Arc<Mutex<Box<dyn OutputSink>>>;

pub fn null_output() -> SharedOutputSink {
    Arc::new(Mutex::new(Box::new(NullOutputSink)))
}

/// An `OutputSink` backed by a bounded `crossbeam` channel, for a driver
/// that wants to drain surfaced tasks from another thread rather than
/// receiving a synchronous callback. `emit` never blocks the reasoning
/// loop: a full channel just drops the task, same as any other silent
/// output-channel rejection.
pub struct ChannelOutputSink {
    tx: crossbeam::channel::Sender<Task>,
}

impl OutputSink for ChannelOutputSink {
    fn emit(&self, task: &Task) {
        let _ = self.tx.try_send(task.clone());
    }
}

/// Builds a bounded channel pair: the sink half installs via `Nar::set_output`,
/// the receiver half is held by the driver and drained with `try_recv`/`recv`.
pub fn channel_output(capacity: usize) -> (SharedOutputSink, crossbeam::channel::Receiver<Task>) {
    let (tx, rx) = crossbeam::channel::bounded(capacity);
    (Arc::new(Mutex::new(Box::new(ChannelOutputSink { tx }))), rx)
}
