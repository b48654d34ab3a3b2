//! The observation surface (section 6): cycle/admission/task events a
//! driver can subscribe to. A null recorder with `is_active() == false`
//! skips all message formatting, matching the "null-object recorder"
//! design note.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEventReason {
    Neglected,
    Ignored,
    CyclicReasoning,
    OverlappingEvidence,
    Admitted,
}

/// Callbacks the attention loop and admission gate invoke. Default methods
/// are no-ops so a recorder only needs to implement what it cares about.
pub trait Recorder: Send + Sync {
    fn is_active(&self) -> bool {
        true
    }

    fn on_cycle_start(&self, _clock: i64) {}
    fn on_cycle_end(&self, _clock: i64) {}
    fn on_concept_new(&self, _term: &crate::term::Term) {}
    fn on_task_add(&self, _task: &Task, _reason: TaskEventReason) {}
    fn on_task_remove(&self, _task: &Task, _reason: TaskEventReason) {}
    fn append(&self, _message: &str) {}
}

/// The default recorder: active flag false, every callback a no-op.
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn is_active(&self) -> bool {
        false
    }
}

/// A recorder forwarding every event to `log::trace!` et al. — the ambient
/// logging the teacher's Cargo.toml declares but never calls.
pub struct LogRecorder;

impl Recorder for LogRecorder {
    fn on_cycle_start(&self, clock: i64) {
        log::trace!("cycle {} start", clock);
    }

    fn on_cycle_end(&self, clock: i64) {
        log::trace!("cycle {} end", clock);
    }

    fn on_concept_new(&self, term: &crate::term::Term) {
        log::debug!("new concept: {}", term);
    }

    fn on_task_add(&self, task: &Task, reason: TaskEventReason) {
        log::debug!("task add ({:?}): {}", reason, task);
    }

    fn on_task_remove(&self, task: &Task, reason: TaskEventReason) {
        log::debug!("task remove ({:?}): {}", reason, task);
    }

    fn append(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Installable, swappable at runtime without `&mut NAR`.
pub type SharedRecorder = Arc<Mutex<Box<dyn Recorder>>>;

pub fn null_recorder() -> SharedRecorder {
    Arc::new(Mutex::new(Box::new(NullRecorder)))
}

/// A cycle/task event as delivered over a `ChannelRecorder`'s channel,
/// owning what the borrowed `Recorder` callbacks only get to see briefly.
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    CycleStart(i64),
    CycleEnd(i64),
    ConceptNew(crate::term::Term),
    TaskAdd(Task, TaskEventReason),
    TaskRemove(Task, TaskEventReason),
}

/// A `Recorder` backed by a bounded `crossbeam` channel, for a driver that
/// wants to drain events from another thread. Like `ChannelOutputSink`, a
/// full channel just drops the event rather than blocking the cycle.
pub struct ChannelRecorder {
    tx: crossbeam::channel::Sender<RecorderEvent>,
}

impl Recorder for ChannelRecorder {
    fn on_cycle_start(&self, clock: i64) {
        let _ = self.tx.try_send(RecorderEvent::CycleStart(clock));
    }

    fn on_cycle_end(&self, clock: i64) {
        let _ = self.tx.try_send(RecorderEvent::CycleEnd(clock));
    }

    fn on_concept_new(&self, term: &crate::term::Term) {
        let _ = self.tx.try_send(RecorderEvent::ConceptNew(term.clone()));
    }

    fn on_task_add(&self, task: &Task, reason: TaskEventReason) {
        let _ = self.tx.try_send(RecorderEvent::TaskAdd(task.clone(), reason));
    }

    fn on_task_remove(&self, task: &Task, reason: TaskEventReason) {
        let _ = self.tx.try_send(RecorderEvent::TaskRemove(task.clone(), reason));
    }
}

/// Builds a bounded channel pair: the recorder half installs via
/// `Nar::set_recorder`, the receiver half is held by the driver.
pub fn channel_recorder(capacity: usize) -> (SharedRecorder, crossbeam::channel::Receiver<RecorderEvent>) {
    let (tx, rx) = crossbeam::channel::bounded(capacity);
    (Arc::new(Mutex::new(Box::new(ChannelRecorder { tx }))), rx)
}
