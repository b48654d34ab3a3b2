//! Memory (C4): the concept bag, the task arena tasks are actually owned
//! by, the novel-task queue, the input FIFO, the clock/stamp-serial
//! counter, the operator registry, and the per-cycle scratch slots the
//! attention loop reads and writes. One `Memory` per reasoner instance —
//! nothing here is process-global.

use std::collections::VecDeque;

use indexmap::IndexMap;
use slotmap::SlotMap;

use crate::bag::{Bag, BagItem};
use crate::concept::Concept;
use crate::config::KernelConfig;
use crate::operator::Operator;
use crate::output::{null_output, SharedOutputSink};
use crate::recorder::{null_recorder, SharedRecorder};
use crate::rng::XorShiftRng;
use crate::stamp::Stamp;
use crate::task::{Task, TaskId};
use crate::term::Term;

/// A bag entry pointing at a task the attention loop hasn't yet processed.
#[derive(Debug, Clone, Copy)]
pub struct NovelTaskItem {
    pub id: TaskId,
    pub priority: f32,
}

impl BagItem for NovelTaskItem {
    type Key = TaskId;

    fn key(&self) -> TaskId {
        self.id
    }

    fn priority(&self) -> f32 {
        self.priority
    }

    fn merge_with(&mut self, other: Self) {
        self.priority = self.priority.max(other.priority);
    }

    fn decay(&mut self, rate: f32) {
        self.priority *= rate;
    }
}

/// Current-cycle scratch (section 3's "current-cycle scratch slots: current
/// task, current belief, current term-link, current task-link, current
/// concept, new stamp"): what `processConcept` is working on this cycle,
/// refreshed every cycle and read by the structural/syllogistic rules a
/// `Deriver` fires.
#[derive(Debug, Default, Clone)]
pub struct CycleContext {
    pub current_task: Option<TaskId>,
    pub current_belief: Option<TaskId>,
    pub current_concept: Option<Term>,
    pub current_term_link: Option<Term>,
    pub current_task_link: Option<TaskId>,
    pub new_stamp: Option<Stamp>,
}

pub struct Memory {
    pub config: KernelConfig,
    concepts: Bag<Concept>,
    tasks: SlotMap<TaskId, Task>,
    novel_tasks: Bag<NovelTaskItem>,
    input_queue: VecDeque<TaskId>,
    clock: i64,
    stamp_serial: u64,
    operators: IndexMap<String, Operator>,
    rng: XorShiftRng,
    recorder: SharedRecorder,
    output: SharedOutputSink,
    working: bool,
    steps_queued: u32,
    last_event: Option<TaskId>,
    pub context: CycleContext,
}

impl Memory {
    pub fn new(config: KernelConfig) -> Self {
        let rng = XorShiftRng::new(config.rng_seed);
        let concepts = Bag::new(config.concept_bag_capacity, config.concept_bag_levels);
        let novel_tasks = Bag::new(config.novel_task_bag_capacity, config.novel_task_bag_levels);
        Memory {
            config,
            concepts,
            tasks: SlotMap::with_key(),
            novel_tasks,
            input_queue: VecDeque::new(),
            clock: 0,
            stamp_serial: 0,
            operators: IndexMap::new(),
            rng,
            recorder: null_recorder(),
            output: null_output(),
            working: true,
            steps_queued: 0,
            last_event: None,
            context: CycleContext::default(),
        }
    }

    /// Clears every bag, queue, and scratch slot and resets the clock,
    /// reseeding the RNG so a fixed seed reproduces the same trajectory.
    pub fn reset(&mut self) {
        self.concepts = Bag::new(self.config.concept_bag_capacity, self.config.concept_bag_levels);
        self.tasks = SlotMap::with_key();
        self.novel_tasks = Bag::new(self.config.novel_task_bag_capacity, self.config.novel_task_bag_levels);
        self.input_queue.clear();
        self.clock = 0;
        self.stamp_serial = 0;
        self.rng.reseed(self.config.rng_seed);
        self.working = true;
        self.steps_queued = 0;
        self.last_event = None;
        self.context = CycleContext::default();
    }

    pub fn clock(&self) -> i64 {
        self.clock
    }

    pub fn advance_clock(&mut self) {
        self.clock += 1;
    }

    pub fn new_stamp_serial(&mut self) -> u64 {
        self.stamp_serial += 1;
        self.stamp_serial
    }

    pub fn rng_mut(&mut self) -> &mut XorShiftRng {
        &mut self.rng
    }

    // -- task arena -----------------------------------------------------

    pub fn insert_task(&mut self, task: Task) -> TaskId {
        self.tasks.insert(task)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        self.tasks.remove(id)
    }

    // -- concepts ---------------------------------------------------------

    pub fn concept(&self, term: &Term) -> Option<&Concept> {
        self.concepts.get(term)
    }

    /// Returns the concept for `term`, creating and filing it (and
    /// emitting a `on_concept_new` event) if this is its first reference.
    pub fn get_or_create_concept(&mut self, term: &Term) -> &Concept {
        if self.concepts.get(term).is_none() {
            let concept = Concept::new(
                term.clone(),
                self.config.concept_bag_capacity,
                self.config.term_link_capacity.max(self.config.task_link_capacity),
                self.config.concept_bag_levels,
            );
            self.recorder.lock().on_concept_new(term);
            self.concepts.put_in(concept);
        }
        self.concepts.get(term).expect("just inserted")
    }

    /// Direct mutable access to a concept already known to exist; callers
    /// that need to mutate after a `get_or_create_concept` re-fetch it.
    pub fn pick_concept(&mut self, term: &Term) -> Option<Concept> {
        self.concepts.pick_out(term)
    }

    pub fn put_concept(&mut self, concept: Concept) -> Option<Concept> {
        self.concepts.put_in(concept)
    }

    pub fn take_concept(&mut self) -> Option<Concept> {
        self.concepts.take_out(&mut self.rng)
    }

    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    // -- input queue / novel tasks ----------------------------------------

    pub fn enqueue_input(&mut self, id: TaskId) {
        self.input_queue.push_back(id);
    }

    pub fn dequeue_input(&mut self) -> Option<TaskId> {
        self.input_queue.pop_front()
    }

    pub fn drain_input(&mut self) -> Vec<TaskId> {
        self.input_queue.drain(..).collect()
    }

    pub fn put_novel_task(&mut self, item: NovelTaskItem) -> Option<NovelTaskItem> {
        self.novel_tasks.put_in(item)
    }

    pub fn take_novel_task(&mut self) -> Option<NovelTaskItem> {
        self.novel_tasks.take_out(&mut self.rng)
    }

    // -- operators ----------------------------------------------------------

    pub fn add_operator(&mut self, operator: Operator) -> Result<(), crate::error::OperatorError> {
        if self.operators.contains_key(operator.name()) {
            return Err(crate::error::OperatorError::AlreadyRegistered(
                operator.name().to_string(),
            ));
        }
        self.operators.insert(operator.name().to_string(), operator);
        Ok(())
    }

    pub fn get_operator(&self, name: &str) -> Option<&Operator> {
        self.operators.get(name)
    }

    pub fn is_registered_operator(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    // -- driver-facing state ----------------------------------------------

    pub fn set_working(&mut self, working: bool) {
        self.working = working;
    }

    pub fn is_working(&self) -> bool {
        self.working
    }

    pub fn queue_steps(&mut self, n: u32) {
        self.steps_queued = self.steps_queued.saturating_add(n);
    }

    pub fn steps_queued(&self) -> u32 {
        self.steps_queued
    }

    pub fn consume_step(&mut self) -> bool {
        if self.steps_queued > 0 {
            self.steps_queued -= 1;
            true
        } else {
            false
        }
    }

    pub fn set_recorder(&mut self, recorder: SharedRecorder) {
        self.recorder = recorder;
    }

    pub fn recorder(&self) -> &SharedRecorder {
        &self.recorder
    }

    pub fn set_output(&mut self, output: SharedOutputSink) {
        self.output = output;
    }

    pub fn output(&self) -> &SharedOutputSink {
        &self.output
    }

    /// Surfaces `task` on the output sink unless its priority falls below
    /// `output_noise_level` — the engine constant filtering low-value
    /// derivations out of the driver-facing stream.
    pub fn emit_output(&self, task: &Task) {
        if task.budget().priority() >= self.config.output_noise_level {
            self.output.lock().emit(task);
        }
    }

    pub fn last_event(&self) -> Option<TaskId> {
        self.last_event
    }

    pub fn set_last_event(&mut self, id: Option<TaskId>) {
        self.last_event = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::Stamp;
    use crate::task::{Punctuation, Sentence, Tense};
    use crate::truth::TruthValue;

    fn memory() -> Memory {
        Memory::new(KernelConfig::default())
    }

    fn input_task(term: Term) -> Task {
        let sentence = Sentence::new(
            term,
            Punctuation::Judgment,
            Some(TruthValue::default_belief()),
            Tense::Eternal,
            Stamp::new_input(1, 20, 10, 0),
        );
        Task::new_input(sentence, crate::budget::Budget::default())
    }

    #[test]
    fn task_arena_roundtrips_through_taskid() {
        let mut mem = memory();
        let id = mem.insert_task(input_task(Term::atom("a")));
        assert!(mem.task(id).is_some());
        let removed = mem.remove_task(id);
        assert!(removed.is_some());
        assert!(mem.task(id).is_none());
    }

    #[test]
    fn get_or_create_concept_is_idempotent() {
        let mut mem = memory();
        let term = Term::atom("cat");
        mem.get_or_create_concept(&term);
        assert_eq!(mem.concept_count(), 1);
        mem.get_or_create_concept(&term);
        assert_eq!(mem.concept_count(), 1);
    }

    #[test]
    fn reset_clears_clock_and_concepts() {
        let mut mem = memory();
        mem.get_or_create_concept(&Term::atom("cat"));
        mem.advance_clock();
        mem.reset();
        assert_eq!(mem.clock(), 0);
        assert_eq!(mem.concept_count(), 0);
    }

    #[test]
    fn stamp_serial_increments() {
        let mut mem = memory();
        assert_eq!(mem.new_stamp_serial(), 1);
        assert_eq!(mem.new_stamp_serial(), 2);
    }

    #[test]
    fn step_counter_decrements_on_consume() {
        let mut mem = memory();
        mem.queue_steps(2);
        assert!(mem.consume_step());
        assert!(mem.consume_step());
        assert!(!mem.consume_step());
    }
}
