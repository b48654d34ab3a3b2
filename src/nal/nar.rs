//! `Nar`: the driver-facing facade described by section 6's external
//! interface. Holds the `Memory`, the attention loop's entry point, and
//! whichever `Deriver` the caller installs (the syllogistic/matching layer
//! this kernel schedules for but does not itself implement).

use thiserror::Error;

use crate::admission::{self, Rejection};
use crate::attention::{self, Deriver};
use crate::budget::Budget;
use crate::config::KernelConfig;
use crate::error::{OperatorError, ParseError};
use crate::memory::Memory;
use crate::operator::Operator;
use crate::output::SharedOutputSink;
use crate::parser;
use crate::recorder::SharedRecorder;
use crate::stamp::Stamp;
use crate::structural::StructuralDeriver;
use crate::task::{Sentence, Task, TaskId};

#[derive(Debug, Error)]
pub enum NarError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("task rejected at admission: {0:?}")]
    Rejected(Rejection),
}

/// The Non-Axiomatic Reasoner facade. Construct with a `KernelConfig` and,
/// optionally, a `Deriver` implementing the syllogistic/matching rules the
/// attention loop invokes once it has selected a task, concept, or link.
pub struct Nar {
    memory: Memory,
    deriver: Box<dyn Deriver>,
}

impl Nar {
    /// The default deriver is `StructuralDeriver`: C8's single-premise
    /// rules fire on every selected concept. The double-premise
    /// syllogistic rule set remains an external collaborator — install it
    /// with `with_deriver` if the embedding application provides one.
    pub fn new(config: KernelConfig) -> Self {
        Nar { memory: Memory::new(config), deriver: Box::new(StructuralDeriver::default()) }
    }

    pub fn with_deriver(config: KernelConfig, deriver: Box<dyn Deriver>) -> Self {
        Nar { memory: Memory::new(config), deriver }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// `inputTask`: enqueue an externally constructed task. Silently
    /// rejected (per section 7's taxonomy) if below the admission
    /// threshold; the rejection reason is still returned here rather than
    /// swallowed, since the driver boundary is not itself a silent one.
    pub fn input_task(&mut self, task: Task) -> Result<TaskId, Rejection> {
        admission::admit_input(&mut self.memory, task)
    }

    /// Convenience wrapping the Narsese surface parser: parses `text` at
    /// the engine's current clock, builds a default-budgeted input task,
    /// and submits it via `input_task`.
    pub fn input_sentence(&mut self, text: &str) -> Result<TaskId, NarError> {
        let now = self.memory.clock();
        let parsed = parser::parse_sentence(text, now)?;
        let serial = self.memory.new_stamp_serial();
        let stamp = Stamp::new_input(
            serial,
            self.memory.config.max_evidential_base,
            self.memory.config.max_derivation_chain,
            now,
        );
        let sentence = Sentence::new(parsed.content, parsed.punctuation, parsed.truth, parsed.tense, stamp);
        let task = Task::new_input(sentence, Budget::default());
        self.input_task(task).map_err(NarError::Rejected)
    }

    /// `cycle`: execute exactly one cycle (a no-op when `!isWorking`).
    pub fn cycle(&mut self) {
        attention::run_cycle(&mut self.memory, self.deriver.as_ref());
    }

    /// `stepLater(n)`: an advisory counter, not auto-executed — the driver
    /// decides when to actually call `cycle` that many more times.
    pub fn step_later(&mut self, n: u32) {
        self.memory.queue_steps(n);
    }

    pub fn set_working(&mut self, working: bool) {
        self.memory.set_working(working);
    }

    pub fn is_working(&self) -> bool {
        self.memory.is_working()
    }

    pub fn reset(&mut self) {
        self.memory.reset();
    }

    pub fn add_operator(&mut self, operator: Operator) -> Result<(), OperatorError> {
        self.memory.add_operator(operator)
    }

    pub fn get_operator(&self, name: &str) -> Option<&Operator> {
        self.memory.get_operator(name)
    }

    pub fn is_registered_operator(&self, name: &str) -> bool {
        self.memory.is_registered_operator(name)
    }

    pub fn get_time(&self) -> i64 {
        self.memory.clock()
    }

    pub fn new_stamp_serial(&mut self) -> u64 {
        self.memory.new_stamp_serial()
    }

    pub fn set_recorder(&mut self, recorder: SharedRecorder) {
        self.memory.set_recorder(recorder);
    }

    pub fn set_output(&mut self, output: SharedOutputSink) {
        self.memory.set_output(output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Punctuation;
    use crate::term::Term;

    fn nar() -> Nar {
        Nar::new(KernelConfig::default())
    }

    #[test]
    fn input_sentence_admits_a_judgment() {
        let mut n = nar();
        let id = n.input_sentence("cat %0.9;0.8%.").unwrap();
        assert!(n.memory().task(id).is_some());
    }

    #[test]
    fn cycle_is_noop_while_not_working() {
        let mut n = nar();
        n.set_working(false);
        let before = n.get_time();
        n.cycle();
        assert_eq!(n.get_time(), before);
    }

    #[test]
    fn input_task_creates_a_concept_after_one_cycle() {
        let mut n = nar();
        n.input_sentence("(bird --> animal).").unwrap();
        n.cycle();
        assert!(n.memory().concept(&Term::statement(crate::term::Op::Inheritance, Term::atom("bird"), Term::atom("animal")).unwrap()).is_some());
    }

    #[test]
    fn reset_clears_clock_and_concepts() {
        let mut n = nar();
        n.input_sentence("cat.").unwrap();
        n.cycle();
        n.reset();
        assert_eq!(n.get_time(), 0);
        assert_eq!(n.memory().concept_count(), 0);
    }

    #[test]
    fn operator_registration_round_trips() {
        let mut n = nar();
        n.add_operator(Operator::named("^believe")).unwrap();
        assert!(n.is_registered_operator("^believe"));
        assert!(n.get_operator("^believe").is_some());
    }

    #[test]
    fn question_sentence_carries_no_truth() {
        let mut n = nar();
        let id = n.input_sentence("cat?").unwrap();
        let task = n.memory().task(id).unwrap();
        assert_eq!(task.sentence().punctuation(), Punctuation::Question);
        assert!(task.sentence().truth().is_none());
    }
}
