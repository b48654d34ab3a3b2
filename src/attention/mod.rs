//! The attention loop (C6): one cycle of selecting and firing new tasks,
//! novel tasks, and concepts. The actual matching/structural/syllogistic
//! rule invocation a fired concept triggers is delegated to a `Deriver` —
//! those rules are external collaborators this kernel only schedules for.

use crate::memory::{Memory, NovelTaskItem};
use crate::recorder::TaskEventReason;
use crate::stamp::{OccurrenceTime, Stamp};
use crate::task::TaskId;
use crate::term::Term;

/// Hook the attention loop calls into once it has selected work; the
/// default implementation does nothing, which is sufficient to exercise
/// the scheduling loop itself in isolation.
pub trait Deriver: Send + Sync {
    /// `immediateProcess`'s direct-processing step: match the task against
    /// its concept's beliefs/goals/questions and invoke the syllogistic
    /// rule set.
    fn direct_process(&self, _memory: &mut Memory, _task_id: TaskId, _concept_term: &Term) {}

    /// `processConcept`'s fire routine: a task-link and term-link have been
    /// selected from the concept; invoke matching/structural/syllogistic
    /// rules against them.
    fn fire_concept(
        &self,
        _memory: &mut Memory,
        _concept_term: &Term,
        _task_link: Option<TaskId>,
        _term_link: Option<&Term>,
    ) {
    }

    /// Temporal induction between the cycle's new event and the previous
    /// `lastEvent`, given their already-merged stamp.
    fn temporal_induction(&self, _memory: &mut Memory, _new_event: TaskId, _last_event: TaskId, _merged_stamp: &Stamp) {}
}

/// A deriver that does nothing — useful for tests of the loop's scheduling
/// behavior and as the default when no syllogistic layer is installed.
pub struct NullDeriver;

impl Deriver for NullDeriver {}

fn immediate_process(memory: &mut Memory, task_id: TaskId, deriver: &dyn Deriver) {
    let content = match memory.task(task_id) {
        Some(t) => t.content().clone(),
        None => return,
    };
    memory.context.current_task = Some(task_id);
    memory.get_or_create_concept(&content);
    if let Some(mut concept) = memory.pick_concept(&content) {
        let priority = memory.task(task_id).map(|t| t.budget().priority()).unwrap_or(0.0);
        concept.increase_activation(priority);
        memory.put_concept(concept);
    }
    deriver.direct_process(memory, task_id, &content);
}

fn process_concept(memory: &mut Memory, deriver: &dyn Deriver) {
    let Some(mut concept) = memory.take_concept() else {
        return;
    };
    let term = concept.term().clone();
    let task_link = concept.task_links().take_out(memory.rng_mut());
    let term_link = concept.term_links().take_out(memory.rng_mut());
    memory.context.current_concept = Some(term.clone());
    memory.context.current_task_link = task_link.as_ref().map(|tl| tl.id);
    memory.context.current_task = memory.context.current_task_link;
    memory.context.current_term_link = term_link.as_ref().map(|tl| tl.term.clone());

    deriver.fire_concept(
        memory,
        &term,
        memory.context.current_task_link,
        memory.context.current_term_link.as_ref(),
    );

    let decay = memory.config.durability_decay;
    if let Some(tl) = task_link {
        concept.task_links().put_back(tl, decay);
    }
    if let Some(tl) = term_link {
        concept.term_links().put_back(tl, decay);
    }
    memory.put_concept(concept);
}

/// Runs exactly one cycle (section 4.5); a no-op when `!memory.is_working()`.
pub fn run_cycle(memory: &mut Memory, deriver: &dyn Deriver) {
    if !memory.is_working() {
        return;
    }
    memory.recorder().lock().on_cycle_start(memory.clock());

    let mut produced_new = false;
    let mut new_event: Option<(TaskId, f32)> = None;

    let pending = memory.drain_input();
    for task_id in pending {
        let snapshot = memory.task(task_id).map(|t| {
            (
                t.content().clone(),
                t.is_input(),
                t.sentence().is_judgment(),
                t.sentence().truth().map(|tr| tr.expectation()),
                t.budget().priority(),
                matches!(t.sentence().stamp().occurrence_time(), OccurrenceTime::At(_)),
            )
        });
        let Some((content, is_input, is_judgment, expectation, priority, time_bound)) = snapshot else {
            continue;
        };

        let has_concept = memory.concept(&content).is_some();
        if is_input || has_concept {
            immediate_process(memory, task_id, deriver);
            produced_new = true;
            if is_judgment && time_bound {
                if let Some(exp) = expectation {
                    let better = new_event.map(|(_, best)| exp > best).unwrap_or(true);
                    if better {
                        new_event = Some((task_id, exp));
                    }
                }
            }
        } else if is_judgment && expectation.map_or(false, |e| e > memory.config.novel_task_expectation_threshold) {
            memory.put_novel_task(NovelTaskItem { id: task_id, priority });
        } else if let Some(t) = memory.task(task_id) {
            memory.recorder().lock().on_task_remove(t, TaskEventReason::Neglected);
        }
    }

    if !produced_new {
        if let Some(novel) = memory.take_novel_task() {
            immediate_process(memory, novel.id, deriver);
            produced_new = true;
        }
    }

    if !produced_new {
        process_concept(memory, deriver);
    }

    if let Some((new_event_id, _)) = new_event {
        if let Some(last_id) = memory.last_event() {
            let stamps = (
                memory.task(new_event_id).map(|t| t.sentence().stamp().clone()),
                memory.task(last_id).map(|t| t.sentence().stamp().clone()),
            );
            if let (Some(new_stamp), Some(last_stamp)) = stamps {
                if let Some(merged) = Stamp::merge(&new_stamp, &last_stamp, memory.clock()) {
                    deriver.temporal_induction(memory, new_event_id, last_id, &merged);
                }
            }
        }
        memory.set_last_event(Some(new_event_id));
    }

    memory.consume_step();
    memory.advance_clock();
    memory.recorder().lock().on_cycle_end(memory.clock());
}
