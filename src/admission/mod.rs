//! Derivation admission (C7): the only gate through which a task enters
//! the new-task FIFO. Every rejection here is silent by design — see the
//! error-handling taxonomy — and only observed through the recorder.

use crate::memory::Memory;
use crate::recorder::TaskEventReason;
use crate::task::{Sentence, Task, TaskId};
use crate::term::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BelowThreshold,
    ZeroConfidence,
    CyclicReasoning,
    OverlappingEvidence,
}

/// What the candidate was derived from, needed to grow its derivation
/// chain and to decide whether the cycle/overlap checks apply.
#[derive(Default)]
pub struct DerivationContext<'a> {
    pub current_task: Option<&'a Task>,
    pub current_belief: Option<&'a Sentence>,
    pub single_premise: bool,
    pub is_revision: bool,
    /// The grandparent content a single-premise structural rule must not
    /// reproduce (section 4.6, "Single-premise emission").
    pub grandparent_content: Option<&'a Term>,
}

fn negation_partners(content: &Term) -> (Option<Term>, Option<Term>) {
    let neg = content.clone().negate();
    let double_neg = neg.clone().and_then(|n| n.negate());
    (neg, double_neg)
}

/// Runs the full six-step gate and, on success, files the task into the
/// task arena and appends its id to the new-task FIFO.
pub fn admit(
    memory: &mut Memory,
    mut candidate: Task,
    ctx: DerivationContext,
) -> Result<TaskId, Rejection> {
    // Single-premise circularity guard happens before the gate proper: a
    // structural rule whose conclusion reproduces its own grandparent is
    // dropped with no recorder event (section 4.6).
    if ctx.single_premise {
        if let Some(grandparent) = ctx.grandparent_content {
            if grandparent == candidate.content() {
                return Err(Rejection::CyclicReasoning);
            }
        }
    }

    // 1. Budget threshold.
    if !candidate
        .budget()
        .above_threshold(memory.config.admission_threshold)
    {
        memory
            .recorder()
            .lock()
            .on_task_remove(&candidate, TaskEventReason::Neglected);
        return Err(Rejection::BelowThreshold);
    }

    // 2. Zero-confidence.
    if let Some(truth) = candidate.sentence().truth() {
        if truth.confidence() <= 0.0 {
            memory
                .recorder()
                .lock()
                .on_task_remove(&candidate, TaskEventReason::Ignored);
            return Err(Rejection::ZeroConfidence);
        }
    }

    // 3. Chain update.
    if let Some(belief) = ctx.current_belief {
        if belief.is_judgment() {
            candidate.sentence_mut().stamp_mut().add_to_chain(belief.content().clone());
        }
    }
    if ctx.single_premise {
        if let Some(task) = ctx.current_task {
            if task.sentence().is_judgment() {
                candidate
                    .sentence_mut()
                    .stamp_mut()
                    .add_to_chain(task.content().clone());
            }
        }
    } else if let Some(task) = ctx.current_task {
        candidate
            .sentence_mut()
            .stamp_mut()
            .add_to_chain(task.content().clone());
    }

    // 4. Cycle check (non-revision).
    if !ctx.is_revision && candidate.sentence().is_judgment() {
        let content = candidate.content().clone();
        if candidate.sentence().stamp().chain_contains(&content) {
            let (neg, double_neg) = negation_partners(&content);
            let parent_is_negation_partner = ctx
                .current_task
                .map(|t| Some(t.content().clone()) == neg || Some(t.content().clone()) == double_neg)
                .unwrap_or(false);
            if !parent_is_negation_partner {
                memory
                    .recorder()
                    .lock()
                    .on_task_remove(&candidate, TaskEventReason::CyclicReasoning);
                return Err(Rejection::CyclicReasoning);
            }
        }
    }

    // 5. Evidence-overlap check (revision only).
    if ctx.is_revision && candidate.sentence().stamp().has_internal_overlap() {
        memory
            .recorder()
            .lock()
            .on_task_remove(&candidate, TaskEventReason::OverlappingEvidence);
        return Err(Rejection::OverlappingEvidence);
    }

    // 6. Emit.
    memory
        .recorder()
        .lock()
        .on_task_add(&candidate, TaskEventReason::Admitted);
    memory.emit_output(&candidate);
    let id = memory.insert_task(candidate);
    memory.enqueue_input(id);
    Ok(id)
}

/// `inputTask`: the driver-facing entry point for externally constructed
/// tasks. Only the budget threshold applies; there is no chain, parent, or
/// revision context for raw input.
pub fn admit_input(memory: &mut Memory, task: Task) -> Result<TaskId, Rejection> {
    admit(memory, task, DerivationContext::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::Budget;
    use crate::config::KernelConfig;
    use crate::stamp::Stamp;
    use crate::task::{Punctuation, Sentence, Tense};
    use crate::term::Term;
    use crate::truth::TruthValue;

    fn memory() -> Memory {
        Memory::new(KernelConfig::default())
    }

    fn judgment_task(term: Term, truth: TruthValue, budget: Budget) -> Task {
        let sentence = Sentence::new(term, Punctuation::Judgment, Some(truth), Tense::Eternal, Stamp::new_input(1, 20, 10, 0));
        Task::new_input(sentence, budget)
    }

    #[test]
    fn below_threshold_is_rejected() {
        let mut mem = memory();
        let task = judgment_task(Term::atom("a"), TruthValue::default_belief(), Budget::new(0.0, 0.5, 0.5));
        let result = admit_input(&mut mem, task);
        assert_eq!(result, Err(Rejection::BelowThreshold));
    }

    #[test]
    fn zero_confidence_is_rejected() {
        let mut mem = memory();
        let task = judgment_task(Term::atom("a"), TruthValue::new(0.5, 0.0), Budget::new(0.9, 0.5, 0.5));
        let result = admit_input(&mut mem, task);
        assert_eq!(result, Err(Rejection::ZeroConfidence));
    }

    #[test]
    fn healthy_input_task_is_admitted() {
        let mut mem = memory();
        let task = judgment_task(Term::atom("a"), TruthValue::default_belief(), Budget::new(0.9, 0.5, 0.5));
        let result = admit_input(&mut mem, task);
        assert!(result.is_ok());
        assert_eq!(mem.drain_input().len(), 1);
    }

    #[test]
    fn chain_reappearance_without_negation_is_cyclic() {
        let mut mem = memory();
        let content = Term::atom("a");
        let mut stamped = judgment_task(content.clone(), TruthValue::default_belief(), Budget::new(0.9, 0.5, 0.5));
        stamped.sentence_mut().stamp_mut().add_to_chain(content.clone());
        let parent = judgment_task(Term::atom("b"), TruthValue::default_belief(), Budget::new(0.9, 0.5, 0.5));
        let ctx = DerivationContext {
            current_task: Some(&parent),
            current_belief: None,
            single_premise: true,
            is_revision: false,
            grandparent_content: None,
        };
        let result = admit(&mut mem, stamped, ctx);
        assert_eq!(result, Err(Rejection::CyclicReasoning));
    }

    #[test]
    fn revision_with_overlapping_evidence_is_rejected() {
        let mut mem = memory();
        let sentence = Sentence::new(
            Term::atom("a"),
            Punctuation::Judgment,
            Some(TruthValue::default_belief()),
            Tense::Eternal,
            Stamp::from_raw_base(vec![1, 1], 20, 10, 0),
        );
        let task = Task::new_input(sentence, Budget::new(0.9, 0.5, 0.5));
        let ctx = DerivationContext {
            current_task: None,
            current_belief: None,
            single_premise: false,
            is_revision: true,
            grandparent_content: None,
        };
        let result = admit(&mut mem, task, ctx);
        assert_eq!(result, Err(Rejection::OverlappingEvidence));
    }

    #[test]
    fn single_premise_reproducing_grandparent_is_dropped() {
        let mut mem = memory();
        let content = Term::atom("a");
        let task = judgment_task(content.clone(), TruthValue::default_belief(), Budget::new(0.9, 0.5, 0.5));
        let ctx = DerivationContext {
            current_task: None,
            current_belief: None,
            single_premise: true,
            is_revision: false,
            grandparent_content: Some(&content),
        };
        let result = admit(&mut mem, task, ctx);
        assert_eq!(result, Err(Rejection::CyclicReasoning));
    }
}
