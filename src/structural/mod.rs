//! Structural single-premise inference (C8): the rules that transform a
//! compound term into a related one — product↔image, intersection/
//! difference/set composition and decomposition, conjunction/disjunction
//! extraction, negation, and contraposition. Every rule here takes a
//! premise sentence plus the component the firing concept indicated, and
//! emits zero or more candidate tasks through the admission gate.

pub mod compose;
pub mod compound;
pub mod contraposition;
pub mod negation;
pub mod product_image;
pub mod set_relation;

use crate::admission::{self, DerivationContext, Rejection};
use crate::attention::Deriver;
use crate::budget::Budget;
use crate::memory::Memory;
use crate::stamp::Stamp;
use crate::task::{Punctuation, Sentence, Task, TaskId, Tense};
use crate::term::{Op, TemporalOrder, Term, TermTrait};
use crate::truth::TruthValue;

/// A fully-built candidate ready for the admission gate: content, the
/// truth to attach (absent for questions/quests), the punctuation it
/// inherits or overrides, and the budget the rule computed.
pub struct Candidate {
    pub content: Term,
    pub truth: Option<TruthValue>,
    pub punctuation: Punctuation,
    pub budget: Budget,
}

/// Shared single-premise emission path (section 4.6, "Single-premise
/// emission"): stamp copied from the source sentence, creation time set to
/// the current clock, circularity checked against the grandparent's
/// content before anything else runs.
pub fn emit_single_premise(
    memory: &mut Memory,
    candidate: Candidate,
    parent_id: TaskId,
    stamp_source: &Sentence,
    grandparent_content: Option<&Term>,
) -> Result<TaskId, Rejection> {
    let stamp = Stamp::derive_single(stamp_source.stamp(), memory.clock());
    memory.context.new_stamp = Some(stamp.clone());
    let sentence = Sentence::new(
        candidate.content,
        candidate.punctuation,
        candidate.truth,
        Tense::Eternal,
        stamp,
    );
    let task = Task::derived(sentence, candidate.budget, parent_id, None);
    let parent_task = memory.task(parent_id).cloned();
    let ctx = DerivationContext {
        current_task: parent_task.as_ref(),
        current_belief: None,
        single_premise: true,
        is_revision: false,
        grandparent_content,
    };
    admission::admit(memory, task, ctx)
}

/// `content.complexity()`, the factor every budget function divides by.
pub fn complexity_of(term: &Term) -> u32 {
    term.complexity()
}

/// Temporal order of a statement, or `None` for an atomic/non-statement term.
pub(crate) fn temporal_order_of(term: &Term) -> TemporalOrder {
    match term.as_compound() {
        Some(c) => c.temporal_order(),
        None => TemporalOrder::None,
    }
}

/// The `Deriver` this kernel actually schedules C8 through: given the task
/// a `fire_concept` call selected, tries every structural rule whose shape
/// guard matches the task's content and the indicated term-link, then
/// routes every resulting `Candidate` through `emit_single_premise`. This
/// is the single-premise half of "firing a concept invokes matching/
/// structural/... rules, each of which emits candidate tasks back through
/// admission" — the double-premise syllogistic half stays an external
/// collaborator's `Deriver` to implement, not this one's.
pub struct StructuralDeriver {
    reliance: f32,
}

impl StructuralDeriver {
    pub fn new(reliance: f32) -> Self {
        StructuralDeriver { reliance }
    }

    /// Every candidate a structural rule produces for `task`, given the
    /// term-link the firing concept indicated alongside it.
    fn candidates(&self, task: &Task, term_link: Option<&Term>) -> Vec<Candidate> {
        let mut out = Vec::new();
        let content = task.content();
        let r = self.reliance;

        if let Some(c) = content.as_compound() {
            match c.operator() {
                Op::Negation => out.extend(negation::negate(task)),
                Op::Implication => out.extend(contraposition::contrapose(task, r)),
                Op::Conjunction | Op::Disjunction => {
                    for i in 0..c.subterms().len() {
                        out.extend(compound::extract(task, i, r));
                    }
                }
                _ => {}
            }
        }

        if let Some((subject, predicate)) = content.statement_parts() {
            match content.op() {
                Some(Op::Inheritance) => {
                    if let Some(p) = subject.as_compound() {
                        if p.operator() == Op::Product {
                            for i in 0..p.subterms().len() {
                                out.extend(product_image::product_on_subject(task, i));
                            }
                        }
                    }
                    if let Some(p) = predicate.as_compound() {
                        if p.operator() == Op::Product {
                            for i in 0..p.subterms().len() {
                                out.extend(product_image::product_on_predicate(task, i));
                            }
                        }
                    }
                    out.extend(product_image::image_ext_to_product(task));
                    out.extend(product_image::image_int_to_product(task));
                    out.extend(set_relation::inheritance_to_similarity(task, r));

                    for (side_is_subject, side) in [(true, subject), (false, predicate)] {
                        if let Some(sc) = side.as_compound() {
                            for i in 0..sc.subterms().len() {
                                out.extend(compose::compose1(task, side_is_subject, i, r));
                            }
                        }
                    }

                    if let (Some(sc), Some(pc)) = (subject.as_compound(), predicate.as_compound()) {
                        if sc.operator() == pc.operator() && sc.subterms().len() == 2 && pc.subterms().len() == 2 {
                            out.extend(compose::decompose2(task, 0));
                            out.extend(compose::decompose2(task, 1));
                        }
                    }

                    if !subject.is_compound() && !predicate.is_compound() {
                        if let Some(link_term) = term_link {
                            out.extend(compose::compose2(task, link_term, r));
                        }
                    }
                }
                Some(Op::Similarity) => {
                    out.extend(set_relation::similarity_to_inheritance(task, r));
                }
                _ => {}
            }
        }

        out
    }
}

impl Default for StructuralDeriver {
    /// `reliance = 0.9`, matching the confidence-discount the teacher's
    /// truth functions default to for single-premise structural derivation.
    fn default() -> Self {
        StructuralDeriver::new(0.9)
    }
}

impl Deriver for StructuralDeriver {
    fn fire_concept(
        &self,
        memory: &mut Memory,
        _concept_term: &Term,
        task_link: Option<TaskId>,
        term_link: Option<&Term>,
    ) {
        let Some(task_id) = task_link else { return };
        let Some(task) = memory.task(task_id).cloned() else { return };
        let grandparent_content = task
            .parent()
            .and_then(|p| memory.task(p))
            .map(|t| t.content().clone());

        // Section 4.6's stamp-source rule: the current task's stamp when it
        // is a judgment or no belief is selected, otherwise the current
        // belief's. This kernel's own rules never populate `current_belief`
        // (belief selection is the syllogistic collaborator's job), so this
        // degenerates to the task's own stamp here, but a `Deriver` that does
        // select a belief gets the right source without changing this path.
        let belief = memory.context.current_belief.and_then(|id| memory.task(id).cloned());
        let stamp_source = match &belief {
            Some(b) if !task.sentence().is_judgment() => b.sentence(),
            _ => task.sentence(),
        };

        for candidate in self.candidates(&task, term_link) {
            let _ = emit_single_premise(memory, candidate, task_id, stamp_source, grandparent_content.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::Budget;
    use crate::config::KernelConfig;
    use crate::task::Tense;
    use crate::truth::TruthValue;

    fn memory() -> Memory {
        Memory::new(KernelConfig::default())
    }

    fn input_judgment(content: Term, truth: TruthValue) -> Task {
        let sentence = Sentence::new(content, Punctuation::Judgment, Some(truth), Tense::Eternal, Stamp::new_input(1, 20, 10, 0));
        Task::new_input(sentence, Budget::new(0.9, 0.8, 0.8))
    }

    #[test]
    fn fires_negation_through_admission() {
        let mut mem = memory();
        let task = input_judgment(Term::atom("a"), TruthValue::new(0.9, 0.8));
        let task_id = mem.insert_task(task.clone());
        let deriver = StructuralDeriver::default();
        deriver.fire_concept(&mut mem, task.content(), Some(task_id), None);
        assert!(mem.concept(&Term::atom("a").negate().unwrap()).is_none());
        // Admission only inserts into the task arena and input FIFO; the
        // attention loop is what turns that into a concept. Confirm the
        // structural rule actually produced and admitted a candidate.
        assert_eq!(mem.drain_input().len(), 1);
    }

    #[test]
    fn fires_conjunction_extraction_for_each_component() {
        let mut mem = memory();
        let a = Term::statement(Op::Inheritance, Term::atom("cat"), Term::atom("animal")).unwrap();
        let b = Term::statement(Op::Inheritance, Term::atom("dog"), Term::atom("animal")).unwrap();
        let content = Term::compound(Op::Conjunction, vec![a, b]).unwrap();
        let task = input_judgment(content, TruthValue::new(1.0, 0.9));
        let task_id = mem.insert_task(task.clone());
        let deriver = StructuralDeriver::default();
        deriver.fire_concept(&mut mem, task.content(), Some(task_id), None);
        assert_eq!(mem.drain_input().len(), 2);
    }

    #[test]
    fn no_task_link_is_a_noop() {
        let mut mem = memory();
        let deriver = StructuralDeriver::default();
        deriver.fire_concept(&mut mem, &Term::atom("a"), None, None);
        assert_eq!(mem.drain_input().len(), 0);
    }
}
