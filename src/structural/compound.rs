//! Structural compound extraction (section 4.7): `{(&&, A, B), A ∈ (&&, A,
//! B)} ⊢ A`. Gated on `A.isConstant`; a forward-order conjunction only
//! yields its first component (temporal ordering forbids picking a later
//! one out of sequence).
//!
//! The four truth sub-cases are written out explicitly rather than folded
//! into one formula — the open question in the source material is exactly
//! which of these collapse into each other, so each combination gets its
//! own arm here and its own test.

use crate::task::{Punctuation, Task};
use crate::term::{Op, Term, TermTrait};
use crate::truth::TruthValue;

use super::Candidate;

fn extraction_truth(punctuation: Punctuation, is_conjunction: bool, t: &TruthValue, reliance: f32) -> Option<TruthValue> {
    match (punctuation, is_conjunction) {
        (Punctuation::Judgment, true) => Some(t.deduction(reliance)),
        (Punctuation::Judgment, false) => Some(t.negation().deduction(reliance).negation()),
        (Punctuation::Goal, true) => Some(t.deduction(reliance)),
        (Punctuation::Goal, false) => Some(t.deduction(reliance)),
        (Punctuation::Question, _) | (Punctuation::Quest, _) => None,
    }
}

/// Extracts the component at `index` from a conjunction/disjunction task.
pub fn extract(premise: &Task, index: usize, reliance: f32) -> Option<Candidate> {
    let content = premise.sentence().content();
    let compound = content.as_compound()?;
    let is_conjunction = match compound.operator() {
        Op::Conjunction => true,
        Op::Disjunction => false,
        _ => return None,
    };
    let component = compound.subterms().get(index)?.clone();
    if !component.is_constant() {
        return None;
    }
    if is_conjunction && compound.is_sequence() && index != 0 {
        return None;
    }

    let punctuation = premise.sentence().punctuation();
    let truth = match premise.sentence().truth() {
        Some(t) => extraction_truth(punctuation, is_conjunction, t, reliance),
        None => None,
    };
    let complexity = component.complexity();
    let budget = match &truth {
        Some(t) => premise.budget().compound_forward(t.confidence(), complexity),
        None => premise.budget().compound_backward(complexity),
    };
    Some(Candidate { content: component, truth, punctuation, budget })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::Budget;
    use crate::stamp::Stamp;
    use crate::task::{Sentence, Tense};

    fn task(content: Term, punctuation: Punctuation, truth: Option<TruthValue>) -> Task {
        let sentence = Sentence::new(content, punctuation, truth, Tense::Eternal, Stamp::new_input(1, 20, 10, 0));
        Task::new_input(sentence, Budget::new(0.9, 0.8, 0.8))
    }

    fn statement(name: &str) -> Term {
        Term::statement(Op::Inheritance, Term::atom(name), Term::atom("animal")).unwrap()
    }

    #[test]
    fn conjunction_extracts_component_with_plain_deduction() {
        let content = Term::compound(Op::Conjunction, vec![statement("cat"), statement("dog")]).unwrap();
        let premise = task(content, Punctuation::Judgment, Some(TruthValue::new(1.0, 0.9)));
        let candidate = extract(&premise, 0, 0.9).unwrap();
        assert_eq!(candidate.truth.unwrap(), TruthValue::new(1.0, 0.9).deduction(0.9));
    }

    #[test]
    fn disjunction_extraction_double_negates() {
        let content = Term::compound(Op::Disjunction, vec![statement("cat"), statement("dog")]).unwrap();
        let premise = task(content, Punctuation::Judgment, Some(TruthValue::new(0.9, 0.8)));
        let candidate = extract(&premise, 0, 0.9).unwrap();
        let expected = TruthValue::new(0.9, 0.8).negation().deduction(0.9).negation();
        assert_eq!(candidate.truth.unwrap(), expected);
    }

    #[test]
    fn goal_always_uses_plain_deduction() {
        let content = Term::compound(Op::Disjunction, vec![statement("cat"), statement("dog")]).unwrap();
        let premise = task(content, Punctuation::Goal, Some(TruthValue::new(0.9, 0.8)));
        let candidate = extract(&premise, 0, 0.9).unwrap();
        assert_eq!(candidate.truth.unwrap(), TruthValue::new(0.9, 0.8).deduction(0.9));
    }

    #[test]
    fn question_has_no_truth_but_still_extracts() {
        let content = Term::compound(Op::Conjunction, vec![statement("cat"), statement("dog")]).unwrap();
        let premise = task(content, Punctuation::Question, None);
        let candidate = extract(&premise, 1, 0.9).unwrap();
        assert!(candidate.truth.is_none());
        assert_eq!(candidate.content, statement("dog"));
    }

    #[test]
    fn forward_sequence_suppresses_non_first_component() {
        let content = Term::compound_temporal(
            Op::Conjunction,
            vec![statement("cat"), statement("dog")],
            crate::term::TemporalOrder::Forward,
        )
        .unwrap();
        let premise = task(content, Punctuation::Judgment, Some(TruthValue::new(1.0, 0.9)));
        assert!(extract(&premise, 1, 0.9).is_none());
        assert!(extract(&premise, 0, 0.9).is_some());
    }
}
