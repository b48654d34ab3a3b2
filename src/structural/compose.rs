//! Compose-2/Decompose-2 and Compose-1/Decompose-1 (section 4.7): relating
//! a statement to a same-kind binary compound built from one of its sides,
//! and relating a statement to a compound occupying one whole side.

use crate::task::{Punctuation, Task};
use crate::term::{Op, Term, TermTrait};

use super::{temporal_order_of, Candidate};

fn build(premise: &Task, content: Term, truth: Option<crate::truth::TruthValue>) -> Candidate {
    let punctuation = premise.sentence().punctuation();
    let complexity = content.complexity();
    let budget = match &truth {
        Some(t) => premise.budget().compound_forward(t.confidence(), complexity),
        None => premise.budget().compound_backward(complexity),
    };
    Candidate { content, truth, punctuation, budget }
}

/// `{<S → P>, S ∈ (S·T)} ⊢ <(S·T) → (P·T)>`, inverted to
/// `⊢ <(P·T) → (S·T)>` with negated truth when `·` is a difference and `S`
/// sits at index 1 (`switchOrder`, section 4.7). `compound` is the
/// indicated same-kind binary compound a term-link pointed at; it carries
/// no truth of its own. Guard: neither side of the premise is already a
/// compound, `compound`'s other term isn't the premise's predicate, and
/// `compound`'s operator is one of the same-kind binary set operators
/// (intersection/difference) — not an arbitrary 2-ary compound.
pub fn compose2(premise: &Task, compound: &Term, reliance: f32) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    if subject.is_compound() || predicate.is_compound() {
        return None;
    }
    let op = compound.op()?;
    if !matches!(op, Op::IntersectionExt | Op::IntersectionInt | Op::DifferenceExt | Op::DifferenceInt) {
        return None;
    }
    let terms = compound.subterms();
    if terms.len() != 2 {
        return None;
    }
    let (s_index, other) = if terms[0] == *subject {
        (0, terms[1].clone())
    } else if terms[1] == *subject {
        (1, terms[0].clone())
    } else {
        return None;
    };
    if other == *predicate {
        return None;
    }

    let replaced_terms = if s_index == 0 {
        vec![predicate.clone(), other]
    } else {
        vec![other, predicate.clone()]
    };
    let replaced = Term::compound(op, replaced_terms)?;
    let order = temporal_order_of(premise.sentence().content());
    let switch = switches_order(op, s_index);
    let (new_subject, new_predicate, order) = if switch {
        (replaced, compound.clone(), order.reversed())
    } else {
        (compound.clone(), replaced, order)
    };
    let content = Term::statement_temporal(Op::Inheritance, new_subject, new_predicate, order)?;

    let truth = premise.sentence().truth().map(|t| {
        let d = t.deduction(reliance);
        if switch {
            d.negation()
        } else {
            d
        }
    });
    Some(build(premise, content, truth))
}

/// `{<(S·T) → (P·T)>} ⊢ <S → P>`. `index` names the position shared by
/// both compounds (`T`); the other position yields `S` and `P`.
pub fn decompose2(premise: &Task, index: usize) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    let sc = subject.as_compound()?;
    let pc = predicate.as_compound()?;
    if sc.operator() != pc.operator() || sc.subterms().len() != 2 || pc.subterms().len() != 2 {
        return None;
    }
    if index >= 2 || sc.subterms()[index] != pc.subterms()[index] {
        return None;
    }
    let other = 1 - index;
    let content = Term::statement(Op::Inheritance, sc.subterms()[other].clone(), pc.subterms()[other].clone())?;

    let truth = match premise.sentence().punctuation() {
        Punctuation::Judgment | Punctuation::Goal => premise.sentence().truth().cloned(),
        _ => None,
    };
    Some(build(premise, content, truth))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Subject,
    Predicate,
}

/// `switchOrder(compound, index)`: true for difference index 1. Images are
/// handled separately in `product_image`.
fn switches_order(op: Op, index: usize) -> bool {
    matches!(op, Op::DifferenceExt | Op::DifferenceInt) && index == 1
}

/// Compose-1/Decompose-1: the statement has a compound on `side` at
/// position `index`; extract that component and relate it to the other
/// side directly (or, for sets, wrapped back into a singleton).
pub fn compose1(premise: &Task, side_is_subject: bool, index: usize, reliance: f32) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    let side = if side_is_subject { Side::Subject } else { Side::Predicate };
    let (compound_term, other_term) = match side {
        Side::Subject => (subject, predicate),
        Side::Predicate => (predicate, subject),
    };
    let compound = compound_term.as_compound()?;
    let op = compound.operator();
    let component = compound.subterms().get(index)?.clone();

    let negate_truth = match (op, side) {
        (Op::IntersectionExt, Side::Subject) => return None, // no rule on the subject side
        (Op::IntersectionExt, Side::Predicate) => false,
        (Op::IntersectionInt, Side::Subject) => {
            // Open question (preserved as a no-op per the source): whether
            // this branch should fire when the component equals the other
            // side's term is ambiguous upstream; skip it rather than guess.
            if component == *other_term {
                return None;
            }
            false
        }
        (Op::IntersectionInt, Side::Predicate) => return None, // dual of the ext/subject drop
        (Op::DifferenceExt, _) => index == 1,
        (Op::DifferenceInt, _) => false,
        (Op::SetExt, _) | (Op::SetInt, _) => {
            if compound.subterms().len() <= 1 {
                return None;
            }
            false
        }
        _ => return None,
    };

    let new_component = match op {
        Op::SetExt | Op::SetInt => Term::compound(op, vec![component])?,
        _ => component,
    };

    let order = temporal_order_of(premise.sentence().content());
    let switch = switches_order(op, index);
    let (new_subject, new_predicate, order) = {
        let (s, p) = match side {
            Side::Subject => (new_component, other_term.clone()),
            Side::Predicate => (other_term.clone(), new_component),
        };
        if switch {
            (p, s, order.reversed())
        } else {
            (s, p, order)
        }
    };
    let content = Term::statement_temporal(Op::Inheritance, new_subject, new_predicate, order)?;

    let truth = premise.sentence().truth().map(|t| {
        let d = t.deduction(reliance);
        if negate_truth {
            d.negation()
        } else {
            d
        }
    });
    Some(build(premise, content, truth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::Budget;
    use crate::stamp::Stamp;
    use crate::task::{Sentence, Tense};
    use crate::truth::TruthValue;

    fn judgment(content: Term) -> Task {
        let sentence = Sentence::new(content, Punctuation::Judgment, Some(TruthValue::new(1.0, 0.9)), Tense::Eternal, Stamp::new_input(1, 20, 10, 0));
        Task::new_input(sentence, Budget::new(0.9, 0.8, 0.8))
    }

    #[test]
    fn compose2_rejects_a_non_set_compound() {
        let content = Term::statement(Op::Inheritance, Term::atom("s"), Term::atom("p")).unwrap();
        let compound = Term::statement(Op::Inheritance, Term::atom("s"), Term::atom("t")).unwrap();
        assert!(compose2(&judgment(content), &compound, 0.9).is_none());
    }

    #[test]
    fn compose2_inverts_order_and_negates_truth_for_difference_index_one() {
        // <s --> p> + (-, m, s) at index 1 ⊢ <(-, m, p) --> (-, m, s)>
        // with truth negate(deduction(t, r)), per switchOrder(difference, 1).
        let content = Term::statement(Op::Inheritance, Term::atom("s"), Term::atom("p")).unwrap();
        let compound = Term::compound(Op::DifferenceExt, vec![Term::atom("m"), Term::atom("s")]).unwrap();
        let premise = judgment(content);
        let candidate = compose2(&premise, &compound, 0.9).unwrap();
        assert_eq!(format!("{}", candidate.content), "((m - p) --> (m - s))");
        let expected = premise.sentence().truth().unwrap().deduction(0.9).negation();
        assert_eq!(candidate.truth.unwrap().frequency(), expected.frequency());
        assert_eq!(candidate.truth.unwrap().confidence(), expected.confidence());
    }

    #[test]
    fn compose2_builds_matching_compounds_on_both_sides() {
        let content = Term::statement(Op::Inheritance, Term::atom("s"), Term::atom("p")).unwrap();
        let compound = Term::compound(Op::IntersectionExt, vec![Term::atom("s"), Term::atom("t")]).unwrap();
        let candidate = compose2(&judgment(content), &compound, 0.9).unwrap();
        assert_eq!(format!("{}", candidate.content), "((s & t) --> (p & t))");
    }

    #[test]
    fn decompose2_extracts_the_non_shared_terms() {
        let sc = Term::compound(Op::IntersectionExt, vec![Term::atom("s"), Term::atom("t")]).unwrap();
        let pc = Term::compound(Op::IntersectionExt, vec![Term::atom("p"), Term::atom("t")]).unwrap();
        let content = Term::statement(Op::Inheritance, sc, pc).unwrap();
        let candidate = decompose2(&judgment(content), 1).unwrap();
        assert_eq!(format!("{}", candidate.content), "(s --> p)");
    }

    #[test]
    fn difference_ext_index_one_negates_truth() {
        let difference = Term::compound(Op::DifferenceExt, vec![Term::atom("a"), Term::atom("b")]).unwrap();
        let content = Term::statement(Op::Inheritance, Term::atom("s"), difference).unwrap();
        let candidate = compose1(&judgment(content), false, 1, 0.9).unwrap();
        assert_eq!(candidate.truth.unwrap().frequency(), 1.0 - TruthValue::new(1.0, 0.9).deduction(0.9).frequency());
    }

    #[test]
    fn intersection_ext_as_subject_has_no_rule() {
        let intersection = Term::compound(Op::IntersectionExt, vec![Term::atom("a"), Term::atom("b")]).unwrap();
        let content = Term::statement(Op::Inheritance, intersection, Term::atom("p")).unwrap();
        assert!(compose1(&judgment(content), true, 0, 0.9).is_none());
    }

    #[test]
    fn set_decomposition_wraps_component_as_singleton() {
        let set = Term::compound(Op::SetExt, vec![Term::atom("a"), Term::atom("b")]).unwrap();
        let content = Term::statement(Op::Inheritance, Term::atom("s"), set).unwrap();
        let candidate = compose1(&judgment(content), false, 0, 0.9).unwrap();
        assert_eq!(format!("{}", candidate.content), "(s --> {a})");
    }
}
