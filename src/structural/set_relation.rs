//! Set-relation singleton transform (section 4.7): `<S → {P}> ⊢ <S ↔ {P}>`
//! when the set is a singleton on either side of the inheritance, and the
//! reverse, which picks the inheritance direction from whichever side of
//! the similarity holds the singleton set.

use crate::task::{Punctuation, Task};
use crate::term::{Op, Term, TermTrait};

use super::Candidate;

fn is_singleton_set(term: &Term) -> bool {
    term.as_compound()
        .map(|c| c.operator() == Op::SetExt && c.subterms().len() == 1)
        .unwrap_or(false)
}

fn build_candidate(premise: &Task, content: Term, reliance: f32) -> Candidate {
    let complexity = content.complexity();
    let punctuation = premise.sentence().punctuation();
    let truth = match premise.sentence().truth() {
        Some(t) => Some(t.deduction(reliance)),
        None => None,
    };
    let budget = match &truth {
        Some(t) => premise.budget().compound_forward(t.confidence(), complexity),
        None => premise.budget().compound_backward(complexity),
    };
    Candidate { content, truth, punctuation, budget }
}

/// `<S → {P}> ⊢ <S ↔ {P}>`.
pub fn inheritance_to_similarity(premise: &Task, reliance: f32) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    if premise.sentence().content().op()? != Op::Inheritance {
        return None;
    }
    if !is_singleton_set(subject) && !is_singleton_set(predicate) {
        return None;
    }
    let content = Term::statement(Op::Similarity, subject.clone(), predicate.clone())?;
    Some(build_candidate(premise, content, reliance))
}

/// `<S ↔ {P}> ⊢ <S → {P}>`, choosing direction from whichever side holds
/// the singleton set.
pub fn similarity_to_inheritance(premise: &Task, reliance: f32) -> Option<Candidate> {
    let content_term = premise.sentence().content();
    if content_term.op()? != Op::Similarity {
        return None;
    }
    let subterms = content_term.subterms();
    if subterms.len() != 2 {
        return None;
    }
    let (a, b) = (&subterms[0], &subterms[1]);
    let (subject, predicate) = match (is_singleton_set(a), is_singleton_set(b)) {
        (true, false) => (b.clone(), a.clone()),
        (false, true) => (a.clone(), b.clone()),
        _ => return None,
    };
    let content = Term::statement(Op::Inheritance, subject, predicate)?;
    Some(build_candidate(premise, content, reliance))
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
    fn bird_singleton_canary_transforms_to_similarity() {
        let set = Term::compound(Op::SetExt, vec![Term::atom("canary")]).unwrap();
        let content = Term::statement(Op::Inheritance, Term::atom("bird"), set).unwrap();
        let candidate = inheritance_to_similarity(&judgment(content), 0.9).unwrap();
        assert_eq!(format!("{}", candidate.content), "(bird <-> {canary})");
        assert!(candidate.truth.is_some());
    }

    #[test]
    fn non_singleton_predicate_has_no_rule() {
        let set = Term::compound(Op::SetExt, vec![Term::atom("canary"), Term::atom("robin")]).unwrap();
        let content = Term::statement(Op::Inheritance, Term::atom("bird"), set).unwrap();
        assert!(inheritance_to_similarity(&judgment(content), 0.9).is_none());
    }

    #[test]
    fn similarity_round_trip() {
        let set = Term::compound(Op::SetExt, vec![Term::atom("canary")]).unwrap();
        let content = Term::statement(Op::Similarity, Term::atom("bird"), set).unwrap();
        let candidate = similarity_to_inheritance(&judgment(content), 0.9).unwrap();
        assert_eq!(format!("{}", candidate.content), "(bird --> {canary})");
    }
}
