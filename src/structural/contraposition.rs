//! Contraposition (section 4.7): `<A ⇒ B> ⊢ <(¬B) ⇒ (¬A)>`, temporal order
//! reversed. Punctuation is set explicitly rather than simply copied, since
//! a contraposed quest or goal has no sensible reading here — only
//! judgments and questions reach this rule.

use crate::task::{Punctuation, Task};
use crate::term::{Op, Term, TermTrait};

use super::{temporal_order_of, Candidate};

pub fn contrapose(premise: &Task, reliance: f32) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    if premise.sentence().content().op()? != Op::Implication {
        return None;
    }
    let neg_subject = subject.clone().negate()?;
    let neg_predicate = predicate.clone().negate()?;
    let order = temporal_order_of(premise.sentence().content()).reversed();
    let content = Term::statement_temporal(Op::Implication, neg_predicate, neg_subject, order)?;
    let complexity = content.complexity();

    let punctuation = premise.sentence().punctuation();
    let (truth, budget) = match punctuation {
        Punctuation::Judgment => {
            let t = premise.sentence().truth()?.contraposition(reliance);
            let b = premise.budget().compound_forward(t.confidence(), complexity);
            (Some(t), b)
        }
        Punctuation::Question => (None, premise.budget().compound_backward_weak(complexity)),
        _ => (None, premise.budget().compound_backward(complexity)),
    };

    Some(Candidate { content, truth, punctuation, budget })
}
