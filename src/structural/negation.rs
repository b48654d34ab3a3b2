//! Negation (section 4.7): `{A} ⊢ (¬A)`.

use crate::task::{Punctuation, Task};
use crate::term::TermTrait;

use super::Candidate;

pub fn negate(premise: &Task) -> Option<Candidate> {
    let content = premise.sentence().content().clone().negate()?;
    let punctuation = premise.sentence().punctuation();
    let complexity = content.complexity();
    let (truth, budget) = match punctuation {
        Punctuation::Judgment | Punctuation::Goal => {
            let t = premise.sentence().truth()?.negation();
            let b = premise.budget().compound_forward(t.confidence(), complexity);
            (Some(t), b)
        }
        Punctuation::Question | Punctuation::Quest => {
            (None, premise.budget().compound_backward(complexity))
        }
    };
    Some(Candidate { content, truth, punctuation, budget })
}
