//! Product↔image transform (section 4.7): `<(*, x0..xn) → R>` at position i
//! rewrites to `<xi → (/, R, _ at i, ...)>`, and symmetrically for a product
//! on the predicate side with image-int. Only the direct (un-nested) form is
//! handled — rebuilding an outer statement/conjunction/implication around a
//! nested inheritance is left to the caller that knows the surrounding path.

use crate::task::{Punctuation, Task};
use crate::term::{Compound, Op, Term, TermTrait};

use super::{temporal_order_of, Candidate};

/// Extracts `(relation, product_subterms)` from an image, reinserting
/// `filler` at the image's placeholder position.
fn image_to_product(image: &Compound, filler: Term) -> Option<(Term, Vec<Term>)> {
    let idx = image.image_index()?;
    let relation = image.subterms().first()?.clone();
    let mut product = Vec::with_capacity(image.subterms().len());
    let mut shown = 1;
    for pos in 1..=image.subterms().len() {
        if pos == idx {
            product.push(filler.clone());
        } else if shown < image.subterms().len() {
            product.push(image.subterms()[shown].clone());
            shown += 1;
        }
    }
    Some((relation, product))
}

/// Builds an image's subterms (relation + product terms minus the one at
/// `index`) and its placeholder position.
fn product_to_image(relation: Term, product: &Compound, index: usize) -> Option<(Vec<Term>, usize)> {
    if index >= product.subterms().len() {
        return None;
    }
    let mut subterms = vec![relation];
    for (i, t) in product.subterms().iter().enumerate() {
        if i != index {
            subterms.push(t.clone());
        }
    }
    Some((subterms, index + 1))
}

fn carry_truth_and_punctuation(premise: &Task) -> (Option<crate::truth::TruthValue>, Punctuation) {
    let sentence = premise.sentence();
    let truth = match sentence.punctuation() {
        Punctuation::Judgment | Punctuation::Goal => sentence.truth().cloned(),
        Punctuation::Question | Punctuation::Quest => None,
    };
    (truth, sentence.punctuation())
}

fn budget_for(premise: &Task, content_complexity: u32) -> crate::budget::Budget {
    match premise.sentence().truth() {
        Some(t) => premise.budget().compound_forward(t.confidence(), content_complexity),
        None => premise.budget().compound_backward(content_complexity),
    }
}

/// `<(*, x0..xn) → R>` at `index` ⊢ `<xi → (/, R, _, ...)>`.
pub fn product_on_subject(premise: &Task, index: usize) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    let product = subject.as_compound()?;
    if product.operator() != Op::Product {
        return None;
    }
    let new_subject = product.subterms().get(index)?.clone();
    let (image_subterms, image_index) = product_to_image(predicate.clone(), product, index)?;
    let new_predicate = Term::image(Op::ImageExt, image_subterms, image_index)?;
    let order = temporal_order_of(premise.sentence().content());
    let content = Term::statement_temporal(Op::Inheritance, new_subject, new_predicate, order)?;
    let (truth, punctuation) = carry_truth_and_punctuation(premise);
    let budget = budget_for(premise, content.complexity());
    Some(Candidate { content, truth, punctuation, budget })
}

/// Inverse: `<xi → (/, R, _, ...)>` ⊢ `<(*, x0..xn) → R>`.
pub fn image_ext_to_product(premise: &Task) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    let image = predicate.as_compound()?;
    if image.operator() != Op::ImageExt {
        return None;
    }
    let (relation, product_terms) = image_to_product(image, subject.clone())?;
    let new_subject = Term::compound(Op::Product, product_terms)?;
    let order = temporal_order_of(premise.sentence().content());
    let content = Term::statement_temporal(Op::Inheritance, new_subject, relation, order)?;
    let (truth, punctuation) = carry_truth_and_punctuation(premise);
    let budget = budget_for(premise, content.complexity());
    Some(Candidate { content, truth, punctuation, budget })
}

/// Dual of `product_on_subject`: `<A → (*, x0..xn)>` at `index` ⊢
/// `<(\, A, _, ...) → xi>`.
pub fn product_on_predicate(premise: &Task, index: usize) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    let product = predicate.as_compound()?;
    if product.operator() != Op::Product {
        return None;
    }
    let new_predicate = product.subterms().get(index)?.clone();
    let (image_subterms, image_index) = product_to_image(subject.clone(), product, index)?;
    let new_subject = Term::image(Op::ImageInt, image_subterms, image_index)?;
    let order = temporal_order_of(premise.sentence().content());
    let content = Term::statement_temporal(Op::Inheritance, new_subject, new_predicate, order)?;
    let (truth, punctuation) = carry_truth_and_punctuation(premise);
    let budget = budget_for(premise, content.complexity());
    Some(Candidate { content, truth, punctuation, budget })
}

/// Inverse of `product_on_predicate`.
pub fn image_int_to_product(premise: &Task) -> Option<Candidate> {
    let (subject, predicate) = premise.sentence().content().statement_parts()?;
    let image = subject.as_compound()?;
    if image.operator() != Op::ImageInt {
        return None;
    }
    let (relation, product_terms) = image_to_product(image, predicate.clone())?;
    let new_predicate = Term::compound(Op::Product, product_terms)?;
    let order = temporal_order_of(premise.sentence().content());
    let content = Term::statement_temporal(Op::Inheritance, relation, new_predicate, order)?;
    let (truth, punctuation) = carry_truth_and_punctuation(premise);
    let budget = budget_for(premise, content.complexity());
    Some(Candidate { content, truth, punctuation, budget })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::Budget;
    use crate::stamp::Stamp;
    use crate::task::{Sentence, Tense};
    use crate::truth::TruthValue;

    fn task(content: Term) -> Task {
        let sentence = Sentence::new(
            content,
            Punctuation::Judgment,
            Some(TruthValue::new(1.0, 0.9)),
            Tense::Eternal,
            Stamp::new_input(1, 20, 10, 0),
        );
        Task::new_input(sentence, Budget::new(0.8, 0.8, 0.8))
    }

    #[test]
    fn product_on_subject_position_zero() {
        let product = Term::compound(Op::Product, vec![Term::atom("tom"), Term::atom("mary")]).unwrap();
        let content = Term::statement(Op::Inheritance, product, Term::atom("uncle")).unwrap();
        let candidate = product_on_subject(&task(content), 0).unwrap();
        assert_eq!(format!("{}", candidate.content), "(tom --> (/, uncle, _, mary))");
    }

    #[test]
    fn product_on_subject_position_one() {
        let product = Term::compound(Op::Product, vec![Term::atom("tom"), Term::atom("mary")]).unwrap();
        let content = Term::statement(Op::Inheritance, product, Term::atom("uncle")).unwrap();
        let candidate = product_on_subject(&task(content), 1).unwrap();
        assert_eq!(format!("{}", candidate.content), "(mary --> (/, uncle, tom, _))");
    }

    #[test]
    fn round_trip_recovers_original() {
        let product = Term::compound(Op::Product, vec![Term::atom("tom"), Term::atom("mary")]).unwrap();
        let original = Term::statement(Op::Inheritance, product, Term::atom("uncle")).unwrap();
        let forward = product_on_subject(&task(original.clone()), 0).unwrap();
        let back = image_ext_to_product(&task(forward.content)).unwrap();
        assert_eq!(back.content, original);
    }

    #[test]
    fn product_on_predicate_is_dual() {
        let product = Term::compound(Op::Product, vec![Term::atom("tom"), Term::atom("mary")]).unwrap();
        let content = Term::statement(Op::Inheritance, Term::atom("uncle"), product).unwrap();
        let candidate = product_on_predicate(&task(content), 0).unwrap();
        assert_eq!(format!("{}", candidate.content), "((\\, uncle, _, mary) --> tom)");
    }
}
