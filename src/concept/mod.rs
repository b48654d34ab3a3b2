//! Concepts (C3): the per-term hub a reasoner builds up as it processes
//! tasks. Keyed by a constant term; holds ranked belief/goal/question/quest
//! lists plus task-link and term-link bags, created on first reference and
//! pruned by ordinary bag eviction when its activation decays away.

use std::fmt;

use crate::bag::{Bag, BagItem};
use crate::table::RankedTable;
use crate::task::{Punctuation, Sentence, TaskId};
use crate::term::Term;

/// A bag entry pointing at a task living in `Memory`'s task arena.
#[derive(Debug, Clone, Copy)]
pub struct TaskLink {
    pub id: TaskId,
    pub priority: f32,
}

impl BagItem for TaskLink {
    type Key = TaskId;

    fn key(&self) -> TaskId {
        self.id
    }

    fn priority(&self) -> f32 {
        self.priority
    }

    fn merge_with(&mut self, other: Self) {
        self.priority = self.priority.max(other.priority);
    }

    fn decay(&mut self, rate: f32) {
        self.priority *= rate;
    }
}

/// A bag entry pointing at a related term (found by decomposing this
/// concept's term into its subterms and compounds containing it).
#[derive(Debug, Clone)]
pub struct TermLink {
    pub term: Term,
    pub priority: f32,
}

impl BagItem for TermLink {
    type Key = Term;

    fn key(&self) -> Term {
        self.term.clone()
    }

    fn priority(&self) -> f32 {
        self.priority
    }

    fn merge_with(&mut self, other: Self) {
        self.priority = self.priority.max(other.priority);
    }

    fn decay(&mut self, rate: f32) {
        self.priority *= rate;
    }
}

pub struct Concept {
    term: Term,
    beliefs: RankedTable,
    goals: RankedTable,
    questions: RankedTable,
    quests: RankedTable,
    task_links: Bag<TaskLink>,
    term_links: Bag<TermLink>,
    activation: f32,
}

impl Concept {
    pub fn new(term: Term, belief_capacity: usize, link_capacity: usize, link_levels: usize) -> Self {
        Concept {
            term,
            beliefs: RankedTable::new(belief_capacity),
            goals: RankedTable::new(belief_capacity),
            questions: RankedTable::new(belief_capacity),
            quests: RankedTable::new(belief_capacity),
            task_links: Bag::new(link_capacity, link_levels),
            term_links: Bag::new(link_capacity, link_levels),
            activation: 0.0,
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn beliefs(&self) -> &RankedTable {
        &self.beliefs
    }

    pub fn goals(&self) -> &RankedTable {
        &self.goals
    }

    pub fn questions(&self) -> &RankedTable {
        &self.questions
    }

    pub fn quests(&self) -> &RankedTable {
        &self.quests
    }

    pub fn task_links(&mut self) -> &mut Bag<TaskLink> {
        &mut self.task_links
    }

    pub fn term_links(&mut self) -> &mut Bag<TermLink> {
        &mut self.term_links
    }

    /// Files a sentence into the table matching its punctuation.
    pub fn add_sentence(&mut self, sentence: Sentence) -> Option<Sentence> {
        match sentence.punctuation() {
            Punctuation::Judgment => self.beliefs.add(sentence),
            Punctuation::Goal => self.goals.add(sentence),
            Punctuation::Question => self.questions.add(sentence),
            Punctuation::Quest => self.quests.add(sentence),
        }
    }

    pub fn best_belief(&self, term: &Term) -> Option<&Sentence> {
        self.beliefs.best_matching(term).or_else(|| self.beliefs.best())
    }

    pub fn best_goal(&self) -> Option<&Sentence> {
        self.goals.best()
    }

    pub fn activation(&self) -> f32 {
        self.activation
    }

    pub fn set_activation(&mut self, activation: f32) {
        self.activation = activation.clamp(0.0, 1.0);
    }

    pub fn increase_activation(&mut self, amount: f32) {
        self.activation = (self.activation + amount).min(1.0);
    }

    pub fn decay_activation(&mut self, rate: f32) {
        self.activation = (self.activation * rate).max(0.0);
    }
}

impl BagItem for Concept {
    type Key = Term;

    fn key(&self) -> Term {
        self.term.clone()
    }

    fn priority(&self) -> f32 {
        self.activation
    }

    /// Concepts never collide by key construction (one concept per term),
    /// but a merge arriving anyway keeps the higher activation and unions
    /// nothing else — link bags stay with whichever side wins the merge.
    fn merge_with(&mut self, other: Self) {
        self.activation = self.activation.max(other.activation);
    }

    fn decay(&mut self, rate: f32) {
        self.decay_activation(rate);
    }
}

impl fmt::Debug for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Concept")
            .field("term", &self.term)
            .field("activation", &self.activation)
            .field("beliefs", &self.beliefs.len())
            .field("goals", &self.goals.len())
            .field("questions", &self.questions.len())
            .field("quests", &self.quests.len())
            .finish()
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} activation={:.2} beliefs={} goals={}",
            self.term,
            self.activation,
            self.beliefs.len(),
            self.goals.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::Stamp;
    use crate::task::Tense;
    use crate::truth::TruthValue;

    fn judgment(term: Term) -> Sentence {
        Sentence::new(
            term,
            Punctuation::Judgment,
            Some(TruthValue::default_belief()),
            Tense::Eternal,
            Stamp::new_input(1, 20, 10, 0),
        )
    }

    #[test]
    fn new_concept_has_empty_tables() {
        let concept = Concept::new(Term::atom("cat"), 10, 10, 5);
        assert_eq!(concept.beliefs().len(), 0);
        assert_eq!(concept.activation(), 0.0);
    }

    #[test]
    fn add_sentence_files_by_punctuation() {
        let mut concept = Concept::new(Term::atom("cat"), 10, 10, 5);
        concept.add_sentence(judgment(Term::atom("cat")));
        assert_eq!(concept.beliefs().len(), 1);
        assert_eq!(concept.goals().len(), 0);
    }

    #[test]
    fn activation_clamps_and_decays() {
        let mut concept = Concept::new(Term::atom("cat"), 10, 10, 5);
        concept.set_activation(0.7);
        concept.increase_activation(0.5);
        assert_eq!(concept.activation(), 1.0);
        concept.decay_activation(0.5);
        assert_eq!(concept.activation(), 0.5);
    }

    #[test]
    fn concept_bag_item_key_is_its_term() {
        let concept = Concept::new(Term::atom("cat"), 10, 10, 5);
        assert_eq!(concept.key(), Term::atom("cat"));
    }
}
