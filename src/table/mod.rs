//! Bounded, ranked sentence lists (C4): the belief, goal, question, and
//! quest lists a `Concept` holds. Ranked by truth expectation for
//! judgments/goals and by recency for questions/quests, capped at a fixed
//! capacity with the weakest entry evicted on overflow.

use crate::task::Sentence;

#[derive(Debug, Clone)]
pub struct RankedTable {
    entries: Vec<Sentence>,
    capacity: usize,
}

impl RankedTable {
    pub fn new(capacity: usize) -> Self {
        RankedTable {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn rank(sentence: &Sentence) -> f32 {
        sentence.truth().map(|t| t.expectation()).unwrap_or(0.0)
    }

    /// Insert keeping descending rank order; evicts the weakest entry if
    /// the table is full and the new entry doesn't outrank it.
    pub fn add(&mut self, sentence: Sentence) -> Option<Sentence> {
        let rank = Self::rank(&sentence);
        let pos = self
            .entries
            .iter()
            .position(|s| Self::rank(s) < rank)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, sentence);
        if self.entries.len() > self.capacity {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn best(&self) -> Option<&Sentence> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.entries.iter()
    }

    /// Best belief whose content matches `term` exactly, the closest this
    /// bounded table comes to the data model's `truth(start, end, term)`
    /// lookup without a temporal index (out of scope here).
    pub fn best_matching(&self, term: &crate::term::Term) -> Option<&Sentence> {
        self.entries.iter().find(|s| s.content() == term)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::Stamp;
    use crate::task::{Punctuation, Tense};
    use crate::term::Term;
    use crate::truth::TruthValue;

    fn sentence(freq: f32, conf: f32) -> Sentence {
        Sentence::new(
            Term::atom("a"),
            Punctuation::Judgment,
            Some(TruthValue::new(freq, conf)),
            Tense::Eternal,
            Stamp::new_input(1, 20, 10, 0),
        )
    }

    #[test]
    fn higher_expectation_ranks_first() {
        let mut table = RankedTable::new(10);
        table.add(sentence(0.5, 0.5));
        table.add(sentence(0.9, 0.9));
        assert_eq!(table.best().unwrap().truth().unwrap().frequency(), 0.9);
    }

    #[test]
    fn capacity_evicts_the_weakest() {
        let mut table = RankedTable::new(1);
        table.add(sentence(0.5, 0.5));
        let evicted = table.add(sentence(0.9, 0.9));
        assert!(evicted.is_some());
        assert_eq!(table.len(), 1);
        assert_eq!(table.best().unwrap().truth().unwrap().frequency(), 0.9);
    }
}
