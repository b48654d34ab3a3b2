//! Stamp (C3): evidential provenance for a sentence. Bounds both the
//! evidential base (for overlap/revision checks) and the derivation chain
//! (for cycle detection), so reasoning lineages cannot grow without limit.

use lru::LruCache;
use std::num::NonZeroUsize;

use crate::term::Term;

#[derive(Debug, Clone)]
pub struct Stamp {
    evidential_base: Vec<u64>,
    max_evidence: usize,
    chain: LruCache<Term, ()>,
    creation_time: i64,
    occurrence_time: OccurrenceTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceTime {
    Eternal,
    At(i64),
}

impl Stamp {
    pub fn new_input(id: u64, max_evidence: usize, max_chain: usize, now: i64) -> Self {
        Stamp {
            evidential_base: vec![id],
            max_evidence,
            chain: LruCache::new(NonZeroUsize::new(max_chain.max(1)).unwrap()),
            creation_time: now,
            occurrence_time: OccurrenceTime::Eternal,
        }
    }

    /// Builds a stamp from an already-computed evidential base, bypassing
    /// `merge`'s overlap refusal. Used by revision when the caller has
    /// already combined two bases and needs the admission gate's
    /// overlap check (section 4.6 step 5) to be the backstop instead.
    pub fn from_raw_base(base: Vec<u64>, max_evidence: usize, max_chain: usize, now: i64) -> Self {
        Stamp {
            evidential_base: base,
            max_evidence,
            chain: LruCache::new(NonZeroUsize::new(max_chain.max(1)).unwrap()),
            creation_time: now,
            occurrence_time: OccurrenceTime::Eternal,
        }
    }

    pub fn evidential_base(&self) -> &[u64] {
        &self.evidential_base
    }

    pub fn creation_time(&self) -> i64 {
        self.creation_time
    }

    pub fn occurrence_time(&self) -> OccurrenceTime {
        self.occurrence_time
    }

    pub fn set_occurrence_time(&mut self, t: OccurrenceTime) {
        self.occurrence_time = t;
    }

    /// Two stamps overlap if their evidential bases share any id — the
    /// guard the attention loop uses before attempting revision.
    pub fn overlaps(&self, other: &Stamp) -> bool {
        self.evidential_base
            .iter()
            .any(|id| other.evidential_base.contains(id))
    }

    /// True if the evidential base itself contains a duplicate id — the
    /// admission gate's "Overlapping Evidence" check, applied to a single
    /// already-merged stamp rather than comparing two.
    pub fn has_internal_overlap(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        !self.evidential_base.iter().all(|id| seen.insert(*id))
    }

    /// `Stamp.make(a, b, now)`: merge two evidential bases by interleaving,
    /// truncating to `max_evidence`. Returns `None` if `a` and `b` overlap.
    pub fn merge(a: &Stamp, b: &Stamp, now: i64) -> Option<Stamp> {
        if a.overlaps(b) {
            return None;
        }
        let max_evidence = a.max_evidence.max(b.max_evidence);
        let max_chain = a.chain.cap().get().max(b.chain.cap().get());
        let mut base = Vec::with_capacity(a.evidential_base.len() + b.evidential_base.len());
        let mut ia = a.evidential_base.iter();
        let mut ib = b.evidential_base.iter();
        loop {
            match (ia.next(), ib.next()) {
                (Some(x), Some(y)) => {
                    base.push(*x);
                    base.push(*y);
                }
                (Some(x), None) => base.push(*x),
                (None, Some(y)) => base.push(*y),
                (None, None) => break,
            }
        }
        base.truncate(max_evidence);

        let mut chain = LruCache::new(NonZeroUsize::new(max_chain.max(1)).unwrap());
        for (term, _) in a.chain.iter().chain(b.chain.iter()) {
            chain.put(term.clone(), ());
        }

        Some(Stamp {
            evidential_base: base,
            max_evidence,
            chain,
            creation_time: now,
            occurrence_time: OccurrenceTime::Eternal,
        })
    }

    /// Single-premise derivation: copy the parent stamp, bump creation time.
    pub fn derive_single(parent: &Stamp, now: i64) -> Stamp {
        let mut s = parent.clone();
        s.creation_time = now;
        s
    }

    /// `addToChain(t)`: append a term, moving it to the end if already
    /// present (LRU's `put` gives this for free), capped at the chain's
    /// bound.
    pub fn add_to_chain(&mut self, term: Term) {
        self.chain.put(term, ());
    }

    pub fn chain_contains(&self, term: &Term) -> bool {
        self.chain.contains(term)
    }

    pub fn chain_terms(&self) -> impl Iterator<Item = &Term> {
        self.chain.iter().map(|(t, _)| t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn overlap_detection() {
        let a = Stamp::new_input(1, 20, 10, 0);
        let b = Stamp::new_input(1, 20, 10, 0);
        assert!(a.overlaps(&b));
        let c = Stamp::new_input(2, 20, 10, 0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn merge_fails_on_overlap() {
        let a = Stamp::new_input(1, 20, 10, 0);
        let b = Stamp::new_input(1, 20, 10, 0);
        assert!(Stamp::merge(&a, &b, 1).is_none());
    }

    #[test]
    fn merge_commutative_as_a_set() {
        let a = Stamp::new_input(1, 20, 10, 0);
        let b = Stamp::new_input(2, 20, 10, 0);
        let ab = Stamp::merge(&a, &b, 1).unwrap();
        let ba = Stamp::merge(&b, &a, 1).unwrap();
        let mut ab_sorted = ab.evidential_base().to_vec();
        let mut ba_sorted = ba.evidential_base().to_vec();
        ab_sorted.sort();
        ba_sorted.sort();
        assert_eq!(ab_sorted, ba_sorted);
    }

    #[test]
    fn chain_bounded_and_moves_to_end() {
        let mut s = Stamp::new_input(1, 20, 2, 0);
        let a = Term::atom("a");
        let b = Term::atom("b");
        let c = Term::atom("c");
        s.add_to_chain(a.clone());
        s.add_to_chain(b.clone());
        s.add_to_chain(c.clone());
        assert!(!s.chain_contains(&a));
        assert!(s.chain_contains(&b));
        assert!(s.chain_contains(&c));
    }

    #[test]
    fn internal_overlap_detection() {
        let mut s = Stamp::new_input(1, 20, 10, 0);
        s.evidential_base.push(1);
        assert!(s.has_internal_overlap());
    }
}
