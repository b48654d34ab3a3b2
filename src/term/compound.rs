//! Compound terms: products, images, sets, intersections, differences,
//! conjunction/disjunction, negation, and the four statement copulas.
//! `Compound::build` is where canonicalization happens — every other
//! constructor in the crate funnels through it.

use std::fmt;
use std::sync::Arc;

use super::{Op, Term, TermFlags, TermTrait, TemporalOrder};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompoundData {
    operator: Op,
    subterms: Arc<[Term]>,
    image_index: Option<usize>,
    temporal_order: TemporalOrder,
    flags: TermFlags,
}

pub type Compound = CompoundData;

impl CompoundData {
    pub fn operator(&self) -> Op {
        self.operator
    }

    pub fn subterms(&self) -> &[Term] {
        &self.subterms
    }

    pub fn image_index(&self) -> Option<usize> {
        self.image_index
    }

    pub fn temporal_order(&self) -> TemporalOrder {
        self.temporal_order
    }

    pub fn flags(&self) -> TermFlags {
        self.flags
    }

    pub fn is_temporal(&self) -> bool {
        self.temporal_order != TemporalOrder::None
    }

    /// `(&&, a, b)` with a non-`None` temporal order is a sequence.
    pub fn is_sequence(&self) -> bool {
        self.operator == Op::Conjunction && self.is_temporal()
    }

    pub fn complexity(&self) -> u32 {
        1 + self.subterms.iter().map(TermTrait::complexity).sum::<u32>()
    }

    /// Canonicalizing constructor. Returns `None` for degenerate forms:
    /// below minimum arity, or (for the non-associative binary operators)
    /// two structurally-equal sides.
    pub fn build(
        operator: Op,
        mut subterms: Vec<Term>,
        image_index: Option<usize>,
        temporal_order: TemporalOrder,
    ) -> Option<CompoundData> {
        if operator.is_associative() {
            let mut flattened = Vec::with_capacity(subterms.len());
            for t in subterms {
                match &t {
                    Term::Compound(c) if c.operator() == operator && !operator.is_image() => {
                        flattened.extend(c.subterms().iter().cloned());
                    }
                    _ => flattened.push(t),
                }
            }
            subterms = flattened;
        }

        if operator.is_commutative() {
            subterms.sort();
            subterms.dedup();
        }

        if subterms.len() < operator.min_arity() {
            return None;
        }

        if !operator.is_commutative() && subterms.len() == 2 && matches!(operator, Op::DifferenceExt | Op::DifferenceInt)
            && subterms[0] == subterms[1]
        {
            return None;
        }

        if operator.is_statement() && subterms.len() == 2 && subterms[0] == subterms[1] {
            return None;
        }

        let has_var = subterms.iter().any(|t| !t.is_constant());
        let mut flags = TermFlags::empty();
        if has_var {
            flags |= TermFlags::HAS_VAR;
        }
        if temporal_order != TemporalOrder::None {
            flags |= TermFlags::TEMPORAL;
        }
        if operator.is_commutative() {
            flags |= TermFlags::COMMUTATIVE;
        }

        Some(CompoundData {
            operator,
            subterms: subterms.into(),
            image_index,
            temporal_order,
            flags,
        })
    }
}

// `Term::compound` wraps `CompoundData::build` but must additionally handle
// the single-child identity collapse (returning the child `Term` itself
// rather than a one-element compound), which only the enum-level
// constructor can express. We re-route through a small free function here
// so `Term::compound` stays a thin call and the collapse logic lives next
// to the rest of the canonicalization rules it depends on.
impl super::Term {
    pub(super) fn compound_collapsing(
        operator: Op,
        subterms: Vec<Term>,
        image_index: Option<usize>,
        temporal_order: TemporalOrder,
    ) -> Option<Term> {
        if operator.collapses_to_child() {
            let mut normalized = subterms.clone();
            if operator.is_commutative() {
                normalized.sort();
                normalized.dedup();
            }
            if normalized.len() == 1 {
                return Some(normalized.into_iter().next().unwrap());
            }
        }
        CompoundData::build(operator, subterms, image_index, temporal_order).map(Term::Compound)
    }
}

impl fmt::Display for CompoundData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Op::SetExt => {
                write!(f, "{{")?;
                for (i, t) in self.subterms.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, "}}")
            }
            Op::SetInt => {
                write!(f, "[")?;
                for (i, t) in self.subterms.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, "]")
            }
            Op::Product => {
                write!(f, "(")?;
                for (i, t) in self.subterms.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, ")")
            }
            Op::Negation => write!(f, "(--, {})", self.subterms[0]),
            op if op.is_image() => {
                write!(f, "({}", op)?;
                let placeholder = self.image_index.unwrap_or(usize::MAX);
                let mut shown = 0usize;
                for pos in 0..=self.subterms.len() {
                    if pos == placeholder {
                        write!(f, ", _")?;
                    } else if shown < self.subterms.len() {
                        write!(f, ", {}", self.subterms[shown])?;
                        shown += 1;
                    }
                }
                write!(f, ")")
            }
            op if op.is_statement() && self.subterms.len() == 2 => {
                write!(f, "({} {} {})", self.subterms[0], op, self.subterms[1])
            }
            op if self.subterms.len() == 2 && !op.is_image() => {
                write!(f, "({} {} {})", self.subterms[0], op, self.subterms[1])
            }
            op => {
                write!(f, "({}", op)?;
                for t in self.subterms.iter() {
                    write!(f, ", {}", t)?;
                }
                write!(f, ")")
            }
        }
    }
}
