//! The term algebra (C1): atoms, compounds, statements, and the
//! canonicalization rules that keep structurally-equal terms interchangeable.

pub mod atom;
pub mod compound;
pub mod var;

pub use atom::Atomic;
pub use compound::{Compound, CompoundData};
pub use var::Variable;

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

bitflags! {
    /// Cached structural properties of a compound, computed once at
    /// construction so hot-path checks (is this constant? does it carry a
    /// variable?) don't re-walk the subterm tree.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TermFlags: u8 {
        const HAS_VAR      = 0b0000_0001;
        const TEMPORAL     = 0b0000_0010;
        const COMMUTATIVE  = 0b0000_0100;
    }
}

/// The tag distinguishing every compound/statement shape the algebra knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    Product,
    ImageExt,
    ImageInt,
    SetExt,
    SetInt,
    IntersectionExt,
    IntersectionInt,
    DifferenceExt,
    DifferenceInt,
    Conjunction,
    Disjunction,
    Negation,
    Inheritance,
    Similarity,
    Implication,
    Equivalence,
}

impl Op {
    /// Operators whose operand order carries no meaning, so construction
    /// sorts and dedupes them.
    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            Op::SetExt
                | Op::SetInt
                | Op::IntersectionExt
                | Op::IntersectionInt
                | Op::Conjunction
                | Op::Disjunction
                | Op::Similarity
                | Op::Equivalence
        )
    }

    /// Operators that flatten one level of self-nesting (`(&&, (&&, a, b), c)`
    /// becomes `(&&, a, b, c)`).
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            Op::IntersectionExt | Op::IntersectionInt | Op::Conjunction | Op::Disjunction
        )
    }

    /// A single remaining child collapses to that child rather than staying
    /// wrapped (`(&, a)` is just `a`). Sets keep singleton wrapping since
    /// `{canary}` is a meaningful one-element set, not an identity collapse.
    pub fn collapses_to_child(self) -> bool {
        matches!(
            self,
            Op::IntersectionExt | Op::IntersectionInt | Op::Conjunction | Op::Disjunction
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Op::Inheritance | Op::Similarity | Op::Implication | Op::Equivalence
        )
    }

    pub fn is_image(self) -> bool {
        matches!(self, Op::ImageExt | Op::ImageInt)
    }

    /// Implication, equivalence, and conjunction (when used as a temporal
    /// sequence) are the only connectives that carry a temporal order.
    pub fn carries_temporal_order(self) -> bool {
        matches!(self, Op::Implication | Op::Equivalence | Op::Conjunction)
    }

    /// Minimum arity the operator's construction accepts; fewer children is
    /// a degenerate form and construction returns `None`.
    pub fn min_arity(self) -> usize {
        match self {
            Op::Negation => 1,
            Op::SetExt | Op::SetInt => 1,
            Op::Product => 1,
            Op::ImageExt | Op::ImageInt => 2,
            _ => 2,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Product => "*",
            Op::ImageExt => "/",
            Op::ImageInt => "\\",
            Op::SetExt => "{}",
            Op::SetInt => "[]",
            Op::IntersectionExt => "&",
            Op::IntersectionInt => "|",
            Op::DifferenceExt => "-",
            Op::DifferenceInt => "~",
            Op::Conjunction => "&&",
            Op::Disjunction => "||",
            Op::Negation => "--",
            Op::Inheritance => "-->",
            Op::Similarity => "<->",
            Op::Implication => "==>",
            Op::Equivalence => "<=>",
        };
        write!(f, "{}", s)
    }
}

/// Temporal order of a statement or temporal connective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemporalOrder {
    None,
    Forward,
    Concurrent,
    Backward,
}

impl TemporalOrder {
    /// The reversal used by contraposition and by `switchOrder` conclusions.
    pub fn reversed(self) -> TemporalOrder {
        match self {
            TemporalOrder::Forward => TemporalOrder::Backward,
            TemporalOrder::Backward => TemporalOrder::Forward,
            other => other,
        }
    }
}

/// Behaviour shared by every term variant. Kept to the handful of queries
/// the rest of the kernel actually needs, rather than mirroring every method
/// an individual variant happens to implement.
pub trait TermTrait {
    fn complexity(&self) -> u32;
    fn is_atomic(&self) -> bool;
    fn is_compound(&self) -> bool;
    fn is_variable(&self) -> bool;
    /// True for terms with no variable anywhere in their structure — the
    /// `isConstant` guard structural rules check before firing.
    fn is_constant(&self) -> bool;
}

/// A persistent, structurally-hashed value: atom, compound/statement, or
/// variable. Equal terms are `==` and therefore interchangeable anywhere,
/// which is all "hash-consing" requires here — subterms are shared via
/// `Arc` so equality and cloning stay cheap without a global intern table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Atomic(Atomic),
    Compound(Compound),
    Variable(Variable),
}

impl Term {
    pub fn atom(name: impl Into<smartstring::alias::String>) -> Term {
        Term::Atomic(Atomic::new_atom(name))
    }

    /// Construct a compound, applying canonicalization. Returns `None` for
    /// degenerate forms (below minimum arity, or a difference/statement
    /// whose two sides are structurally equal).
    pub fn compound(op: Op, subterms: Vec<Term>) -> Option<Term> {
        Term::compound_collapsing(op, subterms, None, TemporalOrder::None)
    }

    pub fn compound_temporal(op: Op, subterms: Vec<Term>, order: TemporalOrder) -> Option<Term> {
        Term::compound_collapsing(op, subterms, None, order)
    }

    pub fn image(op: Op, subterms: Vec<Term>, image_index: usize) -> Option<Term> {
        Term::compound_collapsing(op, subterms, Some(image_index), TemporalOrder::None)
    }

    pub fn statement(copula: Op, subject: Term, predicate: Term) -> Option<Term> {
        Term::compound(copula, vec![subject, predicate])
    }

    pub fn statement_temporal(
        copula: Op,
        subject: Term,
        predicate: Term,
        order: TemporalOrder,
    ) -> Option<Term> {
        Term::compound_temporal(copula, vec![subject, predicate], order)
    }

    pub fn negate(self) -> Option<Term> {
        Term::compound(Op::Negation, vec![self])
    }

    /// `make(template, newComponents)`: rebuild a compound of the same
    /// operator, image index, and temporal order with different children.
    pub fn make_like(&self, new_components: Vec<Term>) -> Option<Term> {
        match self {
            Term::Compound(c) => Term::compound_collapsing(
                c.operator(),
                new_components,
                c.image_index(),
                c.temporal_order(),
            ),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Term::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn subterms(&self) -> &[Term] {
        match self {
            Term::Compound(c) => c.subterms(),
            _ => &[],
        }
    }

    pub fn op(&self) -> Option<Op> {
        match self {
            Term::Compound(c) => Some(c.operator()),
            _ => None,
        }
    }

    /// For a statement `<S → P>` etc., the subject and predicate; `None`
    /// for anything else.
    pub fn statement_parts(&self) -> Option<(&Term, &Term)> {
        match self {
            Term::Compound(c) if c.operator().is_statement() && c.subterms().len() == 2 => {
                Some((&c.subterms()[0], &c.subterms()[1]))
            }
            _ => None,
        }
    }

    /// Structural match used by variable unification and by rules that
    /// check "is this term the component I'm looking for": atoms compare
    /// equal, variables always match, compounds recurse pairwise.
    pub fn match_term(&self, pattern: &Term) -> bool {
        match pattern {
            Term::Variable(_) => true,
            _ => match (self, pattern) {
                (Term::Compound(a), Term::Compound(b)) => {
                    a.operator() == b.operator()
                        && a.subterms().len() == b.subterms().len()
                        && a.subterms()
                            .iter()
                            .zip(b.subterms().iter())
                            .all(|(x, y)| x.match_term(y))
                }
                _ => self == pattern,
            },
        }
    }
}

impl TermTrait for Term {
    fn complexity(&self) -> u32 {
        match self {
            Term::Atomic(_) | Term::Variable(_) => 1,
            Term::Compound(c) => c.complexity(),
        }
    }

    fn is_atomic(&self) -> bool {
        matches!(self, Term::Atomic(_))
    }

    fn is_compound(&self) -> bool {
        matches!(self, Term::Compound(_))
    }

    fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    fn is_constant(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Atomic(_) => true,
            Term::Compound(c) => !c.flags().contains(TermFlags::HAS_VAR),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atomic(a) => write!(f, "{}", a),
            Term::Compound(c) => write!(f, "{}", c),
            Term::Variable(v) => write!(f, "{}", v),
        }
    }
}

/// Shorthand used throughout structural rules: an `Arc<[Term]>` children
/// list, matching the teacher crate's choice to share subterm storage.
pub type Subterms = Arc<[Term]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_equality() {
        assert_eq!(Term::atom("bird"), Term::atom("bird"));
        assert_ne!(Term::atom("bird"), Term::atom("canary"));
    }

    #[test]
    fn commutative_dedupe_and_sort() {
        let a = Term::atom("a");
        let b = Term::atom("b");
        let t1 =
            Term::compound(Op::IntersectionExt, vec![b.clone(), a.clone(), b.clone()]).unwrap();
        let t2 = Term::compound(Op::IntersectionExt, vec![a, b]).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn singleton_intersection_collapses() {
        let a = Term::atom("a");
        let t = Term::compound(Op::IntersectionExt, vec![a.clone()]).unwrap();
        assert_eq!(t, a);
    }

    #[test]
    fn singleton_set_does_not_collapse() {
        let a = Term::atom("canary");
        let t = Term::compound(Op::SetExt, vec![a.clone()]).unwrap();
        assert_ne!(t, a);
        assert!(t.is_compound());
    }

    #[test]
    fn self_difference_is_degenerate() {
        let a = Term::atom("a");
        assert!(Term::compound(Op::DifferenceExt, vec![a.clone(), a]).is_none());
    }

    #[test]
    fn statement_not_constant_with_variable() {
        let v = Term::Variable(Variable::new_indep("x"));
        let s = Term::statement(Op::Inheritance, v, Term::atom("bird")).unwrap();
        assert!(!s.is_constant());
    }

    #[test]
    fn match_term_with_variable_always_matches() {
        let pattern = Term::Variable(Variable::new_pattern("x"));
        assert!(Term::atom("bird").match_term(&pattern));
    }

    #[test]
    fn make_like_preserves_operator() {
        let s = Term::statement(Op::Inheritance, Term::atom("a"), Term::atom("b")).unwrap();
        let rebuilt = s.make_like(vec![Term::atom("c"), Term::atom("d")]).unwrap();
        assert_eq!(rebuilt.op(), Some(Op::Inheritance));
    }
}
