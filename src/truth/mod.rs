//! Truth values (C2): the (frequency, confidence) pair and the truth
//! functions the kernel itself calls — `deduction`, `negation`,
//! `contraposition` — plus the wider NAL truth-function family kept as a
//! stable surface for the syllogistic-rule collaborator (out of scope here).

use std::fmt;
use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;

/// Confidence is clamped to the half-open interval `[0, 1)` — a confidence
/// of exactly 1 would make `evidence()` divide by zero, and NAL treats
/// absolute certainty as unreachable under AIKR.
const MAX_CONFIDENCE: f32 = 0.9999;

#[derive(Debug, Clone, Copy)]
pub struct TruthValue {
    frequency: OrderedFloat<f32>,
    confidence: OrderedFloat<f32>,
}

pub type Truth = TruthValue;

impl TruthValue {
    pub fn new(frequency: f32, confidence: f32) -> Self {
        TruthValue {
            frequency: OrderedFloat(frequency.clamp(0.0, 1.0)),
            confidence: OrderedFloat(confidence.clamp(0.0, MAX_CONFIDENCE)),
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency.0
    }

    pub fn confidence(&self) -> f32 {
        self.confidence.0
    }

    pub fn expectation(&self) -> f32 {
        (self.confidence() * (self.frequency() - 0.5) + 0.5).clamp(0.0, 1.0)
    }

    pub fn is_analytical(&self) -> bool {
        self.confidence() >= MAX_CONFIDENCE
    }

    /// Amount of evidence implied by the confidence, at a fixed evidential
    /// horizon `k` (the engine constant most NAL texts call `k`).
    pub fn evidence(&self, k: f32) -> f32 {
        k * self.confidence() / (1.0 - self.confidence())
    }

    pub fn from_evidence(frequency: f32, evidence: f32, k: f32) -> Self {
        TruthValue::new(frequency, evidence / (evidence + k))
    }

    /// `negation(t)`: (1 − f, c). Used directly by the C8 negation rule.
    pub fn negation(&self) -> TruthValue {
        TruthValue::new(1.0 - self.frequency(), self.confidence())
    }

    /// `deduction(t, reliance)`: f ← t.f; c ← t.f · t.c · reliance. The
    /// single-premise form the structural rules use — distinct from the
    /// two-premise syllogistic `deduction` an external collaborator owns.
    pub fn deduction(&self, reliance: f32) -> TruthValue {
        TruthValue::new(self.frequency(), self.frequency() * self.confidence() * reliance)
    }

    /// Two-premise deduction, kept for the external syllogistic collaborator.
    pub fn deduction2(t1: &TruthValue, t2: &TruthValue) -> TruthValue {
        let f = t1.frequency() * t2.frequency();
        let c = f * t1.confidence() * t2.confidence();
        TruthValue::new(f, c)
    }

    /// `contraposition(t)`: frequency is forced to 0 (a contrapositive
    /// inherits no positive evidence from its premise), confidence derives
    /// from `(1 − f) · c` at the given reliance weight.
    pub fn contraposition(&self, reliance: f32) -> TruthValue {
        let c = (1.0 - self.frequency()) * self.confidence() * reliance;
        TruthValue::new(0.0, c)
    }

    pub fn induction(t1: &TruthValue, t2: &TruthValue, k: f32) -> TruthValue {
        let f = t1.frequency();
        let evidence = t1.confidence() * t2.frequency() * t2.confidence();
        TruthValue::from_evidence(f, evidence * k, k)
    }

    pub fn abduction(t1: &TruthValue, t2: &TruthValue, k: f32) -> TruthValue {
        let f = t2.frequency();
        let evidence = t1.frequency() * t1.confidence() * t2.confidence();
        TruthValue::from_evidence(f, evidence * k, k)
    }

    pub fn comparison(t1: &TruthValue, t2: &TruthValue, k: f32) -> TruthValue {
        let f1 = t1.frequency();
        let f2 = t2.frequency();
        let f0 = f1 * f2;
        let denom = f1 + f2 - f0;
        let f = if denom > 0.0 { f0 / denom } else { 0.0 };
        let evidence = denom * t1.confidence() * t2.confidence();
        TruthValue::from_evidence(f, evidence * k, k)
    }

    pub fn analogy(t1: &TruthValue, t2: &TruthValue) -> TruthValue {
        let f = t1.frequency() * t2.frequency();
        let c = t1.confidence() * t2.confidence() * t2.frequency();
        TruthValue::new(f, c)
    }

    pub fn exemplification(t1: &TruthValue, t2: &TruthValue, k: f32) -> TruthValue {
        let f = 1.0;
        let evidence = t1.frequency() * t1.confidence() * t2.frequency() * t2.confidence();
        TruthValue::from_evidence(f, evidence * k, k)
    }

    pub fn conjunction(t1: &TruthValue, t2: &TruthValue) -> TruthValue {
        TruthValue::new(
            t1.frequency() * t2.frequency(),
            t1.confidence() * t2.confidence(),
        )
    }

    pub fn disjunction(t1: &TruthValue, t2: &TruthValue) -> TruthValue {
        TruthValue::new(
            1.0 - (1.0 - t1.frequency()) * (1.0 - t2.frequency()),
            t1.confidence() * t2.confidence(),
        )
    }

    /// Evidence-weighted revision of two judgments about the same content.
    pub fn revision(t1: &TruthValue, t2: &TruthValue, k: f32) -> TruthValue {
        let e1 = t1.evidence(k);
        let e2 = t2.evidence(k);
        let f = (e1 * t1.frequency() + e2 * t2.frequency()) / (e1 + e2);
        TruthValue::from_evidence(f, e1 + e2, k)
    }

    pub fn default_belief() -> TruthValue {
        TruthValue::new(1.0, 0.9)
    }

    pub fn default_goal() -> TruthValue {
        TruthValue::new(1.0, 0.9)
    }

    pub fn uncertainty() -> TruthValue {
        TruthValue::new(0.5, 0.0)
    }

    pub fn falsehood() -> TruthValue {
        TruthValue::new(0.0, 0.9)
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.frequency(), self.confidence())
    }
}

impl PartialEq for TruthValue {
    fn eq(&self, other: &Self) -> bool {
        (self.frequency() - other.frequency()).abs() < 0.0001
            && (self.confidence() - other.confidence()).abs() < 0.0001
    }
}

impl Eq for TruthValue {}

impl Hash for TruthValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ((self.frequency() * 10000.0) as i32).hash(state);
        ((self.confidence() * 10000.0) as i32).hash(state);
    }
}
