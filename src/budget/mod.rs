//! The budget triple (C2) and the compound budget functions structural
//! rules use to derive a child task's budget from its parent's.

use std::fmt;

use num_traits::clamp;
use ordered_float::OrderedFloat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Budget {
    priority: OrderedFloat<f32>,
    durability: OrderedFloat<f32>,
    quality: OrderedFloat<f32>,
}

impl Budget {
    pub fn new(priority: f32, durability: f32, quality: f32) -> Self {
        Budget {
            priority: OrderedFloat(clamp(priority, 0.0, 1.0)),
            durability: OrderedFloat(clamp(durability, 0.0, 1.0)),
            quality: OrderedFloat(clamp(quality, 0.0, 1.0)),
        }
    }

    pub fn priority(&self) -> f32 {
        self.priority.0
    }

    pub fn durability(&self) -> f32 {
        self.durability.0
    }

    pub fn quality(&self) -> f32 {
        self.quality.0
    }

    pub fn set_priority(&mut self, p: f32) {
        self.priority = OrderedFloat(clamp(p, 0.0, 1.0));
    }

    /// Monotone summary used to rank items within a bag level.
    pub fn value(&self) -> f32 {
        self.priority() * self.durability() * self.quality()
    }

    pub fn above_threshold(&self, threshold: f32) -> bool {
        self.priority() >= threshold
    }

    /// Weighted-mean priority/durability divided by a complexity factor —
    /// shared by every `compound*`/`forward` budget function below.
    fn weighted(priority: f32, durability: f32, quality: f32, complexity: u32) -> Budget {
        let factor = 1.0 / (complexity.max(1) as f32).sqrt();
        Budget::new(priority * factor, durability * factor, quality)
    }

    /// `compoundForward(truth, content)`: budget for a forward (judgment-
    /// carrying) derivation.
    pub fn compound_forward(&self, truth_confidence: f32, content_complexity: u32) -> Budget {
        let priority = self.priority() * truth_confidence;
        let durability = self.durability() * truth_confidence;
        Budget::weighted(priority, durability, self.quality(), content_complexity)
    }

    /// `compoundBackward(content)`: budget for a question/quest derivation
    /// that keeps the parent's strength (no truth to weight by).
    pub fn compound_backward(&self, content_complexity: u32) -> Budget {
        Budget::weighted(self.priority(), self.durability(), self.quality(), content_complexity)
    }

    /// `compoundBackwardWeak(content)`: like `compoundBackward` but halves
    /// priority — used where the conclusion is a weaker restatement of the
    /// question (e.g. contraposition of a question).
    pub fn compound_backward_weak(&self, content_complexity: u32) -> Budget {
        Budget::weighted(
            self.priority() * 0.5,
            self.durability() * 0.5,
            self.quality(),
            content_complexity,
        )
    }

    /// `forward(truth)`: a plain pass-through budget weighted only by
    /// confidence, with no complexity factor (used when content size is
    /// unchanged from the premise).
    pub fn forward(&self, truth_confidence: f32) -> Budget {
        Budget::new(
            self.priority() * truth_confidence,
            self.durability() * truth_confidence,
            self.quality(),
        )
    }

    /// Durability-decayed reinsertion budget, used by the priority bag's
    /// `putBack`.
    pub fn decayed(&self, decay: f32) -> Budget {
        Budget::new(self.priority(), self.durability() * decay, self.quality())
    }

    /// Merge two budgets for the same key on `putIn` collision: priority is
    /// the max (the stronger claim wins attention), durability and quality
    /// are averaged.
    pub fn merge(&self, other: &Budget) -> Budget {
        Budget::new(
            self.priority().max(other.priority()),
            (self.durability() + other.durability()) / 2.0,
            (self.quality() + other.quality()) / 2.0,
        )
    }
}

impl Default for Budget {
    fn default() -> Self {
        Budget::new(0.5, 0.5, 0.5)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${:.2};{:.2};{:.2}$",
            self.priority(),
            self.durability(),
            self.quality()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_unit_interval() {
        let b = Budget::new(1.5, -0.5, 0.5);
        assert_eq!(b.priority(), 1.0);
        assert_eq!(b.durability(), 0.0);
    }

    #[test]
    fn default_is_middling() {
        let b = Budget::default();
        assert_eq!(b.priority(), 0.5);
        assert_eq!(b.durability(), 0.5);
        assert_eq!(b.quality(), 0.5);
    }

    #[test]
    fn compound_forward_weakens_with_complexity() {
        let b = Budget::new(0.8, 0.8, 0.8);
        let simple = b.compound_forward(0.9, 1);
        let complex = b.compound_forward(0.9, 9);
        assert!(complex.priority() < simple.priority());
    }

    #[test]
    fn backward_weak_is_half_of_backward() {
        let b = Budget::new(0.8, 0.8, 0.8);
        let strong = b.compound_backward(1);
        let weak = b.compound_backward_weak(1);
        assert!(weak.priority() < strong.priority());
    }

    #[test]
    fn decay_only_affects_durability() {
        let b = Budget::new(0.8, 0.8, 0.8);
        let decayed = b.decayed(0.5);
        assert_eq!(decayed.priority(), b.priority());
        assert!(decayed.durability() < b.durability());
    }

    #[test]
    fn merge_takes_max_priority() {
        let a = Budget::new(0.3, 0.5, 0.5);
        let b = Budget::new(0.9, 0.1, 0.9);
        let m = a.merge(&b);
        assert_eq!(m.priority(), 0.9);
    }

    #[test]
    fn above_threshold() {
        let b = Budget::new(0.3, 0.5, 0.5);
        assert!(b.above_threshold(0.2));
        assert!(!b.above_threshold(0.5));
    }
}
