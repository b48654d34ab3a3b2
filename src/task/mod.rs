//! Sentences and tasks (C4, part 1). A `Sentence` is the immutable content
//! a task carries; a `Task` adds the scheduling budget and the parent
//! back-references used by the admission gate's cycle and circularity
//! checks. Tasks are owned by whichever bag currently holds them — other
//! structures refer to a task by its `TaskId`, a slotmap key that goes
//! stale (not dangling) once the owning slot is freed, which is what keeps
//! parent pointers from forming ownership cycles.

use std::fmt;

use slotmap::new_key_type;

use crate::budget::Budget;
use crate::stamp::Stamp;
use crate::term::Term;
use crate::truth::TruthValue;

new_key_type! {
    /// A weak reference to a `Task` stored in `Memory`'s task arena.
    pub struct TaskId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Judgment,
    Goal,
    Question,
    Quest,
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Punctuation::Judgment => '.',
            Punctuation::Goal => '!',
            Punctuation::Question => '?',
            Punctuation::Quest => '@',
        };
        write!(f, "{}", c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    Eternal,
    At(i64),
}

impl Default for Tense {
    fn default() -> Self {
        Tense::Eternal
    }
}

/// (content, punctuation, truth, stamp). Truth is present for judgments and
/// goals, absent for questions and quests. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Sentence {
    content: Term,
    punctuation: Punctuation,
    truth: Option<TruthValue>,
    tense: Tense,
    stamp: Stamp,
}

impl Sentence {
    pub fn new(
        content: Term,
        punctuation: Punctuation,
        truth: Option<TruthValue>,
        tense: Tense,
        stamp: Stamp,
    ) -> Self {
        debug_assert!(
            matches!(punctuation, Punctuation::Judgment | Punctuation::Goal) || truth.is_none(),
            "questions and quests carry no truth value"
        );
        Sentence {
            content,
            punctuation,
            truth,
            tense,
            stamp,
        }
    }

    pub fn content(&self) -> &Term {
        &self.content
    }

    pub fn punctuation(&self) -> Punctuation {
        self.punctuation
    }

    pub fn truth(&self) -> Option<&TruthValue> {
        self.truth.as_ref()
    }

    pub fn tense(&self) -> Tense {
        self.tense
    }

    pub fn stamp(&self) -> &Stamp {
        &self.stamp
    }

    pub fn stamp_mut(&mut self) -> &mut Stamp {
        &mut self.stamp
    }

    pub fn is_judgment(&self) -> bool {
        matches!(self.punctuation, Punctuation::Judgment)
    }

    pub fn is_goal(&self) -> bool {
        matches!(self.punctuation, Punctuation::Goal)
    }

    pub fn is_question_like(&self) -> bool {
        matches!(self.punctuation, Punctuation::Question | Punctuation::Quest)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.truth {
            Some(t) => write!(f, "{}{} {}", self.content, self.punctuation, t),
            None => write!(f, "{}{}", self.content, self.punctuation),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    sentence: Sentence,
    budget: Budget,
    parent: Option<TaskId>,
    parent_belief: Option<Sentence>,
    best_solution: Option<Sentence>,
}

impl Task {
    pub fn new_input(sentence: Sentence, budget: Budget) -> Self {
        Task {
            sentence,
            budget,
            parent: None,
            parent_belief: None,
            best_solution: None,
        }
    }

    pub fn derived(
        sentence: Sentence,
        budget: Budget,
        parent: TaskId,
        parent_belief: Option<Sentence>,
    ) -> Self {
        Task {
            sentence,
            budget,
            parent: Some(parent),
            parent_belief,
            best_solution: None,
        }
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn sentence_mut(&mut self) -> &mut Sentence {
        &mut self.sentence
    }

    pub fn content(&self) -> &Term {
        self.sentence.content()
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn budget_mut(&mut self) -> &mut Budget {
        &mut self.budget
    }

    pub fn set_budget(&mut self, budget: Budget) {
        self.budget = budget;
    }

    pub fn parent(&self) -> Option<TaskId> {
        self.parent
    }

    pub fn parent_belief(&self) -> Option<&Sentence> {
        self.parent_belief.as_ref()
    }

    pub fn best_solution(&self) -> Option<&Sentence> {
        self.best_solution.as_ref()
    }

    pub fn set_best_solution(&mut self, s: Sentence) {
        self.best_solution = Some(s);
    }

    /// A task is input iff it has no parent.
    pub fn is_input(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sentence, self.budget)
    }
}

/// Builder mirroring the teacher's `TaskBuilder`, extended to validate the
/// punctuation/truth pairing the data model requires.
#[derive(Default)]
pub struct TaskBuilder {
    content: Option<Term>,
    punctuation: Option<Punctuation>,
    truth: Option<TruthValue>,
    tense: Tense,
    budget: Option<Budget>,
    stamp: Option<Stamp>,
    parent: Option<TaskId>,
    parent_belief: Option<Sentence>,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, t: Term) -> Self {
        self.content = Some(t);
        self
    }

    pub fn punctuation(mut self, p: Punctuation) -> Self {
        self.punctuation = Some(p);
        self
    }

    pub fn truth(mut self, t: TruthValue) -> Self {
        self.truth = Some(t);
        self
    }

    pub fn tense(mut self, t: Tense) -> Self {
        self.tense = t;
        self
    }

    pub fn budget(mut self, b: Budget) -> Self {
        self.budget = Some(b);
        self
    }

    pub fn stamp(mut self, s: Stamp) -> Self {
        self.stamp = Some(s);
        self
    }

    pub fn parent(mut self, id: TaskId) -> Self {
        self.parent = Some(id);
        self
    }

    pub fn parent_belief(mut self, s: Sentence) -> Self {
        self.parent_belief = Some(s);
        self
    }

    pub fn build(self) -> Result<Task, &'static str> {
        let content = self.content.ok_or("task requires content")?;
        let punctuation = self.punctuation.ok_or("task requires punctuation")?;
        let stamp = self.stamp.ok_or("task requires a stamp")?;
        if matches!(punctuation, Punctuation::Question | Punctuation::Quest) && self.truth.is_some()
        {
            return Err("questions and quests cannot carry a truth value");
        }
        let sentence = Sentence::new(content, punctuation, self.truth, self.tense, stamp);
        let budget = self.budget.unwrap_or_default();
        Ok(match self.parent {
            Some(parent) => Task::derived(sentence, budget, parent, self.parent_belief),
            None => Task::new_input(sentence, budget),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> Stamp {
        Stamp::new_input(1, 20, 10, 0)
    }

    #[test]
    fn punctuation_display() {
        assert_eq!(format!("{}", Punctuation::Judgment), ".");
        assert_eq!(format!("{}", Punctuation::Goal), "!");
        assert_eq!(format!("{}", Punctuation::Question), "?");
        assert_eq!(format!("{}", Punctuation::Quest), "@");
    }

    #[test]
    fn builder_rejects_truth_on_question() {
        let result = TaskBuilder::new()
            .content(Term::atom("a"))
            .punctuation(Punctuation::Question)
            .truth(TruthValue::default_belief())
            .stamp(stamp())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_builds_input_task() {
        let task = TaskBuilder::new()
            .content(Term::atom("a"))
            .punctuation(Punctuation::Judgment)
            .truth(TruthValue::default_belief())
            .stamp(stamp())
            .build()
            .unwrap();
        assert!(task.is_input());
        assert_eq!(task.content(), &Term::atom("a"));
    }

    #[test]
    fn sentence_display_includes_truth_for_judgment() {
        let s = Sentence::new(
            Term::atom("a"),
            Punctuation::Judgment,
            Some(TruthValue::default_belief()),
            Tense::Eternal,
            stamp(),
        );
        assert_eq!(format!("{}", s), "a. (1.00, 0.90)");
    }

    #[test]
    fn sentence_display_omits_truth_for_question() {
        let s = Sentence::new(Term::atom("a"), Punctuation::Question, None, Tense::Eternal, stamp());
        assert_eq!(format!("{}", s), "a?");
    }
}
