//! Operator registry (section 6): the kernel stores operators by name and
//! reports on their registration so an external execution layer can invoke
//! them — carrying out *what* an operator does is entirely that layer's
//! concern, not the kernel's.

use std::fmt;
use std::sync::Arc;

use crate::term::Term;

pub type OperatorFn = Arc<dyn Fn(&[Term]) + Send + Sync>;

#[derive(Clone)]
pub struct Operator {
    name: String,
    arity: Option<usize>,
    execute: Option<OperatorFn>,
}

impl Operator {
    /// A registered name with no attached behavior — enough to satisfy
    /// `isRegisteredOperator` lookups from a parsed `^name` term.
    pub fn named(name: impl Into<String>) -> Self {
        Operator {
            name: name.into(),
            arity: None,
            execute: None,
        }
    }

    pub fn with_action(name: impl Into<String>, arity: usize, execute: OperatorFn) -> Self {
        Operator {
            name: name.into(),
            arity: Some(arity),
            execute: Some(execute),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn invoke(&self, args: &[Term]) {
        if let Some(f) = &self.execute {
            f(args);
        }
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("has_action", &self.execute.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_operator_has_no_action() {
        let op = Operator::named("^believe");
        assert_eq!(op.name(), "^believe");
        op.invoke(&[]); // no-op, must not panic
    }

    #[test]
    fn operator_with_action_invokes_closure() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();
        let op = Operator::with_action(
            "^count",
            1,
            Arc::new(move |_args: &[Term]| {
                calls2.fetch_add(1, Ordering::SeqCst);
            }),
        );
        op.invoke(&[Term::atom("x")]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
