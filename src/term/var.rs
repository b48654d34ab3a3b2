//! Variable terms: dependent (#), independent ($), query (?), and pattern
//! (%) variables. They never appear in a constant term and always satisfy
//! `match_term` — the unification placeholder of the algebra.

use std::fmt;

use smartstring::alias::String as SmartString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarKind {
    Dependent,
    Independent,
    Query,
    Pattern,
}

impl VarKind {
    fn prefix(self) -> char {
        match self {
            VarKind::Dependent => '#',
            VarKind::Independent => '$',
            VarKind::Query => '?',
            VarKind::Pattern => '%',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    name: SmartString,
    kind: VarKind,
}

impl Variable {
    fn prefixed(name: &str, kind: VarKind) -> Self {
        let prefix = kind.prefix();
        let name = if name.starts_with(prefix) {
            SmartString::from(name)
        } else {
            SmartString::from(format!("{}{}", prefix, name))
        };
        Variable { name, kind }
    }

    pub fn new_dep(name: &str) -> Self {
        Self::prefixed(name, VarKind::Dependent)
    }

    pub fn new_indep(name: &str) -> Self {
        Self::prefixed(name, VarKind::Independent)
    }

    pub fn new_query(name: &str) -> Self {
        Self::prefixed(name, VarKind::Query)
    }

    pub fn new_pattern(name: &str) -> Self {
        Self::prefixed(name, VarKind::Pattern)
    }

    /// The variable name without its kind prefix.
    pub fn name(&self) -> &str {
        &self.name[1..]
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn prefix(&self) -> char {
        self.kind.prefix()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_creation_adds_prefix() {
        let dep = Variable::new_dep("x");
        assert_eq!(format!("{}", dep), "#x");
        assert_eq!(dep.prefix(), '#');
        assert_eq!(dep.name(), "x");

        let indep = Variable::new_indep("y");
        assert_eq!(format!("{}", indep), "$y");

        let query = Variable::new_query("z");
        assert_eq!(format!("{}", query), "?z");

        let pattern = Variable::new_pattern("S");
        assert_eq!(format!("{}", pattern), "%S");
    }

    #[test]
    fn variable_with_explicit_prefix_is_not_doubled() {
        let dep = Variable::new_dep("#x");
        assert_eq!(format!("{}", dep), "#x");
    }
}
