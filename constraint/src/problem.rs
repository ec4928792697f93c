//! Problem types.

use serde::Serialize;

/// Category of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Disallowed class, abstract class, duplicate identifier.
    Structural,
    /// Too few or too many values in a feature slot.
    Multiplicity,
    /// Unresolved, ambiguous or type-incompatible reference.
    Reference,
    /// Literal outside the attribute type's value space.
    ValueDomain,
    /// A registered feature value constraint rejected a value.
    Custom,
}

/// A human-readable problem attached to an element or a feature slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub kind: ProblemKind,
    pub message: String,
}

impl Problem {
    /// Create a new problem.
    pub fn new(kind: ProblemKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::Structural, message)
    }

    pub fn multiplicity(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::Multiplicity, message)
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::Reference, message)
    }

    pub fn value_domain(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::ValueDomain, message)
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::Custom, message)
    }
}

/// Ordered collection of problems for one scope.
#[derive(Debug, Clone, Default)]
pub struct Problems {
    problems: Vec<Problem>,
}

impl Problems {
    /// Create a new empty problem collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a problem.
    pub fn push(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Get all problems.
    pub fn all(&self) -> &[Problem] {
        &self.problems
    }

    /// Get the messages, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.problems.iter().map(|p| p.message.as_str()).collect()
    }

    /// Remove repeated messages, keeping the first occurrence of each.
    pub fn dedup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.problems.retain(|p| seen.insert(p.message.clone()));
    }
}

impl IntoIterator for Problems {
    type Item = Problem;
    type IntoIter = std::vec::IntoIter<Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.into_iter()
    }
}

impl<'a> IntoIterator for &'a Problems {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}
