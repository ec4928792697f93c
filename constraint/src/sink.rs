//! Problem annotation sinks.

use crate::problem::{Problem, ProblemKind};
use concrete_core::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Receives problem annotations for tree nodes.
pub trait ProblemSink {
    /// Attach a problem to a node.
    fn attach(&mut self, node: NodeId, problem: Problem);

    /// Remove all problems from exactly this node (not its descendants).
    fn clear(&mut self, node: NodeId);

    /// Drop the annotations of every node for which `keep` returns false.
    fn retain(&mut self, _keep: &dyn Fn(NodeId) -> bool) {}
}

/// One row of an exported problem report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemReport {
    pub node: NodeId,
    pub kind: ProblemKind,
    pub message: String,
}

/// Side table of problems keyed by node.
///
/// This is the default sink: the validation engine owns it, and editors read
/// problem markers and descriptions from it instead of from their view nodes.
#[derive(Debug, Clone, Default)]
pub struct ProblemTable {
    entries: BTreeMap<NodeId, Vec<Problem>>,
}

impl ProblemTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Problems attached to a node, in attachment order.
    pub fn problems(&self, node: NodeId) -> &[Problem] {
        self.entries
            .get(&node)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Messages attached to a node, in attachment order.
    pub fn messages(&self, node: NodeId) -> Vec<&str> {
        self.problems(node)
            .iter()
            .map(|p| p.message.as_str())
            .collect()
    }

    /// The "has problems" marker of a node.
    pub fn has_problems(&self, node: NodeId) -> bool {
        !self.problems(node).is_empty()
    }

    /// Nodes carrying at least one problem, in node order.
    pub fn annotated_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.keys().copied()
    }

    /// Total number of problems across all nodes.
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten the table into report rows, in node order.
    pub fn report(&self) -> Vec<ProblemReport> {
        self.entries
            .iter()
            .flat_map(|(&node, problems)| {
                problems.iter().map(move |p| ProblemReport {
                    node,
                    kind: p.kind,
                    message: p.message.clone(),
                })
            })
            .collect()
    }
}

impl ProblemSink for ProblemTable {
    fn attach(&mut self, node: NodeId, problem: Problem) {
        self.entries.entry(node).or_default().push(problem);
    }

    fn clear(&mut self, node: NodeId) {
        self.entries.remove(&node);
    }

    fn retain(&mut self, keep: &dyn Fn(NodeId) -> bool) {
        self.entries.retain(|&node, _| keep(node));
    }
}
