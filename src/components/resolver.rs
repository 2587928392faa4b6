//! # Deterministic dependency ordering.
//!
//! [`DependencyResolver`] computes a topological ordering over declared
//! dependency names: dependencies come before dependents, and nodes with no
//! mutual dependency keep their insertion order.
//!
//! ## Rules
//! - The ordering is deterministic and identical between the configure pass
//!   and the startup pass; shutdown reverses the realized start order.
//! - Declared dependencies that were never added as nodes are ignored; only
//!   the dependent knows whether they are required.
//! - A cycle is an error naming the nodes still unresolved.

use std::collections::HashMap;

use crate::error::ComponentError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Topological sorter over named nodes with declared dependency names.
#[derive(Default)]
pub struct DependencyResolver {
    nodes: Vec<String>,
    dependencies: HashMap<String, Vec<String>>,
}

impl DependencyResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with its declared dependency names.
    pub fn add_node(&mut self, name: impl Into<String>, dependencies: Vec<String>) {
        let name = name.into();
        self.dependencies.insert(name.clone(), dependencies);
        self.nodes.push(name);
    }

    /// Resolves the ordering: dependencies first, insertion order otherwise.
    pub fn resolve(&self) -> Result<Vec<String>, ComponentError> {
        let mut marks: HashMap<&str, Mark> = self
            .nodes
            .iter()
            .map(|n| (n.as_str(), Mark::Unvisited))
            .collect();
        let mut ordering = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            self.visit(node, &mut marks, &mut ordering)?;
        }

        Ok(ordering)
    }

    fn visit<'a>(
        &'a self,
        node: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        ordering: &mut Vec<String>,
    ) -> Result<(), ComponentError> {
        match marks.get(node) {
            // Unknown name: declared dependency that was never added.
            None => return Ok(()),
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                let names = marks
                    .iter()
                    .filter(|(_, m)| **m == Mark::InProgress)
                    .map(|(n, _)| n.to_string())
                    .collect();
                return Err(ComponentError::DependencyCycle { names });
            }
            Some(Mark::Unvisited) => {}
        }

        marks.insert(node, Mark::InProgress);

        if let Some(deps) = self.dependencies.get(node) {
            for dep in deps {
                self.visit(dep, marks, ordering)?;
            }
        }

        marks.insert(node, Mark::Done);
        ordering.push(node.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(deps: &[&str]) -> Vec<String> {
        deps.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn dependencies_come_first() {
        let mut resolver = DependencyResolver::new();
        resolver.add_node("router", names(&[]));
        resolver.add_node("webapp", names(&["web-server"]));
        resolver.add_node("web-server", names(&["router"]));

        let order = resolver.resolve().unwrap();
        assert_eq!(order, vec!["router", "web-server", "webapp"]);
    }

    #[test]
    fn independent_nodes_keep_insertion_order() {
        let mut resolver = DependencyResolver::new();
        resolver.add_node("b", names(&[]));
        resolver.add_node("a", names(&[]));
        resolver.add_node("c", names(&[]));

        let order = resolver.resolve().unwrap();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn unknown_dependencies_are_ignored() {
        let mut resolver = DependencyResolver::new();
        resolver.add_node("webapp", names(&["provided-elsewhere"]));

        let order = resolver.resolve().unwrap();
        assert_eq!(order, vec!["webapp"]);
    }

    #[test]
    fn cycles_are_detected() {
        let mut resolver = DependencyResolver::new();
        resolver.add_node("a", names(&["b"]));
        resolver.add_node("b", names(&["a"]));

        let err = resolver.resolve().unwrap_err();
        match err {
            ComponentError::DependencyCycle { mut names } => {
                names.sort();
                assert_eq!(names, vec!["a", "b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
