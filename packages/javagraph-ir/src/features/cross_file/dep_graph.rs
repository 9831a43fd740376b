//! Dependency Graph with petgraph
//!
//! Declaration-level dependency graph over admitted declarations.
//! Supports Tarjan SCC for cycle detection and a deterministic topological
//! order (dependencies first).

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet};

use super::symbol_table::SymbolTable;
use super::types::{DependencyEdge, EdgeTarget};

/// Declaration dependency graph
///
/// Directed graph where:
/// - Nodes are qualified names of admitted declarations
/// - Edges represent dependencies (A → B means A depends on B)
///
/// Only edges between two admitted declarations participate; external,
/// type-variable and conflicted targets are left out, as are self-loops.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    name_to_node: BTreeMap<String, NodeIndex>,
    cycles: Vec<Vec<String>>,
    topo_order: Vec<String>,
}

impl DependencyGraph {
    pub fn build(symbols: &SymbolTable, edges: &[DependencyEdge]) -> Self {
        let mut graph = DiGraph::new();
        let mut name_to_node = BTreeMap::new();

        for decl in symbols.iter() {
            let idx = graph.add_node(decl.qualified_name.clone());
            name_to_node.insert(decl.qualified_name.clone(), idx);
        }

        // Parallel edges of different kinds collapse into one
        let mut seen = BTreeSet::new();
        for edge in edges {
            let EdgeTarget::Declared(target) = &edge.to else {
                continue;
            };
            if *target == edge.from {
                continue;
            }
            if let (Some(&from), Some(&to)) = (name_to_node.get(&edge.from), name_to_node.get(target)) {
                if seen.insert((from, to)) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut names: Vec<String> = scc.into_iter().map(|idx| graph[idx].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();

        let topo_order = Self::compute_topological_order(&graph);

        Self {
            graph,
            name_to_node,
            cycles,
            topo_order,
        }
    }

    /// Kahn's algorithm on dependency counts, smallest name first
    ///
    /// Nodes left over (cycle members and whatever depends on them) are
    /// appended in name order.
    fn compute_topological_order(graph: &DiGraph<String, ()>) -> Vec<String> {
        let mut remaining: Vec<usize> = graph
            .node_indices()
            .map(|idx| graph.neighbors_directed(idx, Direction::Outgoing).count())
            .collect();

        let mut ready: BTreeSet<(&str, NodeIndex)> = graph
            .node_indices()
            .filter(|idx| remaining[idx.index()] == 0)
            .map(|idx| (graph[idx].as_str(), idx))
            .collect();

        let mut emitted = vec![false; graph.node_count()];
        let mut order = Vec::with_capacity(graph.node_count());

        while let Some((name, idx)) = ready.pop_first() {
            order.push(name.to_string());
            emitted[idx.index()] = true;
            for dependent in graph.neighbors_directed(idx, Direction::Incoming) {
                let count = &mut remaining[dependent.index()];
                *count -= 1;
                if *count == 0 {
                    ready.insert((graph[dependent].as_str(), dependent));
                }
            }
        }

        let mut leftover: Vec<&str> = graph
            .node_indices()
            .filter(|idx| !emitted[idx.index()])
            .map(|idx| graph[idx].as_str())
            .collect();
        leftover.sort_unstable();
        order.extend(leftover.into_iter().map(str::to_string));
        order
    }

    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn topological_order(&self) -> &[String] {
        &self.topo_order
    }

    pub fn into_parts(self) -> (Vec<Vec<String>>, Vec<String>) {
        (self.cycles, self.topo_order)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Declarations this one depends on, sorted
    pub fn dependencies(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Declarations that depend on this one, sorted
    pub fn dependents(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Incoming)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.name_to_node.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect();
        names.sort();
        names
    }
}
