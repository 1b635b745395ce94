//! Qubit dependency graph of a program.
//!
//! One node per instruction; an edge runs from the previous instruction on a
//! qubit to the next instruction on the same qubit, labelled with that qubit.
//! Node `i` always corresponds to instruction `i`, so program order is a
//! topological order.

use crate::instruction::Instruction;
use crate::qubit::QubitId;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

/// Dependency graph over instruction indices.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<usize, QubitId, u32>,
}

impl DependencyGraph {
    /// Build the graph for an instruction sequence.
    pub fn new(instructions: &[Instruction]) -> Self {
        let mut graph = DiGraph::with_capacity(instructions.len(), instructions.len());
        let mut last_on_qubit: FxHashMap<QubitId, NodeIndex<u32>> = FxHashMap::default();

        for (index, instruction) in instructions.iter().enumerate() {
            let node = graph.add_node(index);
            for qubit in instruction.qubits() {
                if let Some(prev) = last_on_qubit.insert(qubit, node) {
                    graph.add_edge(prev, node, qubit);
                }
            }
        }

        Self { graph }
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph has no instructions.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of qubit-ordering edges.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Instructions that must finish before instruction `index` starts,
    /// ascending and without repeats.
    pub fn predecessors(&self, index: usize) -> Vec<usize> {
        self.neighbours(index, Direction::Incoming)
    }

    /// Instructions that wait on instruction `index`, ascending and without
    /// repeats.
    pub fn successors(&self, index: usize) -> Vec<usize> {
        self.neighbours(index, Direction::Outgoing)
    }

    fn neighbours(&self, index: usize, direction: Direction) -> Vec<usize> {
        if index >= self.len() {
            return Vec::new();
        }
        let node = NodeIndex::new(index);
        let mut out: Vec<usize> = self
            .graph
            .edges_directed(node, direction)
            .map(|e| {
                let other = if direction == Direction::Incoming {
                    e.source()
                } else {
                    e.target()
                };
                self.graph[other]
            })
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Layer of every instruction: 1 + the deepest predecessor layer.
    ///
    /// Barriers occupy no layer of their own; they take the layer of their
    /// deepest predecessor.
    pub fn layers(&self, instructions: &[Instruction]) -> Vec<usize> {
        let mut layer = vec![0usize; self.len()];
        for index in 0..self.len() {
            let deepest = self
                .graph
                .edges_directed(NodeIndex::new(index), Direction::Incoming)
                .map(|e| layer[self.graph[e.source()]])
                .max()
                .unwrap_or(0);
            let is_barrier = instructions.get(index).is_some_and(Instruction::is_barrier);
            layer[index] = if is_barrier { deepest } else { deepest + 1 };
        }
        layer
    }

    /// Length of the longest dependency chain.
    pub fn depth(&self, instructions: &[Instruction]) -> usize {
        self.layers(instructions).into_iter().max().unwrap_or(0)
    }

    /// Check the ordering invariant: every edge points forward.
    pub fn is_consistent(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.graph)
            && self
                .graph
                .edge_references()
                .all(|e| self.graph[e.source()] < self.graph[e.target()])
    }
}
