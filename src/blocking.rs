//! Who-blocks-whom graphs and their rigid-group decomposition.
//!
//! For one slide direction, an edge `i -> j` means locked piece `i` would run
//! into `j` if it moved one unit on its own. Pieces on a common cycle can
//! only move together, so the strongly connected components of this graph
//! are the candidate rigid groups. A one-way block never merges two pieces.

use crate::collision::Occupancy;
use crate::geometry::Direction;
use crate::state::PuzzleState;

const UNVISITED: usize = usize::MAX;

#[derive(Clone, Debug, Default)]
pub struct BlockingGraph {
    /// Pieces taking part, in ascending order.
    nodes: Vec<usize>,
    /// Outgoing edges indexed by piece; empty for pieces not in `nodes`.
    edges: Vec<Vec<usize>>,
}

impl BlockingGraph {
    /// Builds the graph over the locked pieces of `state`.
    ///
    /// `occupancy` only lends its mask caches here; the field itself is not
    /// consulted.
    pub fn build(occupancy: &mut Occupancy, state: &PuzzleState, direction: Direction) -> Self {
        let mut edges = vec![Vec::new(); state.num_pieces()];
        let nodes: Vec<usize> = state.locked().collect();
        for &piece in &nodes {
            edges[piece] = occupancy.blockers(state, piece, direction);
        }
        Self { nodes, edges }
    }

    /// Builds a graph from explicit adjacency lists; every piece is a node.
    pub fn from_edges(edges: Vec<Vec<usize>>) -> Self {
        Self {
            nodes: (0..edges.len()).collect(),
            edges,
        }
    }

    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Returns true if `from` alone moving would hit `to`.
    pub fn blocks(&self, from: usize, to: usize) -> bool {
        self.edges.get(from).is_some_and(|out| out.contains(&to))
    }

    /// Partitions the nodes into strongly connected components.
    ///
    /// Iterative Tarjan. Each group is sorted; groups come out in reverse
    /// topological order of the condensed graph, which is stable for a given
    /// input.
    pub fn rigid_groups(&self) -> Vec<Vec<usize>> {
        let mut tarjan = Tarjan::new(self.edges.len());
        for &root in &self.nodes {
            if tarjan.index[root] == UNVISITED {
                tarjan.run(&self.edges, root);
            }
        }
        tarjan.groups
    }
}

struct Tarjan {
    index: Vec<usize>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    groups: Vec<Vec<usize>>,
}

impl Tarjan {
    fn new(len: usize) -> Self {
        Self {
            index: vec![UNVISITED; len],
            lowlink: vec![0; len],
            on_stack: vec![false; len],
            stack: Vec::new(),
            next_index: 0,
            groups: Vec::new(),
        }
    }

    fn open(&mut self, node: usize) {
        self.index[node] = self.next_index;
        self.lowlink[node] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
    }

    fn run(&mut self, edges: &[Vec<usize>], root: usize) {
        // (node, position of the next outgoing edge to follow)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.open(root);

        while let Some(&(node, cursor)) = frames.last() {
            if let Some(&next) = edges[node].get(cursor) {
                let top = frames.len() - 1;
                frames[top].1 += 1;
                if self.index[next] == UNVISITED {
                    self.open(next);
                    frames.push((next, 0));
                } else if self.on_stack[next] {
                    self.lowlink[node] = self.lowlink[node].min(self.index[next]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[node]);
            }

            if self.lowlink[node] == self.index[node] {
                let mut group = Vec::new();
                while let Some(member) = self.stack.pop() {
                    self.on_stack[member] = false;
                    group.push(member);
                    if member == node {
                        break;
                    }
                }
                group.sort_unstable();
                self.groups.push(group);
            }
        }
    }
}
