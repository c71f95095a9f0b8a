use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{Error, Result};
use crate::network::{Network, NodeId};

/// Shortest path between two nodes: the total `weight` cost and the node
/// sequence, start first.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFound {
    pub cost: f64,
    pub nodes: Vec<NodeId>,
}

impl PathFound {
    /// Number of links traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Run Dijkstra's algorithm between `start` and `goal` over link weights.
///
/// The frontier is a true minimum-priority heap: the unvisited node with the
/// smallest known distance is always expanded next, so a node's distance is
/// final once it is popped. The search stops as soon as `goal` is finalized.
pub fn shortest_path(network: &Network, start: NodeId, goal: NodeId) -> Result<PathFound> {
    for node in [start, goal] {
        if !network.contains(node) {
            return Err(Error::UnknownNode {
                code: node.to_string(),
            });
        }
    }

    if start == goal {
        return Ok(PathFound {
            cost: 0.0,
            nodes: vec![start],
        });
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::new();

    distances.insert(start, 0.0);
    frontier.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = frontier.pop() {
        if !visited.insert(entry.node) {
            continue;
        }

        if entry.node == goal {
            return Ok(PathFound {
                cost: entry.cost.0,
                nodes: reconstruct_path(&parents, start, goal),
            });
        }

        relax_neighbours(network, entry, &visited, &mut distances, &mut parents, &mut frontier);
    }

    Err(Error::NoPathFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })
}

/// Full single-source shortest path expansion from `start`, used by the tour
/// planner to derive its all-pairs distance matrix.
pub fn shortest_path_tree(network: &Network, start: NodeId) -> Result<PathTree> {
    if !network.contains(start) {
        return Err(Error::UnknownNode {
            code: start.to_string(),
        });
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::new();

    distances.insert(start, 0.0);
    frontier.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = frontier.pop() {
        if !visited.insert(entry.node) {
            continue;
        }
        relax_neighbours(network, entry, &visited, &mut distances, &mut parents, &mut frontier);
    }

    Ok(PathTree {
        start,
        distances,
        parents,
    })
}

fn relax_neighbours(
    network: &Network,
    entry: QueueEntry,
    visited: &HashSet<NodeId>,
    distances: &mut HashMap<NodeId, f64>,
    parents: &mut HashMap<NodeId, NodeId>,
    frontier: &mut BinaryHeap<QueueEntry>,
) {
    for link in network.neighbours(entry.node) {
        let next = link.target;
        if visited.contains(&next) {
            continue;
        }

        let next_cost = entry.cost.0 + link.weight;
        if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
            distances.insert(next, next_cost);
            parents.insert(next, entry.node);
            frontier.push(QueueEntry::new(next, next_cost));
        }
    }
}

/// Predecessor tree produced by [`shortest_path_tree`].
#[derive(Debug, Clone)]
pub struct PathTree {
    start: NodeId,
    distances: HashMap<NodeId, f64>,
    parents: HashMap<NodeId, NodeId>,
}

impl PathTree {
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Final distance to a node, `None` when unreachable.
    pub fn distance_to(&self, node: NodeId) -> Option<f64> {
        self.distances.get(&node).copied()
    }

    /// Path from the tree root to `node`, `None` when unreachable.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        if !self.distances.contains_key(&node) {
            return None;
        }
        Some(reconstruct_path(&self.parents, self.start, node))
    }
}

fn reconstruct_path(parents: &HashMap<NodeId, NodeId>, start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            // Callers only reconstruct finalized nodes; a missing parent
            // would mean the search never reached this node.
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
