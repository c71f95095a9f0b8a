// Test-only helpers for `tokyometro-lib` tests
#![allow(dead_code)]

use std::collections::HashMap;

use crate::network::{Link, LineTag, Network, NodeId};

/// Builder to assemble small in-memory networks for tests without going
/// through the JSON artifacts.
pub struct NetworkBuilder {
    adjacency: HashMap<NodeId, Vec<Link>>,
    station_names: HashMap<NodeId, String>,
    line_names: HashMap<char, String>,
}

impl NetworkBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            station_names: HashMap::new(),
            line_names: HashMap::new(),
        }
    }

    /// Register a node with its station display name.
    pub fn station(mut self, code: &str, name: &str) -> Self {
        let node = parse(code);
        self.adjacency.entry(node).or_default();
        self.station_names.insert(node, name.to_string());
        self
    }

    /// Register a node without a station-table entry.
    pub fn node(mut self, code: &str) -> Self {
        self.adjacency.entry(parse(code)).or_default();
        self
    }

    /// Add an undirected link. `line` uses the artifact syntax: a line
    /// letter, "base" for transfers, or an external label such as "JR".
    pub fn link(mut self, from: &str, to: &str, weight: f64, real_distance: f64, line: &str) -> Self {
        let from = parse(from);
        let to = parse(to);
        let tag = LineTag::parse(line);
        self.push(from, to, weight, real_distance, tag.clone());
        self.push(to, from, weight, real_distance, tag);
        self
    }

    /// Name a line letter for narration lookups.
    pub fn line_name(mut self, letter: char, name: &str) -> Self {
        self.line_names.insert(letter, name.to_string());
        self
    }

    pub fn build(self) -> Network {
        Network::assemble(self.adjacency, self.station_names, self.line_names)
    }

    fn push(&mut self, from: NodeId, to: NodeId, weight: f64, real_distance: f64, line: LineTag) {
        self.adjacency.entry(to).or_default();
        self.adjacency.entry(from).or_default().push(Link {
            target: to,
            weight,
            real_distance,
            line,
        });
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(code: &str) -> NodeId {
    code.parse().expect("test node code parses")
}

/// Two lines with a transfer, the layout exercised throughout the engine
/// tests: A01-A02 on line A (weight 2), a transfer A02-B01 (weight 2), and
/// B01-B02 on line B (weight 3).
pub fn two_line_network() -> Network {
    NetworkBuilder::new()
        .station("A01", "Nishi-magome")
        .station("A02", "Magome")
        .station("B01", "Magome")
        .station("B02", "Meguro")
        .line_name('A', "Asakusa")
        .line_name('B', "Blossom")
        .link("A01", "A02", 2.0, 1.2, "A")
        .link("A02", "B01", 2.0, 0.0, "base")
        .link("B01", "B02", 3.0, 2.1, "B")
        .build()
}
