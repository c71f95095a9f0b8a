use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Line names shipped with the original dataset, keyed by line letter. Used
/// when no line table artifact is supplied.
static DEFAULT_LINE_NAMES: Lazy<HashMap<char, String>> = Lazy::new(|| {
    [
        ('A', "Asakusa"),
        ('I', "Mita"),
        ('S', "Shinjuku"),
        ('E', "Oedo"),
        ('G', "Ginza"),
        ('M', "Marunouchi"),
        ('H', "Hibiya"),
        ('T', "Tozai"),
        ('C', "Chiyoda"),
        ('Y', "Yurakucho"),
        ('Z', "Hanzomon"),
        ('N', "Namboku"),
        ('F', "Fukutoshin"),
    ]
    .into_iter()
    .map(|(letter, name)| (letter, name.to_string()))
    .collect()
});

/// Identifier for a station instance bound to one transit line.
///
/// Rendered as a short code such as `A05`: the line letter followed by the
/// sequence index along that line. Ordering is line letter first, then
/// index, which gives the deterministic "lowest node code" tie-break used
/// when picking one representative node per station.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    line: u8,
    index: u8,
}

impl NodeId {
    pub fn new(line: char, index: u8) -> Self {
        debug_assert!(line.is_ascii_uppercase());
        Self {
            line: line as u8,
            index,
        }
    }

    /// Line letter this node belongs to.
    pub fn line(&self) -> char {
        self.line as char
    }

    /// Sequence index along the line.
    pub fn index(&self) -> u8 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.line(), self.index)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        let malformed = || Error::MalformedNodeCode {
            code: code.to_string(),
        };

        let mut chars = code.chars();
        let letter = chars.next().ok_or_else(malformed)?;
        if !letter.is_ascii_uppercase() {
            return Err(malformed());
        }

        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let index: u8 = digits.parse().map_err(|_| malformed())?;

        Ok(Self::new(letter, index))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// Line attribute carried by each link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTag {
    /// Regular segment along a metro line.
    Metro(char),
    /// Link operated outside the metro network (JR, Rinkai, bus, Seibu).
    External(String),
    /// Neutral marker on same-station transfer links.
    Transfer,
}

impl LineTag {
    /// Parse the artifact's line attribute. Legacy artifacts mark transfer
    /// links with the literal "0.5".
    pub fn parse(raw: &str) -> Self {
        match raw {
            "base" | "0.5" => LineTag::Transfer,
            s if s.len() == 1 && s.as_bytes()[0].is_ascii_uppercase() => {
                LineTag::Metro(s.as_bytes()[0] as char)
            }
            s => LineTag::External(s.to_string()),
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, LineTag::Transfer)
    }
}

/// Link within the transit network.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub target: NodeId,
    /// Algorithmic travel cost in minutes-equivalent. Inflated on transfer
    /// links to discourage unnecessary line changes.
    pub weight: f64,
    /// Physical distance in kilometres, independent of `weight`.
    pub real_distance: f64,
    pub line: LineTag,
}

/// In-memory transit network: adjacency plus name lookup tables.
///
/// Immutable once loaded; any custom-connection patching happens inside
/// [`load_network`] before the network is handed out.
#[derive(Debug, Clone, Default)]
pub struct Network {
    adjacency: HashMap<NodeId, Vec<Link>>,
    station_names: HashMap<NodeId, String>,
    name_to_node: HashMap<String, NodeId>,
    line_names: HashMap<char, String>,
}

impl Network {
    pub(crate) fn assemble(
        adjacency: HashMap<NodeId, Vec<Link>>,
        station_names: HashMap<NodeId, String>,
        line_names: HashMap<char, String>,
    ) -> Self {
        // Reverse name lookup is ambiguous when a station spans several
        // lines; keep the lowest node code per name.
        let mut name_to_node: HashMap<String, NodeId> = HashMap::new();
        for &node in adjacency.keys() {
            let name = station_names
                .get(&node)
                .cloned()
                .unwrap_or_else(|| node.to_string());
            name_to_node
                .entry(name)
                .and_modify(|existing| {
                    if node < *existing {
                        *existing = node;
                    }
                })
                .or_insert(node);
        }

        Self {
            adjacency,
            station_names,
            name_to_node,
            line_names,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected links (each stored in both directions).
    pub fn link_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Return the links leaving a given node.
    pub fn neighbours(&self, node: NodeId) -> &[Link] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up the link between two adjacent nodes.
    pub fn link(&self, from: NodeId, to: NodeId) -> Result<&Link> {
        self.neighbours(from)
            .iter()
            .find(|link| link.target == to)
            .ok_or_else(|| Error::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Display name of the station a node belongs to. Nodes missing from the
    /// station table fall back to their own code.
    pub fn station_name(&self, node: NodeId) -> Option<&str> {
        self.station_names.get(&node).map(String::as_str)
    }

    pub fn station_display_name(&self, node: NodeId) -> String {
        self.station_name(node)
            .map(str::to_string)
            .unwrap_or_else(|| node.to_string())
    }

    /// Display name of a line letter.
    pub fn line_name(&self, letter: char) -> Option<&str> {
        self.line_names.get(&letter).map(String::as_str)
    }

    pub fn line_display_name(&self, letter: char) -> String {
        self.line_name(letter)
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Representative node for a station display name.
    pub fn node_by_station(&self, name: &str) -> Option<NodeId> {
        self.name_to_node.get(name).copied()
    }

    /// All known station display names, unordered.
    pub fn station_list(&self) -> impl Iterator<Item = &str> {
        self.name_to_node.keys().map(String::as_str)
    }

    /// One representative node per distinct station name (the lowest node
    /// code), sorted by code for stable iteration.
    pub fn representatives(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.name_to_node.values().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Closest station names to a query, used for "did you mean" hints.
    pub fn fuzzy_station_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let query = name.to_lowercase();
        let mut scored: Vec<(f64, &String)> = self
            .name_to_node
            .keys()
            .filter_map(|candidate| {
                let score = strsim::jaro_winkler(&query, &candidate.to_lowercase());
                (score >= 0.75).then_some((score, candidate))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

/// On-disk network artifact produced by the external graph-construction step.
#[derive(Debug, Deserialize)]
struct NetworkArtifact {
    nodes: Vec<NodeId>,
    links: Vec<LinkRecord>,
    /// Custom connections patched in at load time (JR junctions, bus links).
    #[serde(default)]
    extra_links: Vec<LinkRecord>,
}

#[derive(Debug, Deserialize)]
struct LinkRecord {
    from: NodeId,
    to: NodeId,
    weight: f64,
    real_distance: f64,
    line: String,
}

/// Load the network from its three JSON artifacts: the graph itself, the
/// node-code to station-name table, and (optionally) the line-letter to
/// line-name table. Without a line table the built-in Tokyo Metro/Toei
/// table is used.
pub fn load_network(
    network_path: &Path,
    stations_path: &Path,
    lines_path: Option<&Path>,
) -> Result<Network> {
    let network_json = fs::read_to_string(network_path)?;
    let stations_json = fs::read_to_string(stations_path)?;
    let lines_json = match lines_path {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };
    parse_network(&network_json, &stations_json, lines_json.as_deref())
}

/// Parse the network from in-memory JSON artifacts. See [`load_network`].
pub fn parse_network(
    network_json: &str,
    stations_json: &str,
    lines_json: Option<&str>,
) -> Result<Network> {
    let artifact: NetworkArtifact = serde_json::from_str(network_json)?;
    let station_names: HashMap<NodeId, String> = serde_json::from_str(stations_json)?;
    let line_names: HashMap<char, String> = match lines_json {
        Some(json) => serde_json::from_str(json)?,
        None => DEFAULT_LINE_NAMES.clone(),
    };

    if artifact.nodes.is_empty() || (artifact.links.is_empty() && artifact.extra_links.is_empty())
    {
        return Err(Error::EmptyNetwork);
    }

    let mut adjacency: HashMap<NodeId, Vec<Link>> = HashMap::new();
    for node in &artifact.nodes {
        adjacency.entry(*node).or_default();
    }

    for record in artifact.links.iter().chain(&artifact.extra_links) {
        if !adjacency.contains_key(&record.from) || !adjacency.contains_key(&record.to) {
            warn!(
                from = %record.from,
                to = %record.to,
                "skipping link with unknown endpoint"
            );
            continue;
        }
        if record.weight < 0.0 {
            return Err(Error::InvalidLink {
                from: record.from.to_string(),
                to: record.to.to_string(),
                message: format!("negative weight {}", record.weight),
            });
        }

        let tag = LineTag::parse(&record.line);
        insert_link(&mut adjacency, record.from, record.to, record, tag.clone());
        insert_link(&mut adjacency, record.to, record.from, record, tag);
    }

    let network = Network::assemble(adjacency, station_names, line_names);
    debug!(
        nodes = network.node_count(),
        links = network.link_count(),
        "loaded transit network"
    );
    Ok(network)
}

fn insert_link(
    adjacency: &mut HashMap<NodeId, Vec<Link>>,
    from: NodeId,
    to: NodeId,
    record: &LinkRecord,
    tag: LineTag,
) {
    let link = Link {
        target: to,
        weight: record.weight,
        real_distance: record.real_distance,
        line: tag,
    };
    let entry = adjacency.entry(from).or_default();
    // A repeated pair replaces the earlier link, matching the source data
    // where later definitions win.
    match entry.iter_mut().find(|existing| existing.target == to) {
        Some(existing) => *existing = link,
        None => entry.push(link),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::NetworkBuilder;

    #[test]
    fn node_id_round_trips_through_code() {
        let node: NodeId = "A05".parse().expect("valid code");
        assert_eq!(node.line(), 'A');
        assert_eq!(node.index(), 5);
        assert_eq!(node.to_string(), "A05");
    }

    #[test]
    fn node_id_accepts_single_digit_codes() {
        let node: NodeId = "G1".parse().expect("valid code");
        assert_eq!(node.to_string(), "G01");
    }

    #[test]
    fn node_id_rejects_malformed_codes() {
        for code in ["", "a05", "05", "A", "Axx", "A1234"] {
            assert!(
                code.parse::<NodeId>().is_err(),
                "code {code:?} should not parse"
            );
        }
    }

    #[test]
    fn node_id_orders_by_line_then_index() {
        let a2 = NodeId::new('A', 2);
        let a10 = NodeId::new('A', 10);
        let b1 = NodeId::new('B', 1);
        assert!(a2 < a10);
        assert!(a10 < b1);
    }

    #[test]
    fn line_tag_parses_metro_external_and_transfer() {
        assert_eq!(LineTag::parse("G"), LineTag::Metro('G'));
        assert_eq!(LineTag::parse("JR"), LineTag::External("JR".to_string()));
        assert_eq!(LineTag::parse("base"), LineTag::Transfer);
        assert_eq!(LineTag::parse("0.5"), LineTag::Transfer);
    }

    #[test]
    fn parse_network_builds_undirected_adjacency() {
        let network = parse_network(
            r#"{
                "nodes": ["A01", "A02"],
                "links": [
                    {"from": "A01", "to": "A02", "weight": 2.0, "real_distance": 1.2, "line": "A"}
                ]
            }"#,
            r#"{"A01": "Start", "A02": "End"}"#,
            None,
        )
        .expect("network parses");

        let a1 = NodeId::new('A', 1);
        let a2 = NodeId::new('A', 2);
        assert_eq!(network.node_count(), 2);
        assert_eq!(network.link_count(), 1);

        let forward = network.link(a1, a2).expect("forward link");
        let backward = network.link(a2, a1).expect("backward link");
        assert_eq!(forward.weight, backward.weight);
        assert_eq!(forward.real_distance, backward.real_distance);
        assert_eq!(forward.line, backward.line);
    }

    #[test]
    fn parse_network_applies_extra_links() {
        let network = parse_network(
            r#"{
                "nodes": ["T01", "M01"],
                "links": [
                    {"from": "T01", "to": "M01", "weight": 2.0, "real_distance": 0.0, "line": "base"}
                ],
                "extra_links": [
                    {"from": "T01", "to": "M01", "weight": 8.5, "real_distance": 4.5, "line": "JR"}
                ]
            }"#,
            r#"{}"#,
            None,
        )
        .expect("network parses");

        // The patched connection replaces the base link.
        let link = network
            .link(NodeId::new('T', 1), NodeId::new('M', 1))
            .expect("link exists");
        assert_eq!(link.weight, 8.5);
        assert_eq!(link.line, LineTag::External("JR".to_string()));
    }

    #[test]
    fn parse_network_skips_links_with_unknown_endpoints() {
        let network = parse_network(
            r#"{
                "nodes": ["A01", "A02"],
                "links": [
                    {"from": "A01", "to": "A02", "weight": 2.0, "real_distance": 1.0, "line": "A"},
                    {"from": "A01", "to": "Z99", "weight": 1.0, "real_distance": 1.0, "line": "A"}
                ]
            }"#,
            r#"{}"#,
            None,
        )
        .expect("network parses");
        assert_eq!(network.link_count(), 1);
    }

    #[test]
    fn parse_network_rejects_negative_weights() {
        let err = parse_network(
            r#"{
                "nodes": ["A01", "A02"],
                "links": [
                    {"from": "A01", "to": "A02", "weight": -1.0, "real_distance": 1.0, "line": "A"}
                ]
            }"#,
            r#"{}"#,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidLink { .. }));
    }

    #[test]
    fn parse_network_rejects_empty_artifacts() {
        let err = parse_network(r#"{"nodes": [], "links": []}"#, r#"{}"#, None).unwrap_err();
        assert!(matches!(err, Error::EmptyNetwork));
    }

    #[test]
    fn default_line_table_used_when_no_lines_artifact() {
        let network = parse_network(
            r#"{
                "nodes": ["G01", "G02"],
                "links": [
                    {"from": "G01", "to": "G02", "weight": 2.0, "real_distance": 1.0, "line": "G"}
                ]
            }"#,
            r#"{}"#,
            None,
        )
        .expect("network parses");
        assert_eq!(network.line_name('G'), Some("Ginza"));
    }

    #[test]
    fn representative_node_is_lowest_code() {
        // Mita station appears on both the A and I lines; 'A' sorts first.
        let network = NetworkBuilder::new()
            .station("I06", "Mita")
            .station("A08", "Mita")
            .station("A09", "Daimon")
            .link("A08", "A09", 2.0, 1.0, "A")
            .link("A08", "I06", 2.0, 0.0, "base")
            .build();

        assert_eq!(network.node_by_station("Mita"), Some(NodeId::new('A', 8)));
        assert_eq!(
            network.representatives(),
            vec![NodeId::new('A', 8), NodeId::new('A', 9)]
        );
    }

    #[test]
    fn fuzzy_matches_suggest_close_names() {
        let network = NetworkBuilder::new()
            .station("G01", "Shibuya")
            .station("G02", "Omotesando")
            .link("G01", "G02", 2.0, 1.3, "G")
            .build();

        let matches = network.fuzzy_station_matches("Shibya", 3);
        assert_eq!(matches, vec!["Shibuya".to_string()]);
    }

    #[test]
    fn missing_link_reports_edge_not_found() {
        let network = NetworkBuilder::new()
            .station("G01", "Shibuya")
            .station("G03", "Gaiemmae")
            .link("G01", "G03", 2.0, 1.0, "G")
            .build();

        let err = network
            .link(NodeId::new('G', 1), NodeId::new('Z', 9))
            .unwrap_err();
        assert!(matches!(err, Error::EdgeNotFound { .. }));
    }
}
