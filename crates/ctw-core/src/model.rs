//! Core data model for CTW maps.
//!
//! A map is a graph of locations (spawns, wool rooms, junctions) joined by
//! walkable paths. The [`MapGraph`] store keeps nodes and edges in a
//! `petgraph` stable graph with id indexes for O(1) lookup. Removing a node
//! drops every edge attached to it, so the store can never hold an edge with
//! a missing endpoint.

use crate::id::EntityId;
use kurbo::Point;
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Teams & Colors ──────────────────────────────────────────────────────

/// The sixteen wool colors. Teams are identified by the wool they wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

/// Wool objectives use the same sixteen colors as teams.
pub type WoolColor = Team;

impl Team {
    pub const ALL: [Team; 16] = [
        Team::White,
        Team::Orange,
        Team::Magenta,
        Team::LightBlue,
        Team::Yellow,
        Team::Lime,
        Team::Pink,
        Team::Gray,
        Team::LightGray,
        Team::Cyan,
        Team::Purple,
        Team::Blue,
        Team::Brown,
        Team::Green,
        Team::Red,
        Team::Black,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Team::White => "WHITE",
            Team::Orange => "ORANGE",
            Team::Magenta => "MAGENTA",
            Team::LightBlue => "LIGHT_BLUE",
            Team::Yellow => "YELLOW",
            Team::Lime => "LIME",
            Team::Pink => "PINK",
            Team::Gray => "GRAY",
            Team::LightGray => "LIGHT_GRAY",
            Team::Cyan => "CYAN",
            Team::Purple => "PURPLE",
            Team::Blue => "BLUE",
            Team::Brown => "BROWN",
            Team::Green => "GREEN",
            Team::Red => "RED",
            Team::Black => "BLACK",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|t| t.name() == upper)
    }

    /// Dye color of the wool, as `#RRGGBB`.
    pub fn hex(self) -> &'static str {
        match self {
            Team::White => "#F9FFFE",
            Team::Orange => "#F9801D",
            Team::Magenta => "#C74EBD",
            Team::LightBlue => "#3AB3DA",
            Team::Yellow => "#FED83D",
            Team::Lime => "#80C71F",
            Team::Pink => "#F38BAA",
            Team::Gray => "#474F52",
            Team::LightGray => "#9D9D97",
            Team::Cyan => "#169C9C",
            Team::Purple => "#8932B8",
            Team::Blue => "#3C44AA",
            Team::Brown => "#835432",
            Team::Green => "#5E7C16",
            Team::Red => "#B02E26",
            Team::Black => "#1D1D21",
        }
    }
}

/// The two teams facing each other across the axis.
///
/// `opposite` maps one side to the other; any team outside the pair is
/// treated as neutral and maps to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPair {
    pub primary: Team,
    pub secondary: Team,
}

impl Default for TeamPair {
    fn default() -> Self {
        Self {
            primary: Team::Red,
            secondary: Team::Blue,
        }
    }
}

impl TeamPair {
    pub fn opposite(&self, team: Team) -> Team {
        if team == self.primary {
            self.secondary
        } else if team == self.secondary {
            self.primary
        } else {
            team
        }
    }
}

// ─── Kinds ───────────────────────────────────────────────────────────────

/// What a node represents on the map.
///
/// Only `Spawn`, `WoolRoom` and `Default` change editing or rendering; the
/// rest are classification labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Spawn,
    WoolRoom,
    #[default]
    Default,
    WoolEntry,
    SpawnEntry,
    Hub,
    Frontline,
    Corridor,
}

impl NodeType {
    pub fn name(self) -> &'static str {
        match self {
            NodeType::Spawn => "SPAWN",
            NodeType::WoolRoom => "WOOL_ROOM",
            NodeType::Default => "DEFAULT",
            NodeType::WoolEntry => "WOOL_ENTRY",
            NodeType::SpawnEntry => "SPAWN_ENTRY",
            NodeType::Hub => "HUB",
            NodeType::Frontline => "FRONTLINE",
            NodeType::Corridor => "CORRIDOR",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "SPAWN" => Some(NodeType::Spawn),
            "WOOL_ROOM" => Some(NodeType::WoolRoom),
            "DEFAULT" => Some(NodeType::Default),
            "WOOL_ENTRY" => Some(NodeType::WoolEntry),
            "SPAWN_ENTRY" => Some(NodeType::SpawnEntry),
            "HUB" => Some(NodeType::Hub),
            "FRONTLINE" => Some(NodeType::Frontline),
            "CORRIDOR" => Some(NodeType::Corridor),
            _ => None,
        }
    }
}

/// How an edge is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    #[default]
    Walkway,
    /// Elevated or over void.
    Bridge,
}

impl EdgeType {
    pub fn name(self) -> &'static str {
        match self {
            EdgeType::Walkway => "WALKWAY",
            EdgeType::Bridge => "BRIDGE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "WALKWAY" => Some(EdgeType::Walkway),
            "BRIDGE" => Some(EdgeType::Bridge),
            _ => None,
        }
    }
}

// ─── Entities ────────────────────────────────────────────────────────────

/// A location on the map. `x`/`y` are world coordinates of a cell center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapNode {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub team: Team,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    /// Set only on the second-created node of a mirrored pair, pointing
    /// at the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirrored_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wool_color: Option<WoolColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_classified: Option<bool>,
}

impl MapNode {
    pub fn new(id: EntityId, at: Point, team: Team, node_type: NodeType, name: String) -> Self {
        Self {
            id,
            x: at.x,
            y: at.y,
            team,
            node_type,
            name,
            mirrored_id: None,
            wool_color: None,
            is_classified: Some(false),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A path between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEdge {
    pub id: EntityId,
    pub start_node_id: EntityId,
    pub end_node_id: EntityId,
    pub team: Team,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Length in grid cells, fixed at creation.
    pub weight: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirrored_id: Option<EntityId>,
}

impl MapEdge {
    pub fn touches(&self, node: EntityId) -> bool {
        self.start_node_id == node || self.end_node_id == node
    }
}

// ─── Graph Store ─────────────────────────────────────────────────────────

/// The node/edge store.
///
/// Fields are private so the id indexes stay in step with the graph; all
/// mutation goes through the methods below.
#[derive(Debug, Clone, Default)]
pub struct MapGraph {
    graph: StableDiGraph<MapNode, MapEdge>,
    node_index: HashMap<EntityId, NodeIndex>,
    edge_index: HashMap<EntityId, EdgeIndex>,
}

impl MapGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_index.is_empty() && self.edge_index.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: EntityId) -> Option<&MapNode> {
        self.node_index.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EntityId) -> Option<&MapEdge> {
        self.edge_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.node_index.contains_key(&id) || self.edge_index.contains_key(&id)
    }

    /// All nodes, in store index order.
    pub fn nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All edges, in store index order.
    pub fn edges(&self) -> impl Iterator<Item = &MapEdge> {
        self.graph.edge_indices().map(move |idx| &self.graph[idx])
    }

    /// The node sitting exactly at `p`, if any.
    pub fn node_at(&self, p: Point) -> Option<&MapNode> {
        self.nodes().find(|n| n.x == p.x && n.y == p.y)
    }

    /// Edges with `node` as either endpoint.
    pub fn incident_edges(&self, node: EntityId) -> Vec<&MapEdge> {
        let Some(&idx) = self.node_index.get(&node) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.weight())
            .collect()
    }

    /// Both endpoint nodes of an edge.
    pub fn endpoints(&self, edge: &MapEdge) -> Option<(&MapNode, &MapNode)> {
        Some((self.node(edge.start_node_id)?, self.node(edge.end_node_id)?))
    }

    /// Euclidean length of an edge in world units.
    pub fn edge_length(&self, id: EntityId) -> Option<f64> {
        let edge = self.edge(id)?;
        let (a, b) = self.endpoints(edge)?;
        Some(a.position().distance(b.position()))
    }

    /// Insert a node. Fails if the id is already used by a node or an edge.
    pub fn add_node(&mut self, node: MapNode) -> Result<(), String> {
        if self.contains(node.id) {
            return Err(format!("duplicate id `{}`", node.id));
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        Ok(())
    }

    /// Insert an edge. Both endpoints must already be in the store.
    pub fn add_edge(&mut self, edge: MapEdge) -> Result<(), String> {
        if self.contains(edge.id) {
            return Err(format!("duplicate id `{}`", edge.id));
        }
        let Some(&from) = self.node_index.get(&edge.start_node_id) else {
            return Err(format!("edge `{}`: unknown start node `{}`", edge.id, edge.start_node_id));
        };
        let Some(&to) = self.node_index.get(&edge.end_node_id) else {
            return Err(format!("edge `{}`: unknown end node `{}`", edge.id, edge.end_node_id));
        };
        let id = edge.id;
        let idx = self.graph.add_edge(from, to, edge);
        self.edge_index.insert(id, idx);
        Ok(())
    }

    /// Remove a node and every edge attached to it.
    /// Returns the node and the edges that went with it.
    pub fn remove_node(&mut self, id: EntityId) -> Option<(MapNode, Vec<MapEdge>)> {
        let idx = self.node_index.remove(&id)?;
        let attached: Vec<EdgeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        let mut dropped = Vec::with_capacity(attached.len());
        for edge_idx in attached {
            // Self-loops show up in both directions; the second removal is a no-op.
            if let Some(edge) = self.graph.remove_edge(edge_idx) {
                self.edge_index.remove(&edge.id);
                dropped.push(edge);
            }
        }
        let node = self.graph.remove_node(idx)?;
        Some((node, dropped))
    }

    /// Remove a single edge.
    pub fn remove_edge(&mut self, id: EntityId) -> Option<MapEdge> {
        let idx = self.edge_index.remove(&id)?;
        self.graph.remove_edge(idx)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_index.clear();
        self.edge_index.clear();
    }
}

/// Two stores are equal when they hold the same entities, regardless of
/// internal index layout.
impl PartialEq for MapGraph {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.edge_count() == other.edge_count()
            && self.nodes().all(|n| other.node(n.id) == Some(n))
            && self.edges().all(|e| other.edge(e.id) == Some(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, x: f64, y: f64) -> MapNode {
        MapNode::new(
            EntityId::intern(id),
            Point::new(x, y),
            Team::Red,
            NodeType::Default,
            id.to_string(),
        )
    }

    fn edge(id: &str, from: &str, to: &str) -> MapEdge {
        MapEdge {
            id: EntityId::intern(id),
            start_node_id: EntityId::intern(from),
            end_node_id: EntityId::intern(to),
            team: Team::Red,
            edge_type: EdgeType::Walkway,
            weight: 1,
            mirrored_id: None,
        }
    }

    #[test]
    fn store_basics() {
        let mut g = MapGraph::new();
        g.add_node(node("m-a", 25.0, 25.0)).unwrap();
        g.add_node(node("m-b", 75.0, 25.0)).unwrap();
        g.add_edge(edge("m-ab", "m-a", "m-b")).unwrap();

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node_at(Point::new(75.0, 25.0)).map(|n| n.id), Some(EntityId::intern("m-b")));
        assert_eq!(g.edge_length(EntityId::intern("m-ab")), Some(50.0));
        assert_eq!(g.incident_edges(EntityId::intern("m-b")).len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut g = MapGraph::new();
        g.add_node(node("d-a", 25.0, 25.0)).unwrap();
        assert!(g.add_node(node("d-a", 75.0, 25.0)).is_err());
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn edge_requires_both_endpoints() {
        let mut g = MapGraph::new();
        g.add_node(node("e-a", 25.0, 25.0)).unwrap();
        assert!(g.add_edge(edge("e-ax", "e-a", "e-missing")).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn removing_node_drops_attached_edges() {
        let mut g = MapGraph::new();
        g.add_node(node("r-a", 25.0, 25.0)).unwrap();
        g.add_node(node("r-b", 75.0, 25.0)).unwrap();
        g.add_node(node("r-c", 125.0, 25.0)).unwrap();
        g.add_edge(edge("r-ab", "r-a", "r-b")).unwrap();
        g.add_edge(edge("r-cb", "r-c", "r-b")).unwrap();
        g.add_edge(edge("r-ac", "r-a", "r-c")).unwrap();

        let (removed, dropped) = g.remove_node(EntityId::intern("r-b")).unwrap();
        assert_eq!(removed.id, EntityId::intern("r-b"));
        assert_eq!(dropped.len(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.edge(EntityId::intern("r-ab")).is_none());
        assert!(g.edge(EntityId::intern("r-ac")).is_some());
    }

    #[test]
    fn equality_ignores_index_layout() {
        let mut a = MapGraph::new();
        a.add_node(node("q-a", 25.0, 25.0)).unwrap();
        a.add_node(node("q-b", 75.0, 25.0)).unwrap();

        let mut b = MapGraph::new();
        b.add_node(node("q-b", 75.0, 25.0)).unwrap();
        b.add_node(node("q-a", 25.0, 25.0)).unwrap();
        assert_eq!(a, b);

        b.remove_node(EntityId::intern("q-a"));
        assert_ne!(a, b);
    }

    #[test]
    fn team_pair_opposites() {
        let pair = TeamPair::default();
        assert_eq!(pair.opposite(Team::Red), Team::Blue);
        assert_eq!(pair.opposite(Team::Blue), Team::Red);
        assert_eq!(pair.opposite(Team::White), Team::White);
    }

    #[test]
    fn team_names_roundtrip() {
        for team in Team::ALL {
            assert_eq!(Team::from_name(team.name()), Some(team));
            assert!(team.hex().starts_with('#'));
        }
        assert_eq!(Team::from_name("light_blue"), Some(Team::LightBlue));
    }
}
