//! The mutation engine: owns the authoritative graph and the layout it is
//! edited under.
//!
//! Tools never touch the graph directly. They emit `GraphMutation`s, and
//! the engine applies them (via the history manager, so every applied
//! batch is undoable).

use ctw_core::{EntityId, MapEdge, MapGraph, MapLayout, MapNode, Mirror};

/// One atomic change to the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    AddNode(MapNode),
    AddEdge(MapEdge),
    /// Remove a node and every edge touching it.
    RemoveNode(EntityId),
    RemoveEdge(EntityId),
    /// Wipe all nodes and edges.
    Clear,
}

pub struct MapEngine {
    /// The current graph (single source of truth).
    pub graph: MapGraph,
    layout: MapLayout,
    mirror: Mirror,
    grid_size: f64,
}

impl MapEngine {
    pub fn new(layout: MapLayout, grid_size: f64) -> Self {
        Self::with_graph(MapGraph::new(), layout, grid_size)
    }

    pub fn with_graph(graph: MapGraph, layout: MapLayout, grid_size: f64) -> Self {
        let layout = layout.sanitized();
        let mirror = Mirror::new(&layout, grid_size);
        Self {
            graph,
            layout,
            mirror,
            grid_size,
        }
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Swap in a new layout. Existing entities stay where they are.
    pub fn set_layout(&mut self, layout: MapLayout) {
        self.layout = layout.sanitized();
        self.mirror = Mirror::new(&self.layout, self.grid_size);
    }

    /// Apply one mutation. Returns whether the graph changed.
    pub fn apply_mutation(&mut self, mutation: GraphMutation) -> bool {
        match mutation {
            GraphMutation::AddNode(node) => {
                let id = node.id;
                match self.graph.add_node(node) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("add node {id} skipped: {e}");
                        false
                    }
                }
            }
            GraphMutation::AddEdge(edge) => {
                let id = edge.id;
                match self.graph.add_edge(edge) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("add edge {id} skipped: {e}");
                        false
                    }
                }
            }
            GraphMutation::RemoveNode(id) => self.graph.remove_node(id).is_some(),
            GraphMutation::RemoveEdge(id) => self.graph.remove_edge(id).is_some(),
            GraphMutation::Clear => {
                let changed = !self.graph.is_empty();
                self.graph.clear();
                changed
            }
        }
    }

    /// Apply mutations in order. Returns how many changed the graph.
    pub fn apply_batch(&mut self, mutations: Vec<GraphMutation>) -> usize {
        let total = mutations.len();
        let mut applied = 0;
        for mutation in mutations {
            if self.apply_mutation(mutation) {
                applied += 1;
            }
        }
        log::debug!("applied {applied}/{total} mutations");
        applied
    }

    /// Replace the whole graph (history restore).
    pub fn restore(&mut self, graph: MapGraph) {
        self.graph = graph;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctw_core::{EdgeType, NodeType, Point, Symmetry, Team};

    fn node(id: &str, x: f64) -> MapNode {
        MapNode::new(
            EntityId::intern(id),
            Point::new(x, 25.0),
            Team::Red,
            NodeType::Default,
            id.into(),
        )
    }

    fn edge(id: &str, a: &str, b: &str) -> MapEdge {
        MapEdge {
            id: EntityId::intern(id),
            start_node_id: EntityId::intern(a),
            end_node_id: EntityId::intern(b),
            team: Team::Red,
            edge_type: EdgeType::Walkway,
            weight: 1,
            mirrored_id: None,
        }
    }

    fn engine() -> MapEngine {
        MapEngine::new(MapLayout::new("engine", 10, 10, 2, Symmetry::Mirror), 50.0)
    }

    #[test]
    fn apply_reports_change() {
        let mut e = engine();
        assert!(e.apply_mutation(GraphMutation::AddNode(node("en-a", 25.0))));
        assert!(!e.apply_mutation(GraphMutation::AddNode(node("en-a", 75.0))));
        assert!(!e.apply_mutation(GraphMutation::AddEdge(edge("en-e", "en-a", "en-zz"))));
        assert!(!e.apply_mutation(GraphMutation::RemoveEdge(EntityId::intern("en-e"))));
        assert_eq!(e.graph.node_count(), 1);
    }

    #[test]
    fn batch_counts_effective_mutations() {
        let mut e = engine();
        let applied = e.apply_batch(vec![
            GraphMutation::AddNode(node("eb-a", 25.0)),
            GraphMutation::AddNode(node("eb-b", 75.0)),
            GraphMutation::AddEdge(edge("eb-e", "eb-a", "eb-b")),
            GraphMutation::RemoveNode(EntityId::intern("eb-missing")),
        ]);
        assert_eq!(applied, 3);
        assert!(e.apply_mutation(GraphMutation::RemoveNode(EntityId::intern("eb-a"))));
        assert_eq!(e.graph.edge_count(), 0);
    }

    #[test]
    fn clear_on_empty_is_noop() {
        let mut e = engine();
        assert!(!e.apply_mutation(GraphMutation::Clear));
        e.apply_mutation(GraphMutation::AddNode(node("ec-a", 25.0)));
        assert!(e.apply_mutation(GraphMutation::Clear));
        assert!(e.graph.is_empty());
    }

    #[test]
    fn layout_is_sanitized_and_moves_axis() {
        let mut e = engine();
        assert_eq!(e.mirror().axis_x(), 550.0);
        e.set_layout(MapLayout::new("wide", 20, 10, 0, Symmetry::Mirror));
        assert_eq!(e.mirror().axis_x(), 1000.0);
        assert_eq!(e.layout().team_side_width, 20);
    }
}
