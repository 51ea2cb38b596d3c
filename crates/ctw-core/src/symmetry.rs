//! Mirror symmetry between the two team sides.
//!
//! Placement is only allowed on the primary (left) half; every placed node
//! gets a reflected twin on the other half. Pairs are linked one way only:
//! the second-created entity stores `mirrored_id` pointing at the first.
//! Resolving a counterpart therefore checks the forward link first and
//! falls back to a reverse scan.

use crate::id::{EntityId, EntityRef};
use crate::layout::{MapLayout, Symmetry};
use crate::model::MapGraph;
use kurbo::{Point, Rect};
use smallvec::{SmallVec, smallvec};
use std::fmt;

/// Why a node cannot be placed at a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementError {
    /// The snapped cell lies right of the axis (gap or mirrored half).
    BeyondAxis { x: f64, axis_x: f64 },
    /// The snapped cell lies outside the map canvas.
    OutsideMap { x: f64, y: f64 },
    /// The layout's symmetry has no placement rules.
    UnsupportedSymmetry(Symmetry),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::BeyondAxis { .. } => {
                f.write_str("Nodes can only be placed on the left side; the right side is mirrored")
            }
            PlacementError::OutsideMap { x, y } => {
                write!(f, "({x:.0}, {y:.0}) is outside the map")
            }
            PlacementError::UnsupportedSymmetry(s) => {
                write!(f, "{} symmetry does not support editing yet", s.name())
            }
        }
    }
}

/// A legal placement, as positions to create.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Primary cell and its reflection.
    Pair { primary: Point, mirror: Point },
    /// The cell lies on the axis and is its own reflection.
    OnAxis(Point),
}

/// Placement and reflection rules for one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    symmetry: Symmetry,
    axis_x: f64,
    bounds: Rect,
}

impl Mirror {
    pub fn new(layout: &MapLayout, grid_size: f64) -> Self {
        Self {
            symmetry: layout.symmetry,
            axis_x: layout.axis_x(grid_size),
            bounds: layout.canvas_size(grid_size).to_rect(),
        }
    }

    pub fn axis_x(&self) -> f64 {
        self.axis_x
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Reflect a world position across the axis.
    pub fn reflect(&self, p: Point) -> Point {
        Point::new(2.0 * self.axis_x - p.x, p.y)
    }

    /// Whether a position lies on the primary side (axis included).
    pub fn is_primary_side(&self, p: Point) -> bool {
        p.x <= self.axis_x
    }

    /// Check a snapped position for placement.
    pub fn place(&self, snapped: Point) -> Result<Placement, PlacementError> {
        if self.symmetry != Symmetry::Mirror {
            return Err(PlacementError::UnsupportedSymmetry(self.symmetry));
        }
        if !self.bounds.contains(snapped) {
            return Err(PlacementError::OutsideMap {
                x: snapped.x,
                y: snapped.y,
            });
        }
        if !self.is_primary_side(snapped) {
            return Err(PlacementError::BeyondAxis {
                x: snapped.x,
                axis_x: self.axis_x,
            });
        }
        let mirror = self.reflect(snapped);
        if mirror == snapped {
            Ok(Placement::OnAxis(snapped))
        } else {
            Ok(Placement::Pair {
                primary: snapped,
                mirror,
            })
        }
    }
}

// ─── Counterpart resolution ──────────────────────────────────────────────

/// The mirror counterpart of a node, if one is in the store.
pub fn node_counterpart(graph: &MapGraph, id: EntityId) -> Option<EntityId> {
    let node = graph.node(id)?;
    if let Some(forward) = node.mirrored_id.filter(|m| graph.node(*m).is_some()) {
        return Some(forward);
    }
    graph
        .nodes()
        .find(|n| n.id != id && n.mirrored_id == Some(id))
        .map(|n| n.id)
}

/// The mirror counterpart of an edge, if one is in the store.
pub fn edge_counterpart(graph: &MapGraph, id: EntityId) -> Option<EntityId> {
    let edge = graph.edge(id)?;
    if let Some(forward) = edge.mirrored_id.filter(|m| graph.edge(*m).is_some()) {
        return Some(forward);
    }
    graph
        .edges()
        .find(|e| e.id != id && e.mirrored_id == Some(id))
        .map(|e| e.id)
}

/// The counterpart of either kind of entity.
pub fn counterpart(graph: &MapGraph, target: EntityRef) -> Option<EntityRef> {
    match target {
        EntityRef::Node(id) => node_counterpart(graph, id).map(EntityRef::Node),
        EntityRef::Edge(id) => edge_counterpart(graph, id).map(EntityRef::Edge),
    }
}

/// The node an edge endpoint reflects onto: itself when it sits on the
/// axis, otherwise its counterpart.
pub fn reflected_node(graph: &MapGraph, mirror: &Mirror, id: EntityId) -> Option<EntityId> {
    let node = graph.node(id)?;
    if node.x == mirror.axis_x() {
        Some(id)
    } else {
        node_counterpart(graph, id)
    }
}

/// Endpoints for the reflection of an edge from `start` to `end`.
///
/// `None` when either endpoint has no reflection, or when the reflection
/// would connect the same two nodes as the edge itself (an edge joining a
/// node to its own twin, or two axis nodes, is self-symmetric).
pub fn mirrored_endpoints(
    graph: &MapGraph,
    mirror: &Mirror,
    start: EntityId,
    end: EntityId,
) -> Option<(EntityId, EntityId)> {
    let m_start = reflected_node(graph, mirror, start)?;
    let m_end = reflected_node(graph, mirror, end)?;
    let same_pair = (m_start == start && m_end == end) || (m_start == end && m_end == start);
    if same_pair {
        None
    } else {
        Some((m_start, m_end))
    }
}

/// Whether some edge joins `a` and `b`, in either direction.
pub fn connected(graph: &MapGraph, a: EntityId, b: EntityId) -> bool {
    graph.edges().any(|e| {
        (e.start_node_id == a && e.end_node_id == b) || (e.start_node_id == b && e.end_node_id == a)
    })
}

// ─── Cascade deletion ────────────────────────────────────────────────────

/// Everything a mirrored delete removes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSet {
    pub nodes: SmallVec<[EntityId; 2]>,
    pub edges: Vec<EntityId>,
}

impl DeletionSet {
    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains(&id) || self.edges.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Compute the cascade for deleting `target`.
///
/// Nodes: the node, its counterpart, and every edge touching either.
/// Edges: the edge and its counterpart. Edges swept up by a node deletion
/// are removed outright; their own counterparts are not chased.
pub fn deletion_set(graph: &MapGraph, target: EntityRef) -> DeletionSet {
    match target {
        EntityRef::Node(id) => {
            if graph.node(id).is_none() {
                return DeletionSet::default();
            }
            let mut nodes: SmallVec<[EntityId; 2]> = smallvec![id];
            if let Some(twin) = node_counterpart(graph, id) {
                nodes.push(twin);
            }
            let edges = graph
                .edges()
                .filter(|e| nodes.iter().any(|n| e.touches(*n)))
                .map(|e| e.id)
                .collect();
            DeletionSet { nodes, edges }
        }
        EntityRef::Edge(id) => {
            if graph.edge(id).is_none() {
                return DeletionSet::default();
            }
            let mut edges = vec![id];
            if let Some(twin) = edge_counterpart(graph, id) {
                edges.push(twin);
            }
            DeletionSet {
                nodes: SmallVec::new(),
                edges,
            }
        }
    }
}
