//! Hit testing: world point → node or edge.
//!
//! Nodes are painted above edges, so nodes are tested first. Within each
//! kind the last painted entity wins.

use crate::marker::Marker;
use ctw_core::{EntityRef, MapGraph};
use kurbo::Point;

/// Stroke width edges are painted with, in world units.
pub const EDGE_STROKE_WIDTH: f64 = 2.0;

/// Find the topmost entity at world position `p`.
///
/// `slop` widens every target (world units), so thin edges stay clickable
/// when zoomed out. Returns `None` on empty canvas.
pub fn hit_test(graph: &MapGraph, p: Point, slop: f64) -> Option<EntityRef> {
    hit_test_node(graph, p, slop).or_else(|| hit_test_edge(graph, p, slop))
}

fn hit_test_node(graph: &MapGraph, p: Point, slop: f64) -> Option<EntityRef> {
    let nodes: Vec<_> = graph.nodes().collect();
    nodes
        .into_iter()
        .rev()
        .find(|n| Marker::for_type(n.node_type).contains(n.position(), p, slop))
        .map(|n| {
            log::trace!("HIT node {}", n.id);
            EntityRef::Node(n.id)
        })
}

fn hit_test_edge(graph: &MapGraph, p: Point, slop: f64) -> Option<EntityRef> {
    let reach = EDGE_STROKE_WIDTH / 2.0 + slop;
    let edges: Vec<_> = graph.edges().collect();
    edges
        .into_iter()
        .rev()
        .find(|e| {
            graph
                .endpoints(e)
                .is_some_and(|(a, b)| distance_to_segment(p, a.position(), b.position()) <= reach)
        })
        .map(|e| {
            log::trace!("HIT edge {}", e.id);
            EntityRef::Edge(e.id)
        })
}

/// Shortest distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ctw_core::{EdgeType, EntityId, MapEdge, MapNode, NodeType, Team};

    fn sample() -> MapGraph {
        let mut g = MapGraph::new();
        for (id, x, kind) in [
            ("ht-a", 25.0, NodeType::Spawn),
            ("ht-b", 225.0, NodeType::Default),
        ] {
            g.add_node(MapNode::new(
                EntityId::intern(id),
                Point::new(x, 25.0),
                Team::Red,
                kind,
                id.into(),
            ))
            .unwrap();
        }
        g.add_edge(MapEdge {
            id: EntityId::intern("ht-ab"),
            start_node_id: EntityId::intern("ht-a"),
            end_node_id: EntityId::intern("ht-b"),
            team: Team::Red,
            edge_type: EdgeType::Walkway,
            weight: 4,
            mirrored_id: None,
        })
        .unwrap();
        g
    }

    #[test]
    fn node_wins_over_edge_underneath() {
        let g = sample();
        assert_eq!(
            hit_test(&g, Point::new(30.0, 25.0), 0.0),
            Some(EntityRef::Node(EntityId::intern("ht-a")))
        );
    }

    #[test]
    fn edge_hit_along_segment() {
        let g = sample();
        assert_eq!(
            hit_test(&g, Point::new(125.0, 26.0), 0.0),
            Some(EntityRef::Edge(EntityId::intern("ht-ab")))
        );
        assert_eq!(hit_test(&g, Point::new(125.0, 30.0), 0.0), None);
        assert_eq!(
            hit_test(&g, Point::new(125.0, 30.0), 5.0),
            Some(EntityRef::Edge(EntityId::intern("ht-ab")))
        );
    }

    #[test]
    fn empty_canvas_misses() {
        let g = sample();
        assert_eq!(hit_test(&g, Point::new(400.0, 400.0), 3.0), None);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(14.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(3.0, 4.0), a, a), 5.0);
    }
}
