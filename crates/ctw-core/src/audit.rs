//! Audit diagnostics for CTW maps.
//!
//! Reports structural issues without modifying the map. Results feed the
//! inspector panel's warnings list.

use crate::grid::is_cell_center;
use crate::id::{EntityId, EntityRef};
use crate::layout::MapLayout;
use crate::model::MapGraph;
use crate::symmetry::{Mirror, connected, mirrored_endpoints, node_counterpart};

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditSeverity {
    /// Likely a mistake.
    Warning,
    /// Worth a look.
    Info,
}

/// A single audit diagnostic for a node or an edge.
#[derive(Debug, Clone)]
pub struct AuditDiagnostic {
    pub target: EntityRef,
    pub message: String,
    pub severity: AuditSeverity,
    /// Short rule identifier (e.g. "off-grid", "unpaired").
    pub rule: &'static str,
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run all audit rules over the map.
#[must_use]
pub fn audit_map(graph: &MapGraph, layout: &MapLayout, grid_size: f64) -> Vec<AuditDiagnostic> {
    let mirror = Mirror::new(layout, grid_size);
    let mut diags = Vec::new();
    audit_off_grid(graph, grid_size, &mut diags);
    audit_outside_map(graph, layout, grid_size, &mut diags);
    audit_pairs(graph, &mirror, &mut diags);
    audit_edge_pairs(graph, &mirror, &mut diags);
    audit_isolated(graph, &mut diags);
    diags
}

// ─── Rules ───────────────────────────────────────────────────────────────

fn audit_off_grid(graph: &MapGraph, grid_size: f64, diags: &mut Vec<AuditDiagnostic>) {
    for node in graph.nodes() {
        if !is_cell_center(node.position(), grid_size) {
            diags.push(AuditDiagnostic {
                target: EntityRef::Node(node.id),
                message: format!(
                    "`{}` at ({}, {}) is not on a grid cell center.",
                    node.name, node.x, node.y
                ),
                severity: AuditSeverity::Warning,
                rule: "off-grid",
            });
        }
    }
}

fn audit_outside_map(
    graph: &MapGraph,
    layout: &MapLayout,
    grid_size: f64,
    diags: &mut Vec<AuditDiagnostic>,
) {
    let bounds = layout.canvas_size(grid_size).to_rect();
    for node in graph.nodes() {
        if !bounds.contains(node.position()) {
            diags.push(AuditDiagnostic {
                target: EntityRef::Node(node.id),
                message: format!("`{}` lies outside the map after a layout change.", node.name),
                severity: AuditSeverity::Warning,
                rule: "outside-map",
            });
        }
    }
}

/// Nodes off the axis need a twin, and the twin must sit at the reflection.
fn audit_pairs(graph: &MapGraph, mirror: &Mirror, diags: &mut Vec<AuditDiagnostic>) {
    for node in graph.nodes() {
        let on_axis = node.x == mirror.axis_x();
        match node_counterpart(graph, node.id).and_then(|id| graph.node(id)) {
            None if !on_axis => diags.push(AuditDiagnostic {
                target: EntityRef::Node(node.id),
                message: format!("`{}` has no mirrored counterpart.", node.name),
                severity: AuditSeverity::Warning,
                rule: "unpaired",
            }),
            Some(twin) if mirror.reflect(node.position()) != twin.position() => {
                diags.push(AuditDiagnostic {
                    target: EntityRef::Node(node.id),
                    message: format!(
                        "`{}` and its counterpart `{}` are not reflections of each other.",
                        node.name, twin.name
                    ),
                    severity: AuditSeverity::Warning,
                    rule: "asymmetric-pair",
                });
            }
            _ => {}
        }
    }
}

/// Every edge whose endpoints reflect onto a different pair of nodes needs
/// an edge joining that pair.
fn audit_edge_pairs(graph: &MapGraph, mirror: &Mirror, diags: &mut Vec<AuditDiagnostic>) {
    for edge in graph.edges() {
        let Some((a, b)) = mirrored_endpoints(graph, mirror, edge.start_node_id, edge.end_node_id)
        else {
            continue;
        };
        if !connected(graph, a, b) {
            diags.push(AuditDiagnostic {
                target: EntityRef::Edge(edge.id),
                message: format!("edge `{}` has no mirrored counterpart.", edge.id),
                severity: AuditSeverity::Warning,
                rule: "unmirrored-edge",
            });
        }
    }
}

fn audit_isolated(graph: &MapGraph, diags: &mut Vec<AuditDiagnostic>) {
    for node in graph.nodes() {
        if graph.incident_edges(node.id).is_empty() {
            diags.push(AuditDiagnostic {
                target: EntityRef::Node(node.id),
                message: format!("`{}` is not connected to anything.", node.name),
                severity: AuditSeverity::Info,
                rule: "isolated",
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Symmetry;
    use crate::model::{EdgeType, MapEdge, MapNode, NodeType, Team};
    use kurbo::Point;

    fn node(id: &str, x: f64, y: f64) -> MapNode {
        MapNode::new(
            EntityId::intern(id),
            Point::new(x, y),
            Team::Red,
            NodeType::Default,
            id.into(),
        )
    }

    fn edge(id: &str, from: &str, to: &str) -> MapEdge {
        MapEdge {
            id: EntityId::intern(id),
            start_node_id: EntityId::intern(from),
            end_node_id: EntityId::intern(to),
            team: Team::Red,
            edge_type: EdgeType::Walkway,
            weight: 4,
            mirrored_id: None,
        }
    }

    fn rules_for(diags: &[AuditDiagnostic], id: &str) -> Vec<&'static str> {
        diags
            .iter()
            .filter(|d| d.target.id() == EntityId::intern(id))
            .map(|d| d.rule)
            .collect()
    }

    #[test]
    fn clean_pair_only_reports_isolation() {
        let layout = MapLayout::new("arena", 10, 10, 2, Symmetry::Mirror);
        let mut g = MapGraph::new();
        g.add_node(node("au-a", 125.0, 75.0)).unwrap();
        let mut twin = node("au-a2", 975.0, 75.0);
        twin.mirrored_id = Some(EntityId::intern("au-a"));
        g.add_node(twin).unwrap();

        let diags = audit_map(&g, &layout, 50.0);
        assert_eq!(rules_for(&diags, "au-a"), vec!["isolated"]);
        assert_eq!(rules_for(&diags, "au-a2"), vec!["isolated"]);
    }

    #[test]
    fn flags_unpaired_off_grid_and_outside() {
        let layout = MapLayout::new("arena", 10, 10, 2, Symmetry::Mirror);
        let mut g = MapGraph::new();
        g.add_node(node("au-lone", 130.0, 75.0)).unwrap();
        g.add_node(node("au-far", 125.0, 975.0)).unwrap();
        g.add_edge(edge("au-e", "au-lone", "au-far")).unwrap();

        let diags = audit_map(&g, &layout, 50.0);
        assert_eq!(rules_for(&diags, "au-lone"), vec!["off-grid", "unpaired"]);
        assert_eq!(rules_for(&diags, "au-far"), vec!["outside-map", "unpaired"]);
    }

    #[test]
    fn flags_asymmetric_pair() {
        let layout = MapLayout::new("arena", 10, 10, 2, Symmetry::Mirror);
        let mut g = MapGraph::new();
        g.add_node(node("as-a", 125.0, 75.0)).unwrap();
        let mut twin = node("as-a2", 925.0, 75.0);
        twin.mirrored_id = Some(EntityId::intern("as-a"));
        g.add_node(twin).unwrap();

        let diags = audit_map(&g, &layout, 50.0);
        assert!(rules_for(&diags, "as-a").contains(&"asymmetric-pair"));
    }

    #[test]
    fn flags_edge_to_axis_node_without_reflection() {
        let layout = MapLayout::new("odd", 4, 4, 1, Symmetry::Mirror);
        let mut g = MapGraph::new();
        g.add_node(node("ae-a", 25.0, 25.0)).unwrap();
        let mut twin = node("ae-a2", 425.0, 25.0);
        twin.mirrored_id = Some(EntityId::intern("ae-a"));
        g.add_node(twin).unwrap();
        g.add_node(node("ae-c", 225.0, 125.0)).unwrap();
        g.add_edge(edge("ae-e", "ae-a", "ae-c")).unwrap();

        let diags = audit_map(&g, &layout, 50.0);
        assert_eq!(rules_for(&diags, "ae-e"), vec!["unmirrored-edge"]);
        assert_eq!(rules_for(&diags, "ae-c"), Vec::<&str>::new());

        g.add_edge(edge("ae-e2", "ae-a2", "ae-c")).unwrap();
        let diags = audit_map(&g, &layout, 50.0);
        assert!(diags.iter().all(|d| d.rule != "unmirrored-edge"));
    }
}
