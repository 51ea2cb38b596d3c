//! Tool system for canvas interactions.
//!
//! Each tool turns a primary click (already converted to world space and
//! hit tested) into a `ToolAction`: a selection change, a batch of
//! `GraphMutation`s for the history manager, or a rejection. Tools never
//! mutate the graph themselves.
//!
//! | Tool | Node | Edge | Empty canvas |
//! |------|------|------|--------------|
//! | Select | select | select | deselect |
//! | Add node | - | - | place mirrored pair |
//! | Add edge | pick start / commit | - | - |
//! | Delete | mirrored cascade | mirrored delete | - |

use crate::engine::GraphMutation;
use crate::outcome::EditWarning;
use ctw_core::symmetry::{deletion_set, mirrored_endpoints};
use ctw_core::{
    EdgeType, EntityId, EntityRef, IdGenerator, MapEdge, MapGraph, MapNode, Mirror, NodeType,
    Placement, Point, TeamPair, WoolColor, edge_weight, snap,
};
use serde::{Deserialize, Serialize};

/// The active tool determines how clicks are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolKind {
    #[default]
    Select,
    AddNode,
    AddEdge,
    /// Selectable, no defined effect.
    Rectangle,
    /// Selectable, no defined effect.
    FindPath,
    Delete,
    /// Wipes the map after confirmation; see `MapEditor::resolve_clear`.
    Clear,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Select,
        ToolKind::AddNode,
        ToolKind::AddEdge,
        ToolKind::Rectangle,
        ToolKind::FindPath,
        ToolKind::Delete,
        ToolKind::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "SELECT",
            ToolKind::AddNode => "ADD_NODE",
            ToolKind::AddEdge => "ADD_EDGE",
            ToolKind::Rectangle => "RECTANGLE",
            ToolKind::FindPath => "FIND_PATH",
            ToolKind::Delete => "DELETE",
            ToolKind::Clear => "CLEAR",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Toolbar choices that shape newly created entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOptions {
    pub node_type: NodeType,
    /// Applied to wool rooms only.
    pub wool_color: WoolColor,
    pub edge_type: EdgeType,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            node_type: NodeType::Default,
            wool_color: WoolColor::White,
            edge_type: EdgeType::Walkway,
        }
    }
}

/// Everything a tool may read while handling a click.
pub struct ToolContext<'a> {
    pub graph: &'a MapGraph,
    pub mirror: &'a Mirror,
    pub grid_size: f64,
    pub teams: TeamPair,
    pub options: ToolOptions,
    pub ids: &'a mut IdGenerator,
}

/// What a click asks the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    None,
    Select(Option<EntityRef>),
    /// The tool's own pending state changed (no graph change).
    PendingChanged,
    Mutate {
        mutations: Vec<GraphMutation>,
        description: String,
    },
    Reject(EditWarning),
}

/// Trait for tools that handle clicks and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle a primary click at `world` (unsnapped). `hit` is the topmost
    /// entity under the pointer.
    fn handle(
        &mut self,
        ctx: &mut ToolContext<'_>,
        world: Point,
        hit: Option<EntityRef>,
    ) -> ToolAction;

    /// Drop any in-progress gesture. Returns whether there was one.
    fn cancel(&mut self) -> bool {
        false
    }
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SelectTool;

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn handle(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _world: Point,
        hit: Option<EntityRef>,
    ) -> ToolAction {
        ToolAction::Select(hit)
    }
}

// ─── Add Node Tool ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct AddNodeTool;

impl AddNodeTool {
    fn make_node(ctx: &ToolContext<'_>, at: Point, name: String, id: EntityId) -> MapNode {
        let mut node = MapNode::new(id, at, ctx.teams.primary, ctx.options.node_type, name);
        if ctx.options.node_type == NodeType::WoolRoom {
            node.wool_color = Some(ctx.options.wool_color);
        }
        node
    }
}

impl Tool for AddNodeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::AddNode
    }

    fn handle(
        &mut self,
        ctx: &mut ToolContext<'_>,
        world: Point,
        hit: Option<EntityRef>,
    ) -> ToolAction {
        // Clicks on existing entities never place.
        if hit.is_some() {
            return ToolAction::None;
        }

        let snapped = snap(world, ctx.grid_size);
        let placement = match ctx.mirror.place(snapped) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("placement at ({}, {}) rejected: {e}", snapped.x, snapped.y);
                return ToolAction::Reject(e.into());
            }
        };

        let graph = ctx.graph;
        let occupied = |p: Point| graph.node_at(p).is_some();
        let (primary_at, mirror_at) = match placement {
            Placement::Pair { primary, mirror } => (primary, Some(mirror)),
            Placement::OnAxis(p) => (p, None),
        };
        if occupied(primary_at) || mirror_at.is_some_and(occupied) {
            return ToolAction::None;
        }

        let (id, seq) = ctx.ids.next_node(|id| graph.contains(id));
        let primary = Self::make_node(ctx, primary_at, format!("Node {seq}"), id);
        let mut mutations = Vec::with_capacity(2);
        let description = match mirror_at {
            Some(at) => {
                let (twin_id, _) = ctx.ids.next_node(|id| graph.contains(id));
                let mut twin = Self::make_node(ctx, at, format!("Node {seq}'"), twin_id);
                twin.team = ctx.teams.opposite(primary.team);
                twin.mirrored_id = Some(primary.id);
                mutations.push(GraphMutation::AddNode(primary));
                mutations.push(GraphMutation::AddNode(twin));
                format!("add node pair {id}/{twin_id}")
            }
            None => {
                mutations.push(GraphMutation::AddNode(primary));
                format!("add axis node {id}")
            }
        };
        ToolAction::Mutate {
            mutations,
            description,
        }
    }
}

// ─── Add Edge Tool ───────────────────────────────────────────────────────

/// Two-phase: first node click picks the start, second commits.
#[derive(Debug, Default)]
pub struct AddEdgeTool {
    pending: Option<EntityId>,
}

impl AddEdgeTool {
    pub fn pending(&self) -> Option<EntityId> {
        self.pending
    }

    /// Drop the pending start if it no longer exists (after undo/redo).
    pub fn forget_missing(&mut self, graph: &MapGraph) -> bool {
        match self.pending {
            Some(id) if graph.node(id).is_none() => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    fn commit(ctx: &mut ToolContext<'_>, start: EntityId, end: EntityId) -> ToolAction {
        let graph = ctx.graph;
        let (Some(a), Some(b)) = (graph.node(start), graph.node(end)) else {
            return ToolAction::PendingChanged;
        };
        let weight = edge_weight(a.position(), b.position(), ctx.grid_size);
        let id = ctx.ids.next_edge(|id| graph.contains(id));
        let primary = MapEdge {
            id,
            start_node_id: start,
            end_node_id: end,
            team: a.team,
            edge_type: ctx.options.edge_type,
            weight,
            mirrored_id: None,
        };

        let mut mutations = Vec::with_capacity(2);
        let mut description = format!("add edge {id}");
        if let Some((m_start, m_end)) = mirrored_endpoints(graph, ctx.mirror, start, end) {
            let twin_id = ctx.ids.next_edge(|id| graph.contains(id));
            let twin = MapEdge {
                id: twin_id,
                start_node_id: m_start,
                end_node_id: m_end,
                team: ctx.teams.opposite(primary.team),
                edge_type: primary.edge_type,
                weight: primary.weight,
                mirrored_id: Some(id),
            };
            description = format!("add edge pair {id}/{twin_id}");
            mutations.push(GraphMutation::AddEdge(primary));
            mutations.push(GraphMutation::AddEdge(twin));
        } else {
            mutations.push(GraphMutation::AddEdge(primary));
        }
        ToolAction::Mutate {
            mutations,
            description,
        }
    }
}

impl Tool for AddEdgeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::AddEdge
    }

    fn handle(
        &mut self,
        ctx: &mut ToolContext<'_>,
        _world: Point,
        hit: Option<EntityRef>,
    ) -> ToolAction {
        let Some(EntityRef::Node(clicked)) = hit else {
            return ToolAction::None;
        };
        match self.pending {
            None => {
                self.pending = Some(clicked);
                ToolAction::PendingChanged
            }
            Some(start) if start == clicked => {
                self.pending = None;
                ToolAction::PendingChanged
            }
            Some(start) => {
                self.pending = None;
                Self::commit(ctx, start, clicked)
            }
        }
    }

    fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

// ─── Delete Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct DeleteTool;

impl Tool for DeleteTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Delete
    }

    fn handle(
        &mut self,
        ctx: &mut ToolContext<'_>,
        _world: Point,
        hit: Option<EntityRef>,
    ) -> ToolAction {
        let Some(target) = hit else {
            return ToolAction::None;
        };
        let set = deletion_set(ctx.graph, target);
        if set.is_empty() {
            return ToolAction::None;
        }
        // Edges first so node removal never reports them as already gone.
        let mutations = set
            .edges
            .iter()
            .map(|id| GraphMutation::RemoveEdge(*id))
            .chain(set.nodes.iter().map(|id| GraphMutation::RemoveNode(*id)))
            .collect();
        ToolAction::Mutate {
            mutations,
            description: format!("delete {}", target.id()),
        }
    }
}

// ─── Inert Tools ─────────────────────────────────────────────────────────

/// Rectangle, find-path and clear: clicks do nothing.
#[derive(Debug)]
pub struct InertTool {
    kind: ToolKind,
}

impl InertTool {
    pub fn new(kind: ToolKind) -> Self {
        Self { kind }
    }
}

impl Tool for InertTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn handle(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _world: Point,
        _hit: Option<EntityRef>,
    ) -> ToolAction {
        ToolAction::None
    }
}

// ─── Toolbox ─────────────────────────────────────────────────────────────

/// One instance of every tool, so per-tool state survives switching.
pub struct Toolbox {
    select: SelectTool,
    add_node: AddNodeTool,
    add_edge: AddEdgeTool,
    delete: DeleteTool,
    rectangle: InertTool,
    find_path: InertTool,
    clear: InertTool,
}

impl Default for Toolbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolbox {
    pub fn new() -> Self {
        Self {
            select: SelectTool,
            add_node: AddNodeTool,
            add_edge: AddEdgeTool::default(),
            delete: DeleteTool,
            rectangle: InertTool::new(ToolKind::Rectangle),
            find_path: InertTool::new(ToolKind::FindPath),
            clear: InertTool::new(ToolKind::Clear),
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Select => &mut self.select,
            ToolKind::AddNode => &mut self.add_node,
            ToolKind::AddEdge => &mut self.add_edge,
            ToolKind::Delete => &mut self.delete,
            ToolKind::Rectangle => &mut self.rectangle,
            ToolKind::FindPath => &mut self.find_path,
            ToolKind::Clear => &mut self.clear,
        }
    }

    pub fn add_edge(&self) -> &AddEdgeTool {
        &self.add_edge
    }

    pub fn add_edge_mut(&mut self) -> &mut AddEdgeTool {
        &mut self.add_edge
    }

    /// Cancel every in-progress gesture.
    pub fn cancel_all(&mut self) -> bool {
        let mut any = false;
        for kind in ToolKind::ALL {
            any |= self.get_mut(kind).cancel();
        }
        any
    }
}
