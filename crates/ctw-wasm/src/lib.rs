//! WASM bridge for the CTW map editor: exposes `MapEditor` to the browser
//! host.
//!
//! Compiled via `wasm-pack build --target web`. The JS side owns the DOM:
//! it draws from `get_render_json`, fills the inspector from
//! `get_selection_details_json`, and forwards pointer, wheel and key events
//! together with `Date.now()`.

use ctw_core::symmetry::counterpart;
use ctw_core::{
    AuditSeverity, EdgeType, EntityId, EntityRef, MapGraph, MapLayout, NodeType, Point, Symmetry,
    Team,
};
use ctw_editor::{EditOutcome, EditorConfig, MapEditor, Modifiers, PointerButton, ToolKind};
use ctw_render::Marker;
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct MapCanvas {
    editor: MapEditor,
}

#[wasm_bindgen]
impl MapCanvas {
    /// Create an editor for a map of the given size (grid cells).
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, side_width: i32, side_height: i32, gap: i32, symmetry: &str) -> Self {
        console_error_panic_hook_setup();

        let symmetry = Symmetry::from_name(symmetry).unwrap_or_default();
        let layout = MapLayout::new(
            name,
            i64::from(side_width),
            i64::from(side_height),
            i64::from(gap),
            symmetry,
        );
        Self {
            editor: MapEditor::new(layout, EditorConfig::default()),
        }
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    /// Apply raw settings-form values. Bad numbers fall back to their
    /// minimum.
    pub fn set_layout(
        &mut self,
        name: &str,
        side_width: &str,
        side_height: &str,
        gap: &str,
        symmetry: &str,
    ) {
        let layout = MapLayout::from_form(name, side_width, side_height, gap, symmetry);
        log::debug!("layout form {side_width}x{side_height} gap {gap} {symmetry}");
        self.editor.set_layout(layout);
    }

    /// Layout plus derived canvas metrics as JSON.
    pub fn get_layout_json(&self) -> String {
        let layout = self.editor.layout();
        let grid = self.editor.config().grid_size;
        let size = layout.canvas_size(grid);
        let mut value = serde_json::to_value(layout).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut value {
            map.insert("gridSize".into(), json!(grid));
            map.insert("canvasWidth".into(), json!(size.width));
            map.insert("canvasHeight".into(), json!(size.height));
            map.insert("axisX".into(), json!(self.editor.mirror().axis_x()));
        }
        value.to_string()
    }

    /// Screen position of the drawing surface's top-left corner.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.editor.set_viewport_origin(Point::new(x, y));
    }

    // ─── Pointer & wheel ─────────────────────────────────────────────────

    /// Handle pointer down. Returns an outcome JSON (see `outcome_json`).
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        now_ms: f64,
    ) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let outcome = self.editor.pointer_down(
            Point::new(x, y),
            PointerButton::from_index(button),
            modifiers,
            host_now(now_ms),
        );
        outcome_json(&outcome)
    }

    /// Returns `true` if the view needs a redraw.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_move(Point::new(x, y)).needs_render()
    }

    pub fn handle_pointer_up(&mut self) -> bool {
        self.editor.pointer_up().needs_render()
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.editor.pointer_up().needs_render()
    }

    /// Returns `true` if the zoom changed.
    pub fn handle_wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        self.editor.wheel(Point::new(x, y), delta_y).needs_render()
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a key press. `text_focus` is true while an input or textarea
    /// has focus. Returns an outcome JSON.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_key_down(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        text_focus: bool,
    ) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        outcome_json(&self.editor.key_down(key, modifiers, text_focus))
    }

    /// Returns `true` if releasing `key` restored the toolbar tool.
    pub fn handle_key_up(&mut self, key: &str) -> bool {
        self.editor.key_up(key).needs_render()
    }

    pub fn attach_keyboard(&mut self) {
        self.editor.attach_keyboard();
    }

    pub fn detach_keyboard(&mut self) -> bool {
        self.editor.detach_keyboard().needs_render()
    }

    // ─── Tools & toolbar ─────────────────────────────────────────────────

    /// Pick a tool by name (`"ADD_NODE"`, `"add_node"`, …). Returns `false`
    /// for unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolKind::from_name(&name.to_ascii_uppercase()) {
            Some(kind) => {
                self.editor.set_tool(kind);
                true
            }
            None => {
                log::debug!("unknown tool `{name}`");
                false
            }
        }
    }

    /// The tool clicks currently go to (a held shortcut wins).
    pub fn get_tool_name(&self) -> String {
        self.editor.active_tool().name().to_string()
    }

    pub fn is_clear_pending(&self) -> bool {
        self.editor.clear_pending()
    }

    /// Answer the clear confirmation. Returns `true` if the map was wiped.
    pub fn resolve_clear(&mut self, confirm: bool) -> bool {
        self.editor.resolve_clear(confirm) == EditOutcome::Mutated
    }

    pub fn set_node_type(&mut self, name: &str) -> bool {
        match NodeType::from_name(name) {
            Some(t) => {
                self.editor.set_node_type(t);
                true
            }
            None => {
                log::debug!("unknown node type `{name}`");
                false
            }
        }
    }

    pub fn set_wool_color(&mut self, name: &str) -> bool {
        match Team::from_name(name) {
            Some(c) => {
                self.editor.set_wool_color(c);
                true
            }
            None => false,
        }
    }

    pub fn set_edge_type(&mut self, name: &str) -> bool {
        match EdgeType::from_name(name) {
            Some(t) => {
                self.editor.set_edge_type(t);
                true
            }
            None => false,
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.editor.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo().is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    // ─── State for the renderer, toolbar and inspector ───────────────────

    pub fn get_nodes_json(&self) -> String {
        let nodes: Vec<_> = self.editor.graph().nodes().collect();
        serde_json::to_string(&nodes).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn get_edges_json(&self) -> String {
        let edges: Vec<_> = self.editor.graph().edges().collect();
        serde_json::to_string(&edges).unwrap_or_else(|_| "[]".to_string())
    }

    /// `{"kind":"node","id":"node-1"}`, or `null`.
    pub fn get_selection_json(&self) -> String {
        serde_json::to_string(&self.editor.selection()).unwrap_or_else(|_| "null".to_string())
    }

    /// Everything the inspector shows for the selection, or `null`.
    pub fn get_selection_details_json(&self) -> String {
        match self.editor.selection() {
            Some(target) => selection_details(self.editor.graph(), target).to_string(),
            None => "null".to_string(),
        }
    }

    /// Toolbar and view state in one call.
    pub fn get_view_json(&self) -> String {
        let viewport = self.editor.viewport();
        json!({
            "zoom": viewport.zoom(),
            "panX": viewport.pan().x,
            "panY": viewport.pan().y,
            "tool": self.editor.active_tool().name(),
            "toolbarTool": self.editor.toolbar_tool().name(),
            "pendingEdgeStart": self.editor.pending_edge_start().map(|id| id.as_str().to_string()),
            "canUndo": self.editor.can_undo(),
            "canRedo": self.editor.can_redo(),
            "clearPending": self.editor.clear_pending(),
            "options": self.editor.options(),
        })
        .to_string()
    }

    /// The visible notice at `now_ms`, or `null`.
    pub fn get_notice_json(&self, now_ms: f64) -> String {
        serde_json::to_string(&self.editor.notice(host_now(now_ms)))
            .unwrap_or_else(|_| "null".to_string())
    }

    /// Audit findings as a JSON array.
    pub fn get_audit_json(&self) -> String {
        let diags: Vec<Value> = self
            .editor
            .audit()
            .into_iter()
            .map(|d| {
                let severity = match d.severity {
                    AuditSeverity::Warning => "warning",
                    AuditSeverity::Info => "info",
                };
                json!({
                    "target": d.target,
                    "message": d.message,
                    "severity": severity,
                    "rule": d.rule,
                })
            })
            .collect();
        Value::Array(diags).to_string()
    }

    /// Draw list for the renderer: canvas metrics, nodes with markers and
    /// team colors, edges with endpoint coordinates.
    pub fn get_render_json(&self) -> String {
        let graph = self.editor.graph();
        let selected = self.editor.selection().map(EntityRef::id);
        let pending = self.editor.pending_edge_start();
        let grid = self.editor.config().grid_size;
        let size = self.editor.layout().canvas_size(grid);

        let nodes: Vec<Value> = graph
            .nodes()
            .map(|n| {
                json!({
                    "id": n.id.as_str(),
                    "x": n.x,
                    "y": n.y,
                    "name": n.name,
                    "teamColor": n.team.hex(),
                    "marker": Marker::for_type(n.node_type),
                    "selected": selected == Some(n.id),
                    "pending": pending == Some(n.id),
                })
            })
            .collect();
        let edges: Vec<Value> = graph
            .edges()
            .filter_map(|e| {
                let (a, b) = graph.endpoints(e)?;
                Some(json!({
                    "id": e.id.as_str(),
                    "x1": a.x,
                    "y1": a.y,
                    "x2": b.x,
                    "y2": b.y,
                    "type": e.edge_type,
                    "teamColor": e.team.hex(),
                    "selected": selected == Some(e.id),
                }))
            })
            .collect();

        json!({
            "canvas": {
                "width": size.width,
                "height": size.height,
                "gridSize": grid,
                "axisX": self.editor.mirror().axis_x(),
            },
            "nodes": nodes,
            "edges": edges,
        })
        .to_string()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// `{"outcome":"<kind>","warning":<message|null>,"render":bool}`
fn outcome_json(outcome: &EditOutcome) -> String {
    let (kind, warning) = match outcome {
        EditOutcome::Unchanged => ("unchanged", None),
        EditOutcome::SelectionChanged => ("selectionChanged", None),
        EditOutcome::ViewChanged => ("viewChanged", None),
        EditOutcome::ToolChanged => ("toolChanged", None),
        EditOutcome::Mutated => ("mutated", None),
        EditOutcome::Rejected(w) => ("rejected", Some(w.to_string())),
    };
    json!({
        "outcome": kind,
        "warning": warning,
        "render": outcome.needs_render(),
    })
    .to_string()
}

fn selection_details(graph: &MapGraph, target: EntityRef) -> Value {
    let mirror = counterpart(graph, target).map(|r| r.id().as_str().to_string());
    match target {
        EntityRef::Node(id) => {
            let Some(node) = graph.node(id) else {
                return Value::Null;
            };
            let incident: Vec<&str> = graph
                .incident_edges(id)
                .into_iter()
                .map(|e| e.id.as_str())
                .collect();
            json!({
                "kind": "node",
                "node": node,
                "incidentEdges": incident,
                "counterpart": mirror,
            })
        }
        EntityRef::Edge(id) => {
            let Some(edge) = graph.edge(id) else {
                return Value::Null;
            };
            let name_of = |node: EntityId| graph.node(node).map(|n| n.name.clone());
            json!({
                "kind": "edge",
                "edge": edge,
                "length": graph.edge_length(id),
                "startName": name_of(edge.start_node_id),
                "endName": name_of(edge.end_node_id),
                "counterpart": mirror,
            })
        }
    }
}

/// Hosts that omit the timestamp pass `undefined`, which arrives as NaN.
fn host_now(now_ms: f64) -> f64 {
    if now_ms.is_finite() {
        return now_ms;
    }
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0.0
    }
}

/// The sixteen team colors as `[{"team":"RED","hex":"#…"}]`.
#[wasm_bindgen]
pub fn team_palette_json() -> String {
    let teams: Vec<Value> = Team::ALL
        .iter()
        .map(|t| json!({ "team": t.name(), "hex": t.hex() }))
        .collect();
    Value::Array(teams).to_string()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("CTW WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
