//! The editor controller.
//!
//! `MapEditor` owns the mutation engine, history, viewport, tools and key
//! bindings, and processes one event at a time to completion. Hosts feed
//! it screen-space input plus a millisecond timestamp and read back the
//! graph, selection, view and notice state to render.

use crate::bindings::{KeyBindings, KeyResponse};
use crate::config::EditorConfig;
use crate::engine::{GraphMutation, MapEngine};
use crate::history::History;
use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::notice::{Notice, NoticeBoard};
use crate::outcome::EditOutcome;
use crate::shortcuts::ShortcutAction;
use crate::tools::{ToolAction, ToolContext, ToolKind, ToolOptions, Toolbox};
use crate::viewport::Viewport;
use ctw_core::symmetry::counterpart;
use ctw_core::{
    AuditDiagnostic, EdgeType, EntityId, EntityRef, IdGenerator, MapEdge, MapGraph, MapLayout,
    MapNode, Mirror, NodeType, Point, WoolColor, audit_map,
};
use ctw_render::hit_test;

pub struct MapEditor {
    engine: MapEngine,
    history: History,
    viewport: Viewport,
    config: EditorConfig,
    ids: IdGenerator,
    tools: Toolbox,
    /// Tool picked on the toolbar.
    tool: ToolKind,
    /// Tool active while a shortcut key is held.
    held_tool: Option<ToolKind>,
    bindings: KeyBindings,
    options: ToolOptions,
    selection: Option<EntityRef>,
    notices: NoticeBoard,
    /// Set while a clear waits for confirmation: the tool to return to.
    clear_return: Option<ToolKind>,
}

impl MapEditor {
    pub fn new(layout: MapLayout, config: EditorConfig) -> Self {
        Self::with_graph(MapGraph::new(), layout, config)
    }

    /// Start from an existing graph. New ids skip any already in use.
    pub fn with_graph(graph: MapGraph, layout: MapLayout, config: EditorConfig) -> Self {
        let mut bindings = KeyBindings::new();
        bindings.attach();
        Self {
            engine: MapEngine::with_graph(graph, layout, config.grid_size),
            history: History::new(config.history_depth),
            viewport: Viewport::new(&config),
            notices: NoticeBoard::new(config.notice_duration_ms),
            config,
            ids: IdGenerator::new(),
            tools: Toolbox::new(),
            tool: ToolKind::default(),
            held_tool: None,
            bindings,
            options: ToolOptions::default(),
            selection: None,
            clear_return: None,
        }
    }

    /// Process one input event.
    pub fn handle(&mut self, event: &InputEvent, now_ms: f64) -> EditOutcome {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(Point::new(*x, *y), *button, *modifiers, now_ms),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.pointer_up(),
            InputEvent::Wheel { x, y, delta_y } => self.wheel(Point::new(*x, *y), *delta_y),
            InputEvent::KeyDown {
                key,
                modifiers,
                text_focus,
            } => self.key_down(key, *modifiers, *text_focus),
            InputEvent::KeyUp { key } => self.key_up(key),
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_down(
        &mut self,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
        now_ms: f64,
    ) -> EditOutcome {
        self.notices.prune(now_ms);
        if button != PointerButton::Primary {
            return EditOutcome::Unchanged;
        }
        if modifiers.command() {
            self.viewport.begin_pan(screen);
            return EditOutcome::Unchanged;
        }

        let world = self.viewport.screen_to_world(screen);
        let slop = self.config.hit_tolerance_px / self.viewport.zoom();
        let hit = hit_test(&self.engine.graph, world, slop);
        let kind = self.active_tool();

        let action = {
            let mut ctx = ToolContext {
                graph: &self.engine.graph,
                mirror: self.engine.mirror(),
                grid_size: self.engine.grid_size(),
                teams: self.config.teams,
                options: self.options,
                ids: &mut self.ids,
            };
            self.tools.get_mut(kind).handle(&mut ctx, world, hit)
        };
        self.apply_action(action, now_ms)
    }

    pub fn pointer_move(&mut self, screen: Point) -> EditOutcome {
        if self.viewport.drag_pan(screen) {
            EditOutcome::ViewChanged
        } else {
            EditOutcome::Unchanged
        }
    }

    /// Button release or pointer leaving the surface.
    pub fn pointer_up(&mut self) -> EditOutcome {
        self.viewport.end_pan();
        EditOutcome::Unchanged
    }

    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> EditOutcome {
        if self.viewport.wheel(screen, delta_y) {
            EditOutcome::ViewChanged
        } else {
            EditOutcome::Unchanged
        }
    }

    fn apply_action(&mut self, action: ToolAction, now_ms: f64) -> EditOutcome {
        match action {
            ToolAction::None => EditOutcome::Unchanged,
            ToolAction::Select(selection) => {
                if self.selection == selection {
                    EditOutcome::Unchanged
                } else {
                    self.selection = selection;
                    EditOutcome::SelectionChanged
                }
            }
            ToolAction::PendingChanged => EditOutcome::SelectionChanged,
            ToolAction::Mutate {
                mutations,
                description,
            } => {
                if self.history.execute(&mut self.engine, mutations, &description) {
                    self.prune_stale();
                    EditOutcome::Mutated
                } else {
                    EditOutcome::Unchanged
                }
            }
            ToolAction::Reject(warning) => {
                self.notices.raise(warning.to_string(), now_ms);
                EditOutcome::Rejected(warning)
            }
        }
    }

    /// Drop selection and pending state that point at deleted entities.
    fn prune_stale(&mut self) {
        if let Some(sel) = self.selection {
            if !self.engine.graph.contains(sel.id()) {
                self.selection = None;
            }
        }
        self.tools.add_edge_mut().forget_missing(&self.engine.graph);
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    pub fn key_down(&mut self, key: &str, modifiers: Modifiers, text_focus: bool) -> EditOutcome {
        match self.bindings.key_down(key, modifiers, text_focus) {
            KeyResponse::Ignored => EditOutcome::Unchanged,
            KeyResponse::Hold(tool) => {
                let before = self.active_tool();
                self.held_tool = Some(tool);
                self.after_tool_change(before)
            }
            KeyResponse::Action(action) => self.perform(action),
        }
    }

    pub fn key_up(&mut self, key: &str) -> EditOutcome {
        if !self.bindings.key_up(key) {
            return EditOutcome::Unchanged;
        }
        let before = self.active_tool();
        self.held_tool = None;
        self.after_tool_change(before)
    }

    /// Stop reacting to keys (host tears down its listeners).
    pub fn detach_keyboard(&mut self) -> EditOutcome {
        if !self.bindings.detach() {
            return EditOutcome::Unchanged;
        }
        let before = self.active_tool();
        self.held_tool = None;
        self.after_tool_change(before)
    }

    pub fn attach_keyboard(&mut self) {
        self.bindings.attach();
    }

    fn perform(&mut self, action: ShortcutAction) -> EditOutcome {
        match action {
            ShortcutAction::Undo => match self.undo() {
                Some(_) => EditOutcome::Mutated,
                None => EditOutcome::Unchanged,
            },
            ShortcutAction::Redo => match self.redo() {
                Some(_) => EditOutcome::Mutated,
                None => EditOutcome::Unchanged,
            },
            ShortcutAction::Cancel => {
                let cancelled = self.tools.cancel_all();
                let deselected = self.selection.take().is_some();
                if cancelled || deselected {
                    EditOutcome::SelectionChanged
                } else {
                    EditOutcome::Unchanged
                }
            }
            ShortcutAction::ResetView => {
                if self.viewport.reset() {
                    EditOutcome::ViewChanged
                } else {
                    EditOutcome::Unchanged
                }
            }
            // Tool letters arrive as holds.
            _ => EditOutcome::Unchanged,
        }
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// The tool clicks are routed to right now.
    pub fn active_tool(&self) -> ToolKind {
        self.held_tool.unwrap_or(self.tool)
    }

    /// The tool picked on the toolbar, ignoring held shortcuts.
    pub fn toolbar_tool(&self) -> ToolKind {
        self.tool
    }

    /// Toolbar tool selection. Picking `Clear` arms a clear that waits for
    /// `resolve_clear`.
    pub fn set_tool(&mut self, kind: ToolKind) -> EditOutcome {
        let before = self.active_tool();
        self.bindings.release();
        self.held_tool = None;
        if kind == ToolKind::Clear {
            if self.clear_return.is_none() {
                self.clear_return = Some(self.tool);
            }
        } else {
            self.clear_return = None;
        }
        self.tool = kind;
        log::debug!("tool: {} -> {}", before.name(), kind.name());
        self.after_tool_change(before)
    }

    fn after_tool_change(&mut self, before: ToolKind) -> EditOutcome {
        if self.active_tool() == before {
            return EditOutcome::Unchanged;
        }
        self.tools.cancel_all();
        EditOutcome::ToolChanged
    }

    /// Whether a clear is waiting for confirmation.
    pub fn clear_pending(&self) -> bool {
        self.clear_return.is_some()
    }

    /// Confirm or cancel a pending clear. Either way the previous tool is
    /// restored.
    pub fn resolve_clear(&mut self, confirm: bool) -> EditOutcome {
        let Some(back) = self.clear_return.take() else {
            return EditOutcome::Unchanged;
        };
        self.tool = back;
        self.tools.cancel_all();
        if !confirm {
            return EditOutcome::ToolChanged;
        }

        let changed = self
            .history
            .execute(&mut self.engine, vec![GraphMutation::Clear], "clear map");
        self.selection = None;
        if changed {
            log::info!("map cleared");
            EditOutcome::Mutated
        } else {
            EditOutcome::ToolChanged
        }
    }

    pub fn options(&self) -> ToolOptions {
        self.options
    }

    pub fn set_node_type(&mut self, node_type: NodeType) {
        self.options.node_type = node_type;
    }

    pub fn set_wool_color(&mut self, color: WoolColor) {
        self.options.wool_color = color;
    }

    pub fn set_edge_type(&mut self, edge_type: EdgeType) {
        self.options.edge_type = edge_type;
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> Option<String> {
        let description = self.history.undo(&mut self.engine)?;
        self.prune_stale();
        Some(description)
    }

    pub fn redo(&mut self) -> Option<String> {
        let description = self.history.redo(&mut self.engine)?;
        self.prune_stale();
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    pub fn layout(&self) -> &MapLayout {
        self.engine.layout()
    }

    /// Apply a layout from the settings form. Entities are not moved.
    pub fn set_layout(&mut self, layout: MapLayout) {
        self.engine.set_layout(layout);
        let layout = self.engine.layout();
        log::info!(
            "layout '{}': {}x{} per side, gap {}, axis at {}",
            layout.name,
            layout.team_side_width,
            layout.team_side_height,
            layout.middle_gap_width,
            self.engine.mirror().axis_x()
        );
    }

    pub fn mirror(&self) -> &Mirror {
        self.engine.mirror()
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport_origin(&mut self, origin: Point) {
        self.viewport.set_origin(origin);
    }

    // ─── Read-only state ─────────────────────────────────────────────────

    pub fn graph(&self) -> &MapGraph {
        &self.engine.graph
    }

    pub fn selection(&self) -> Option<EntityRef> {
        self.selection
    }

    pub fn selected_node(&self) -> Option<&MapNode> {
        match self.selection? {
            EntityRef::Node(id) => self.engine.graph.node(id),
            EntityRef::Edge(_) => None,
        }
    }

    pub fn selected_edge(&self) -> Option<&MapEdge> {
        match self.selection? {
            EntityRef::Edge(id) => self.engine.graph.edge(id),
            EntityRef::Node(_) => None,
        }
    }

    /// Mirror counterpart of the selected entity.
    pub fn selected_counterpart(&self) -> Option<EntityRef> {
        counterpart(&self.engine.graph, self.selection?)
    }

    /// Start node of an edge being drawn.
    pub fn pending_edge_start(&self) -> Option<EntityId> {
        self.tools.add_edge().pending()
    }

    pub fn notice(&self, now_ms: f64) -> Option<&Notice> {
        self.notices.current(now_ms)
    }

    pub fn audit(&self) -> Vec<AuditDiagnostic> {
        audit_map(&self.engine.graph, self.engine.layout(), self.engine.grid_size())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}
