//! Undo/redo through the editor: every recorded action restores the exact
//! graph on either side of it.

use ctw_core::{EntityId, EntityRef, MapGraph, MapLayout, Point, Symmetry};
use ctw_editor::{EditOutcome, EditorConfig, MapEditor, Modifiers, PointerButton, ToolKind};
use pretty_assertions::assert_eq;

fn editor_with(config: EditorConfig) -> MapEditor {
    let _ = env_logger::builder().is_test(true).try_init();
    MapEditor::new(MapLayout::new("history", 10, 10, 2, Symmetry::Mirror), config)
}

fn editor() -> MapEditor {
    editor_with(EditorConfig::default())
}

fn click(ed: &mut MapEditor, x: f64, y: f64) -> EditOutcome {
    ed.pointer_down(Point::new(x, y), PointerButton::Primary, Modifiers::NONE, 0.0)
}

/// Run a fixed sequence of edits, returning the graph after each.
fn build(ed: &mut MapEditor) -> Vec<MapGraph> {
    let mut states = vec![ed.graph().clone()];
    ed.set_tool(ToolKind::AddNode);
    for (x, y) in [(25.0, 25.0), (225.0, 25.0), (225.0, 225.0)] {
        assert_eq!(click(ed, x, y), EditOutcome::Mutated);
        states.push(ed.graph().clone());
    }
    ed.set_tool(ToolKind::AddEdge);
    click(ed, 25.0, 25.0);
    assert_eq!(click(ed, 225.0, 25.0), EditOutcome::Mutated);
    states.push(ed.graph().clone());

    ed.set_tool(ToolKind::Delete);
    assert_eq!(click(ed, 225.0, 25.0), EditOutcome::Mutated);
    states.push(ed.graph().clone());
    states
}

#[test]
fn undo_n_then_redo_n_replays_every_state() {
    let mut ed = editor();
    let states = build(&mut ed);
    let n = states.len() - 1;

    for i in (0..n).rev() {
        assert!(ed.undo().is_some());
        assert_eq!(ed.graph(), &states[i], "after undo to state {i}");
    }
    assert!(!ed.can_undo());
    assert_eq!(ed.undo(), None);

    for (i, state) in states.iter().enumerate().skip(1) {
        assert!(ed.redo().is_some());
        assert_eq!(ed.graph(), state, "after redo to state {i}");
    }
    assert!(!ed.can_redo());
    assert_eq!(ed.redo(), None);
}

#[test]
fn undo_descriptions_name_the_action() {
    let mut ed = editor();
    build(&mut ed);
    assert_eq!(ed.undo().as_deref(), Some("delete node-3"));
    let edge = ed.undo();
    assert!(edge.is_some_and(|d| d.starts_with("add edge pair")));
}

#[test]
fn new_action_after_undo_discards_redo_branch() {
    let mut ed = editor();
    build(&mut ed);
    ed.undo();
    ed.undo();
    assert!(ed.can_redo());

    ed.set_tool(ToolKind::AddNode);
    assert_eq!(click(&mut ed, 425.0, 425.0), EditOutcome::Mutated);
    assert!(!ed.can_redo());
    assert_eq!(ed.redo(), None);
    assert_eq!(ed.graph().edge_count(), 0);
}

#[test]
fn ids_are_not_reused_after_undo() {
    let mut ed = editor();
    ed.set_tool(ToolKind::AddNode);
    click(&mut ed, 25.0, 25.0);
    ed.undo();
    click(&mut ed, 25.0, 25.0);
    let ids: Vec<_> = ed.graph().nodes().map(|n| n.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["node-3".to_string(), "node-4".to_string()]);
}

#[test]
fn rejected_and_noop_actions_are_not_recorded() {
    let mut ed = editor();
    ed.set_tool(ToolKind::AddNode);
    click(&mut ed, 640.0, 40.0);
    assert!(!ed.can_undo());

    click(&mut ed, 25.0, 25.0);
    // Same cell again: nothing to record.
    click(&mut ed, 30.0, 40.0);
    ed.undo();
    assert!(!ed.can_undo());
    assert!(ed.graph().is_empty());
}

#[test]
fn undo_clears_stale_selection_and_pending_edge() {
    let mut ed = editor();
    ed.set_tool(ToolKind::AddNode);
    click(&mut ed, 25.0, 25.0);

    ed.set_tool(ToolKind::Select);
    click(&mut ed, 25.0, 25.0);
    assert_eq!(ed.selection(), Some(EntityRef::Node(EntityId::intern("node-1"))));
    ed.undo();
    assert_eq!(ed.selection(), None);

    ed.redo();
    ed.set_tool(ToolKind::AddEdge);
    click(&mut ed, 25.0, 25.0);
    assert!(ed.pending_edge_start().is_some());
    ed.undo();
    assert_eq!(ed.pending_edge_start(), None);
}

#[test]
fn keyboard_undo_redo() {
    let mut ed = editor();
    ed.set_tool(ToolKind::AddNode);
    click(&mut ed, 25.0, 25.0);

    let cmd = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    let cmd_shift = Modifiers {
        shift: true,
        ..cmd
    };
    assert_eq!(ed.key_down("z", cmd, false), EditOutcome::Mutated);
    assert!(ed.graph().is_empty());
    assert_eq!(ed.key_down("z", cmd, false), EditOutcome::Unchanged);
    assert_eq!(ed.key_down("Z", cmd_shift, false), EditOutcome::Mutated);
    assert_eq!(ed.graph().node_count(), 2);
    // Text fields keep their own undo.
    assert_eq!(ed.key_down("z", cmd, true), EditOutcome::Unchanged);
    assert_eq!(ed.graph().node_count(), 2);
}

#[test]
fn history_depth_bounds_undo() {
    let mut ed = editor_with(EditorConfig {
        history_depth: 2,
        ..EditorConfig::default()
    });
    ed.set_tool(ToolKind::AddNode);
    for y in [25.0, 125.0, 225.0] {
        click(&mut ed, 25.0, y);
    }
    assert!(ed.undo().is_some());
    assert!(ed.undo().is_some());
    assert!(ed.undo().is_none());
    assert_eq!(ed.graph().node_count(), 2);
}
