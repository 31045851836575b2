//! Acceptance scenarios for the depth-stack chat view.
//!
//! Each test drives the public API the way the viewer does: build a
//! conversation, run layout passes, change things, run passes again.

use chatstack::model::{ItemId, ItemKey, Section, StackItem};
use chatstack::source::{ChatMessage, Conversation, FileSource};
use chatstack::state::{handle_scroll_action, AppState};
use chatstack::model::KeyAction;
use chatstack::view_state::{
    DepthPosition, DepthStackLayout, ItemSet, LayoutParams, LayoutSettings, Placement,
    ScrollPosition,
};
use std::io::Write;
use std::path::PathBuf;

// ===== Helpers =====

fn message(id: &str, section: Section, sort_value: f64) -> ChatMessage {
    ChatMessage::new(
        StackItem::new(ItemId::new(id).unwrap(), section, sort_value),
        format!("text of {id}"),
    )
}

fn key(section: Section, id: &str) -> ItemKey {
    ItemKey::new(section, ItemId::new(id).unwrap())
}

fn params() -> LayoutParams {
    LayoutParams::new(LayoutSettings::default()).unwrap()
}

/// Section 0 at [0, 1, 2], section 1 at [0.5, 1.5, 2.5], item height 100.
fn interleaved() -> Conversation {
    Conversation::from_messages([
        message("a0", Section::Outgoing, 0.0),
        message("a1", Section::Outgoing, 1.0),
        message("a2", Section::Outgoing, 2.0),
        message("b0", Section::Incoming, 0.5),
        message("b1", Section::Incoming, 1.5),
        message("b2", Section::Incoming, 2.5),
    ])
}

fn settle(state: &mut AppState) {
    for _ in 0..200 {
        if !state.tick() {
            break;
        }
    }
    state.layout_pass();
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "chatstack-acceptance-{}-{name}.jsonl",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

// ===== Scenarios =====

#[test]
fn interleaved_sections_get_consecutive_focus_positions() {
    let conversation = interleaved();
    let mut layout = DepthStackLayout::new(params());
    layout.rebuild(&ItemSet::from_source(&conversation));

    let expected = [
        ("a0", Section::Outgoing, 0.0),
        ("b0", Section::Incoming, 100.0),
        ("a1", Section::Outgoing, 200.0),
        ("b1", Section::Incoming, 300.0),
        ("a2", Section::Outgoing, 400.0),
        ("b2", Section::Incoming, 500.0),
    ];
    for (id, section, position) in expected {
        assert_eq!(
            layout.focus_position(&key(section, id)),
            Some(DepthPosition::new(position)),
            "{id}"
        );
    }
    assert_eq!(layout.max_depth().get(), 500.0);
}

#[test]
fn newest_item_is_focused_at_the_end_of_the_stack() {
    let mut state = AppState::new(interleaved(), params());
    let pass = state.layout_pass();

    assert_eq!(pass.depth.get(), 500.0);
    let b2 = pass.get(&key(Section::Incoming, "b2")).unwrap();
    assert_eq!(b2.placement, Placement::Focused);
    assert_eq!(b2.normalized_offset(), 0.0);
    assert_eq!(pass.focused_item(Section::Outgoing).map(ItemId::as_str), Some("a2"));
}

#[test]
fn single_item_section_rests_at_offset_zero() {
    let conversation = Conversation::from_messages([
        message("only", Section::Outgoing, 0.0),
        message("b0", Section::Incoming, 1.0),
        message("b1", Section::Incoming, 2.0),
        message("b2", Section::Incoming, 3.0),
    ]);
    let mut state = AppState::new(conversation, params());

    let range = state.layout().z_range(&key(Section::Outgoing, "only")).unwrap();
    assert!(range.is_degenerate());
    assert!(range.is_open_ended());

    for depth in [0.0, 150.0, 300.0] {
        state.jump_to(ScrollPosition::at_depth(depth));
        let pass = state.layout_pass();
        let only = pass.get(&key(Section::Outgoing, "only")).unwrap();
        assert_eq!(only.normalized_offset(), 0.0, "depth {depth}");
        assert!(!only.scale.is_nan());
    }
}

#[test]
fn lone_incoming_message_stays_focused_while_scrolling_back() {
    let conversation = Conversation::from_messages([
        message("a0", Section::Outgoing, 0.0),
        message("a1", Section::Outgoing, 1.0),
        message("a2", Section::Outgoing, 2.0),
        message("reply", Section::Incoming, 3.0),
    ]);
    let mut state = AppState::new(conversation, params());

    for depth in [0.0, 150.0, 300.0] {
        state.jump_to(ScrollPosition::at_depth(depth));
        let pass = state.layout_pass();
        let reply = pass.get(&key(Section::Incoming, "reply")).unwrap();
        assert_eq!(reply.placement, Placement::Focused, "depth {depth}");
        assert_eq!(reply.scale, 1.0);
        assert_eq!(
            pass.focused_item(Section::Incoming).map(ItemId::as_str),
            Some("reply")
        );
    }
}

#[test]
fn message_arriving_near_focus_advances_the_view() {
    let mut state = AppState::new(interleaved(), params());
    state.jump_to(ScrollPosition::at_depth(500.0));
    state.layout_pass();

    state.insert_message(message("a3", Section::Outgoing, 3.0));
    state.layout_pass();
    settle(&mut state);

    assert_eq!(state.depth().get(), 600.0);
    assert_eq!(
        state.focused_key(Section::Outgoing),
        Some(key(Section::Outgoing, "a3"))
    );
}

#[test]
fn message_arriving_far_from_focus_leaves_the_view_alone() {
    let mut state = AppState::new(interleaved(), params());
    state.jump_to(ScrollPosition::Oldest);
    state.layout_pass();

    state.insert_message(message("a3", Section::Outgoing, 3.0));
    state.layout_pass();
    settle(&mut state);

    assert_eq!(state.depth().get(), 0.0);
    assert_eq!(
        state.focused_key(Section::Outgoing),
        Some(key(Section::Outgoing, "a0"))
    );
}

#[test]
fn following_newest_tracks_every_arrival() {
    let mut state = AppState::new(interleaved(), params());
    for n in 3..6 {
        state.insert_message(message(&format!("b{n}"), Section::Incoming, n as f64 + 0.5));
        state.layout_pass();
    }
    settle(&mut state);
    assert_eq!(state.depth().get(), 800.0);
    assert_eq!(
        state.focused_key(Section::Incoming),
        Some(key(Section::Incoming, "b5"))
    );
}

#[test]
fn removed_visible_message_fades_out() {
    let mut state = AppState::new(interleaved(), params());
    assert!(state.remove_message(&key(Section::Outgoing, "a2")));
    state.layout_pass();

    let exits = state.exit_transforms();
    assert_eq!(exits.len(), 1);
    assert_eq!(exits[0].0, &key(Section::Outgoing, "a2"));

    state.tick();
    let (_, fading) = state.exit_transforms()[0];
    assert!(fading.opacity < 1.0);

    settle(&mut state);
    assert!(state.exit_transforms().is_empty());
    assert!(state.last_pass().unwrap().get(&key(Section::Outgoing, "a2")).is_none());
}

#[test]
fn paging_walks_item_by_item() {
    let mut state = AppState::new(interleaved(), params());
    handle_scroll_action(&mut state, KeyAction::PageUp);
    assert_eq!(state.target_depth().get(), 400.0);
    handle_scroll_action(&mut state, KeyAction::PageUp);
    assert_eq!(state.target_depth().get(), 300.0);
    settle(&mut state);
    assert_eq!(
        state.focused_key(Section::Incoming),
        Some(key(Section::Incoming, "b1"))
    );
}

#[test]
fn conversation_file_loads_into_the_stack() {
    let path = temp_file(
        "load",
        concat!(
            r#"{"id": "hello", "section": 0, "sort_value": 1, "text": "hello"}"#,
            "\n",
            r#"{"id": "hi", "section": 1, "timestamp": "2024-01-01T00:00:05Z", "text": "hi"}"#,
            "\n",
            "not json\n",
            r#"{"id": "bye", "section": 0, "sort_value": 1704067210, "text": "bye"}"#,
            "\n",
        ),
    );

    let mut source = FileSource::new(&path).unwrap();
    assert_eq!(source.skipped(), 1);
    let mut state = AppState::new(Conversation::from_messages(source.drain_messages()), params());
    std::fs::remove_file(&path).ok();

    let pass = state.layout_pass();
    assert_eq!(pass.focused_item(Section::Outgoing).map(ItemId::as_str), Some("bye"));
    assert_eq!(pass.focused_item(Section::Incoming).map(ItemId::as_str), Some("hi"));
    assert_eq!(state.layout().max_depth().get(), 200.0);
}
