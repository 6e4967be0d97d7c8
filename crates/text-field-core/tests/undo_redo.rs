use std::rc::Rc;
use text_field_core::{FontId, MonospaceMetrics, Position, TextFieldConfig, TextManager};

fn manager() -> TextManager {
    TextManager::new(
        Rc::new(MonospaceMetrics::new(10.0, 20.0)),
        FontId::default(),
    )
}

fn type_str(manager: &mut TextManager, text: &str) {
    for ch in text.chars() {
        manager.insert_character_at_cursor(ch);
    }
}

#[test]
fn test_undo_redo_typed_run() {
    let mut manager = manager();
    type_str(&mut manager, "hello");

    assert_eq!(manager.undo_depth(), 1);
    assert!(manager.undo());
    assert_eq!(manager.get_text(), "");
    assert_eq!(manager.cursor_position(), Position::new(0, 0));
    assert!(!manager.can_undo());
    assert!(manager.can_redo());

    assert!(manager.redo());
    assert_eq!(manager.get_text(), "hello");
    assert_eq!(manager.cursor_position(), Position::new(0, 5));
    assert!(!manager.can_redo());
}

#[test]
fn test_end_undo_group_breaks_coalescing() {
    let mut manager = manager();
    type_str(&mut manager, "ab");
    manager.end_undo_group();
    type_str(&mut manager, "cd");

    assert_eq!(manager.undo_depth(), 2);
    manager.undo();
    assert_eq!(manager.get_text(), "ab");
}

#[test]
fn test_cursor_move_breaks_coalescing() {
    let mut manager = manager();
    type_str(&mut manager, "ab");
    manager.move_cursor_left();
    manager.move_cursor_right();
    type_str(&mut manager, "c");

    assert_eq!(manager.get_text(), "abc");
    assert_eq!(manager.undo_depth(), 2);
}

#[test]
fn test_new_line_is_its_own_record() {
    let mut manager = manager();
    type_str(&mut manager, "a");
    manager.insert_new_line_at_cursor();
    type_str(&mut manager, "b");

    assert_eq!(manager.undo_depth(), 3);
    manager.undo();
    assert_eq!(manager.get_text(), "a\n");
    assert_eq!(manager.cursor_position(), Position::new(1, 0));
    manager.undo();
    assert_eq!(manager.get_text(), "a");
    assert_eq!(manager.cursor_position(), Position::new(0, 1));
    manager.undo();
    assert_eq!(manager.get_text(), "");
}

#[test]
fn test_paste_is_its_own_record() {
    let mut manager = manager();
    type_str(&mut manager, "ab");
    manager.insert_text_at_cursor("cd");
    type_str(&mut manager, "e");

    assert_eq!(manager.get_text(), "abcde");
    assert_eq!(manager.undo_depth(), 3);
    manager.undo();
    manager.undo();
    assert_eq!(manager.get_text(), "ab");
}

#[test]
fn test_undo_backspace_restores_cursor_after_text() {
    let mut manager = manager();
    manager.set_text("abc");
    manager.set_cursor_position(Position::new(0, 3));
    manager.delete_character_at_left_of_cursor();
    assert_eq!(manager.get_text(), "ab");

    manager.undo();
    assert_eq!(manager.get_text(), "abc");
    assert_eq!(manager.cursor_position(), Position::new(0, 3));
}

#[test]
fn test_undo_delete_forward_restores_cursor_before_text() {
    let mut manager = manager();
    manager.set_text("abc");
    manager.set_cursor_position(Position::new(0, 1));
    manager.delete_character_at_right_of_cursor();
    assert_eq!(manager.get_text(), "ac");

    manager.undo();
    assert_eq!(manager.get_text(), "abc");
    assert_eq!(manager.cursor_position(), Position::new(0, 1));
}

#[test]
fn test_undo_line_merge() {
    let mut manager = manager();
    manager.set_text("ab\ncd");
    manager.set_cursor_position(Position::new(1, 0));
    manager.delete_character_at_left_of_cursor();
    assert_eq!(manager.get_text(), "abcd");

    manager.undo();
    assert_eq!(manager.get_text(), "ab\ncd");
    assert_eq!(manager.line_count(), 2);
    assert_eq!(manager.cursor_position(), Position::new(1, 0));

    manager.redo();
    assert_eq!(manager.get_text(), "abcd");
    assert_eq!(manager.cursor_position(), Position::new(0, 2));
}

#[test]
fn test_undo_multi_line_range_delete() {
    let original = "A\nBCDE\nFGHI\nJKLM\nNOP";
    let mut manager = manager();
    manager.set_text(original);
    manager.delete_characters_in_range(Position::new(1, 2), Position::new(3, 2));
    assert_eq!(manager.get_text(), "A\nBCLM\nNOP");

    manager.undo();
    assert_eq!(manager.get_text(), original);
    assert_eq!(manager.line_count(), 5);
    assert_eq!(manager.cursor_position(), Position::new(1, 2));
    assert_eq!(manager.content_size().height, 100.0);

    manager.redo();
    assert_eq!(manager.get_text(), "A\nBCLM\nNOP");
    assert_eq!(manager.cursor_position(), Position::new(1, 2));
}

#[test]
fn test_new_edit_discards_redo() {
    let mut manager = manager();
    type_str(&mut manager, "a");
    manager.end_undo_group();
    type_str(&mut manager, "b");

    manager.undo();
    assert_eq!(manager.get_text(), "a");
    assert!(manager.can_redo());

    type_str(&mut manager, "c");
    assert_eq!(manager.get_text(), "ac");
    assert!(!manager.can_redo());
    assert!(!manager.redo());
    assert_eq!(manager.get_text(), "ac");
}

#[test]
fn test_undo_with_empty_history() {
    let mut manager = manager();
    manager.set_text("keep");
    let version = manager.version();

    assert!(!manager.undo());
    assert!(!manager.redo());
    assert_eq!(manager.get_text(), "keep");
    assert_eq!(manager.version(), version);
}

#[test]
fn test_undo_all_restores_initial_text() {
    let mut manager = manager();
    manager.set_text("fn main() {\n}");

    manager.set_cursor_position(Position::new(0, 11));
    manager.insert_new_line_at_cursor();
    type_str(&mut manager, "    let x = 1;");
    manager.move_cursor(text_field_core::Motion::DocumentStart);
    manager.insert_text_at_cursor("// entry\n");
    manager.set_cursor_position(Position::new(2, 8));
    manager.delete_character_at_right_of_cursor();
    manager.delete_characters_in_range(Position::new(0, 0), Position::new(1, 3));
    let edited = manager.get_text().to_string();

    while manager.undo() {}
    assert_eq!(manager.get_text(), "fn main() {\n}");

    while manager.redo() {}
    assert_eq!(manager.get_text(), edited);
}

#[test]
fn test_modified_tracking() {
    let mut manager = manager();
    assert!(!manager.is_modified());

    type_str(&mut manager, "a");
    assert!(manager.is_modified());
    manager.mark_clean();
    assert!(!manager.is_modified());

    type_str(&mut manager, "b");
    assert!(manager.is_modified());
    // "b" did not merge into the saved record.
    assert_eq!(manager.undo_depth(), 2);

    manager.undo();
    assert!(!manager.is_modified());
    assert_eq!(manager.get_text(), "a");
}

#[test]
fn test_undo_limit() {
    let mut manager = TextManager::with_config(
        Rc::new(MonospaceMetrics::new(10.0, 20.0)),
        FontId::default(),
        TextFieldConfig::default().with_undo_limit(2),
    );
    manager.insert_text_at_cursor("a");
    manager.insert_text_at_cursor("b");
    manager.insert_text_at_cursor("c");

    assert_eq!(manager.undo_depth(), 2);
    assert!(manager.undo());
    assert!(manager.undo());
    assert!(!manager.undo());
    assert_eq!(manager.get_text(), "a");
}

#[test]
fn test_undo_clears_selection() {
    let mut manager = manager();
    type_str(&mut manager, "hello");
    manager.select_all();
    assert!(manager.has_selection());

    manager.undo();
    assert!(!manager.has_selection());
    assert_eq!(manager.cursor_position(), Position::new(0, 0));
}
