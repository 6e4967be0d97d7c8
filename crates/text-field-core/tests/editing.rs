use std::cell::RefCell;
use std::rc::Rc;
use text_field_core::{
    ChangeCause, FontId, MonospaceMetrics, Position, Size, TextFieldConfig, TextManager,
};

fn manager() -> TextManager {
    TextManager::new(
        Rc::new(MonospaceMetrics::new(10.0, 20.0)),
        FontId::default(),
    )
}

fn line_texts(manager: &TextManager) -> Vec<String> {
    manager
        .lines()
        .iter()
        .map(|line| line.text().to_string())
        .collect()
}

#[test]
fn test_fresh_manager_state() {
    let manager = manager();

    assert_eq!(manager.line_count(), 1);
    assert_eq!(manager.get_text(), "");
    assert!(!manager.has_text());
    assert!(!manager.has_selection());
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(manager.cursor_position(), Position::new(0, 0));
    assert_eq!(manager.content_size(), Size::new(0.0, 20.0));
    assert_eq!(manager.version(), 0);
}

#[test]
fn test_typing_advances_cursor_and_measures() {
    let mut manager = manager();
    for ch in "abc".chars() {
        manager.insert_character_at_cursor(ch);
    }

    assert_eq!(manager.get_text(), "abc");
    assert_eq!(manager.cursor_position(), Position::new(0, 3));
    assert_eq!(manager.line(0).width(), 30.0);
    assert_eq!(manager.content_size(), Size::new(30.0, 20.0));
    assert_eq!(manager.cursor().x, 30.0);
    assert_eq!(manager.cursor().y, 0.0);
}

#[test]
fn test_typing_in_the_middle_of_a_line() {
    let mut manager = manager();
    manager.set_text("ac");
    manager.set_cursor_position(Position::new(0, 1));
    manager.insert_character_at_cursor('b');

    assert_eq!(manager.get_text(), "abc");
    assert_eq!(manager.cursor_position(), Position::new(0, 2));
}

#[test]
fn test_new_line_splits_line() {
    let mut manager = manager();
    manager.set_text("hello");
    manager.set_cursor_position(Position::new(0, 2));
    manager.insert_new_line_at_cursor();

    assert_eq!(line_texts(&manager), vec!["he", "llo"]);
    assert_eq!(manager.cursor_position(), Position::new(1, 0));
    // The split line was the widest, so the width shrinks to the new widest line.
    assert_eq!(manager.content_size(), Size::new(30.0, 40.0));
}

#[test]
fn test_new_line_at_end_keeps_width() {
    let mut manager = manager();
    manager.set_text("abcdef\nxy");
    manager.set_cursor_position(Position::new(1, 2));
    manager.insert_new_line_at_cursor();

    assert_eq!(line_texts(&manager), vec!["abcdef", "xy", ""]);
    assert_eq!(manager.content_size(), Size::new(60.0, 60.0));
}

#[test]
fn test_carriage_return_inserts_line_break() {
    let mut manager = manager();
    manager.insert_character_at_cursor('a');
    manager.insert_character_at_cursor('\r');
    manager.insert_character_at_cursor('b');

    assert_eq!(manager.get_text(), "a\nb");
    assert_eq!(manager.line_count(), 2);
}

#[test]
fn test_insert_text_normalizes_line_breaks() {
    let mut manager = manager();
    manager.insert_text_at_cursor("one\r\ntwo\nthree");

    assert_eq!(line_texts(&manager), vec!["one", "two", "three"]);
    assert_eq!(manager.get_text(), "one\ntwo\nthree");
    assert_eq!(manager.cursor_position(), Position::new(2, 5));
    assert_eq!(manager.content_size(), Size::new(50.0, 60.0));
}

#[test]
fn test_insert_text_lone_carriage_return_breaks_line() {
    let mut manager = manager();
    manager.insert_text_at_cursor("\r");

    assert_eq!(line_texts(&manager), vec!["", ""]);
    assert_eq!(manager.cursor_position(), Position::new(1, 0));
    assert_eq!(manager.undo_depth(), 1);
    assert_eq!(manager.version(), 1);
    assert!(manager.undo());
    assert_eq!(manager.get_text(), "");

    for (text, expected, cursor) in [
        ("a\rb", vec!["a", "b"], Position::new(1, 1)),
        ("a\r", vec!["a", ""], Position::new(1, 0)),
    ] {
        manager.set_text("");
        let version = manager.version();
        manager.insert_text_at_cursor(text);

        assert_eq!(line_texts(&manager), expected);
        assert!(manager.lines().iter().all(|line| !line.text().contains('\r')));
        assert_eq!(manager.cursor_position(), cursor);
        assert_eq!(manager.undo_depth(), 1);
        assert_eq!(manager.version(), version + 1);
    }

    // Typing and inserting a carriage return agree.
    let mut typed = self::manager();
    typed.insert_character_at_cursor('a');
    typed.insert_character_at_cursor('\r');
    assert_eq!(typed.get_text(), manager.get_text());
}

#[test]
fn test_insert_empty_text_records_nothing() {
    let mut manager = manager();
    manager.insert_text_at_cursor("");

    assert!(!manager.can_undo());
    assert_eq!(manager.version(), 0);
}

#[test]
fn test_insert_text_in_middle_keeps_tail() {
    let mut manager = manager();
    manager.set_text("[]");
    manager.set_cursor_position(Position::new(0, 1));
    manager.insert_text_at_cursor("a\nb");

    assert_eq!(manager.get_text(), "[a\nb]");
    assert_eq!(manager.cursor_position(), Position::new(1, 1));
}

#[test]
fn test_backspace_joins_lines() {
    let mut manager = manager();
    manager.set_text("ab\ncd");
    manager.set_cursor_position(Position::new(1, 0));

    assert!(manager.delete_character_at_left_of_cursor());
    assert_eq!(manager.get_text(), "abcd");
    assert_eq!(manager.cursor_position(), Position::new(0, 2));

    assert!(manager.delete_character_at_left_of_cursor());
    assert_eq!(manager.get_text(), "acd");
    assert_eq!(manager.cursor_position(), Position::new(0, 1));
}

#[test]
fn test_backspace_at_document_start_is_noop() {
    let mut manager = manager();
    manager.set_text("abc");
    let version = manager.version();

    assert!(!manager.delete_character_at_left_of_cursor());
    assert_eq!(manager.get_text(), "abc");
    assert!(!manager.can_undo());
    assert_eq!(manager.version(), version);
}

#[test]
fn test_delete_forward_joins_lines() {
    let mut manager = manager();
    manager.set_text("ab\ncd");
    manager.set_cursor_position(Position::new(0, 2));

    assert!(manager.delete_character_at_right_of_cursor());
    assert_eq!(manager.get_text(), "abcd");
    assert_eq!(manager.cursor_position(), Position::new(0, 2));

    assert!(manager.delete_character_at_right_of_cursor());
    assert_eq!(manager.get_text(), "abd");
    assert_eq!(manager.cursor_position(), Position::new(0, 2));
}

#[test]
fn test_delete_forward_at_document_end_is_noop() {
    let mut manager = manager();
    manager.set_text("ab\ncd");
    manager.set_cursor_position(Position::new(1, 2));

    assert!(!manager.delete_character_at_right_of_cursor());
    assert_eq!(manager.get_text(), "ab\ncd");
}

#[test]
fn test_delete_range_across_lines() {
    let mut manager = manager();
    manager.set_text("A\nBCDE\nFGHI\nJKLM\nNOP");
    manager.set_cursor_position(Position::new(4, 3));

    // Endpoints in reverse order are accepted.
    let removed = manager.delete_characters_in_range(Position::new(3, 2), Position::new(1, 2));

    assert_eq!(removed, "DE\nFGHI\nJK");
    assert_eq!(line_texts(&manager), vec!["A", "BCLM", "NOP"]);
    // The cursor pointed past the end of the document and is clamped back in.
    assert_eq!(manager.cursor_position(), Position::new(2, 3));
    assert_eq!(manager.content_size(), Size::new(40.0, 60.0));
}

#[test]
fn test_delete_empty_range_is_noop() {
    let mut manager = manager();
    manager.set_text("abc");

    let removed = manager.delete_characters_in_range(Position::new(0, 1), Position::new(0, 1));
    assert!(removed.is_empty());
    assert!(!manager.can_undo());
}

#[test]
fn test_delete_whole_document_leaves_one_line() {
    let mut manager = manager();
    manager.set_text("a\nb\nc");

    let removed = manager.delete_characters_in_range(Position::new(0, 0), Position::new(9, 9));
    assert_eq!(removed, "a\nb\nc");
    assert_eq!(manager.line_count(), 1);
    assert_eq!(manager.get_text(), "");
    assert!(!manager.has_text());
}

#[test]
fn test_delete_selected_characters() {
    let mut manager = manager();
    manager.set_text("hello world");
    manager.set_selection(Position::new(0, 11), Position::new(0, 6));

    assert_eq!(manager.delete_selected_characters(), "world");
    assert_eq!(manager.get_text(), "hello ");
    assert_eq!(manager.cursor_position(), Position::new(0, 6));
    assert!(!manager.has_selection());

    assert_eq!(manager.delete_selected_characters(), "");
}

#[test]
fn test_typing_collapses_selection() {
    let mut manager = manager();
    manager.set_text("abc");
    manager.set_selection(Position::new(0, 0), Position::new(0, 2));
    manager.insert_character_at_cursor('x');

    assert_eq!(manager.get_text(), "abxc");
    assert!(!manager.has_selection());
}

#[test]
fn test_set_text_resets_cursor_and_history() {
    let mut manager = manager();
    manager.insert_text_at_cursor("draft");
    manager.set_text("final\ntext\n");

    assert_eq!(manager.line_count(), 3);
    assert_eq!(manager.line(2).text(), "");
    assert_eq!(manager.cursor_position(), Position::new(0, 0));
    assert!(!manager.can_undo());
}

#[test]
fn test_set_text_round_trip() {
    let mut manager = manager();
    for text in ["", "one", "a\nb", "trailing\n", "\n\n", "tab\there\nx"] {
        manager.set_text(text);
        assert_eq!(manager.get_text(), text);
        assert_eq!(manager.line_count(), text.split('\n').count());
    }

    manager.set_text("dos\r\nline\r\n");
    assert_eq!(manager.get_text(), "dos\nline\n");
}

#[test]
fn test_reset_returns_to_initial_state() {
    let mut manager = manager();
    manager.set_text("a\nb");
    manager.set_cursor_position(Position::new(1, 1));
    manager.reset();

    assert_eq!(manager.line_count(), 1);
    assert_eq!(manager.get_text(), "");
    assert_eq!(manager.cursor_position(), Position::new(0, 0));
    assert!(!manager.can_undo());
}

#[test]
fn test_text_is_line_join() {
    let mut manager = manager();
    manager.insert_new_line_at_cursor();
    assert!(manager.has_text());
    assert_eq!(manager.get_text(), "\n");

    manager.insert_text_at_cursor("x\ny");
    let joined = line_texts(&manager).join("\n");
    assert_eq!(manager.get_text(), joined);
}

#[test]
fn test_tab_width_changes_line_width() {
    let mut manager = manager();
    manager.set_text("\tx");
    assert_eq!(manager.line(0).width(), 50.0);

    manager.set_tab_width(2);
    assert_eq!(manager.line(0).width(), 30.0);
    assert_eq!(manager.content_size().width, 30.0);

    // Zero is clamped to one space.
    manager.set_tab_width(0);
    assert_eq!(manager.tab_width(), 1);
    assert_eq!(manager.line(0).width(), 20.0);
}

#[test]
fn test_config_tab_width_is_used() {
    let manager = TextManager::with_config(
        Rc::new(MonospaceMetrics::new(10.0, 20.0)),
        FontId::default(),
        TextFieldConfig::default().with_tab_width(8),
    );
    assert_eq!(manager.tab_width(), 8);
}

#[test]
fn test_change_notifications() {
    let mut manager = manager();
    let causes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&causes);
    manager.on_text_changed(move |change| {
        assert_eq!(change.new_version, change.old_version + 1);
        sink.borrow_mut().push(change.cause);
    });

    manager.insert_character_at_cursor('a');
    manager.delete_character_at_left_of_cursor();
    manager.undo();
    manager.redo();
    manager.set_text("x");
    manager.reset();
    // Cursor movement is not a content change.
    manager.move_cursor_right();

    assert_eq!(
        *causes.borrow(),
        vec![
            ChangeCause::Insert,
            ChangeCause::Delete,
            ChangeCause::Undo,
            ChangeCause::Redo,
            ChangeCause::Replace,
            ChangeCause::Reset,
        ]
    );
    assert_eq!(manager.version(), 6);
}

#[test]
fn test_wide_characters() {
    let mut manager = manager();
    manager.insert_text_at_cursor("你好a");

    assert_eq!(manager.line(0).char_count(), 3);
    assert_eq!(manager.line(0).width(), 50.0);
    assert_eq!(manager.cursor_position(), Position::new(0, 3));

    assert!(manager.delete_character_at_left_of_cursor());
    assert!(manager.delete_character_at_left_of_cursor());
    assert_eq!(manager.get_text(), "你");
}
