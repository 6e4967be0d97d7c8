use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use text_field_core::{FontId, MonospaceMetrics, Motion, Position, TextManager};

const MOTIONS: [Motion; 10] = [
    Motion::Left,
    Motion::Right,
    Motion::Up,
    Motion::Down,
    Motion::WordLeft,
    Motion::WordRight,
    Motion::LineStart,
    Motion::LineEnd,
    Motion::DocumentStart,
    Motion::DocumentEnd,
];

const ALPHABET: [char; 8] = ['a', 'b', 'z', ' ', '_', '\t', 'é', '你'];

fn manager() -> TextManager {
    TextManager::new(
        Rc::new(MonospaceMetrics::new(10.0, 20.0)),
        FontId::default(),
    )
}

fn random_position(rng: &mut StdRng, manager: &TextManager) -> Position {
    let line = rng.gen_range(0..manager.line_count());
    let column = rng.gen_range(0..=manager.line(line).char_count());
    Position::new(line, column)
}

fn random_edit(rng: &mut StdRng, manager: &mut TextManager) {
    match rng.gen_range(0..10) {
        0..=3 => {
            let ch = ALPHABET[rng.gen_range(0..ALPHABET.len())];
            manager.insert_character_at_cursor(ch);
        }
        4 => manager.insert_new_line_at_cursor(),
        5 => {
            manager.delete_character_at_left_of_cursor();
        }
        6 => {
            manager.delete_character_at_right_of_cursor();
        }
        7 => {
            let a = random_position(rng, manager);
            let b = random_position(rng, manager);
            manager.delete_characters_in_range(a, b);
        }
        8 => manager.insert_text_at_cursor("x\ny z"),
        _ => {
            let motion = MOTIONS[rng.gen_range(0..MOTIONS.len())];
            manager.move_cursor(motion);
        }
    }
}

fn assert_consistent(manager: &TextManager) {
    let text = manager.get_text();
    let joined = manager
        .lines()
        .iter()
        .map(|line| line.text())
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(text, joined);
    assert_eq!(manager.line_count(), text.split('\n').count());

    let cursor = manager.cursor_position();
    assert!(cursor.line < manager.line_count());
    assert!(cursor.column <= manager.line(cursor.line).char_count());

    let size = manager.content_size();
    assert_eq!(size.width, manager.lines().max_width());
    assert_eq!(size.height, manager.line_count() as f32 * 20.0);
}

#[test]
fn test_fresh_manager_properties() {
    let manager = manager();
    assert_eq!(manager.line_count(), 1);
    assert_eq!(manager.get_text(), "");
    assert_consistent(&manager);
}

#[test]
fn test_random_edits_keep_state_consistent() {
    let mut rng = StdRng::seed_from_u64(0x7e57_f1e1d);
    let mut manager = manager();

    for _ in 0..500 {
        random_edit(&mut rng, &mut manager);
        assert_consistent(&manager);
    }
}

#[test]
fn test_random_edits_undo_to_start_and_redo_to_end() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut manager = manager();
        manager.set_text("seed text\nsecond line");

        for _ in 0..200 {
            random_edit(&mut rng, &mut manager);
        }
        let edited = manager.get_text().to_string();

        while manager.undo() {
            assert_consistent(&manager);
        }
        assert_eq!(manager.get_text(), "seed text\nsecond line", "seed {seed}");
        assert!(!manager.is_modified());

        while manager.redo() {
            assert_consistent(&manager);
        }
        assert_eq!(manager.get_text(), edited, "seed {seed}");
    }
}
