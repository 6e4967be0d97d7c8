//! Text field session example
//!
//! Drives a `TextManager` through typing, selection, clipboard and undo the way a host's input
//! handler would, and prints the geometry it would upload. Set `RUST_LOG=text_field_core=trace`
//! to see the engine's own logging.

use std::rc::Rc;
use text_field_core::{
    Command, CursorCommand, EditCommand, FontId, MemoryClipboard, Mesh, MonospaceMetrics, Motion,
    Position, RenderSink, Size, TextManager,
};
use tracing_subscriber::EnvFilter;

struct PrintSink;

impl RenderSink for PrintSink {
    fn submit_selection(&mut self, mesh: &Mesh) {
        println!(
            "  selection: {} quads, {} vertex bytes",
            mesh.quad_count(),
            mesh.vertex_bytes().len()
        );
    }

    fn submit_glyphs(&mut self, mesh: &Mesh) {
        println!(
            "  glyphs: {} quads, {} index bytes",
            mesh.quad_count(),
            mesh.index_bytes().len()
        );
    }
}

fn main() -> text_field_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "text_field_core=debug".into()),
        )
        .with_target(false)
        .init();

    let mut manager = TextManager::new(Rc::new(MonospaceMetrics::default()), FontId::default());
    manager.set_container_size(Size::new(320.0, 96.0));
    manager.set_clipboard(Box::new(MemoryClipboard::new()));
    manager.on_text_changed(|change| {
        println!("  change {:?}: v{} -> v{}", change.cause, change.old_version, change.new_version);
    });

    println!("1. Typing:");
    for ch in "Hello, world".chars() {
        manager.execute(Command::Edit(EditCommand::Type(ch)))?;
    }
    manager.execute(Command::Edit(EditCommand::NewLine))?;
    manager.execute(Command::Edit(EditCommand::InsertText("second line".to_string())))?;
    print_state(&manager);

    println!("\n2. Select the first word and copy it:");
    manager.execute_batch([
        Command::Cursor(CursorCommand::MoveTo {
            position: Position::new(0, 0),
            select: false,
        }),
        Command::Cursor(CursorCommand::Move {
            motion: Motion::WordRight,
            select: true,
        }),
        Command::Edit(EditCommand::Copy),
    ])?;
    println!("  selected {:?}", manager.selected_text());
    manager.render(&mut PrintSink);

    println!("\n3. Paste at the end:");
    manager.execute_batch([
        Command::Cursor(CursorCommand::Move {
            motion: Motion::DocumentEnd,
            select: false,
        }),
        Command::Edit(EditCommand::Paste),
    ])?;
    print_state(&manager);

    println!("\n4. Undo everything:");
    while manager.undo() {}
    print_state(&manager);

    Ok(())
}

fn print_state(manager: &TextManager) {
    println!("  text: {:?}", manager.get_text());
    println!(
        "  lines: {}, cursor: {:?}, content: {:?}",
        manager.line_count(),
        manager.cursor_position(),
        manager.content_size()
    );
    println!(
        "  undo: {}, redo: {}",
        manager.undo_depth(),
        manager.redo_depth()
    );
}
