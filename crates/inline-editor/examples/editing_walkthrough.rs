//! Editing walkthrough
//!
//! Demonstrates driving an `EditorSurface` with key events and observing its
//! signals, the way an embedding UI would.

use inline_editor::{
    Clipboard, EditorOptions, EditorSurface, Key, MemoryClipboard, PlainTokenizer, SurfaceSignal,
};

fn main() {
    // RUST_LOG=trace surfaces the kernel's tracing events alongside the
    // printed walkthrough.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut surface = EditorSurface::new(
        Box::new(PlainTokenizer),
        EditorOptions {
            placeholder: "Type something".to_string(),
            ..EditorOptions::default()
        },
    );
    let mut clipboard = MemoryClipboard::new();

    surface.subscribe(|signal| match signal {
        SurfaceSignal::InputChanged => println!("  [signal] input changed"),
        SurfaceSignal::ChangeCommitted { text } => {
            println!("  [signal] change committed: {text:?}")
        }
        SurfaceSignal::FocusLeaveRequested(direction) => {
            println!("  [signal] focus leave requested: {direction:?}")
        }
        SurfaceSignal::SubmitRequested => println!("  [signal] submit requested"),
    });

    println!("placeholder shown: {}", surface.is_placeholder_shown());

    println!("\nfocus and type 'hello':");
    surface.focus_gained();
    for c in "hello".chars() {
        surface.handle_key(Key::Char(c), &mut clipboard);
    }
    surface.poll_signals();
    println!("  text: {:?}", surface.text());

    println!("\nselect 'ell' and cut:");
    surface.set_selection(inline_editor::SelectionRange::new(1, 4));
    surface.handle_key(Key::Cut, &mut clipboard);
    surface.poll_signals();
    println!("  text: {:?}", surface.text());
    println!("  clipboard: {:?}", clipboard.get_text());

    println!("\nArrowLeft at the start asks the parent to move focus:");
    surface.set_caret(0);
    surface.handle_key(Key::Left, &mut clipboard);

    println!("\nfocus leaves; the edit commits:");
    surface.focus_lost();

    println!("\na new focus session, a stray edit, and a single-level undo:");
    surface.focus_gained();
    surface.caret_to_end();
    surface.handle_key(Key::Char('x'), &mut clipboard);
    println!("  text after edit: {:?}", surface.text());
    surface.handle_key(Key::Undo, &mut clipboard);
    surface.poll_signals();
    println!("  text after undo: {:?}", surface.text());
}
