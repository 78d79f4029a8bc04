//! Record-pair splitting wired through two editor surfaces, the way a
//! header-row composite uses it.

use inline_editor::{
    EditorOptions, EditorSurface, Key, MemoryClipboard, SelectionRange, SeparatorPolicy, Tokenizer,
};
use inline_editor_tokenizers::RecordPairTokenizer;
use pretty_assertions::assert_eq;

#[test]
fn test_split_moves_tail_and_caret_to_value_field() {
    let tokenizer = RecordPairTokenizer::new(':');
    let mut clipboard = MemoryClipboard::new();

    let mut name = EditorSurface::new(Box::new(tokenizer), EditorOptions::default());
    let mut value = EditorSurface::new(
        Box::new(RecordPairTokenizer::new(':')),
        EditorOptions::default(),
    );

    // The user had "ContentType" and types ':' in the middle after "Content".
    name.set_text("ContentType");
    name.set_caret(7);
    name.handle_key(Key::Char(':'), &mut clipboard);
    assert_eq!(name.text(), "Content:Type");

    // The composite checks for a split after every keystroke.
    let split = tokenizer
        .detect_split(name.text(), name.selection().end)
        .expect("separator after non-empty name");
    assert_eq!(split.name, "Content");
    assert_eq!(split.value, "Type");

    name.set_text(&split.name);
    value.set_text(&split.value);
    value.set_caret(split.value_caret);

    assert_eq!(name.text(), "Content");
    assert_eq!(value.text(), "Type");
    assert_eq!(value.selection(), SelectionRange::collapsed(0));
}

#[test]
fn test_separator_without_name_content_does_not_split() {
    let tokenizer = RecordPairTokenizer::new('=');
    let mut clipboard = MemoryClipboard::new();
    let mut name = EditorSurface::new(Box::new(tokenizer), EditorOptions::default());

    name.handle_key(Key::Char('='), &mut clipboard);
    assert_eq!(name.text(), "=");
    assert_eq!(tokenizer.detect_split(name.text(), name.selection().end), None);
}

#[test]
fn test_record_pair_lines_are_contiguous() {
    let tokenizer = RecordPairTokenizer::new('=');
    assert_eq!(tokenizer.separator_policy(), SeparatorPolicy::Contiguous);
    let tokenization = tokenizer.tokenize("name");
    assert_eq!(tokenization.source_text(SeparatorPolicy::Contiguous), "name");
}
