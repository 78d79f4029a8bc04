use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use inline_editor::{
    EditOp, EditorOptions, EditorSurface, Key, MemoryClipboard, PlainTokenizer, SelectionRange,
    SeparatorPolicy, TextBufferState, Tokenizer, apply_edit, to_caret_position,
};
use rand::prelude::*;

fn long_field_text(word_count: usize) -> String {
    let mut out = String::with_capacity(word_count * 8);
    for i in 0..word_count {
        out.push_str(&format!("word{i} "));
    }
    out.pop();
    out
}

fn bench_full_retokenize(c: &mut Criterion) {
    let text = long_field_text(2_000);
    c.bench_function("retokenize/2k_words", |b| {
        b.iter(|| {
            let tokenization = PlainTokenizer.tokenize(black_box(&text));
            black_box(tokenization.lines.len());
        })
    });
}

fn bench_random_edits(c: &mut Criterion) {
    let text = long_field_text(500);
    let char_len = text.chars().count();
    let mut rng = StdRng::seed_from_u64(7);
    let offsets: Vec<usize> = (0..100).map(|_| rng.gen_range(0..=char_len)).collect();

    c.bench_function("processor/100_random_inserts", |b| {
        b.iter_batched(
            || TextBufferState::new(text.clone()),
            |mut state| {
                let mut clipboard = MemoryClipboard::new();
                for &offset in &offsets {
                    state = TextBufferState::with_selection(
                        state.text().to_string(),
                        SelectionRange::collapsed(offset.min(state.char_len())),
                    )
                    .unwrap();
                    state = apply_edit(&state, &EditOp::Insert("x".to_string()), &mut clipboard)
                        .unwrap();
                }
                black_box(state.char_len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_typing_through_surface(c: &mut Criterion) {
    c.bench_function("surface/200_keystrokes", |b| {
        b.iter_batched(
            || {
                let mut surface =
                    EditorSurface::new(Box::new(PlainTokenizer), EditorOptions::default());
                surface.focus_gained();
                surface
            },
            |mut surface| {
                let mut clipboard = MemoryClipboard::new();
                for _ in 0..200 {
                    surface.handle_key(Key::Char('a'), &mut clipboard);
                }
                black_box(surface.text().len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_caret_mapping(c: &mut Criterion) {
    let text = (0..200).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let lines = PlainTokenizer.tokenize(&text).lines;
    let char_len = text.chars().count();

    c.bench_function("caret_mapping/full_sweep", |b| {
        b.iter(|| {
            for offset in (0..char_len).step_by(17) {
                black_box(to_caret_position(
                    &lines,
                    offset,
                    SeparatorPolicy::NewlineSeparated,
                ));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_full_retokenize,
    bench_random_edits,
    bench_typing_through_surface,
    bench_caret_mapping
);
criterion_main!(benches);
