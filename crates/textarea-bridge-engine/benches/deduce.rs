use criterion::{Criterion, criterion_group, criterion_main};
use textarea_bridge_engine::{
    PagedScreenReaderStrategy, Position, Selection, TextAreaState, TextModel, deduce_input,
};

fn generate_lines(count: usize) -> String {
    (1..=count)
        .map(|n| format!("line {n}: the quick brown fox jumps over the lazy dog"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_deduce_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("deduce_input");

    let page = generate_lines(10);
    let caret = page.encode_utf16().count() / 2;
    let previous = TextAreaState::new(page.clone(), caret, caret);
    let mut typed = page.clone();
    typed.insert(page.char_indices().nth(caret).map_or(page.len(), |(i, _)| i), 'x');
    let current = TextAreaState::new(typed, caret + 1, caret + 1);

    group.bench_function("type_in_page", |b| {
        b.iter(|| std::hint::black_box(deduce_input(&previous, &current)));
    });

    let emoji = TextAreaState::new(format!("📅{page}"), caret + 2, caret + 2);
    group.bench_function("stray_emoji_in_page", |b| {
        b.iter(|| std::hint::black_box(deduce_input(&previous, &emoji)));
    });

    group.finish();
}

fn bench_paging(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen_reader");
    group.sample_size(10);

    let model = TextModel::new(&generate_lines(10_000));
    let pager = PagedScreenReaderStrategy::default();
    let selection = Selection::collapsed(Position::new(5_000, 3));

    group.bench_function("page_large_document", |b| {
        b.iter(|| {
            std::hint::black_box(pager.from_editor_selection(
                &TextAreaState::EMPTY,
                &model,
                selection,
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_deduce_input, bench_paging);
criterion_main!(benches);
