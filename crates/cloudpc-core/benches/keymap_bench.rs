//! Criterion benchmarks for key translation.
//!
//! Every `key-down` envelope goes through [`translate`] on the dispatch path,
//! so a lookup must stay well below the latency a typist would notice.
//!
//! Run with:
//! ```bash
//! cargo bench --package cloudpc-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cloudpc_core::keymap::{translate, ModifierSet, VirtualKeyCode};

/// Key names a guest commonly sends, mixing text, aliases and named keys.
const BENCH_KEYS: &[&str] = &[
    "a", "Z", "1", " ", "Enter", "Backspace", "Tab", "Escape", "ArrowLeft", "ArrowRight",
    "ArrowUp", "ArrowDown", "F1", "F12", "Delete", "Home", "End", "Shift", "Control", "Alt",
];

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_translate");
    let ctrl = ModifierSet::new(false, true, false);

    group.bench_function("text_entry_single", |b| {
        b.iter(|| translate(black_box("a"), black_box(ModifierSet::default())))
    });

    group.bench_function("aliased_named_key", |b| {
        b.iter(|| translate(black_box("ArrowDown"), black_box(ModifierSet::default())))
    });

    group.bench_function("ctrl_letter", |b| {
        b.iter(|| translate(black_box("c"), black_box(ctrl)))
    });

    group.bench_function("unknown_key", |b| {
        b.iter(|| translate(black_box("NotAKey"), black_box(ModifierSet::default())))
    });

    group.bench_function("batch_20", |b| {
        b.iter(|| {
            BENCH_KEYS
                .iter()
                .map(|key| translate(black_box(key), black_box(ctrl)))
                .filter(Result::is_ok)
                .count()
        })
    });

    group.finish();
}

fn bench_name_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_virtual_key");

    // Best and worst positions in the name table.
    group.bench_function("from_name_first", |b| {
        b.iter(|| VirtualKeyCode::from_name(black_box("LBUTTON")))
    });
    group.bench_function("from_name_last", |b| {
        b.iter(|| VirtualKeyCode::from_name(black_box("OEM_CLEAR")))
    });
    group.bench_function("from_name_miss", |b| {
        b.iter(|| VirtualKeyCode::from_name(black_box("PAGEUP")))
    });

    group.finish();
}

criterion_group!(benches, bench_translate, bench_name_lookup);
criterion_main!(benches);
