//! Layout pass benchmarks.
//!
//! Measures the three costs the engine separates: a full range rebuild, a
//! pass over cached ranges, and a full frame render through the TUI.
//!
//! Run with: cargo bench --bench layout_benchmark

use chatstack::source::{Conversation, DemoSource};
use chatstack::state::AppState;
use chatstack::view::TuiApp;
use chatstack::view_state::{
    DepthPosition, DepthStackLayout, ItemSet, LayoutParams, LayoutSettings, ScrollPosition,
};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn params() -> LayoutParams {
    LayoutParams::new(LayoutSettings::default()).expect("default settings are valid")
}

/// A generated conversation of `count` messages.
fn conversation(count: usize) -> Conversation {
    Conversation::from_messages(DemoSource::new(count).drain_messages())
}

/// Benchmark rebuilding focus positions and z-ranges from scratch.
fn benchmark_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    for size in SIZES {
        let items = ItemSet::from_source(&conversation(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            let mut layout = DepthStackLayout::new(params());
            b.iter(|| {
                layout.invalidate();
                black_box(layout.rebuild(items).len())
            });
        });
    }
    group.finish();
}

/// Benchmark a pass over cached ranges at the middle of the stack.
fn benchmark_cached_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_pass");
    for size in SIZES {
        let items = ItemSet::from_source(&conversation(size));
        let mut layout = DepthStackLayout::new(params());
        layout.rebuild(&items);
        let middle = DepthPosition::new(layout.max_depth().get() / 2.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| black_box(layout.compute_layout(middle, items)));
        });
    }
    group.finish();
}

/// Benchmark one scroll step plus a full frame render.
fn benchmark_scroll_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_frame");
    for size in [100, 1_000] {
        let baseline = AppState::new(conversation(size), params());

        group.bench_with_input(BenchmarkId::from_parameter(size), &baseline, |b, baseline| {
            b.iter_batched(
                || {
                    let terminal = Terminal::new(TestBackend::new(200, 60)).expect("test backend");
                    TuiApp::with_terminal(terminal, baseline.clone(), "bench".to_string())
                },
                |mut app| {
                    app.handle_key(crossterm::event::KeyEvent::new(
                        crossterm::event::KeyCode::Char('k'),
                        crossterm::event::KeyModifiers::NONE,
                    ));
                    app.draw().expect("draw");
                    black_box(app.app_state().depth())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// Benchmark jumping to the oldest item, which re-resolves the target.
fn benchmark_jump(c: &mut Criterion) {
    let baseline = AppState::new(conversation(1_000), params());
    c.bench_function("jump_to_oldest", |b| {
        b.iter_batched(
            || baseline.clone(),
            |mut state| {
                state.jump_to(ScrollPosition::Oldest);
                black_box(state.layout_pass().len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_rebuild,
    benchmark_cached_pass,
    benchmark_scroll_frame,
    benchmark_jump
);
criterion_main!(benches);
