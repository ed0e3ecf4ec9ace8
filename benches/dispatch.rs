//! Benchmarks for the key dispatch hot path
//!
//! Run with: cargo bench dispatch

use helix_keys::keymap::{
    default_bindings, default_keymap_toml, parse_keymap_toml, CommandRegistry, Dispatcher,
    KeyCombo, KeyEvent, NoOverlay,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn events(specs: &str) -> Vec<KeyEvent> {
    specs
        .split_whitespace()
        .filter_map(|spec| spec.parse::<KeyCombo>().ok())
        .map(KeyEvent::from)
        .collect()
}

// ============================================================================
// Config loading
// ============================================================================

#[divan::bench]
fn parse_default_keymap() {
    divan::black_box(parse_keymap_toml(default_keymap_toml()).ok());
}

#[divan::bench(args = ["j", "C-d", "A-;", "space", "C-w"])]
fn parse_key_spec(spec: &str) {
    divan::black_box(spec.parse::<KeyCombo>().ok());
}

// ============================================================================
// Dispatch
// ============================================================================

#[divan::bench(args = [
    "j",
    "g g",
    "C-w n v",
    "1 2 j",
    "space w v",
])]
fn dispatch_sequence(bencher: divan::Bencher, keys: &str) {
    let input = events(keys);
    let mut dispatcher: Dispatcher<()> =
        Dispatcher::new(default_bindings(), CommandRegistry::new(), NoOverlay);

    bencher.bench_local(|| {
        for event in &input {
            divan::black_box(dispatcher.key_down(&mut (), *event));
        }
    });
}

#[divan::bench(args = [100, 1_000])]
fn dispatch_mixed_stream(bencher: divan::Bencher, repeats: usize) {
    let input = events(&"j k 3 w g e C-w v x q i esc ".repeat(repeats));
    let mut dispatcher: Dispatcher<()> =
        Dispatcher::new(default_bindings(), CommandRegistry::new(), NoOverlay);

    bencher.bench_local(|| {
        for event in &input {
            divan::black_box(dispatcher.key_down(&mut (), *event));
        }
    });
}

#[divan::bench]
fn key_typed_query(bencher: divan::Bencher) {
    let dispatcher: Dispatcher<()> =
        Dispatcher::new(default_bindings(), CommandRegistry::new(), NoOverlay);

    bencher.bench_local(|| {
        for c in ['j', 'k', 'z', 'Q', '7'] {
            divan::black_box(dispatcher.key_typed(c, Default::default()));
        }
    });
}
