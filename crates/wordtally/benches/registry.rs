#![allow(missing_docs)]

use std::sync::LazyLock;

use divan::{Bencher, black_box};
use wordtally::{
    TokenRegistry,
    vocab::io::{LoadOptions, load_registry_from_reader, save_registry_to_writer},
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn words() -> Vec<String> {
    let paragraph = "The quick brown fox jumps over the lazy dog. \
        It's a beautiful day, and I'll be taking my 3 dogs for a walk. \
        Don't forget: the temperature is 72 degrees! \
        In 2024, artificial intelligence continued to advance rapidly.";
    paragraph
        .split_whitespace()
        .cycle()
        .take(10_000)
        .enumerate()
        .map(|(i, w)| format!("{w}{}", i % 500))
        .collect()
}

static WORDS: LazyLock<Vec<String>> = LazyLock::new(words);

static REGISTRY: LazyLock<TokenRegistry<u32>> = LazyLock::new(|| {
    let mut registry = TokenRegistry::new();
    for word in WORDS.iter() {
        registry.add_token(word).unwrap();
    }
    registry
});

static SAVED: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let mut buf = Vec::new();
    save_registry_to_writer(&*REGISTRY, &mut buf).unwrap();
    buf
});

#[divan::bench]
fn add_tokens(bencher: Bencher) {
    let words = &*WORDS;
    bencher.bench(|| {
        let mut registry: TokenRegistry<u32> = TokenRegistry::new();
        for word in words {
            black_box(registry.add_token(word).unwrap());
        }
        registry
    });
}

#[divan::bench]
fn lookup_tokens(bencher: Bencher) {
    let words = &*WORDS;
    let registry = &*REGISTRY;
    bencher.bench(|| {
        for word in words {
            black_box(registry.lookup_token(word).unwrap());
        }
    });
}

#[divan::bench]
fn lookup_ids(bencher: Bencher) {
    let registry = &*REGISTRY;
    bencher.bench(|| {
        for id in 0..registry.len() {
            black_box(registry.lookup_id(id));
        }
    });
}

#[divan::bench]
fn save(bencher: Bencher) {
    let registry = &*REGISTRY;
    bencher.bench(|| {
        let mut buf = Vec::with_capacity(SAVED.len());
        save_registry_to_writer(registry, &mut buf).unwrap();
        buf
    });
}

#[divan::bench]
fn load(bencher: Bencher) {
    let saved = SAVED.as_slice();
    bencher.bench(|| {
        let mut registry: TokenRegistry<u32> = TokenRegistry::new();
        load_registry_from_reader(&mut registry, saved, LoadOptions::default()).unwrap();
        registry
    });
}
