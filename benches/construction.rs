//! Benchmarks for lexfa automaton construction
//!
//! Parsing and subset construction measured separately, over patterns that
//! stress different parts of the construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// A typical scanner rule set.
const LEXER_RULES: &[&str] = &[
    "if IF",
    "else ELSE",
    "while WHILE",
    "[a-zA-Z_][a-zA-Z0-9_]* IDENT",
    "[0-9]+ INT",
    "[0-9]+.[0-9]* FLOAT",
    "(=|<|>|!)=? OP",
    "\"[^\"]*\" STRING",
];

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_lexer_rules", |b| {
        b.iter(|| {
            for rule in LEXER_RULES {
                black_box(lexfa::build_nfa(black_box(rule)).unwrap());
            }
        })
    });
}

fn bench_subset_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("subset_construction");

    let cases = [
        ("literal", "abcdefghijklmnop"),
        ("classic_abb", "(a|b)*abb"),
        ("identifier", "[a-zA-Z_][a-zA-Z0-9_]*"),
        ("dot_star", "(.*)*x"),
    ];
    for (name, pattern) in cases {
        let nfa = lexfa::build_nfa(pattern).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &nfa, |b, nfa| {
            b.iter(|| lexfa::build_dfa(black_box(nfa)))
        });
    }
    group.finish();
}

// (a|b)*a(a|b)^(n-1): the DFA must remember the last n bytes, so it has
// 2^n states.
fn bench_exponential_blowup(c: &mut Criterion) {
    let mut group = c.benchmark_group("nth_from_last");

    for n in [2usize, 4, 6, 8] {
        let pattern = format!("(a|b)*a{}", "(a|b)".repeat(n - 1));
        let nfa = lexfa::build_nfa(&pattern).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &nfa, |b, nfa| {
            b.iter(|| lexfa::build_dfa(black_box(nfa)))
        });
    }
    group.finish();
}

fn bench_accepts(c: &mut Criterion) {
    let nfa = lexfa::build_nfa("[a-zA-Z_][a-zA-Z0-9_]* IDENT").unwrap();
    let dfa = lexfa::build_dfa(&nfa);
    let input = b"some_fairly_long_identifier_name_42";

    c.bench_function("dfa_accepts", |b| {
        b.iter(|| dfa.accepts(black_box(input)))
    });
    c.bench_function("nfa_simulation", |b| {
        b.iter(|| lexfa::traverse_nfa(&nfa, black_box(input)))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_subset_construction,
    bench_exponential_blowup,
    // Traversal is only used for verification, measured for comparison
    bench_accepts,
);
criterion_main!(benches);
