//! Benchmarks for the packrat runtime.
//!
//! Two things are measured:
//! - the memo cache's effect on a classic pathological ordered-choice
//!   grammar, where every alternative shares an identical sub-rule call
//!   at the same position — without memoization this is exponential in
//!   the nesting depth, with it, linear;
//! - parsing realistic source snippets through the fixture grammar, to
//!   track overall throughput.
//!
//! Run with: `cargo bench --package pegen-parser`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pegen_ast::ast::Arena;
use pegen_parser::config::ParserConfig;
use pegen_parser::diagnostics::ParseError;
use pegen_parser::engine::keyword::KeywordTable;
use pegen_parser::engine::state::ParserState;
use pegen_parser::engine::token::{TokKind, Token, TokenSource};
use pegen_source::types::{FileID, Position, SourceSpan};

fn dummy_span() -> pegen_source::types::Span {
    let pos = Position::new(1, 1, 0);
    SourceSpan::new(pos, pos, FileID::new(1)).into()
}

/// Never actually consulted by the benchmarked rules below (they never
/// call `expect_token`/`advance`), but `ParserState` is generic over a
/// `TokenSource` regardless.
struct NeverSource;

impl TokenSource for NeverSource {
    type Error = ParseError;

    fn next_token(&mut self) -> Result<Token, Self::Error> {
        Ok(Token::new(TokKind::EndMarker, String::new(), dummy_span()))
    }
}

fn make_state() -> ParserState<NeverSource, Arena> {
    ParserState::new(
        NeverSource,
        KeywordTable::new(std::iter::empty::<&str>()),
        Arena::new(),
        ParserConfig::default(),
        "<bench>",
        FileID::new(0),
        "bench",
    )
}

/// A rule whose every leaf fails, explored through two alternatives that
/// both invoke the identical sub-rule at the same position — the
/// textbook shape that makes an unmemoized packrat parser exponential:
/// `T(n) = 2 * T(n-1) + O(1)`.
fn exp_blowup_no_memo(p: &mut ParserState<NeverSource, Arena>, depth: u32) -> bool {
    if depth == 0 {
        return false;
    }
    if exp_blowup_no_memo(p, depth - 1) {
        return true;
    }
    exp_blowup_no_memo(p, depth - 1)
}

/// Same grammar, but each depth level memoizes its (always-failing)
/// result against the current mark before returning — turning the
/// second, identical recursive call at that depth into a cache hit.
/// The mark never advances in this synthetic rule (it never consumes a
/// token), which is exactly the situation a real grammar's failing
/// alternatives are in too: memoization is keyed on position, and a
/// rule that fails never moves the cursor.
fn exp_blowup_memo(p: &mut ParserState<NeverSource, Arena>, depth: u32) -> bool {
    let rule_id = depth;
    if p.is_memoized(rule_id) {
        let (result, _end_mark) = p.get_memo::<bool>(rule_id).expect("checked is_memoized above");
        return result;
    }
    let result = if depth == 0 { false } else { exp_blowup_memo(p, depth - 1) || exp_blowup_memo(p, depth - 1) };
    p.insert_memo(rule_id, result, p.mark());
    result
}

fn bench_memo_cache_effect(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("memo_cache_effect");

    for depth in [10u32, 16, 20] {
        group.bench_with_input(BenchmarkId::new("without_memo", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut p = make_state();
                black_box(exp_blowup_no_memo(&mut p, black_box(depth)))
            });
        });
        group.bench_with_input(BenchmarkId::new("with_memo", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut p = make_state();
                black_box(exp_blowup_memo(&mut p, black_box(depth)))
            });
        });
    }

    group.finish();
}

const SIMPLE_FUNCTION: &str = "def add(a, b):\n    a + b\n";

const FULL_PARAMETER_KINDS: &str = "def f(a, b=1, /, c, d=2, *args, e, f=3, **kw):\n    pass\n";

const F_STRING_HEAVY: &str = r#"
x = 1
y = f"{x!r:>{x}}"
z = f"{x=}"
msg = f"value is {x + x}"
"#;

const RELATIVE_IMPORTS: &str = "from . import a\nfrom .. import b\nfrom ...pkg import c as d\n";

const MIXED_MODULE: &str = r#"
from .pkg import a, b as c
x: int = 1
y = x + 1

def compute(a, b=1, /, c=2, *args, d, e=3, **kw):
    pass

z = f"{x=} and {y!r}"
"#;

fn bench_simple_function(crit: &mut Criterion) {
    let _ = crit.bench_function("parse_simple_function", |bencher| {
        bencher.iter(|| pegen_demos::parse_module(black_box(SIMPLE_FUNCTION), "<bench>"));
    });
}

fn bench_full_parameter_kinds(crit: &mut Criterion) {
    let _ = crit.bench_function("parse_full_parameter_kinds", |bencher| {
        bencher.iter(|| pegen_demos::parse_module(black_box(FULL_PARAMETER_KINDS), "<bench>"));
    });
}

fn bench_fstring_heavy(crit: &mut Criterion) {
    let _ = crit.bench_function("parse_fstring_heavy", |bencher| {
        bencher.iter(|| pegen_demos::parse_module(black_box(F_STRING_HEAVY), "<bench>"));
    });
}

fn bench_relative_imports(crit: &mut Criterion) {
    let _ = crit.bench_function("parse_relative_imports", |bencher| {
        bencher.iter(|| pegen_demos::parse_module(black_box(RELATIVE_IMPORTS), "<bench>"));
    });
}

fn bench_mixed_module(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("parse_mixed_module");
    group.throughput(Throughput::Bytes(MIXED_MODULE.len() as u64));
    group.bench_function("mixed_module", |bencher| {
        bencher.iter(|| pegen_demos::parse_module(black_box(MIXED_MODULE), "<bench>"));
    });
    group.finish();
}

fn bench_scaling(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("parse_scaling");

    for size in [10, 50, 100, 500] {
        let code = (0..size).fold(String::new(), |acc, idx| {
            format!("{acc}\ndef func_{idx}(x):\n    x + {idx}\n")
        });

        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &code, |bencher, code| {
            bencher.iter(|| pegen_demos::parse_module(black_box(code), "<bench>"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_memo_cache_effect,
    bench_simple_function,
    bench_full_parameter_kinds,
    bench_fstring_heavy,
    bench_relative_imports,
    bench_mixed_module,
    bench_scaling,
);
criterion_main!(benches);
