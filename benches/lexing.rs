use burin_json::lexer::{Lexer, TokenKind};
use criterion::{criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use std::fs;

macro_rules! build_lex_benchmark {
    ($func : tt, $filename : expr) => {
        fn $func() {
            let source =
                fs::read_to_string(format!("fixtures/json/bench/{}.json", $filename)).unwrap();
            let mut lexer = Lexer::new(&source);
            loop {
                match lexer.next_token() {
                    Ok(TokenKind::EndOfInput) => break,
                    Ok(kind) => lexer.skip_token(kind).unwrap(),
                    Err(err) => {
                        println!("error occurred: {:?}", err);
                        break;
                    }
                }
            }
        }
    };
}

build_lex_benchmark!(events, "events");
build_lex_benchmark!(catalogue, "catalogue");
build_lex_benchmark!(simple, "simple");

fn benchmark_events(c: &mut Criterion) {
    c.bench_function("lex of events", |b| b.iter(events));
}
fn benchmark_catalogue(c: &mut Criterion) {
    c.bench_function("lex of catalogue", |b| b.iter(catalogue));
}
fn benchmark_simple(c: &mut Criterion) {
    c.bench_function("lex of simple", |b| b.iter(simple));
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets= benchmark_events, benchmark_catalogue, benchmark_simple
}
criterion_main!(benches);
