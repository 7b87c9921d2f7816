use criterion::{criterion_group, criterion_main, Criterion};

use twophase::cubie::CubieCube;
use twophase::moves::Move::*;
use twophase::{initialize, solve, Search, SolveOptions};

fn cc_apply_moves() {
    let cc = CubieCube::default();
    let _ = cc.apply_moves(&[R, U, R3, U3]);
}

fn cc_multi_moves() {
    let mut cc = CubieCube::default();
    cc.multiply_moves(&[R, U, R3, U3]);
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("CubieCube Moves");
    group.bench_function("multiply_moves", |b| b.iter(cc_multi_moves));
    group.bench_function("apply_moves", |b| b.iter(cc_apply_moves));
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    initialize();
    let mut group = c.benchmark_group("Solver");
    group.bench_function("two-phase 21", |b| {
        b.iter(|| {
            solve(
                "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF",
                21,
                100_000,
                0,
                SolveOptions::default(),
            )
            .unwrap()
        })
    });
    group.bench_function("random state", |b| {
        let mut search = Search::new();
        b.iter(|| {
            let mut cc = CubieCube::default();
            cc.randomize();
            search.solve(&cc, 21, 100_000, 0, SolveOptions::default()).unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_solver, bench_moves);
criterion_main!(benches);
