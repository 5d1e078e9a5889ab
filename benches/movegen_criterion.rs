use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use regicide::agents::agent_minimax::MiniMaxAgent;
use regicide::agents::agent_trait::Agent;
use regicide::eval::heuristic::MaterialHeuristic;
use regicide::game::board::Board;
use regicide::game::chess_types::Color;
use regicide::game::state::State;
use regicide::movegen::generator::moves_for_color;

fn bench_movegen(c: &mut Criterion) {
    let board = Board::standard();

    // Correctness guard before benchmarking.
    let warmup = moves_for_color(&board, Color::Light);
    assert_eq!(warmup.len(), 20, "standard layout must yield 20 moves");

    let mut group = c.benchmark_group("movegen");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.throughput(Throughput::Elements(40));

    group.bench_function("standard_layout_both_sides", |b| {
        b.iter(|| {
            let light = moves_for_color(black_box(&board), Color::Light);
            let dark = moves_for_color(black_box(&board), Color::Dark);
            black_box(light.len() + dark.len())
        });
    });
    group.finish();
}

fn bench_minimax_decision(c: &mut Criterion) {
    let board = Board::standard();
    let state = State::capture(&board);
    let moves = moves_for_color(&board, Color::Light);

    let mut group = c.benchmark_group("minimax_decision");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(20);

    for depth in [1u8, 2, 3] {
        // Correctness guard before benchmarking.
        let mut warmup_agent =
            MiniMaxAgent::with_seed(depth, MaterialHeuristic, 7).expect("valid depth");
        let warmup = warmup_agent
            .choose_move(Color::Light, &moves, &state)
            .expect("moves available");
        assert!(moves.contains(&warmup), "decision must be a legal move");

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("depth_{depth}")),
            &depth,
            |b, &depth| {
                let mut agent =
                    MiniMaxAgent::with_seed(depth, MaterialHeuristic, 7).expect("valid depth");
                b.iter(|| {
                    let chosen = agent
                        .choose_move(Color::Light, black_box(&moves), black_box(&state))
                        .expect("moves available");
                    black_box(chosen)
                });
            },
        );
    }
    group.finish();
}

criterion_group!(movegen_benches, bench_movegen, bench_minimax_decision);
criterion_main!(movegen_benches);
