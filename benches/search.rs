use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use woodpusher::controller::{GameController, Strategy};
use woodpusher::engine::searcher::Search;
use woodpusher::game::GameState;

fn perft_benchmark(c: &mut Criterion) {
    // Starting position perft benchmarks
    let mut group = c.benchmark_group("perft_starting_position");
    group.significance_level(0.1).sample_size(50);

    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut controller = GameController::new(Strategy::Negamax);
                black_box(controller.perft(depth))
            });
        });
    }
    group.finish();
}

fn search_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_move");
    group.sample_size(20);

    let positions = [
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
            "starting_position",
        ),
        (
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/R1BQK1NR w - - 0 4",
            "open_game",
        ),
        (
            "8/2p5/3p4/1P5r/1R3p1k/8/4P1P1/K7 w - - 0 1",
            "rook_endgame",
        ),
    ];

    for (fen, name) in positions {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut state = GameState::new(Some(fen));
                let valid_moves = state.get_valid_moves();
                let mut search = Search::new(&mut state);
                black_box(search.find_best_move(&valid_moves))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, perft_benchmark, search_benchmark);
criterion_main!(benches);
