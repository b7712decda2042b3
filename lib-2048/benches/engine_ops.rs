use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lib_2048::{config::Weights, direction::Direction, game, heuristic, logic, transpose_board};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn corpus() -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(1337);
    let mut board = game::new_game(&mut rng);
    let mut boards = vec![board];

    for direction in Direction::iter().cycle().take(256) {
        if let Some((new_board, _)) = logic::try_move(board, direction) {
            board = game::spawn_square(&mut rng, new_board);
        }

        if logic::is_terminal(board) {
            board = game::new_game(&mut rng);
        }

        boards.push(board);
    }

    boards
}

fn bench_moves(c: &mut Criterion) {
    let boards = corpus();

    c.bench_function("logic/try_all_moves", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for &board in &boards {
                for (new_board, gained) in logic::try_all_moves(board).into_iter().flatten() {
                    acc ^= new_board.wrapping_add(u64::from(gained));
                }
            }
            black_box(acc)
        })
    });

    c.bench_function("logic/transpose", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for &board in &boards {
                acc ^= transpose_board(black_box(board));
            }
            black_box(acc)
        })
    });

    c.bench_function("logic/is_terminal", |b| {
        b.iter(|| {
            boards
                .iter()
                .filter(|&&board| logic::is_terminal(black_box(board)))
                .count()
        })
    });
}

fn bench_heuristic(c: &mut Criterion) {
    let boards = corpus();
    let weights = Weights::default();

    c.bench_function("heuristic/evaluate_board", |b| {
        b.iter(|| {
            let mut acc = 0f64;
            for &board in &boards {
                acc += heuristic::evaluate_board(board, &weights);
            }
            black_box(acc)
        })
    });
}

criterion_group!(engine_ops, bench_moves, bench_heuristic);
criterion_main!(engine_ops);
