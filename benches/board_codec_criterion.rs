use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_board::game_state::chess_types::{Color, PieceCode, PieceKind};
use plum_board::game_state::game_state::GameState;
use plum_board::moves::move_list::{format_compact_moves, parse_compact_moves, parse_long_algebraic_moves};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTPOS_FEN,
    },
    BenchCase {
        name: "position_2",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTPOS_FEN,
    },
    BenchCase {
        name: "position_2",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    },
    BenchCase {
        name: "position_4",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
    },
    BenchCase {
        name: "position_5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    },
    BenchCase {
        name: "position_6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    },
];

/// Ruy Lopez main line, 20 plies.
const GAME_QUICK: &str = "e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1 f8e7 \
                          f1e1 b7b5 a4b3 d7d6 c2c3 e8g8 h2h3 c6a5 b3c2 c7c5";

/// The same line continued to 40 plies.
const GAME_STANDARD: &str = "e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1 f8e7 \
                             f1e1 b7b5 a4b3 d7d6 c2c3 e8g8 h2h3 c6a5 b3c2 c7c5 \
                             d2d4 d8c7 b1d2 c5d4 c3d4 a5c6 d2b3 a6a5 c1e3 a5a4 \
                             b3d2 c8d7 a1c1 c7b7 d2f1 f8c8 f1g3 e7f8 d4d5 c6b4";

fn suite_name() -> &'static str {
    match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    }
}

fn selected_cases() -> &'static [BenchCase] {
    match suite_name() {
        "standard" => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn selected_game() -> &'static str {
    match suite_name() {
        "standard" => GAME_STANDARD,
        _ => GAME_QUICK,
    }
}

fn configure<'a>(c: &'a mut Criterion, label: &str) -> criterion::BenchmarkGroup<'a, criterion::measurement::WallTime> {
    let mut group = c.benchmark_group(format!("{label}_{}", suite_name()));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(30);
    group
}

fn bench_position_codecs(c: &mut Criterion) {
    let mut group = configure(c, "position_codecs");

    for case in selected_cases() {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let compact = game.get_compact().expect("benchmark position should encode");

        // Correctness guards before benchmarking.
        assert_eq!(game.get_fen(), case.fen, "FEN round trip for {}", case.name);
        let decoded = GameState::from_compact(&compact).expect("compact should decode");
        assert_eq!(decoded.squares(), game.squares(), "compact board for {}", case.name);

        group.bench_with_input(BenchmarkId::new("fen_parse", case.name), case.fen, |b, fen| {
            b.iter(|| GameState::from_fen(black_box(fen)).expect("FEN parses"));
        });
        group.bench_with_input(BenchmarkId::new("fen_generate", case.name), &game, |b, game| {
            b.iter(|| black_box(game).get_fen());
        });
        group.bench_with_input(BenchmarkId::new("compact_encode", case.name), &game, |b, game| {
            b.iter(|| black_box(game).get_compact().expect("encodes"));
        });
        group.bench_with_input(BenchmarkId::new("compact_decode", case.name), &compact, |b, text| {
            b.iter(|| GameState::from_compact(black_box(text)).expect("decodes"));
        });
    }

    group.finish();
}

fn bench_move_replay(c: &mut Criterion) {
    let mut group = configure(c, "move_replay");
    let start = GameState::new_game();
    let game_text = selected_game();

    let moves = parse_long_algebraic_moves(game_text, &start).expect("benchmark game should parse");
    let compact = format_compact_moves(&moves).expect("benchmark game should encode");
    assert_eq!(
        parse_compact_moves(&compact, &start).expect("compact game should decode"),
        moves
    );

    group.throughput(Throughput::Elements(moves.len() as u64));
    group.bench_function("long_algebraic", |b| {
        b.iter(|| parse_long_algebraic_moves(black_box(game_text), &start).expect("parses"));
    });
    group.bench_function("compact", |b| {
        b.iter(|| parse_compact_moves(black_box(&compact), &start).expect("decodes"));
    });
    group.bench_function("apply_with_clean_indices", |b| {
        b.iter(|| {
            let mut game = start.clone();
            game.occupied_bitboard();
            for mv in &moves {
                game.make_move(*mv).expect("applies");
            }
            black_box(game.occupied_bitboard())
        });
    });

    group.finish();
}

fn bench_index_rebuild(c: &mut Criterion) {
    let mut group = configure(c, "index_rebuild");

    for case in selected_cases() {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let pieces = game.squares().iter().filter(|code| !code.is_empty()).count();

        let mut guard = game.clone();
        assert_eq!(guard.occupied_bitboard().count_ones() as usize, pieces);

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &game, |b, game| {
            b.iter(|| {
                let mut dirty = game.clone();
                dirty
                    .set_piece(0, PieceCode::new(Color::Light, PieceKind::Rook))
                    .expect("square in range");
                black_box(dirty.piece_list(PieceKind::Pawn, Color::Light).len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_position_codecs, bench_move_replay, bench_index_rebuild);
criterion_main!(benches);
