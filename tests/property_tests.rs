//! Property tests for the detector, builder, swap validator, and cascades.

use proptest::prelude::*;

use rust_match3::board::{build_stable, find_matches, has_matches, Board};
use rust_match3::core::{GameRng, LevelConfig, Pacing, Palette, Position, RefillPolicyKind, TileColor};
use rust_match3::resolve::Phase;
use rust_match3::engine::Engine;

/// Strategy: a full board of arbitrary colors, runs allowed.
fn arb_board(max_rows: usize, max_columns: usize) -> impl Strategy<Value = Board> {
    (1..=max_rows, 1..=max_columns).prop_flat_map(|(rows, columns)| {
        proptest::collection::vec(0..TileColor::ALL.len(), rows * columns).prop_map(move |cells| {
            let colors: Vec<Vec<TileColor>> = cells
                .chunks(columns)
                .map(|row| row.iter().map(|&i| TileColor::ALL[i]).collect())
                .collect();
            let rows: Vec<&[TileColor]> = colors.iter().map(Vec::as_slice).collect();
            Board::from_colors(&rows)
        })
    })
}

/// Strategy: boards of any shape, weighted toward single rows and columns.
fn arb_narrow_or_wide_board() -> impl Strategy<Value = Board> {
    prop_oneof![
        (1usize..=8).prop_flat_map(|rows| arb_shaped_board(rows, 1)),
        (1usize..=8).prop_flat_map(|columns| arb_shaped_board(1, columns)),
        arb_board(6, 6),
    ]
}

/// Strategy: a board of exact size, drawn from the first three colors so
/// runs are common.
fn arb_shaped_board(rows: usize, columns: usize) -> impl Strategy<Value = Board> {
    proptest::collection::vec(0..3usize, rows * columns).prop_map(move |cells| {
        let colors: Vec<Vec<TileColor>> = cells
            .chunks(columns)
            .map(|row| row.iter().map(|&i| TileColor::ALL[i]).collect())
            .collect();
        let rows: Vec<&[TileColor]> = colors.iter().map(Vec::as_slice).collect();
        Board::from_colors(&rows)
    })
}

fn arb_policy() -> impl Strategy<Value = RefillPolicyKind> {
    prop_oneof![
        Just(RefillPolicyKind::WeightedNeighbor),
        Just(RefillPolicyKind::NeighborhoodMajority),
        Just(RefillPolicyKind::Gravity),
    ]
}

/// Every orthogonally adjacent pair on a board, each listed once.
fn adjacent_pairs(rows: usize, columns: usize) -> Vec<(Position, Position)> {
    let mut pairs = Vec::new();
    for row in 0..rows {
        for col in 0..columns {
            let here = Position::new(row, col);
            if col + 1 < columns {
                pairs.push((here, Position::new(row, col + 1)));
            }
            if row + 1 < rows {
                pairs.push((here, Position::new(row + 1, col)));
            }
        }
    }
    pairs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_detector_is_idempotent(board in arb_board(8, 8)) {
        let first = find_matches(&board);
        let second = find_matches(&board);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_runs_are_long_and_uniform(board in arb_board(8, 8)) {
        for m in find_matches(&board).matches() {
            prop_assert!(m.len() >= 3);
            for &pos in &m.positions {
                prop_assert_eq!(board.color_at(pos), Some(m.color));
            }
        }
    }

    #[test]
    fn prop_built_board_is_quiet(
        rows in 1usize..10,
        columns in 1usize..10,
        colors in 3usize..=5,
        seed in any::<u64>(),
    ) {
        let mut rng = GameRng::new(seed);
        let board = build_stable(rows, columns, Palette::new(colors), &mut rng, 1_000).unwrap();

        prop_assert!(!has_matches(&board));
        prop_assert!(board.is_full());
        prop_assert!(board.is_consistent());
    }

    #[test]
    fn prop_rejected_swap_changes_nothing(seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let config = LevelConfig::default().with_size(6, 6).with_seed(seed);
        let mut engine = Engine::new(config).unwrap();
        let pairs = adjacent_pairs(6, 6);
        let (a, b) = pairs[pick.index(pairs.len())];

        let board_before = bincode::serialize(engine.board()).unwrap();
        let score_before = bincode::serialize(engine.score()).unwrap();

        if !engine.submit_swap(a, b).is_accepted() {
            prop_assert_eq!(bincode::serialize(engine.board()).unwrap(), board_before);
            prop_assert_eq!(bincode::serialize(engine.score()).unwrap(), score_before);
        }
    }

    #[test]
    fn prop_cascade_terminates_quiet(
        seed in any::<u64>(),
        kind in arb_policy(),
        colors in 3usize..=5,
    ) {
        let config = LevelConfig::default()
            .with_size(6, 6)
            .with_colors(colors)
            .with_refill_policy(kind)
            .with_seed(seed);
        let mut engine = Engine::new(config).unwrap();

        let mut accepted = 0;
        for (a, b) in adjacent_pairs(6, 6) {
            if engine.outcome().is_some() {
                break;
            }
            if engine.submit_swap(a, b).is_accepted() {
                accepted += 1;
                prop_assert!(!has_matches(engine.board()));
                prop_assert!(engine.board().is_full());
                prop_assert!(engine.board().is_consistent());
                prop_assert_eq!(engine.score().multiplier(), 1);
            }
        }

        prop_assert_eq!(engine.score().moves_left(), 20u32.saturating_sub(accepted));
    }

    #[test]
    fn prop_cascade_terminates_at_any_spawn_chance(
        seed in any::<u64>(),
        kind in arb_policy(),
        same_color in 0.0..=1.0f64,
        different_color in 0.0..=1.0f64,
        colors in 3usize..=5,
    ) {
        let config = LevelConfig::default()
            .with_size(5, 5)
            .with_colors(colors)
            .with_refill_policy(kind)
            .with_spawn_chances(same_color, different_color)
            .with_cascade_pass_limit(8)
            .with_seed(seed);
        let mut engine = Engine::new(config).unwrap();

        for (a, b) in adjacent_pairs(5, 5) {
            if engine.outcome().is_some() {
                break;
            }
            if engine.submit_swap(a, b).is_accepted() {
                prop_assert_eq!(engine.phase(), Phase::Idle);
                prop_assert!(!has_matches(engine.board()));
                prop_assert!(engine.board().is_full());
            }
        }
    }

    #[test]
    fn prop_supplied_board_with_runs_settles(
        board in arb_narrow_or_wide_board(),
        kind in arb_policy(),
        certain_copy in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let (rows, columns) = (board.rows(), board.columns());
        let chance = if certain_copy { 1.0 } else { 0.4 };
        let config = LevelConfig::default()
            .with_refill_policy(kind)
            .with_spawn_chances(chance, chance)
            .with_cascade_pass_limit(8)
            .with_pacing(Pacing::Stepped);
        let mut engine = Engine::with_board(config, board, GameRng::new(seed)).unwrap();

        for (a, b) in adjacent_pairs(rows, columns) {
            if engine.outcome().is_some() {
                break;
            }
            if !engine.submit_swap(a, b).is_accepted() {
                continue;
            }

            let mut steps = 0;
            while engine.phase() != Phase::Idle {
                prop_assert!(steps < 64, "cascade still resolving after {} passes", steps);
                engine.advance();
                steps += 1;
            }
            prop_assert!(!has_matches(engine.board()));
            prop_assert!(engine.board().is_consistent());
        }
    }
}
