//! Seeded random games for tests and benchmarks.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_checks::legal_moves;

/// Plays up to `plies` uniformly random legal moves from `start`, stopping
/// early if the game ends. The same seed always gives the same position.
pub fn random_playout(start: &Position, plies: usize, seed: u64) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut position = *start;

    for _ in 0..plies {
        let moves = legal_moves(&position);
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        position.apply_move(mv);
    }

    position
}
