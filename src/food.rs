use std::collections::HashSet;

use rand::{rngs::StdRng, Rng};
use tracing::trace;

use crate::grid::{Board, Position};

/// Supplier of uniformly distributed cells within a board.
pub trait RandomSource {
    fn random_position(&mut self, board: &Board) -> Position;
}

impl RandomSource for StdRng {
    fn random_position(&mut self, board: &Board) -> Position {
        Position::new(self.gen_range(0..board.width), self.gen_range(0..board.height))
    }
}

/// Draws candidates until one falls outside `occupied`.
///
/// Synchronous form of food placement for hosts that can answer on the spot.
/// `Game` runs the same `is_free` check one candidate at a time as
/// `PositionReady` events arrive. Never returns on a completely full board.
pub fn place_food<R: RandomSource + ?Sized>(
    occupied: &HashSet<Position>,
    board: &Board,
    source: &mut R,
) -> Position {
    loop {
        let candidate = source.random_position(board);
        if is_free(candidate, occupied) {
            return candidate;
        }
        trace!(x = candidate.x, y = candidate.y, "food candidate occupied, retrying");
    }
}

pub fn is_free(candidate: Position, occupied: &HashSet<Position>) -> bool {
    !occupied.contains(&candidate)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use rand::SeedableRng;

    use super::*;
    use crate::grid::BOARD;

    /// Replays a fixed list of positions, then falls back to a seeded rng.
    pub(crate) struct ScriptedSource {
        script: VecDeque<Position>,
        fallback: StdRng,
        pub(crate) draws: usize,
    }

    impl ScriptedSource {
        pub(crate) fn new(script: &[(i32, i32)]) -> Self {
            ScriptedSource {
                script: script.iter().map(|&(x, y)| Position::new(x, y)).collect(),
                fallback: StdRng::seed_from_u64(7),
                draws: 0,
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn random_position(&mut self, board: &Board) -> Position {
            self.draws += 1;
            match self.script.pop_front() {
                Some(pos) => pos,
                None => self.fallback.random_position(board),
            }
        }
    }

    #[test]
    fn occupied_candidates_are_never_accepted() {
        let occupied: HashSet<Position> = [Position::new(1, 1), Position::new(2, 1)].into_iter().collect();
        let mut source = ScriptedSource::new(&[(1, 1), (2, 1), (1, 1), (3, 1)]);

        let food = place_food(&occupied, &BOARD, &mut source);
        assert_eq!(food, Position::new(3, 1));
        assert_eq!(source.draws, 4);
    }

    #[test]
    fn finds_the_last_free_cell() {
        let board = Board::new(3, 2);
        let mut occupied = HashSet::new();
        for x in 0..3 {
            for y in 0..2 {
                occupied.insert(Position::new(x, y));
            }
        }
        occupied.remove(&Position::new(2, 0));

        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(place_food(&occupied, &board, &mut rng), Position::new(2, 0));
    }

    #[test]
    fn rng_positions_stay_on_the_board() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(BOARD.contains(rng.random_position(&BOARD)));
        }
    }
}
