use std::collections::{HashSet, VecDeque};

use crate::grid::{Board, Direction, Position};
use MoveResult::*;

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    Ate,
    Crashed,
}

/// Snake body stored head first, plus the length it is allowed to reach.
///
/// The body only grows by keeping tail cells while `body.len() < length`, so a
/// freshly placed single-cell snake stretches out over its first few moves.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    length: usize,
}

impl Snake {
    /// A snake with no cells yet, waiting for its random placement.
    pub fn unplaced(length: usize) -> Self {
        Snake { body: VecDeque::new(), length }
    }

    pub fn new(seed: Position, length: usize) -> Self {
        Snake { body: VecDeque::from(vec![seed]), length }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[(i32, i32)], length: usize) -> Self {
        Snake { body: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(), length }
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_placed(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or_default()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advances the head one cell in `direction`.
    ///
    /// Eating extends the target length first, so the cell that would have
    /// dropped off the tail is kept on the same move. A crash still leaves the
    /// moved body in place for display.
    pub fn move_step(
        &mut self,
        direction: Direction,
        board: &Board,
        food: Option<Position>,
        obstacles: &HashSet<Position>,
    ) -> MoveResult {
        let new_head = board.add(self.head(), direction.vector());
        let ate = food == Some(new_head);

        if ate {
            self.length += 1;
        }

        self.body.push_front(new_head);
        self.body.truncate(self.length);

        if ate {
            Ate
        } else if self.body.iter().skip(1).any(|pos| *pos == new_head) || obstacles.contains(&new_head) {
            Crashed
        } else {
            Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BOARD, Direction::*};

    fn cells(snake: &Snake) -> Vec<(i32, i32)> {
        snake.body().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn seed_cell_stretches_to_full_length() {
        let mut snake = Snake::new(Position::new(18, 7), INITIAL_SNAKE_LENGTH);
        let none = HashSet::new();

        for _ in 0..3 {
            assert_eq!(snake.move_step(Right, &BOARD, None, &none), Moved);
        }

        assert_eq!(cells(&snake), vec![(1, 7), (0, 7), (19, 7)]);
        assert_eq!(snake.length(), 3);
    }

    #[test]
    fn tail_follows_once_length_is_reached() {
        let mut snake = Snake::from_cells(&[(5, 5), (4, 5), (3, 5)], 3);
        snake.move_step(Down, &BOARD, None, &HashSet::new());
        assert_eq!(cells(&snake), vec![(5, 6), (5, 5), (4, 5)]);
    }

    #[test]
    fn eating_grows_by_exactly_one() {
        let mut snake = Snake::from_cells(&[(5, 5), (4, 5), (3, 5)], 3);
        let food = Some(Position::new(6, 5));

        assert_eq!(snake.move_step(Right, &BOARD, food, &HashSet::new()), Ate);
        assert_eq!(snake.length(), 4);
        assert_eq!(cells(&snake), vec![(6, 5), (5, 5), (4, 5), (3, 5)]);
    }

    #[test]
    fn eating_while_still_stretching_keeps_body_short() {
        let mut snake = Snake::new(Position::new(2, 2), 3);
        let food = Some(Position::new(3, 2));

        assert_eq!(snake.move_step(Right, &BOARD, food, &HashSet::new()), Ate);
        assert_eq!(snake.length(), 4);
        assert_eq!(snake.body().len(), 2);
    }

    #[test]
    fn running_into_own_body_crashes() {
        // A square loop: moving Up from (5,6) hits (5,5).
        let mut snake = Snake::from_cells(&[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)], 5);
        assert_eq!(snake.move_step(Up, &BOARD, None, &HashSet::new()), Crashed);
        assert_eq!(snake.head(), Position::new(5, 5));
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        // The tail cell leaves on the same move the head enters it.
        let mut snake = Snake::from_cells(&[(5, 6), (6, 6), (6, 5), (5, 5)], 4);
        assert_eq!(snake.move_step(Up, &BOARD, None, &HashSet::new()), Moved);
    }

    #[test]
    fn obstacles_are_fatal() {
        let mut snake = Snake::from_cells(&[(1, 1)], 3);
        let obstacles: HashSet<Position> = [Position::new(1, 2)].into_iter().collect();
        assert_eq!(snake.move_step(Down, &BOARD, None, &obstacles), Crashed);
    }

    #[test]
    fn unplaced_snake_starts_from_origin() {
        let mut snake = Snake::unplaced(3);
        assert_eq!(snake.head(), Position::new(0, 0));
        snake.move_step(Left, &BOARD, None, &HashSet::new());
        assert_eq!(cells(&snake), vec![(19, 0)]);
    }
}
