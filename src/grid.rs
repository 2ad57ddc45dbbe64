use Direction::*;

pub const BOARD_WIDTH: i32 = 20;
pub const BOARD_HEIGHT: i32 = 14;

pub const CELL_SIZE: i32 = 32;
pub const VIEWPORT_WIDTH: i32 = 640;
pub const VIEWPORT_HEIGHT: i32 = 480;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// Unit displacement, with y growing downwards.
    pub fn vector(self) -> Position {
        match self {
            Up => Position::new(0, -1),
            Down => Position::new(0, 1),
            Left => Position::new(-1, 0),
            Right => Position::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// A toroidal board: leaving one edge re-enters from the opposite one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

pub const BOARD: Board = Board { width: BOARD_WIDTH, height: BOARD_HEIGHT };

impl Board {
    pub const fn new(width: i32, height: i32) -> Self {
        Board { width, height }
    }

    pub fn add(&self, pos: Position, vector: Position) -> Position {
        Position::new(
            (pos.x + vector.x).rem_euclid(self.width),
            (pos.y + vector.y).rem_euclid(self.height),
        )
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Rows of the viewport left over below the board, in cells.
    pub fn hud_rows(&self) -> i32 {
        ((VIEWPORT_HEIGHT - self.height * CELL_SIZE) / CELL_SIZE).max(1)
    }
}

impl Default for Board {
    fn default() -> Self {
        BOARD
    }
}
