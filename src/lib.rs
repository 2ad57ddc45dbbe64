pub mod app;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
pub mod term;

pub use game::{Effect, Event, Game, GameMode, GameState, Key, MenuOption};
pub use grid::{Board, Direction, Position};
