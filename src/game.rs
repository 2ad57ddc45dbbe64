use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info};

use crate::food::is_free;
use crate::grid::{Board, Direction::{self, *}, Position, BOARD};
use crate::input::InputQueue;
use crate::snake::{MoveResult, Snake, INITIAL_SNAKE_LENGTH};

pub const MIN_SPEED: u32 = 1;
pub const DEFAULT_SPEED: u32 = 5;
const INITIAL_DIRECTION: Direction = Right;

/// Keys the game understands. Everything else decodes to `Other`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Direction(Direction),
    Menu,
    Accept,
    Other,
}

impl Key {
    /// Decodes a platform key name (`KeyboardEvent.key` spelling).
    pub fn from_name(name: &str) -> Key {
        match name {
            "ArrowLeft" => Key::Direction(Left),
            "ArrowRight" => Key::Direction(Right),
            "ArrowUp" => Key::Direction(Up),
            "ArrowDown" => Key::Direction(Down),
            "Escape" => Key::Menu,
            "Enter" => Key::Accept,
            _ => Key::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuOption {
    Speed,
    Restart,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    Playing,
    Menu(MenuOption),
    GameOver,
}

/// Identifies one outstanding random position request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Tick,
    Key(Key),
    PositionReady { token: Token, position: Position },
}

/// Work the host must carry out on behalf of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Render,
    /// Deliver the next `Event::Tick` after this delay.
    ScheduleTick(Duration),
    /// Deliver a uniformly random board position as `Event::PositionReady`.
    RequestPosition(Token),
}

#[derive(Debug)]
pub struct GameState {
    board: Board,
    snake: Snake,
    direction: Direction,
    input: InputQueue,
    points: u32,
    speed: u32,
    food: Option<Position>,
    mode: GameMode,
    obstacles: HashSet<Position>,
    pending_snake: Option<Token>,
    pending_food: Option<Token>,
}

impl GameState {
    fn new(speed: u32) -> Self {
        GameState {
            board: BOARD,
            snake: Snake::unplaced(INITIAL_SNAKE_LENGTH),
            direction: INITIAL_DIRECTION,
            input: InputQueue::new(),
            points: 0,
            speed: speed.max(MIN_SPEED),
            food: None,
            mode: GameMode::Playing,
            obstacles: HashSet::new(),
            pending_snake: None,
            pending_food: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn input(&self) -> &InputQueue {
        &self.input
    }

    pub fn length(&self) -> usize {
        self.snake.length()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }

    /// Cells food may not be placed on.
    pub fn occupied(&self) -> HashSet<Position> {
        self.snake.body().iter().chain(self.obstacles.iter()).copied().collect()
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.speed
    }

    fn step(&mut self) -> MoveResult {
        self.direction = self.input.resolve(self.direction);
        let result = self.snake.move_step(self.direction, &self.board, self.food, &self.obstacles);

        match result {
            MoveResult::Ate => {
                self.points = self.points.saturating_add(self.speed);
                self.food = None;
            }
            MoveResult::Crashed => self.mode = GameMode::GameOver,
            MoveResult::Moved => {}
        }

        result
    }
}

/// Owns the single live `GameState` and turns events into effects.
#[derive(Debug)]
pub struct Game {
    state: GameState,
    initial_speed: u32,
    next_token: u64,
}

impl Game {
    /// Creates the first game. The returned effects ask for the snake's
    /// placement and the first tick.
    pub fn start(speed: u32) -> (Self, Vec<Effect>) {
        let initial_speed = speed.max(MIN_SPEED);
        let mut game = Game { state: GameState::new(initial_speed), initial_speed, next_token: 0 };
        let mut effects = vec![];

        game.reinitialize(&mut effects);
        effects.push(Effect::ScheduleTick(game.state.tick_period()));

        (game, effects)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn obstacles_mut(&mut self) -> &mut HashSet<Position> {
        &mut self.state.obstacles
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = vec![];

        match event {
            Event::Tick => self.on_tick(&mut effects),
            Event::Key(key) => self.on_key(key, &mut effects),
            Event::PositionReady { token, position } => self.on_position(token, position, &mut effects),
        }

        effects
    }

    ///////////////////////////////////////////////////////////////////////////

    fn issue_token(&mut self) -> Token {
        self.next_token += 1;
        Token(self.next_token)
    }

    fn request_food(&mut self, effects: &mut Vec<Effect>) {
        let token = self.issue_token();
        self.state.pending_food = Some(token);
        effects.push(Effect::RequestPosition(token));
    }

    fn reinitialize(&mut self, effects: &mut Vec<Effect>) {
        self.state = GameState::new(self.initial_speed);

        let token = self.issue_token();
        self.state.pending_snake = Some(token);
        effects.push(Effect::RequestPosition(token));
        effects.push(Effect::Render);

        info!(speed = self.state.speed, "new game");
    }

    fn on_tick(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::ScheduleTick(self.state.tick_period()));

        if self.state.mode != GameMode::Playing {
            return;
        }

        let result = self.state.step();
        let head = self.state.snake.head();
        debug!(?result, x = head.x, y = head.y, "tick");

        match result {
            MoveResult::Ate => self.request_food(effects),
            MoveResult::Crashed => info!(
                points = self.state.points,
                length = self.state.length(),
                "game over"
            ),
            MoveResult::Moved => {}
        }

        effects.push(Effect::Render);
    }

    fn on_key(&mut self, key: Key, effects: &mut Vec<Effect>) {
        use GameMode::*;
        use MenuOption::*;

        let state = &mut self.state;
        let changed = match (state.mode, key) {
            (Playing, Key::Direction(dir)) => {
                state.input.push(dir);
                false
            }
            (Playing, Key::Menu) => {
                state.mode = Menu(Speed);
                true
            }
            (Menu(option), Key::Direction(Up)) => {
                state.mode = Menu(Speed);
                option != Speed
            }
            (Menu(option), Key::Direction(Down)) => {
                state.mode = Menu(Restart);
                option != Restart
            }
            (Menu(Speed), Key::Direction(Left)) => {
                let speed = state.speed.saturating_sub(1).max(MIN_SPEED);
                let changed = speed != state.speed;
                state.speed = speed;
                changed
            }
            (Menu(Speed), Key::Direction(Right)) => {
                state.speed = state.speed.saturating_add(1);
                true
            }
            (Menu(_), Key::Menu) => {
                state.mode = Playing;
                true
            }
            (Menu(Restart), Key::Accept) | (GameOver, Key::Accept) => {
                self.reinitialize(effects);
                return;
            }
            _ => false,
        };

        if changed {
            debug!(mode = ?self.state.mode, speed = self.state.speed, "key handled");
            effects.push(Effect::Render);
        }
    }

    fn on_position(&mut self, token: Token, position: Position, effects: &mut Vec<Effect>) {
        if self.state.pending_snake == Some(token) {
            self.state.pending_snake = None;
            self.state.snake = Snake::new(position, self.state.snake.length());
            debug!(x = position.x, y = position.y, "snake placed");

            self.request_food(effects);
            effects.push(Effect::Render);
        } else if self.state.pending_food == Some(token) {
            if is_free(position, &self.state.occupied()) {
                self.state.pending_food = None;
                self.state.food = Some(position);
                debug!(x = position.x, y = position.y, "food placed");
                effects.push(Effect::Render);
            } else {
                debug!(x = position.x, y = position.y, "food landed on occupied cell, retrying");
                self.request_food(effects);
            }
        } else {
            debug!(?token, "ignoring stale position response");
        }
    }
}
