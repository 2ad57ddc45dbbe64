use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use thiserror::Error;

use crate::game::{GameMode, GameState, Key, MenuOption};
use crate::grid::{Board, Direction, Position, BOARD};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Terminal columns per board cell; terminal glyphs are about twice as tall as wide.
const CELL_COLUMNS: TermInt = 2;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_GLYPH: [char; 2] = ['(', ')'];
const DEAD_SNAKE_CHAR: char = 'X';
const OBSTACLE_CHAR: char = '#';

#[derive(Debug, Error)]
pub enum TermError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("terminal is {width}x{height}, the board needs at least {need_width}x{need_height}")]
    TooSmall { width: TermInt, height: TermInt, need_width: TermInt, need_height: TermInt },
}

/// What a key press means to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    Key(Key),
}

/// Render sink and key source backed by crossterm.
pub struct TermManager {
    stdout: Stdout,
    origin: Coords,
    screen: Frame,
}

impl TermManager {
    pub fn new() -> Result<Self, TermError> {
        let (width, height) = terminal::size()?;
        let (need_width, need_height) = Frame::size(&BOARD);

        if width < need_width || height < need_height {
            return Err(TermError::TooSmall { width, height, need_width, need_height });
        }

        let origin = ((width - need_width) / 2, (height - need_height) / 2);
        Ok(TermManager { stdout: stdout(), origin, screen: Frame::blank(&BOARD, '\0') })
    }

    pub fn setup(&mut self) -> Result<(), TermError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), TermError> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Waits up to `timeout` for a key press.
    pub fn poll_input(&self, timeout: Duration) -> Result<Option<Input>, TermError> {
        if !poll(timeout)? {
            return Ok(None);
        }

        match read()? {
            Event::Key(ev) => Ok(decode_key(&ev)),
            _ => Ok(None),
        }
    }

    /// Draws the state, writing only the characters that changed since the
    /// last frame.
    pub fn render(&mut self, state: &GameState) -> Result<(), TermError> {
        let frame = compose(state);

        for (i, (&new, &old)) in frame.chars.iter().zip(self.screen.chars.iter()).enumerate() {
            if new == old {
                continue;
            }
            let x = self.origin.0 + (i % frame.width as usize) as TermInt;
            let y = self.origin.1 + (i / frame.width as usize) as TermInt;
            queue!(self.stdout, cursor::MoveTo(x, y), style::Print(new))?;
        }

        self.screen = frame;
        self.stdout.flush()?;
        Ok(())
    }
}

/// A full screen worth of characters, laid out row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: TermInt,
    height: TermInt,
    chars: Vec<char>,
}

impl Frame {
    /// Bordered board plus the HUD rows beneath it.
    pub fn size(board: &Board) -> Coords {
        let width = board.width as TermInt * CELL_COLUMNS + 2;
        let height = board.height as TermInt + 2 + board.hud_rows() as TermInt;
        (width, height)
    }

    fn blank(board: &Board, fill: char) -> Self {
        let (width, height) = Frame::size(board);
        Frame { width, height, chars: vec![fill; width as usize * height as usize] }
    }

    pub fn char_at(&self, pos: Coords) -> char {
        self.chars[self.width as usize * pos.1 as usize + pos.0 as usize]
    }

    pub fn row(&self, y: TermInt) -> String {
        (0..self.width).map(|x| self.char_at((x, y))).collect()
    }

    fn print_at(&mut self, pos: Coords, ch: char) {
        if pos.0 < self.width && pos.1 < self.height {
            self.chars[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        }
    }

    fn print_str(&mut self, pos: Coords, text: &str) {
        for (x_diff, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + x_diff as TermInt, pos.1), ch);
        }
    }

    fn print_cell(&mut self, pos: Position, glyph: [char; 2]) {
        let x = 1 + pos.x as TermInt * CELL_COLUMNS;
        let y = 1 + pos.y as TermInt;
        self.print_at((x, y), glyph[0]);
        self.print_at((x + 1, y), glyph[1]);
    }

    fn draw_borders(&mut self, board_height: TermInt) {
        let end_x = self.width - 1;
        let end_y = board_height + 1;

        for x in 0..self.width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch);
            self.print_at((x, end_y), ch);
        }

        for y in 1..end_y {
            self.print_at((0, y), '|');
            self.print_at((end_x, y), '|');
        }
    }

    fn show_message(&mut self, lines: &[String]) {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let top_left = (
            (self.width / 2).saturating_sub(msg_width / 2),
            (self.height / 2).saturating_sub(msg_height / 2),
        );

        // Blank top and bottom padding rows
        let blank = " ".repeat(msg_width as usize);
        self.print_str(top_left, &blank);
        self.print_str((top_left.0, top_left.1 + msg_height - 1), &blank);

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_str((top_left.0, top_left.1 + i as TermInt + 1), &padded_line);
        }
    }
}

/// Lays out board, HUD and any menu or game over box for `state`.
pub fn compose(state: &GameState) -> Frame {
    let board = state.board();
    let mut frame = Frame::blank(board, ' ');
    frame.draw_borders(board.height as TermInt);

    for pos in state.obstacles() {
        frame.print_cell(*pos, [OBSTACLE_CHAR, OBSTACLE_CHAR]);
    }

    if let Some(food) = state.food() {
        frame.print_cell(food, APPLE_GLYPH);
    }

    let dead = state.mode() == GameMode::GameOver;
    let head = head_char(state.direction());
    for (i, pos) in state.snake().body().iter().enumerate().rev() {
        let ch = match (dead, i) {
            (true, _) => DEAD_SNAKE_CHAR,
            (false, 0) => head,
            (false, _) => SNAKE_BODY_CHAR,
        };
        frame.print_cell(*pos, [ch, ch]);
    }

    let hud = format!("Points: {}  Speed: {}", state.points(), state.speed());
    frame.print_str((1, board.height as TermInt + 2), &hud);

    match state.mode() {
        GameMode::Playing => {}
        GameMode::Menu(option) => frame.show_message(&menu_lines(option, state.speed())),
        GameMode::GameOver => frame.show_message(&[
            "Game over!".to_string(),
            format!("Points: {}", state.points()),
            String::new(),
            "Enter to play again,".to_string(),
            "or Ctrl+C to quit.".to_string(),
        ]),
    }

    frame
}

fn menu_lines(selected: MenuOption, speed: u32) -> Vec<String> {
    let marker = |option: MenuOption| if option == selected {'>'} else {' '};
    vec![
        "Paused".to_string(),
        String::new(),
        format!("{} Speed: {:<4}", marker(MenuOption::Speed), speed),
        format!("{} Restart    ", marker(MenuOption::Restart)),
        String::new(),
        "Left/Right: speed".to_string(),
        "Enter: restart".to_string(),
        "Esc: resume".to_string(),
    ]
}

fn head_char(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Turns a crossterm key press into host input, going through the platform
/// key names the game decodes.
pub fn decode_key(ev: &KeyEvent) -> Option<Input> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Input::Quit);
    }

    Some(Input::Key(Key::from_name(key_name(ev.code))))
}

fn key_name(code: KeyCode) -> &'static str {
    match code {
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Esc => "Escape",
        KeyCode::Enter => "Enter",
        _ => "Unidentified",
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
