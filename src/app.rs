use std::collections::VecDeque;
use std::time::Instant;

use tracing::info;

use crate::config::Config;
use crate::food::RandomSource;
use crate::game::{Effect, Event, Game};
use crate::term::{Input, TermError, TermManager};

/// The host: owns the one live game and carries out its effects against
/// the terminal, the clock and the random source.
pub struct App<R> {
    game: Game,
    term: TermManager,
    random: R,
    events: VecDeque<Event>,
    next_tick: Option<Instant>,
    dirty: bool,
}

impl<R: RandomSource> App<R> {
    pub fn new(config: &Config, random: R) -> Result<Self, TermError> {
        let term = TermManager::new()?;
        let (game, effects) = Game::start(config.speed);

        let mut app = App { game, term, random, events: VecDeque::new(), next_tick: None, dirty: false };
        app.apply(effects);
        Ok(app)
    }

    /// Runs until Ctrl+C. The terminal is restored on every way out.
    pub fn run(&mut self) -> Result<(), TermError> {
        self.term.setup()?;
        let res = self.event_loop();
        self.term.restore()?;
        res
    }

    ///////////////////////////////////////////////////////////////////////////

    fn event_loop(&mut self) -> Result<(), TermError> {
        loop {
            while let Some(event) = self.events.pop_front() {
                let effects = self.game.handle_event(event);
                self.apply(effects);
            }

            if self.dirty {
                self.term.render(self.game.state())?;
                self.dirty = false;
            }

            let now = Instant::now();
            let deadline = match self.next_tick {
                Some(deadline) if deadline <= now => {
                    self.next_tick = None;
                    self.events.push_back(Event::Tick);
                    continue;
                }
                Some(deadline) => deadline,
                None => now,
            };

            match self.term.poll_input(deadline - now)? {
                Some(Input::Quit) => {
                    info!(points = self.game.state().points(), "quit");
                    return Ok(());
                }
                Some(Input::Key(key)) => self.events.push_back(Event::Key(key)),
                None => {}
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render => self.dirty = true,
                Effect::ScheduleTick(period) => self.next_tick = Some(Instant::now() + period),
                Effect::RequestPosition(token) => {
                    // Answered as a later event, never inline.
                    let position = self.random.random_position(self.game.state().board());
                    self.events.push_back(Event::PositionReady { token, position });
                }
            }
        }
    }
}
