use std::path::PathBuf;

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use crate::game::DEFAULT_SPEED;

#[derive(Parser, Debug, Clone)]
#[command(name = "wrapsnake", version, about = "Snake on a wrap-around board")]
pub struct Config {
    /// Ticks per second at the start of every game
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    pub speed: u32,

    /// Seed for snake and food placement, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append logs to this file; verbosity follows RUST_LOG
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
