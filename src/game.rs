use itertools::Itertools;
use log::{debug, warn};
use rand::{thread_rng, Rng};

use crate::config::{GameConfig, ShapePolicy};
use crate::error::{Error, Result};
use crate::results::{Form, Outcomes, Results, ResultsView};
use crate::Die;

/// Dice rolled together.
///
/// Dice order is column order in the results. Each [`Game::play`] replaces the
/// previous results.
#[derive(Debug, Clone)]
pub struct Game {
    dice: Vec<Die>,
    config: GameConfig,
    last_results: Option<Results>,
}

impl Game {
    pub fn new(dice: Vec<Die>) -> Self {
        if !dice.iter().map(Die::len).all_equal() {
            warn!("game dice have different face counts");
        }
        Self {
            dice,
            config: GameConfig::default(),
            last_results: None,
        }
    }

    pub fn with_config(dice: Vec<Die>, config: GameConfig) -> Result<Self> {
        if config.shape() == ShapePolicy::Strict {
            if dice.is_empty() {
                return Err(Error::InvalidArgumentType("a game needs at least one die"));
            }
            let counts = dice.iter().map(Die::len).collect_vec();
            if !counts.iter().all_equal() {
                return Err(Error::IncompatibleDice(counts));
            }
        }
        let mut game = Self::new(dice);
        game.config = config;
        Ok(game)
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn play(&mut self, n: usize) -> Result<()> {
        self.play_with(n, &mut thread_rng())
    }

    /// Rolls every die `n` times, in die order.
    pub fn play_with<G>(&mut self, n: usize, rng: &mut G) -> Result<()>
    where
        G: Rng,
    {
        if n == 0 {
            return Err(Error::InvalidArgument("number of rolls must be positive"));
        }
        let columns = self.dice.iter().map(|d| d.roll_with(n, rng)).collect_vec();
        self.last_results = Some(Results::from_columns(columns, n));
        debug!("played {n} rolls with {} dice", self.dice.len());
        Ok(())
    }

    pub fn last_results(&self, form: Form) -> Result<ResultsView<'_>> {
        self.last_results
            .as_ref()
            .map(|r| r.view(form))
            .ok_or(Error::NoResults)
    }
}

impl Outcomes for Game {
    fn outcomes(&self) -> Option<&Results> {
        self.last_results.as_ref()
    }
}
