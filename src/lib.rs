//! Weighted dice, rolled together over repeated trials, and statistics over
//! the outcomes.
//!
//! ```
//! use montecarlo::{Analyzer, Die, Form, Game};
//!
//! let mut coin = Die::new(["H", "T"])?;
//! coin.set_weight("H", 3)?;
//!
//! let mut game = Game::new(vec![coin.clone(), coin]);
//! game.play(100)?;
//! assert_eq!(game.last_results(Form::Narrow)?.shape(), (200, 1));
//!
//! let analyzer = Analyzer::new(&game)?;
//! assert!(analyzer.jackpot() <= 100);
//! # Ok::<(), montecarlo::Error>(())
//! ```

mod analyzer;
pub mod config;
mod die;
mod error;
mod face;
mod game;
mod print;
mod results;

pub use analyzer::{Analyzer, Counts, FaceCounts};
pub use config::{Binding, GameConfig, ShapePolicy};
pub use die::{Die, WeightTable};
pub use error::{Error, Result};
pub use face::{Face, Weight};
pub use game::Game;
pub use print::PrintExt;
pub use results::{Form, Narrow, NarrowEntry, Outcomes, Results, ResultsView};
