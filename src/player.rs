//! Players and the presentation layer they talk to

use anyhow::{anyhow, Result};

use crate::{config::EngineConfig, game::Game, search::Solver};

/// Displays the game and interacts with the user
pub trait View {
    /// Draws the current board
    fn display(&mut self, game: &Game) -> Result<()>;

    /// Asks the user for a valid column (0-based) to play in `game`
    fn get_user_move(&mut self, game: &Game) -> Result<usize>;

    /// Announces the column a player has chosen
    fn report_move(&mut self, column: usize, name: &str) -> Result<()>;

    fn report_to_user(&mut self, message: &str) -> Result<()>;

    /// Asks a question and returns the answer
    fn get_answer(&mut self, question: &str) -> Result<String>;
}

/// A participant that chooses moves
pub trait Player {
    fn name(&self) -> &str;

    /// Chooses a column to play in `game`
    fn get_move(&mut self, game: &Game, view: &mut dyn View) -> Result<usize>;
}

/// A player that searches the game tree
pub struct ComputerPlayer {
    name: String,
    solver: Solver,
}

impl ComputerPlayer {
    pub fn new<S: Into<String>>(name: S, config: EngineConfig) -> Self {
        Self {
            name: name.into(),
            solver: Solver::new(config),
        }
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }
}

impl Player for ComputerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, game: &Game, view: &mut dyn View) -> Result<usize> {
        let column = self.solver.select_move(game)?;
        log::info!("{} chooses column {}", self.name, column);
        view.report_move(column, &self.name)?;
        Ok(column)
    }
}

/// A player whose moves are typed in through the view
pub struct HumanPlayer {
    name: String,
}

impl HumanPlayer {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, game: &Game, view: &mut dyn View) -> Result<usize> {
        let column = view.get_user_move(game)?;
        if !game.is_valid_move(column) {
            return Err(anyhow!("view returned unplayable column {}", column));
        }
        Ok(column)
    }
}

/// Creates a computer player if `name` contains "Computer", otherwise a human one
pub fn from_name(name: &str, config: EngineConfig) -> Box<dyn Player> {
    if name.contains("Computer") {
        Box::new(ComputerPlayer::new(name, config))
    } else {
        Box::new(HumanPlayer::new(name))
    }
}
