use crate::{
    error::EngineError,
    evaluator::index,
    position::{completes_four, Cell},
    CELLS, HEIGHT, WIDTH,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// The game as owned by the controller: the grid, both players' names, whose
/// turn it is and how it stands
///
/// The search never mutates a `Game`; it copies one into a
/// [`Position`](crate::position::Position) for each decision.
#[derive(Clone, Debug)]
pub struct Game {
    cells: [Cell; CELLS], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    players: [String; 2],
    to_move: usize,
    num_moves: usize,
    last_move: Option<(usize, usize)>,
    /// The columns played so far, one digit per move
    pub moves: String,
    pub status: GameStatus,
}

impl Game {
    pub fn new(players: [String; 2]) -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
            heights: [0; WIDTH],
            players,
            to_move: 0,
            num_moves: 0,
            last_move: None,
            moves: String::new(),
            status: GameStatus::Playing,
        }
    }

    /// Plays a string of 0-based column digits, e.g. `"3342"`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, EngineError> {
        let mut game = Self::default();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    game.play_checked(column as usize)?;
                }
                None => {
                    return Err(EngineError::InvalidPosition(format!(
                        "could not parse '{}' as a valid move",
                        column_char
                    )))
                }
            }
        }
        Ok(game)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[index(row, column)]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn players(&self) -> &[String; 2] {
        &self.players
    }

    /// The index (0 or 1) of the player whose turn it is
    pub fn to_move(&self) -> usize {
        self.to_move
    }

    pub fn player_to_move(&self) -> &str {
        &self.players[self.to_move]
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The (row, column) of the most recently placed piece
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// The name of the winner, if the game has been won
    pub fn winner(&self) -> Option<&str> {
        match self.status {
            GameStatus::PlayerOneWin => Some(&self.players[0]),
            GameStatus::PlayerTwoWin => Some(&self.players[1]),
            _ => None,
        }
    }

    pub fn play_checked(&mut self, column: usize) -> Result<GameStatus, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if column >= WIDTH {
            return Err(EngineError::ColumnOutOfRange { column });
        }
        if !self.is_valid_move(column) {
            return Err(EngineError::ColumnFull { column });
        }

        let row = self.play(column);
        self.status = if completes_four(&self.cells, row, column) {
            // the mover has already been switched
            if self.to_move == 1 {
                GameStatus::PlayerOneWin
            } else {
                GameStatus::PlayerTwoWin
            }
        } else if self.num_moves == CELLS {
            GameStatus::Draw
        } else {
            GameStatus::Playing
        };
        self.moves.push_str(&column.to_string());

        Ok(self.status)
    }

    /// Drops the mover's piece into `column`, returning the row it lands on
    fn play(&mut self, column: usize) -> usize {
        let row = self.heights[column];
        self.cells[index(row, column)] = Cell::for_player(self.to_move);
        self.heights[column] += 1;
        self.num_moves += 1;
        self.last_move = Some((row, column));
        self.to_move = 1 - self.to_move;
        row
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(["Player 1".to_string(), "Player 2".to_string()])
    }
}
