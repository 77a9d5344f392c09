use crate::{
    error::EngineError,
    evaluator::{all_windows, index, window, Evaluator, DIRECTIONS},
    game::Game,
    CELLS, HEIGHT, WIDTH,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    /// The piece of player 0 or 1
    pub fn for_player(player: usize) -> Self {
        if player == 0 {
            Cell::PlayerOne
        } else {
            Cell::PlayerTwo
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Cell::PlayerOne => Cell::PlayerTwo,
            Cell::PlayerTwo => Cell::PlayerOne,
            Cell::Empty => Cell::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// The working position of a single search
///
/// Moves are applied and undone in place. The running score is kept from the
/// perspective of the player to move and is updated from the tiles around each
/// placed piece only, never by rescanning the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    cells: [Cell; CELLS], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    to_move: usize,
    num_moves: usize,
    latest: Option<(usize, usize)>,
    score: i64,
    evaluator: Evaluator,
    // columns applied since construction, used to restore `latest` on undo
    played: [usize; CELLS],
    num_played: usize,
    initial_latest: Option<(usize, usize)>,
}

impl Position {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
            heights: [0; WIDTH],
            to_move: 0,
            num_moves: 0,
            latest: None,
            score: 0,
            evaluator,
            played: [0; CELLS],
            num_played: 0,
            initial_latest: None,
        }
    }

    /// Builds a position from a grid snapshot, computing its score from scratch
    ///
    /// Fails if a piece floats above an empty tile, if `to_move` does not match
    /// the piece counts, if `latest` is not the top piece of its column or was
    /// not placed by the opponent of the mover, or if the board holds a
    /// four-in-a-row that does not run through `latest`.
    pub fn from_cells(
        cells: [Cell; CELLS],
        to_move: usize,
        latest: Option<(usize, usize)>,
        evaluator: Evaluator,
    ) -> Result<Self, EngineError> {
        if to_move > 1 {
            return Err(EngineError::InvalidPosition(format!(
                "player to move must be 0 or 1, got {}",
                to_move
            )));
        }

        let mut heights = [0; WIDTH];
        for (column, height) in heights.iter_mut().enumerate() {
            while *height < HEIGHT && !cells[index(*height, column)].is_empty() {
                *height += 1;
            }
            if (*height..HEIGHT).any(|row| !cells[index(row, column)].is_empty()) {
                return Err(EngineError::InvalidPosition(format!(
                    "column {} has a piece above an empty tile",
                    column
                )));
            }
        }

        let ones = cells.iter().filter(|&&cell| cell == Cell::PlayerOne).count();
        let twos = cells.iter().filter(|&&cell| cell == Cell::PlayerTwo).count();
        if ones != twos + to_move {
            return Err(EngineError::InvalidPosition(format!(
                "player {} cannot be to move with {} and {} pieces on the board",
                to_move, ones, twos
            )));
        }

        if let Some((row, column)) = latest {
            if column >= WIDTH || heights[column] != row + 1 {
                return Err(EngineError::InvalidPosition(format!(
                    "latest move ({}, {}) is not the top of its column",
                    row, column
                )));
            }
            if cells[index(row, column)] != Cell::for_player(1 - to_move) {
                return Err(EngineError::InvalidPosition(format!(
                    "latest move ({}, {}) was not played by player {}",
                    row,
                    column,
                    1 - to_move
                )));
            }
        }

        // the game stops at the first four, so every four must use the last piece
        let latest_tile = latest.map(|(row, column)| index(row, column));
        let stale_four = all_windows()
            .filter(|tiles| is_four(&cells, tiles))
            .any(|tiles| latest_tile.map_or(true, |tile| !tiles.contains(&tile)));
        if stale_four {
            return Err(EngineError::InvalidPosition(
                "four-in-a-row not completed by the latest move".to_string(),
            ));
        }

        let num_moves = heights.iter().sum();
        let score = evaluator.evaluate(&cells, Cell::for_player(to_move));

        Ok(Self {
            cells,
            heights,
            to_move,
            num_moves,
            latest,
            score,
            evaluator,
            played: [0; CELLS],
            num_played: 0,
            initial_latest: latest,
        })
    }

    /// Copies the externally owned game into a fresh working position
    pub fn from_game(game: &Game, evaluator: Evaluator) -> Result<Self, EngineError> {
        Self::from_cells(*game.cells(), game.to_move(), game.last_move(), evaluator)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[index(row, column)]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// The index (0 or 1) of the player to move
    pub fn to_move(&self) -> usize {
        self.to_move
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The (row, column) of the most recently placed piece
    pub fn latest(&self) -> Option<(usize, usize)> {
        self.latest
    }

    /// The running score, from the perspective of the player to move
    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn evaluator(&self) -> Evaluator {
        self.evaluator
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    fn check_move(&self, column: usize) -> Result<(), EngineError> {
        if column >= WIDTH {
            return Err(EngineError::ColumnOutOfRange { column });
        }
        if self.heights[column] >= HEIGHT {
            return Err(EngineError::ColumnFull { column });
        }
        Ok(())
    }

    /// Drops the mover's piece into `column` and hands the move to the opponent
    ///
    /// The score is negated to the new mover's perspective, then corrected by
    /// the change in every window through the new piece.
    pub fn apply_move(&mut self, column: usize) -> Result<(), EngineError> {
        self.check_move(column)?;

        let row = self.heights[column];
        let piece = Cell::for_player(self.to_move);
        let next = piece.opponent();

        let before = self.evaluator.local(&self.cells, row, column, next);
        self.cells[index(row, column)] = piece;
        let after = self.evaluator.local(&self.cells, row, column, next);

        self.score = -self.score + (after - before);
        self.heights[column] += 1;
        self.num_moves += 1;
        self.to_move = 1 - self.to_move;
        self.latest = Some((row, column));
        self.played[self.num_played] = column;
        self.num_played += 1;
        Ok(())
    }

    /// Reverses the `apply_move(column)` that produced the current position,
    /// restoring `prior_score` as the running score
    ///
    /// Fails without changing anything unless `column` holds the latest piece
    /// and that piece belongs to the player who becomes the mover again.
    pub fn undo_move(&mut self, column: usize, prior_score: i64) -> Result<(), EngineError> {
        let mismatch = EngineError::UndoMismatch {
            column,
            latest: self.latest,
        };
        if column >= WIDTH || self.heights[column] == 0 || self.num_played == 0 {
            return Err(mismatch);
        }
        let row = self.heights[column] - 1;
        let previous = 1 - self.to_move;
        if self.latest != Some((row, column))
            || self.played[self.num_played - 1] != column
            || self.cells[index(row, column)] != Cell::for_player(previous)
        {
            return Err(mismatch);
        }

        self.cells[index(row, column)] = Cell::Empty;
        self.heights[column] -= 1;
        self.num_moves -= 1;
        self.to_move = previous;
        self.score = prior_score;
        self.num_played -= 1;
        self.played[self.num_played] = 0;
        self.latest = match self.num_played {
            0 => self.initial_latest,
            n => {
                let column = self.played[n - 1];
                Some((self.heights[column] - 1, column))
            }
        };
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == CELLS
    }

    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.is_won()
    }

    /// Whether the latest piece completed a four-in-a-row
    pub fn is_won(&self) -> bool {
        // nobody can have four pieces before the 7th move
        if self.num_moves < 7 {
            return false;
        }
        match self.latest {
            Some((row, column)) => completes_four(&self.cells, row, column),
            None => false,
        }
    }
}

fn is_four(cells: &[Cell; CELLS], tiles: &[usize; 4]) -> bool {
    let owner = cells[tiles[0]];
    !owner.is_empty() && tiles[1..].iter().all(|&tile| cells[tile] == owner)
}

/// Whether the piece on top of `column` at `row` is part of a four-in-a-row
///
/// Checks the vertical line below the piece and, in each other direction,
/// the four lines that start up to 3 tiles before it.
pub(crate) fn completes_four(cells: &[Cell; CELLS], row: usize, column: usize) -> bool {
    let owner = cells[index(row, column)];
    if owner.is_empty() {
        return false;
    }

    // check vertical alignment
    if row >= 3 && (1..4).all(|step| cells[index(row - step, column)] == owner) {
        return true;
    }

    // check horizontal and diagonal alignment
    let (row, column) = (row as isize, column as isize);
    DIRECTIONS[1..].iter().any(|&(d_row, d_column)| {
        (0..4).any(|offset| {
            window(row - offset * d_row, column - offset * d_column, (d_row, d_column))
                .map_or(false, |tiles| is_four(cells, &tiles))
        })
    })
}

impl Default for Position {
    fn default() -> Self {
        Self::new(Evaluator::default())
    }
}
