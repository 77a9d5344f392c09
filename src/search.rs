//! A depth-limited agent to play Connect 4

use crate::{
    config::EngineConfig,
    error::EngineError,
    evaluator::WIN_SCORE,
    game::{Game, GameStatus},
    position::Position,
    CELLS, WIDTH,
};

/// The largest magnitude any search value can reach, used as the search window bounds
///
/// Leaves never reach this: the static score stays far below [`WIN_SCORE`]
/// until a four-in-a-row ends the line, and a win scores at most
/// `WIN_SCORE + CELLS` with the depth bonus on.
pub const MAX_SCORE: i64 = WIN_SCORE + CELLS as i64 + 1;

/// The minimum possible score of a search
pub const MIN_SCORE: i64 = -MAX_SCORE;

struct MoveSorter {
    size: usize,
    // column and score
    moves: [(usize, i64); WIDTH],
}

impl MoveSorter {
    pub fn new() -> Self {
        Self {
            size: 0,
            moves: [(0, 0); WIDTH],
        }
    }
    pub fn push(&mut self, column: usize, score: i64) {
        let mut pos = self.size;
        self.size += 1;
        while pos != 0 && self.moves[pos - 1].1 > score {
            self.moves[pos] = self.moves[pos - 1];
            pos -= 1;
        }
        self.moves[pos] = (column, score);
    }
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
impl Iterator for MoveSorter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match self.size {
            0 => None,
            _ => {
                self.size -= 1;
                Some(self.moves[self.size].0)
            }
        }
    }
}

/// Returns a slice ordering the columns from the middle outwards, as
/// the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) + (i % 2) * (i / 2 + 1) - (1 - i % 2) * (i / 2);
        i += 1;
    }
    move_order
}

/// The best move found by a search and its value for the player to move
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: usize,
    pub score: i64,
}

/// An agent to pick Connect 4 moves
///
/// # Notes
/// This agent runs a negamax search with fail-soft alpha-beta pruning to a
/// fixed depth, applying and undoing moves on a single [`Position`]. Every
/// call to [`Solver::pick_move`] leaves the position exactly as it found it.
///
/// # Position Scoring
/// Values are always from the perspective of the player to move. A move that
/// completes four-in-a-row is worth [`WIN_SCORE`] (plus the remaining depth if
/// `win_depth_bonus` is set), a move that fills the board without a win is
/// worth 0, and a move at the depth limit is worth its heuristic score.
#[derive(Clone, Debug)]
pub struct Solver {
    config: EngineConfig,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            node_count: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Chooses a column for the player to move in `game`, searching the
    /// configured depth
    pub fn select_move(&mut self, game: &Game) -> Result<usize, EngineError> {
        if game.status != GameStatus::Playing {
            return Err(EngineError::GameOver);
        }
        let mut position = Position::from_game(game, self.config.evaluator())?;

        let nodes_before = self.node_count;
        let outcome = self.pick_move(&mut position, self.config.depth, MIN_SCORE, MAX_SCORE)?;
        log::debug!(
            "depth {}: column {} scores {} after {} nodes",
            self.config.depth,
            outcome.column,
            outcome.score,
            self.node_count - nodes_before
        );
        Ok(outcome.column)
    }

    /// Searches `depth` plies beyond each candidate move within the window
    /// (`low`, `high`)
    ///
    /// Returns the best column and its value for the player to move. A value
    /// at or above `high` is a lower bound, as the remaining candidates are
    /// pruned. Fails with [`EngineError::NoValidMoves`] on a full board.
    pub fn pick_move(
        &mut self,
        position: &mut Position,
        depth: usize,
        mut low: i64,
        high: i64,
    ) -> Result<SearchOutcome, EngineError> {
        self.node_count += 1;

        let moves = self.order_moves(position)?;

        let mut best: Option<SearchOutcome> = None;
        for column in moves {
            // if the best score reaches high, a perfect opponent will avoid this branch
            if best.map_or(false, |best| best.score >= high) {
                break;
            }

            let prior_score = position.score();
            position.apply_move(column)?;

            let score = if position.is_won() {
                self.win_score(depth)
            } else if position.is_full() {
                0
            } else if depth > 0 {
                // the search window is flipped for the other player
                let reply = self.pick_move(position, depth - 1, -high, -low);
                match reply {
                    Ok(reply) => -reply.score,
                    Err(err) => {
                        position.undo_move(column, prior_score)?;
                        return Err(err);
                    }
                }
            } else {
                -position.score()
            };

            position.undo_move(column, prior_score)?;

            if best.map_or(true, |best| score > best.score) {
                best = Some(SearchOutcome { column, score });
                if score > low {
                    low = score;
                }
            }
        }

        best.ok_or(EngineError::NoValidMoves)
    }

    /// The value, for the player who just moved, of completing four-in-a-row
    /// with `depth` plies of search remaining
    fn win_score(&self, depth: usize) -> i64 {
        if self.config.win_depth_bonus {
            WIN_SCORE + depth.min(CELLS) as i64
        } else {
            WIN_SCORE
        }
    }

    /// Orders the valid columns by their one-ply score for the player to move,
    /// best first, breaking ties from the middle outwards
    fn order_moves(&self, position: &mut Position) -> Result<MoveSorter, EngineError> {
        let mut moves = MoveSorter::new();
        // reversing move order to put edges first means that among equal
        // scores the central columns are searched first
        for &column in move_order().iter().rev() {
            if position.is_valid_move(column) {
                let prior_score = position.score();
                position.apply_move(column)?;
                let score = -position.score();
                position.undo_move(column, prior_score)?;
                moves.push(column, score);
            }
        }
        if moves.is_empty() {
            return Err(EngineError::NoValidMoves);
        }
        Ok(moves)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Chooses a column for the player to move in `game` with a `depth` ply search
pub fn select_move(game: &Game, depth: usize) -> Result<usize, EngineError> {
    Solver::new(EngineConfig {
        depth,
        ..EngineConfig::default()
    })
    .select_move(game)
}
