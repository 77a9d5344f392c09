//! Heuristic scoring of unblocked four-in-a-row potential
//!
//! A window is any 4 contiguous tiles along a column, row or diagonal. A window
//! holding only one player's pieces (and empty tiles) is worth
//! [`POTENTIAL`]`[pieces]` to that player. A position's score is the sum over
//! every window of the windows good for the player being scored minus the
//! windows good for their opponent, so the score of one player is always the
//! negation of the other's.

use crate::{position::Cell, CELLS, HEIGHT, WIDTH};

/// Window weights, indexed by the number of one player's pieces in an unblocked window
pub const POTENTIAL: [i64; 5] = [0, 2, 100, 1_000, 100_000_000];

/// The weight of a completed four-in-a-row, dominating every other term
pub const WIN_SCORE: i64 = POTENTIAL[4];

/// Line directions as (row step, column step): vertical, horizontal,
/// diagonal up-right and diagonal down-right
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// The number of four-tile windows on the board
pub const NUM_WINDOWS: usize =
    WIDTH * (HEIGHT - 3) + HEIGHT * (WIDTH - 3) + 2 * (WIDTH - 3) * (HEIGHT - 3);

/// Index of a tile, stored left-to-right, bottom-to-top
pub(crate) const fn index(row: usize, column: usize) -> usize {
    column + WIDTH * row
}

fn in_bounds(row: isize, column: isize) -> bool {
    row >= 0 && row < HEIGHT as isize && column >= 0 && column < WIDTH as isize
}

/// Tile indices of the window starting at (row, column) and stepping in
/// `direction`, or `None` if any tile falls outside the board
pub(crate) fn window(row: isize, column: isize, direction: (isize, isize)) -> Option<[usize; 4]> {
    let (d_row, d_column) = direction;
    if !in_bounds(row, column) || !in_bounds(row + 3 * d_row, column + 3 * d_column) {
        return None;
    }
    let mut tiles = [0; 4];
    for (step, tile) in tiles.iter_mut().enumerate() {
        let step = step as isize;
        *tile = index(
            (row + step * d_row) as usize,
            (column + step * d_column) as usize,
        );
    }
    Some(tiles)
}

/// Every window that contains the tile at (row, column), at most 16
pub(crate) fn windows_through(row: usize, column: usize) -> impl Iterator<Item = [usize; 4]> {
    let (row, column) = (row as isize, column as isize);
    DIRECTIONS.into_iter().flat_map(move |(d_row, d_column)| {
        (0..4).filter_map(move |offset| {
            window(
                row - offset * d_row,
                column - offset * d_column,
                (d_row, d_column),
            )
        })
    })
}

/// Every window on the board
pub(crate) fn all_windows() -> impl Iterator<Item = [usize; 4]> {
    (0..HEIGHT as isize).flat_map(|row| {
        (0..WIDTH as isize).flat_map(move |column| {
            DIRECTIONS
                .into_iter()
                .filter_map(move |direction| window(row, column, direction))
        })
    })
}

/// Scores positions for a given player, either from scratch or locally around
/// a single tile
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluator {
    /// Also credit the split open-three shapes `_XX__` and `__XX_` on the bottom row
    pub bottom_row_open_three: bool,
}

impl Evaluator {
    /// Scores the whole board for `player` by visiting every window
    pub fn evaluate(&self, cells: &[Cell; CELLS], player: Cell) -> i64 {
        all_windows()
            .map(|tiles| window_score(cells, tiles, player))
            .sum::<i64>()
            + self.bottom_row_patterns(cells, player)
    }

    /// Scores, for `player`, only the terms that can change when the tile at
    /// (row, column) changes
    ///
    /// The difference between this value taken before and after a placement is
    /// exactly the change in [`Evaluator::evaluate`].
    pub fn local(&self, cells: &[Cell; CELLS], row: usize, column: usize, player: Cell) -> i64 {
        let mut total = windows_through(row, column)
            .map(|tiles| window_score(cells, tiles, player))
            .sum::<i64>();
        if row == 0 {
            total += self.bottom_row_patterns(cells, player);
        }
        total
    }

    fn bottom_row_patterns(&self, cells: &[Cell; CELLS], player: Cell) -> i64 {
        if !self.bottom_row_open_three {
            return 0;
        }
        // row 0 occupies the first WIDTH tiles
        cells[..WIDTH]
            .windows(5)
            .map(|tiles| {
                if is_split_three(tiles, player) {
                    POTENTIAL[3]
                } else if is_split_three(tiles, player.opponent()) {
                    -POTENTIAL[3]
                } else {
                    0
                }
            })
            .sum()
    }
}

fn is_split_three(tiles: &[Cell], player: Cell) -> bool {
    use Cell::Empty;
    match tiles {
        [Empty, a, b, Empty, Empty] | [Empty, Empty, a, b, Empty] => *a == player && *b == player,
        _ => false,
    }
}

fn window_score(cells: &[Cell; CELLS], tiles: [usize; 4], player: Cell) -> i64 {
    let mut own = 0;
    let mut opponent = 0;
    for &tile in tiles.iter() {
        match cells[tile] {
            Cell::Empty => {}
            cell if cell == player => own += 1,
            _ => opponent += 1,
        }
    }
    match (own, opponent) {
        (_, 0) => POTENTIAL[own],
        (0, _) => -POTENTIAL[opponent],
        // blocked for both players
        _ => 0,
    }
}
