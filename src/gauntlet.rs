//! Computer-vs-computer play from every two-move opening

use anyhow::{bail, Context};
use indicatif::*;
use rayon::prelude::*;

use std::sync::mpsc::*;
use std::thread;

use crate::{
    config::EngineConfig,
    error::EngineError,
    game::{Game, GameStatus},
    search::Solver,
    WIDTH,
};

/// One game played out from a fixed opening
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// The first player's column, then the second player's
    pub opening: (usize, usize),
    pub moves: String,
    pub status: GameStatus,
}

#[derive(Clone, Debug, Default)]
pub struct GauntletReport {
    pub records: Vec<GameRecord>,
}

impl GauntletReport {
    fn count(&self, status: GameStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    pub fn player_one_wins(&self) -> usize {
        self.count(GameStatus::PlayerOneWin)
    }

    pub fn player_two_wins(&self) -> usize {
        self.count(GameStatus::PlayerTwoWin)
    }

    pub fn draws(&self) -> usize {
        self.count(GameStatus::Draw)
    }
}

/// Every opening of one move per player, WIDTH * WIDTH in all
pub fn openings() -> Vec<(usize, usize)> {
    (0..WIDTH)
        .flat_map(|first| (0..WIDTH).map(move |second| (first, second)))
        .collect()
}

/// Plays a game from `opening` to the end, `first` choosing for player 1 and
/// `second` for player 2
pub fn play_out(
    opening: (usize, usize),
    first: EngineConfig,
    second: EngineConfig,
) -> Result<GameRecord, EngineError> {
    let mut game = Game::new(["Computer 1".to_string(), "Computer 2".to_string()]);
    game.play_checked(opening.0)?;
    game.play_checked(opening.1)?;

    let mut solvers = [Solver::new(first), Solver::new(second)];
    while !game.is_over() {
        let column = solvers[game.to_move()].select_move(&game)?;
        game.play_checked(column)?;
    }

    Ok(GameRecord {
        opening,
        moves: game.moves,
        status: game.status,
    })
}

/// Plays every opening in parallel, one single-threaded search per game
pub fn run(
    first: EngineConfig,
    second: EngineConfig,
    show_progress: bool,
) -> anyhow::Result<GauntletReport> {
    run_openings(openings(), first, second, show_progress)
}

/// Plays the given openings in parallel, failing on the first game that
/// errors or if any game did not report back
pub fn run_openings(
    openings: Vec<(usize, usize)>,
    first: EngineConfig,
    second: EngineConfig,
    show_progress: bool,
) -> anyhow::Result<GauntletReport> {
    let total = openings.len();

    let progress = if show_progress {
        ProgressBar::new(total as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing openings: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let (tx, rx) = channel();
    let games = thread::spawn(move || {
        // stops starting new games once the receiver hangs up
        openings
            .par_iter()
            .try_for_each_with(tx, |tx, &opening| tx.send(play_out(opening, first, second)))
    });

    let mut records = Vec::with_capacity(total);
    let mut failure = None;
    for result in rx.iter() {
        match result {
            Ok(record) => {
                log::debug!(
                    "opening {:?}: {:?} after {}",
                    record.opening,
                    record.status,
                    record.moves
                );
                records.push(record);
                progress.inc(1);
            }
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }
    drop(rx);
    let joined = games.join();
    progress.finish();

    if let Some(err) = failure {
        return Err(err).context("gauntlet game failed");
    }
    if joined.is_err() {
        bail!("a gauntlet game panicked");
    }
    if records.len() != total {
        bail!("only {} of {} gauntlet games finished", records.len(), total);
    }

    // parallel games finish in any order
    records.sort_by_key(|record| record.opening);
    let report = GauntletReport { records };
    log::info!(
        "gauntlet finished: {} wins for player 1, {} for player 2, {} draws",
        report.player_one_wins(),
        report.player_two_wins(),
        report.draws()
    );
    Ok(report)
}
