use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use std::path::PathBuf;

use connect4_minimax::{
    config::EngineConfig,
    gauntlet,
    game::{Game, GameStatus},
    player::{self, Player, View},
};

mod terminal;
use terminal::TerminalView;

/// Play Connect 4 against a depth-limited minimax agent.
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax agent")]
struct Cli {
    /// Path to TOML engine configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Override the search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Prefer faster wins by adding the remaining depth to win scores
    #[arg(long)]
    win_depth_bonus: bool,

    /// Credit split open threes on the bottom row
    #[arg(long)]
    bottom_row_open_three: bool,

    /// Name of the first player (include 'Computer' for a computer player)
    #[arg(long)]
    player_one: Option<String>,

    /// Name of the second player (include 'Computer' for a computer player)
    #[arg(long)]
    player_two: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play the computer against itself from every two-move opening
    Gauntlet {
        /// Search depth of the first player
        #[arg(long)]
        depth_one: Option<usize>,

        /// Search depth of the second player
        #[arg(long)]
        depth_two: Option<usize>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    config.win_depth_bonus |= cli.win_depth_bonus;
    config.bottom_row_open_three |= cli.bottom_row_open_three;
    config.validate()?;

    match cli.command {
        Some(Command::Gauntlet {
            depth_one,
            depth_two,
            no_progress,
        }) => run_gauntlet(config, depth_one, depth_two, !no_progress),
        None => play(config, cli.player_one, cli.player_two),
    }
}

fn run_gauntlet(
    config: EngineConfig,
    depth_one: Option<usize>,
    depth_two: Option<usize>,
    show_progress: bool,
) -> Result<()> {
    let first = EngineConfig {
        depth: depth_one.unwrap_or(config.depth),
        ..config
    };
    let second = EngineConfig {
        depth: depth_two.unwrap_or(config.depth),
        ..config
    };
    first.validate()?;
    second.validate()?;

    let report = gauntlet::run(first, second, show_progress)?;
    for record in report.records.iter() {
        println!("{:?} {:?} {}", record.opening, record.status, record.moves);
    }
    println!(
        "Player 1 (depth {}): {} wins, Player 2 (depth {}): {} wins, {} draws",
        first.depth,
        report.player_one_wins(),
        second.depth,
        report.player_two_wins(),
        report.draws()
    );
    Ok(())
}

fn play(config: EngineConfig, player_one: Option<String>, player_two: Option<String>) -> Result<()> {
    let mut view = TerminalView;

    println!("Welcome to Connect 4\n");

    let names = [
        match player_one {
            Some(name) => name,
            None => view.get_answer(
                "Enter the name of the first player.\n(Include 'Computer' if you want a computer player)",
            )?,
        },
        match player_two {
            Some(name) => name,
            None => view.get_answer(
                "Enter the name of the second player.\n(Include 'Computer' if you want a computer player)",
            )?,
        },
    ];
    let mut players: [Box<dyn Player>; 2] = [
        player::from_name(&names[0], config),
        player::from_name(&names[1], config),
    ];
    let mut game = Game::new(names);

    // game loop
    loop {
        view.display(&game)?;

        match game.status {
            GameStatus::Playing => {
                let next_move = players[game.to_move()].get_move(&game, &mut view)?;

                if let Err(err) = game.play_checked(next_move) {
                    view.report_to_user(&err.to_string())?;
                    // try the move again
                    continue;
                }
            }

            // end states
            GameStatus::PlayerOneWin | GameStatus::PlayerTwoWin => {
                let winner = game.winner().unwrap_or_default().to_string();
                log::info!("{} wins after {}", winner, game.moves);
                view.report_to_user(&format!("{} wins!", winner))?;
                break;
            }
            GameStatus::Draw => {
                log::info!("draw after {}", game.moves);
                view.report_to_user("Draw!")?;
                break;
            }
        }
    }
    Ok(())
}
