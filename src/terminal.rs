use anyhow::{Context, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};

use connect4_minimax::{game::Game, player::View, Cell, HEIGHT, WIDTH};

/// A coloured text board with keyboard input
pub struct TerminalView;

impl TerminalView {
    fn read_line(&self) -> Result<String> {
        let mut buffer = String::new();
        let read = stdin().read_line(&mut buffer)?;
        if read == 0 {
            anyhow::bail!("input closed");
        }
        Ok(buffer.trim().to_string())
    }
}

impl View for TerminalView {
    fn display(&mut self, game: &Game) -> Result<()> {
        let mut stdout = stdout();

        let header: String = (0..WIDTH).map(|column| column.to_string()).collect();
        stdout.queue(PrintStyledContent(style(header + "\n")))?;

        // top row first
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                let colour = match game.cell(row, column) {
                    Cell::PlayerOne => Color::Red,
                    Cell::PlayerTwo => Color::Yellow,
                    Cell::Empty => Color::DarkBlue,
                };
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(colour),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn get_user_move(&mut self, game: &Game) -> Result<usize> {
        loop {
            print!("{}, pick a column > ", game.player_to_move());
            stdout().flush().context("failed to flush to stdout")?;

            let input = self.read_line()?;
            match input.parse::<usize>() {
                Ok(column) if game.is_valid_move(column) => return Ok(column),
                Ok(column) => println!("Illegal column {}. Please try again", column),
                Err(_) => println!("Invalid number: {}", input),
            }
        }
    }

    fn report_move(&mut self, column: usize, name: &str) -> Result<()> {
        println!("{} chooses the column {}", name, column);
        Ok(())
    }

    fn report_to_user(&mut self, message: &str) -> Result<()> {
        println!("{}", message);
        Ok(())
    }

    fn get_answer(&mut self, question: &str) -> Result<String> {
        print!("{} ", question);
        stdout().flush().context("failed to flush to stdout")?;
        self.read_line()
    }
}
