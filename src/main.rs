//! Headless autoplay runner (default binary).
//!
//! Seeds a game with the deterministic bag generator, lets the default
//! brain play it to game over (or a piece budget), and prints the final
//! board dump with counters.
//!
//! Usage: `tetris-board [seed] [max-pieces]`

use anyhow::{anyhow, Result};

use tetris_board::core::{Action, Game, PieceBag};
use tetris_board::types::{BOARD_HEIGHT, BOARD_WIDTH};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let seed: u32 = match args.first() {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow!("invalid seed: {}", v))?,
        None => 1,
    };
    let max_pieces: u32 = match args.get(1) {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow!("invalid piece budget: {}", v))?,
        None => 500,
    };

    run(seed, max_pieces)
}

fn run(seed: u32, max_pieces: u32) -> Result<()> {
    let mut game = Game::new(BOARD_WIDTH, BOARD_HEIGHT, PieceBag::new(seed));
    game.set_brain_mode(true);

    while !game.game_over() && game.pieces_played() < max_pieces {
        game.tick(Action::Down);
    }

    println!("{}", game.board());
    println!(
        "seed {}: {} pieces, {} rows cleared{}",
        seed,
        game.pieces_played(),
        game.rows_cleared(),
        if game.game_over() { ", game over" } else { "" }
    );
    Ok(())
}
