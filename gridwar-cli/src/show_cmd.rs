//! Show command - print the starting board

use anyhow::{Context, Result};
use clap::Args;

use gridwar_core::{Game, Side};

#[derive(Args)]
pub struct ShowArgs {
    /// Side whose view to print (player or enemy)
    #[arg(long, default_value = "player")]
    pub side: String,

    /// Print the debug grid with unit ids instead of the text view
    #[arg(long)]
    pub debug: bool,

    /// Print the game summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let side: Side = args
        .side
        .parse()
        .with_context(|| format!("Invalid --side value: {}", args.side))?;
    let game = Game::new();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.summary())?);
    } else if args.debug {
        print!("{}", game.board());
    } else {
        println!("{}", game.view(side));
    }

    Ok(())
}
