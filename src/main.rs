// Entrypoint for the CLI application. `main` stays small: parse arguments,
// hand them to the UI dispatcher, and report failures in red on stderr.

use callerid::{cli::Cli, ui};
use clap::Parser;
use crossterm::style::Stylize;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    if let Err(err) = ui::run(args) {
        eprintln!("{}", err.to_string().as_str().red());
        std::process::exit(1);
    }
    Ok(())
}
