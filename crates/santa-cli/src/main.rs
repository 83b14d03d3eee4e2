use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    draw::{self, DrawArgs},
    verify::{self, VerifyArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "secret-santa",
    about = "Generate a Secret Santa scenario where everyone gives and receives the same number of gifts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw givers and givees for the given people.
    Draw(DrawArgs),
    /// Check an existing assignment against an exchange configuration.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Draw(args) => draw::run(&args),
        Command::Verify(args) => verify::run(&args),
    }
}
