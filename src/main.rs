//! Comanda CLI — steakhouse ordering from the terminal.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "comanda",
    version,
    about = "Steakhouse ordering core — deterministic carts, quota validation, kitchen tickets"
)]
struct Cli {
    #[command(subcommand)]
    command: comanda::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = comanda::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
