//! CLI entry point for the Nine Tiles Panic town search

use clap::Parser;
use ninetiles::io::cli::{Cli, CommandRunner};

fn main() -> ninetiles::Result<()> {
    let cli = Cli::parse();
    let mut runner = CommandRunner::new(cli);
    runner.run()
}
