//! `wplan`, a weekly lesson-plan board CLI.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
