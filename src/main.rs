use anyhow::Result;
use clap::Parser;

use terminal_wayfinder::commands::{self, CommonOpts, WayfinderCommand};

#[derive(Parser, Debug)]
#[command(name = "terminal_wayfinder", version, about = "Airport terminal wayfinding: locations, routes, tracking")]
struct Cli {
    #[command(flatten)]
    common: CommonOpts,
    #[command(subcommand)]
    command: WayfinderCommand,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::cmd_wayfinder(cli.common, cli.command)
}
