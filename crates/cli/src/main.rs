use anyhow::Result;
use clap::Parser;

use args::Cli;

mod args;
mod run;

fn main() -> Result<()> {
    let Cli::Run(args) = Cli::parse();
    let exit_code = run::execute(&args)?;
    std::process::exit(exit_code);
}
