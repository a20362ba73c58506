//! fsq - query the filesystem with a SQL dialect.

use anyhow::Result;
use clap::Parser as ClapParser;

use fsq::repl;

/// Query the filesystem with a SQL dialect.
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// The query to run; omit it to start the interactive shell
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if args.query.is_empty() {
        repl::start()?;
        return Ok(());
    }

    fsq::run(&args.query.join(" "))?;
    Ok(())
}
