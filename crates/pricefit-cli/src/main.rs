mod cmd;

use crate::cmd::cli::Cli;
use crate::cmd::config::Config;

use clap::Parser;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let cfg: Config = cli.into_config();
    if let Err(e) = cfg.run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
