mod api;
mod cli;
mod commands;
mod error;
mod generator;
mod sound;
mod structs;

use api::automods::AutomodsApi;
use clap::{CommandFactory, Parser};
use cli::{Args, Commands};
use error::{Error, Result};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref AUTOMODS: AutomodsApi = AutomodsApi::default();
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    if let Err(err) = match args.subcommand {
        Commands::Generate(args) => commands::generate::generate(args).await,
        Commands::Versions => commands::versions::versions().await,
        Commands::Loaders => commands::versions::loaders().await,
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "automods", &mut std::io::stdout());
            Ok(())
        }
    } {
        eprintln!("{}", err)
    }
}
