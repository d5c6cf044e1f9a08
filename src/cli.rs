use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub subcommand: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a themed modpack archive
    #[command(alias = "g")]
    Generate(GenerateArgs),

    /// List game versions the service can target
    #[command(alias = "v")]
    Versions,

    /// List mod loaders the service can target
    #[command(alias = "l")]
    Loaders,

    /// Print shell completions for specified shell
    Completion {
        #[clap(value_enum)]
        shell: Shell
    }
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Theme for the generated modpack, put in "quotes"
    #[arg(long, short = 't')]
    pub theme: Option<String>,

    /// Target game version, shows a picker when omitted
    #[arg(long, short = 'g')]
    pub game_version: Option<String>,

    /// Target mod loader, shows a picker when omitted
    #[arg(long, short = 'l')]
    pub loader: Option<String>,

    /// Folder to save the modpack archive into
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Turn off sound feedback
    #[arg(long, short = 'm')]
    pub mute: bool
}
