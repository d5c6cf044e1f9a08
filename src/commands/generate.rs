use std::env;
use std::time::Duration;

use console::style;
use dialoguer::{Input, Select};
use indicatif::ProgressBar;

use crate::api::automods::AutomodsApi;
use crate::cli::GenerateArgs;
use crate::generator::{GeneratorSession, SubmitOutcome};
use crate::sound::{Cue, FeedbackEmitter};
use crate::structs::request::ModpackRequest;
use crate::{Error, Result};

pub async fn generate(args: GenerateArgs) -> Result<()> {
    let feedback = FeedbackEmitter::new(args.mute);
    let mut session = GeneratorSession::new(AutomodsApi::default(), feedback);

    let spinner = spinner("Fetching available versions...");
    session.initialize().await;
    spinner.finish_and_clear();

    if !session.is_ready() {
        return Err(Error::Other("the automods service didn't provide its version lists, try again later".to_string()));
    }

    let game_version = match args.game_version {
        Some(version) => {
            if !session.game_versions().contains(&version) {
                return Err(Error::Other(format!("{version} is not an available game version, see `automods versions`")));
            }
            version
        },
        None => {
            session.feedback().play(Cue::Interact);
            let versions = session.game_versions().to_vec();
            let picked = Select::new()
                .with_prompt("Choose the game version")
                .items(&versions)
                .interact()?;
            versions[picked].to_owned()
        }
    };

    let loader = match args.loader {
        Some(loader) => {
            if !session.loaders().contains(&loader) {
                return Err(Error::Other(format!("{loader} is not an available loader, see `automods loaders`")));
            }
            loader
        },
        None => {
            session.feedback().play(Cue::Interact);
            let loaders = session.loaders().to_vec();
            let picked = Select::new()
                .with_prompt("Choose the mod loader")
                .items(&loaders)
                .interact()?;
            loaders[picked].to_owned()
        }
    };

    let theme = match args.theme {
        Some(theme) => theme,
        None => {
            session.feedback().play(Cue::Interact);
            Input::new()
                .with_prompt("Modpack theme")
                .allow_empty(true)
                .interact_text()?
        }
    };

    let request = ModpackRequest::new(game_version, loader, theme);
    let output_dir = match args.output {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let spinner = self::spinner("Generating your modpack... this can take a few minutes");
    let outcome = session.submit(&request, &output_dir).await?;
    spinner.finish_and_clear();

    if let SubmitOutcome::Saved(path) = outcome {
        println!("{} saved as {}",
            style("Modpack generated!").green().bold(),
            style(path.display()).bold()
        );
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
