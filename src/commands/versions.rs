use console::style;

use crate::{Result, AUTOMODS};

pub async fn versions() -> Result<()> {
    println!("{}", style("Available game versions:").bold());
    for version in AUTOMODS.game_versions().await? {
        println!("  {version}");
    }

    Ok(())
}

pub async fn loaders() -> Result<()> {
    println!("{}", style("Available mod loaders:").bold());
    for loader in AUTOMODS.loader_versions().await? {
        println!("  {loader}");
    }

    Ok(())
}
