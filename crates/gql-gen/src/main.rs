#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod generator;
mod ui;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command);
      ui::commands::generate_code(config, &colors).await?;
    }
    Commands::Init { output } => ui::commands::init_project(&output, &colors).await?,
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { inputs } => ui::commands::list_operations(&inputs, &colors).await?,
    },
  }

  Ok(())
}
