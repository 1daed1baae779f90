use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::generator::documents::SourceDocument;
use crate::generator::orchestrator::{GenerationStats, Orchestrator};
use crate::generator::pluck;
use crate::generator::schema::loader::SchemaSource;
use crate::ui::{Colors, GenerateCommand};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub schema: SchemaSource,
  pub output: PathBuf,
  pub inputs: String,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand { schema, output, inputs, verbose, quiet } = command;
    Self { schema: SchemaSource::from_arg(&schema), output, inputs, verbose, quiet }
  }

  /// Module path segment the generated `graphql!` macro expands through,
  /// taken from the output file name.
  fn module_name(&self) -> String {
    self
      .output
      .file_stem()
      .and_then(|stem| stem.to_str())
      .unwrap_or("gql")
      .to_string()
  }

  async fn pluck_sources(&self) -> anyhow::Result<Vec<SourceDocument>> {
    let mut documents = Vec::new();
    for path in pluck::scan_inputs(&self.inputs)? {
      let content = tokio::fs::read_to_string(&path).await?;
      documents.extend(pluck::pluck_documents(&path, &content)?);
    }
    Ok(documents)
  }

  async fn write_output(&self, code: &str) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, code).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<22} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading GraphQL schema from: {}", self.config.schema.label())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_plucking(&self) {
    self.info(
      &format!("Plucking documents from: {}", self.config.inputs)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_documents(&self, orchestrator: &Orchestrator) {
    if !self.config.verbose {
      return;
    }
    for source in orchestrator.sources() {
      for named in &source.operations {
        self.stat("Document:", format!("{} ({})", named.derived_name, source.source.origin.display()));
      }
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Schema types:", stats.schema_types.to_string());
    self.stat("Operations:", stats.operations.to_string());
    self.stat("Fragments:", stats.fragments.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.as_str().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated typed GraphQL module".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let schema = config.schema.load().await?;

  logger.log_plucking();
  let plucked = config.pluck_sources().await?;

  let orchestrator = Orchestrator::new(&schema, plucked, &config.module_name(), &config.schema.label())?;
  logger.log_documents(&orchestrator);

  let (code, stats) = orchestrator.generate()?;
  logger.print_statistics(&stats);
  logger.print_warnings(&stats);

  logger.log_writing();
  config.write_output(&code).await?;

  logger.log_success();
  Ok(())
}
