use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "gql-gen")]
#[command(author, version, about = "GraphQL to Rust code generator")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Generate typed documents and schema types from a GraphQL schema
  Generate(GenerateCommand),
  /// Write a stub output module so a fresh project compiles before the
  /// first generation run
  Init {
    /// Path of the stub module to write
    #[arg(short, long, value_name = "FILE", default_value = "src/gql.rs")]
    output: PathBuf,
  },
  /// List information plucked from project sources
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// GraphQL schema source: an SDL file path or an http(s) endpoint to
  /// introspect
  #[arg(short, long, value_name = "FILE_OR_URL", default_value = "http://localhost:9876/graphql")]
  pub schema: String,

  /// Path where the generated module will be written
  #[arg(short, long, value_name = "FILE", default_value = "src/gql.rs")]
  pub output: PathBuf,

  /// Glob of Rust sources to pluck `graphql!` documents from
  #[arg(short, long, value_name = "GLOB", default_value = "src/**/*.rs")]
  pub inputs: String,

  /// Enable verbose output with per-document details
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all named operations and fragments found in project sources
  Operations {
    /// Glob of Rust sources to pluck `graphql!` documents from
    #[arg(short, long, value_name = "GLOB", default_value = "src/**/*.rs")]
    inputs: String,
  },
}
