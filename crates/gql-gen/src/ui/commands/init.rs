use std::path::Path;

use crossterm::style::Stylize;

use crate::ui::Colors;

/// A placeholder module with the fallback-only macro and an empty registry,
/// so `graphql!` call sites fail with a pointed message instead of a missing
/// module until the first real generation run.
const STUB_MODULE: &str = r#"// Generated by gql-gen. Do not edit by hand.
// Schema source: none (stub module, run `gql-gen generate`)

#[macro_export]
macro_rules! graphql {
  ($other:literal) => {
    compile_error!("no generated documents yet; run `gql-gen generate`")
  };
}

pub static DOCUMENT_REGISTRY: &[(&str, &str)] = &[];
"#;

pub async fn init_project(output: &Path, colors: &Colors) -> anyhow::Result<()> {
  if let Some(parent) = output.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(output, STUB_MODULE).await?;

  println!(
    "{} {}",
    "Wrote stub module:".with(colors.label()),
    output.display().to_string().with(colors.value())
  );
  Ok(())
}
