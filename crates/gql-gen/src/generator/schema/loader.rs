use std::path::{Path, PathBuf};

use anyhow::Context as _;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use graphql_parser::schema::parse_schema;
use serde_json::json;

use super::introspection::{INTROSPECTION_QUERY, IntrospectionResponse};
use crate::generator::SchemaDocument;

/// Where the schema comes from: an HTTP endpoint answering introspection, or
/// an SDL file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaSource {
  Endpoint(String),
  File(PathBuf),
}

impl SchemaSource {
  pub(crate) fn from_arg(arg: &str) -> Self {
    if arg.starts_with("http://") || arg.starts_with("https://") {
      Self::Endpoint(arg.to_string())
    } else {
      Self::File(PathBuf::from(arg))
    }
  }

  pub(crate) fn label(&self) -> String {
    match self {
      Self::Endpoint(url) => url.clone(),
      Self::File(path) => path.display().to_string(),
    }
  }

  /// Resolves the schema to its canonical document form. Any failure here
  /// aborts the run before a single stage executes.
  pub(crate) async fn load(&self) -> anyhow::Result<SchemaDocument> {
    match self {
      Self::File(path) => load_file(path).await,
      Self::Endpoint(url) => load_endpoint(url).await,
    }
  }
}

async fn load_file(path: &Path) -> anyhow::Result<SchemaDocument> {
  let file = AsyncMmapFile::open(path)
    .await
    .with_context(|| format!("failed to open schema file {}", path.display()))?;
  let content = std::str::from_utf8(file.as_slice()).context("schema file is not valid UTF-8")?;

  Ok(
    parse_schema::<String>(content)
      .with_context(|| format!("failed to parse schema file {}", path.display()))?
      .into_static(),
  )
}

async fn load_endpoint(url: &str) -> anyhow::Result<SchemaDocument> {
  let response: IntrospectionResponse = reqwest::Client::new()
    .post(url)
    .json(&json!({ "query": INTROSPECTION_QUERY }))
    .send()
    .await
    .with_context(|| format!("failed to reach schema endpoint {url}"))?
    .error_for_status()
    .with_context(|| format!("schema endpoint {url} answered with an error status"))?
    .json()
    .await
    .context("schema endpoint returned malformed introspection JSON")?;

  if let Some(errors) = &response.errors
    && let Some(first) = errors.first()
  {
    anyhow::bail!("schema endpoint rejected introspection: {}", first.message);
  }

  let data = response
    .data
    .ok_or_else(|| anyhow::anyhow!("schema endpoint returned no introspection data"))?;

  let sdl = data.schema.to_sdl();
  Ok(
    parse_schema::<String>(&sdl)
      .context("introspected schema rendered to unparseable SDL")?
      .into_static(),
  )
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn arg_classification() {
    assert_eq!(
      SchemaSource::from_arg("http://localhost:9876/graphql"),
      SchemaSource::Endpoint("http://localhost:9876/graphql".to_string())
    );
    assert_eq!(
      SchemaSource::from_arg("schema.graphql"),
      SchemaSource::File(PathBuf::from("schema.graphql"))
    );
  }

  #[tokio::test]
  async fn file_source_loads_and_parses() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "type Query {{ ok: Boolean! }}").unwrap();

    let source = SchemaSource::File(file.path().to_path_buf());
    let document = source.load().await.unwrap();
    assert_eq!(document.definitions.len(), 1);
  }

  #[tokio::test]
  async fn missing_file_is_a_fatal_error() {
    let source = SchemaSource::File(PathBuf::from("/definitely/not/here.graphql"));
    assert!(source.load().await.is_err());
  }
}
