//! Orchestration for the GraphQL to Rust code generation pipeline.
//!
//! The `Orchestrator` owns the schema index and the retained source documents
//! and runs the four synthesis stages in their fixed order, handing the
//! fragments to the stitcher. It is the only entry point the CLI uses.

use anyhow::Context;

use crate::generator::SchemaDocument;
use crate::generator::documents::{self, SourceDocument, SourceWithOperations};
use crate::generator::schema::index::SchemaIndex;
use crate::generator::stages::{operation_types, registry, schema_types, typed_documents};
use crate::generator::stitcher;

pub struct Orchestrator {
  index: SchemaIndex,
  sources: Vec<SourceWithOperations>,
  module_name: String,
  source_label: String,
  warnings: Vec<String>,
}

/// Statistics about one generation run, for CLI reporting.
#[derive(Debug)]
pub struct GenerationStats {
  /// Number of schema types declared in the output.
  pub schema_types: usize,
  /// Number of retained operations.
  pub operations: usize,
  /// Number of retained fragments.
  pub fragments: usize,
  /// Non-fatal warnings collected along the way.
  pub warnings: Vec<String>,
}

impl Orchestrator {
  /// Prepares a generation run. Derives and checks definition names up front,
  /// so collisions and anonymous operations surface before any code is built.
  ///
  /// `module_name` is the module the output file will live in, used by the
  /// generated `graphql!` macro to spell absolute paths.
  pub fn new(
    schema: &SchemaDocument,
    plucked: Vec<SourceDocument>,
    module_name: &str,
    source_label: &str,
  ) -> anyhow::Result<Self> {
    let index = SchemaIndex::build(schema);
    let mut warnings = Vec::new();
    let sources = documents::process_sources(plucked, &mut warnings).context("processing plucked documents")?;

    Ok(Self {
      index,
      sources,
      module_name: module_name.to_string(),
      source_label: source_label.to_string(),
      warnings,
    })
  }

  pub fn sources(&self) -> &[SourceWithOperations] {
    &self.sources
  }

  /// Runs all four stages and stitches their output into one module.
  pub fn generate(&self) -> anyhow::Result<(String, GenerationStats)> {
    let has_operations = !self.sources.is_empty();

    let mut fragments = vec![schema_types::generate(&self.index).context("generating schema types")?];
    if has_operations {
      fragments.push(
        operation_types::generate(&self.index, &self.sources).context("generating operation types")?,
      );
      fragments.push(typed_documents::generate(&self.sources).context("generating typed documents")?);
      fragments.push(registry::generate(&self.module_name, &self.sources));
    }

    let code = stitcher::stitch(&self.source_label, &fragments, has_operations)?;

    let (mut operations, mut fragment_count) = (0, 0);
    for source in &self.sources {
      for named in &source.operations {
        match named.kind {
          crate::generator::naming::DefinitionKind::Operation(_) => operations += 1,
          crate::generator::naming::DefinitionKind::Fragment => fragment_count += 1,
        }
      }
    }

    let stats = GenerationStats {
      schema_types: self.index.type_count(),
      operations,
      fragments: fragment_count,
      warnings: self.warnings.clone(),
    };
    Ok((code, stats))
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  const SDL: &str = r"
    type Query { user(id: ID!): User }
    type User { id: ID! name: String! }
  ";

  fn schema() -> SchemaDocument {
    graphql_parser::schema::parse_schema::<String>(SDL).unwrap().into_static()
  }

  fn source(raw: &str) -> SourceDocument {
    SourceDocument::parse(raw, PathBuf::from("src/app.rs")).unwrap()
  }

  #[test]
  fn full_pipeline_produces_a_flat_module() {
    let schema = schema();
    let plucked = vec![source("query GetUser($id: ID!) { user(id: $id) { id name } }")];
    let orchestrator = Orchestrator::new(&schema, plucked, "gql", "schema.graphql").unwrap();
    let (code, stats) = orchestrator.generate().unwrap();

    assert!(code.starts_with("// Generated by gql-gen."));
    assert!(code.contains("use gql_gen_support::TypedDocument;"));
    assert!(code.contains("pub struct User"));
    assert!(code.contains("pub struct GetUserQuery"));
    assert!(code.contains("pub const GET_USER_DOCUMENT: TypedDocument<"));
    assert!(code.contains("GetUserQueryVariables"));
    assert!(code.contains("macro_rules! graphql"));
    assert!(code.contains("pub static DOCUMENT_REGISTRY"));
    assert!(!code.contains("super::graphql::"));
    assert!(!code.contains("TypedDocumentString"));

    assert_eq!(stats.schema_types, 2);
    assert_eq!(stats.operations, 1);
    assert_eq!(stats.fragments, 0);
    assert!(stats.warnings.is_empty());
  }

  #[test]
  fn schema_only_runs_skip_operation_stages() {
    let schema = schema();
    let orchestrator = Orchestrator::new(&schema, Vec::new(), "gql", "schema.graphql").unwrap();
    let (code, stats) = orchestrator.generate().unwrap();

    assert!(code.contains("pub struct User"));
    assert!(!code.contains("macro_rules! graphql"));
    assert!(!code.contains("use gql_gen_support::TypedDocument;"));
    assert_eq!(stats.operations, 0);
  }

  #[test]
  fn generation_is_deterministic() {
    let schema = schema();
    let plucked = vec![source("query GetUser($id: ID!) { user(id: $id) { id name } }")];
    let first = Orchestrator::new(&schema, plucked.clone(), "gql", "schema.graphql")
      .unwrap()
      .generate()
      .unwrap()
      .0;
    let second = Orchestrator::new(&schema, plucked, "gql", "schema.graphql").unwrap().generate().unwrap().0;
    assert_eq!(first, second);
  }

  #[test]
  fn anonymous_operations_warn_and_are_skipped() {
    let schema = schema();
    let plucked = vec![source("{ user(id: \"1\") { id } }")];
    let orchestrator = Orchestrator::new(&schema, plucked, "gql", "schema.graphql").unwrap();
    let (code, stats) = orchestrator.generate().unwrap();

    assert_eq!(stats.warnings.len(), 1);
    assert!(stats.warnings[0].contains("anonymous operation"));
    assert!(!code.contains("macro_rules! graphql"));
  }
}
