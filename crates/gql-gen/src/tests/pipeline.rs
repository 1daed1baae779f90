//! End-to-end runs of the generate command against a throwaway project tree.

use std::path::Path;

use crate::generator::schema::loader::SchemaSource;
use crate::tests::{TEST_SDL, write_source};
use crate::ui::colors::{Colors, Theme};
use crate::ui::commands::{GenerateConfig, generate_code};

fn scaffold(root: &Path) {
  write_source(root, "schema.graphql", TEST_SDL);
  write_source(
    root,
    "src/app.rs",
    r#"
    pub fn get_user_doc() {
      let _doc = graphql!("query GetUser($id: ID!) { user(id: $id) { id name createdAt } }");
    }
    "#,
  );
  write_source(
    root,
    "src/fragments.rs",
    r#"
    pub fn user_fields() {
      let _doc = gql!("fragment UserFields on User { id name }");
    }
    "#,
  );
  write_source(root, "src/unrelated.rs", "pub fn nothing() { let _s = \"query NotTagged { x }\"; }\n");
}

fn config(root: &Path) -> GenerateConfig {
  GenerateConfig {
    schema: SchemaSource::from_arg(&root.join("schema.graphql").display().to_string()),
    output: root.join("out").join("gql.rs"),
    inputs: root.join("src").join("**").join("*.rs").display().to_string(),
    verbose: false,
    quiet: true,
  }
}

async fn run(root: &Path) -> String {
  let config = config(root);
  let output = config.output.clone();
  generate_code(config, &Colors::new(false, Theme::Dark)).await.unwrap();
  std::fs::read_to_string(output).unwrap()
}

#[tokio::test]
async fn generates_a_complete_module_from_a_project_tree() {
  let dir = tempfile::tempdir().unwrap();
  scaffold(dir.path());

  let code = run(dir.path()).await;

  // Schema types, including ones no operation reaches.
  assert!(code.contains("pub struct User"));
  assert!(code.contains("pub struct Orphan"));
  assert!(code.contains("pub type Instant = String;"));

  // Operation shapes.
  assert!(code.contains("pub struct GetUserQuery"));
  assert!(code.contains("pub struct GetUserQueryUser"));
  assert!(code.contains("pub struct GetUserQueryVariables"));
  assert!(code.contains("pub struct UserFieldsFragment"));
  assert!(code.contains("#[serde(rename = \"createdAt\")]"));

  // Typed documents, post-rewrite.
  assert!(code.contains("use gql_gen_support::TypedDocument;"));
  assert!(code.contains("pub const GET_USER_DOCUMENT: TypedDocument<"));
  assert!(code.contains("pub const USER_FIELDS_FRAGMENT_DOC: TypedDocument<"));
  assert!(!code.contains("TypedDocumentString"));
  assert!(!code.contains("super::graphql::"));

  // Registry and macro, one entry per retained definition.
  assert!(code.contains("macro_rules! graphql"));
  assert!(code.contains("$crate::gql::GET_USER_DOCUMENT"));
  assert_eq!(code.matches(".document()),").count(), 2);

  // The untagged literal never made it in.
  assert!(!code.contains("NotTagged"));
}

#[tokio::test]
async fn regeneration_is_byte_identical() {
  let dir = tempfile::tempdir().unwrap();
  scaffold(dir.path());

  let first = run(dir.path()).await;
  let second = run(dir.path()).await;
  assert_eq!(first, second);
}

#[tokio::test]
async fn schema_only_tree_generates_without_operation_stages() {
  let dir = tempfile::tempdir().unwrap();
  write_source(dir.path(), "schema.graphql", TEST_SDL);
  write_source(dir.path(), "src/lib.rs", "pub fn nothing() {}\n");

  let code = run(dir.path()).await;

  assert!(code.contains("pub struct User"));
  assert!(!code.contains("macro_rules! graphql"));
  assert!(!code.contains("use gql_gen_support::TypedDocument;"));
}

#[tokio::test]
async fn unreachable_schema_writes_nothing() {
  let dir = tempfile::tempdir().unwrap();
  write_source(dir.path(), "src/app.rs", "fn a() { graphql!(\"query Q { user(id: \\\"1\\\") { id } }\"); }\n");

  let mut config = config(dir.path());
  config.schema = SchemaSource::from_arg(&dir.path().join("missing.graphql").display().to_string());

  let result = generate_code(config.clone(), &Colors::new(false, Theme::Dark)).await;
  assert!(result.is_err());
  assert!(!config.output.exists());
}

#[tokio::test]
async fn duplicate_definitions_across_files_abort_the_run() {
  let dir = tempfile::tempdir().unwrap();
  write_source(dir.path(), "schema.graphql", TEST_SDL);
  write_source(dir.path(), "src/a.rs", "fn a() { graphql!(\"query GetUser { orphan { reason } }\"); }\n");
  write_source(dir.path(), "src/b.rs", "fn b() { graphql!(\"query GetUser { user(id: \\\"1\\\") { id } }\"); }\n");

  let err = generate_code(config(dir.path()), &Colors::new(false, Theme::Dark))
    .await
    .unwrap_err();
  assert!(format!("{err:#}").contains("GetUserDocument"));
}
