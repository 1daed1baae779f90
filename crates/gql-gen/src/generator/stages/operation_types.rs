//! Stage 2: result and variables shapes for every retained operation and
//! fragment. Selection sets lower into one struct per level, named by their
//! selection path; fragment spreads and inline fragments are flattened into
//! the struct they appear in.

use std::collections::{BTreeMap, HashSet};

use graphql_parser::query::{
  Definition, FragmentDefinition, OperationDefinition, Selection, SelectionSet, TypeCondition, VariableDefinition,
};
use graphql_parser::schema::TypeDefinition;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{format_fragment, named_base, parse_rust_type, wrap_rust_type};
use crate::generator::documents::{NamedDefinition, SourceWithOperations};
use crate::generator::errors::GenerateError;
use crate::generator::naming::{self, DefinitionKind, OperationKind};
use crate::generator::scalars::{is_builtin_scalar, scalar_rust_type};
use crate::generator::schema::index::SchemaIndex;

pub(crate) fn generate(index: &SchemaIndex, sources: &[SourceWithOperations]) -> Result<String, GenerateError> {
  let mut fragments: BTreeMap<&str, &FragmentDefinition<'static, String>> = BTreeMap::new();
  for source in sources {
    for named in &source.operations {
      if let Definition::Fragment(fragment) = &named.definition {
        fragments.insert(fragment.name.as_str(), fragment);
      }
    }
  }

  let ctx = LowerContext { index, fragments };
  let mut structs = Vec::new();
  for source in sources {
    for named in &source.operations {
      lower_definition(&ctx, &mut structs, named)?;
    }
  }

  let items = structs.iter().map(render_struct).collect::<Result<Vec<_>, _>>()?;
  format_fragment(quote! {
    use super::graphql::*;

    #(#items)*
  })
}

struct LowerContext<'a> {
  index: &'a SchemaIndex,
  fragments: BTreeMap<&'a str, &'a FragmentDefinition<'static, String>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
  Result,
  Variables,
}

struct LoweredField {
  ident: String,
  rename: Option<String>,
  ty: String,
}

struct LoweredStruct {
  name: String,
  role: Role,
  fields: Vec<LoweredField>,
}

fn lower_definition(
  ctx: &LowerContext<'_>,
  out: &mut Vec<LoweredStruct>,
  named: &NamedDefinition,
) -> Result<(), GenerateError> {
  match &named.definition {
    Definition::Operation(operation) => {
      let (kind, selection_set, variables) = match operation {
        OperationDefinition::Query(q) => (OperationKind::Query, &q.selection_set, &q.variable_definitions),
        OperationDefinition::Mutation(m) => (OperationKind::Mutation, &m.selection_set, &m.variable_definitions),
        OperationDefinition::Subscription(s) => {
          (OperationKind::Subscription, &s.selection_set, &s.variable_definitions)
        }
        // Anonymous operations were dropped before this stage.
        OperationDefinition::SelectionSet(_) => return Ok(()),
      };

      let result_name = naming::result_type_name(named.kind, &named.name);
      let root = ctx.index.root_type(kind).to_string();
      lower_struct(ctx, out, &result_name, &root, selection_set, Role::Result)?;
      lower_variables(ctx, out, &naming::variables_type_name(named.kind, &named.name), variables)?;
    }
    Definition::Fragment(fragment) => {
      let TypeCondition::On(parent) = &fragment.type_condition;
      let result_name = naming::result_type_name(DefinitionKind::Fragment, &named.name);
      lower_struct(ctx, out, &result_name, parent, &fragment.selection_set, Role::Result)?;
    }
  }
  Ok(())
}

fn lower_struct(
  ctx: &LowerContext<'_>,
  out: &mut Vec<LoweredStruct>,
  struct_name: &str,
  parent_type: &str,
  selection_set: &SelectionSet<'static, String>,
  role: Role,
) -> Result<(), GenerateError> {
  let slot = out.len();
  out.push(LoweredStruct { name: struct_name.to_string(), role, fields: Vec::new() });

  let mut fields = Vec::new();
  let mut seen = HashSet::new();
  collect_fields(ctx, out, struct_name, parent_type, selection_set, false, &mut seen, &mut fields)?;
  out[slot].fields = fields;
  Ok(())
}

/// Flattens one selection set into struct fields, recursing into nested
/// selections. `force_optional` is set once lowering has passed through a
/// narrowing inline fragment: those fields may be absent at runtime even when
/// the schema marks them non-null.
#[allow(clippy::too_many_arguments)]
fn collect_fields(
  ctx: &LowerContext<'_>,
  out: &mut Vec<LoweredStruct>,
  struct_name: &str,
  parent_type: &str,
  selection_set: &SelectionSet<'static, String>,
  force_optional: bool,
  seen: &mut HashSet<String>,
  fields: &mut Vec<LoweredField>,
) -> Result<(), GenerateError> {
  for selection in &selection_set.items {
    match selection {
      Selection::Field(field) => {
        if field.name == "__typename" {
          continue;
        }
        let response_key = field.alias.as_ref().unwrap_or(&field.name);
        if !seen.insert(response_key.clone()) {
          continue;
        }

        let schema_field = ctx
          .index
          .field(parent_type, &field.name)
          .ok_or_else(|| GenerateError::UnknownField {
            parent: parent_type.to_string(),
            field: field.name.clone(),
          })?
          .clone();

        let base = match selection_base(ctx, named_base(&schema_field.field_type))? {
          SelectionBase::Leaf(rust) => {
            if !field.selection_set.items.is_empty() {
              return Err(GenerateError::UnknownField {
                parent: named_base(&schema_field.field_type).to_string(),
                field: response_key.clone(),
              });
            }
            rust
          }
          SelectionBase::Composite(type_name) => {
            if field.selection_set.items.is_empty() {
              return Err(GenerateError::MissingSelection {
                parent: parent_type.to_string(),
                field: response_key.clone(),
              });
            }
            let pascal = naming::variant_ident(response_key).0;
            let child = naming::nested_type_name(struct_name, &pascal);
            lower_struct(ctx, out, &child, &type_name, &field.selection_set, Role::Result)?;
            child
          }
        };

        let mut ty = wrap_rust_type(&schema_field.field_type, &base);
        if force_optional && !ty.starts_with("Option<") {
          ty = format!("Option<{ty}>");
        }

        let (ident, rename) = naming::field_ident(response_key);
        fields.push(LoweredField { ident, rename, ty });
      }
      Selection::FragmentSpread(spread) => {
        let fragment = ctx
          .fragments
          .get(spread.fragment_name.as_str())
          .ok_or_else(|| GenerateError::UnknownFragment(spread.fragment_name.clone()))?;
        let TypeCondition::On(condition) = &fragment.type_condition;
        let narrowing = narrows(ctx, condition, parent_type);
        collect_fields(
          ctx,
          out,
          struct_name,
          condition,
          &fragment.selection_set,
          force_optional || narrowing,
          seen,
          fields,
        )?;
      }
      Selection::InlineFragment(inline) => {
        let (condition, narrowing) = match &inline.type_condition {
          Some(TypeCondition::On(name)) => (name.as_str(), narrows(ctx, name, parent_type)),
          None => (parent_type, false),
        };
        collect_fields(
          ctx,
          out,
          struct_name,
          condition,
          &inline.selection_set,
          force_optional || narrowing,
          seen,
          fields,
        )?;
      }
    }
  }
  Ok(())
}

/// A type condition narrows the parent unless it names the parent itself or
/// an interface the parent implements. Only a narrowing condition can fail to
/// match at runtime, so only then must its fields become optional.
fn narrows(ctx: &LowerContext<'_>, condition: &str, parent_type: &str) -> bool {
  condition != parent_type && !ctx.index.implements(parent_type, condition)
}

enum SelectionBase {
  /// A finished Rust base type; the selection must stop here.
  Leaf(String),
  /// A composite schema type requiring a nested selection.
  Composite(String),
}

fn selection_base(ctx: &LowerContext<'_>, name: &str) -> Result<SelectionBase, GenerateError> {
  if is_builtin_scalar(name) {
    return Ok(SelectionBase::Leaf(scalar_rust_type(name)?.to_string()));
  }
  match ctx.index.type_def(name) {
    Some(TypeDefinition::Scalar(_)) => {
      scalar_rust_type(name)?;
      Ok(SelectionBase::Leaf(format!("super::graphql::{name}")))
    }
    Some(TypeDefinition::Enum(_)) => Ok(SelectionBase::Leaf(format!("super::graphql::{name}"))),
    Some(
      TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_)
      | TypeDefinition::InputObject(_),
    ) => Ok(SelectionBase::Composite(name.to_string())),
    None => Err(GenerateError::UnknownType(name.to_string())),
  }
}

fn lower_variables(
  ctx: &LowerContext<'_>,
  out: &mut Vec<LoweredStruct>,
  struct_name: &str,
  variables: &[VariableDefinition<'static, String>],
) -> Result<(), GenerateError> {
  let mut fields = Vec::new();
  for variable in variables {
    let base = variable_base(ctx, named_base(&variable.var_type))?;
    let ty = wrap_rust_type(&variable.var_type, &base);
    let (ident, rename) = naming::field_ident(&variable.name);
    fields.push(LoweredField { ident, rename, ty });
  }
  out.push(LoweredStruct { name: struct_name.to_string(), role: Role::Variables, fields });
  Ok(())
}

/// Variables may only reference input types: scalars, enums, input objects.
fn variable_base(ctx: &LowerContext<'_>, name: &str) -> Result<String, GenerateError> {
  if is_builtin_scalar(name) {
    return Ok(scalar_rust_type(name)?.to_string());
  }
  match ctx.index.type_def(name) {
    Some(TypeDefinition::Scalar(_)) => {
      scalar_rust_type(name)?;
      Ok(format!("super::graphql::{name}"))
    }
    Some(TypeDefinition::Enum(_) | TypeDefinition::InputObject(_)) => Ok(format!("super::graphql::{name}")),
    _ => Err(GenerateError::InvalidVariableType(name.to_string())),
  }
}

fn render_struct(lowered: &LoweredStruct) -> Result<TokenStream, GenerateError> {
  let ident = format_ident!("{}", lowered.name);
  let derives = match lowered.role {
    Role::Result => quote! { #[derive(Debug, Clone, PartialEq, Deserialize)] },
    Role::Variables => quote! { #[derive(Debug, Clone, PartialEq, Serialize)] },
  };

  let mut field_tokens = Vec::new();
  for field in &lowered.fields {
    let field_ident = format_ident!("{}", field.ident);
    let ty = parse_rust_type(&field.ty)?;
    let rename_attr = field.rename.as_ref().map(|wire| quote! { #[serde(rename = #wire)] });
    let skip_attr = (lowered.role == Role::Variables && field.ty.starts_with("Option<"))
      .then(|| quote! { #[serde(skip_serializing_if = "Option::is_none")] });
    field_tokens.push(quote! {
      #rename_attr
      #skip_attr
      pub #field_ident: #ty
    });
  }

  Ok(quote! {
    #derives
    pub struct #ident {
      #(#field_tokens),*
    }
  })
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::generator::documents::{SourceDocument, process_sources};

  const SDL: &str = r"
    type Query { user(id: ID!): User users: [User!]! node: Node }
    interface Identified { id: ID! }
    type User implements Identified { id: ID! name: String! bestFriend: User role: Role }
    type Post { id: ID! title: String! }
    union Node = User | Post
    enum Role { ADMIN USER }
  ";

  fn lower(documents: &[&str]) -> Result<String, GenerateError> {
    let schema = graphql_parser::schema::parse_schema::<String>(SDL).unwrap().into_static();
    let index = SchemaIndex::build(&schema);
    let sources = documents
      .iter()
      .enumerate()
      .map(|(i, raw)| SourceDocument::parse(raw, PathBuf::from(format!("doc{i}.rs"))).unwrap())
      .collect();
    let mut warnings = Vec::new();
    let sources = process_sources(sources, &mut warnings)?;
    generate(&index, &sources)
  }

  #[test]
  fn nested_selections_become_path_named_structs() {
    let output = lower(&["query GetUser($id: ID!) { user(id: $id) { id name bestFriend { name } } }"]).unwrap();

    assert!(output.contains("pub struct GetUserQuery"));
    assert!(output.contains("pub user: Option<GetUserQueryUser>"));
    assert!(output.contains("pub struct GetUserQueryUser"));
    assert!(output.contains("pub best_friend: Option<GetUserQueryUserBestFriend>"));
    assert!(output.contains("pub struct GetUserQueryVariables"));
    assert!(output.contains("pub id: String"));
  }

  #[test]
  fn typename_is_suppressed_and_aliases_win() {
    let output = lower(&["query ListUsers { users { __typename me: name } }"]).unwrap();
    assert!(!output.contains("__typename"));
    assert!(output.contains("pub me: String"));
  }

  #[test]
  fn fragment_spreads_inline_into_the_parent_struct() {
    let output = lower(&[
      "fragment UserFields on User { id role }",
      "query GetUser($id: ID!) { user(id: $id) { ...UserFields } }",
    ])
    .unwrap();

    assert!(output.contains("pub struct UserFieldsFragment"));
    assert!(output.contains("pub struct GetUserQueryUser"));
    assert!(output.contains("pub role: Option<super::graphql::Role>"));
  }

  #[test]
  fn narrowing_inline_fragments_force_optional_fields() {
    let output = lower(&["query GetNode { node { ... on Post { title } } }"]).unwrap();
    // Post.title is non-null but only present when the node is a Post.
    assert!(output.contains("pub title: Option<String>"));
  }

  #[test]
  fn spreads_on_an_implemented_interface_keep_nullability() {
    let output = lower(&[
      "fragment IdentifiedBits on Identified { id }",
      "query GetUser($id: ID!) { user(id: $id) { ...IdentifiedBits name } }",
    ])
    .unwrap();

    // User implements Identified, so the spread always matches and id stays
    // non-null.
    assert!(output.contains("pub id: String"));
    assert!(!output.contains("pub id: Option<String>"));
  }

  #[test]
  fn unknown_field_and_missing_selection_fail_loudly() {
    let err = lower(&["query Q { user(id: \"1\") { nope } }"]).unwrap_err();
    assert!(matches!(err, GenerateError::UnknownField { field, .. } if field == "nope"));

    let err = lower(&["query Q { users }"]).unwrap_err();
    assert!(matches!(err, GenerateError::MissingSelection { field, .. } if field == "users"));
  }

  #[test]
  fn unknown_fragment_is_an_error() {
    let err = lower(&["query Q { users { ...Missing } }"]).unwrap_err();
    assert!(matches!(err, GenerateError::UnknownFragment(name) if name == "Missing"));
  }

  #[test]
  fn variables_accept_only_input_types() {
    let err = lower(&["query Q($u: User) { users { id } }"]).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidVariableType(name) if name == "User"));
  }
}
