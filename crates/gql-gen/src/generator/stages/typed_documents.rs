//! Stage 3: one typed-document constant per retained definition. The constant
//! carries the canonical document text together with the result and variables
//! types, so call sites stay checked end to end.

use std::collections::{BTreeMap, HashSet};

use graphql_parser::query::{Definition, Document, FragmentDefinition, Selection, SelectionSet};
use quote::{format_ident, quote};

use super::format_fragment;
use crate::generator::documents::SourceWithOperations;
use crate::generator::errors::GenerateError;
use crate::generator::naming::{self, DefinitionKind};

pub(crate) fn generate(sources: &[SourceWithOperations]) -> Result<String, GenerateError> {
  let mut fragments: BTreeMap<&str, &FragmentDefinition<'static, String>> = BTreeMap::new();
  for source in sources {
    for named in &source.operations {
      if let Definition::Fragment(fragment) = &named.definition {
        fragments.insert(fragment.name.as_str(), fragment);
      }
    }
  }

  let mut items = Vec::new();
  for source in sources {
    for named in &source.operations {
      let text = document_text(&named.definition, &fragments)?;
      let const_ident = format_ident!("{}", naming::document_const_name(&named.derived_name));
      let result_ident = format_ident!("{}", naming::result_type_name(named.kind, &named.name));
      let variables = match named.kind {
        DefinitionKind::Operation(_) => {
          let ident = format_ident!("{}", naming::variables_type_name(named.kind, &named.name));
          quote! { #ident }
        }
        DefinitionKind::Fragment => quote! { () },
      };

      items.push(quote! {
        pub const #const_ident: TypedDocumentString<#result_ident, #variables> = TypedDocumentString::new(#text);
      });
    }
  }

  format_fragment(quote! {
    use gql_gen_support::TypedDocumentString;

    #(#items)*
  })
}

/// Canonical text for one definition: the definition itself followed by every
/// fragment it transitively references, in first-reference order.
fn document_text(
  definition: &Definition<'static, String>,
  fragments: &BTreeMap<&str, &FragmentDefinition<'static, String>>,
) -> Result<String, GenerateError> {
  let mut referenced = Vec::new();
  let mut seen = HashSet::new();
  collect_spreads(selection_set_of(definition), fragments, &mut seen, &mut referenced)?;

  let mut definitions = vec![definition.clone()];
  definitions.extend(referenced.into_iter().map(|fragment| Definition::Fragment(fragment.clone())));
  Ok(Document { definitions }.to_string())
}

fn selection_set_of<'a>(definition: &'a Definition<'static, String>) -> &'a SelectionSet<'static, String> {
  match definition {
    Definition::Operation(operation) => match operation {
      graphql_parser::query::OperationDefinition::SelectionSet(set) => set,
      graphql_parser::query::OperationDefinition::Query(q) => &q.selection_set,
      graphql_parser::query::OperationDefinition::Mutation(m) => &m.selection_set,
      graphql_parser::query::OperationDefinition::Subscription(s) => &s.selection_set,
    },
    Definition::Fragment(fragment) => &fragment.selection_set,
  }
}

fn collect_spreads<'a>(
  selection_set: &SelectionSet<'static, String>,
  fragments: &BTreeMap<&str, &'a FragmentDefinition<'static, String>>,
  seen: &mut HashSet<String>,
  out: &mut Vec<&'a FragmentDefinition<'static, String>>,
) -> Result<(), GenerateError> {
  for selection in &selection_set.items {
    match selection {
      Selection::Field(field) => collect_spreads(&field.selection_set, fragments, seen, out)?,
      Selection::InlineFragment(inline) => collect_spreads(&inline.selection_set, fragments, seen, out)?,
      Selection::FragmentSpread(spread) => {
        if seen.insert(spread.fragment_name.clone()) {
          let fragment = fragments
            .get(spread.fragment_name.as_str())
            .copied()
            .ok_or_else(|| GenerateError::UnknownFragment(spread.fragment_name.clone()))?;
          out.push(fragment);
          collect_spreads(&fragment.selection_set, fragments, seen, out)?;
        }
      }
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::generator::documents::{SourceDocument, process_sources};

  fn emit(documents: &[&str]) -> String {
    let sources = documents
      .iter()
      .enumerate()
      .map(|(i, raw)| SourceDocument::parse(raw, PathBuf::from(format!("doc{i}.rs"))).unwrap())
      .collect();
    let mut warnings = Vec::new();
    let sources = process_sources(sources, &mut warnings).unwrap();
    generate(&sources).unwrap()
  }

  #[test]
  fn operations_get_typed_constants() {
    let output = emit(&["query GetUser($id: ID!) { user(id: $id) { id } }"]);

    assert!(output.contains("use gql_gen_support::TypedDocumentString;"));
    assert!(output.contains("pub const GET_USER_DOCUMENT: TypedDocumentString<"));
    assert!(output.contains("GetUserQuery"));
    assert!(output.contains("GetUserQueryVariables"));
    assert!(output.contains("query GetUser"));
  }

  #[test]
  fn fragments_use_unit_variables() {
    let output = emit(&["fragment UserFields on User { id }"]);
    assert!(output.contains("pub const USER_FIELDS_FRAGMENT_DOC: TypedDocumentString<"));
    assert!(output.contains("UserFieldsFragment"));
    assert!(output.contains("()"));
    assert!(!output.contains("UserFieldsFragmentVariables"));
  }

  #[test]
  fn referenced_fragments_travel_with_the_operation() {
    let output = emit(&[
      "fragment UserFields on User { id }",
      "query GetUser { user { ...UserFields } }",
    ]);

    let start = output.find("GET_USER_DOCUMENT").unwrap();
    let constant = &output[start..];
    assert!(constant.contains("query GetUser"));
    assert!(constant.contains("fragment UserFields on User"));
  }

  #[test]
  fn embedded_text_reparses_to_the_same_canonical_form() {
    let raw = "query GetUser($id: ID!) {\r\n  user(id: $id) {\r\n    name\r\n  }\r\n}";
    let source = SourceDocument::parse(raw, PathBuf::from("a.rs")).unwrap();
    let fragments = BTreeMap::new();
    let text = document_text(&source.ast.definitions[0], &fragments).unwrap();

    let reparsed = graphql_parser::parse_query::<String>(&text).unwrap().into_static();
    assert_eq!(reparsed.to_string(), text);
    assert_eq!(reparsed.to_string(), source.ast.to_string());
  }

  #[test]
  fn unknown_spread_is_an_error() {
    let sources = vec![SourceDocument::parse("query Q { user { ...Missing } }", PathBuf::from("a.rs")).unwrap()];
    let mut warnings = Vec::new();
    let sources = process_sources(sources, &mut warnings).unwrap();
    let err = generate(&sources).unwrap_err();
    assert!(matches!(err, GenerateError::UnknownFragment(name) if name == "Missing"));
  }
}
