use std::collections::HashMap;
use std::path::PathBuf;

use graphql_parser::query::{Definition, OperationDefinition, parse_query};

use crate::generator::QueryDocument;
use crate::generator::errors::GenerateError;
use crate::generator::naming::{self, DefinitionKind, OperationKind};

/// One plucked operation document: the raw text exactly as it appeared in
/// source (line endings normalized) plus its parsed form.
#[derive(Debug, Clone)]
pub(crate) struct SourceDocument {
  pub(crate) raw: String,
  pub(crate) ast: QueryDocument,
  pub(crate) origin: PathBuf,
}

impl SourceDocument {
  /// Parses a plucked literal. CRLF normalization happens before parsing so
  /// the stored raw text and the AST always agree.
  pub(crate) fn parse(raw: &str, origin: PathBuf) -> Result<Self, graphql_parser::query::ParseError> {
    let raw = normalize_linebreaks(raw);
    let ast = parse_query::<String>(&raw)?.into_static();
    Ok(Self { raw, ast, origin })
  }
}

pub(crate) fn normalize_linebreaks(raw: &str) -> String {
  raw.replace("\r\n", "\n")
}

/// A named operation or fragment retained for generation.
#[derive(Debug, Clone)]
pub(crate) struct NamedDefinition {
  pub(crate) derived_name: String,
  pub(crate) kind: DefinitionKind,
  pub(crate) name: String,
  pub(crate) definition: Definition<'static, String>,
}

/// A source document together with its retained definitions. Documents that
/// retain nothing never make it into this collection.
#[derive(Debug, Clone)]
pub(crate) struct SourceWithOperations {
  pub(crate) source: SourceDocument,
  pub(crate) operations: Vec<NamedDefinition>,
}

/// Walks every document's definitions, derives names, and drops what cannot
/// participate: anonymous operations are skipped with one warning each, and
/// a derived-name collision across the whole run is a hard error rather than
/// a silent overwrite.
pub(crate) fn process_sources(
  sources: Vec<SourceDocument>,
  warnings: &mut Vec<String>,
) -> Result<Vec<SourceWithOperations>, GenerateError> {
  let mut out = Vec::new();
  let mut seen: HashMap<String, PathBuf> = HashMap::new();

  for source in sources {
    let mut operations = Vec::new();

    for definition in &source.ast.definitions {
      let (kind, name) = match classify(definition) {
        (kind, Some(name)) => (kind, name.clone()),
        (DefinitionKind::Operation(_), None) => {
          warnings.push(format!(
            "anonymous operation skipped in {}: {}",
            source.origin.display(),
            source.raw.trim()
          ));
          continue;
        }
        (DefinitionKind::Fragment, None) => unreachable!("fragments always carry a name"),
      };

      let derived_name = naming::derived_name(kind, &name);
      if let Some(first) = seen.insert(derived_name.clone(), source.origin.clone()) {
        return Err(GenerateError::DuplicateDefinition {
          name: derived_name,
          first: first.display().to_string(),
          second: source.origin.display().to_string(),
        });
      }

      operations.push(NamedDefinition {
        derived_name,
        kind,
        name,
        definition: definition.clone(),
      });
    }

    if operations.is_empty() {
      continue;
    }

    out.push(SourceWithOperations { source, operations });
  }

  Ok(out)
}

fn classify<'a>(definition: &'a Definition<'static, String>) -> (DefinitionKind, Option<&'a String>) {
  match definition {
    Definition::Operation(operation) => match operation {
      OperationDefinition::SelectionSet(_) => (DefinitionKind::Operation(OperationKind::Query), None),
      OperationDefinition::Query(query) => (DefinitionKind::Operation(OperationKind::Query), query.name.as_ref()),
      OperationDefinition::Mutation(mutation) => {
        (DefinitionKind::Operation(OperationKind::Mutation), mutation.name.as_ref())
      }
      OperationDefinition::Subscription(subscription) => (
        DefinitionKind::Operation(OperationKind::Subscription),
        subscription.name.as_ref(),
      ),
    },
    Definition::Fragment(fragment) => (DefinitionKind::Fragment, Some(&fragment.name)),
  }
}
