use std::collections::HashSet;
use std::sync::LazyLock;

use inflections::Inflect;

/// Keywords that cannot be used verbatim as generated field identifiers.
static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "box", "final", "macro", "override",
    "self", "Self",
  ]
  .into_iter()
  .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperationKind {
  Query,
  Mutation,
  Subscription,
}

impl OperationKind {
  pub(crate) fn suffix(self) -> &'static str {
    match self {
      OperationKind::Query => "Query",
      OperationKind::Mutation => "Mutation",
      OperationKind::Subscription => "Subscription",
    }
  }
}

/// Explicit definition-kind tag. Name derivation dispatches on this and
/// nothing else, so two definitions with the same name and kind always derive
/// the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefinitionKind {
  Operation(OperationKind),
  Fragment,
}

/// The unique name a definition is registered under: operations derive
/// `{Name}Document`, fragments `{Name}FragmentDoc`.
pub(crate) fn derived_name(kind: DefinitionKind, name: &str) -> String {
  match kind {
    DefinitionKind::Operation(_) => format!("{}Document", name.to_pascal_case()),
    DefinitionKind::Fragment => format!("{}FragmentDoc", name.to_pascal_case()),
  }
}

/// Name of the generated result-shape type for a definition.
pub(crate) fn result_type_name(kind: DefinitionKind, name: &str) -> String {
  match kind {
    DefinitionKind::Operation(op) => format!("{}{}", name.to_pascal_case(), op.suffix()),
    DefinitionKind::Fragment => format!("{}Fragment", name.to_pascal_case()),
  }
}

/// Name of the generated variables-shape type. Only operations have one;
/// fragment documents use `()`.
pub(crate) fn variables_type_name(kind: DefinitionKind, name: &str) -> String {
  format!("{}Variables", result_type_name(kind, name))
}

pub(crate) fn document_const_name(derived: &str) -> String {
  derived.to_constant_case()
}

/// Nested result structs are named by their selection path:
/// `GetUserQuery` + `user` -> `GetUserQueryUser`.
pub(crate) fn nested_type_name(parent: &str, field: &str) -> String {
  format!("{}{}", parent, field.to_pascal_case())
}

/// Rust identifier for a GraphQL field or variable, with a serde rename when
/// the wire name differs.
pub(crate) fn field_ident(wire_name: &str) -> (String, Option<String>) {
  let mut ident = wire_name.to_snake_case();
  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    ident.push('_');
  }
  let rename = (ident != wire_name).then(|| wire_name.to_string());
  (ident, rename)
}

pub(crate) fn variant_ident(wire_name: &str) -> (String, Option<String>) {
  let ident = wire_name.to_pascal_case();
  let rename = (ident != wire_name).then(|| wire_name.to_string());
  (ident, rename)
}
