use std::collections::BTreeMap;

use graphql_parser::schema::{Definition, Field, TypeDefinition};

use crate::generator::SchemaDocument;
use crate::generator::naming::OperationKind;

/// Read-only lookup over the canonical schema document.
///
/// Types are keyed by name in a BTreeMap so every iteration is name-ordered,
/// which keeps stage output byte-deterministic.
pub(crate) struct SchemaIndex {
  types: BTreeMap<String, TypeDefinition<'static, String>>,
  query_root: String,
  mutation_root: String,
  subscription_root: String,
}

impl SchemaIndex {
  pub(crate) fn build(document: &SchemaDocument) -> Self {
    let mut types = BTreeMap::new();
    let mut query_root = "Query".to_string();
    let mut mutation_root = "Mutation".to_string();
    let mut subscription_root = "Subscription".to_string();

    for definition in &document.definitions {
      match definition {
        Definition::TypeDefinition(ty) => {
          types.insert(type_name(ty).to_string(), ty.clone());
        }
        Definition::SchemaDefinition(schema) => {
          if let Some(query) = &schema.query {
            query_root = query.clone();
          }
          if let Some(mutation) = &schema.mutation {
            mutation_root = mutation.clone();
          }
          if let Some(subscription) = &schema.subscription {
            subscription_root = subscription.clone();
          }
        }
        Definition::TypeExtension(_) | Definition::DirectiveDefinition(_) => {}
      }
    }

    Self {
      types,
      query_root,
      mutation_root,
      subscription_root,
    }
  }

  pub(crate) fn types(&self) -> impl Iterator<Item = (&String, &TypeDefinition<'static, String>)> {
    self.types.iter()
  }

  pub(crate) fn type_count(&self) -> usize {
    self.types.len()
  }

  pub(crate) fn type_def(&self, name: &str) -> Option<&TypeDefinition<'static, String>> {
    self.types.get(name)
  }

  pub(crate) fn root_type(&self, kind: OperationKind) -> &str {
    match kind {
      OperationKind::Query => &self.query_root,
      OperationKind::Mutation => &self.mutation_root,
      OperationKind::Subscription => &self.subscription_root,
    }
  }

  /// True when `parent` declares `interface` in its implements list. The
  /// GraphQL spec requires transitively implemented interfaces to be declared
  /// directly, so a direct check covers the whole chain.
  pub(crate) fn implements(&self, parent: &str, interface: &str) -> bool {
    let declared = match self.type_def(parent) {
      Some(TypeDefinition::Object(object)) => &object.implements_interfaces,
      Some(TypeDefinition::Interface(iface)) => &iface.implements_interfaces,
      _ => return false,
    };
    declared.iter().any(|name| name == interface)
  }

  /// Looks up a field on an object or interface type.
  pub(crate) fn field(&self, parent: &str, field: &str) -> Option<&Field<'static, String>> {
    let fields = match self.type_def(parent)? {
      TypeDefinition::Object(object) => &object.fields,
      TypeDefinition::Interface(interface) => &interface.fields,
      _ => return None,
    };
    fields.iter().find(|f| f.name == field)
  }
}

pub(crate) fn type_name<'a>(ty: &'a TypeDefinition<'static, String>) -> &'a str {
  match ty {
    TypeDefinition::Scalar(scalar) => &scalar.name,
    TypeDefinition::Object(object) => &object.name,
    TypeDefinition::Interface(interface) => &interface.name,
    TypeDefinition::Union(union) => &union.name,
    TypeDefinition::Enum(enumeration) => &enumeration.name,
    TypeDefinition::InputObject(input) => &input.name,
  }
}
