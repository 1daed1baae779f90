//! Introspection model for the endpoint schema source.
//!
//! The endpoint branch fetches the standard introspection result and renders
//! it back to SDL text, so both schema sources converge on one
//! `graphql_parser` document.

use std::fmt::Write as _;

use serde::Deserialize;

pub(crate) const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      kind
      name
      fields(includeDeprecated: true) {
        name
        args { name type { ...TypeRef } defaultValue }
        type { ...TypeRef }
      }
      inputFields { name type { ...TypeRef } defaultValue }
      interfaces { ...TypeRef }
      enumValues(includeDeprecated: true) { name }
      possibleTypes { ...TypeRef }
    }
  }
}
fragment TypeRef on __Type {
  kind name
  ofType { kind name ofType { kind name ofType { kind name ofType {
    kind name ofType { kind name ofType { kind name ofType { kind name } } }
  } } } }
}
";

const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

#[derive(Debug, Deserialize)]
pub(crate) struct IntrospectionResponse {
  pub(crate) data: Option<IntrospectionData>,
  pub(crate) errors: Option<Vec<ResponseError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseError {
  pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntrospectionData {
  #[serde(rename = "__schema")]
  pub(crate) schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntrospectionSchema {
  #[serde(rename = "queryType")]
  query_type: Option<NamedRef>,
  #[serde(rename = "mutationType")]
  mutation_type: Option<NamedRef>,
  #[serde(rename = "subscriptionType")]
  subscription_type: Option<NamedRef>,
  types: Vec<FullType>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
  name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FullType {
  kind: String,
  name: Option<String>,
  fields: Option<Vec<FieldDef>>,
  #[serde(rename = "inputFields")]
  input_fields: Option<Vec<InputValueDef>>,
  interfaces: Option<Vec<TypeRef>>,
  #[serde(rename = "enumValues")]
  enum_values: Option<Vec<EnumValueDef>>,
  #[serde(rename = "possibleTypes")]
  possible_types: Option<Vec<TypeRef>>,
}

#[derive(Debug, Deserialize)]
struct FieldDef {
  name: String,
  args: Vec<InputValueDef>,
  #[serde(rename = "type")]
  ty: TypeRef,
}

#[derive(Debug, Deserialize)]
struct InputValueDef {
  name: String,
  #[serde(rename = "type")]
  ty: TypeRef,
  #[serde(rename = "defaultValue")]
  default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnumValueDef {
  name: String,
}

#[derive(Debug, Deserialize)]
struct TypeRef {
  kind: Option<String>,
  name: Option<String>,
  #[serde(rename = "ofType")]
  of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
  fn render(&self) -> String {
    match (self.kind.as_deref(), &self.of_type) {
      (Some("NON_NULL"), Some(inner)) => format!("{}!", inner.render()),
      (Some("LIST"), Some(inner)) => format!("[{}]", inner.render()),
      _ => self.name.clone().unwrap_or_default(),
    }
  }
}

impl IntrospectionSchema {
  /// Renders the schema back to SDL. Introspection-internal `__` types and
  /// the built-in scalars are not declared.
  pub(crate) fn to_sdl(&self) -> String {
    let mut sdl = String::new();

    let query = self.query_type.as_ref().and_then(|t| t.name.as_deref());
    let mutation = self.mutation_type.as_ref().and_then(|t| t.name.as_deref());
    let subscription = self.subscription_type.as_ref().and_then(|t| t.name.as_deref());

    let custom_roots = query.is_some_and(|q| q != "Query")
      || mutation.is_some_and(|m| m != "Mutation")
      || subscription.is_some_and(|s| s != "Subscription");
    if custom_roots {
      sdl.push_str("schema {\n");
      if let Some(query) = query {
        let _ = writeln!(sdl, "  query: {query}");
      }
      if let Some(mutation) = mutation {
        let _ = writeln!(sdl, "  mutation: {mutation}");
      }
      if let Some(subscription) = subscription {
        let _ = writeln!(sdl, "  subscription: {subscription}");
      }
      sdl.push_str("}\n\n");
    }

    for ty in &self.types {
      let Some(name) = ty.name.as_deref() else { continue };
      if name.starts_with("__") || BUILTIN_SCALARS.contains(&name) {
        continue;
      }
      ty.write_sdl(name, &mut sdl);
    }

    sdl
  }
}

impl FullType {
  fn write_sdl(&self, name: &str, sdl: &mut String) {
    match self.kind.as_str() {
      "SCALAR" => {
        let _ = writeln!(sdl, "scalar {name}\n");
      }
      "OBJECT" | "INTERFACE" => {
        let keyword = if self.kind == "OBJECT" { "type" } else { "interface" };
        let implements = self
          .interfaces
          .as_deref()
          .unwrap_or_default()
          .iter()
          .filter_map(|i| i.name.as_deref())
          .collect::<Vec<_>>();
        if implements.is_empty() {
          let _ = writeln!(sdl, "{keyword} {name} {{");
        } else {
          let _ = writeln!(sdl, "{keyword} {name} implements {} {{", implements.join(" & "));
        }
        for field in self.fields.as_deref().unwrap_or_default() {
          let _ = writeln!(sdl, "  {}{}: {}", field.name, render_args(&field.args), field.ty.render());
        }
        sdl.push_str("}\n\n");
      }
      "UNION" => {
        let members = self
          .possible_types
          .as_deref()
          .unwrap_or_default()
          .iter()
          .filter_map(|t| t.name.as_deref())
          .collect::<Vec<_>>();
        let _ = writeln!(sdl, "union {name} = {}\n", members.join(" | "));
      }
      "ENUM" => {
        let _ = writeln!(sdl, "enum {name} {{");
        for value in self.enum_values.as_deref().unwrap_or_default() {
          let _ = writeln!(sdl, "  {}", value.name);
        }
        sdl.push_str("}\n\n");
      }
      "INPUT_OBJECT" => {
        let _ = writeln!(sdl, "input {name} {{");
        for field in self.input_fields.as_deref().unwrap_or_default() {
          let _ = writeln!(sdl, "  {}", render_input_value(field));
        }
        sdl.push_str("}\n\n");
      }
      _ => {}
    }
  }
}

fn render_args(args: &[InputValueDef]) -> String {
  if args.is_empty() {
    return String::new();
  }
  let rendered = args.iter().map(render_input_value).collect::<Vec<_>>();
  format!("({})", rendered.join(", "))
}

fn render_input_value(value: &InputValueDef) -> String {
  match &value.default_value {
    Some(default) => format!("{}: {} = {}", value.name, value.ty.render(), default),
    None => format!("{}: {}", value.name, value.ty.render()),
  }
}
