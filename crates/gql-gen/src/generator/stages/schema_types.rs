//! Stage 1: one Rust declaration per schema type.

use graphql_parser::schema::{EnumType, InputObjectType, TypeDefinition, UnionType};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{format_fragment, named_base, parse_rust_type, wrap_rust_type};
use crate::generator::errors::GenerateError;
use crate::generator::naming::{field_ident, variant_ident};
use crate::generator::scalars::{is_builtin_scalar, scalar_rust_type};
use crate::generator::schema::index::SchemaIndex;

pub(crate) fn generate(index: &SchemaIndex) -> Result<String, GenerateError> {
  let mut items: Vec<TokenStream> = Vec::new();

  for (name, definition) in index.types() {
    match definition {
      TypeDefinition::Scalar(_) => {
        if is_builtin_scalar(name) {
          continue;
        }
        let rust = parse_rust_type(scalar_rust_type(name)?)?;
        let ident = format_ident!("{}", name.as_str());
        items.push(quote! { pub type #ident = #rust; });
      }
      TypeDefinition::Object(object) => {
        items.push(emit_struct(index, name, &object.fields)?);
      }
      TypeDefinition::Interface(interface) => {
        items.push(emit_struct(index, name, &interface.fields)?);
      }
      TypeDefinition::InputObject(input) => {
        items.push(emit_input_object(index, name, input)?);
      }
      TypeDefinition::Enum(enumeration) => {
        items.push(emit_enum(name, enumeration));
      }
      TypeDefinition::Union(union) => {
        items.push(emit_union(name, union));
      }
    }
  }

  format_fragment(quote! {
    use serde::{Deserialize, Serialize};

    #(#items)*
  })
}

/// Rust base type for a named schema type referenced from another schema
/// declaration. Custom scalars resolve to their generated alias, so the
/// mapping is still enforced here.
fn schema_base_type(index: &SchemaIndex, name: &str) -> Result<String, GenerateError> {
  if is_builtin_scalar(name) {
    return Ok(scalar_rust_type(name)?.to_string());
  }
  match index.type_def(name) {
    Some(TypeDefinition::Scalar(_)) => {
      scalar_rust_type(name)?;
      Ok(name.to_string())
    }
    Some(_) => Ok(name.to_string()),
    None => Err(GenerateError::UnknownType(name.to_string())),
  }
}

fn emit_struct(
  index: &SchemaIndex,
  name: &str,
  fields: &[graphql_parser::schema::Field<'static, String>],
) -> Result<TokenStream, GenerateError> {
  let ident = format_ident!("{}", name);
  let mut field_tokens = Vec::new();

  for field in fields {
    let (rust_name, rename) = field_ident(&field.name);
    let field_ident = format_ident!("{}", rust_name);
    let base = schema_base_type(index, named_base(&field.field_type))?;
    let ty = parse_rust_type(&wrap_rust_type(&field.field_type, &base))?;
    let rename_attr = rename.map(|wire| quote! { #[serde(rename = #wire)] });

    field_tokens.push(quote! {
      #rename_attr
      pub #field_ident: #ty
    });
  }

  Ok(quote! {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct #ident {
      #(#field_tokens),*
    }
  })
}

fn emit_input_object(
  index: &SchemaIndex,
  name: &str,
  input: &InputObjectType<'static, String>,
) -> Result<TokenStream, GenerateError> {
  let ident = format_ident!("{}", name);
  let mut field_tokens = Vec::new();

  for field in &input.fields {
    let (rust_name, rename) = field_ident(&field.name);
    let field_ident = format_ident!("{}", rust_name);
    let base = schema_base_type(index, named_base(&field.value_type))?;
    let rendered = wrap_rust_type(&field.value_type, &base);
    let skip_attr = rendered
      .starts_with("Option<")
      .then(|| quote! { #[serde(skip_serializing_if = "Option::is_none")] });
    let ty = parse_rust_type(&rendered)?;
    let rename_attr = rename.map(|wire| quote! { #[serde(rename = #wire)] });

    field_tokens.push(quote! {
      #rename_attr
      #skip_attr
      pub #field_ident: #ty
    });
  }

  Ok(quote! {
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct #ident {
      #(#field_tokens),*
    }
  })
}

fn emit_enum(name: &str, enumeration: &EnumType<'static, String>) -> TokenStream {
  let ident = format_ident!("{}", name);
  let variants = enumeration.values.iter().map(|value| {
    let (rust_name, rename) = variant_ident(&value.name);
    let variant = format_ident!("{}", rust_name);
    let rename_attr = rename.map(|wire| quote! { #[serde(rename = #wire)] });
    quote! {
      #rename_attr
      #variant
    }
  });

  quote! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum #ident {
      #(#variants),*
    }
  }
}

fn emit_union(name: &str, union: &UnionType<'static, String>) -> TokenStream {
  let ident = format_ident!("{}", name);
  let variants = union.types.iter().map(|member| {
    let variant = format_ident!("{}", member.as_str());
    quote! { #variant(#variant) }
  });

  quote! {
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum #ident {
      #(#variants),*
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn generate_sdl(sdl: &str) -> Result<String, GenerateError> {
    let document = graphql_parser::schema::parse_schema::<String>(sdl).unwrap().into_static();
    generate(&SchemaIndex::build(&document))
  }

  #[test]
  fn objects_become_structs_with_renamed_fields() {
    let output = generate_sdl(
      r"
      type User {
        id: ID!
        createdAt: Instant
        bestFriend: User
      }
      scalar Instant
      ",
    )
    .unwrap();

    assert!(output.contains("pub struct User"));
    assert!(output.contains("pub id: String"));
    assert!(output.contains("#[serde(rename = \"createdAt\")]"));
    assert!(output.contains("pub created_at: Option<Instant>"));
    assert!(output.contains("pub best_friend: Option<User>"));
    assert!(output.contains("pub type Instant = String;"));
  }

  #[test]
  fn enums_unions_and_inputs_are_declared() {
    let output = generate_sdl(
      r"
      enum Role { ADMIN USER }
      union Actor = Alice | Bob
      type Alice { name: String! }
      type Bob { name: String! }
      input Filter { role: Role limit: Int }
      ",
    )
    .unwrap();

    assert!(output.contains("pub enum Role"));
    assert!(output.contains("#[serde(rename = \"ADMIN\")]"));
    assert!(output.contains("#[serde(untagged)]"));
    assert!(output.contains("Alice(Alice)"));
    assert!(output.contains("pub struct Filter"));
    assert!(output.contains("#[serde(skip_serializing_if = \"Option::is_none\")]"));
  }

  #[test]
  fn unmapped_scalar_aborts_generation() {
    let err = generate_sdl("scalar Money type Query { price: Money }").unwrap_err();
    assert!(matches!(err, GenerateError::UnmappedScalar(name) if name == "Money"));
  }

  #[test]
  fn output_is_name_ordered_and_deterministic() {
    let sdl = "type Zeta { ok: Boolean! } type Alpha { ok: Boolean! }";
    let first = generate_sdl(sdl).unwrap();
    let second = generate_sdl(sdl).unwrap();
    assert_eq!(first, second);
    assert!(first.find("struct Alpha").unwrap() < first.find("struct Zeta").unwrap());
  }
}
