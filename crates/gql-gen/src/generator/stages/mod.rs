//! The four synthesis stages, in their fixed order: schema types, operation
//! types, typed-document wrappers, tagged-operation registry. Each stage is a
//! pure function of its inputs producing one formatted text fragment; the
//! stitcher owns concatenation and cross-stage reconciliation.

pub(crate) mod operation_types;
pub(crate) mod registry;
pub(crate) mod schema_types;
pub(crate) mod typed_documents;

use graphql_parser::query::Type;
use proc_macro2::TokenStream;

use crate::generator::errors::GenerateError;

/// Parses and pretty-prints one stage's token stream.
pub(crate) fn format_fragment(tokens: TokenStream) -> Result<String, GenerateError> {
  let file: syn::File = syn::parse2(tokens)?;
  Ok(prettyplease::unparse(&file))
}

/// The innermost named type of a possibly wrapped GraphQL type.
pub(crate) fn named_base<'a>(ty: &'a Type<'static, String>) -> &'a str {
  match ty {
    Type::NamedType(name) => name,
    Type::ListType(inner) | Type::NonNullType(inner) => named_base(inner),
  }
}

/// Re-applies a GraphQL type's list/nullability wrappers around an already
/// resolved Rust base type. GraphQL types are nullable unless marked `!`, so
/// `T` becomes `Option<T>` and `[T!]!` becomes `Vec<T>`.
pub(crate) fn wrap_rust_type(ty: &Type<'static, String>, base: &str) -> String {
  fn go(ty: &Type<'static, String>, base: &str) -> (String, bool) {
    match ty {
      Type::NamedType(_) => (base.to_string(), true),
      Type::ListType(inner) => {
        let (rendered, nullable) = go(inner, base);
        let element = if nullable { format!("Option<{rendered}>") } else { rendered };
        (format!("Vec<{element}>"), true)
      }
      Type::NonNullType(inner) => {
        let (rendered, _) = go(inner, base);
        (rendered, false)
      }
    }
  }

  let (rendered, nullable) = go(ty, base);
  if nullable { format!("Option<{rendered}>") } else { rendered }
}

pub(crate) fn parse_rust_type(type_str: &str) -> Result<syn::Type, GenerateError> {
  Ok(syn::parse_str(type_str)?)
}
