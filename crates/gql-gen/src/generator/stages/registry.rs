//! Stage 4: the `graphql!` macro and the document registry. This stage is
//! rendered as text rather than through `quote`, since `macro_rules!` arms
//! keyed on string literals do not round-trip through a token formatter.

use std::fmt::Write;

use crate::generator::documents::SourceWithOperations;
use crate::generator::naming;

pub(crate) fn generate(module_name: &str, sources: &[SourceWithOperations]) -> String {
  let mut out = String::new();
  out.push_str("use super::graphql::*;\n\n");

  // One arm per plucked literal, matching the literal exactly as written and
  // expanding to the typed constant of its first definition. The fallback arm
  // turns an unknown document into a compile error instead of a runtime one.
  out.push_str("#[macro_export]\nmacro_rules! graphql {\n");
  for source in sources {
    let literal = format!("{:?}", source.source.raw);
    let constant = naming::document_const_name(&source.operations[0].derived_name);
    let _ = writeln!(out, "  ({literal}) => {{\n    $crate::{module_name}::{constant}\n  }};");
  }
  out.push_str("  ($other:literal) => {\n");
  out.push_str("    compile_error!(\"unknown GraphQL document; re-run the generator after editing it\")\n");
  out.push_str("  };\n}\n\n");

  out.push_str("pub static DOCUMENT_REGISTRY: &[(&str, &str)] = &[\n");
  for source in sources {
    for named in &source.operations {
      let constant = naming::document_const_name(&named.derived_name);
      let _ = writeln!(out, "  (\"{}\", super::graphql::{constant}.document()),", named.derived_name);
    }
  }
  out.push_str("];\n");
  out
}
