//! Joins the four stage fragments into the single output module. The stages
//! emit code as if schema types lived in a sibling `graphql` module and the
//! document wrapper kept its support-crate name; the rewrite rules below
//! reconcile both into the flat, single-file layout. Every rule must find its
//! needle: a silent no-op here means a stage stopped emitting what the
//! stitcher expects, and that has to fail the run.

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum StitchError {
  #[error("rewrite rule `{rule}` found no occurrence of `{needle}`")]
  NeedleMissing { rule: &'static str, needle: &'static str },
}

#[derive(Clone, Copy)]
enum Occurrence {
  First,
  All,
}

struct RewriteRule {
  name: &'static str,
  needle: &'static str,
  replacement: &'static str,
  occurrence: Occurrence,
}

impl RewriteRule {
  fn apply(&self, text: &str) -> Result<String, StitchError> {
    if !text.contains(self.needle) {
      return Err(StitchError::NeedleMissing { rule: self.name, needle: self.needle });
    }
    Ok(match self.occurrence {
      Occurrence::First => text.replacen(self.needle, self.replacement, 1),
      Occurrence::All => text.replace(self.needle, self.replacement),
    })
  }
}

/// The rules in application order. Imports go before prefixes so a stripped
/// prefix can never leave a dangling import behind.
fn rules() -> [RewriteRule; 4] {
  [
    RewriteRule {
      name: "drop-schema-glob-import",
      needle: "use super::graphql::*;\n",
      replacement: "",
      occurrence: Occurrence::All,
    },
    RewriteRule {
      name: "strip-schema-module-prefix",
      needle: "super::graphql::",
      replacement: "",
      occurrence: Occurrence::All,
    },
    RewriteRule {
      name: "drop-support-import",
      needle: "use gql_gen_support::TypedDocumentString;\n",
      replacement: "",
      occurrence: Occurrence::First,
    },
    RewriteRule {
      name: "rename-document-wrapper",
      needle: "TypedDocumentString",
      replacement: "TypedDocument",
      occurrence: Occurrence::All,
    },
  ]
}

/// Concatenates stage fragments and applies the rewrite rules. Runs with no
/// retained operations produce a schema-only module, so nothing the rules
/// target exists and they are skipped wholesale.
pub(crate) fn stitch(source_label: &str, fragments: &[String], has_operations: bool) -> Result<String, StitchError> {
  let mut body = fragments.join("\n");
  if has_operations {
    for rule in rules() {
      body = rule.apply(&body)?;
    }
  }

  let mut out = String::new();
  out.push_str("// Generated by gql-gen. Do not edit by hand.\n");
  out.push_str(&format!("// Schema source: {source_label}\n\n"));
  if has_operations {
    out.push_str("use gql_gen_support::TypedDocument;\n\n");
  }
  out.push_str(&body);
  Ok(out)
}
