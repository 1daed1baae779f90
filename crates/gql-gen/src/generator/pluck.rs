//! Extraction of operation literals from Rust source files.
//!
//! A literal participates when it is the sole argument of a `graphql!(..)` or
//! `gql!(..)` macro invocation, or a `graphql(..)` / `gql(..)` call
//! expression. The file is parsed with `syn`, so literals in comments or
//! strings never match.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use syn::visit::Visit;
use syn::{Expr, ExprCall, Lit, LitStr, Macro};
use walkdir::WalkDir;

use crate::generator::documents::SourceDocument;

const TAG_NAMES: &[&str] = &["graphql", "gql"];

/// Resolves the `--inputs` argument to the set of files to scan, in sorted
/// order. A trailing glob suffix (`/**/*.rs` and friends) is stripped down to
/// its walk root; a plain file path is taken as-is.
pub(crate) fn scan_inputs(inputs: &str) -> anyhow::Result<Vec<PathBuf>> {
  let root = walk_root(inputs);

  if root.is_file() {
    return Ok(vec![root]);
  }
  if !root.is_dir() {
    anyhow::bail!("input path {} does not exist", root.display());
  }

  let mut files = Vec::new();
  for entry in WalkDir::new(&root).sort_by_file_name() {
    let entry = entry?;
    if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "rs") {
      files.push(entry.path().to_path_buf());
    }
  }

  Ok(files)
}

fn walk_root(inputs: &str) -> PathBuf {
  let root = match inputs.find(['*', '?', '[']) {
    Some(glob_start) => {
      let prefix = &inputs[..glob_start];
      prefix.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
    None => inputs,
  };

  if root.is_empty() {
    PathBuf::from(".")
  } else {
    PathBuf::from(root)
  }
}

/// Plucks every tagged operation literal out of one file, in source order.
pub(crate) fn pluck_documents(path: &Path, content: &str) -> anyhow::Result<Vec<SourceDocument>> {
  let file = syn::parse_file(content).with_context(|| format!("failed to parse {}", path.display()))?;

  let mut collector = LiteralCollector { literals: Vec::new() };
  collector.visit_file(&file);

  collector
    .literals
    .into_iter()
    .map(|lit| {
      SourceDocument::parse(&lit.value(), path.to_path_buf())
        .with_context(|| format!("malformed operation document in {}", path.display()))
    })
    .collect()
}

struct LiteralCollector {
  literals: Vec<LitStr>,
}

impl LiteralCollector {
  fn push_if_tagged(&mut self, name: &str, lit: Option<LitStr>) {
    if TAG_NAMES.contains(&name)
      && let Some(lit) = lit
    {
      self.literals.push(lit);
    }
  }
}

impl<'ast> Visit<'ast> for LiteralCollector {
  fn visit_macro(&mut self, mac: &'ast Macro) {
    if let Some(segment) = mac.path.segments.last() {
      let lit = syn::parse2::<LitStr>(mac.tokens.clone()).ok();
      self.push_if_tagged(&segment.ident.to_string(), lit);
    }
    syn::visit::visit_macro(self, mac);
  }

  fn visit_expr_call(&mut self, call: &'ast ExprCall) {
    if let Expr::Path(path) = call.func.as_ref()
      && let Some(segment) = path.path.segments.last()
      && call.args.len() == 1
      && let Some(Expr::Lit(arg)) = call.args.first()
      && let Lit::Str(lit) = &arg.lit
    {
      self.push_if_tagged(&segment.ident.to_string(), Some(lit.clone()));
    }
    syn::visit::visit_expr_call(self, call);
  }
}
