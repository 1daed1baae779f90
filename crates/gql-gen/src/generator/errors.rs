use thiserror::Error;

/// Fatal conversion errors. Anything recoverable is collected as a warning on
/// the orchestrator instead.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("scalar `{0}` has no explicit Rust mapping; the scalar table is closed and does not fall back to an untyped value")]
  UnmappedScalar(String),

  #[error("operation selects unknown type `{0}`")]
  UnknownType(String),

  #[error("field `{field}` does not exist on type `{parent}`")]
  UnknownField { parent: String, field: String },

  #[error("fragment `{0}` is spread but was not found in any scanned source")]
  UnknownFragment(String),

  #[error("field `{field}` on `{parent}` is a composite type and requires a sub-selection")]
  MissingSelection { parent: String, field: String },

  #[error("type `{0}` cannot be used in variable position")]
  InvalidVariableType(String),

  #[error("definition name `{name}` derived twice, in {first} and {second}; rename one of the definitions")]
  DuplicateDefinition { name: String, first: String, second: String },

  #[error("generated declarations failed to re-parse")]
  Syntax(#[from] syn::Error),
}
