use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::TypedDocument;

/// Per-call override of the ambient request context, only honored by the
/// privileged execution path.
pub type ContextOverride = serde_json::Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
  /// The document argument was not a tagged operation of the expected shape.
  /// Raised at the boundary, before any backend interaction.
  #[error("expected a tagged operation document, got: {0:?}")]
  InvalidDocument(String),
  #[error("failed to serialize variables")]
  Variables(#[source] serde_json::Error),
  #[error("failed to decode result")]
  Decode(#[source] serde_json::Error),
  #[error("runtime error: {0}")]
  Runtime(String),
}

/// The backend a dispatched call executes against.
///
/// The two methods correspond to the zero- and one-argument transport call
/// shapes; which one runs is decided entirely by the [`QueryArguments`]
/// variant, never by inspecting the variables value. Cancellation, timeouts,
/// and retries are the backend's concern.
pub trait QueryRuntime {
  fn execute(&self, operation: &str) -> impl Future<Output = Result<Value, ExecuteError>> + Send;

  fn execute_with(&self, operation: &str, variables: Value) -> impl Future<Output = Result<Value, ExecuteError>> + Send;
}

/// Extension of [`QueryRuntime`] with the two-argument call shape that
/// accepts a [`ContextOverride`].
pub trait PrivilegedQueryRuntime: QueryRuntime {
  fn execute_with_context(
    &self,
    operation: &str,
    variables: Value,
    context: ContextOverride,
  ) -> impl Future<Output = Result<Value, ExecuteError>> + Send;
}

/// Which optional arguments accompany a public execution call.
#[derive(Debug)]
pub enum QueryArguments<'a, V> {
  Bare,
  Variables(&'a V),
}

/// Which optional arguments accompany a privileged execution call.
#[derive(Debug)]
pub enum PrivilegedArguments<'a, V> {
  Bare,
  Variables(&'a V),
  VariablesWithContext(&'a V, ContextOverride),
}

/// Executes a typed document against a runtime backend.
///
/// Exactly one backend call shape is selected by pattern-matching `args`.
/// No runtime validation is performed on the variables beyond serialization;
/// required-variable enforcement is a compile-time contract carried by the
/// document's type parameters.
pub async fn execute_query<TResult, TVariables, X>(
  runtime: &X,
  doc: &TypedDocument<TResult, TVariables>,
  args: QueryArguments<'_, TVariables>,
) -> Result<TResult, ExecuteError>
where
  TResult: DeserializeOwned,
  TVariables: Serialize,
  X: QueryRuntime,
{
  let operation = checked_document(doc)?;

  let value = match args {
    QueryArguments::Bare => runtime.execute(operation).await?,
    QueryArguments::Variables(vars) => {
      let vars = serde_json::to_value(vars).map_err(ExecuteError::Variables)?;
      runtime.execute_with(operation, vars).await?
    }
  };

  serde_json::from_value(value).map_err(ExecuteError::Decode)
}

/// Privileged variant of [`execute_query`], additionally able to override the
/// ambient request context for a single call.
pub async fn execute_query_priv<TResult, TVariables, X>(
  runtime: &X,
  doc: &TypedDocument<TResult, TVariables>,
  args: PrivilegedArguments<'_, TVariables>,
) -> Result<TResult, ExecuteError>
where
  TResult: DeserializeOwned,
  TVariables: Serialize,
  X: PrivilegedQueryRuntime,
{
  let operation = checked_document(doc)?;

  let value = match args {
    PrivilegedArguments::Bare => runtime.execute(operation).await?,
    PrivilegedArguments::Variables(vars) => {
      let vars = serde_json::to_value(vars).map_err(ExecuteError::Variables)?;
      runtime.execute_with(operation, vars).await?
    }
    PrivilegedArguments::VariablesWithContext(vars, context) => {
      let vars = serde_json::to_value(vars).map_err(ExecuteError::Variables)?;
      runtime.execute_with_context(operation, vars, context).await?
    }
  };

  serde_json::from_value(value).map_err(ExecuteError::Decode)
}

/// Boundary check: the embedded text must at least open like an executable
/// GraphQL document. Anything else was not produced by the generator and is
/// rejected before the backend sees it.
fn checked_document<TResult, TVariables>(
  doc: &TypedDocument<TResult, TVariables>,
) -> Result<&'static str, ExecuteError> {
  let text = doc.document();
  let head = text.trim_start();

  let tagged = head.starts_with('{')
    || head.starts_with("query")
    || head.starts_with("mutation")
    || head.starts_with("subscription")
    || head.starts_with("fragment");

  if tagged {
    Ok(text)
  } else {
    let mut preview: String = text.chars().take(40).collect();
    if text.chars().nth(40).is_some() {
      preview.push('\u{2026}');
    }
    Err(ExecuteError::InvalidDocument(preview))
  }
}
