//! Runtime support for code emitted by `gql-gen`.
//!
//! Generated artifacts depend on this crate for exactly two things: the
//! [`TypedDocument`] wrapper their document constants are declared with, and
//! the [`execute_query`]/[`execute_query_priv`] dispatchers that hand those
//! constants to a [`QueryRuntime`] backend.

mod document;
mod execute;

pub use document::{DocumentTypeDecoration, ResultOf, TypedDocument, VariablesOf};
pub use execute::{
  ContextOverride, ExecuteError, PrivilegedArguments, PrivilegedQueryRuntime, QueryArguments, QueryRuntime,
  execute_query, execute_query_priv,
};
