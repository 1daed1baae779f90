use std::fmt;
use std::marker::PhantomData;

/// A tagged operation document, statically associated with its result and
/// variables shapes.
///
/// The wrapper has no runtime behavior beyond exposing its operation text;
/// the type parameters exist purely so the compiler can relate the variables
/// a caller supplies to the result shape it gets back. The phantom carries
/// `fn(TVariables) -> TResult` so the marker stays `Send`/`Sync`/`Copy`
/// independent of the parameters.
pub struct TypedDocument<TResult, TVariables> {
  document: &'static str,
  _marker: PhantomData<fn(TVariables) -> TResult>,
}

impl<TResult, TVariables> TypedDocument<TResult, TVariables> {
  #[must_use]
  pub const fn new(document: &'static str) -> Self {
    Self {
      document,
      _marker: PhantomData,
    }
  }

  /// The wire operation text this document serializes to.
  #[must_use]
  pub const fn document(&self) -> &'static str {
    self.document
  }
}

// Manual impls: the derives would bound TResult/TVariables, which never
// appear in a value position here.
impl<TResult, TVariables> Clone for TypedDocument<TResult, TVariables> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<TResult, TVariables> Copy for TypedDocument<TResult, TVariables> {}

impl<TResult, TVariables> fmt::Debug for TypedDocument<TResult, TVariables> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypedDocument").field("document", &self.document).finish()
  }
}

impl<TResult, TVariables> fmt::Display for TypedDocument<TResult, TVariables> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.document)
  }
}

/// Recovers the static type associations from a [`TypedDocument`].
///
/// Use [`ResultOf`] and [`VariablesOf`] rather than naming the associated
/// types directly:
///
/// ```
/// use gql_gen_support::{ResultOf, TypedDocument, VariablesOf};
///
/// struct Health { ok: bool }
///
/// const HEALTH: TypedDocument<Health, ()> = TypedDocument::new("{ health }");
/// fn assert_shapes(_: VariablesOf<TypedDocument<Health, ()>>) -> Option<ResultOf<TypedDocument<Health, ()>>> {
///   None
/// }
/// ```
pub trait DocumentTypeDecoration {
  type Result;
  type Variables;
}

impl<TResult, TVariables> DocumentTypeDecoration for TypedDocument<TResult, TVariables> {
  type Result = TResult;
  type Variables = TVariables;
}

pub type ResultOf<T> = <T as DocumentTypeDecoration>::Result;
pub type VariablesOf<T> = <T as DocumentTypeDecoration>::Variables;

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, PartialEq)]
  struct Result1;
  struct Vars1;

  const DOC: TypedDocument<Result1, Vars1> = TypedDocument::new("query Q { field }");

  #[test]
  fn document_exposes_text() {
    assert_eq!(DOC.document(), "query Q { field }");
    assert_eq!(DOC.to_string(), "query Q { field }");
  }

  #[test]
  fn document_is_copy_without_parameter_bounds() {
    // Result1/Vars1 are not Clone; the marker must not require it.
    let a = DOC;
    let b = a;
    assert_eq!(a.document(), b.document());
  }

  #[test]
  fn decoration_projects_types() {
    fn takes_result(_: ResultOf<TypedDocument<Result1, Vars1>>) {}
    takes_result(Result1);
  }
}
