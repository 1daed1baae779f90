use crate::generator::errors::GenerateError;

/// The closed scalar table. Every scalar the schema uses must appear here;
/// there is deliberately no untyped fallback.
const SCALAR_TABLE: &[(&str, &str)] = &[
  ("Int", "i64"),
  ("Float", "f64"),
  ("String", "String"),
  ("Boolean", "bool"),
  ("ID", "String"),
  ("Decimal", "f64"),
  ("Instant", "String"),
  ("LocalDate", "String"),
  ("LocalDateTime", "String"),
  ("LocalTime", "String"),
  ("Uuid", "String"),
  ("Json", "serde_json::Value"),
  ("Vector", "Vec<f64>"),
];

const BUILTINS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

pub(crate) fn is_builtin_scalar(name: &str) -> bool {
  BUILTINS.contains(&name)
}

/// Rust type a scalar maps to, or an error when the table has no entry.
pub(crate) fn scalar_rust_type(name: &str) -> Result<&'static str, GenerateError> {
  SCALAR_TABLE
    .iter()
    .find(|(scalar, _)| *scalar == name)
    .map(|(_, rust)| *rust)
    .ok_or_else(|| GenerateError::UnmappedScalar(name.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_scalars_map_to_primitives() {
    assert_eq!(scalar_rust_type("Int").unwrap(), "i64");
    assert_eq!(scalar_rust_type("Boolean").unwrap(), "bool");
    assert_eq!(scalar_rust_type("ID").unwrap(), "String");
  }

  #[test]
  fn custom_scalars_follow_the_fixed_table() {
    assert_eq!(scalar_rust_type("Decimal").unwrap(), "f64");
    assert_eq!(scalar_rust_type("LocalDateTime").unwrap(), "String");
    assert_eq!(scalar_rust_type("Json").unwrap(), "serde_json::Value");
    assert_eq!(scalar_rust_type("Vector").unwrap(), "Vec<f64>");
  }

  #[test]
  fn unmapped_scalars_are_an_error_not_an_any() {
    let err = scalar_rust_type("Money").unwrap_err();
    assert!(matches!(err, GenerateError::UnmappedScalar(name) if name == "Money"));
  }
}
