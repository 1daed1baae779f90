//! Drives the support-crate dispatcher through a module shaped exactly like
//! the generator's output, so the artifact contract and the runtime stay in
//! agreement.

use gql_gen_support::{ExecuteError, QueryArguments, QueryRuntime, TypedDocument, execute_query};
use serde_json::{Value, json};

// Mirrors one generated module: result shape, variables shape, typed const.
mod gql {
  use serde::{Deserialize, Serialize};

  use super::TypedDocument;

  #[derive(Debug, Clone, PartialEq, Deserialize)]
  pub struct GetUserQuery {
    pub user: Option<GetUserQueryUser>,
  }

  #[derive(Debug, Clone, PartialEq, Deserialize)]
  pub struct GetUserQueryUser {
    pub id: String,
    pub name: String,
  }

  #[derive(Debug, Clone, PartialEq, Serialize)]
  pub struct GetUserQueryVariables {
    pub id: String,
  }

  pub const GET_USER_DOCUMENT: TypedDocument<GetUserQuery, GetUserQueryVariables> =
    TypedDocument::new("query GetUser($id: ID!) {\n  user(id: $id) {\n    id\n    name\n  }\n}\n");
}

struct StaticRuntime {
  response: Value,
}

impl QueryRuntime for StaticRuntime {
  async fn execute(&self, _operation: &str) -> Result<Value, ExecuteError> {
    Ok(self.response.clone())
  }

  async fn execute_with(&self, operation: &str, variables: Value) -> Result<Value, ExecuteError> {
    assert!(operation.starts_with("query GetUser"));
    assert_eq!(variables, json!({ "id": "u-1" }));
    Ok(self.response.clone())
  }
}

#[tokio::test]
async fn generated_shape_round_trips_through_the_dispatcher() {
  let runtime = StaticRuntime {
    response: json!({ "user": { "id": "u-1", "name": "Ada" } }),
  };
  let vars = gql::GetUserQueryVariables { id: "u-1".to_string() };

  let result = execute_query(&runtime, &gql::GET_USER_DOCUMENT, QueryArguments::Variables(&vars))
    .await
    .unwrap();

  assert_eq!(
    result.user,
    Some(gql::GetUserQueryUser {
      id: "u-1".to_string(),
      name: "Ada".to_string(),
    })
  );
}

#[tokio::test]
async fn null_user_decodes_to_none() {
  let runtime = StaticRuntime { response: json!({ "user": null }) };

  let result = execute_query(&runtime, &gql::GET_USER_DOCUMENT, QueryArguments::Bare)
    .await
    .unwrap();

  assert_eq!(result.user, None);
}
