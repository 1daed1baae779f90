use std::path::Path;

mod dispatch;
mod pipeline;

pub(crate) const TEST_SDL: &str = r"
  schema { query: Query }
  type Query {
    user(id: ID!): User
    orphan: Orphan
  }
  type User {
    id: ID!
    name: String!
    createdAt: Instant
  }
  type Orphan {
    reason: String!
  }
  scalar Instant
";

pub(crate) fn write_source(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, content).unwrap();
}
