pub(crate) mod documents;
pub(crate) mod errors;
pub(crate) mod naming;
pub(crate) mod orchestrator;
pub(crate) mod pluck;
pub(crate) mod scalars;
pub(crate) mod schema;
pub(crate) mod stages;
pub(crate) mod stitcher;

/// Canonical schema AST, the single source of truth for generated types.
pub(crate) type SchemaDocument = graphql_parser::schema::Document<'static, String>;

/// Parsed form of one plucked operation document.
pub(crate) type QueryDocument = graphql_parser::query::Document<'static, String>;
