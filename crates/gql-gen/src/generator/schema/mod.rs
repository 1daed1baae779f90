pub(crate) mod index;
pub(crate) mod introspection;
pub(crate) mod loader;
