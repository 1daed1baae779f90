pub mod generate;
pub mod init;
pub mod list;

pub use generate::{GenerateConfig, generate_code};
pub use init::init_project;
pub use list::list_operations;
