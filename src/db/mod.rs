pub mod json_store;
pub mod migrations;
pub mod repository;
pub mod store;

pub use json_store::JsonStore;
pub use repository::SqliteStore;
pub use store::Store;
