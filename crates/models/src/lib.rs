pub mod errors;
pub mod db;
pub mod soft_delete;
pub mod validation;
pub mod store;
pub mod stylist;
pub mod stylist_store;
pub mod meta_column;

pub use errors::ModelError;
pub use soft_delete::SoftDelete;
