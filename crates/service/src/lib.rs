//! Service layer for the salon admin backend.
//! - Visible-only reads and soft delete / restore over any `SoftDelete` entity.
//! - Cursor pagination, derived stylist counts and custom-field sanitizing.
//! - Store and stylist services composed from the pieces above.

pub mod errors;
pub mod soft_delete;
pub mod pagination;
pub mod aggregates;
pub mod custom_fields;
pub mod store_service;
pub mod stylist_service;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use pagination::{CursorPage, CursorParams};
pub use store_service::{StoreDetail, StoreService, StoreSummary, StoreView};
pub use stylist_service::{StylistService, StylistView};
