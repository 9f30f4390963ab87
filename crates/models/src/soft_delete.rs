//! Entities carrying a nullable `deleted_at` marker.
//!
//! The service layer builds its visible-only repository on top of this trait;
//! entities only describe which columns hold the identifier and the markers.
use sea_orm::EntityTrait;

pub trait SoftDelete: EntityTrait {
    /// Entity name used in error messages and logs.
    const LABEL: &'static str;

    fn id_column() -> Self::Column;

    fn deleted_at_column() -> Self::Column;

    fn updated_at_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> i32;
}
