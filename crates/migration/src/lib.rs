//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20241201_000011_create_store;
mod m20241201_000012_create_stylist;
mod m20241201_000013_create_stylist_store;
mod m20241201_000014_create_meta_column;
mod m20241201_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241201_000011_create_store::Migration),
            Box::new(m20241201_000012_create_stylist::Migration),
            Box::new(m20241201_000013_create_stylist_store::Migration),
            Box::new(m20241201_000014_create_meta_column::Migration),
            // Indexes should always be applied last
            Box::new(m20241201_000002_add_indexes::Migration),
        ]
    }
}
