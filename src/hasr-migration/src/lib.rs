pub use sea_orm_migration::prelude::*;

mod m20250601_000000_sessions;
mod m20250601_000001_hasr_rows;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000000_sessions::Migration),
            Box::new(m20250601_000001_hasr_rows::Migration),
        ]
    }
}
