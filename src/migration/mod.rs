//! SeaORM database migrations.
//!
//! The production database is provisioned out of band; these migrations
//! describe the same schema for tests and for `vibecoders-admin migrate`.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_magic_links;
mod m20250301_000003_create_prompts_and_projects;
mod m20250301_000004_create_forum;
mod m20250301_000005_create_budget;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_magic_links::Migration),
            Box::new(m20250301_000003_create_prompts_and_projects::Migration),
            Box::new(m20250301_000004_create_forum::Migration),
            Box::new(m20250301_000005_create_budget::Migration),
        ]
    }
}
