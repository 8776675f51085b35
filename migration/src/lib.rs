pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_categories_table;
mod m20250301_000002_create_skills_table;
mod m20250301_000003_create_users_table;
mod m20250301_000004_create_projects_table;
mod m20250301_000005_create_sample_works_table;
mod m20250301_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_categories_table::Migration),
            Box::new(m20250301_000002_create_skills_table::Migration),
            Box::new(m20250301_000003_create_users_table::Migration),
            Box::new(m20250301_000004_create_projects_table::Migration),
            Box::new(m20250301_000005_create_sample_works_table::Migration),
            Box::new(m20250301_000006_add_indexes::Migration),
        ]
    }
}
