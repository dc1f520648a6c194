pub use sea_orm_migration::prelude::*;

mod m20250301_000001_franchises;
mod m20250301_000002_employees;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_franchises::Migration),
            Box::new(m20250301_000002_employees::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn migrations_apply_and_roll_back_on_sqlite() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("franchises").await.unwrap());
        assert!(manager.has_table("employees").await.unwrap());

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("employees").await.unwrap());
        assert!(!manager.has_table("franchises").await.unwrap());
    }
}
