pub use sea_orm_migration::prelude::*;

mod m20260101_000000_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260101_000000_init::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Database, Statement};

    use super::*;

    #[tokio::test]
    async fn up_then_down_leaves_no_tables() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let backend = db.get_database_backend();
        let tables = db
            .query_all(Statement::from_string(
                backend,
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
            ))
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.try_get::<String>("", "name").unwrap())
            .collect::<Vec<_>>();
        for table in [
            "accounts",
            "budgets",
            "categories",
            "goals",
            "recurring_rules",
            "transactions",
            "users",
        ] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }

        Migrator::down(&db, None).await.unwrap();
        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("transactions").await.unwrap());
        assert!(!manager.has_table("users").await.unwrap());
    }
}
