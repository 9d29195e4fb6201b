use anyhow::Result;
use async_trait::async_trait;
use hangman_core::SessionStore;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::entities::{prelude::*, session_entries};

/// Session key-value pairs stored in SQLite, surviving restarts.
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, name: &str) -> Result<Option<String>> {
        let entry = SessionEntries::find_by_id(name.to_string())
            .one(&self.db)
            .await?;
        Ok(entry.map(|model| model.value))
    }

    pub async fn upsert(&self, name: &str, value: &str) -> Result<()> {
        let entry = session_entries::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            value: ActiveValue::Set(value.to_string()),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        SessionEntries::insert(entry)
            .on_conflict(
                OnConflict::column(session_entries::Column::Name)
                    .update_columns([
                        session_entries::Column::Value,
                        session_entries::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        tracing::debug!("Stored session entry {}", name);
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<bool> {
        let result = SessionEntries::delete_by_id(name.to_string())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<usize> {
        let entries = SessionEntries::find().all(&self.db).await?;
        Ok(entries.len())
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.find(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.upsert(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.delete(key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use hangman_core::{NICK_KEY, NickChange, POINTS_KEY, Session};
    use migration::{Migrator, MigratorTrait};
    use std::sync::Arc;

    async fn setup_test_db() -> SessionRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SessionRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_and_find_entry() {
        let repo = setup_test_db().await;

        assert_eq!(repo.find(NICK_KEY).await.unwrap(), None);

        repo.upsert(NICK_KEY, "Faker").await.unwrap();
        assert_eq!(repo.find(NICK_KEY).await.unwrap(), Some("Faker".to_string()));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_value() {
        let repo = setup_test_db().await;

        repo.upsert(POINTS_KEY, "100").await.unwrap();
        repo.upsert(POINTS_KEY, "250").await.unwrap();

        assert_eq!(repo.find(POINTS_KEY).await.unwrap(), Some("250".to_string()));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let repo = setup_test_db().await;

        repo.upsert(NICK_KEY, "Faker").await.unwrap();
        assert!(repo.delete(NICK_KEY).await.unwrap());
        assert!(!repo.delete(NICK_KEY).await.unwrap());
        assert_eq!(repo.find(NICK_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_over_database() {
        let repo = Arc::new(setup_test_db().await);
        let session = Session::new(repo.clone());

        assert_eq!(session.set_nick("Faker").await.unwrap(), NickChange::Created);
        session.set_best_score(180).await.unwrap();

        // A second session over the same storage sees the same identity
        let reloaded = Session::new(repo.clone());
        assert_eq!(reloaded.get_nick().await.unwrap(), Some("Faker".to_string()));
        assert_eq!(reloaded.best_score().await.unwrap(), 180);
        assert_eq!(reloaded.set_nick("Faker").await.unwrap(), NickChange::Unchanged);

        reloaded.clear_nick().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
