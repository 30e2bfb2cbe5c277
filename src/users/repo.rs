use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage-level unique constraint on `email` rejected the row.
    #[error("email already taken")]
    EmailTaken,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: Uuid) -> Result<u64, StoreError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, date_created
            FROM users
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, date_created
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password, date_created
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, password, date_created
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if unique {
                StoreError::EmailTaken
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn delete(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
pub mod memory {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use time::OffsetDateTime;

    use super::*;

    /// In-process store that records how often it was written and queried.
    #[derive(Default)]
    pub struct InMemoryUserRepository {
        users: Mutex<Vec<User>>,
        inserts: AtomicUsize,
        email_lookups: AtomicUsize,
    }

    impl InMemoryUserRepository {
        pub fn insert_count(&self) -> usize {
            self.inserts.load(Ordering::SeqCst)
        }

        pub fn email_lookup_count(&self) -> usize {
            self.email_lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn list(&self) -> Result<Vec<User>, StoreError> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            self.email_lookups.fetch_add(1, Ordering::SeqCst);
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == id).cloned())
        }

        async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(StoreError::EmailTaken);
            }
            self.inserts.fetch_add(1, Ordering::SeqCst);
            let row = User {
                id: Uuid::new_v4(),
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                password: user.password,
                date_created: OffsetDateTime::now_utc(),
            };
            users.push(row.clone());
            Ok(row)
        }

        async fn delete(&self, id: Uuid) -> Result<u64, StoreError> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            Ok((before - users.len()) as u64)
        }
    }
}
