use async_trait::async_trait;
use sqlx::{query_as, PgPool};

use super::ContactMessageStore;
use crate::middleware::error_handling::Result;
use crate::models::{ContactMessage, NewContactMessage};

pub struct ContactMessageRepository {
    pool: PgPool,
}

impl ContactMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactMessageStore for ContactMessageRepository {
    async fn insert(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        let stored = query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, message, created_at
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>> {
        let messages = query_as::<_, ContactMessage>(
            "SELECT id, name, email, phone, message, created_at FROM contact_messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
