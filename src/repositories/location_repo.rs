use sqlx::{query_as, PgPool};
use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{Location, UpdateLocationRequest};

const COLUMNS: &str = "id, name, slug, headline, content, created_at, updated_at";

pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Location>> {
        let sql = format!("SELECT {} FROM locations ORDER BY name ASC", COLUMNS);
        let locations = query_as::<_, Location>(&sql).fetch_all(&self.pool).await?;
        Ok(locations)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>> {
        let sql = format!("SELECT {} FROM locations WHERE slug = $1", COLUMNS);
        let location = query_as::<_, Location>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(location)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateLocationRequest) -> Result<Option<Location>> {
        let sql = format!(
            r#"
            UPDATE locations
            SET name = $1, slug = $2, headline = $3, content = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        );
        let location = query_as::<_, Location>(&sql)
            .bind(request.name.trim())
            .bind(request.slug.trim())
            .bind(request.headline.trim())
            .bind(request.content.trim())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(location)
    }
}
