use sqlx::{query_as, PgPool};
use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{Blog, BlogRecord};

const COLUMNS: &str =
    "id, title, slug, content, excerpt, cover_image, author, category, published_at, created_at";

pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drafts included; for the admin area.
    pub async fn list_all(&self) -> Result<Vec<Blog>> {
        let sql = format!("SELECT {} FROM blogs ORDER BY created_at DESC", COLUMNS);
        let blogs = query_as::<_, Blog>(&sql).fetch_all(&self.pool).await?;
        Ok(blogs)
    }

    pub async fn list_published(&self) -> Result<Vec<Blog>> {
        let sql = format!(
            "SELECT {} FROM blogs WHERE published_at IS NOT NULL ORDER BY published_at DESC",
            COLUMNS
        );
        let blogs = query_as::<_, Blog>(&sql).fetch_all(&self.pool).await?;
        Ok(blogs)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>> {
        let sql = format!("SELECT {} FROM blogs WHERE id = $1", COLUMNS);
        let blog = query_as::<_, Blog>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(blog)
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Blog>> {
        let sql = format!(
            "SELECT {} FROM blogs WHERE slug = $1 AND published_at IS NOT NULL",
            COLUMNS
        );
        let blog = query_as::<_, Blog>(&sql).bind(slug).fetch_optional(&self.pool).await?;
        Ok(blog)
    }

    /// Published posts other than `exclude_id`, optionally limited to one category.
    pub async fn list_published_except(
        &self,
        exclude_id: Uuid,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Blog>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM blogs
            WHERE published_at IS NOT NULL
              AND id <> $1
              AND ($2::TEXT IS NULL OR category = $2)
            ORDER BY published_at DESC
            LIMIT $3
            "#,
            COLUMNS
        );
        let blogs = query_as::<_, Blog>(&sql)
            .bind(exclude_id)
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(blogs)
    }

    pub async fn insert(&self, blog: &BlogRecord) -> Result<Blog> {
        let sql = format!(
            r#"
            INSERT INTO blogs (title, slug, content, excerpt, cover_image, author, category, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            COLUMNS
        );
        let stored = query_as::<_, Blog>(&sql)
            .bind(&blog.title)
            .bind(&blog.slug)
            .bind(&blog.content)
            .bind(&blog.excerpt)
            .bind(&blog.cover_image)
            .bind(&blog.author)
            .bind(&blog.category)
            .bind(blog.published_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    /// Returns whether a row was updated; callers re-fetch for the stored state.
    pub async fn update(&self, id: Uuid, blog: &BlogRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET title = $1, slug = $2, content = $3, excerpt = $4, cover_image = $5,
                author = $6, category = $7, published_at = $8
            WHERE id = $9
            "#,
        )
        .bind(&blog.title)
        .bind(&blog.slug)
        .bind(&blog.content)
        .bind(&blog.excerpt)
        .bind(&blog.cover_image)
        .bind(&blog.author)
        .bind(&blog.category)
        .bind(blog.published_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Blog>> {
        let sql = format!("DELETE FROM blogs WHERE id = $1 RETURNING {}", COLUMNS);
        let blog = query_as::<_, Blog>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(blog)
    }
}
