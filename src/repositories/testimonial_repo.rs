use sqlx::{query_as, PgPool};

use crate::middleware::error_handling::Result;
use crate::models::Testimonial;

pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Testimonial>> {
        let testimonials = query_as::<_, Testimonial>(
            "SELECT id, name, city, rating, message, image FROM testimonials ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(testimonials)
    }
}
