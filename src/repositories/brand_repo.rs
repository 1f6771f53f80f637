use sqlx::{query_as, PgPool};

use crate::middleware::error_handling::Result;
use crate::models::Brand;

pub struct BrandRepository {
    pool: PgPool,
}

impl BrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Brand>> {
        let brands = query_as::<_, Brand>("SELECT id, name, logo FROM brands ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(brands)
    }
}
