use sqlx::{postgres::PgRow, query, PgPool, Row};
use uuid::Uuid;

use crate::middleware::error_handling::{AppError, Result};
use crate::models::{Car, CarRecord};

const COLUMNS: &str = "id, name, slug, brand_id, price_per_day, transmission, fuel_type, seats, \
                       luggage, description, features, main_image, created_at";

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<Car> {
        let transmission: String = row.try_get("transmission")?;
        let fuel_type: String = row.try_get("fuel_type")?;
        Ok(Car {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            brand_id: row.try_get("brand_id")?,
            price_per_day: row.try_get("price_per_day")?,
            transmission: transmission.parse().map_err(corrupt)?,
            fuel_type: fuel_type.parse().map_err(corrupt)?,
            seats: row.try_get("seats")?,
            luggage: row.try_get("luggage")?,
            description: row.try_get("description")?,
            features: row.try_get("features")?,
            main_image: row.try_get("main_image")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<Car>> {
        let sql = format!("SELECT {} FROM cars ORDER BY created_at DESC", COLUMNS);
        let rows = query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(Self::map_row).collect()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Car>> {
        let sql = format!("SELECT {} FROM cars WHERE slug = $1", COLUMNS);
        let row = query(&sql).bind(slug).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>> {
        let sql = format!("SELECT {} FROM cars WHERE id = $1", COLUMNS);
        let row = query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn insert(&self, car: &CarRecord) -> Result<Car> {
        let sql = format!(
            r#"
            INSERT INTO cars
                (name, slug, brand_id, price_per_day, transmission, fuel_type, seats, luggage, description, features, main_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            COLUMNS
        );
        let row = query(&sql)
            .bind(&car.name)
            .bind(&car.slug)
            .bind(car.brand_id)
            .bind(car.price_per_day)
            .bind(car.transmission.as_str())
            .bind(car.fuel_type.as_str())
            .bind(car.seats)
            .bind(car.luggage)
            .bind(&car.description)
            .bind(&car.features)
            .bind(&car.main_image)
            .fetch_one(&self.pool)
            .await?;

        Self::map_row(&row)
    }

    pub async fn update(&self, id: Uuid, car: &CarRecord) -> Result<Option<Car>> {
        let sql = format!(
            r#"
            UPDATE cars
            SET name = $1, slug = $2, brand_id = $3, price_per_day = $4, transmission = $5,
                fuel_type = $6, seats = $7, luggage = $8, description = $9, features = $10,
                main_image = $11
            WHERE id = $12
            RETURNING {}
            "#,
            COLUMNS
        );
        let row = query(&sql)
            .bind(&car.name)
            .bind(&car.slug)
            .bind(car.brand_id)
            .bind(car.price_per_day)
            .bind(car.transmission.as_str())
            .bind(car.fuel_type.as_str())
            .bind(car.seats)
            .bind(car.luggage)
            .bind(&car.description)
            .bind(&car.features)
            .bind(&car.main_image)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Returns the deleted row so its image can be cleaned up.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Car>> {
        let sql = format!("DELETE FROM cars WHERE id = $1 RETURNING {}", COLUMNS);
        let row = query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::map_row).transpose()
    }
}

fn corrupt(message: String) -> AppError {
    AppError::Internal(anyhow::anyhow!("Corrupt car row: {}", message))
}
