use async_trait::async_trait;
use sqlx::{postgres::PgRow, query, PgPool, Row};
use uuid::Uuid;

use super::BookingInquiryStore;
use crate::middleware::error_handling::{AppError, Result};
use crate::models::{BookingInquiry, InquiryStatus, NewBookingInquiry};

const COLUMNS: &str = "id, name, phone, pickup_location, drop_location, pickup_date, pickup_time, \
                       drop_date, drop_time, status, created_at";

pub struct BookingInquiryRepository {
    pool: PgPool,
}

impl BookingInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<BookingInquiry> {
        let status: String = row.try_get("status")?;
        Ok(BookingInquiry {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            pickup_location: row.try_get("pickup_location")?,
            drop_location: row.try_get("drop_location")?,
            pickup_date: row.try_get("pickup_date")?,
            pickup_time: row.try_get("pickup_time")?,
            drop_date: row.try_get("drop_date")?,
            drop_time: row.try_get("drop_time")?,
            status: status.parse().map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl BookingInquiryStore for BookingInquiryRepository {
    async fn insert(&self, inquiry: &NewBookingInquiry) -> Result<BookingInquiry> {
        let sql = format!(
            r#"
            INSERT INTO booking_inquiries
                (name, phone, pickup_location, drop_location, pickup_date, pickup_time, drop_date, drop_time, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COLUMNS
        );
        let row = query(&sql)
            .bind(&inquiry.name)
            .bind(&inquiry.phone)
            .bind(&inquiry.pickup_location)
            .bind(&inquiry.drop_location)
            .bind(inquiry.pickup_date)
            .bind(&inquiry.pickup_time)
            .bind(inquiry.drop_date)
            .bind(&inquiry.drop_time)
            .bind(InquiryStatus::Pending.as_str())
            .fetch_one(&self.pool)
            .await?;

        Self::map_row(&row)
    }

    async fn list(&self) -> Result<Vec<BookingInquiry>> {
        let sql = format!("SELECT {} FROM booking_inquiries ORDER BY created_at DESC", COLUMNS);
        let rows = query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> Result<Option<BookingInquiry>> {
        let sql = format!(
            "UPDATE booking_inquiries SET status = $1 WHERE id = $2 RETURNING {}",
            COLUMNS
        );
        let row = query(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }
}
