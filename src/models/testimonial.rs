use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Read-only reference data shown on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub rating: i32,
    pub message: String,
    pub image: Option<String>,
}
