use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::error_handling::{AppError, Result},
    models::{
        Blog, BlogForm, BookingInquiry, Car, CarForm, ContactMessage, Location, Outcome,
        UpdateInquiryStatusRequest, UpdateLocationRequest,
    },
    services::{filter_bookings, filter_records, ImageFile, StatusFilter},
    utils::sanitize_for_log,
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

impl SearchQuery {
    fn text(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    fn status_filter(&self) -> Result<StatusFilter> {
        self.status
            .as_deref()
            .unwrap_or("all")
            .parse()
            .map_err(AppError::BadRequest)
    }
}

// ============================================================================
// Inquiries
// ============================================================================

/// GET /api/admin/booking-inquiries?q=&status=
pub async fn list_booking_inquiries(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<BookingInquiry>>> {
    let status = query.status_filter()?;
    let inquiries = state.inquiries.list_booking_inquiries().await?;
    Ok(Json(filter_bookings(&inquiries, query.text(), status)))
}

/// PUT /api/admin/booking-inquiries/:id/status
pub async fn update_booking_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<UpdateInquiryStatusRequest>, JsonRejection>,
) -> Result<Outcome<BookingInquiry>> {
    let Json(request) = payload?;
    Ok(state
        .inquiries
        .update_booking_inquiry_status(id, request.status)
        .await)
}

/// GET /api/admin/contact-messages?q=
pub async fn list_contact_messages(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ContactMessage>>> {
    let messages = state.inquiries.list_contact_messages().await?;
    Ok(Json(filter_records(&messages, query.text(), StatusFilter::All)))
}

// ============================================================================
// Multipart forms
// ============================================================================

/// Text fields and the optional `image` file of an admin form.
#[derive(Debug, Default)]
pub struct FormFields {
    values: HashMap<String, Vec<String>>,
    image: Option<ImageFile>,
}

impl FormFields {
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut fields = FormFields::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Invalid multipart data: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "image" {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read image: {}", e)))?;

                // Browsers send an empty part when no file was chosen.
                if bytes.is_empty() {
                    continue;
                }
                if bytes.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::InvalidInput(format!(
                        "Image too large. Maximum size is {}MB",
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                tracing::debug!(
                    "Received image {} ({} bytes)",
                    sanitize_for_log(&file_name),
                    bytes.len()
                );
                fields.image = Some(ImageFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read field '{}': {}", name, e)))?;
                fields.insert(name, value);
            }
        }

        Ok(fields)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or("").to_string()
    }

    fn parsed<T: FromStr>(&self, name: &str) -> Result<T> {
        let raw = self
            .text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::BadRequest(format!("Field '{}' is required", name)))?;
        raw.parse()
            .map_err(|_| AppError::BadRequest(format!("Field '{}' has an invalid value", name)))
    }

    fn flag(&self, name: &str) -> bool {
        matches!(
            self.text(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("true" | "on" | "1" | "yes")
        )
    }

    /// Repeated parts are taken as they arrive, one entry each. A single part
    /// is read as a textarea: one entry per line.
    fn list(&self, name: &str) -> Vec<String> {
        let values = match self.values.get(name) {
            Some(values) => values,
            None => return Vec::new(),
        };
        let entries: Vec<&str> = match values.as_slice() {
            [single] => single.lines().collect(),
            many => many.iter().map(String::as_str).collect(),
        };
        entries
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn car_form(&self) -> Result<CarForm> {
        Ok(CarForm {
            name: self.text_or_empty("name"),
            brand_id: self.parsed("brand_id")?,
            price_per_day: self.parsed("price_per_day")?,
            transmission: self.parsed("transmission")?,
            fuel_type: self.parsed("fuel_type")?,
            seats: self.parsed("seats")?,
            luggage: self.parsed("luggage")?,
            description: self.text_or_empty("description"),
            features: self.list("features"),
        })
    }

    pub fn blog_form(&self) -> BlogForm {
        BlogForm {
            title: self.text_or_empty("title"),
            content: self.text_or_empty("content"),
            excerpt: self.text_or_empty("excerpt"),
            published: self.flag("published"),
            author: self.text("author").map(str::to_string),
            category: self.text("category").map(str::to_string),
        }
    }

    pub fn take_image(&mut self) -> Option<ImageFile> {
        self.image.take()
    }
}

// ============================================================================
// Cars
// ============================================================================

pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Car>>> {
    let cars = state.content.list_all_cars().await?;
    Ok(Json(filter_records(&cars, query.text(), StatusFilter::All)))
}

pub async fn create_car(State(state): State<AppState>, multipart: Multipart) -> Result<(StatusCode, Json<Car>)> {
    let mut fields = FormFields::read(multipart).await?;
    let form = fields.car_form()?;
    let car = state.content.create_car(form, fields.take_image()).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Car>> {
    let mut fields = FormFields::read(multipart).await?;
    let form = fields.car_form()?;
    Ok(Json(state.content.update_car(id, form, fields.take_image()).await?))
}

pub async fn delete_car(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.content.delete_car(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Blogs
// ============================================================================

/// GET /api/admin/blogs?q=: drafts included
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Blog>>> {
    let blogs = state.content.list_all_blogs().await?;
    Ok(Json(filter_records(&blogs, query.text(), StatusFilter::All)))
}

pub async fn create_blog(State(state): State<AppState>, multipart: Multipart) -> Result<(StatusCode, Json<Blog>)> {
    let mut fields = FormFields::read(multipart).await?;
    let form = fields.blog_form();
    let blog = state.content.create_blog(form, fields.take_image()).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Blog>> {
    let mut fields = FormFields::read(multipart).await?;
    let form = fields.blog_form();
    Ok(Json(state.content.update_blog(id, form, fields.take_image()).await?))
}

pub async fn delete_blog(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.content.delete_blog(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Locations
// ============================================================================

pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<UpdateLocationRequest>, JsonRejection>,
) -> Result<Json<Location>> {
    let Json(request) = payload?;
    Ok(Json(state.content.update_location(id, request).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FuelType, Transmission};

    fn car_fields() -> FormFields {
        let mut fields = FormFields::default();
        fields.insert("name", "Hyundai Creta");
        fields.insert("brand_id", Uuid::nil().to_string());
        fields.insert("price_per_day", "2500");
        fields.insert("transmission", "Automatic");
        fields.insert("fuel_type", "Diesel");
        fields.insert("seats", "5");
        fields.insert("luggage", "3");
        fields.insert("features", "Rear camera, with guidelines");
        fields.insert("features", "USB");
        fields
    }

    #[test]
    fn test_car_form_from_fields() {
        let form = car_fields().car_form().unwrap();
        assert_eq!(form.transmission, Transmission::Automatic);
        assert_eq!(form.fuel_type, FuelType::Diesel);
        assert_eq!(form.price_per_day, 2500);
        assert_eq!(form.features, vec!["Rear camera, with guidelines", "USB"]);
        assert_eq!(form.description, "");
    }

    #[test]
    fn test_single_features_value_is_split_on_lines_only() {
        let mut fields = car_fields();
        fields.values.insert(
            "features".to_string(),
            vec!["AC, dual zone\r\n\nSunroof\n".to_string()],
        );
        let form = fields.car_form().unwrap();
        assert_eq!(form.features, vec!["AC, dual zone", "Sunroof"]);
    }

    #[test]
    fn test_car_form_rejects_bad_enum() {
        let mut fields = car_fields();
        fields.values.insert("fuel_type".to_string(), vec!["CNG".to_string()]);
        let err = fields.car_form().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_car_form_requires_price() {
        let mut fields = car_fields();
        fields.values.remove("price_per_day");
        assert!(fields.car_form().is_err());
    }

    #[test]
    fn test_blog_form_flags_and_options() {
        let mut fields = FormFields::default();
        fields.insert("title", "Monsoon Drives");
        fields.insert("content", "...");
        fields.insert("published", "on");
        let form = fields.blog_form();
        assert!(form.published);
        assert!(form.author.is_none());
        assert_eq!(form.excerpt, "");

        let mut draft = FormFields::default();
        draft.insert("published", "false");
        assert!(!draft.blog_form().published);
    }

    #[test]
    fn test_status_filter_query() {
        let query = SearchQuery { q: None, status: Some("booked".to_string()) };
        assert!(matches!(query.status_filter(), Ok(StatusFilter::Only(_))));
        let bad = SearchQuery { q: None, status: Some("done".to_string()) };
        assert!(bad.status_filter().is_err());
        assert_eq!(SearchQuery::default().status_filter().unwrap(), StatusFilter::All);
    }
}
