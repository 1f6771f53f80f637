use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    app::AppState,
    middleware::error_handling::{AppError, Result},
    models::{
        Blog, Brand, CarView, CreateBookingInquiryRequest, CreateContactMessageRequest, Location,
        Testimonial,
    },
    services::content_service::DEFAULT_RELATED_BLOGS,
};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/cars
pub async fn list_cars(State(state): State<AppState>) -> Json<Vec<CarView>> {
    Json(state.content.list_cars().await)
}

/// GET /api/cars/:slug
pub async fn get_car(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<CarView>> {
    state
        .content
        .get_car(&slug)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
}

pub async fn list_brands(State(state): State<AppState>) -> Json<Vec<Brand>> {
    Json(state.content.list_brands().await)
}

/// GET /api/blogs: published posts only
pub async fn list_blogs(State(state): State<AppState>) -> Json<Vec<Blog>> {
    Json(state.content.list_published_blogs().await)
}

pub async fn get_blog(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Blog>> {
    state
        .content
        .get_published_blog(&slug)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub count: Option<i64>,
}

/// GET /api/blogs/:slug/related?count=N
pub async fn related_blogs(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RelatedQuery>,
) -> Result<Json<Vec<Blog>>> {
    state
        .content
        .related_blogs(&slug, query.count.unwrap_or(DEFAULT_RELATED_BLOGS))
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))
}

/// GET /api/locations: never empty; falls back to the built-in list
pub async fn list_locations(State(state): State<AppState>) -> Json<Vec<Location>> {
    Json(state.content.list_locations().await)
}

pub async fn get_location(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Location>> {
    state
        .content
        .get_location(&slug)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Location not found".to_string()))
}

pub async fn list_testimonials(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(state.content.list_testimonials().await)
}

/// POST /api/booking-inquiries
pub async fn create_booking_inquiry(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateBookingInquiryRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    Ok(state.inquiries.submit_booking_inquiry(request).await.created())
}

/// POST /api/contact
pub async fn create_contact_message(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateContactMessageRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    Ok(state.inquiries.submit_contact_form(request).await.created())
}
