use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, StorageConfig};
use crate::handlers::{admin, public};
use crate::middleware::{admin_middleware, request_id_middleware};
use crate::repositories::{
    BookingInquiryRepository, BookingInquiryStore, ContactMessageRepository, ContactMessageStore,
};
use crate::services::{
    ContentService, ImageUploader, InquiryService, ObjectStorage, SupabaseStorage,
};

#[derive(Clone)]
pub struct AppState {
    pub inquiries: InquiryService,
    pub content: Arc<ContentService>,
    pub admin_token: Arc<str>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn ObjectStorage> = Arc::new(SupabaseStorage::new(&config.storage)?);
        Ok(Self::with_stores(
            config.database_pool.clone(),
            Arc::new(BookingInquiryRepository::new(config.database_pool.clone())),
            Arc::new(ContactMessageRepository::new(config.database_pool.clone())),
            storage,
            &config.storage,
            &config.admin_token,
        ))
    }

    /// State over explicit inquiry stores and object storage; content reads
    /// still go through `pool`.
    pub fn with_stores(
        pool: PgPool,
        bookings: Arc<dyn BookingInquiryStore>,
        messages: Arc<dyn ContactMessageStore>,
        storage: Arc<dyn ObjectStorage>,
        storage_config: &StorageConfig,
        admin_token: &str,
    ) -> Self {
        let car_images = ImageUploader::new(storage.clone(), storage_config.car_bucket.clone(), "car");
        let blog_images = ImageUploader::new(storage, storage_config.blog_bucket.clone(), "blog");

        Self {
            inquiries: InquiryService::new(bookings, messages),
            content: Arc::new(ContentService::new(pool, car_images, blog_images)),
            admin_token: Arc::from(admin_token),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("❌ Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    tracing::info!("✅ CORS configured with {} allowed origins", allowed.len());

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

pub fn create_app(state: AppState, cors_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/cars", get(public::list_cars))
        .route("/cars/:slug", get(public::get_car))
        .route("/brands", get(public::list_brands))
        .route("/blogs", get(public::list_blogs))
        .route("/blogs/:slug", get(public::get_blog))
        .route("/blogs/:slug/related", get(public::related_blogs))
        .route("/locations", get(public::list_locations))
        .route("/locations/:slug", get(public::get_location))
        .route("/testimonials", get(public::list_testimonials))
        .route("/booking-inquiries", post(public::create_booking_inquiry))
        .route("/contact", post(public::create_contact_message));

    let admin_routes = Router::new()
        .route("/booking-inquiries", get(admin::list_booking_inquiries))
        .route("/booking-inquiries/:id/status", put(admin::update_booking_inquiry_status))
        .route("/contact-messages", get(admin::list_contact_messages))
        .route("/cars", get(admin::list_cars).post(admin::create_car))
        .route("/cars/:id", put(admin::update_car).delete(admin::delete_car))
        .route("/blogs", get(admin::list_blogs).post(admin::create_blog))
        .route("/blogs/:id", put(admin::update_blog).delete(admin::delete_blog))
        .route("/locations/:id", put(admin::update_location))
        .layer(DefaultBodyLimit::max(admin::MAX_IMAGE_SIZE + 1024 * 1024))
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware));

    Router::new()
        .route("/health", get(public::health_check))
        .nest("/api", public_routes.nest("/admin", admin_routes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
