use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::moderation::RecordSource;
use crate::middleware::error_handling::{AppError, Result};
use crate::models::{
    BookingInquiry, ContactMessage, CreateBookingInquiryRequest, CreateContactMessageRequest,
    InquiryStatus, NewBookingInquiry, NewContactMessage, Outcome,
};
use crate::repositories::{BookingInquiryStore, ContactMessageStore};
use crate::utils::{mask_phone, sanitize_for_log};

/// Booking inquiry and contact message workflow.
///
/// The submit/update operations never return `Err`: validation problems and
/// backend failures come back as `Outcome::Failure`, already logged.
#[derive(Clone)]
pub struct InquiryService {
    bookings: Arc<dyn BookingInquiryStore>,
    messages: Arc<dyn ContactMessageStore>,
}

impl InquiryService {
    pub fn new(bookings: Arc<dyn BookingInquiryStore>, messages: Arc<dyn ContactMessageStore>) -> Self {
        Self { bookings, messages }
    }

    pub async fn submit_booking_inquiry(
        &self,
        request: CreateBookingInquiryRequest,
    ) -> Outcome<BookingInquiry> {
        Outcome::from_result(self.insert_booking(&request).await, "submit booking inquiry")
    }

    async fn insert_booking(&self, request: &CreateBookingInquiryRequest) -> Result<BookingInquiry> {
        request.validate()?;
        let inquiry = NewBookingInquiry::from_validated(request)
            .ok_or_else(|| AppError::BadRequest("Dates must be in YYYY-MM-DD format".to_string()))?;

        let stored = self.bookings.insert(&inquiry).await?;
        tracing::info!(
            "📨 Booking inquiry {} from {} ({}), {} → {}",
            stored.id,
            sanitize_for_log(&stored.name),
            mask_phone(&stored.phone),
            sanitize_for_log(&stored.pickup_location),
            sanitize_for_log(&stored.drop_location)
        );
        Ok(stored)
    }

    /// Any status may follow any other; the row is matched by id only.
    pub async fn update_booking_inquiry_status(
        &self,
        id: Uuid,
        status: InquiryStatus,
    ) -> Outcome<BookingInquiry> {
        Outcome::from_result(self.set_status(id, status).await, "update booking inquiry status")
    }

    async fn set_status(&self, id: Uuid, status: InquiryStatus) -> Result<BookingInquiry> {
        let updated = self
            .bookings
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking inquiry not found".to_string()))?;
        tracing::info!("🔄 Booking inquiry {} is now {}", id, status);
        Ok(updated)
    }

    pub async fn submit_contact_form(
        &self,
        request: CreateContactMessageRequest,
    ) -> Outcome<ContactMessage> {
        Outcome::from_result(self.insert_message(&request).await, "submit contact form")
    }

    async fn insert_message(&self, request: &CreateContactMessageRequest) -> Result<ContactMessage> {
        request.validate()?;
        let stored = self.messages.insert(&NewContactMessage::from(request)).await?;
        tracing::info!(
            "✉️ Contact message {} from {}",
            stored.id,
            sanitize_for_log(&stored.name)
        );
        Ok(stored)
    }

    pub async fn list_booking_inquiries(&self) -> Result<Vec<BookingInquiry>> {
        self.bookings.list().await
    }

    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        self.messages.list().await
    }
}

#[async_trait]
impl RecordSource<BookingInquiry> for InquiryService {
    async fn fetch_all(&self) -> Result<Vec<BookingInquiry>> {
        self.list_booking_inquiries().await
    }
}

#[async_trait]
impl RecordSource<ContactMessage> for InquiryService {
    async fn fetch_all(&self) -> Result<Vec<ContactMessage>> {
        self.list_contact_messages().await
    }
}
