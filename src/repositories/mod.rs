pub mod blog_repo;
pub mod booking_inquiry_repo;
pub mod brand_repo;
pub mod car_repo;
pub mod contact_message_repo;
pub mod location_repo;
pub mod testimonial_repo;

pub use blog_repo::*;
pub use booking_inquiry_repo::*;
pub use brand_repo::*;
pub use car_repo::*;
pub use contact_message_repo::*;
pub use location_repo::*;
pub use testimonial_repo::*;

use async_trait::async_trait;
use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{
    BookingInquiry, ContactMessage, InquiryStatus, NewBookingInquiry, NewContactMessage,
};

/// Persistence seam for booking inquiries, so the workflow can run against
/// an in-memory store in tests.
#[async_trait]
pub trait BookingInquiryStore: Send + Sync {
    /// Inserts with status `pending` and a server-side timestamp.
    async fn insert(&self, inquiry: &NewBookingInquiry) -> Result<BookingInquiry>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<BookingInquiry>>;

    /// `None` when no row has this id.
    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> Result<Option<BookingInquiry>>;
}

#[async_trait]
pub trait ContactMessageStore: Send + Sync {
    async fn insert(&self, message: &NewContactMessage) -> Result<ContactMessage>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>>;
}
