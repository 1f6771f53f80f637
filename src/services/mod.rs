pub mod content_service;
pub mod inquiry_service;
pub mod moderation;
pub mod storage_client;
pub mod upload_service;

pub use content_service::ContentService;
pub use inquiry_service::InquiryService;
pub use moderation::{
    apply_status_change, filter_bookings, filter_records, ModerationBoard, NotificationQueue,
    ReconcilePolicy, RecordSource, StatusFilter,
};
pub use storage_client::{ObjectStorage, StorageError, SupabaseStorage};
pub use upload_service::{resolve_image_url, ImageFile, ImageUploader, UploadError};
