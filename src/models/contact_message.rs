use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use std::borrow::Cow;
use validator::{Validate, ValidateEmail, ValidationError};

use super::booking_inquiry::not_blank;

/// Immutable once stored; admins only read these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Email is checked after trimming, matching what gets stored.
pub fn trimmed_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.validate_email() {
        Ok(())
    } else {
        let mut error = ValidationError::new("email");
        error.message = Some(Cow::Borrowed("Invalid email address"));
        Err(error)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateContactMessageRequest {
    #[validate(custom(function = not_blank), length(max = 200))]
    pub name: String,
    #[validate(custom(function = trimmed_email))]
    pub email: String,
    #[validate(custom(function = not_blank), length(max = 40))]
    pub phone: String,
    #[validate(custom(function = not_blank), length(max = 5000, message = "Message too long"))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl From<&CreateContactMessageRequest> for NewContactMessage {
    fn from(request: &CreateContactMessageRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            message: request.message.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateContactMessageRequest {
        CreateContactMessageRequest {
            name: "Anita".to_string(),
            email: "anita@example.com".to_string(),
            phone: "8888888888".to_string(),
            message: "Do you deliver to Palolem?".to_string(),
        }
    }

    #[test]
    fn test_valid_message_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_email_format_enforced() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_email_is_trimmed_before_checking() {
        let mut req = request();
        req.email = "  anita@example.com \n".to_string();
        assert!(req.validate().is_ok());
        assert_eq!(NewContactMessage::from(&req).email, "anita@example.com");

        req.email = "   ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_absent_email_fails_validation() {
        let req: CreateContactMessageRequest =
            serde_json::from_str(r#"{"name":"Anita","phone":"1","message":"Hi"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_missing_message_fails() {
        let mut req = request();
        req.message = "\n".to_string();
        assert!(req.validate().is_err());
    }
}
