use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::booking_inquiry::sluggable;
use crate::utils::slugify;

pub const DEFAULT_AUTHOR: &str = "Admin";
pub const DEFAULT_CATEGORY: &str = "Travel";

/// `published_at` doubles as the publish flag: `None` is a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub cover_image: String,
    pub author: String,
    pub category: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Blog {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BlogForm {
    #[validate(custom(function = sluggable), length(max = 300))]
    pub title: String,
    pub content: String,
    #[validate(length(max = 1000, message = "Excerpt too long"))]
    pub excerpt: String,
    pub published: bool,
    pub author: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogRecord {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub cover_image: String,
    pub author: String,
    pub category: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl BlogRecord {
    /// Builds the row to write. The slug always follows the current title;
    /// an already-published post keeps its original publish date.
    pub fn from_form(
        form: &BlogForm,
        cover_image: String,
        existing: Option<&Blog>,
        now: DateTime<Utc>,
    ) -> Self {
        let published_at = if form.published {
            existing.and_then(|b| b.published_at).or(Some(now))
        } else {
            None
        };

        let author = non_empty(form.author.as_deref())
            .or_else(|| existing.and_then(|b| non_empty(Some(&b.author))))
            .unwrap_or(DEFAULT_AUTHOR)
            .to_string();
        let category = non_empty(form.category.as_deref())
            .or_else(|| existing.and_then(|b| non_empty(Some(&b.category))))
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        Self {
            title: form.title.trim().to_string(),
            slug: slugify(form.title.trim()),
            content: form.content.clone(),
            excerpt: form.excerpt.trim().to_string(),
            cover_image,
            author,
            category,
            published_at,
        }
    }

    /// Local merge used when the post-update re-fetch fails.
    pub fn merged_into(&self, existing: &Blog) -> Blog {
        Blog {
            id: existing.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone(),
            cover_image: self.cover_image.clone(),
            author: self.author.clone(),
            category: self.category.clone(),
            published_at: self.published_at,
            created_at: existing.created_at,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
