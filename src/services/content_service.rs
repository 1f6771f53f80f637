use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use super::upload_service::{resolve_image_url, ImageFile, ImageUploader};
use crate::middleware::error_handling::{AppError, Result};
use crate::models::{
    locations_or_default, default_locations, Blog, BlogForm, BlogRecord, Brand, Car, CarForm,
    CarRecord, CarView, Location, Testimonial, UpdateLocationRequest,
};
use crate::repositories::{
    BlogRepository, BrandRepository, CarRepository, LocationRepository, TestimonialRepository,
};
use crate::utils::{sanitize_for_log, sanitize_option_for_log};

pub const DEFAULT_RELATED_BLOGS: i64 = 2;

/// Cars, brands, blogs, locations and testimonials.
///
/// Public reads never fail: a backend error is logged and replaced by an
/// empty list (or the default locations). Admin operations propagate errors.
pub struct ContentService {
    cars: CarRepository,
    brands: BrandRepository,
    blogs: BlogRepository,
    locations: LocationRepository,
    testimonials: TestimonialRepository,
    car_images: ImageUploader,
    blog_images: ImageUploader,
}

fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!("❌ Failed to load {}: {:?}", what, e);
        Vec::new()
    })
}

fn or_none<T>(result: Result<Option<T>>, what: &str) -> Option<T> {
    result.unwrap_or_else(|e| {
        tracing::error!("❌ Failed to load {}: {:?}", what, e);
        None
    })
}

/// The stored row when the read-back worked, otherwise the record that was
/// just written laid over the previous row.
fn reread_or_merged(reread: Result<Option<Blog>>, record: &BlogRecord, existing: &Blog) -> Blog {
    match reread {
        Ok(Some(blog)) => blog,
        Ok(None) => record.merged_into(existing),
        Err(e) => {
            tracing::warn!("⚠️ Blog {} saved but could not be re-read: {:?}", existing.id, e);
            record.merged_into(existing)
        }
    }
}

impl ContentService {
    pub fn new(pool: PgPool, car_images: ImageUploader, blog_images: ImageUploader) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            brands: BrandRepository::new(pool.clone()),
            blogs: BlogRepository::new(pool.clone()),
            locations: LocationRepository::new(pool.clone()),
            testimonials: TestimonialRepository::new(pool),
            car_images,
            blog_images,
        }
    }

    // ------------------------------------------------------------------
    // Public reads
    // ------------------------------------------------------------------

    async fn brand_names(&self) -> HashMap<Uuid, String> {
        or_empty(self.brands.list().await, "brands")
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect()
    }

    pub async fn list_cars(&self) -> Vec<CarView> {
        let cars = or_empty(self.cars.list().await, "cars");
        if cars.is_empty() {
            return Vec::new();
        }
        let brands = self.brand_names().await;
        cars.into_iter()
            .map(|car| {
                let brand = brands.get(&car.brand_id).map(String::as_str);
                CarView::new(car, brand)
            })
            .collect()
    }

    pub async fn get_car(&self, slug: &str) -> Option<CarView> {
        let car = or_none(self.cars.find_by_slug(slug).await, "car")?;
        let brands = self.brand_names().await;
        let brand = brands.get(&car.brand_id).cloned();
        Some(CarView::new(car, brand.as_deref()))
    }

    pub async fn list_brands(&self) -> Vec<Brand> {
        or_empty(self.brands.list().await, "brands")
    }

    pub async fn list_published_blogs(&self) -> Vec<Blog> {
        or_empty(self.blogs.list_published().await, "blogs")
    }

    pub async fn get_published_blog(&self, slug: &str) -> Option<Blog> {
        or_none(self.blogs.find_published_by_slug(slug).await, "blog")
    }

    /// Same-category posts first; when there are none, the latest other posts.
    /// `None` only when `slug` is not a published post.
    pub async fn related_blogs(&self, slug: &str, count: i64) -> Option<Vec<Blog>> {
        let blog = self.get_published_blog(slug).await?;
        let count = count.clamp(1, 20);

        let same_category = or_empty(
            self.blogs
                .list_published_except(blog.id, Some(blog.category.as_str()), count)
                .await,
            "related blogs",
        );
        if !same_category.is_empty() {
            return Some(same_category);
        }

        Some(or_empty(
            self.blogs.list_published_except(blog.id, None, count).await,
            "recent blogs",
        ))
    }

    pub async fn list_locations(&self) -> Vec<Location> {
        locations_or_default(or_empty(self.locations.list().await, "locations"))
    }

    pub async fn get_location(&self, slug: &str) -> Option<Location> {
        if let Some(location) = or_none(self.locations.find_by_slug(slug).await, "location") {
            return Some(location);
        }
        default_locations().into_iter().find(|l| l.slug == slug)
    }

    pub async fn list_testimonials(&self) -> Vec<Testimonial> {
        or_empty(self.testimonials.list().await, "testimonials")
    }

    // ------------------------------------------------------------------
    // Admin: cars
    // ------------------------------------------------------------------

    pub async fn list_all_cars(&self) -> Result<Vec<Car>> {
        self.cars.list().await
    }

    pub async fn create_car(&self, form: CarForm, image: Option<ImageFile>) -> Result<Car> {
        form.validate()?;
        let main_image = resolve_image_url(&self.car_images, image, None).await?;
        let car = match self.cars.insert(&CarRecord::from_form(&form, main_image.clone())).await {
            Ok(car) => car,
            Err(e) => {
                self.car_images.remove_by_url(&main_image).await;
                return Err(e);
            }
        };
        tracing::info!("🚗 Created car {} ({})", car.id, sanitize_for_log(&car.slug));
        Ok(car)
    }

    pub async fn update_car(&self, id: Uuid, form: CarForm, image: Option<ImageFile>) -> Result<Car> {
        form.validate()?;
        let existing = self
            .cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let main_image = resolve_image_url(&self.car_images, image, Some(&existing.main_image)).await?;
        let updated = self
            .cars
            .update(id, &CarRecord::from_form(&form, main_image.clone()))
            .await
            .and_then(|car| car.ok_or_else(|| AppError::NotFound("Car not found".to_string())));
        let car = match updated {
            Ok(car) => car,
            Err(e) => {
                if main_image != existing.main_image {
                    self.car_images.remove_by_url(&main_image).await;
                }
                return Err(e);
            }
        };

        if car.main_image != existing.main_image {
            self.car_images.remove_by_url(&existing.main_image).await;
        }
        tracing::info!("🚗 Updated car {}", car.id);
        Ok(car)
    }

    pub async fn delete_car(&self, id: Uuid) -> Result<()> {
        let car = self
            .cars
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
        self.car_images.remove_by_url(&car.main_image).await;
        tracing::info!("🗑️ Deleted car {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin: blogs
    // ------------------------------------------------------------------

    pub async fn list_all_blogs(&self) -> Result<Vec<Blog>> {
        self.blogs.list_all().await
    }

    pub async fn create_blog(&self, form: BlogForm, image: Option<ImageFile>) -> Result<Blog> {
        form.validate()?;
        let cover_image = resolve_image_url(&self.blog_images, image, None).await?;
        let record = BlogRecord::from_form(&form, cover_image, None, Utc::now());
        let blog = match self.blogs.insert(&record).await {
            Ok(blog) => blog,
            Err(e) => {
                self.blog_images.remove_by_url(&record.cover_image).await;
                return Err(e);
            }
        };
        tracing::info!(
            "📝 Created blog {} ({}) by {}",
            blog.id,
            sanitize_for_log(&blog.slug),
            sanitize_option_for_log(&form.author)
        );
        Ok(blog)
    }

    /// Writes the update, then reads the row back. The read-back is best
    /// effort: if it fails the locally merged record is returned.
    pub async fn update_blog(&self, id: Uuid, form: BlogForm, image: Option<ImageFile>) -> Result<Blog> {
        form.validate()?;
        let existing = self
            .blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

        let cover_image = resolve_image_url(&self.blog_images, image, Some(&existing.cover_image)).await?;
        let record = BlogRecord::from_form(&form, cover_image, Some(&existing), Utc::now());

        let image_changed = record.cover_image != existing.cover_image;
        let saved = self
            .blogs
            .update(id, &record)
            .await
            .and_then(|found| {
                if found {
                    Ok(())
                } else {
                    Err(AppError::NotFound("Blog not found".to_string()))
                }
            });
        if let Err(e) = saved {
            if image_changed {
                self.blog_images.remove_by_url(&record.cover_image).await;
            }
            return Err(e);
        }
        if image_changed {
            self.blog_images.remove_by_url(&existing.cover_image).await;
        }

        Ok(reread_or_merged(self.blogs.find_by_id(id).await, &record, &existing))
    }

    pub async fn delete_blog(&self, id: Uuid) -> Result<()> {
        let blog = self
            .blogs
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;
        self.blog_images.remove_by_url(&blog.cover_image).await;
        tracing::info!("🗑️ Deleted blog {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin: locations
    // ------------------------------------------------------------------

    pub async fn update_location(&self, id: Uuid, request: UpdateLocationRequest) -> Result<Location> {
        request.validate()?;
        let location = self
            .locations
            .update(id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;
        tracing::info!("📍 Updated location {} ({})", id, sanitize_for_log(&location.slug));
        Ok(location)
    }
}
