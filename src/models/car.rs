use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::booking_inquiry::sluggable;
use crate::utils::slugify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }
}

impl FromStr for Transmission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manual" => Ok(Transmission::Manual),
            "Automatic" => Ok(Transmission::Automatic),
            other => Err(format!("Unknown transmission '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
        }
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Petrol" => Ok(FuelType::Petrol),
            "Diesel" => Ok(FuelType::Diesel),
            "Electric" => Ok(FuelType::Electric),
            "Hybrid" => Ok(FuelType::Hybrid),
            other => Err(format!("Unknown fuel type '{}'", other)),
        }
    }
}

/// Display category, computed from seat count and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarCategory {
    Hatchback,
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Premium,
}

impl CarCategory {
    pub fn from_seats(seats: i32) -> Self {
        match seats {
            i32::MIN..=4 => CarCategory::Hatchback,
            5 => CarCategory::Sedan,
            6..=7 => CarCategory::Suv,
            _ => CarCategory::Premium,
        }
    }
}

impl fmt::Display for CarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CarCategory::Hatchback => "Hatchback",
            CarCategory::Sedan => "Sedan",
            CarCategory::Suv => "SUV",
            CarCategory::Premium => "Premium",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub brand_id: Uuid,
    pub price_per_day: i32,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: i32,
    pub luggage: i32,
    pub description: String,
    pub features: Vec<String>,
    pub main_image: String,
    pub created_at: DateTime<Utc>,
}

impl Car {
    pub fn category(&self) -> CarCategory {
        CarCategory::from_seats(self.seats)
    }
}

pub const UNKNOWN_BRAND: &str = "Unknown";

/// Car as shown publicly: brand resolved to a name and category derived.
#[derive(Debug, Clone, Serialize)]
pub struct CarView {
    #[serde(flatten)]
    pub car: Car,
    pub brand_name: String,
    pub category: CarCategory,
}

impl CarView {
    pub fn new(car: Car, brand_name: Option<&str>) -> Self {
        let category = car.category();
        Self {
            car,
            brand_name: brand_name.unwrap_or(UNKNOWN_BRAND).to_string(),
            category,
        }
    }
}

/// Admin car form, already pulled out of the multipart body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CarForm {
    #[validate(custom(function = sluggable), length(max = 200))]
    pub name: String,
    pub brand_id: Uuid,
    #[validate(range(min = 1, message = "Price per day must be positive"))]
    pub price_per_day: i32,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    #[validate(range(min = 1, max = 60, message = "Seats must be between 1 and 60"))]
    pub seats: i32,
    #[validate(range(min = 0, max = 60, message = "Luggage must be between 0 and 60"))]
    pub luggage: i32,
    #[validate(length(max = 10000))]
    pub description: String,
    pub features: Vec<String>,
}

impl CarForm {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Trimmed, non-empty features in their submitted order.
    pub fn clean_features(&self) -> Vec<String> {
        self.features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Row written by insert/update; slug and image are resolved by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct CarRecord {
    pub name: String,
    pub slug: String,
    pub brand_id: Uuid,
    pub price_per_day: i32,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: i32,
    pub luggage: i32,
    pub description: String,
    pub features: Vec<String>,
    pub main_image: String,
}

impl CarRecord {
    pub fn from_form(form: &CarForm, main_image: String) -> Self {
        Self {
            name: form.name.trim().to_string(),
            slug: form.slug(),
            brand_id: form.brand_id,
            price_per_day: form.price_per_day,
            transmission: form.transmission,
            fuel_type: form.fuel_type,
            seats: form.seats,
            luggage: form.luggage,
            description: form.description.trim().to_string(),
            features: form.clean_features(),
            main_image,
        }
    }
}
