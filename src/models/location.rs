use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::booking_inquiry::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub headline: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(custom(function = not_blank), length(max = 200))]
    pub name: String,
    #[validate(custom(function = not_blank), length(max = 200))]
    pub slug: String,
    #[validate(custom(function = not_blank), length(max = 300))]
    pub headline: String,
    #[validate(custom(function = not_blank))]
    pub content: String,
}

// (name, slug, headline, content)
const DEFAULT_LOCATIONS: &[(&str, &str, &str, &str)] = &[
    // North Goa
    ("Calangute", "calangute", "Premium Car Rental Service in Calangute, Goa",
     "Find the best car rental deals in Calangute, Goa. We offer a wide range of vehicles from economy to luxury cars."),
    ("Anjuna", "anjuna", "Premium Car Rental Service in Anjuna, North Goa",
     "Looking for a reliable car rental in Anjuna, Goa? We offer a wide range of vehicles to suit your needs."),
    ("Baga", "baga", "Affordable Car Rental Service in Baga Beach, Goa",
     "Explore the vibrant Baga Beach area with a reliable car rental. Best rates guaranteed!"),
    ("Candolim", "candolim", "Luxury Car Rental Service in Candolim, North Goa",
     "Experience the beautiful beaches of Candolim with a premium car rental. Wide selection of vehicles available."),
    ("Panjim", "panjim", "Reliable Car Rental Service in Panjim, Goa's Capital",
     "Explore Goa's charming capital city with a car rental in Panjim."),
    ("Vagator", "vagator", "Self-Drive Car Rental in Vagator Beach, North Goa",
     "Rent a car in Vagator and explore the beautiful beaches and nightlife at your own pace."),
    ("Morjim", "morjim", "Car Rental Services in Morjim Beach, North Goa",
     "Visit the turtle nesting beach of Morjim with a comfortable car rental. Best rates guaranteed!"),
    ("Arambol", "arambol", "Budget Car Rental in Arambol Beach, North Goa",
     "Explore the hippie paradise of Arambol with an affordable car rental. Book now!"),
    // South Goa
    ("Colva", "colva", "Premium Car Rental Service in Colva Beach, South Goa",
     "Discover the serene beaches of Colva with a reliable car rental. Wide range of vehicles available."),
    ("Palolem", "palolem", "Car Rental Services in Palolem Beach, South Goa",
     "Explore the picturesque Palolem Beach with a comfortable car rental. Best rates guaranteed!"),
    ("Benaulim", "benaulim", "Self-Drive Car Rental in Benaulim, South Goa",
     "Rent a car in Benaulim and explore the beautiful beaches at your own pace."),
    ("Varca", "varca", "Luxury Car Rental in Varca Beach, South Goa",
     "Experience the pristine beaches of Varca with a premium car rental. Wide selection available."),
    ("Margao", "margao", "Affordable Car Rental Service in Margao, South Goa",
     "Explore the commercial hub of South Goa with a reliable car rental. Best rates guaranteed!"),
    ("Agonda", "agonda", "Car Rental Services in Agonda Beach, South Goa",
     "Visit the secluded Agonda Beach with a comfortable car rental. Explore at your own pace!"),
    // Airports and stations
    ("Goa Airport", "goa-airport", "Convenient Car Rental Service at Dabolim Airport (GOI)",
     "Start your Goa adventure right from the airport with a rental at Goa Airport (Dabolim)."),
    ("Mopa Airport", "mopa-airport", "Car Rental at Manohar International Airport, North Goa",
     "Rent a car directly from the new Mopa Airport. Seamless pickup and drop-off service available."),
    ("Madgaon Railway Station", "madgaon-railway", "Car Rental Service at Madgaon Railway Station, Goa",
     "Arriving by train? Pick up your rental car directly from Madgaon Railway Station."),
    ("Thivim Railway Station", "thivim-railway", "Car Rental at Thivim Railway Station, North Goa",
     "Convenient car rental service at Thivim Railway Station. Book in advance for best rates!"),
];

/// Hard-coded locations served when the table is empty or unreadable.
/// Ids are fixed so links stay stable between requests.
pub fn default_locations() -> Vec<Location> {
    let now = Utc::now();
    DEFAULT_LOCATIONS
        .iter()
        .enumerate()
        .map(|(i, (name, slug, headline, content))| Location {
            id: Uuid::from_u128(i as u128 + 1),
            name: name.to_string(),
            slug: slug.to_string(),
            headline: headline.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Store rows if there are any, otherwise the defaults; sorted by name.
pub fn locations_or_default(stored: Vec<Location>) -> Vec<Location> {
    let mut locations = if stored.is_empty() {
        default_locations()
    } else {
        stored
    };
    locations.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    locations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_has_every_location() {
        let defaults = default_locations();
        assert_eq!(defaults.len(), 18);
        let mut slugs: Vec<_> = defaults.iter().map(|l| l.slug.clone()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 18);
    }

    #[test]
    fn test_empty_store_falls_back_sorted() {
        let locations = locations_or_default(Vec::new());
        assert!(locations.len() >= 18);
        assert_eq!(locations[0].name, "Agonda");
        assert!(locations.windows(2).all(|w| w[0].name.to_lowercase() <= w[1].name.to_lowercase()));
    }

    #[test]
    fn test_stored_rows_win() {
        let stored = vec![Location {
            id: Uuid::new_v4(),
            name: "Siolim".to_string(),
            slug: "siolim".to_string(),
            headline: "Car rental in Siolim".to_string(),
            content: "...".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }];
        let locations = locations_or_default(stored);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].slug, "siolim");
    }
}
