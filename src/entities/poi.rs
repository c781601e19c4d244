use serde::{Deserialize, Serialize};

use crate::entities::Position;

/// A named place, with its distance from the observer position that was
/// current when it was fetched. The distance is never recomputed afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Poi {
    pub name: String,
    pub place_id: String,
    pub distance_m: f64,
    pub position: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    Shopping,
    FoodAndDrink,
    Accommodation,
    Education,
    Healthcare,
    Parking,
    Rental,
    Tourism,
    Amenity,
    Beach,
    Heritage,
    PublicTransport,
    Activity,
    Office,
    PopulatedPlace,
    Religion,
}

impl PoiCategory {
    pub fn all() -> [PoiCategory; 16] {
        [
            PoiCategory::Shopping,
            PoiCategory::FoodAndDrink,
            PoiCategory::Accommodation,
            PoiCategory::Education,
            PoiCategory::Healthcare,
            PoiCategory::Parking,
            PoiCategory::Rental,
            PoiCategory::Tourism,
            PoiCategory::Amenity,
            PoiCategory::Beach,
            PoiCategory::Heritage,
            PoiCategory::PublicTransport,
            PoiCategory::Activity,
            PoiCategory::Office,
            PoiCategory::PopulatedPlace,
            PoiCategory::Religion,
        ]
    }

    // Category slug as the places API expects it.
    pub fn slug(&self) -> &'static str {
        match self {
            PoiCategory::Shopping => "commercial.shopping_mall",
            PoiCategory::FoodAndDrink => "commercial.food_and_drink",
            PoiCategory::Accommodation => "accommodation",
            PoiCategory::Education => "education",
            PoiCategory::Healthcare => "healthcare",
            PoiCategory::Parking => "parking",
            PoiCategory::Rental => "rental",
            PoiCategory::Tourism => "tourism",
            PoiCategory::Amenity => "amenity",
            PoiCategory::Beach => "beach",
            PoiCategory::Heritage => "heritage",
            PoiCategory::PublicTransport => "public_transport",
            PoiCategory::Activity => "activity",
            PoiCategory::Office => "office",
            PoiCategory::PopulatedPlace => "populated_place",
            PoiCategory::Religion => "religion",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PoiCategory::Shopping => "Shopping",
            PoiCategory::FoodAndDrink => "Food and Drinks",
            PoiCategory::Accommodation => "Accommodation",
            PoiCategory::Education => "Education",
            PoiCategory::Healthcare => "Healthcare",
            PoiCategory::Parking => "Parking",
            PoiCategory::Rental => "Rentals",
            PoiCategory::Tourism => "Tourism",
            PoiCategory::Amenity => "Amenities",
            PoiCategory::Beach => "Beaches",
            PoiCategory::Heritage => "Heritage",
            PoiCategory::PublicTransport => "Public Transport",
            PoiCategory::Activity => "Activities",
            PoiCategory::Office => "Office",
            PoiCategory::PopulatedPlace => "Populated Places",
            PoiCategory::Religion => "Religion",
        }
    }
}

impl Default for PoiCategory {
    fn default() -> Self {
        PoiCategory::FoodAndDrink
    }
}

/// Outcome of a refresh trigger: the threshold check skipped the fetch, the
/// cache was replaced with the listed POIs, or a newer trigger took over
/// while this one's request was still in flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PoiRefresh {
    Skipped,
    Refreshed { pois: Vec<Poi> },
    Superseded,
}

#[test]
fn category_slugs_match_the_places_api() {
    assert_eq!(PoiCategory::FoodAndDrink.slug(), "commercial.food_and_drink");
    assert_eq!(PoiCategory::Shopping.slug(), "commercial.shopping_mall");
    assert_eq!(PoiCategory::PublicTransport.slug(), "public_transport");
}

#[test]
fn every_category_has_a_distinct_slug() {
    use std::collections::HashSet;

    let slugs: HashSet<&str> = PoiCategory::all().iter().map(|c| c.slug()).collect();

    assert_eq!(slugs.len(), 16);
}

#[test]
fn categories_deserialize_from_snake_case() {
    let category: PoiCategory = serde_json::from_str("\"food_and_drink\"").unwrap();

    assert_eq!(category, PoiCategory::FoodAndDrink);
}
