use std::env;
use std::net::SocketAddr;

use crate::entities::PoiCategory;
use crate::error::Error;

pub const DEFAULT_PLACES_API_BASE: &str = "https://api.geoapify.com";
pub const DEFAULT_DIRECTIONS_API_BASE: &str = "https://api.openrouteservice.org";
pub const DEFAULT_FALLBACK_DIRECTIONS_API_BASE: &str = "https://maps.googleapis.com";

pub const DEFAULT_POI_RADIUS_M: f64 = 5000.0;
pub const DEFAULT_POI_LIMIT: u32 = 20;
pub const DEFAULT_REFETCH_THRESHOLD_M: f64 = 500.0;

/// Everything the engine needs injected at construction: keys, base URLs,
/// radii and thresholds are named fields here, never literals in call sites.
#[derive(Clone, Debug)]
pub struct Config {
    pub places: PlacesConfig,
    pub directions: DirectionsConfig,
    pub refetch_threshold_m: f64,
    pub default_category: PoiCategory,
    pub listen_addr: SocketAddr,
}

#[derive(Clone, Debug)]
pub struct PlacesConfig {
    pub api_base: String,
    pub api_key: String,
    pub radius_m: f64,
    pub limit: u32,
}

#[derive(Clone, Debug)]
pub struct DirectionsConfig {
    pub api_base: String,
    pub api_key: String,
    pub fallback_api_base: String,
    pub fallback_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let places = PlacesConfig {
            api_base: env_or("GEOAPIFY_API_BASE", DEFAULT_PLACES_API_BASE),
            api_key: env::var("GEOAPIFY_API_KEY")?,
            radius_m: env_f64("POI_RADIUS_M", DEFAULT_POI_RADIUS_M),
            limit: env_u32("POI_LIMIT", DEFAULT_POI_LIMIT),
        };

        let directions = DirectionsConfig {
            api_base: env_or("OPENROUTESERVICE_API_BASE", DEFAULT_DIRECTIONS_API_BASE),
            api_key: env::var("OPENROUTESERVICE_API_KEY")?,
            fallback_api_base: env_or(
                "GOOGLE_DIRECTIONS_API_BASE",
                DEFAULT_FALLBACK_DIRECTIONS_API_BASE,
            ),
            fallback_api_key: env::var("GOOGLE_DIRECTIONS_API_KEY").unwrap_or_default(),
        };

        Ok(Self {
            places,
            directions,
            refetch_threshold_m: env_f64("REFETCH_THRESHOLD_M", DEFAULT_REFETCH_THRESHOLD_M),
            default_category: PoiCategory::default(),
            listen_addr: env::var("LISTEN_ADDR")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000))),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            places: PlacesConfig::default(),
            directions: DirectionsConfig::default(),
            refetch_threshold_m: DEFAULT_REFETCH_THRESHOLD_M,
            default_category: PoiCategory::default(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_PLACES_API_BASE.into(),
            api_key: String::new(),
            radius_m: DEFAULT_POI_RADIUS_M,
            limit: DEFAULT_POI_LIMIT,
        }
    }
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_DIRECTIONS_API_BASE.into(),
            api_key: String::new(),
            fallback_api_base: DEFAULT_FALLBACK_DIRECTIONS_API_BASE.into(),
            fallback_api_key: String::new(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.into())
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[test]
fn defaults_match_the_documented_policy() {
    let config = Config::default();

    assert_eq!(config.refetch_threshold_m, 500.0);
    assert_eq!(config.places.radius_m, 5000.0);
    assert_eq!(config.places.limit, 20);
    assert_eq!(config.default_category, PoiCategory::FoodAndDrink);
}
