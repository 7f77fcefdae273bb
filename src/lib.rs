//! `WanderLens` - travel photo sharing with AI travel helpers
//!
//! This library provides the stores, text processing, AI flows and HTTP API
//! behind the WanderLens app: photo feeds, journeys, places, a trip expense
//! calculator, itinerary generation, photo location lookup and caption
//! translation.

pub mod actions;
pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod expenses;
pub mod feed;
pub mod geolocation;
pub mod itinerary;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod web;

// Re-export core types for public API
pub use actions::ActionState;
pub use ai::{FlowError, GeminiModel, GenerativeModel, MockModel};
pub use config::WanderLensConfig;
pub use error::WanderLensError;
pub use expenses::{Currency, ExpenseCategory, ExpenseTracker};
pub use geolocation::{GeolocationOutcome, GeolocationProvider, GoogleGeolocationClient};
pub use itinerary::{ParsedItinerary, parse_itinerary};
pub use session::Session;
pub use store::InMemoryStore;
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WanderLensError>;
