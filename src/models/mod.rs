//! Data models for the WanderLens application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic points and distances
//! - User: Traveller accounts
//! - Photo: Posts on the discovery feed
//! - Place: User-submitted points of interest
//! - Journey: Multi-day travel logs

pub mod journey;
pub mod location;
pub mod photo;
pub mod place;
pub mod user;

// Re-export all public types for convenient access
pub use journey::{Journey, JourneyDay, JourneyId, JourneyStop, NewJourney};
pub use location::GeoPoint;
pub use photo::{NewPhoto, Photo, PhotoId};
pub use place::{NewPlace, Place, PlaceId};
pub use user::{NewUser, User, UserId};
