//! Record stores
//!
//! Each collection sits behind its own trait so a persistent backend can
//! replace the in-memory one without touching callers.

pub mod memory;
pub mod seed;

use async_trait::async_trait;

use crate::Result;
use crate::models::{
    GeoPoint, Journey, JourneyId, NewJourney, NewPhoto, NewPlace, NewUser, Photo, PhotoId,
    Place, User, UserId,
};

pub use memory::InMemoryStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn find_user(&self, id: UserId) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Fails with a conflict when the email is already registered
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn list_photos(&self) -> Result<Vec<Photo>>;
    async fn find_photo(&self, id: PhotoId) -> Result<Option<Photo>>;
    async fn photos_by_user(&self, user_id: UserId) -> Result<Vec<Photo>>;
    async fn add_photo(&self, owner: UserId, new_photo: NewPhoto) -> Result<Photo>;
}

#[async_trait]
pub trait PlaceStore: Send + Sync {
    async fn list_places(&self) -> Result<Vec<Place>>;
    async fn places_by_user(&self, user_id: UserId) -> Result<Vec<Place>>;
    /// Places within `radius_km` of `center`, closest first
    async fn places_near(&self, center: GeoPoint, radius_km: f64) -> Result<Vec<(Place, f64)>>;
    async fn add_place(&self, owner: UserId, new_place: NewPlace) -> Result<Place>;
}

#[async_trait]
pub trait JourneyStore: Send + Sync {
    async fn list_journeys(&self) -> Result<Vec<Journey>>;
    async fn find_journey(&self, id: JourneyId) -> Result<Option<Journey>>;
    async fn journeys_by_user(&self, user_id: UserId) -> Result<Vec<Journey>>;
    async fn add_journey(&self, owner: UserId, new_journey: NewJourney) -> Result<Journey>;
}

/// Next id as `max(existing) + 1`, starting at 1
pub(crate) fn next_id<I: Iterator<Item = u64>>(ids: I) -> u64 {
    ids.max().unwrap_or(0) + 1
}
