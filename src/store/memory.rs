//! Process-lifetime store backed by plain vectors
//!
//! Nothing here survives a restart and nothing is shared between server
//! instances.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{JourneyStore, PhotoStore, PlaceStore, UserStore, next_id, seed};
use crate::models::{
    GeoPoint, Journey, JourneyId, NewJourney, NewPhoto, NewPlace, NewUser, Photo, PhotoId,
    Place, User, UserId,
};
use crate::{Result, WanderLensError};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    photos: RwLock<Vec<Photo>>,
    places: RwLock<Vec<Place>>,
    journeys: RwLock<Vec<Journey>>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the mock data set
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: RwLock::new(seed::users()),
            photos: RwLock::new(seed::photos()),
            places: RwLock::new(seed::places()),
            journeys: RwLock::new(seed::journeys()),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim();
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    #[instrument(level = "debug", skip(self, new_user), fields(email = %new_user.email))]
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        let email = new_user.email.trim();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(WanderLensError::conflict(format!(
                "An account with {email} already exists."
            )));
        }

        let id = next_id(users.iter().map(|u| u.id));
        let user = new_user.into_user(id, Utc::now());
        users.push(user.clone());
        debug!("Created user {}", id);
        Ok(user)
    }
}

#[async_trait]
impl PhotoStore for InMemoryStore {
    async fn list_photos(&self) -> Result<Vec<Photo>> {
        Ok(self.photos.read().await.clone())
    }

    async fn find_photo(&self, id: PhotoId) -> Result<Option<Photo>> {
        Ok(self.photos.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn photos_by_user(&self, user_id: UserId) -> Result<Vec<Photo>> {
        Ok(self
            .photos
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    #[instrument(level = "debug", skip(self, new_photo))]
    async fn add_photo(&self, owner: UserId, new_photo: NewPhoto) -> Result<Photo> {
        let mut photos = self.photos.write().await;
        let id = next_id(photos.iter().map(|p| p.id));
        let photo = new_photo.into_photo(id, owner, Utc::now());
        photos.push(photo.clone());
        debug!("Added photo {} for user {}", id, owner);
        Ok(photo)
    }
}

#[async_trait]
impl PlaceStore for InMemoryStore {
    async fn list_places(&self) -> Result<Vec<Place>> {
        Ok(self.places.read().await.clone())
    }

    async fn places_by_user(&self, user_id: UserId) -> Result<Vec<Place>> {
        Ok(self
            .places
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn places_near(&self, center: GeoPoint, radius_km: f64) -> Result<Vec<(Place, f64)>> {
        let places = self.places.read().await;
        let mut results: Vec<(Place, f64)> = places
            .iter()
            .map(|place| (place, center.distance_km(&place.point())))
            .filter(|(_, distance)| *distance <= radius_km)
            .map(|(place, distance)| (place.clone(), distance))
            .collect();

        // Sort by distance (closest first)
        results.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(results)
    }

    #[instrument(level = "debug", skip(self, new_place))]
    async fn add_place(&self, owner: UserId, new_place: NewPlace) -> Result<Place> {
        let mut places = self.places.write().await;
        let id = places.len() as u64 + 1;
        let place = new_place.into_place(id, owner, Utc::now())?;
        places.push(place.clone());
        debug!("Added place {} for user {}", id, owner);
        Ok(place)
    }
}

#[async_trait]
impl JourneyStore for InMemoryStore {
    async fn list_journeys(&self) -> Result<Vec<Journey>> {
        Ok(self.journeys.read().await.clone())
    }

    async fn find_journey(&self, id: JourneyId) -> Result<Option<Journey>> {
        Ok(self.journeys.read().await.iter().find(|j| j.id == id).cloned())
    }

    async fn journeys_by_user(&self, user_id: UserId) -> Result<Vec<Journey>> {
        Ok(self
            .journeys
            .read()
            .await
            .iter()
            .filter(|j| j.user_id == user_id)
            .cloned()
            .collect())
    }

    #[instrument(level = "debug", skip(self, new_journey))]
    async fn add_journey(&self, owner: UserId, new_journey: NewJourney) -> Result<Journey> {
        let mut journeys = self.journeys.write().await;
        let id = next_id(journeys.iter().map(|j| j.id));
        let journey = new_journey.into_journey(id, owner, Utc::now())?;
        journeys.push(journey.clone());
        debug!("Added journey {} for user {}", id, owner);
        Ok(journey)
    }
}
