use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::Payload;
use crate::actions;
use crate::feed::{FeedCard, FeedQuery, discovery_feed};
use crate::models::{
    GeoPoint, Journey, JourneyId, NewJourney, NewPhoto, NewPlace, NewUser, Photo, PhotoId, Place,
    User, UserId,
};
use crate::session::Session;
use crate::web::AppState;
use crate::{Result, WanderLensError};

const DEFAULT_RADIUS_KM: f64 = 25.0;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerFilter {
    pub user_id: Option<UserId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceEntry {
    #[serde(flatten)]
    pub place: Place,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// A user with everything they have shared
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub photos: Vec<Photo>,
    pub places: Vec<Place>,
    pub journeys: Vec<Journey>,
}

pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<FeedCard>>> {
    let photos = state.photos.list_photos().await?;
    let users = state.users.list_users().await?;
    Ok(Json(discovery_feed(photos, &users, &query)))
}

pub async fn list_photos(
    State(state): State<AppState>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<Vec<Photo>>> {
    let photos = match filter.user_id {
        Some(user_id) => state.photos.photos_by_user(user_id).await?,
        None => state.photos.list_photos().await?,
    };
    Ok(Json(photos))
}

pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<PhotoId>,
) -> Result<Json<Photo>> {
    state
        .photos
        .find_photo(id)
        .await?
        .map(Json)
        .ok_or_else(|| WanderLensError::not_found(format!("Photo {id} does not exist.")))
}

pub async fn upload_photo(
    State(state): State<AppState>,
    session: Session,
    Payload(new_photo): Payload<NewPhoto>,
) -> Result<(StatusCode, Json<Photo>)> {
    let photo =
        actions::upload_photo(state.users.as_ref(), state.photos.as_ref(), session, new_photo)
            .await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

pub async fn sign_up(
    State(state): State<AppState>,
    Payload(new_user): Payload<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    let user = actions::sign_up(state.users.as_ref(), new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserProfile>> {
    let user = Session::new(id).current_user(state.users.as_ref()).await?;
    Ok(Json(UserProfile {
        photos: state.photos.photos_by_user(id).await?,
        places: state.places.places_by_user(id).await?,
        journeys: state.journeys.journeys_by_user(id).await?,
        user,
    }))
}

pub async fn list_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> Result<Json<Vec<PlaceEntry>>> {
    let entries = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => {
            let radius_km = query.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
            if !radius_km.is_finite() || radius_km <= 0.0 {
                return Err(WanderLensError::validation(
                    "radiusKm must be a positive number.",
                ));
            }
            state
                .places
                .places_near(GeoPoint::new(lat, lng)?, radius_km)
                .await?
                .into_iter()
                .map(|(place, distance)| PlaceEntry {
                    place,
                    distance_km: Some(distance),
                })
                .collect()
        }
        (None, None) => state
            .places
            .list_places()
            .await?
            .into_iter()
            .map(|place| PlaceEntry {
                place,
                distance_km: None,
            })
            .collect(),
        _ => {
            return Err(WanderLensError::validation(
                "lat and lng must be provided together.",
            ));
        }
    };
    Ok(Json(entries))
}

pub async fn add_place(
    State(state): State<AppState>,
    session: Session,
    Payload(new_place): Payload<NewPlace>,
) -> Result<(StatusCode, Json<Place>)> {
    let place =
        actions::add_place(state.users.as_ref(), state.places.as_ref(), session, new_place)
            .await?;
    Ok((StatusCode::CREATED, Json(place)))
}

pub async fn list_journeys(
    State(state): State<AppState>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<Vec<Journey>>> {
    let journeys = match filter.user_id {
        Some(user_id) => state.journeys.journeys_by_user(user_id).await?,
        None => state.journeys.list_journeys().await?,
    };
    Ok(Json(journeys))
}

pub async fn get_journey(
    State(state): State<AppState>,
    Path(id): Path<JourneyId>,
) -> Result<Json<Journey>> {
    state
        .journeys
        .find_journey(id)
        .await?
        .map(Json)
        .ok_or_else(|| WanderLensError::not_found(format!("Journey {id} does not exist.")))
}

pub async fn create_journey(
    State(state): State<AppState>,
    session: Session,
    Payload(new_journey): Payload<NewJourney>,
) -> Result<(StatusCode, Json<Journey>)> {
    let journey = actions::create_journey(
        state.users.as_ref(),
        state.journeys.as_ref(),
        session,
        new_journey,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(journey)))
}
