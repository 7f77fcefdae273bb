use tracing::{info, instrument};

use crate::Result;
use crate::models::{Journey, NewJourney, NewPhoto, NewPlace, NewUser, Photo, Place, User};
use crate::session::Session;
use crate::store::{JourneyStore, PhotoStore, PlaceStore, UserStore};

#[instrument(skip_all)]
pub async fn sign_up(users: &dyn UserStore, new_user: NewUser) -> Result<User> {
    new_user.validate()?;
    let user = users.create_user(new_user).await?;
    info!("User {} signed up", user.id);
    Ok(user)
}

#[instrument(skip_all, fields(user_id = session.user_id))]
pub async fn upload_photo(
    users: &dyn UserStore,
    photos: &dyn PhotoStore,
    session: Session,
    new_photo: NewPhoto,
) -> Result<Photo> {
    let user = session.current_user(users).await?;
    new_photo.validate()?;
    let photo = photos.add_photo(user.id, new_photo).await?;
    info!("Photo {} uploaded", photo.id);
    Ok(photo)
}

#[instrument(skip_all, fields(user_id = session.user_id))]
pub async fn add_place(
    users: &dyn UserStore,
    places: &dyn PlaceStore,
    session: Session,
    new_place: NewPlace,
) -> Result<Place> {
    let user = session.current_user(users).await?;
    new_place.validate()?;
    let place = places.add_place(user.id, new_place).await?;
    info!("Place {} added", place.id);
    Ok(place)
}

#[instrument(skip_all, fields(user_id = session.user_id))]
pub async fn create_journey(
    users: &dyn UserStore,
    journeys: &dyn JourneyStore,
    session: Session,
    new_journey: NewJourney,
) -> Result<Journey> {
    let user = session.current_user(users).await?;
    new_journey.validate()?;
    let journey = journeys.add_journey(user.id, new_journey).await?;
    info!("Journey {} created", journey.id);
    Ok(journey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WanderLensError;
    use crate::store::InMemoryStore;

    fn photo() -> NewPhoto {
        NewPhoto {
            image_url: "https://picsum.photos/seed/new/800".into(),
            caption: "Ferry at dawn".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upload_photo_appends_for_session_user() {
        let store = InMemoryStore::seeded();
        let before = store.list_photos().await.unwrap().len();

        let photo = upload_photo(&store, &store, Session::new(2), photo()).await.unwrap();
        assert_eq!(photo.user_id, 2);
        assert_eq!(store.list_photos().await.unwrap().len(), before + 1);
    }

    #[tokio::test]
    async fn test_unknown_session_user_is_rejected() {
        let store = InMemoryStore::seeded();
        let err = upload_photo(&store, &store, Session::new(42), photo())
            .await
            .unwrap_err();
        assert!(matches!(err, WanderLensError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_photo_is_not_stored() {
        let store = InMemoryStore::seeded();
        let before = store.list_photos().await.unwrap().len();
        let err = upload_photo(
            &store,
            &store,
            Session::new(1),
            NewPhoto {
                caption: "  ".into(),
                ..photo()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WanderLensError::Validation { .. }));
        assert_eq!(store.list_photos().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_sign_up_validates_then_creates() {
        let store = InMemoryStore::new();
        let invalid = NewUser {
            name: "Sam".into(),
            email: "not-an-email".into(),
            ..Default::default()
        };
        assert!(sign_up(&store, invalid).await.is_err());

        let user = sign_up(
            &store,
            NewUser {
                name: "Sam".into(),
                email: "sam@example.com".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_add_place_for_session_user() {
        let store = InMemoryStore::seeded();
        let place = add_place(
            &store,
            &store,
            Session::new(3),
            NewPlace {
                name: "Hidden viewpoint".into(),
                latitude: Some(59.91),
                longitude: Some(10.75),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(place.user_id, 3);
        assert_eq!(place.category, "other");
    }
}
