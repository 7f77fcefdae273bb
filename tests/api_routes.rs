use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;
use wanderlens::ai::MockModel;
use wanderlens::geolocation::{GeolocationOutcome, GeolocationProvider, LatLng};
use wanderlens::session::SESSION_HEADER;
use wanderlens::{AppState, InMemoryStore, WanderLensConfig, web};

struct FixedGeolocation(GeolocationOutcome);

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn locate(&self) -> GeolocationOutcome {
        self.0.clone()
    }
}

fn located() -> GeolocationOutcome {
    GeolocationOutcome::Located {
        location: LatLng {
            lat: 38.72,
            lng: -9.14,
        },
        accuracy: 800.0,
    }
}

fn app_with(model: MockModel, geolocation: GeolocationOutcome) -> Router {
    let state = AppState::in_memory(
        InMemoryStore::seeded(),
        Arc::new(model),
        Arc::new(FixedGeolocation(geolocation)),
        WanderLensConfig::default(),
    );
    web::app(state)
}

fn app() -> Router {
    app_with(MockModel::with_response(Value::Null), located())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<u64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(SESSION_HEADER, user.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn feed_is_newest_first_and_filterable() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/feed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["photoId"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![5, 3, 4, 1, 2]);
    assert_eq!(body[0]["authorName"], "Mei Tanaka");

    let (_, body) = send(&app, Method::GET, "/api/feed?tag=PORTUGAL&limit=1", None, None).await;
    let cards = body.as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["photoId"], 4);
}

#[tokio::test]
async fn upload_requires_known_session_user() {
    let app = app();
    let photo = json!({
        "imageUrl": "https://picsum.photos/seed/tram/800",
        "caption": "Tram 28 climbing the hill",
        "tags": ["lisbon"]
    });

    let (status, _) = send(&app, Method::POST, "/api/photos", None, Some(photo.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/photos", Some(99), Some(photo.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/api/photos", Some(3), Some(photo)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 6);
    assert_eq!(body["userId"], 3);

    let (status, body) = send(&app, Method::GET, "/api/photos/6", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["caption"], "Tram 28 climbing the hill");
}

#[tokio::test]
async fn invalid_photo_is_a_bad_request_with_message() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/photos",
        Some(1),
        Some(json!({"imageUrl": "https://picsum.photos/1", "caption": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please add a caption to your photo.");
}

#[rstest]
#[case("/api/photos", Some(1), json!({"imageUrl": "https://picsum.photos/1"}), "Please add a caption to your photo.")]
#[case("/api/users", None, json!({"name": "Ana"}), "Please enter your email address.")]
#[case("/api/places", Some(1), json!({"name": "Sunset spot"}), "Please set the place's latitude and longitude.")]
#[case("/api/journeys", Some(3), json!({"title": "Norway by train", "destination": "Bergen"}), "Please choose when the journey starts and ends.")]
#[tokio::test]
async fn missing_fields_are_reported_as_bad_requests(
    #[case] uri: &str,
    #[case] user: Option<u64>,
    #[case] body: Value,
    #[case] message: &str,
) {
    let (status, body) = send(&app(), Method::POST, uri, user, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": message }));
}

#[tokio::test]
async fn mistyped_fields_are_bad_requests() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/places",
        Some(1),
        Some(json!({"name": "Sunset spot", "latitude": "north"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/photos/404", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/api/users/404", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/api/journeys/404", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sign_up_rejects_duplicate_email() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"name": "Ana", "email": "ana@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 4);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"name": "Alex again", "email": "ALEX@wanderlens.app"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_profile_includes_shared_content() {
    let (status, body) = send(&app(), Method::GET, "/api/users/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alex Rivera");
    assert_eq!(body["photos"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn places_near_a_point_are_sorted_by_distance() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/places?lat=38.72&lng=-9.14&radiusKm=50",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let places = body.as_array().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["name"], "Miradouro da Senhora do Monte");
    assert!(places[0]["distanceKm"].as_f64().unwrap() < 5.0);

    let (status, _) = send(&app, Method::GET, "/api/places?lat=38.72", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/places?lat=38.72&lng=-9.14&radiusKm=0",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "radiusKm must be a positive number.");

    let (_, body) = send(&app, Method::GET, "/api/places", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert!(body[0].get("distanceKm").is_none());
}

#[tokio::test]
async fn journeys_are_validated() {
    let app = app();
    let journey = json!({
        "title": "Norway by train",
        "destination": "Bergen",
        "startDate": "2024-07-01",
        "endDate": "2024-07-03",
        "days": [{"day": 2, "places": [{"name": "Flåm Railway"}]}]
    });
    let (status, body) = send(&app, Method::POST, "/api/journeys", Some(3), Some(journey)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_u64().unwrap();

    let (status, _) = send(&app, Method::GET, &format!("/api/journeys/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);

    let backwards = json!({
        "title": "Oops",
        "destination": "Bergen",
        "startDate": "2024-07-05",
        "endDate": "2024-07-01"
    });
    let (status, _) = send(&app, Method::POST, "/api/journeys", Some(3), Some(backwards)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expense_summary_totals_forgiving_amounts() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/expenses/summary",
        None,
        Some(json!({"currency": "EUR", "amounts": {"food": "120.5", "transport": ""}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 120.5);
    assert_eq!(body["formattedTotal"], "€120.50");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/expenses/summary",
        None,
        Some(json!({"amounts": {"souvenirs": "10"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn itinerary_action_returns_parsed_sections() {
    let app = app_with(
        MockModel::with_response(json!({
            "itinerary": "Day 1: Arrival\nMorning \u{2600}\u{FE0F} land and rest\nDay 2: Sintra\n**Pena Palace**"
        })),
        located(),
    );
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/itinerary",
        None,
        Some(json!({"destination": "Lisbon", "preferences": "history"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sections = body["data"]["parsed"]["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["title"], "Day 1: Arrival");
    assert!(
        sections[0]["bodyHtml"]
            .as_str()
            .unwrap()
            .contains("<br /><strong>Morning \u{2600}\u{FE0F}</strong>")
    );
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn itinerary_action_reports_missing_fields() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/itinerary",
        None,
        Some(json!({"preferences": "history"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "Please enter a destination.");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn translate_action_only_returns_supplied_fields() {
    let app = app_with(
        MockModel::with_response(json!({
            "translatedCaption": "Hola",
            "translatedTransportDetails": "Tren"
        })),
        located(),
    );
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/translate",
        None,
        Some(json!({"targetLanguage": "Spanish", "caption": "Hello"})),
    )
    .await;
    assert_eq!(body["data"], json!({"translatedCaption": "Hola"}));
}

#[tokio::test]
async fn locate_action_rejects_non_image_uri() {
    let (_, body) = send(
        &app(),
        Method::POST,
        "/api/locate",
        None,
        Some(json!({"photoDataUri": "data:text/plain;base64,aGVsbG8="})),
    )
    .await;
    assert!(body["error"].as_str().unwrap().contains("Expected an image"));
}

#[tokio::test]
async fn geolocate_forwards_outcome() {
    let (status, body) = send(&app(), Method::POST, "/api/geolocate", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["lat"], 38.72);

    let failing = app_with(
        MockModel::with_response(Value::Null),
        GeolocationOutcome::failed("API key not valid.", 403),
    );
    let (status, body) = send(&failing, Method::POST, "/api/geolocate", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "API key not valid.");
}
