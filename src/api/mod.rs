//! JSON routes served under `/api`
//!
//! The acting user comes from the `x-wanderlens-user` header on every
//! route that writes on someone's behalf.

mod content;
mod helpers;

use axum::{
    Json, Router,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::error;

use crate::WanderLensError;
use crate::session::{SESSION_HEADER, Session};
use crate::web::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(helpers::health))
        .route("/feed", get(content::feed))
        .route("/photos", get(content::list_photos).post(content::upload_photo))
        .route("/photos/{id}", get(content::get_photo))
        .route("/users", post(content::sign_up))
        .route("/users/{id}", get(content::get_user))
        .route("/places", get(content::list_places).post(content::add_place))
        .route(
            "/journeys",
            get(content::list_journeys).post(content::create_journey),
        )
        .route("/journeys/{id}", get(content::get_journey))
        .route("/expenses/summary", post(helpers::expense_summary))
        .route("/itinerary", post(helpers::generate_itinerary))
        .route("/locate", post(helpers::find_location))
        .route("/translate", post(helpers::translate_caption))
        .route("/geolocate", post(helpers::geolocate))
}

impl WanderLensError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            WanderLensError::Validation { .. } => StatusCode::BAD_REQUEST,
            WanderLensError::NotFound { .. } => StatusCode::NOT_FOUND,
            WanderLensError::Conflict { .. } => StatusCode::CONFLICT,
            WanderLensError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            WanderLensError::Config { .. }
            | WanderLensError::Io { .. }
            | WanderLensError::General { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WanderLensError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = WanderLensError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(SESSION_HEADER).ok_or_else(|| {
            WanderLensError::validation(format!("Missing {SESSION_HEADER} header."))
        })?;
        let value = value.to_str().map_err(|_| {
            WanderLensError::validation(format!("Malformed {SESSION_HEADER} header."))
        })?;
        Session::from_header_value(value)
    }
}

/// `Json` whose rejections come back as a 400 `{error}` body
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = WanderLensError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| WanderLensError::validation(rejection.body_text()))?;
        Ok(Payload(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use rstest::rstest;

    use crate::models::NewUser;

    #[rstest]
    #[case(WanderLensError::validation("x"), StatusCode::BAD_REQUEST)]
    #[case(WanderLensError::not_found("x"), StatusCode::NOT_FOUND)]
    #[case(WanderLensError::conflict("x"), StatusCode::CONFLICT)]
    #[case(WanderLensError::upstream("x"), StatusCode::BAD_GATEWAY)]
    #[case(WanderLensError::config("x"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(WanderLensError::general("x"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_codes(#[case] err: WanderLensError, #[case] expected: StatusCode) {
        assert_eq!(err.into_response().status(), expected);
    }

    #[tokio::test]
    async fn test_session_from_header() {
        let (mut parts, _) = axum::http::Request::builder()
            .header(SESSION_HEADER, "3")
            .body(())
            .unwrap()
            .into_parts();
        let session = Session::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(session, Session::new(3));

        let (mut parts, _) = axum::http::Request::builder().body(()).unwrap().into_parts();
        assert!(Session::from_request_parts(&mut parts, &()).await.is_err());
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_payload_fills_missing_fields() {
        let request = json_request(r#"{"name": "Ana"}"#);
        let Payload(user) = Payload::<NewUser>::from_request(request, &()).await.unwrap();
        assert_eq!(user.name, "Ana");
        assert!(user.email.is_empty());
    }

    #[tokio::test]
    async fn test_payload_rejects_broken_json_as_validation() {
        let err = Payload::<NewUser>::from_request(json_request("{\"name\": "), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = Payload::<NewUser>::from_request(json_request(r#"{"name": 7}"#), &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, WanderLensError::Validation { .. }));
    }
}
