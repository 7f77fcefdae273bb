use std::collections::HashMap;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::Payload;
use crate::actions::{
    self, ActionState, ItineraryForm, ItineraryView, LocatePhotoForm, TranslateForm,
};
use crate::ai::{LocationGuess, TranslationOutput};
use crate::expenses::{Currency, ExpenseSummary, ExpenseTracker};
use crate::geolocation::GeolocationOutcome;
use crate::web::AppState;
use crate::{Result, VERSION};

/// Raw calculator fields keyed by category id
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForm {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amounts: HashMap<String, String>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

pub async fn expense_summary(Payload(form): Payload<ExpenseForm>) -> Result<Json<ExpenseSummary>> {
    let currency = match form.currency.as_deref() {
        Some(code) if !code.trim().is_empty() => code.parse::<Currency>()?,
        _ => Currency::default(),
    };
    let tracker = ExpenseTracker::from_raw_entries(currency, &form.amounts)?;
    Ok(Json(tracker.summary()))
}

pub async fn generate_itinerary(
    State(state): State<AppState>,
    Json(form): Json<ItineraryForm>,
) -> Json<ActionState<ItineraryView>> {
    Json(actions::generate_itinerary_action(state.model.as_ref(), form).await)
}

pub async fn find_location(
    State(state): State<AppState>,
    Json(form): Json<LocatePhotoForm>,
) -> Json<ActionState<LocationGuess>> {
    Json(actions::find_location_action(state.model.as_ref(), form).await)
}

pub async fn translate_caption(
    State(state): State<AppState>,
    Json(form): Json<TranslateForm>,
) -> Json<ActionState<TranslationOutput>> {
    Json(actions::translate_caption_action(state.model.as_ref(), form).await)
}

/// Failures keep the upstream code as the response status when it is an error status
pub async fn geolocate(State(state): State<AppState>) -> Response {
    let outcome = state.geolocation.locate().await;
    let status = match &outcome {
        GeolocationOutcome::Located { .. } => StatusCode::OK,
        GeolocationOutcome::Failed { error } => StatusCode::from_u16(error.code)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
    };
    (status, Json(outcome)).into_response()
}
