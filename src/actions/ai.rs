use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::ActionState;
use crate::ai::{
    FindLocation, Flow, FlowError, GenerateItinerary, GenerativeModel, ItineraryInput,
    LocateInput, LocationGuess, TranslateCaption, TranslateInput, TranslationOutput, run_flow,
};
use crate::itinerary::{ParsedItinerary, parse_itinerary};

pub type ItineraryForm = ItineraryInput;
pub type LocatePhotoForm = LocateInput;
pub type TranslateForm = TranslateInput;

/// Raw itinerary text plus its parsed day sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryView {
    pub itinerary: String,
    pub parsed: ParsedItinerary,
}

async fn submit<F: Flow>(model: &dyn GenerativeModel, form: &F::Input) -> ActionState<F::Output> {
    match run_flow::<F>(model, form).await {
        Ok(output) => ActionState::success(output),
        Err(err @ FlowError::Validation(_)) => ActionState::failure(err.user_message()),
        Err(err) => {
            error!("{} failed: {}", F::NAME, err);
            ActionState::failure(err.user_message())
        }
    }
}

pub async fn generate_itinerary_action(
    model: &dyn GenerativeModel,
    form: ItineraryForm,
) -> ActionState<ItineraryView> {
    let state = submit::<GenerateItinerary>(model, &form).await;
    match state.data {
        Some(output) => {
            let parsed = parse_itinerary(&output.itinerary);
            info!(
                "Itinerary for {} has {} sections",
                form.destination.trim(),
                parsed.sections.len()
            );
            ActionState::success(ItineraryView {
                itinerary: output.itinerary,
                parsed,
            })
        }
        None => ActionState {
            data: None,
            error: state.error,
        },
    }
}

/// An unrecognisable photo is a successful result with the unknown guess
pub async fn find_location_action(
    model: &dyn GenerativeModel,
    form: LocatePhotoForm,
) -> ActionState<LocationGuess> {
    submit::<FindLocation>(model, &form).await
}

pub async fn translate_caption_action(
    model: &dyn GenerativeModel,
    form: TranslateForm,
) -> ActionState<TranslationOutput> {
    submit::<TranslateCaption>(model, &form).await
}
