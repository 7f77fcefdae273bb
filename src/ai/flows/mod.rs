//! The three flows the app exposes

pub mod itinerary;
pub mod location;
pub mod translate;

pub use itinerary::{GenerateItinerary, ItineraryInput, ItineraryOutput};
pub use location::{FindLocation, LocateInput, LocationGuess, UNKNOWN_LOCATION};
pub use translate::{TranslateCaption, TranslateInput, TranslationOutput};

use super::FlowError;

/// Reject blank required fields with a user-facing message
pub(crate) fn require(value: &str, message: &str) -> Result<(), FlowError> {
    if value.trim().is_empty() {
        Err(FlowError::validation(message))
    } else {
        Ok(())
    }
}
