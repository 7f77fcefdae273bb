//! Form-submission adapters
//!
//! AI actions never fail outright: they answer with an [`ActionState`]
//! holding either data or a message the UI can show as-is. Content actions
//! return the crate `Result` and let the HTTP layer pick a status.

pub mod ai;
pub mod content;

use serde::{Deserialize, Serialize};

pub use ai::{
    ItineraryForm, ItineraryView, LocatePhotoForm, TranslateForm, find_location_action,
    generate_itinerary_action, translate_caption_action,
};
pub use content::{add_place, create_journey, sign_up, upload_photo};

/// UI state after one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionState<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionState<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}

impl<T> Default for ActionState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}
