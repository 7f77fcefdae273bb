//! Itinerary generation

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::require;
use crate::ai::{Flow, FlowError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ItineraryInput {
    pub destination: String,
    /// Interests, pace, budget and trip length in the traveller's own words
    pub preferences: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryOutput {
    /// Free text, usually split by `Day N:` markers
    pub itinerary: String,
}

pub struct GenerateItinerary;

impl Flow for GenerateItinerary {
    const NAME: &'static str = "generateItinerary";
    type Input = ItineraryInput;
    type Output = ItineraryOutput;

    fn validate(input: &ItineraryInput) -> Result<(), FlowError> {
        require(&input.destination, "Please enter a destination.")?;
        require(&input.preferences, "Please describe your travel preferences.")
    }

    fn prompt(input: &ItineraryInput) -> String {
        format!(
            "You are an experienced travel planner. Create a personalized day-by-day itinerary \
             for a trip to {destination}.\n\n\
             Traveller preferences: {preferences}\n\n\
             Formatting rules:\n\
             - Start every day with \"Day N:\" and a short title on its own line.\n\
             - Introduce parts of the day with \"Morning \u{2600}\u{FE0F}\", \"Afternoon \u{1F3D9}\u{FE0F}\" and \"Evening \u{1F319}\".\n\
             - Use **bold** for must-see places and *italics* for practical tips.\n\
             - Include food suggestions and how to get between places.\n\n\
             Put the whole itinerary as plain text in the \"itinerary\" field.",
            destination = input.destination.trim(),
            preferences = input.preferences.trim(),
        )
    }

    fn output_schema(_input: &ItineraryInput) -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "itinerary": {
                    "type": "STRING",
                    "description": "Day-by-day itinerary text"
                }
            },
            "required": ["itinerary"]
        })
    }
}
