//! Photo location lookup
//!
//! "Unknown" is data, not an error: the flow answers with
//! [`UNKNOWN_LOCATION`] and confidence 0, and callers branch on
//! [`LocationGuess::is_unknown`].

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::ai::{Flow, FlowError, InlineMedia};
use crate::models::GeoPoint;

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LocateInput {
    /// `data:image/...;base64,...`
    pub photo_data_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationGuess {
    pub location_name: String,
    /// 0 = no idea, 1 = certain
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl LocationGuess {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            location_name: UNKNOWN_LOCATION.to_string(),
            confidence: 0.0,
            latitude: None,
            longitude: None,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.location_name == UNKNOWN_LOCATION
    }

    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).ok(),
            _ => None,
        }
    }
}

pub struct FindLocation;

impl Flow for FindLocation {
    const NAME: &'static str = "findLocation";
    type Input = LocateInput;
    type Output = LocationGuess;

    fn validate(input: &LocateInput) -> Result<(), FlowError> {
        if input.photo_data_uri.trim().is_empty() {
            return Err(FlowError::validation("Please upload a photo first."));
        }
        InlineMedia::from_image_data_uri(&input.photo_data_uri).map(|_| ())
    }

    fn prompt(_input: &LocateInput) -> String {
        format!(
            "You are an expert in geography and travel photography. Look at the attached photo \
             and identify where it was taken, as specifically as you can (landmark, city, country).\n\n\
             Report your confidence as a number between 0 and 1. Include latitude and longitude \
             when you can place the photo on a map.\n\
             If you cannot identify the location, answer with locationName \"{UNKNOWN_LOCATION}\" \
             and confidence 0."
        )
    }

    fn media(input: &LocateInput) -> Result<Vec<InlineMedia>, FlowError> {
        Ok(vec![InlineMedia::from_image_data_uri(&input.photo_data_uri)?])
    }

    fn output_schema(_input: &LocateInput) -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "locationName": {"type": "STRING"},
                "confidence": {"type": "NUMBER", "minimum": 0, "maximum": 1},
                "latitude": {"type": "NUMBER"},
                "longitude": {"type": "NUMBER"}
            },
            "required": ["locationName", "confidence"]
        })
    }

    fn check_output(_input: &LocateInput, output: LocationGuess) -> Result<LocationGuess, FlowError> {
        if !output.confidence.is_finite() || !(0.0..=1.0).contains(&output.confidence) {
            return Err(FlowError::invalid_response(format!(
                "confidence {} is outside [0, 1]",
                output.confidence
            )));
        }

        let name = output.location_name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(UNKNOWN_LOCATION) {
            return Ok(LocationGuess::unknown());
        }

        let mut guess = LocationGuess {
            location_name: name.to_string(),
            ..output
        };
        if guess.point().is_none() && (guess.latitude.is_some() || guess.longitude.is_some()) {
            warn!("Dropping unusable coordinates from location guess");
            guess.latitude = None;
            guess.longitude = None;
        }
        Ok(guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockModel, run_flow};
    use rstest::rstest;

    const PHOTO: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQ==";

    fn input() -> LocateInput {
        LocateInput {
            photo_data_uri: PHOTO.into(),
        }
    }

    #[tokio::test]
    async fn test_identified_location() {
        let model = MockModel::with_response(json!({
            "locationName": "Eiffel Tower, Paris, France",
            "confidence": 0.93,
            "latitude": 48.8584,
            "longitude": 2.2945
        }));
        let guess = run_flow::<FindLocation>(&model, &input()).await.unwrap();
        assert!(!guess.is_unknown());
        assert_eq!(guess.confidence, 0.93);
        assert!(guess.point().is_some());

        let requests = model.requests();
        assert_eq!(requests[0].media[0].mime_type, "image/jpeg");
        assert_eq!(requests[0].media[0].data, "/9j/4AAQSkZJRgABAQ==");
    }

    #[rstest]
    #[case(json!({"locationName": "Unknown Location", "confidence": 0.4}))]
    #[case(json!({"locationName": "unknown location", "confidence": 0.0}))]
    #[case(json!({"locationName": "  ", "confidence": 0.2, "latitude": 1.0, "longitude": 2.0}))]
    #[tokio::test]
    async fn test_unknown_is_normalized(#[case] response: Value) {
        let model = MockModel::with_response(response);
        let guess = run_flow::<FindLocation>(&model, &input()).await.unwrap();
        assert_eq!(guess, LocationGuess::unknown());
        assert_eq!(guess.confidence, 0.0);
    }

    #[rstest]
    #[case(1.5)]
    #[case(-0.1)]
    #[tokio::test]
    async fn test_confidence_out_of_range(#[case] confidence: f64) {
        let model = MockModel::with_response(json!({"locationName": "Rome", "confidence": confidence}));
        let err = run_flow::<FindLocation>(&model, &input()).await.unwrap_err();
        assert!(matches!(err, FlowError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_bad_coordinates_are_dropped() {
        let model = MockModel::with_response(json!({
            "locationName": "Somewhere", "confidence": 0.5, "latitude": 300.0, "longitude": 10.0
        }));
        let guess = run_flow::<FindLocation>(&model, &input()).await.unwrap();
        assert_eq!(guess.latitude, None);
        assert_eq!(guess.longitude, None);
    }

    #[tokio::test]
    async fn test_invalid_photo_is_rejected_before_calling() {
        let model = MockModel::with_response(json!({"locationName": "x", "confidence": 1}));
        let err = run_flow::<FindLocation>(
            &model,
            &LocateInput {
                photo_data_uri: "https://img.example/photo.jpg".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(model.call_count(), 0);
    }
}
