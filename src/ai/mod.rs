//! Generative AI flows
//!
//! A flow is a named input schema, a prompt and an output schema wrapped
//! around one call to a hosted model. There is no retry, no caching and no
//! fallback model: identical calls reach the model again, and the first
//! failure is the result.
//!
//! - `GenerativeModel`: the model seam (`GeminiModel` for real calls,
//!   `MockModel` for tests)
//! - `Flow` + `run_flow`: validation, prompting and output checking
//! - `flows`: itinerary generation, photo location lookup, caption translation

pub mod error;
pub mod flows;
pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

pub use error::FlowError;
pub use flows::{
    FindLocation, GenerateItinerary, ItineraryInput, ItineraryOutput, LocateInput, LocationGuess,
    TranslateCaption, TranslateInput, TranslationOutput,
};
pub use gemini::GeminiModel;
pub use mock::MockModel;

/// Inline binary content sent alongside the prompt
#[derive(Debug, Clone, PartialEq)]
pub struct InlineMedia {
    pub mime_type: String,
    /// Base64 payload, without the data URI header
    pub data: String,
}

impl InlineMedia {
    /// Parse a `data:<mime>;base64,<payload>` URI holding an image
    pub fn from_image_data_uri(uri: &str) -> Result<Self, FlowError> {
        let invalid = || {
            FlowError::validation(
                "The photo must be a data URI with a MIME type and base64 encoding, e.g. 'data:image/jpeg;base64,...'.",
            )
        };

        let rest = uri.trim().strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let header = header.strip_suffix(";base64").ok_or_else(invalid)?;
        let mime_type = header.split(';').next().unwrap_or_default().trim();

        if !mime_type.starts_with("image/") || mime_type.len() <= "image/".len() {
            return Err(FlowError::validation(format!(
                "Expected an image, got '{}'.",
                if mime_type.is_empty() { "no MIME type" } else { mime_type }
            )));
        }

        if payload.is_empty()
            || !payload
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        {
            return Err(invalid());
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }
}

/// One prompt-filled request to a hosted model
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Flow name, for logs
    pub flow: &'static str,
    pub prompt: String,
    pub media: Vec<InlineMedia>,
    /// Schema the model is asked to answer with
    pub output_schema: Value,
}

/// A hosted generative model answering with JSON
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send one request; returns the parsed JSON the model produced
    async fn generate(&self, request: GenerateRequest) -> Result<Value, FlowError>;
}

/// Declarative description of one flow
pub trait Flow {
    const NAME: &'static str;
    type Input: Send + Sync;
    type Output: DeserializeOwned + Send;

    /// Check the input before anything is sent
    fn validate(input: &Self::Input) -> Result<(), FlowError>;

    fn prompt(input: &Self::Input) -> String;

    fn media(_input: &Self::Input) -> Result<Vec<InlineMedia>, FlowError> {
        Ok(Vec::new())
    }

    fn output_schema(input: &Self::Input) -> Value;

    /// Enforce constraints serde can't express
    fn check_output(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, FlowError> {
        Ok(output)
    }
}

/// Validate, prompt the model once and check what comes back
#[instrument(level = "info", skip_all, fields(flow = F::NAME))]
pub async fn run_flow<F: Flow>(
    model: &dyn GenerativeModel,
    input: &F::Input,
) -> Result<F::Output, FlowError> {
    F::validate(input)?;

    let request = GenerateRequest {
        flow: F::NAME,
        prompt: F::prompt(input),
        media: F::media(input)?,
        output_schema: F::output_schema(input),
    };

    let value = model.generate(request).await?;
    if value.is_null() {
        warn!("Model returned no output");
        return Err(FlowError::invalid_response("no valid response"));
    }

    let output: F::Output = serde_json::from_value(value).map_err(|e| {
        warn!("Model output does not match schema: {}", e);
        FlowError::invalid_response(format!("no valid response: {e}"))
    })?;

    let output = F::check_output(input, output)?;
    debug!("Flow completed");
    Ok(output)
}
