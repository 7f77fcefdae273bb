//! Caption translation
//!
//! Only the fields supplied on input come back translated; the output never
//! carries keys for fields the caller left out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::require;
use crate::ai::{Flow, FlowError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslateInput {
    pub target_language: String,
    pub caption: String,
    pub transport_details: Option<String>,
    pub food_details: Option<String>,
}

impl TranslateInput {
    /// Transport details, if supplied and not blank
    #[must_use]
    pub fn transport(&self) -> Option<&str> {
        supplied(&self.transport_details)
    }

    #[must_use]
    pub fn food(&self) -> Option<&str> {
        supplied(&self.food_details)
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutput {
    pub translated_caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_transport_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_food_details: Option<String>,
}

pub struct TranslateCaption;

impl Flow for TranslateCaption {
    const NAME: &'static str = "translateCaption";
    type Input = TranslateInput;
    type Output = TranslationOutput;

    fn validate(input: &TranslateInput) -> Result<(), FlowError> {
        require(&input.target_language, "Please choose a language to translate into.")?;
        require(&input.caption, "There is no caption to translate.")
    }

    fn prompt(input: &TranslateInput) -> String {
        let mut prompt = format!(
            "Translate the following travel post into {}. Keep the tone, emoji and proper \
             nouns; do not add commentary.\n\nCaption: {}\n",
            input.target_language.trim(),
            input.caption.trim()
        );
        if let Some(transport) = input.transport() {
            prompt.push_str(&format!("Transport details: {transport}\n"));
        }
        if let Some(food) = input.food() {
            prompt.push_str(&format!("Food details: {food}\n"));
        }
        prompt.push_str("\nOnly return translations for the fields given above.");
        prompt
    }

    fn output_schema(input: &TranslateInput) -> Value {
        let mut properties = Map::new();
        let mut required = vec![json!("translatedCaption")];
        properties.insert("translatedCaption".into(), json!({"type": "STRING"}));

        if input.transport().is_some() {
            properties.insert("translatedTransportDetails".into(), json!({"type": "STRING"}));
            required.push(json!("translatedTransportDetails"));
        }
        if input.food().is_some() {
            properties.insert("translatedFoodDetails".into(), json!({"type": "STRING"}));
            required.push(json!("translatedFoodDetails"));
        }

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required
        })
    }

    fn check_output(
        input: &TranslateInput,
        mut output: TranslationOutput,
    ) -> Result<TranslationOutput, FlowError> {
        if input.transport().is_none() {
            output.translated_transport_details = None;
        } else if output.translated_transport_details.is_none() {
            return Err(FlowError::invalid_response("missing translatedTransportDetails"));
        }

        if input.food().is_none() {
            output.translated_food_details = None;
        } else if output.translated_food_details.is_none() {
            return Err(FlowError::invalid_response("missing translatedFoodDetails"));
        }

        Ok(output)
    }
}
