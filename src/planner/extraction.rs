use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::preferences::Field;
use crate::openai_client::{ChatClient, ChatRequest};

pub const EXTRACTION_PROMPT: &str = "Extract travel preferences from the user's input.
Return a JSON object with the following fields (if found):
- destination: The main destination
- dates: Travel dates or duration
- budget: Budget range or amount
- purpose: Main purpose of the trip
- preferences: List of specific interests or preferences

If a field is not found, omit it from the JSON.
Return only the JSON object, no other text.";

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```(?:json)?\s*|\s*```").expect("code fence pattern is valid"));

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("model output is not a valid preference object: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model output is JSON but not an object")]
    NotAnObject,
}

/// A single field as the model may emit it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Number(number) => number.to_string(),
            FieldValue::List(items) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ExtractedPreferences {
    destination: Option<FieldValue>,
    dates: Option<FieldValue>,
    budget: Option<FieldValue>,
    purpose: Option<FieldValue>,
    preferences: Option<FieldValue>,
}

impl ExtractedPreferences {
    fn into_pairs(self) -> Vec<(Field, String)> {
        [
            (Field::Destination, self.destination),
            (Field::Dates, self.dates),
            (Field::Budget, self.budget),
            (Field::Purpose, self.purpose),
            (Field::Preferences, self.preferences),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v.into_text())))
        .collect()
    }
}

fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Parse a model reply into preference pairs.
///
/// The reply must be a JSON object (optionally wrapped in a Markdown code
/// fence). Unknown keys are ignored and `null` values count as absent.
pub fn parse_preferences(raw: &str) -> Result<Vec<(Field, String)>, ExtractionError> {
    let cleaned = strip_code_fences(raw);
    // Only a top-level object is a valid reply, never a positional array.
    let value: Value = serde_json::from_str(&cleaned)?;
    if !value.is_object() {
        return Err(ExtractionError::NotAnObject);
    }
    let extracted: ExtractedPreferences = serde_json::from_value(value)?;
    Ok(extracted.into_pairs())
}

/// Ask the model to pull preferences out of free text.
///
/// Every failure degrades to an empty result so the turn can continue.
pub async fn extract_preferences(client: &dyn ChatClient, user_input: &str) -> Vec<(Field, String)> {
    let request = ChatRequest::new(EXTRACTION_PROMPT, user_input);

    let raw = match client.complete(request).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Error extracting preferences: {}", e);
            return Vec::new();
        }
    };

    match parse_preferences(&raw) {
        Ok(pairs) => {
            debug!("Extracted {} preference field(s)", pairs.len());
            pairs
        }
        Err(e) => {
            warn!("Error extracting preferences: {}", e);
            debug!("Unparseable extraction output: {}", raw);
            Vec::new()
        }
    }
}
