//! JSON parsing for workspace chat data.
//!
//! Handles conversion from raw `ItemTable` values to domain bubbles.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AppError, BubbleKind, Result};

/// Chat panel document as stored under the chat-data key.
#[derive(Debug, Deserialize)]
struct RawChatData {
    #[serde(default)]
    tabs: Vec<RawTab>,
}

#[derive(Debug, Deserialize)]
struct RawTab {
    #[serde(default)]
    bubbles: Vec<RawBubble>,
}

/// Raw bubble. `type` and `text` are kept loose: only user and ai bubbles
/// need a textual body.
#[derive(Debug, Deserialize)]
struct RawBubble {
    #[serde(rename = "type", default)]
    bubble_type: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
}

impl RawBubble {
    fn into_kind(self) -> Result<BubbleKind> {
        let tag = self.bubble_type.as_ref().and_then(Value::as_str);
        if !matches!(tag, Some("user" | "ai")) {
            return Ok(BubbleKind::Other);
        }

        let text = match &self.text {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                return Err(AppError::InvalidData {
                    message: format!("bubble text is not a string: {other}"),
                })
            }
        };

        Ok(BubbleKind::from_parts(tag, text))
    }
}

/// Parses a raw value as JSON.
///
/// # Errors
/// Returns error if the value is not valid JSON.
pub fn parse_value(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(AppError::json_parse)
}

/// Flattens a parsed chat-data document into bubbles, in tab order.
///
/// # Errors
/// Returns error if the document does not have the `tabs[].bubbles[]` shape.
pub fn parse_chat_bubbles(document: Value) -> Result<Vec<BubbleKind>> {
    let data: RawChatData = serde_json::from_value(document).map_err(|e| AppError::InvalidData {
        message: format!("unexpected chat data layout: {e}"),
    })?;

    data.tabs
        .into_iter()
        .flat_map(|tab| tab.bubbles)
        .map(RawBubble::into_kind)
        .collect()
}

/// Number of saved prompts in an `aiService.prompts` document, if it is a list.
pub fn prompt_count(document: &Value) -> Option<usize> {
    document.as_array().map(Vec::len)
}
