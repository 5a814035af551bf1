//! Chat extraction service.
//!
//! Reads the recognized records of one workspace store and turns chat-data
//! values into conversation turns.

use std::path::Path;

use crate::domain::{BubbleKind, ConversationTurn, ExtractedConversation, RecordKey, Result};
use crate::infrastructure::StateDbReader;

use super::parser::{parse_chat_bubbles, parse_value, prompt_count};

/// Everything extracted from a single store.
#[derive(Debug, Default)]
pub struct StoreExtraction {
    /// One entry per chat-data record, possibly with zero turns.
    pub conversations: Vec<ExtractedConversation>,
    /// Rows or records that could not be decoded.
    pub records_skipped: usize,
}

/// Pairs user and ai bubbles into turns.
///
/// An ai bubble closes the pending turn. The pending query carries over tab
/// boundaries and is not cleared once a turn is emitted. A trailing user
/// bubble without an ai reply is dropped.
pub fn assemble_turns<I>(bubbles: I) -> Vec<ConversationTurn>
where
    I: IntoIterator<Item = BubbleKind>,
{
    let mut turns = Vec::new();
    let mut user_query = String::new();

    for bubble in bubbles {
        match bubble {
            BubbleKind::User(text) => user_query = text,
            BubbleKind::Ai(ai_response) => {
                let turn = ConversationTurn {
                    user_query: user_query.clone(),
                    ai_response,
                };
                if turn.has_content() {
                    turns.push(turn);
                }
            }
            BubbleKind::Other => {}
        }
    }

    turns
}

/// Decodes a chat-data value into turns.
///
/// # Errors
/// Returns error if the value is not JSON or not shaped like chat data.
pub fn decode_chat_data(raw: &str) -> Result<Vec<ConversationTurn>> {
    let document = parse_value(raw)?;
    Ok(assemble_turns(parse_chat_bubbles(document)?))
}

/// Extracts the chat conversations of one `state.vscdb`.
///
/// Undecodable records are skipped with a warning; only failures to open or
/// query the database are returned as errors.
///
/// # Errors
/// Returns error if the database cannot be opened or queried.
pub fn extract_store(path: &Path) -> Result<StoreExtraction> {
    let fetched = {
        let reader = StateDbReader::open(path)?;
        reader.fetch_state_records()?
    };

    let mut extraction = StoreExtraction {
        records_skipped: fetched.skipped_rows,
        ..Default::default()
    };

    for record in fetched.records {
        match record.key {
            RecordKey::Prompts => match parse_value(&record.value) {
                Ok(document) => {
                    tracing::debug!(
                        "Row {}: {} saved prompt(s) in {}",
                        record.rowid,
                        prompt_count(&document).unwrap_or_default(),
                        path.display()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "JSON decode error in {} for key '{}': {}. Skipping.",
                        path.display(),
                        record.key,
                        e
                    );
                    extraction.records_skipped += 1;
                }
            },
            RecordKey::ChatData => match decode_chat_data(&record.value) {
                Ok(turns) => extraction.conversations.push(ExtractedConversation {
                    key: record.key,
                    rowid: record.rowid,
                    turns,
                }),
                Err(e) => {
                    tracing::warn!(
                        "Failed to decode {} row {} in {}: {}. Skipping.",
                        record.key,
                        record.rowid,
                        path.display(),
                        e
                    );
                    extraction.records_skipped += 1;
                }
            },
        }
    }

    Ok(extraction)
}
