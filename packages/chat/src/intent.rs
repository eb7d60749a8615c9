//! Heuristic intent classification for chat prompts
//!
//! Decides whether a prompt is an actionable document request or an
//! informational question before it ever reaches the backend. The backend
//! receives the full descriptor and makes the final call on what to show.

use baac_client::ChatQuery;

use crate::catalog::Catalog;

/// Interrogative words in English, Tagalog, Ilocano, and Sambal
///
/// A prompt "mentions" one of these only when a whitespace-delimited token
/// equals the word exactly; "starts with" uses plain prefix matching.
pub const INTERROGATIVE_WORDS: &[&str] = &[
    "what", "where", "when", "why", "who", "how", "is", "are", "can", "could", "would", "should",
    "do", "does", "did", "ano", "sino", "saan", "pano", "papaano", "anya", "bakit", "ang", "ania",
    "asino", "ayan", "kaano", "apay", "kasano", "manu", "ayri", "ayti", "anta", "ongkot", "hino",
    "nakano", "makano",
];

/// Question openers that no single interrogative word covers
const COMPOUND_QUESTION_PREFIXES: &[&str] =
    &["how can", "how do", "how to", "what is", "where can", "when can"];

/// Keywords that signal an actionable request rather than a question
const REQUEST_KEYWORDS: &[&str] = &["request", "form", "get", "apply", "need"];

/// Classified view of one submitted prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentDescriptor {
    pub raw_text: String,
    /// First catalog name found in the text, if any
    pub matched_document_type: Option<String>,
    /// Text contains the literal substring "document"
    pub mentions_document_word: bool,
    /// Some token equals an interrogative word exactly
    pub mentions_interrogative: bool,
    /// Text opens with an interrogative word or compound question prefix
    pub starts_with_interrogative: bool,
    /// Looks like a request to act, not a question to answer
    pub is_direct_request: bool,
}

impl IntentDescriptor {
    /// Package this descriptor as the chat endpoint's query shape
    pub fn to_query(&self, chat_id: Option<i64>) -> ChatQuery {
        ChatQuery {
            prompt: self.raw_text.clone(),
            chat_id,
            is_direct_document_request: self.is_direct_request,
            contains_document_type: self.matched_document_type.is_some(),
            contains_document_word: self.mentions_document_word,
            contains_interrogative: self.mentions_interrogative,
            starts_with_interrogative: self.starts_with_interrogative,
            requested_doc_type: self.matched_document_type.clone(),
        }
    }
}

/// Classify a raw prompt against the document catalog
///
/// Always succeeds; a prompt with no document mention simply classifies as
/// not a request. Matching is case-insensitive throughout.
pub fn classify(raw_text: &str, catalog: &Catalog) -> IntentDescriptor {
    let lowered = raw_text.to_lowercase();

    let matched_document_type = catalog
        .match_in_text(raw_text)
        .map(|doc| doc.name.to_string());

    let mentions_document_word = lowered.contains("document");

    let mentions_interrogative = lowered
        .split_whitespace()
        .any(|token| INTERROGATIVE_WORDS.contains(&token));

    let starts_with_interrogative = INTERROGATIVE_WORDS
        .iter()
        .chain(COMPOUND_QUESTION_PREFIXES)
        .any(|prefix| lowered.starts_with(prefix));

    let wants_action = REQUEST_KEYWORDS.iter().any(|word| lowered.contains(word))
        || lowered.starts_with("i want")
        || lowered.starts_with("i need");

    // A prompt naming a document counts as a request unless it reads like a
    // question. Absence of any interrogative token is treated as request
    // evidence, which deliberately errs on the permissive side.
    let is_direct_request = matched_document_type.is_some()
        && !starts_with_interrogative
        && (wants_action || !mentions_interrogative);

    IntentDescriptor {
        raw_text: raw_text.to_string(),
        matched_document_type,
        mentions_document_word,
        mentions_interrogative,
        starts_with_interrogative,
        is_direct_request,
    }
}
