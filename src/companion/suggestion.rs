use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Marker that opens a suggestion directive line in model output
pub const SUGGESTION_MARKER: &str = "Suggestion: ";

/// Body returned when nothing but a directive (or nothing at all) was generated
pub const FALLBACK_BODY: &str = "I seem to have lost my train of thought. Could you ask again?";

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\(URL:\s*(.*)\)$").expect("valid URL suggestion pattern"));
static QUERY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\(QUERY:\s*(.*)\)$").expect("valid QUERY suggestion pattern"));

/// Follow-up action attached to a companion reply.
///
/// Serialized untagged so the presentation layer sees either
/// `{label, url}` or `{label, query}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestedAction {
    Navigation { label: String, url: String },
    Query { label: String, query: String },
}

impl SuggestedAction {
    pub fn label(&self) -> &str {
        match self {
            SuggestedAction::Navigation { label, .. } | SuggestedAction::Query { label, .. } => {
                label
            }
        }
    }
}

/// Model output split into displayable text and an optional action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub body: String,
    pub suggested_action: Option<SuggestedAction>,
}

/// Split raw model text into a reply body and at most one suggested action.
///
/// Only the first line whose trimmed form starts with [`SUGGESTION_MARKER`]
/// is read as a directive; later ones stay in the body verbatim. A directive
/// that matches neither bracketed form is consumed without producing an
/// action. The body is never empty: [`FALLBACK_BODY`] replaces it.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let mut body_lines: Vec<&str> = Vec::new();
    let mut payload: Option<&str> = None;

    for line in raw.split('\n') {
        let trimmed = line.trim();
        match trimmed.strip_prefix(SUGGESTION_MARKER) {
            Some(rest) if payload.is_none() => payload = Some(rest.trim()),
            _ => body_lines.push(line),
        }
    }

    let suggested_action = payload.and_then(|text| {
        let action = parse_suggestion(text);
        if action.is_none() {
            warn!("Could not parse suggestion format: {}", text);
        }
        action
    });

    let mut body = body_lines.join("\n").trim().to_string();
    if body.is_empty() {
        error!(
            "Parsing model output left an empty response body. Raw output: {:?}",
            raw
        );
        body = FALLBACK_BODY.to_string();
    }

    ParsedReply {
        body,
        suggested_action,
    }
}

/// Match a directive payload against the navigation form, then the query form
pub fn parse_suggestion(payload: &str) -> Option<SuggestedAction> {
    if let Some(caps) = URL_PATTERN.captures(payload) {
        return Some(SuggestedAction::Navigation {
            label: caps[1].trim().to_string(),
            url: caps[2].trim().to_string(),
        });
    }

    QUERY_PATTERN
        .captures(payload)
        .map(|caps| SuggestedAction::Query {
            label: caps[1].trim().to_string(),
            query: caps[2].trim().to_string(),
        })
}
