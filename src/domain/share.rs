//! Share content composition and link helpers.
//!
//! Links are opaque strings. The only rewrite ever applied is appending a
//! time offset to a source video URL.

use crate::domain::entities::Prediction;
use serde::{Deserialize, Serialize};

/// Characters of the interpretation quoted in share text.
pub const SHARE_TEXT_CHARS: usize = 100;
/// Characters of the interpretation shown on the share card.
pub const CARD_TEXT_CHARS: usize = 180;
/// Quotes longer than this are collapsed until expanded.
pub const QUOTE_MAX_CHARS: usize = 200;

/// Payload handed to the native share capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareContent {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareContent {
    /// Compose share content for `prediction`. `origin` is the public site
    /// origin (no trailing slash required).
    pub fn for_prediction(prediction: &Prediction, origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        let site = origin
            .split("://")
            .nth(1)
            .unwrap_or(origin)
            .trim_start_matches("www.");
        Self {
            title: format!("Prediction by {}", prediction.expert.name),
            text: format!(
                "{}: \"{}...\" — checked at {}",
                prediction.expert.name,
                truncate_chars(&prediction.interpretation, SHARE_TEXT_CHARS),
                site
            ),
            url: format!("{}/prediction/{}", origin, prediction.id),
        }
    }

    /// Text placed on the clipboard when native share is unavailable.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.text, self.url)
    }

    pub fn whatsapp_link(&self) -> String {
        format!(
            "https://wa.me/?text={}",
            urlencoding::encode(&self.clipboard_text())
        )
    }

    pub fn telegram_link(&self) -> String {
        format!(
            "https://t.me/share/url?url={}&text={}",
            urlencoding::encode(&self.url),
            urlencoding::encode(&self.text)
        )
    }
}

/// Result of asking the platform to share. A cancel is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Cancelled,
}

/// How the share request was finally delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDelivery {
    Native,
    Clipboard,
    Cancelled,
}

/// Source URL with the time offset appended, when there is one.
pub fn source_link(prediction: &Prediction) -> String {
    match prediction.source_timestamp {
        Some(ts) if ts > 0 => {
            let sep = if prediction.source.contains('?') { '&' } else { '?' };
            format!("{}{}t={}", prediction.source, sep, ts)
        }
        _ => prediction.source.clone(),
    }
}

/// File name offered for a downloaded share card.
pub fn export_file_name(prediction: &Prediction, extension: &str) -> String {
    format!("prediction-{}.{}", prediction.id, extension)
}

/// First `max` characters of `s` (char boundary safe).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Quote as displayed: collapsed to [`QUOTE_MAX_CHARS`] plus an ellipsis
/// unless `expanded`.
pub fn displayed_quote(quote: &str, expanded: bool) -> String {
    if expanded || !is_long_quote(quote) {
        quote.to_string()
    } else {
        format!("{}...", truncate_chars(quote, QUOTE_MAX_CHARS))
    }
}

pub fn is_long_quote(quote: &str) -> bool {
    quote.chars().count() > QUOTE_MAX_CHARS
}

/// Interpretation as printed on the share card.
pub fn card_text(prediction: &Prediction) -> String {
    let text = &prediction.interpretation;
    if text.chars().count() > CARD_TEXT_CHARS {
        format!("{}...", truncate_chars(text, CARD_TEXT_CHARS))
    } else {
        text.clone()
    }
}
