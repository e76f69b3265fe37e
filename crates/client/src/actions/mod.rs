//! The tasks a chord can run, expressed over the chat-completion client.
//!
//! Responsibilities:
//! - Render each action's prompt ([`prompts`]).
//! - Turn model replies into search URLs, clipboard text or dialogs.
//! - Describe user-facing failure dialogs.
//!
//! Does NOT handle:
//! - Opening browsers, touching the clipboard or rendering dialogs (hosts do).
//! - Status reporting (the detector maps handler outcomes to statuses).

mod assistant;
pub mod prompts;
pub mod search;
pub mod text;
pub mod ticket_query;
pub mod variations;

pub use assistant::{ActionResult, Assistant};
pub use prompts::{Prompt, prompt_for};
pub use search::build_search_url;
pub use ticket_query::TicketQuery;
pub use variations::{Variation, extract_variations};

use selchord_config::ActionId;
use thiserror::Error;

use crate::error::ClientError;

/// Dialog titles and bodies shown by hosts.
pub mod messages {
    pub const INTERNAL_COPIED: &str = "Question to TEE  (copied to clipboard)";
    pub const TRANSLATION_COPIED: &str = "Translated text (copied to clipboard)";
    pub const TRANSLATED_TO_JAPANESE: &str = "Translated to Japanese";
    pub const TRANSLATED_TO_CHINESE: &str = "Translated to Traditional Chinese";
    pub const IMPROVE_TITLE: &str = "Japanese Text Improvement - 3 Variations";
}

/// A modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub body: String,
}

impl Dialog {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Shown when the clipboard could not be written.
    pub fn copy_failed(text: &str) -> Self {
        Self::new("Copy failed", format!("Please copy manually:\n\n{}", text))
    }
}

/// Why an action produced nothing to show.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The model reply was empty, or nothing was left after cleaning it.
    #[error("{action} produced no usable result")]
    EmptyResult { action: ActionId },

    #[error("Search URL too long ({len} characters)")]
    QueryTooLong { len: usize },
}

impl ActionError {
    /// Failures of the API call itself (credentials, upstream status).
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_api_error())
    }

    /// Dialog to show for this failure, if any. An empty result only
    /// surfaces through the error status.
    pub fn dialog(&self, action: ActionId) -> Option<Dialog> {
        let translator = matches!(
            action,
            ActionId::TranslateJapanese | ActionId::TranslateChinese
        );

        match self {
            Self::EmptyResult { .. } => None,
            Self::QueryTooLong { .. } => Some(Dialog::new(
                "Search Error",
                "Search query too long, please try selecting shorter text",
            )),
            _ if self.is_api_error() && translator => Some(Dialog::new(
                "API Error",
                "ChatGPT API call failed. Please check your API key configuration.",
            )),
            _ if self.is_api_error() => Some(Dialog::new(
                "API Error",
                "ChatGPT API call failed, please check API Key settings",
            )),
            _ if translator => Some(Dialog::new(
                "Translation Error",
                "Translation failed. Please try again.",
            )),
            _ => Some(Dialog::new(
                "Error",
                format!(
                    "{} processing failed, please try again",
                    action.context_label()
                ),
            )),
        }
    }
}
