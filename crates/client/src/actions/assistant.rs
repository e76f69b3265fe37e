//! Runs an action end to end: prompt, completion, post-processing.

use selchord_config::{ActionId, SearchUrls};
use tracing::{debug, info};

use crate::actions::messages;
use crate::actions::prompts::prompt_for;
use crate::actions::search::build_search_url;
use crate::actions::text::{clean_keywords, strip_surrounding_quotes, truncate_at_word_boundary};
use crate::actions::ticket_query::TicketQuery;
use crate::actions::variations::{Variation, extract_variations};
use crate::actions::ActionError;
use crate::client::ChatClient;

const MAX_DOCS_KEYWORDS: usize = 3;

/// What a host should do with a finished action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Open `url` in a browser.
    Open { url: String, query: String },
    /// Put `text` on the clipboard, then confirm with a dialog titled `title`.
    Copy { title: &'static str, text: String },
    /// Show `text` in a dialog that offers a copy button.
    Show { title: &'static str, text: String },
    /// Show the improved rewrites. `raw` is the full reply, shown when no
    /// sections could be parsed.
    Variations {
        raw: String,
        variations: Vec<Variation>,
    },
}

impl ActionResult {
    /// Whether completing this result involves the clipboard.
    pub fn copies(&self) -> bool {
        matches!(self, Self::Copy { .. })
    }
}

/// Executes actions against a [`ChatClient`].
#[derive(Debug)]
pub struct Assistant {
    client: ChatClient,
    urls: SearchUrls,
}

impl Assistant {
    pub fn new(client: ChatClient, urls: SearchUrls) -> Self {
        Self { client, urls }
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    /// Run `action` over `text`.
    ///
    /// # Errors
    /// Client failures, an empty model reply, or a search URL over the
    /// length limit.
    pub async fn run(&self, action: ActionId, text: &str) -> Result<ActionResult, ActionError> {
        let prompt = prompt_for(action, text);
        let reply = self
            .client
            .complete(prompt.system, &prompt.user, prompt.temperature)
            .await?
            .ok_or(ActionError::EmptyResult { action })?;

        debug!(%action, reply_chars = reply.chars().count(), "Action reply received");

        let result = match action {
            ActionId::ConfluenceSearch => {
                let question = strip_surrounding_quotes(&reply);
                let query = truncate_at_word_boundary(&question, 100, 50);
                self.open(action, &self.urls.confluence, query)?
            }
            ActionId::DocsSearch => {
                let keywords = clean_keywords(&strip_surrounding_quotes(&reply), MAX_DOCS_KEYWORDS);
                let query = truncate_at_word_boundary(&keywords, 80, 30);
                self.open(action, &self.urls.docs, query)?
            }
            ActionId::TicketSearch => {
                let classified = TicketQuery::classify(&reply);
                debug!(kind = classified.kind(), "Ticket query classified");
                let query = truncate_at_word_boundary(classified.query(), 150, 50);
                self.open(action, &self.urls.tickets, query)?
            }
            ActionId::InternalQuestion => ActionResult::Copy {
                title: messages::INTERNAL_COPIED,
                text: reply,
            },
            ActionId::Translate => ActionResult::Copy {
                title: messages::TRANSLATION_COPIED,
                text: reply,
            },
            ActionId::ImproveJapanese => ActionResult::Variations {
                variations: extract_variations(&reply),
                raw: reply,
            },
            ActionId::TranslateJapanese => ActionResult::Show {
                title: messages::TRANSLATED_TO_JAPANESE,
                text: reply,
            },
            ActionId::TranslateChinese => ActionResult::Show {
                title: messages::TRANSLATED_TO_CHINESE,
                text: reply,
            },
        };

        info!(%action, "Action completed");
        Ok(result)
    }

    fn open(
        &self,
        action: ActionId,
        prefix: &str,
        query: String,
    ) -> Result<ActionResult, ActionError> {
        if query.trim().is_empty() {
            return Err(ActionError::EmptyResult { action });
        }
        let url = build_search_url(prefix, &query)?;
        Ok(ActionResult::Open { url, query })
    }
}
