//! Classification of the ticket-search model reply.

use crate::actions::text::clean_keywords;

const ERROR_LOG_TAG: &str = "ERROR_LOG:";
const KEYWORDS_TAG: &str = "KEYWORDS:";

/// Maximum keywords kept for a ticket search.
pub const MAX_TICKET_KEYWORDS: usize = 4;

/// What the model decided the selection was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketQuery {
    /// An error message to search for verbatim.
    ErrorLog(String),
    /// A general issue reduced to keywords.
    Keywords(String),
}

impl TicketQuery {
    /// Parse a reply tagged `ERROR_LOG:` or `KEYWORDS:`. Untagged replies are
    /// treated as keywords.
    pub fn classify(reply: &str) -> Self {
        if let Some(rest) = reply.strip_prefix(ERROR_LOG_TAG) {
            Self::ErrorLog(rest.trim().to_string())
        } else if let Some(rest) = reply.strip_prefix(KEYWORDS_TAG) {
            Self::Keywords(clean_keywords(rest, MAX_TICKET_KEYWORDS))
        } else {
            Self::Keywords(clean_keywords(reply, MAX_TICKET_KEYWORDS))
        }
    }

    pub fn query(&self) -> &str {
        match self {
            Self::ErrorLog(q) | Self::Keywords(q) => q,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ErrorLog(_) => "error_log",
            Self::Keywords(_) => "keywords",
        }
    }
}
