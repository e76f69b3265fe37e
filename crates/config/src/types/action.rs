//! Action identifiers for chord bindings.
//!
//! Responsibilities:
//! - Name every task a chord can trigger (`ActionId`).
//! - Provide stable kebab-case identifiers for env vars, profiles and the CLI.
//!
//! Does NOT handle:
//! - Executing actions (see the client crate's `actions` module).
//! - Mapping actions to physical keys (see `Variant::default_bindings`).
//!
//! Invariants:
//! - `Display`, `FromStr` and serde all use the same kebab-case identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A task that a recognized chord can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    /// Translate the selection into Japanese.
    TranslateJapanese,
    /// Translate the selection into Traditional Chinese.
    TranslateChinese,
    /// Turn the selection into a short question and open a wiki search.
    ConfluenceSearch,
    /// Rewrite the selection as an internal Question/Background post.
    InternalQuestion,
    /// Extract English keywords and open a documentation search.
    DocsSearch,
    /// Extract an error log or keywords and open a ticket search.
    TicketSearch,
    /// Offer three improved variations of Japanese text.
    ImproveJapanese,
    /// Auto-detect Japanese or English and translate to the other.
    Translate,
}

impl ActionId {
    /// Every action, in display order.
    pub const ALL: [ActionId; 8] = [
        ActionId::TranslateJapanese,
        ActionId::TranslateChinese,
        ActionId::ConfluenceSearch,
        ActionId::InternalQuestion,
        ActionId::DocsSearch,
        ActionId::TicketSearch,
        ActionId::ImproveJapanese,
        ActionId::Translate,
    ];

    /// Stable kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TranslateJapanese => "translate-japanese",
            Self::TranslateChinese => "translate-chinese",
            Self::ConfluenceSearch => "confluence-search",
            Self::InternalQuestion => "internal-question",
            Self::DocsSearch => "docs-search",
            Self::TicketSearch => "ticket-search",
            Self::ImproveJapanese => "improve-japanese",
            Self::Translate => "translate",
        }
    }

    /// Short human-readable description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TranslateJapanese => "Translate selection to Japanese",
            Self::TranslateChinese => "Translate selection to Traditional Chinese",
            Self::ConfluenceSearch => "Search the wiki with a generated question",
            Self::InternalQuestion => "Draft an internal question and copy it",
            Self::DocsSearch => "Search the documentation with extracted keywords",
            Self::TicketSearch => "Search tickets by error log or keywords",
            Self::ImproveJapanese => "Suggest three improved Japanese variations",
            Self::Translate => "Translate between Japanese and English and copy it",
        }
    }

    /// Context label used in failure dialogs ("<context> processing failed").
    pub fn context_label(&self) -> &'static str {
        match self {
            Self::TranslateJapanese | Self::TranslateChinese | Self::Translate => "Translation",
            Self::ConfluenceSearch => "Wiki search",
            Self::InternalQuestion => "Question drafting",
            Self::DocsSearch => "Docs search",
            Self::TicketSearch => "Ticket search",
            Self::ImproveJapanese => "Japanese improvement",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an action identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}'")]
pub struct UnknownActionError(pub String);

impl FromStr for ActionId {
    type Err = UnknownActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == needle)
            .ok_or_else(|| UnknownActionError(s.to_string()))
    }
}
