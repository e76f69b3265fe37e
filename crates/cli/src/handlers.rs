//! Chord handlers that run actions and present their results.
//!
//! Responsibilities:
//! - Build a [`HandlerRegistry`] whose handlers call the [`Assistant`].
//! - Build an echo registry that skips the API, for scripted replays.
//! - Present an [`ActionResult`] through a [`Desktop`] and pick the outcome.
//!
//! Does NOT handle:
//! - Status reporting (the detector maps outcomes and errors to statuses).

use std::sync::Arc;

use anyhow::Result;
use selchord_client::actions::{build_search_url, messages};
use selchord_client::{ActionError, ActionResult, Assistant, Dialog};
use selchord_config::{ActionId, SearchUrls};
use selchord_core::{HandlerRegistry, Outcome};

use crate::desktop::Desktop;

/// Carry out `result` on `desktop`.
///
/// A failed clipboard write shows the text for manual copying and fails
/// the handler so the error status is shown.
pub fn present(action: ActionId, result: ActionResult, desktop: &dyn Desktop) -> Result<Outcome> {
    match result {
        ActionResult::Open { url, query } => {
            tracing::debug!(%action, %query, "Opening search");
            desktop.open_url(&url)?;
            Ok(Outcome::Success)
        }
        ActionResult::Copy { title, text } => match desktop.copy(&text) {
            Ok(()) => {
                desktop.dialog(&Dialog::new(title, text));
                Ok(Outcome::Copied)
            }
            Err(e) => {
                tracing::warn!(%action, error = %e, "Clipboard write failed");
                desktop.dialog(&Dialog::copy_failed(&text));
                Err(e)
            }
        },
        ActionResult::Show { title, text } => {
            desktop.dialog(&Dialog::new(title, text));
            Ok(Outcome::Success)
        }
        ActionResult::Variations { raw, variations } => {
            let body = if variations.is_empty() {
                raw
            } else {
                variations
                    .iter()
                    .map(|v| format!("{}\n{}", v.title, v.text))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            };
            desktop.dialog(&Dialog::new(messages::IMPROVE_TITLE, body));
            Ok(Outcome::Success)
        }
    }
}

/// Show the failure dialog for `err`, if it has one, and hand the error back.
fn report(action: ActionId, err: ActionError, desktop: &dyn Desktop) -> anyhow::Error {
    tracing::warn!(%action, error = %err, "Action failed");
    if let Some(dialog) = err.dialog(action) {
        desktop.dialog(&dialog);
    }
    anyhow::Error::from(err)
}

/// Handlers for `actions` that call the chat-completion API.
pub fn assistant_registry(
    assistant: Arc<Assistant>,
    desktop: Arc<dyn Desktop>,
    actions: impl IntoIterator<Item = ActionId>,
) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    for action in actions {
        let assistant = Arc::clone(&assistant);
        let desktop = Arc::clone(&desktop);
        registry.register(action, move |text: String| {
            let assistant = Arc::clone(&assistant);
            let desktop = Arc::clone(&desktop);
            async move {
                match assistant.run(action, &text).await {
                    Ok(result) => present(action, result, desktop.as_ref()),
                    Err(err) => Err(report(action, err, desktop.as_ref())),
                }
            }
        });
    }
    registry
}

/// The result an action would produce if the model echoed the selection back.
pub fn echo_result(
    action: ActionId,
    text: &str,
    urls: &SearchUrls,
) -> Result<ActionResult, ActionError> {
    let text = text.trim().to_string();
    let open = |prefix: &str, query: String| -> Result<ActionResult, ActionError> {
        let url = build_search_url(prefix, &query)?;
        Ok(ActionResult::Open { url, query })
    };

    match action {
        ActionId::ConfluenceSearch => open(&urls.confluence, text),
        ActionId::DocsSearch => open(&urls.docs, text),
        ActionId::TicketSearch => open(&urls.tickets, text),
        ActionId::InternalQuestion => Ok(ActionResult::Copy {
            title: messages::INTERNAL_COPIED,
            text,
        }),
        ActionId::Translate => Ok(ActionResult::Copy {
            title: messages::TRANSLATION_COPIED,
            text,
        }),
        ActionId::ImproveJapanese => Ok(ActionResult::Variations {
            raw: text,
            variations: Vec::new(),
        }),
        ActionId::TranslateJapanese => Ok(ActionResult::Show {
            title: messages::TRANSLATED_TO_JAPANESE,
            text,
        }),
        ActionId::TranslateChinese => Ok(ActionResult::Show {
            title: messages::TRANSLATED_TO_CHINESE,
            text,
        }),
    }
}

/// Handlers for `actions` that present [`echo_result`] without network access.
pub fn echo_registry(
    urls: SearchUrls,
    desktop: Arc<dyn Desktop>,
    actions: impl IntoIterator<Item = ActionId>,
) -> HandlerRegistry {
    let urls = Arc::new(urls);
    let mut registry = HandlerRegistry::new();
    for action in actions {
        let urls = Arc::clone(&urls);
        let desktop = Arc::clone(&desktop);
        registry.register(action, move |text: String| {
            let result = echo_result(action, &text, &urls);
            let desktop = Arc::clone(&desktop);
            async move {
                match result {
                    Ok(result) => present(action, result, desktop.as_ref()),
                    Err(err) => Err(report(action, err, desktop.as_ref())),
                }
            }
        });
    }
    registry
}
