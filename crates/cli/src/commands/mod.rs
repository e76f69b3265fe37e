//! CLI command implementations.

pub mod ask;
pub mod bindings;
pub mod replay;
pub mod run;
pub mod ticket_summary;

use std::sync::Arc;

use anyhow::Result;
use selchord_client::{Assistant, ChatClient, MetricsCollector};
use selchord_config::{ActionId, Config};

/// Distinct actions bound in `config`, in binding order.
pub fn bound_actions(config: &Config) -> Vec<ActionId> {
    let mut actions = Vec::new();
    for spec in &config.bindings {
        if !actions.contains(&spec.action) {
            actions.push(spec.action);
        }
    }
    actions
}

/// Assistant over a client built from `config`.
pub fn assistant(config: &Config) -> Result<Arc<Assistant>> {
    let client = ChatClient::builder()
        .from_config(config)
        .metrics(MetricsCollector::new())
        .build()?;

    if !client.has_api_key() {
        tracing::warn!("No API key configured; actions will fail until one is set");
    }

    Ok(Arc::new(Assistant::new(
        client,
        config.search_urls.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use selchord_config::{BindingSpec, PhysicalKey, Variant};

    #[test]
    fn test_bound_actions_dedupes() {
        let mut config = Config::for_variant(Variant::General);
        config.bindings.push(BindingSpec {
            key: PhysicalKey::Letter('K'),
            action: ActionId::TranslateJapanese,
        });
        assert_eq!(
            bound_actions(&config),
            vec![ActionId::TranslateJapanese, ActionId::TranslateChinese]
        );
    }
}
