//! Replay command: play a scripted session and print its timeline.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use selchord_config::Config;

use crate::desktop::Desktop;
use crate::handlers::{assistant_registry, echo_registry};
use crate::replay::{Script, Timeline, replay, timeline_desktop};
use crate::shutdown::Shutdown;

use super::bound_actions;

pub async fn run(config: &Config, script: &Path, echo: bool, shutdown: &Shutdown) -> Result<()> {
    let script = Script::load(script)?;
    tracing::info!(
        events = script.events.len(),
        echo,
        variant = config.variant.as_str(),
        "Replaying script"
    );

    let timeline = Timeline::new(true);
    let desktop: Arc<dyn Desktop> = Arc::new(timeline_desktop(&timeline));
    let actions = bound_actions(config);
    let registry = if echo {
        echo_registry(config.search_urls.clone(), desktop, actions)
    } else {
        assistant_registry(super::assistant(config)?, desktop, actions)
    };

    replay(config, &script, registry, timeline, shutdown.clone()).await
}
