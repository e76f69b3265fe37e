//! Shared test utilities for selchord integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory that prevents dotenv loading and
//!   host environment leakage.
//! - Write replay scripts and ticket files into temp directories.
//!
//! Invariants / Assumptions:
//! - No test touches the real clipboard or browser: `ask` runs with
//!   `--print-only`, ticket summaries with `--no-copy`.

use std::path::PathBuf;

use assert_cmd::Command;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "sk-test-key";

/// Returns a hermetic `selchord` command.
pub fn selchord_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selchord");

    cmd.env("DOTENV_DISABLED", "1");

    for var in [
        "SELCHORD_API_KEY",
        "OPENAI_API_KEY",
        "SELCHORD_BASE_URL",
        "SELCHORD_MODEL",
        "SELCHORD_TIMEOUT",
        "SELCHORD_MAX_RETRIES",
        "SELCHORD_VARIANT",
        "SELCHORD_WINDOW_MS",
        "SELCHORD_BINDINGS",
        "SELCHORD_PROFILE",
        "SELCHORD_CONFIG_PATH",
        "SELCHORD_OTLP_ENDPOINT",
        "SELCHORD_METRICS_BIND",
        "SELCHORD_LOG_DIR",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

/// Hermetic command pointed at `server` with a test key and no retries.
#[allow(dead_code)]
pub fn selchord_cmd_for(server: &MockServer) -> Command {
    let mut cmd = selchord_cmd();
    cmd.env("SELCHORD_BASE_URL", server.uri())
        .env("SELCHORD_API_KEY", TEST_KEY)
        .env("SELCHORD_MAX_RETRIES", "0");
    cmd
}

/// Completion body with a single choice.
#[allow(dead_code)]
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

/// Write `contents` to `name` inside `dir`.
#[allow(dead_code)]
pub fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}
