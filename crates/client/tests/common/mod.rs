//! Common test utilities for client integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup beyond the completion route (use wiremock directly)

use std::time::Duration;

#[allow(unused_imports)]
pub use selchord_client::{ChatClient, ClientError};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;
use wiremock::matchers::{header, method, path};

pub const TEST_KEY: &str = "sk-test-key";

/// Client pointed at `server` with a test key and fast settings.
#[allow(dead_code)]
pub fn client_for(server: &MockServer, max_retries: usize) -> ChatClient {
    ChatClient::builder()
        .base_url(format!("{}/v1/", server.uri()))
        .api_key(SecretString::new(TEST_KEY.to_string().into()))
        .model("gpt-4o")
        .timeout(Duration::from_secs(5))
        .max_retries(max_retries)
        .build()
        .expect("client builds")
}

/// Completion body with a single choice.
#[allow(dead_code)]
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

/// Mount a successful completion returning `content`.
#[allow(dead_code)]
pub async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {}", TEST_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(server)
        .await;
}
