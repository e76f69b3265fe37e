//! End-to-end action tests: prompt, mocked completion, post-processing.

mod common;

use common::*;
use selchord_client::{ActionError, ActionResult, Assistant};
use selchord_config::{ActionId, SearchUrls};
use wiremock::matchers::{body_string_contains, method, path};

fn urls() -> SearchUrls {
    SearchUrls {
        confluence: "https://wiki.example.com/search?text=".to_string(),
        docs: "https://docs.example.com/search?q=".to_string(),
        tickets: "https://tickets.example.com/search?q=".to_string(),
    }
}

async fn assistant_replying(content: &str) -> (MockServer, Assistant) {
    let server = MockServer::start().await;
    mount_completion(&server, content).await;
    let assistant = Assistant::new(client_for(&server, 0), urls());
    (server, assistant)
}

#[tokio::test]
async fn test_confluence_search_strips_quotes_and_encodes() {
    let (_server, assistant) = assistant_replying("\"How do I enable APM?\"").await;

    let result = assistant
        .run(ActionId::ConfluenceSearch, "APM is not working")
        .await
        .unwrap();

    assert_eq!(
        result,
        ActionResult::Open {
            url: "https://wiki.example.com/search?text=How%20do%20I%20enable%20APM%3F".to_string(),
            query: "How do I enable APM?".to_string(),
        }
    );
}

#[tokio::test]
async fn test_docs_search_caps_keywords() {
    let (_server, assistant) = assistant_replying("'Log, Explorer' logs missing").await;

    let result = assistant.run(ActionId::DocsSearch, "ログが表示されない").await.unwrap();
    let ActionResult::Open { query, url } = result else {
        panic!("expected a search URL");
    };
    assert_eq!(query, "Log Explorer logs");
    assert!(url.starts_with("https://docs.example.com/search?q=Log%20Explorer%20logs"));
}

#[tokio::test]
async fn test_ticket_search_uses_error_log_verbatim() {
    let (_server, assistant) =
        assistant_replying("ERROR_LOG: rpc error: code = Unknown desc = database not open").await;

    let result = assistant.run(ActionId::TicketSearch, "logs...").await.unwrap();
    let ActionResult::Open { query, .. } = result else {
        panic!("expected a search URL");
    };
    assert_eq!(query, "rpc error: code = Unknown desc = database not open");
}

#[tokio::test]
async fn test_ticket_search_truncates_long_error() {
    let long = format!("ERROR_LOG:{}", "segment ".repeat(40));
    let (_server, assistant) = assistant_replying(&long).await;

    let ActionResult::Open { query, .. } = assistant.run(ActionId::TicketSearch, "x").await.unwrap()
    else {
        panic!("expected a search URL");
    };
    assert!(query.ends_with("..."));
    assert!(query.chars().count() <= 153);
}

#[tokio::test]
async fn test_internal_question_is_copied() {
    let reply = "Question: How can we fix it?\n\nThank you for your help in advance!";
    let (_server, assistant) = assistant_replying(reply).await;

    let result = assistant.run(ActionId::InternalQuestion, "broken").await.unwrap();
    assert!(result.copies());
    assert_eq!(
        result,
        ActionResult::Copy {
            title: "Question to TEE  (copied to clipboard)",
            text: reply.to_string(),
        }
    );
}

#[tokio::test]
async fn test_improve_japanese_returns_variations() {
    let reply = "【バリエーション1：標準】\n一\n【バリエーション2：丁寧】\n二\n【バリエーション3：簡潔】\n三";
    let (_server, assistant) = assistant_replying(reply).await;

    let ActionResult::Variations { variations, raw } =
        assistant.run(ActionId::ImproveJapanese, "文").await.unwrap()
    else {
        panic!("expected variations");
    };
    assert_eq!(raw, reply);
    let texts: Vec<_> = variations.iter().map(|v| v.text.as_str()).collect();
    assert_eq!(texts, ["一", "二", "三"]);
}

#[tokio::test]
async fn test_translate_chinese_prompt_and_dialog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("繁體中文"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("你好")))
        .expect(1)
        .mount(&server)
        .await;
    let assistant = Assistant::new(client_for(&server, 0), urls());

    let result = assistant.run(ActionId::TranslateChinese, "hello").await.unwrap();
    assert_eq!(
        result,
        ActionResult::Show {
            title: "Translated to Traditional Chinese",
            text: "你好".to_string(),
        }
    );
}

#[tokio::test]
async fn test_blank_reply_is_empty_result() {
    let (_server, assistant) = assistant_replying("   ").await;
    let err = assistant.run(ActionId::DocsSearch, "x").await.unwrap_err();
    assert!(matches!(
        err,
        ActionError::EmptyResult {
            action: ActionId::DocsSearch
        }
    ));
    assert!(err.dialog(ActionId::DocsSearch).is_none());
}

#[tokio::test]
async fn test_keywords_cleaned_to_nothing_is_empty_result() {
    let (_server, assistant) = assistant_replying("\"\" , ''").await;
    let err = assistant.run(ActionId::DocsSearch, "x").await.unwrap_err();
    assert!(matches!(err, ActionError::EmptyResult { .. }));
}

#[tokio::test]
async fn test_over_long_url_is_rejected() {
    let server = MockServer::start().await;
    mount_completion(&server, &"あ".repeat(99)).await;

    let confluence = format!("https://wiki.example.com/search?text={}", "p".repeat(1200));
    let assistant = Assistant::new(
        client_for(&server, 0),
        SearchUrls {
            confluence,
            ..urls()
        },
    );

    let err = assistant.run(ActionId::ConfluenceSearch, "x").await.unwrap_err();
    assert!(matches!(err, ActionError::QueryTooLong { .. }));
    assert_eq!(
        err.dialog(ActionId::ConfluenceSearch).unwrap().body,
        "Search query too long, please try selecting shorter text"
    );
}
