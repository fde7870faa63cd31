use calc_client::{ErrorKind, Outcome, config::ApiConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_partial_json, header, method, path},
};

mod common;

use common::test_utils::{CALC_PATH, api_config, filled_page, harness, unreachable_config};

#[test_log::test(tokio::test)]
async fn test_success_writes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALC_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"a": 3.0, "b": 4.0, "op": "add"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("3", "4", ""));
    let outcome = h.handler.calculate("add").await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Resolved {
            text: "7".to_string()
        }
    );
    assert_eq!(h.page.text_content("result"), Some("7".to_string()));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_server_error_shows_body_and_keeps_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALC_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("division by zero"))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("1", "0", "42"));
    let outcome = h.handler.calculate("div").await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Failed {
            kind: ErrorKind::Server,
            message: "Erreur : division by zero".to_string()
        }
    );
    assert_eq!(h.notifier.messages(), vec!["Erreur : division by zero"]);
    assert_eq!(h.page.text_content("result"), Some("42".to_string()));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALC_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Erreur stockage DB"))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("1", "2", ""));
    h.handler.calculate("add").await.unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_notifies_without_mutation() {
    let h = harness(&unreachable_config(), filled_page("3", "4", "unchanged"));
    let outcome = h.handler.calculate("add").await.unwrap();

    let Outcome::Failed { kind, message } = outcome.clone() else {
        panic!("expected a failure, got {:?}", outcome);
    };
    assert_eq!(kind, ErrorKind::TransportOrParse);
    assert!(message.starts_with("Erreur réseau ou serveur : Network error"));
    assert!(message.len() > "Erreur réseau ou serveur : ".len());
    assert_eq!(h.notifier.messages(), vec![message]);
    assert_eq!(h.page.text_content("result"), Some("unchanged".to_string()));
}

#[tokio::test]
async fn test_malformed_json_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("3", "4", ""));
    let outcome = h.handler.calculate("add").await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed { kind: ErrorKind::TransportOrParse, ref message }
            if message.starts_with("Erreur réseau ou serveur : Decode error")
    ));
    assert_eq!(h.page.text_content("result"), Some(String::new()));
}

#[tokio::test]
async fn test_missing_result_field_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 7})))
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("3", "4", ""));
    let outcome = h.handler.calculate("add").await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed {
            kind: ErrorKind::TransportOrParse,
            ..
        }
    ));
    assert_eq!(h.notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_empty_operand_is_sent_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALC_PATH))
        .and(body_json(json!({"a": null, "b": 4.0, "op": "add"})))
        .respond_with(ResponseTemplate::new(400).set_body_string("Entrée invalide"))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("", "4", ""));
    let outcome = h.handler.calculate("add").await.unwrap();

    // The server decides what a missing operand means
    assert_eq!(
        outcome,
        Outcome::Failed {
            kind: ErrorKind::Server,
            message: "Erreur : Entrée invalide".to_string()
        }
    );
}

#[tokio::test]
async fn test_operator_is_passed_through_unchecked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALC_PATH))
        .and(body_partial_json(json!({"op": "pow"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "8"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("2", "3", ""));
    let outcome = h.handler.calculate("pow").await.unwrap();

    assert!(outcome.is_resolved());
    assert_eq!(h.page.text_content("result"), Some("8".to_string()));
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"op": "add"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 7})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"op": "mul"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("3", "4", ""));
    let first = h.handler.clone();
    let second = h.handler.clone();

    let (add, mul) = tokio::join!(first.calculate("add"), second.calculate("mul"));

    assert!(add.unwrap().is_resolved());
    assert!(mul.unwrap().is_resolved());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);

    // Either response may land last
    let final_text = h.page.text_content("result").unwrap();
    assert!(final_text == "7" || final_text == "12", "got {}", final_text);
}

#[tokio::test]
async fn test_last_resolved_response_wins_over_last_issued() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"op": "add"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": 7}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"op": "sub"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": -1})))
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("3", "4", ""));
    let slow = tokio::spawn({
        let handler = h.handler.clone();
        async move { handler.calculate("add").await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Issued second, resolves first
    let fast = h.handler.calculate("sub").await.unwrap();
    assert!(fast.is_resolved());
    assert_eq!(h.page.text_content("result"), Some("-1".to_string()));

    slow.await.unwrap().unwrap();
    assert_eq!(h.page.text_content("result"), Some("7".to_string()));
}

#[tokio::test]
async fn test_configured_timeout_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": 1}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ApiConfig {
        timeout_secs: Some(1),
        ..api_config(&server)
    };
    let h = harness(&config, filled_page("0", "1", ""));
    let outcome = h.handler.calculate("add").await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed {
            kind: ErrorKind::TransportOrParse,
            ..
        }
    ));
    assert_eq!(h.page.text_content("result"), Some(String::new()));
}

#[tokio::test]
async fn test_callback_drives_handler() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"a": 10.0, "b": 4.0, "op": "sub"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 6})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&api_config(&server), filled_page("10", "4", ""));
    let callback = h.handler.clone().into_callback();

    let outcome = callback("sub".to_string()).await.unwrap();
    assert!(outcome.is_resolved());
    assert_eq!(h.page.text_content("result"), Some("6".to_string()));
}
