//! HTTP messaging gateway tests
//!
//! Exercises the outbound email and SMS gateways against a mock provider.

use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use FlockKeeper::config::settings::{EmailConfig, SmsConfig};
use FlockKeeper::services::{EmailSender, HttpEmailSender, HttpSmsGateway, SmsGateway};
use FlockKeeper::utils::errors::DeliveryError;

fn email_config(base_url: &str) -> EmailConfig {
    EmailConfig {
        api_url: base_url.to_string(),
        api_key: "mail-key".to_string(),
        from_address: "no-reply@gracechapel.org".to_string(),
        timeout_seconds: 5,
    }
}

fn sms_config(base_url: &str) -> SmsConfig {
    SmsConfig {
        api_url: base_url.to_string(),
        api_key: "sms-key".to_string(),
        from_number: "+15550001111".to_string(),
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_email_sender_posts_payload_with_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("authorization", "Bearer mail-key"))
        .and(body_partial_json(serde_json::json!({
            "from": "no-reply@gracechapel.org",
            "to": "ana@example.org",
            "subject": "Welcome"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let sender = HttpEmailSender::new(email_config(&server.uri())).unwrap();
    let result = sender.send_email("ana@example.org", "Welcome", "Glad you came!").await;

    tokio_test::assert_ok!(result);
}

#[tokio::test]
async fn test_email_sender_maps_client_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid address"))
        .mount(&server)
        .await;

    let sender = HttpEmailSender::new(email_config(&server.uri())).unwrap();
    let result = sender.send_email("broken", "Subject", "Body").await;

    match result {
        Err(DeliveryError::RequestFailed(message)) => {
            assert!(message.contains("422"));
            assert!(message.contains("invalid address"));
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_email_sender_maps_server_errors_to_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sender = HttpEmailSender::new(email_config(&server.uri())).unwrap();
    let result = sender.send_email("ana@example.org", "S", "B").await;

    assert!(matches!(result, Err(DeliveryError::GatewayUnavailable)));
}

#[tokio::test]
async fn test_sms_gateway_sends_plain_sms() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("authorization", "Bearer sms-key"))
        .and(body_partial_json(serde_json::json!({
            "from": "+15550001111",
            "to": "+15558675309",
            "body": "Service moved to 11am"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpSmsGateway::new(sms_config(&server.uri())).unwrap();
    let result = gateway.send_sms("+15558675309", "Service moved to 11am", None).await;

    tokio_test::assert_ok!(result);
}

#[tokio::test]
async fn test_mms_includes_media_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_partial_json(serde_json::json!({
            "media_url": "https://cdn.example/flyer.jpg"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpSmsGateway::new(sms_config(&server.uri())).unwrap();
    let result = gateway
        .send_sms("+15558675309", "See the flyer", Some("https://cdn.example/flyer.jpg"))
        .await;

    assert!(result.is_ok());
}
