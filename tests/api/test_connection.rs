//! tests/api/test_connection.rs
use crate::helpers::{setup, setup_with, StubHost};
use brevo_mailer::configuration::ConfigurationError;
use brevo_mailer::email::DispatchError;
use brevo_mailer::host::{HostSender, SenderModule};
use claims::{assert_err, assert_matches, assert_ok};
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_connection_emails_the_current_operator() {
    // Arrange
    let app = setup().await;
    Mock::given(method("POST"))
        .and(path("/v3/smtp/email"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"messageId": "<1@relay>"})))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let outcome = app.brevo.test_connection(&app.settings(&[])).await;

    // Assert
    let outcome = assert_ok!(outcome);
    assert!(outcome.success);

    let email = app.received_email().await;
    assert_eq!(
        email["to"],
        json!([{"email": "admin@acme.test", "name": "Ada Admin"}])
    );
    assert_eq!(
        email["sender"],
        json!({"email": "billing@acme.test", "name": "Acme Hosting"})
    );
    assert_eq!(email["subject"], "Brevo Test Connection");
    assert!(email["htmlContent"]
        .as_str()
        .unwrap()
        .ends_with(app.brevo.branding_footer()));
}

#[tokio::test]
async fn test_connection_needs_a_signed_in_operator() {
    let app = setup_with(StubHost {
        operator: None,
        ..StubHost::default()
    })
    .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let error = assert_err!(app.brevo.test_connection(&app.settings(&[])).await);

    assert_matches!(
        error.dispatch_error(),
        DispatchError::Configuration(ConfigurationError::MissingOperator)
    );
}

#[tokio::test]
async fn test_connection_fails_when_the_host_has_no_sender_email() {
    let app = setup_with(StubHost {
        sender: HostSender {
            email: String::new(),
            company_name: "Acme Hosting".to_string(),
        },
        ..StubHost::default()
    })
    .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let error = assert_err!(app.brevo.test_connection(&app.settings(&[])).await);

    assert_matches!(
        error.dispatch_error(),
        DispatchError::Configuration(ConfigurationError::MissingHostEmail)
    );
}

#[tokio::test]
async fn test_connection_wraps_provider_rejections() {
    let app = setup().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"code": "unauthorized", "message": "Key not found"})),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let error = assert_err!(app.brevo.test_connection(&app.settings(&[])).await);

    assert_eq!(error.to_string(), "Connection test failed: Key not found");
}
