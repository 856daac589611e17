//! tests/api/helpers.rs
use brevo_mailer::configuration::HostSettings;
use brevo_mailer::domain::Mailbox;
use brevo_mailer::email::Brevo;
use brevo_mailer::host::{HostConfiguration, HostSender, OperatorIdentity};
use brevo_mailer::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::sync::Arc;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Set TEST_LOG=true to see logs during tests
    // Use bunyan to format the logs nicely:
    // $ TEST_LOG=true cargo test | bunyan
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

#[derive(Clone)]
pub struct StubHost {
    pub sender: HostSender,
    pub operator: Option<Mailbox>,
}

impl Default for StubHost {
    fn default() -> Self {
        Self {
            sender: HostSender {
                email: "billing@acme.test".to_string(),
                company_name: "Acme Hosting".to_string(),
            },
            operator: Some(Mailbox::new("admin@acme.test", "Ada Admin")),
        }
    }
}

impl HostConfiguration for StubHost {
    fn default_sender(&self) -> HostSender {
        self.sender.clone()
    }
}

impl OperatorIdentity for StubHost {
    fn current_operator(&self) -> Option<Mailbox> {
        self.operator.clone()
    }
}

pub struct Test {
    pub email_server: MockServer,
    pub brevo: Brevo,
    pub api_key: String,
}

impl Test {
    /// Module settings pointing at the mock server, plus `extra`.
    pub fn settings(&self, extra: &[(&str, &str)]) -> HostSettings {
        let mut settings = HostSettings::new();
        settings.insert("api_key".into(), self.api_key.clone());
        settings.insert(
            "api_url".into(),
            format!("{}/v3/smtp/email", self.email_server.uri()),
        );
        settings.insert("timeout_milliseconds".into(), "500".into());
        for (key, value) in extra {
            settings.insert(key.to_string(), value.to_string());
        }
        settings
    }

    pub async fn received_email(&self) -> serde_json::Value {
        let email_request = self.email_server.received_requests().await.unwrap();
        let email_request = if email_request.len() == 1 {
            &email_request[0]
        } else {
            panic!(
                "Expected 1 email to be sent but instead {} were sent.",
                email_request.len()
            );
        };

        serde_json::from_slice(&email_request.body).expect("Failed to parse email")
    }
}

pub async fn setup() -> Test {
    setup_with(StubHost::default()).await
}

pub async fn setup_with(host: StubHost) -> Test {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let host = Arc::new(host);
    let brevo = Brevo::new(host.clone(), host);

    Test {
        email_server,
        brevo,
        api_key: "xkeysib-integration".to_string(),
    }
}
