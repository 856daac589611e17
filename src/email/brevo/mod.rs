//! src/email/brevo/mod.rs
use crate::configuration::{ConfigurationError, HostSettings, ProviderConfig};
use crate::domain::{resolve_sender, Mailbox, OutboundMessage};
use crate::host::{
    AuthorInfo, FieldType, HostConfiguration, OperatorIdentity, SenderModule, SettingField,
    TestConnectionOutcome,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

mod client;
pub use client::{EmailClient, RequestError};

mod email;
pub use email::{
    branding_footer, build_payload, strip_tags, Address, AttachmentReadError, EncodedAttachment,
    ProviderRequest,
};

mod error;
pub use error::{ConnectionTestError, DispatchError, SendFailure};

const MODULE_NAME: &str = "Brevo";
const AUTHOR: &str = "Rohmat Ali Wardani";
const AUTHOR_URL: &str = "https://www.linkedin.com/in/rohmat-ali-wardani/";
const TEST_SUBJECT: &str = "Brevo Test Connection";

pub struct Brevo {
    http_client: Client,
    host: Arc<dyn HostConfiguration>,
    operator: Arc<dyn OperatorIdentity>,
    branding_footer: String,
}

impl Brevo {
    pub fn new(host: Arc<dyn HostConfiguration>, operator: Arc<dyn OperatorIdentity>) -> Self {
        Self::with_client(Client::new(), host, operator)
    }

    pub fn with_client(
        http_client: Client,
        host: Arc<dyn HostConfiguration>,
        operator: Arc<dyn OperatorIdentity>,
    ) -> Self {
        Self {
            http_client,
            host,
            operator,
            branding_footer: branding_footer(AUTHOR, AUTHOR_URL),
        }
    }

    pub fn branding_footer(&self) -> &str {
        &self.branding_footer
    }

    /// Resolves the sender, checks the message, builds the payload and posts
    /// it. One request at most, never retried.
    #[tracing::instrument(
        name = "Dispatch email to Brevo",
        skip_all,
        fields(subject = %message.subject, recipients = message.to.len())
    )]
    pub async fn dispatch(
        &self,
        config: &ProviderConfig,
        message: &OutboundMessage,
    ) -> Result<Value, DispatchError> {
        let sender = resolve_sender(config, self.host.as_ref()).map_err(|e| {
            tracing::error!(error.cause_chain = ?e, config = ?config, "Failed to resolve the sender");
            e
        })?;

        message.validate().map_err(|e| {
            tracing::error!(error.cause_chain = ?e, sender = ?sender, "Refusing to send an invalid message");
            e
        })?;

        let payload = build_payload(&sender, message, &self.branding_footer)
            .await
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, sender = ?sender, "Failed to read an attachment");
                e
            })?;

        tracing::info!(sender = %sender.email, "Posting transactional email to Brevo");

        let response = EmailClient::new(self.http_client.clone(), config)
            .send_request(&payload)
            .await
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, sender = ?sender, "Brevo request failed");
                e
            })?;

        Ok(response)
    }
}

fn load_config(settings: &HostSettings) -> Result<ProviderConfig, DispatchError> {
    ProviderConfig::from_host_settings(settings).map_err(|e| {
        let keys: Vec<&String> = settings.keys().collect();
        tracing::error!(error.cause_chain = ?e, settings = ?keys, "Invalid Brevo module settings");
        e.into()
    })
}

fn test_message(operator: Mailbox) -> OutboundMessage {
    OutboundMessage::builder(TEST_SUBJECT)
        .to(operator)
        .html_body(format!(
            "This email was sent to test the Brevo mail provider configuration.<br><br>Sent at {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ))
        .build()
}

fn settings_schema() -> Vec<SettingField> {
    vec![
        SettingField {
            key: "api_key",
            friendly_name: "API Key",
            field_type: FieldType::Password,
            description: "Your Brevo v3 API key".to_string(),
            required: true,
            default: None,
        },
        SettingField {
            key: "use_host_defaults",
            friendly_name: "Use System Sender",
            field_type: FieldType::YesNo,
            description: "Send from the system email address and company name set in the general settings".to_string(),
            required: false,
            default: Some("on"),
        },
        SettingField {
            key: "from_email",
            friendly_name: "From Email",
            field_type: FieldType::Text,
            description: "Sender email address, required when the system sender is not used".to_string(),
            required: false,
            default: None,
        },
        SettingField {
            key: "from_name",
            friendly_name: "From Name",
            field_type: FieldType::Text,
            description: "Sender name".to_string(),
            required: false,
            default: None,
        },
        SettingField {
            key: "author_info",
            friendly_name: "Developer Info",
            field_type: FieldType::ReadOnly,
            description: format!(
                r#"Developed by <a href="{}" target="_blank">{}</a>"#,
                AUTHOR_URL, AUTHOR
            ),
            required: false,
            default: None,
        },
    ]
}

#[async_trait]
impl SenderModule for Brevo {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn display_name(&self) -> String {
        format!("Brevo Mail Provider by {}", AUTHOR)
    }

    fn author_info(&self) -> AuthorInfo {
        AuthorInfo {
            name: AUTHOR,
            url: AUTHOR_URL,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn settings(&self) -> Vec<SettingField> {
        settings_schema()
    }

    #[tracing::instrument(name = "Test Brevo connection", skip_all)]
    async fn test_connection(
        &self,
        settings: &HostSettings,
    ) -> Result<TestConnectionOutcome, ConnectionTestError> {
        let config = load_config(settings)?;

        let operator = self.operator.current_operator().ok_or_else(|| {
            let e = ConfigurationError::MissingOperator;
            tracing::error!(error.cause_chain = ?e, "Cannot address the test email");
            DispatchError::from(e)
        })?;

        self.dispatch(&config, &test_message(operator)).await?;

        Ok(TestConnectionOutcome {
            success: true,
            message: "Connection succeeded and the test email was sent.".to_string(),
        })
    }

    #[tracing::instrument(name = "Send email through Brevo", skip_all, fields(subject = %message.subject))]
    async fn send(
        &self,
        settings: &HostSettings,
        message: &OutboundMessage,
    ) -> Result<(), SendFailure> {
        let config = load_config(settings)?;
        self.dispatch(&config, message).await?;
        Ok(())
    }
}
