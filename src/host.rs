//! src/host.rs
//!
//! Everything the host platform sees of this module, and everything the
//! module asks of the host.
use crate::configuration::HostSettings;
use crate::domain::{Mailbox, OutboundMessage};
use crate::email::{ConnectionTestError, SendFailure};
use async_trait::async_trait;
use serde::Serialize;

/// The host's global "From" settings.
#[derive(Debug, Clone, Default)]
pub struct HostSender {
    pub email: String,
    pub company_name: String,
}

pub trait HostConfiguration: Send + Sync {
    fn default_sender(&self) -> HostSender;
}

pub trait OperatorIdentity: Send + Sync {
    /// The signed-in operator, if any. Test emails go to this address.
    fn current_operator(&self) -> Option<Mailbox>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Password,
    Text,
    YesNo,
    ReadOnly,
}

/// One entry of the settings form the host renders for this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingField {
    pub key: &'static str,
    pub friendly_name: &'static str,
    pub field_type: FieldType,
    pub description: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorInfo {
    pub name: &'static str,
    pub url: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestConnectionOutcome {
    pub success: bool,
    pub message: String,
}

#[async_trait]
pub trait SenderModule: Send + Sync {
    fn name(&self) -> &'static str;

    fn display_name(&self) -> String;

    fn author_info(&self) -> AuthorInfo;

    fn settings(&self) -> Vec<SettingField>;

    async fn test_connection(
        &self,
        settings: &HostSettings,
    ) -> Result<TestConnectionOutcome, ConnectionTestError>;

    async fn send(
        &self,
        settings: &HostSettings,
        message: &OutboundMessage,
    ) -> Result<(), SendFailure>;
}
