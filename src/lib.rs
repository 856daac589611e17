//! Mail sender module that delivers a host platform's transactional email
//! through the Brevo `POST /v3/smtp/email` API.
pub mod configuration;
pub mod domain;
pub mod email;
pub mod host;
pub mod telemetry;
