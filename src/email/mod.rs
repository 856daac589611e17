//! src/email/mod.rs
pub mod brevo;
pub use brevo::{Brevo, ConnectionTestError, DispatchError, SendFailure};
