//! src/domain/mailbox.rs
use serde::{Deserialize, Serialize};

/// An email address with its display name, as the host hands them over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Mailbox {
    pub email: String,
    pub name: String,
}

impl Mailbox {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// A mailbox without a display name.
    pub fn address(email: impl Into<String>) -> Self {
        Self::new(email, "")
    }
}

impl<E: Into<String>, N: Into<String>> From<(E, N)> for Mailbox {
    fn from((email, name): (E, N)) -> Self {
        Self::new(email, name)
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}
