//! src/domain/mod.rs
mod mailbox;
pub use mailbox::Mailbox;

mod message;
pub use message::{Attachment, AttachmentContent, MessageBuilder, MessageError, OutboundMessage};

mod sender;
pub use sender::{resolve_sender, ResolvedSender, FALLBACK_SENDER_NAME};
