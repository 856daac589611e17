//! src/email/brevo/email.rs
use crate::domain::{Attachment, AttachmentContent, Mailbox, OutboundMessage, ResolvedSender};
use base64::{engine, Engine};
use serde::Serialize;
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
#[error("Failed to read attachment {filename} from {}", .path.display())]
pub struct AttachmentReadError {
    pub filename: String,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Serialize)]
pub struct Address<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

impl<'a> From<&'a Mailbox> for Address<'a> {
    fn from(mailbox: &'a Mailbox) -> Self {
        Self {
            email: &mailbox.email,
            name: Some(mailbox.name.as_str()).filter(|name| !name.is_empty()),
        }
    }
}

impl<'a> From<&'a ResolvedSender> for Address<'a> {
    fn from(sender: &'a ResolvedSender) -> Self {
        Self {
            email: &sender.email,
            name: Some(sender.name.as_str()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EncodedAttachment<'a> {
    pub name: &'a str,
    pub content: String,
}

/// Body of `POST /v3/smtp/email`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest<'a> {
    pub sender: Address<'a>,
    pub to: Vec<Address<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<Address<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<Address<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Address<'a>>,
    pub subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<Cow<'a, str>>,
    #[serde(rename = "attachment", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<EncodedAttachment<'a>>>,
}

/// Maps a host message onto the Brevo request body. Attachments stored on
/// disk are read here, everything else is a plain translation.
pub async fn build_payload<'a>(
    sender: &'a ResolvedSender,
    message: &'a OutboundMessage,
    branding_footer: &str,
) -> Result<ProviderRequest<'a>, AttachmentReadError> {
    let (html_content, text_content) = match message.html() {
        Some(html) => {
            let text = match message.text() {
                Some(text) => Cow::Borrowed(text),
                None => Cow::Owned(strip_tags(html)),
            };
            (Some(format!("{}{}", html, branding_footer)), Some(text))
        }
        None => (None, message.plain_text.as_deref().map(Cow::Borrowed)),
    };

    let attachments = if message.attachments.is_empty() {
        None
    } else {
        let mut encoded = Vec::with_capacity(message.attachments.len());
        for attachment in &message.attachments {
            encoded.push(encode_attachment(attachment).await?);
        }
        Some(encoded)
    };

    Ok(ProviderRequest {
        sender: sender.into(),
        to: addresses(&message.to).unwrap_or_default(),
        cc: addresses(&message.cc),
        bcc: addresses(&message.bcc),
        reply_to: message.reply_to.as_ref().map(Address::from),
        subject: &message.subject,
        html_content,
        text_content,
        attachments,
    })
}

fn addresses(mailboxes: &[Mailbox]) -> Option<Vec<Address<'_>>> {
    if mailboxes.is_empty() {
        None
    } else {
        Some(mailboxes.iter().map(Address::from).collect())
    }
}

async fn encode_attachment(attachment: &Attachment) -> Result<EncodedAttachment<'_>, AttachmentReadError> {
    let content = match &attachment.content {
        AttachmentContent::Inline(data) => engine::general_purpose::STANDARD.encode(data),
        AttachmentContent::Path(path) => {
            let data = tokio::fs::read(path)
                .await
                .map_err(|source| AttachmentReadError {
                    filename: attachment.filename.clone(),
                    path: path.clone(),
                    source,
                })?;
            engine::general_purpose::STANDARD.encode(data)
        }
    };

    Ok(EncodedAttachment {
        name: &attachment.filename,
        content,
    })
}

/// Fixed HTML fragment appended to every outgoing HTML body.
pub fn branding_footer(author: &str, author_url: &str) -> String {
    format!(
        r#"<br><br><small style="color:#666;">Powered by Brevo Mail Provider<br>Developed by <a href="{}">{}</a></small>"#,
        htmlescape::encode_minimal(author_url),
        htmlescape::encode_minimal(author)
    )
}

/// Drops markup from an HTML fragment, leaving its text. Entities are kept
/// as written.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let tag = &rest[start..];

        // "a < b" is text, not markup.
        let opens_markup = tag[1..]
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        if !opens_markup {
            text.push('<');
            rest = &tag[1..];
            continue;
        }

        let end = if tag.starts_with("<!--") {
            tag.find("-->").map(|i| i + 3)
        } else {
            tag_end(tag)
        };

        // An unterminated tag swallows the remainder.
        rest = end.map_or("", |end| &tag[end..]);
    }

    text.push_str(rest);
    text
}

fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}
