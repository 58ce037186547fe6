//! Message resources as accepted by the Microsoft Graph `sendMail` action.

use base64::{engine::general_purpose::STANDARD, Engine};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const FILE_ATTACHMENT_ODATA_TYPE: &str = "#microsoft.graph.fileAttachment";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmailAddress {
    address: String,
    name: String,
}

impl EmailAddress {
    pub fn new<A: Into<String>, N: Into<String>>(address: A, name: N) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// The display name, empty when the source had none.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Recipient {
    email_address: EmailAddress,
}

impl Recipient {
    pub fn new<A: Into<String>, N: Into<String>>(address: A, name: N) -> Self {
        Self {
            email_address: EmailAddress::new(address, name),
        }
    }

    pub fn email_address(&self) -> &EmailAddress {
        &self.email_address
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BodyType {
    Html,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemBody {
    content_type: BodyType,
    content: String,
}

impl ItemBody {
    pub fn new<C: Into<String>>(content_type: BodyType, content: C) -> Self {
        Self {
            content_type,
            content: content.into(),
        }
    }

    pub fn html<C: Into<String>>(content: C) -> Self {
        Self::new(BodyType::Html, content)
    }

    pub fn text<C: Into<String>>(content: C) -> Self {
        Self::new(BodyType::Text, content)
    }

    pub fn content_type(&self) -> BodyType {
        self.content_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FileAttachment {
    #[cfg_attr(feature = "serde", serde(rename = "@odata.type"))]
    odata_type: String,
    name: String,
    content_type: String,
    content_bytes: String,
}

impl FileAttachment {
    /// Create a file attachment, base64 encoding the given bytes.
    pub fn new<N: Into<String>, C: Into<String>>(name: N, content_type: C, content: &[u8]) -> Self {
        Self {
            odata_type: FILE_ATTACHMENT_ODATA_TYPE.to_string(),
            name: name.into(),
            content_type: content_type.into(),
            content_bytes: STANDARD.encode(content),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The base64 encoded content.
    pub fn content_bytes(&self) -> &str {
        &self.content_bytes
    }

    /// Decode the content back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(&self.content_bytes)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Message {
    from: Recipient,
    to_recipients: Vec<Recipient>,
    cc_recipients: Vec<Recipient>,
    bcc_recipients: Vec<Recipient>,
    reply_to: Vec<Recipient>,
    subject: String,
    body: ItemBody,
    attachments: Vec<FileAttachment>,
}

impl Message {
    #[allow(clippy::too_many_arguments)]
    pub fn new<S: Into<String>>(
        from: Recipient,
        to_recipients: Vec<Recipient>,
        cc_recipients: Vec<Recipient>,
        bcc_recipients: Vec<Recipient>,
        reply_to: Vec<Recipient>,
        subject: S,
        body: ItemBody,
        attachments: Vec<FileAttachment>,
    ) -> Self {
        Self {
            from,
            to_recipients,
            cc_recipients,
            bcc_recipients,
            reply_to,
            subject: subject.into(),
            body,
            attachments,
        }
    }

    pub fn from(&self) -> &Recipient {
        &self.from
    }

    pub fn to_recipients(&self) -> &Vec<Recipient> {
        &self.to_recipients
    }

    pub fn cc_recipients(&self) -> &Vec<Recipient> {
        &self.cc_recipients
    }

    pub fn bcc_recipients(&self) -> &Vec<Recipient> {
        &self.bcc_recipients
    }

    pub fn reply_to(&self) -> &Vec<Recipient> {
        &self.reply_to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &ItemBody {
        &self.body
    }

    pub fn attachments(&self) -> &Vec<FileAttachment> {
        &self.attachments
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String> {
        crate::parse::json::to_json(self)
    }
}

/// The request body of a `sendMail` call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SendMail {
    message: Message,
    save_to_sent_items: bool,
}

impl SendMail {
    pub fn new(message: Message, save_to_sent_items: bool) -> Self {
        Self {
            message,
            save_to_sent_items,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn save_to_sent_items(&self) -> bool {
        self.save_to_sent_items
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String> {
        crate::parse::json::to_json(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_attachment_decode() {
        let bytes = [0u8, 159, 146, 150, 255];
        let attachment = FileAttachment::new("blob.bin", "application/octet-stream", &bytes);

        assert_eq!(attachment.content_bytes(), "AJ+Slv8=");
        assert_eq!(attachment.decode().unwrap(), bytes.to_vec());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_to_json() {
        let message = Message::new(
            Recipient::new("user@example.com", "User"),
            vec![Recipient::new("test@example.com", "")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            "Hello",
            ItemBody::html("<p>Hi</p>"),
            vec![FileAttachment::new("a.txt", "text/plain", b"hi")],
        );

        let value: serde_json::Value =
            serde_json::from_str(&SendMail::new(message, true).to_json().unwrap()).unwrap();

        assert_eq!(value["saveToSentItems"], true);
        assert_eq!(
            value["message"]["from"]["emailAddress"]["address"],
            "user@example.com"
        );
        assert_eq!(value["message"]["toRecipients"][0]["emailAddress"]["name"], "");
        assert_eq!(value["message"]["ccRecipients"], serde_json::json!([]));
        assert_eq!(value["message"]["replyTo"], serde_json::json!([]));
        assert_eq!(value["message"]["body"]["contentType"], "html");
        assert_eq!(
            value["message"]["attachments"][0]["@odata.type"],
            FILE_ATTACHMENT_ODATA_TYPE
        );
        assert_eq!(value["message"]["attachments"][0]["contentBytes"], "aGk=");
    }
}
