use crate::{error::Result, parse};

use super::{address::Address, attachment::Attachment};

/// A single part of a composed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPart {
    Html(String),
    PlainText(String),
    Attachment(Attachment),
}

/// Adapts an upstream message representation into a [`SourceMessage`].
///
/// Every schema the converter accepts goes through this step, so the mapping
/// to the Graph schema only ever deals with one shape. Errors returned here are
/// reported by the converter as a failed conversion.
pub trait Normalize {
    fn normalize(&self) -> Result<SourceMessage>;
}

/// The normalized shape of a message ready to be converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMessage {
    pub(crate) from: Vec<Address>,
    pub(crate) to: Vec<Address>,
    pub(crate) cc: Vec<Address>,
    pub(crate) bcc: Vec<Address>,
    pub(crate) reply_to: Vec<Address>,
    pub(crate) subject: Option<String>,
    pub(crate) parts: Vec<BodyPart>,
}

impl SourceMessage {
    /// Parse a raw RFC 822 message.
    pub fn from_rfc822<B: AsRef<[u8]>>(bytes: B) -> Result<Self> {
        let parsed = mailparse::parse_mail(bytes.as_ref())?;

        parse::mime::normalize_mail(&parsed)
    }

    pub fn from(&self) -> &Vec<Address> {
        &self.from
    }

    pub fn to(&self) -> &Vec<Address> {
        &self.to
    }

    pub fn cc(&self) -> &Vec<Address> {
        &self.cc
    }

    pub fn bcc(&self) -> &Vec<Address> {
        &self.bcc
    }

    pub fn reply_to(&self) -> &Vec<Address> {
        &self.reply_to
    }

    /// What the message is about.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// All parts in the order they were added or found in the MIME tree.
    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    /// The first html part.
    pub fn html_body(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            BodyPart::Html(html) => Some(html.as_str()),
            _ => None,
        })
    }

    /// The first plain text part.
    pub fn text_body(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            BodyPart::PlainText(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.parts.iter().filter_map(|part| match part {
            BodyPart::Attachment(attachment) => Some(attachment),
            _ => None,
        })
    }
}

impl Normalize for SourceMessage {
    fn normalize(&self) -> Result<SourceMessage> {
        Ok(self.clone())
    }
}

impl Normalize for [u8] {
    fn normalize(&self) -> Result<SourceMessage> {
        SourceMessage::from_rfc822(self)
    }
}

impl Normalize for mailparse::ParsedMail<'_> {
    fn normalize(&self) -> Result<SourceMessage> {
        parse::mime::normalize_mail(self)
    }
}

impl<T: Normalize + ?Sized> Normalize for &T {
    fn normalize(&self) -> Result<SourceMessage> {
        (**self).normalize()
    }
}
