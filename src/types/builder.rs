use std::fmt::Display;

use super::{
    address::Address,
    attachment::Attachment,
    source::{BodyPart, SourceMessage},
};

/// Composes a [`SourceMessage`] through dedicated body and attachment setters.
///
/// Parts are kept in the order they are given, the html and text bodies are
/// replaced when set twice.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    from: Vec<Address>,
    to: Vec<Address>,
    cc: Vec<Address>,
    bcc: Vec<Address>,
    reply_to: Vec<Address>,
    subject: Option<String>,
    html: Option<String>,
    text: Option<String>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn senders<C: IntoIterator<Item = A>, A: Into<Address>>(mut self, senders: C) -> Self {
        self.from.extend(senders.into_iter().map(Into::into));

        self
    }

    pub fn sender<A: Into<Address>>(mut self, sender: A) -> Self {
        self.from.push(sender.into());

        self
    }

    pub fn recipients<C: IntoIterator<Item = A>, A: Into<Address>>(
        mut self,
        recipients: C,
    ) -> Self {
        self.to.extend(recipients.into_iter().map(Into::into));

        self
    }

    pub fn recipient<A: Into<Address>>(mut self, recipient: A) -> Self {
        self.to.push(recipient.into());

        self
    }

    pub fn cc<C: IntoIterator<Item = A>, A: Into<Address>>(mut self, cc: C) -> Self {
        self.cc.extend(cc.into_iter().map(Into::into));

        self
    }

    pub fn bcc<C: IntoIterator<Item = A>, A: Into<Address>>(mut self, bcc: C) -> Self {
        self.bcc.extend(bcc.into_iter().map(Into::into));

        self
    }

    pub fn reply_to<C: IntoIterator<Item = A>, A: Into<Address>>(mut self, reply_to: C) -> Self {
        self.reply_to.extend(reply_to.into_iter().map(Into::into));

        self
    }

    pub fn subject<S: Display>(mut self, subject: S) -> Self {
        self.subject = Some(subject.to_string());

        self
    }

    pub fn html<H: Into<String>>(mut self, html: H) -> Self {
        self.html = Some(html.into());

        self
    }

    pub fn text<T: Into<String>>(mut self, text: T) -> Self {
        self.text = Some(text.into());

        self
    }

    pub fn attachment<N: Into<String>, C: Into<String>, B: Into<Vec<u8>>>(
        mut self,
        file_name: N,
        content_type: C,
        content: B,
    ) -> Self {
        self.attachments.push(Attachment::new(
            Some(file_name.into()),
            Some(content_type.into()),
            content,
        ));

        self
    }

    pub fn add_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);

        self
    }

    pub fn build(self) -> SourceMessage {
        let mut parts = Vec::with_capacity(self.attachments.len() + 2);

        if let Some(html) = self.html {
            parts.push(BodyPart::Html(html));
        }

        if let Some(text) = self.text {
            parts.push(BodyPart::PlainText(text));
        }

        parts.extend(self.attachments.into_iter().map(BodyPart::Attachment));

        SourceMessage {
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            reply_to: self.reply_to,
            subject: self.subject,
            parts,
        }
    }
}
