use std::sync::Arc;

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{
    config::{Config, DEFAULT_SENDER_NAME},
    diagnostics::{Diagnostics, LogDiagnostics},
    error::{Error, Result},
    parse,
    types::{
        graph::{FileAttachment, ItemBody, Message, Recipient, SendMail},
        Address, Attachment, Normalize, SourceMessage,
    },
};

pub const DEFAULT_SUBJECT: &str = "No Subject";
pub const DEFAULT_ATTACHMENT_NAME: &str = "attachment";
pub const DEFAULT_ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

// Unreserved characters plus '@' stay readable in the user path segment.
const USER_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// The result of converting a message: the Graph message and the address it is sent from.
///
/// The sender address is what the transport uses to pick the mailbox to send
/// as, it may differ from the display name the message header carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    message: Message,
    from: String,
}

impl Conversion {
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// The resolved sender address.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// The path of the `sendMail` action for the resolved sender, relative to the API root.
    pub fn send_mail_path(&self) -> String {
        format!(
            "/users/{}/sendMail",
            utf8_percent_encode(&self.from, USER_SEGMENT)
        )
    }

    pub fn into_send_mail(self, save_to_sent_items: bool) -> SendMail {
        SendMail::new(self.message, save_to_sent_items)
    }

    pub fn into_parts(self) -> (Message, String) {
        (self.message, self.from)
    }
}

struct Options<'a> {
    fallback_from: &'a str,
    fallback_name: &'a str,
    sanitize_html: bool,
}

fn to_recipient(address: &Address) -> Recipient {
    Recipient::new(address.address(), address.name().unwrap_or_default())
}

fn to_recipients(addresses: &[Address]) -> Vec<Recipient> {
    addresses.iter().map(to_recipient).collect()
}

fn resolve_from(
    source: &SourceMessage,
    options: &Options<'_>,
    diagnostics: &dyn Diagnostics,
) -> (Recipient, String) {
    match source.from().first() {
        Some(sender) => (to_recipient(sender), sender.address().to_string()),
        None => {
            diagnostics.warning(&format!(
                "No \"From\" address found. Using default \"{}\".",
                options.fallback_from
            ));

            (
                Recipient::new(options.fallback_from, options.fallback_name),
                options.fallback_from.to_string(),
            )
        }
    }
}

fn select_body(
    source: &SourceMessage,
    options: &Options<'_>,
    diagnostics: &dyn Diagnostics,
) -> ItemBody {
    if let Some(html) = source.html_body().filter(|html| !html.is_empty()) {
        if options.sanitize_html {
            return ItemBody::html(parse::sanitize_html(html));
        }

        return ItemBody::html(html);
    }

    if let Some(text) = source.text_body().filter(|text| !text.is_empty()) {
        return ItemBody::text(text);
    }

    diagnostics.warning("Email body is empty. Setting default empty plain text.");

    ItemBody::text("")
}

fn to_file_attachment(attachment: &Attachment) -> FileAttachment {
    FileAttachment::new(
        attachment.file_name().unwrap_or(DEFAULT_ATTACHMENT_NAME),
        attachment
            .content_type()
            .unwrap_or(DEFAULT_ATTACHMENT_CONTENT_TYPE),
        attachment.content(),
    )
}

fn select_subject(source: &SourceMessage, diagnostics: &dyn Diagnostics) -> String {
    match source.subject().filter(|subject| !subject.is_empty()) {
        Some(subject) => subject.to_string(),
        None => {
            diagnostics.warning(&format!(
                "Email subject is empty. Using default \"{}\".",
                DEFAULT_SUBJECT
            ));

            DEFAULT_SUBJECT.to_string()
        }
    }
}

fn convert_with<S: Normalize + ?Sized>(
    source: &S,
    options: &Options<'_>,
    diagnostics: &dyn Diagnostics,
) -> Result<Conversion> {
    let source = match source.normalize() {
        Ok(source) => source,
        Err(err) => {
            diagnostics.alert(&format!("Convert to Graph message failed. {}", err));

            return Err(Error::conversion_failed(err));
        }
    };

    let (from, from_address) = resolve_from(&source, options, diagnostics);

    let body = select_body(&source, options, diagnostics);

    let attachments: Vec<FileAttachment> = source.attachments().map(to_file_attachment).collect();

    let subject = select_subject(&source, diagnostics);

    debug!(
        "Converted message from {} with {} attachment(s)",
        from_address,
        attachments.len()
    );

    let message = Message::new(
        from,
        to_recipients(source.to()),
        to_recipients(source.cc()),
        to_recipients(source.bcc()),
        to_recipients(source.reply_to()),
        subject,
        body,
        attachments,
    );

    Ok(Conversion {
        message,
        from: from_address,
    })
}

/// Convert a message into a Graph message.
///
/// `fallback_from` is used, with the display name "No Reply", when the message has no
/// sender. Missing fields are filled with defaults and reported as warnings, a source
/// that cannot be read is reported as an alert and returned as
/// [`ErrorKind::ConversionFailed`](crate::ErrorKind::ConversionFailed).
pub fn convert<S: Normalize + ?Sized>(
    source: &S,
    fallback_from: &str,
    diagnostics: &dyn Diagnostics,
) -> Result<Conversion> {
    let options = Options {
        fallback_from,
        fallback_name: DEFAULT_SENDER_NAME,
        sanitize_html: false,
    };

    convert_with(source, &options, diagnostics)
}

/// A converter bound to a [`Config`] and a diagnostics sink.
#[derive(Clone)]
pub struct MessageConverter {
    config: Config,
    diagnostics: Arc<dyn Diagnostics>,
}

impl MessageConverter {
    /// Create a converter that reports diagnostics through the `log` crate.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            diagnostics: Arc::new(LogDiagnostics::default()),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;

        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn convert<S: Normalize + ?Sized>(&self, source: &S) -> Result<Conversion> {
        let options = Options {
            fallback_from: self.config.fallback_from(),
            fallback_name: self.config.fallback_name(),
            sanitize_html: self.config.sanitize_html(),
        };

        convert_with(source, &options, self.diagnostics.as_ref())
    }

    /// Convert a message into a `sendMail` request, returning the request path with it.
    pub fn send_mail<S: Normalize + ?Sized>(&self, source: &S) -> Result<(String, SendMail)> {
        let conversion = self.convert(source)?;

        let path = conversion.send_mail_path();

        Ok((
            path,
            conversion.into_send_mail(self.config.save_to_sent_items()),
        ))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        error::ErrorKind,
        failed,
        types::{graph::BodyType, BodyPart, MessageBuilder},
    };

    const FALLBACK: &str = "no-reply@example.com";

    #[derive(Default)]
    struct Recorder {
        warnings: Mutex<Vec<String>>,
        alerts: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn warnings(&self) -> Vec<String> {
            self.warnings.lock().unwrap().clone()
        }

        fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl Diagnostics for Recorder {
        fn warning(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string())
        }

        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string())
        }
    }

    struct Unreadable;

    impl Normalize for Unreadable {
        fn normalize(&self) -> Result<SourceMessage> {
            failed!(ErrorKind::InvalidMessage, "Header block is truncated")
        }
    }

    fn complete_message() -> SourceMessage {
        MessageBuilder::new()
            .sender(("Sender", "sender@example.com"))
            .recipients(vec![("A", "a@example.com"), ("B", "b@example.com")])
            .cc(vec!["c@example.com"])
            .bcc(vec![("Hidden", "hidden@example.com")])
            .reply_to(vec!["replies@example.com"])
            .subject("Quarterly report")
            .text("Plain report")
            .html("<p>Html report</p>")
            .attachment("report.pdf", "application/pdf", vec![0u8, 1, 2, 255])
            .build()
    }

    #[test]
    fn test_convert_complete_message() {
        let recorder = Recorder::default();

        let conversion = convert(&complete_message(), FALLBACK, &recorder).unwrap();
        let message = conversion.message();

        assert_eq!(conversion.from(), "sender@example.com");
        assert_eq!(message.from(), &Recipient::new("sender@example.com", "Sender"));
        assert_eq!(
            message.to_recipients(),
            &vec![
                Recipient::new("a@example.com", "A"),
                Recipient::new("b@example.com", "B"),
            ]
        );
        assert_eq!(message.cc_recipients(), &vec![Recipient::new("c@example.com", "")]);
        assert_eq!(
            message.bcc_recipients(),
            &vec![Recipient::new("hidden@example.com", "Hidden")]
        );
        assert_eq!(
            message.reply_to(),
            &vec![Recipient::new("replies@example.com", "")]
        );
        assert_eq!(message.subject(), "Quarterly report");
        assert_eq!(message.body(), &ItemBody::html("<p>Html report</p>"));

        let attachment = &message.attachments()[0];

        assert_eq!(attachment.name(), "report.pdf");
        assert_eq!(attachment.content_type(), "application/pdf");
        assert_eq!(attachment.decode().unwrap(), vec![0u8, 1, 2, 255]);

        assert!(recorder.warnings().is_empty());
        assert!(recorder.alerts().is_empty());
    }

    #[test]
    fn test_missing_from_uses_fallback() {
        let recorder = Recorder::default();
        let source = MessageBuilder::new()
            .recipient("a@example.com")
            .subject("Hi")
            .text("Hello")
            .build();

        let conversion = convert(&source, FALLBACK, &recorder).unwrap();

        assert_eq!(conversion.from(), FALLBACK);
        assert_eq!(
            conversion.message().from(),
            &Recipient::new(FALLBACK, DEFAULT_SENDER_NAME)
        );
        assert_eq!(recorder.warnings().len(), 1);
        assert!(recorder.warnings()[0].contains(FALLBACK));
    }

    #[test]
    fn test_first_sender_wins() {
        let source = MessageBuilder::new()
            .senders(vec!["first@example.com", "second@example.com"])
            .subject("Hi")
            .text("Hello")
            .build();

        let conversion = convert(&source, FALLBACK, &Recorder::default()).unwrap();

        assert_eq!(conversion.from(), "first@example.com");
        assert_eq!(
            conversion.message().from(),
            &Recipient::new("first@example.com", "")
        );
    }

    #[test]
    fn test_html_wins_regardless_of_order() {
        let source = SourceMessage {
            parts: vec![
                BodyPart::PlainText("plain".into()),
                BodyPart::Html("<b>html</b>".into()),
            ],
            subject: Some("Order".into()),
            ..Default::default()
        };

        let conversion = convert(&source, FALLBACK, &Recorder::default()).unwrap();

        assert_eq!(conversion.message().body().content_type(), BodyType::Html);
        assert_eq!(conversion.message().body().content(), "<b>html</b>");
    }

    #[test]
    fn test_plain_text_only() {
        let source = MessageBuilder::new().text("Just text").build();

        let conversion = convert(&source, FALLBACK, &Recorder::default()).unwrap();

        assert_eq!(conversion.message().body(), &ItemBody::text("Just text"));
    }

    #[test]
    fn test_empty_html_falls_back_to_text() {
        let source = MessageBuilder::new().html("").text("Just text").build();

        let conversion = convert(&source, FALLBACK, &Recorder::default()).unwrap();

        assert_eq!(conversion.message().body(), &ItemBody::text("Just text"));
    }

    #[test]
    fn test_defaults_for_empty_message() {
        let recorder = Recorder::default();

        let conversion = convert(&SourceMessage::default(), FALLBACK, &recorder).unwrap();
        let message = conversion.message();

        assert_eq!(message.body(), &ItemBody::text(""));
        assert_eq!(message.subject(), DEFAULT_SUBJECT);
        assert!(message.to_recipients().is_empty());
        assert!(message.cc_recipients().is_empty());
        assert!(message.bcc_recipients().is_empty());
        assert!(message.reply_to().is_empty());
        assert!(message.attachments().is_empty());

        // sender, body and subject
        assert_eq!(recorder.warnings().len(), 3);
        assert!(recorder.alerts().is_empty());
    }

    #[test]
    fn test_empty_subject_uses_placeholder() {
        let source = MessageBuilder::new()
            .sender("a@example.com")
            .subject("")
            .text("Hello")
            .build();

        let recorder = Recorder::default();
        let conversion = convert(&source, FALLBACK, &recorder).unwrap();

        assert_eq!(conversion.message().subject(), "No Subject");
        assert_eq!(recorder.warnings().len(), 1);
    }

    #[test]
    fn test_attachment_defaults() {
        let source = MessageBuilder::new()
            .add_attachment(Attachment::new(None, None, b"raw".to_vec()))
            .attachment("", "", b"blank".to_vec())
            .attachment("a.png", "image/png", b"png".to_vec())
            .build();

        let conversion = convert(&source, FALLBACK, &Recorder::default()).unwrap();
        let attachments = conversion.message().attachments();

        assert_eq!(attachments.len(), 3);

        for attachment in &attachments[..2] {
            assert_eq!(attachment.name(), DEFAULT_ATTACHMENT_NAME);
            assert_eq!(attachment.content_type(), DEFAULT_ATTACHMENT_CONTENT_TYPE);
        }

        assert_eq!(attachments[0].decode().unwrap(), b"raw".to_vec());
        assert_eq!(attachments[1].decode().unwrap(), b"blank".to_vec());
        assert_eq!(attachments[2].name(), "a.png");
        assert_eq!(attachments[2].content_type(), "image/png");
    }

    #[test]
    fn test_unreadable_source_fails() {
        let recorder = Recorder::default();

        let err = convert(&Unreadable, FALLBACK, &recorder).unwrap_err();

        match err.kind() {
            ErrorKind::ConversionFailed(cause) => {
                assert!(matches!(cause.kind(), ErrorKind::InvalidMessage))
            }
            kind => panic!("unexpected error kind {:?}", kind),
        }

        assert_eq!(err.message(), "Header block is truncated");
        assert_eq!(
            recorder.alerts(),
            vec!["Convert to Graph message failed. Header block is truncated".to_string()]
        );
        assert!(recorder.warnings().is_empty());
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let source = complete_message();
        let recorder = Recorder::default();

        let first = convert(&source, FALLBACK, &recorder).unwrap();
        let second = convert(&source, FALLBACK, &recorder).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_rfc822_matches_builder() {
        let raw = mail_builder::MessageBuilder::new()
            .from(("Sender", "sender@example.com"))
            .to(vec![("A", "a@example.com"), ("B", "b@example.com")])
            .subject("Quarterly report")
            .text_body("Plain report")
            .html_body("<p>Html report</p>")
            .attachment("application/pdf", "report.pdf", [0u8, 1, 2, 255].as_ref())
            .write_to_string()
            .unwrap();

        let recorder = Recorder::default();

        let parsed = convert(raw.as_bytes(), FALLBACK, &recorder).unwrap();
        let built = convert(&complete_message(), FALLBACK, &recorder).unwrap();

        assert_eq!(parsed.from(), built.from());
        assert_eq!(parsed.message().from(), built.message().from());
        assert_eq!(
            parsed.message().to_recipients(),
            built.message().to_recipients()
        );
        assert_eq!(parsed.message().subject(), built.message().subject());
        assert_eq!(parsed.message().body().content_type(), BodyType::Html);
        assert_eq!(
            parsed.message().body().content().trim(),
            built.message().body().content()
        );
        assert_eq!(
            parsed.message().attachments(),
            built.message().attachments()
        );
        assert!(recorder.warnings().is_empty());
    }

    #[test]
    fn test_converter_with_config() {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = Config::new(FALLBACK)
            .unwrap()
            .with_fallback_name("Mailer")
            .with_sanitize_html(true)
            .with_save_to_sent_items(false);

        let converter = MessageConverter::new(config);

        let source = MessageBuilder::new()
            .html("<p>Hi</p><script>alert(1)</script>")
            .build();

        let (path, request) = converter.send_mail(&source).unwrap();

        assert_eq!(path, "/users/no-reply@example.com/sendMail");
        assert!(!request.save_to_sent_items());
        assert_eq!(
            request.message().from(),
            &Recipient::new(FALLBACK, "Mailer")
        );
        assert_eq!(request.message().body(), &ItemBody::html("<p>Hi</p>"));
    }

    #[test]
    fn test_send_mail_path_encodes_sender() {
        let source = MessageBuilder::new()
            .sender("ops#1/alerts?x@example.com")
            .subject("Hi")
            .text("Hello")
            .build();

        let conversion = convert(&source, FALLBACK, &Recorder::default()).unwrap();

        assert_eq!(conversion.from(), "ops#1/alerts?x@example.com");
        assert_eq!(
            conversion.send_mail_path(),
            "/users/ops%231%2Falerts%3Fx@example.com/sendMail"
        );
    }

    #[test]
    fn test_converter_reports_to_injected_diagnostics() {
        let recorder = Arc::new(Recorder::default());

        let converter = MessageConverter::new(Config::new(FALLBACK).unwrap())
            .with_diagnostics(recorder.clone());

        assert!(converter.convert(&Unreadable).is_err());
        assert_eq!(recorder.alerts().len(), 1);
    }
}
