use log::debug;
use mailparse::{DispositionType, MailHeader, ParsedMail};

use crate::{
    error::Result,
    types::{Address, Attachment, BodyPart, SourceMessage},
};

use super::{address::header_address_list, headers::collect_headers};

fn addresses(headers: &[MailHeader<'_>], key: &str) -> Result<Vec<Address>> {
    let mut addresses = Vec::new();

    for header in headers {
        if header.get_key_ref().trim().eq_ignore_ascii_case(key) {
            addresses.extend(header_address_list(header)?);
        }
    }

    Ok(addresses)
}

fn is_attachment(part: &ParsedMail<'_>, mimetype: &str) -> bool {
    match part.get_content_disposition().disposition {
        DispositionType::Attachment => true,
        _ => mimetype != "text/html" && mimetype != "text/plain",
    }
}

fn to_attachment(part: &ParsedMail<'_>) -> Result<Attachment> {
    let disposition = part.get_content_disposition();

    let file_name = disposition
        .params
        .get("filename")
        .or_else(|| part.ctype.params.get("name"))
        .cloned();

    Ok(Attachment::new(
        file_name,
        Some(part.ctype.mimetype.clone()),
        part.get_body_raw()?,
    ))
}

/// Flatten a parsed MIME tree into a [`SourceMessage`].
///
/// Leaf parts marked as attachments, and leaves that are neither html nor plain text,
/// become attachments. The remaining leaves become body parts, in tree order.
pub fn normalize_mail(parsed: &ParsedMail<'_>) -> Result<SourceMessage> {
    let headers = collect_headers(&parsed.headers);

    let mut parts = Vec::new();

    for part in parsed.parts() {
        let mimetype = part.ctype.mimetype.to_ascii_lowercase();

        if !part.subparts.is_empty() || mimetype.starts_with("multipart/") {
            continue;
        }

        if is_attachment(part, &mimetype) {
            parts.push(BodyPart::Attachment(to_attachment(part)?));
        } else if mimetype == "text/html" {
            parts.push(BodyPart::Html(part.get_body()?));
        } else {
            parts.push(BodyPart::PlainText(part.get_body()?));
        }
    }

    debug!("Normalized mime message with {} leaf parts", parts.len());

    Ok(SourceMessage {
        from: addresses(&parsed.headers, "from")?,
        to: addresses(&parsed.headers, "to")?,
        cc: addresses(&parsed.headers, "cc")?,
        bcc: addresses(&parsed.headers, "bcc")?,
        reply_to: addresses(&parsed.headers, "reply-to")?,
        subject: headers.get("subject").cloned(),
        parts,
    })
}
