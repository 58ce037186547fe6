use mailparse::MailHeader;

use crate::types::Headers;

/// Collect headers into a map keyed by the lowercased header name. The last occurrence wins.
pub fn collect_headers(parsed: &[MailHeader<'_>]) -> Headers {
    parsed
        .iter()
        .map(|header| (header.get_key().to_ascii_lowercase(), header.get_value()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_collect_headers() {
        let (parsed, _) = mailparse::parse_headers(
            b"Subject: First\r\nX-Mailer: test\r\nSUBJECT: Second\r\n\r\nbody",
        )
        .unwrap();

        let headers = collect_headers(&parsed);

        assert_eq!(headers.get("subject").map(String::as_str), Some("Second"));
        assert_eq!(headers.get("x-mailer").map(String::as_str), Some("test"));
    }
}
