use crate::fetcher::types::{Charset, PageResponse};
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Only the head of the document is scanned for `<meta>` charset hints.
const SNIFF_LEN: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: &[u8],
    content_type: &str,
) -> PageResponse {
    let charset = detect_charset(content_type, body_bytes);
    let body_utf8 = decode_to_utf8(body_bytes, &charset);

    PageResponse {
        url_final,
        status,
        body_utf8,
        charset,
    }
}

fn label_match(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Header charset, then `<meta charset>`, then `<meta http-equiv>`, then a
/// statistical guess over the document head.
fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some(encoding) = label_match(&CHARSET_REGEX, content_type) {
        return Charset::from_encoding(encoding);
    }

    let head = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    if let Some(encoding) = label_match(&META_CHARSET_REGEX, &head_str)
        .or_else(|| label_match(&META_HTTP_EQUIV_REGEX, &head_str))
    {
        return Charset::from_encoding(encoding);
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body_bytes.len() <= SNIFF_LEN);
    Charset::from_encoding(detector.guess(None, true))
}

/// Malformed sequences become U+FFFD rather than failing the request;
/// publishers routinely mislabel their encoding.
fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = charset.encoding();
    let (decoded, used, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        debug!(encoding = used.name(), "Replaced malformed byte sequences while decoding");
    }
    decoded.into_owned()
}
