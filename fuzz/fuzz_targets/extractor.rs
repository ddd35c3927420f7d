#![no_main]

use libfuzzer_sys::fuzz_target;
use reqwest::StatusCode;
use url::Url;

use wonderland::extractor::extract;
use wonderland::fetcher::types::{Charset, PageResponse};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).to_string();

    let response = PageResponse {
        url_final: Url::parse("https://example.com/story").unwrap(),
        status: StatusCode::OK,
        body_utf8: html,
        charset: Charset::Utf8,
    };

    // Arbitrary markup must produce either an article or an extraction error.
    let _ = extract(&response);
});
