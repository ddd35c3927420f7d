use std::fmt::{Display, Formatter};

/// Short briefs are real articles; only near-empty text is rejected.
pub const MIN_CONTENT_LENGTH: usize = 80;
const MIN_WORD_COUNT: usize = 50;
const MAX_BOILERPLATE_RATIO: f64 = 0.3;

const BOILERPLATE_KEYWORDS: [&str; 24] = [
    "cookie",
    "privacy",
    "terms of",
    "policy",
    "gdpr",
    "consent",
    "accept all",
    "preferences",
    "tracking",
    "advertisement",
    "subscribe",
    "newsletter",
    "log in",
    "login",
    "sign up",
    "password",
    "404",
    "not found",
    "access denied",
    "please wait",
    "enable javascript",
    "browser",
    "click here",
    "read more",
];

/// Why an extracted region was not accepted as an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    Untitled,
    Boilerplate,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::TooShort => "content too short",
            Self::Untitled => "no title and too few words",
            Self::Boilerplate => "content is mostly boilerplate",
        };
        f.write_str(reason)
    }
}

pub fn rejection_reason(title: &str, text: &str) -> Option<RejectReason> {
    if text.trim().chars().count() < MIN_CONTENT_LENGTH {
        return Some(RejectReason::TooShort);
    }

    let word_count = text.split_whitespace().count();

    if title.trim().is_empty() && word_count < MIN_WORD_COUNT {
        return Some(RejectReason::Untitled);
    }

    if boilerplate_ratio(text, word_count) > MAX_BOILERPLATE_RATIO {
        return Some(RejectReason::Boilerplate);
    }

    None
}

fn boilerplate_ratio(text: &str, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    let text_lower = text.to_lowercase();
    let hits: usize = BOILERPLATE_KEYWORDS
        .iter()
        .map(|keyword| text_lower.matches(keyword).count())
        .sum();

    hits as f64 / total_words as f64
}
