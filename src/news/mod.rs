pub mod handlers;

/// Parameters the original wedding-news page always sent; callers may
/// override any of them.
pub const WEDDING_FEED_DEFAULTS: [(&str, &str); 4] = [
    ("engine", "google_news"),
    ("q", "wedding"),
    ("hl", "en"),
    ("gl", "us"),
];

/// One featured article plus a grid of twelve.
pub const FEED_SIZE: usize = 13;
