use std::io::Write;

use base64::Engine;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use strum_macros::Display;

/// Characters escaped when a value is embedded in a URL query component.
/// Alphanumerics and the usual unreserved marks pass through untouched.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The share targets offered for an article, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ShareTarget {
    Twitter,
    #[strum(serialize = "LinkedIn")]
    LinkedIn,
    #[strum(serialize = "Copy Link")]
    CopyLink,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 3] = [Self::Twitter, Self::LinkedIn, Self::CopyLink];
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Canonical shareable locator for an article: the site origin with the
/// URL-encoded title as the `article` query parameter. Lossy when two
/// articles share a title; accepted at this scope.
pub fn article_url(base_url: &str, title: &str) -> String {
    format!(
        "{}?article={}",
        base_url.trim_end_matches('/'),
        encode_component(title)
    )
}

pub fn tweet_intent_url(title: &str, url: &str) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        encode_component(title),
        encode_component(url)
    )
}

pub fn linkedin_share_url(url: &str) -> String {
    format!(
        "https://www.linkedin.com/sharing/share-offsite/?url={}",
        encode_component(url)
    )
}

/// Perform the side effect for `target`. All three actions are
/// fire-and-forget: nothing is awaited and failures are logged, not
/// surfaced.
pub fn share(target: ShareTarget, title: &str, url: &str) {
    match target {
        ShareTarget::Twitter => {
            if let Err(e) = open::that(tweet_intent_url(title, url)) {
                tracing::debug!("Failed to open Twitter share: {}", e);
            }
        }
        ShareTarget::LinkedIn => {
            if let Err(e) = open::that(linkedin_share_url(url)) {
                tracing::debug!("Failed to open LinkedIn share: {}", e);
            }
        }
        ShareTarget::CopyLink => osc52_copy(url),
    }
}

/// Copy text to the system clipboard via the OSC 52 escape sequence.
/// Works in most modern terminals; the write bypasses the terminal
/// backend buffer so it lands even while the alternate screen is active.
fn osc52_copy(text: &str) {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    let _ = std::io::stdout().write_all(format!("\x1b]52;c;{}\x07", encoded).as_bytes());
    let _ = std::io::stdout().flush();
}
