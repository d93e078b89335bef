//! Route access rules and auth deep links.

use std::{fmt::Write, sync::OnceLock};

use regex::Regex;

/// Path prefixes that always require a signed-in user.
const PROTECTED_PREFIXES: &[&str] = &["/new", "/settings", "/me"];

fn post_edit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/post/[^/]+/edit").expect("post edit pattern is valid"))
}

/// Whether an anonymous request for `path` must be bounced to sign-in.
///
/// Article read pages (`/post/<id>`) stay public; their editors do not.
pub fn is_protected_path(path: &str) -> bool {
    if post_edit_pattern().is_match(path) {
        return true;
    }
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

pub fn article_path(article_id: &str) -> String {
    let mut path = String::from("/post/");
    percent_encode_into(&mut path, article_id, false);
    path
}

pub fn sign_in_link(next: &str) -> String {
    auth_link("/auth/sign-in", next)
}

pub fn sign_up_link(next: &str) -> String {
    auth_link("/auth/sign-up", next)
}

/// Where an anonymous visitor hitting a protected path is sent.
pub fn sign_in_redirect(path: &str) -> Option<String> {
    is_protected_path(path).then(|| sign_in_link(path))
}

fn auth_link(base: &str, next: &str) -> String {
    let mut link = format!("{base}?next=");
    percent_encode_into(&mut link, next, true);
    link
}

/// RFC 3986 unreserved characters pass through; `/` too when `keep_slash`.
fn percent_encode_into(out: &mut String, value: &str, keep_slash: bool) {
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            b'/' if keep_slash => out.push('/'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}
