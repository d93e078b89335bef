//! Render model for gated article bodies.

use serde::Serialize;

use super::paths::{article_path, sign_in_link, sign_up_link};

/// Height the article body is clipped to while gated.
pub const TRUNCATED_MAX_HEIGHT_REM: u32 = 28;
/// Blur applied to the clipped body.
pub const TRUNCATED_BLUR_PX: u32 = 2;

/// Call-to-action shown over a gated article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPrompt {
    pub headline: String,
    pub body: String,
    pub sign_in_href: String,
    pub sign_up_href: String,
}

impl SignUpPrompt {
    /// Prompt whose links both return the visitor to `article_id`.
    pub fn for_article(article_id: &str) -> Self {
        let next = article_path(article_id);
        Self {
            headline: "You've reached the free limit".into(),
            body: "Sign up to continue reading and unlock likes, bookmarks, comments, and following."
                .into(),
            sign_in_href: sign_in_link(&next),
            sign_up_href: sign_up_link(&next),
        }
    }
}

/// How the page should present the article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum GateView {
    Full,
    #[serde(rename_all = "camelCase")]
    Truncated {
        max_height_rem: u32,
        blur_px: u32,
        prompt: SignUpPrompt,
    },
}

impl GateView {
    pub fn for_decision(article_id: &str, blocked: bool) -> Self {
        if !blocked {
            return GateView::Full;
        }
        GateView::Truncated {
            max_height_rem: TRUNCATED_MAX_HEIGHT_REM,
            blur_px: TRUNCATED_BLUR_PX,
            prompt: SignUpPrompt::for_article(article_id),
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, GateView::Truncated { .. })
    }

    pub fn prompt(&self) -> Option<&SignUpPrompt> {
        match self {
            GateView::Full => None,
            GateView::Truncated { prompt, .. } => Some(prompt),
        }
    }
}
