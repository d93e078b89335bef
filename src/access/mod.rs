//! Article access: the orchestrated free-read gate, its render model, and
//! the route rules behind the sign-in deep links.

pub mod gate;
pub mod paths;
pub mod view;

pub use gate::{FreeReadGate, GateOutcome};
pub use paths::{
    article_path, is_protected_path, sign_in_link, sign_in_redirect, sign_up_link,
};
pub use view::{GateView, SignUpPrompt};
