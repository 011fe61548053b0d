//! Navigation error types
//!
//! Only static configuration errors live here. An unmatched path or an
//! unknown page is never an error; the dispatcher redirects or shows the
//! not-found page instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    #[error("Invalid display mode {0:?}, expected one of \"stack\", \"flex\", \"tab\"")]
    InvalidDisplayMode(String),

    #[error("Invalid drawer side {0:?}, expected \"left\" or \"right\"")]
    InvalidDrawerSide(String),

    #[error("Invalid drawer action {0:?}, expected \"add\", \"remove\" or \"toggle\"")]
    InvalidDrawerAction(String),

    #[error("Invalid link target {href}: {source}")]
    InvalidHref {
        href: String,
        #[source]
        source: url::ParseError,
    },
}
