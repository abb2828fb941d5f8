//! Error types for the NOWPayments client.
//!
//! Every failure coming out of the dispatcher carries the name of the
//! route it originated from, so an error renders as `"payment-create:
//! connection refused"` rather than a bare cause.

use reqwest::StatusCode;

/// Errors that can occur while talking to the NOWPayments API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing credentials, detected at client construction.
    #[error("config: {0}")]
    Config(String),

    /// A route name with no entry in the route table.
    ///
    /// This is a programming error, not a runtime condition: every
    /// route name used by the library is expected to resolve.
    #[error("unknown route {0:?}")]
    UnknownRoute(&'static str),

    /// A required argument was missing or empty. No request was sent.
    #[error("{0}")]
    InvalidArgument(String),

    /// The request URL could not be constructed.
    #[error("{route}: invalid URL: {source}")]
    Url {
        /// The route being dispatched.
        route: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Network-level failure (connection error, timeout).
    #[error("{route}: {source}")]
    Transport {
        /// The route being dispatched.
        route: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success HTTP status.
    #[error("{route}: status {status}: {body}")]
    Api {
        /// The route being dispatched.
        route: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("{route}: decode: {source}")]
    Decode {
        /// The route being dispatched.
        route: &'static str,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// An endpoint documented to return a non-empty list returned none.
    #[error("{route}: empty result")]
    EmptyResult {
        /// The route being dispatched.
        route: &'static str,
    },
}
