//! Error types for the watch pipeline.
//!
//! Every fallible step returns [`Error`]. Nothing in the pipeline recovers
//! locally; errors travel up to the poller, which decides whether a failed
//! run ends the process.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Network failure, non-2xx status, or an undecodable body.
    #[error("could not fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("could not parse URL {url}: {source}")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("could not parse URL {url}: no host")]
    MissingHost { url: String },

    /// No listing entry mentioned the keyword.
    #[error("news article URL not found")]
    NotFound,

    /// A listing entry matched but carried no usable link.
    #[error("news article URL not found: matching entry has no href")]
    UnusableLink,

    #[error("could not check article link {url}: {source}")]
    Inspection {
        url: String,
        #[source]
        source: Box<Error>,
    },

    #[error("could not create bot: {0}")]
    BotSetup(#[source] teloxide::RequestError),

    #[error("could not send message: {0}")]
    Send(#[source] teloxide::RequestError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspection_error_keeps_prefix_and_cause() {
        let err = Error::Inspection {
            url: "https://host/lodestone/news/1".to_string(),
            source: Box::new(Error::Fetch {
                url: "https://host/lodestone/news/1".to_string(),
                reason: "HTTP status 503".to_string(),
            }),
        };

        let msg = err.to_string();
        assert!(msg.starts_with("could not check article link"));
        assert!(msg.contains("HTTP status 503"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(Error::NotFound.to_string(), "news article URL not found");
    }
}
