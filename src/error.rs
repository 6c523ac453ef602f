use thiserror::Error;

/// Boxed transport error produced by a [`Fetch`](crate::http::Fetch) implementation.
pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Hard failures of a profile resolution.
///
/// Non-2xx responses and missing attributes are recovered where they occur
/// and never show up here.
#[derive(Debug, Error)]
pub(crate) enum ResolveError {
    #[error("{url} is not an absolute http(s) URL: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("unable to parse RDF document {url}")]
    Parse {
        url: String,
        #[source]
        source: rio_turtle::TurtleError,
    },
    #[error("access token is not a valid header value")]
    InvalidAccessToken,
    #[error("unable to build HTTP client")]
    Client(#[from] reqwest::Error),
}

pub(crate) type Result<T, E = ResolveError> = std::result::Result<T, E>;
