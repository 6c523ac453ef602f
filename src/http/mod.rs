mod link;

use std::borrow::Cow;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use secrecy::ExposeSecret;

use crate::config::HttpConfig;
use crate::error::{BoxError, ResolveError, Result};

pub(crate) use link::has_storage_type;

/// A response with its body already read. Probes leave `body` empty.
#[derive(Debug, Clone)]
pub(crate) struct FetchResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: String,
}

impl FetchResponse {
    pub(crate) fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// All `Link` header lines, in the order the server sent them. Bytes
    /// outside visible ASCII (a UTF-8 `title`, say) are decoded lossily so
    /// the rest of the line stays readable.
    pub(crate) fn links(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.headers
            .get_all(header::LINK)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
    }
}

/// The fetch capability of a signed-in session.
///
/// Any HTTP status is a successful fetch; only transport failures are
/// errors.
pub(crate) trait Fetch {
    async fn fetch(
        &self,
        url: &Url,
        accept: Option<&str>,
    ) -> std::result::Result<FetchResponse, BoxError>;

    /// GET `url` for its status and headers only. The body is never read.
    async fn probe(&self, url: &Url) -> std::result::Result<FetchResponse, BoxError>;
}

impl<F: Fetch> Fetch for &F {
    async fn fetch(
        &self,
        url: &Url,
        accept: Option<&str>,
    ) -> std::result::Result<FetchResponse, BoxError> {
        (**self).fetch(url, accept).await
    }

    async fn probe(&self, url: &Url) -> std::result::Result<FetchResponse, BoxError> {
        (**self).probe(url).await
    }
}

#[derive(Clone)]
pub(crate) struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub(crate) fn new(config: &HttpConfig) -> Result<HttpFetcher> {
        let mut default_headers = HeaderMap::new();
        if let Some(token) = &config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| ResolveError::InvalidAccessToken)?;
            value.set_sensitive(true);
            default_headers.insert(header::AUTHORIZATION, value);
        }
        let client = Client::builder()
            .http1_only()
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .timeout(config.timeout())
            .default_headers(default_headers)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(
        &self,
        url: &Url,
        accept: Option<&str>,
    ) -> std::result::Result<FetchResponse, BoxError> {
        let mut request = self.client.get(url.clone());
        if let Some(accept) = accept {
            request = request.header(header::ACCEPT, accept);
        }
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(FetchResponse {
            status,
            headers,
            body,
        })
    }

    async fn probe(&self, url: &Url) -> std::result::Result<FetchResponse, BoxError> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(FetchResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: String::new(),
        })
    }
}
