use reqwest::Url;
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::http::Fetch;
use crate::rdf::{self, QuadStore, RdfFormat};

/// Fetches `url` asking for `accept` and parses the body into quads.
///
/// A non-2xx answer reads as an empty document. A 2xx body that does not
/// parse is an error.
pub(crate) async fn fetch_document<F: Fetch>(fetcher: &F, url: &Url, accept: &str) -> Result<QuadStore> {
    let response = fetcher
        .fetch(url, Some(accept))
        .await
        .map_err(|source| ResolveError::Network {
            url: url.to_string(),
            source,
        })?;
    if !response.status.is_success() {
        debug!(target: "fetch", %url, status = %response.status, "treating response as an empty document");
        return Ok(QuadStore::empty());
    }
    let format = RdfFormat::from_content_type(response.content_type());
    let mut base = url.clone();
    base.set_fragment(None);
    let store = rdf::parse(&response.body, base.as_str(), format).map_err(|source| {
        ResolveError::Parse {
            url: url.to_string(),
            source,
        }
    })?;
    debug!(target: "fetch", %url, ?format, quads = store.len(), "parsed document");
    Ok(store)
}
