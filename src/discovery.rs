//! Storage discovery by climbing the container hierarchy of a WebID.

use reqwest::Url;
use tracing::{debug, info, warn};

use crate::error::{ResolveError, Result};
use crate::http::{Fetch, has_storage_type};

/// Outcome of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Discovery {
    pub(crate) storage: Url,
    pub(crate) probes: usize,
    /// `false` when the walk ran out of ancestors without seeing the marker.
    pub(crate) found: bool,
}

pub(crate) struct StorageWalker<'a, F> {
    fetcher: &'a F,
    max_depth: usize,
}

impl<'a, F: Fetch> StorageWalker<'a, F> {
    pub(crate) fn new(fetcher: &'a F, max_depth: usize) -> Self {
        StorageWalker { fetcher, max_depth }
    }

    /// Probes every ancestor container of `web_id`, nearest first, until
    /// one advertises itself as a storage. Ends at the origin root.
    pub(crate) async fn discover(&self, web_id: &str) -> Result<Discovery> {
        let mut current = start_url(web_id)?;
        let mut probes = 0;
        while probes < self.max_depth {
            let parent = parent_container(&current)?;
            probes += 1;
            if self.is_storage(&parent).await? {
                info!(target: "discovery", storage = %parent, probes, "found storage root");
                return Ok(Discovery {
                    storage: parent,
                    probes,
                    found: true,
                });
            }
            if parent.path() == "/" {
                debug!(target: "discovery", root = %parent, probes, "reached root without storage marker");
                return Ok(Discovery {
                    storage: parent,
                    probes,
                    found: false,
                });
            }
            if parent.path().len() >= current.path().len() {
                warn!(target: "discovery", %current, %parent, "parent container does not shorten the path");
                return Ok(self.exhausted(&parent, probes));
            }
            current = parent;
        }
        warn!(target: "discovery", %current, max_depth = self.max_depth, "storage walk hit its depth ceiling");
        Ok(self.exhausted(&current, probes))
    }

    fn exhausted(&self, url: &Url, probes: usize) -> Discovery {
        let mut root = url.clone();
        root.set_path("/");
        Discovery {
            storage: root,
            probes,
            found: false,
        }
    }

    async fn is_storage(&self, url: &Url) -> Result<bool> {
        let response = self
            .fetcher
            .probe(url)
            .await
            .map_err(|source| ResolveError::Network {
                url: url.to_string(),
                source,
            })?;
        if !response.status.is_success() {
            debug!(target: "discovery", %url, status = %response.status, "probe answered without success");
            return Ok(false);
        }
        let found = has_storage_type(response.links());
        debug!(target: "discovery", %url, found, "probed container");
        Ok(found)
    }
}

/// Parses a WebID, which must be an absolute hierarchical http(s) URL.
pub(crate) fn web_id_url(web_id: &str) -> Result<Url> {
    let url = Url::parse(web_id).map_err(|error| ResolveError::InvalidUrl {
        url: web_id.to_string(),
        reason: error.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ResolveError::InvalidUrl {
            url: web_id.to_string(),
            reason: "expected a hierarchical http(s) URL".to_string(),
        });
    }
    Ok(url)
}

/// The WebID without fragment or query.
fn start_url(web_id: &str) -> Result<Url> {
    let mut url = web_id_url(web_id)?;
    url.set_fragment(None);
    url.set_query(None);
    Ok(url)
}

/// `https://h/a/b` and `https://h/a/b/` both climb to `https://h/a/`.
fn parent_container(url: &Url) -> Result<Url> {
    let up = if url.path().ends_with('/') {
        "../"
    } else {
        "/../"
    };
    let joined = format!("{url}{up}");
    Url::parse(&joined).map_err(|error| ResolveError::InvalidUrl {
        url: joined,
        reason: error.to_string(),
    })
}
