//! Profile resolution: one fetch of the WebID document, one lookup per
//! attribute, storage discovery when the profile names no storage.

use std::fmt;

use reqwest::Url;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::discovery::{StorageWalker, web_id_url};
use crate::document::fetch_document;
use crate::error::Result;
use crate::http::Fetch;
use crate::rdf::QuadStore;
use crate::rdf::vocab::{
    FOAF_NAME, PIM_PREFERENCES_FILE, PIM_STORAGE, SOLID_PRIVATE_TYPE_INDEX,
    SOLID_PUBLIC_TYPE_INDEX, VCARD_FN,
};

/// Well-known profile attributes and the predicates carrying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attribute {
    Name,
    FormattedName,
    Preferences,
    PublicTypeIndex,
    PrivateTypeIndex,
    Storage,
}

const NOT_FOUND: &str = "hmm, not found";

impl Attribute {
    pub(crate) const ALL: [Attribute; 6] = [
        Attribute::Name,
        Attribute::FormattedName,
        Attribute::Preferences,
        Attribute::PublicTypeIndex,
        Attribute::PrivateTypeIndex,
        Attribute::Storage,
    ];

    pub(crate) const fn predicate(self) -> &'static str {
        match self {
            Attribute::Name => FOAF_NAME,
            Attribute::FormattedName => VCARD_FN,
            Attribute::Preferences => PIM_PREFERENCES_FILE,
            Attribute::PublicTypeIndex => SOLID_PUBLIC_TYPE_INDEX,
            Attribute::PrivateTypeIndex => SOLID_PRIVATE_TYPE_INDEX,
            Attribute::Storage => PIM_STORAGE,
        }
    }

    /// Value used when the profile lacks the attribute. Storage never
    /// falls back to this; it is discovered instead.
    pub(crate) const fn default_value(self) -> &'static str {
        match self {
            Attribute::Name | Attribute::FormattedName => "Anonymous",
            Attribute::Preferences
            | Attribute::PublicTypeIndex
            | Attribute::PrivateTypeIndex
            | Attribute::Storage => NOT_FOUND,
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::FormattedName => "formatted name",
            Attribute::Preferences => "preferences file",
            Attribute::PublicTypeIndex => "public type index",
            Attribute::PrivateTypeIndex => "private type index",
            Attribute::Storage => "storage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResolvedProfile {
    pub(crate) web_id: String,
    pub(crate) name: String,
    #[serde(rename = "fn")]
    pub(crate) formatted_name: String,
    pub(crate) preferences: String,
    pub(crate) public_type_index: String,
    pub(crate) private_type_index: String,
    pub(crate) storage: String,
}

impl ResolvedProfile {
    pub(crate) fn get(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Name => &self.name,
            Attribute::FormattedName => &self.formatted_name,
            Attribute::Preferences => &self.preferences,
            Attribute::PublicTypeIndex => &self.public_type_index,
            Attribute::PrivateTypeIndex => &self.private_type_index,
            Attribute::Storage => &self.storage,
        }
    }
}

impl fmt::Display for ResolvedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "webid: {}", self.web_id)?;
        for attribute in Attribute::ALL {
            writeln!(f, "{}: {}", attribute.label(), self.get(attribute))?;
        }
        Ok(())
    }
}

pub(crate) struct Resolver<F> {
    fetcher: F,
    accept: String,
    max_depth: usize,
}

impl<F: Fetch> Resolver<F> {
    pub(crate) fn new(fetcher: F, config: &Config) -> Self {
        Resolver {
            fetcher,
            accept: config.http.accept.clone(),
            max_depth: config.discovery.max_depth,
        }
    }

    pub(crate) async fn resolve(&self, web_id: &str) -> Result<ResolvedProfile> {
        let url = web_id_url(web_id)?;
        let store = fetch_document(&self.fetcher, &url, &self.accept).await?;
        debug!(target: "profile", %web_id, quads = store.len(), "fetched profile document");

        let value = |attribute: Attribute| {
            store
                .extract(attribute.predicate(), attribute.default_value())
                .to_string()
        };
        let storage = match declared_storage(&store) {
            Some(storage) => storage.to_string(),
            None => self.discover_storage(web_id).await?.to_string(),
        };
        let profile = ResolvedProfile {
            web_id: web_id.to_string(),
            name: value(Attribute::Name),
            formatted_name: value(Attribute::FormattedName),
            preferences: value(Attribute::Preferences),
            public_type_index: value(Attribute::PublicTypeIndex),
            private_type_index: value(Attribute::PrivateTypeIndex),
            storage,
        };
        info!(target: "profile", %web_id, storage = %profile.storage, "resolved profile");
        Ok(profile)
    }

    /// Runs only the storage walk, ignoring any storage the profile declares.
    pub(crate) async fn discover_storage(&self, web_id: &str) -> Result<Url> {
        let discovery = StorageWalker::new(&self.fetcher, self.max_depth)
            .discover(web_id)
            .await?;
        Ok(discovery.storage)
    }
}

fn declared_storage(store: &QuadStore) -> Option<&str> {
    store
        .first_object(Attribute::Storage.predicate())
        .map(|term| term.value())
}
