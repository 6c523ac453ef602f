use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) http: HttpConfig,
    pub(crate) discovery: DiscoveryConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct HttpConfig {
    pub(crate) timeout_ms: u64,
    pub(crate) user_agent: String,
    /// Media type requested for profile documents.
    pub(crate) accept: String,
    /// Bearer token of the signed-in session, sent with every request.
    pub(crate) access_token: Option<SecretString>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct DiscoveryConfig {
    /// Upper bound on storage probes issued by a single walk.
    pub(crate) max_depth: usize,
}

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: APP_USER_AGENT.to_string(),
            accept: "text/turtle".to_string(),
            access_token: None,
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

impl HttpConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    pub(crate) fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("unable to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use anyhow::Result;
    use secrecy::ExposeSecret;
    use tempfile::NamedTempFile;

    use super::Config;

    #[test]
    fn defaults_without_file() -> Result<()> {
        let config = Config::load(None)?;
        assert_eq!(config.http.timeout_ms, 10_000);
        assert_eq!(config.http.accept, "text/turtle");
        assert!(config.http.user_agent.starts_with("podfinder/"));
        assert!(config.http.access_token.is_none());
        assert_eq!(config.discovery.max_depth, 32);
        Ok(())
    }

    #[test]
    fn partial_file_keeps_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            r#"
[http]
timeout_ms = 2500
access_token = "s3cret"

[discovery]
max_depth = 4
"#
        )?;
        let config = Config::load(Some(file.path()))?;
        assert_eq!(config.http.timeout_ms, 2500);
        assert_eq!(config.http.accept, "text/turtle");
        assert_eq!(
            config.http.access_token.as_ref().map(|t| t.expose_secret()),
            Some("s3cret")
        );
        assert_eq!(config.discovery.max_depth, 4);
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[http\ntimeout_ms = ")?;
        let error = Config::load(Some(file.path())).unwrap_err();
        assert!(error.to_string().contains("unable to parse config file"));
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let error = Config::load(Some(Path::new("/nonexistent/podfinder.toml"))).unwrap_err();
        assert!(error.to_string().contains("unable to read config file"));
    }
}
