use crate::error::{MirrorError, Result};
use crate::paths;
use std::path::{Path, PathBuf};
use url::Url;

/// The site being mirrored: start URL, host identity and the local root.
///
/// Built once per run and read-only afterwards. `host` and `port` form the
/// same-site boundary for every link decision.
#[derive(Debug, Clone)]
pub struct MirrorTarget {
    start_url: Url,
    host: String,
    port: Option<u16>,
    root_dir: PathBuf,
}

impl MirrorTarget {
    /// Parse a user supplied start URL. A missing scheme defaults to https.
    pub fn parse(input: &str, output_dir: &Path) -> Result<Self> {
        let input = input.trim();
        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{}", input)
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| MirrorError::UrlResolution(format!("{}: {}", input, e)))?;
        Self::new(url, output_dir)
    }

    pub fn new(mut start_url: Url, output_dir: &Path) -> Result<Self> {
        if start_url.scheme() != "http" && start_url.scheme() != "https" {
            return Err(MirrorError::UrlResolution(format!(
                "unsupported scheme '{}' in {}",
                start_url.scheme(),
                start_url
            )));
        }

        let host = start_url
            .host_str()
            .ok_or_else(|| MirrorError::UrlResolution(format!("no host in {}", start_url)))?
            .to_string();
        let port = start_url.port();
        start_url.set_fragment(None);

        let dir_name = match port {
            Some(port) => format!("{}_{}", host, port),
            None => host.clone(),
        };

        Ok(Self {
            start_url,
            host,
            port,
            root_dir: output_dir.join(dir_name),
        })
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Same host string and same explicit port.
    pub fn is_same_host(&self, url: &Url) -> bool {
        url.host_str() == Some(self.host.as_str()) && url.port() == self.port
    }

    pub fn local_path(&self, url: &Url) -> PathBuf {
        paths::local_path(&self.root_dir, url)
    }
}
