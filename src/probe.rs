//! Fast-path detection for documentation sites.
//!
//! Many documentation sites publish an `llms.txt` family manifest that is
//! far cheaper to download than scraping every page. Probing is strictly
//! best-effort: every failure is a miss, because full scraping remains
//! available.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::FetchError;

/// Manifest file names in priority order, with the variant each one denotes.
pub const FAST_PATH_VARIANTS: [(&str, &str); 3] = [
    ("llms-full.txt", "full"),
    ("llms.txt", "standard"),
    ("llms-small.txt", "small"),
];

/// A fast-path manifest location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastPathManifest {
    pub url: String,
    pub variant: &'static str,
}

/// Checks documentation sites for fast-path manifests.
#[derive(Debug, Clone)]
pub struct FastPathProbe {
    client: Client,
}

impl FastPathProbe {
    /// Build a probe whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// First manifest that exists for `doc_url`, if any.
    pub fn probe(&self, doc_url: &str) -> Option<FastPathManifest> {
        let hit = candidate_manifests(doc_url)
            .into_iter()
            .find(|candidate| self.exists(&candidate.url));
        match &hit {
            Some(manifest) => info!(url = %manifest.url, variant = manifest.variant, "fast path found"),
            None => debug!(doc_url, "no fast path"),
        }
        hit
    }

    /// Every manifest that exists for `doc_url`, in priority order.
    pub fn probe_all(&self, doc_url: &str) -> Vec<FastPathManifest> {
        candidate_manifests(doc_url)
            .into_iter()
            .filter(|candidate| self.exists(&candidate.url))
            .collect()
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    pub fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let download_error = |err: reqwest::Error| FetchError::Download {
            url: url.to_string(),
            detail: err.to_string(),
        };
        let body = self
            .client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::bytes)
            .map_err(download_error)?;
        fs::write(dest, &body).map_err(|source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        debug!(url, dest = %dest.display(), bytes = body.len(), "downloaded");
        Ok(body.len() as u64)
    }

    fn exists(&self, url: &str) -> bool {
        match self.client.head(url).send() {
            Ok(response) => {
                debug!(url, status = %response.status(), "probed");
                response.status().is_success()
            }
            Err(err) => {
                debug!(url, error = %err, "probe failed");
                false
            }
        }
    }
}

/// Candidate manifest URLs for `doc_url`, most preferred first.
///
/// The site root comes first, then the first path segment (the usual
/// `/docs/` mount point) when there is one. URLs that already point at a
/// `.txt` document, or are not http(s), have no candidates.
pub fn candidate_manifests(doc_url: &str) -> Vec<FastPathManifest> {
    let Ok(url) = Url::parse(doc_url.trim()) else {
        return Vec::new();
    };
    if !matches!(url.scheme(), "http" | "https") || url.path().ends_with(".txt") {
        return Vec::new();
    }

    let root = format!("{}/", url.origin().ascii_serialization());
    let mut bases = vec![root.clone()];
    if let Some(segment) = url
        .path_segments()
        .and_then(|mut segments| segments.find(|segment| !segment.is_empty()))
    {
        let is_directory = !segment.contains('.')
            || url.path().trim_start_matches('/').len() > segment.len();
        if is_directory {
            bases.push(format!("{root}{segment}/"));
        }
    }

    bases
        .iter()
        .flat_map(|base| {
            FAST_PATH_VARIANTS
                .iter()
                .map(move |&(file, variant)| FastPathManifest {
                    url: format!("{base}{file}"),
                    variant,
                })
        })
        .collect()
}
