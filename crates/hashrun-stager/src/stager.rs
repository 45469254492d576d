//! Resolution of target descriptions into local files.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::StageError;
use crate::target::TargetSpec;
use crate::unpack::unpack;

/// File name used when a download URL has no usable last segment.
const FALLBACK_FILE_NAME: &str = "download.bin";

/// File an inline target is written to.
const INLINE_FILE_NAME: &str = "target.hash";

/// Stager configuration.
#[derive(Debug, Clone)]
pub struct StagerConfig {
    /// Directory staged files are written to.
    pub work_dir: PathBuf,

    /// Upper bound for a whole download.
    pub request_timeout: Duration,
}

impl Default for StagerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/tmp"),
            request_timeout: Duration::from_secs(30 * 60),
        }
    }
}

/// Stages hash lists and wordlists into the work directory.
#[derive(Debug, Clone)]
pub struct ArtifactStager {
    config: StagerConfig,
    client: reqwest::Client,
}

impl ArtifactStager {
    pub fn new(config: StagerConfig) -> Result<Self, StageError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Resolve `spec` into one or more local files.
    pub async fn stage(&self, spec: &TargetSpec) -> Result<Vec<PathBuf>, StageError> {
        match spec {
            TargetSpec::Local(path) => {
                info!(path = %path.display(), "Using local file");
                Ok(vec![path.clone()])
            }
            TargetSpec::Inline(value) => self.write_inline(value).await.map(|path| vec![path]),
            TargetSpec::Url(url) => self.fetch(url).await,
        }
    }

    async fn write_inline(&self, value: &str) -> Result<PathBuf, StageError> {
        let path = self.config.work_dir.join(INLINE_FILE_NAME);
        tokio::fs::write(&path, format!("{}\n", value.trim()))
            .await
            .map_err(|source| StageError::Write {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "Wrote inline hash");
        Ok(path)
    }

    /// Download `url` and unpack it into the work directory.
    async fn fetch(&self, url: &str) -> Result<Vec<PathBuf>, StageError> {
        info!(url = %url, "Downloading");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Name the file after the final URL, after redirects.
        let file_name = file_name_from_url(response.url());
        let content = response.bytes().await?;
        debug!(file_name = %file_name, bytes = content.len(), "Download complete");

        let work_dir = self.config.work_dir.clone();
        tokio::task::spawn_blocking(move || unpack(&work_dir, &file_name, &content)).await?
    }
}

fn file_name_from_url(url: &reqwest::Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .filter(|name| *name != "." && *name != "..")
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}
