//! Runtime settings
//!
//! Settings come from environment variables, and the CLI may override
//! individual values with flags.
//!
//! | Variable            | Meaning                                   |
//! |---------------------|-------------------------------------------|
//! | `GHRP_API_URL`      | REST API base (default `https://api.github.com`) |
//! | `GHRP_GITHUB_URL`   | Web/download base (default `https://github.com`) |
//! | `GITHUB_TOKEN`      | Bearer token for API requests             |
//! | `GHRP_HTTP_TIMEOUT` | Request timeout in seconds (5-300)        |
//! | `GHRP_TMPDIR`       | Parent directory for scratch directories  |

use std::path::PathBuf;
use std::time::Duration;

/// Default GitHub API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Default GitHub web base URL (release downloads live under it)
pub const GITHUB_URL: &str = "https://github.com";

pub const ENV_API_URL: &str = "GHRP_API_URL";
pub const ENV_GITHUB_URL: &str = "GHRP_GITHUB_URL";
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_HTTP_TIMEOUT: &str = "GHRP_HTTP_TIMEOUT";
pub const ENV_TMPDIR: &str = "GHRP_TMPDIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub github_url: String,
    pub token: Option<String>,
    /// `None` leaves the transport default in place.
    pub http_timeout: Option<Duration>,
    /// Parent for per-install scratch directories; `None` uses the system temp dir.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            github_url: GITHUB_URL.to_string(),
            token: None,
            http_timeout: None,
            scratch_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = Self::default();
        Self {
            api_url: non_empty(ENV_API_URL)
                .map(|u| trim_base(&u))
                .unwrap_or(defaults.api_url),
            github_url: non_empty(ENV_GITHUB_URL)
                .map(|u| trim_base(&u))
                .unwrap_or(defaults.github_url),
            token: non_empty(ENV_TOKEN),
            http_timeout: non_empty(ENV_HTTP_TIMEOUT)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(|secs| Duration::from_secs(secs.clamp(5, 300))),
            scratch_dir: non_empty(ENV_TMPDIR).map(PathBuf::from),
        }
    }

    pub fn with_api_url(mut self, url: impl AsRef<str>) -> Self {
        self.api_url = trim_base(url.as_ref());
        self
    }

    pub fn with_github_url(mut self, url: impl AsRef<str>) -> Self {
        self.github_url = trim_base(url.as_ref());
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
