//! Configuration loading for psychoguardd.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.psychoguard/config.toml` (user)
//! 3. `/etc/psychoguard/config.toml` (system)
//! 4. built-in defaults
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.psychoguard/secrets.toml` (user, must be 0600)
//! 2. `/etc/psychoguard/secrets.toml` (system, must be 0600)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::ScoringConfig;
use crate::providers::huggingface::DEFAULT_BASE_URL;
use crate::{PsychoGuardError, Result};

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000).
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:8000".to_string()
}

/// Hosted inference endpoint used for text and image classification.
#[derive(Debug, Clone, Deserialize)]
pub struct HuggingFaceConfig {
    #[serde(default = "default_hf_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 60).
    #[serde(default = "default_hf_timeout")]
    pub timeout_secs: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_hf_url(),
            timeout_secs: default_hf_timeout(),
        }
    }
}

fn default_hf_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_hf_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    /// Set to false to serve `{available: false}` for every image.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Request timeout in seconds (default: 120).
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_llm_timeout() -> u64 {
    120
}

/// Fonts for PDF rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_font_dir")]
    pub font_dir: PathBuf,
    /// Family name; files are `<family>-Regular.ttf`, `-Bold`, `-Italic`, `-BoldItalic`.
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            font_dir: default_font_dir(),
            font_family: default_font_family(),
        }
    }
}

fn default_font_dir() -> PathBuf {
    PathBuf::from("/usr/share/fonts/truetype/liberation")
}

fn default_font_family() -> String {
    "LiberationSans".to_string()
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub anthropic: Option<ApiKeySecret>,
    #[serde(default)]
    pub huggingface: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

/// Provider name → environment variable name mapping.
const PROVIDER_ENV_VARS: &[(&str, &str)] = &[
    ("anthropic", "ANTHROPIC_API_KEY"),
    ("huggingface", "HF_API_KEY"),
];

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first existing file of
    /// `~/.psychoguard/config.toml` and `/etc/psychoguard/config.toml` is
    /// used, or the defaults if neither exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PsychoGuardError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            PsychoGuardError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(PsychoGuardError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".psychoguard").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/psychoguard/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Resolution order:
    /// 1. `~/.psychoguard/secrets.toml` (if exists, must be 0600)
    /// 2. `/etc/psychoguard/secrets.toml` (if exists, must be 0600)
    ///
    /// Returns empty secrets if no file exists (keys may come from env vars).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".psychoguard").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/psychoguard/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load one secrets file after checking its permissions.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            PsychoGuardError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            PsychoGuardError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            PsychoGuardError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(PsychoGuardError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// Get API key for a provider, falling back to the corresponding environment variable.
    pub fn api_key(&self, provider: &str) -> Option<String> {
        let from_file = match provider {
            "anthropic" => self.anthropic.as_ref(),
            "huggingface" => self.huggingface.as_ref(),
            _ => None,
        }
        .map(|s| s.api_key.clone());

        from_file
            .or_else(|| {
                PROVIDER_ENV_VARS
                    .iter()
                    .find(|(name, _)| *name == provider)
                    .and_then(|(_, env_var)| std::env::var(env_var).ok())
            })
            .filter(|key| !key.is_empty())
    }
}
