use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Value shipped in sample configs in place of a real key
pub const PLACEHOLDER_API_KEY: &str = "YOUR_OPENAI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Clone, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Locally persisted user settings holding `openai_api_key`
    #[serde(default = "default_user_settings_path")]
    pub user_settings_path: PathBuf,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            user_settings_path: default_user_settings_path(),
        }
    }
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_deref().map(mask_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_settings_path", &self.user_settings_path)
            .finish()
    }
}

fn default_true() -> bool { true }
fn default_base_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_model() -> String { "gpt-4".to_string() }
fn default_timeout_secs() -> u64 { 20 }
fn default_user_settings_path() -> PathBuf { PathBuf::from("config/user.toml") }

impl OpenAiSettings {
    /// Resolve the credential once: environment first, then user settings
    pub fn resolve_api_key(&self) -> Option<ApiKey> {
        let user = UserSettings::load(&self.user_settings_path);
        resolve_api_key(
            self.api_key.as_deref(),
            user.as_ref().and_then(|u| u.openai_api_key.as_deref()),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
    #[serde(default = "default_min_overlap_hours")]
    pub min_overlap_hours: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_top_k: default_max_top_k(),
            min_overlap_hours: default_min_overlap_hours(),
        }
    }
}

fn default_top_k() -> usize { 3 }
fn default_max_top_k() -> usize { 50 }
fn default_min_overlap_hours() -> f64 { 2.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_common_date_weight")]
    pub common_date: f64,
    #[serde(default = "default_overlap_hour_weight")]
    pub overlap_hour: f64,
    #[serde(default = "default_shared_genre_weight")]
    pub shared_genre: f64,
    #[serde(default = "default_complementary_role_weight")]
    pub complementary_role: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            common_date: default_common_date_weight(),
            overlap_hour: default_overlap_hour_weight(),
            shared_genre: default_shared_genre_weight(),
            complementary_role: default_complementary_role_weight(),
        }
    }
}

fn default_common_date_weight() -> f64 { 10.0 }
fn default_overlap_hour_weight() -> f64 { 5.0 }
fn default_shared_genre_weight() -> f64 { 2.0 }
fn default_complementary_role_weight() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SESH__)
    /// 5. OPENAI_API_KEY, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SESH__OPENAI__MODEL -> openai.model
            .add_source(
                Environment::with_prefix("SESH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }
}

/// Apply well-known provider variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        builder = builder.set_override("openai.api_key", api_key)?;
    }
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        builder = builder.set_override("openai.base_url", base_url)?;
    }

    builder.build()
}

/// Settings a user saved locally (the preferences panel writes this file)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

impl UserSettings {
    /// Read the file if it exists; a missing or unreadable file yields `None`
    pub fn load(path: &Path) -> Option<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read user settings {}: {}", path.display(), e);
                return None;
            }
        };

        match toml::from_str(&raw) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring malformed user settings {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// A usable provider credential
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Accept a raw key unless it is blank or the sample placeholder
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER_API_KEY {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_key(&self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "[key too short to mask]".to_string()
    }
}

/// Pick the first usable credential; a placeholder in the environment does
/// not shadow a real key in user settings
pub fn resolve_api_key(env_value: Option<&str>, user_value: Option<&str>) -> Option<ApiKey> {
    if let Some(key) = env_value.and_then(ApiKey::parse) {
        tracing::debug!("Using API key from environment");
        return Some(key);
    }
    if let Some(key) = user_value.and_then(ApiKey::parse) {
        tracing::debug!("Using API key from user settings");
        return Some(key);
    }
    None
}
