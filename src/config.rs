use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ChefConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Fallback configuration for automatic provider switching
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Ingredient list limits and seed
    #[serde(default)]
    pub kitchen: KitchenConfig,
    /// Recipe request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "claude-3-haiku-20240307", "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// An enabled provider config with default sampling settings
    pub fn for_model(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Configuration for provider fallback and retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// Whether fallback is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Order of providers to try (first to last)
    #[serde(default)]
    pub order: Vec<String>,
    /// Number of retry attempts per provider before fallback
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Initial delay between retries in milliseconds (grows with each attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Bounds and starting contents of the ingredient list
#[derive(Debug, Deserialize, Clone)]
pub struct KitchenConfig {
    /// Ingredients required before a recipe can be requested
    #[serde(default = "default_min_ingredients")]
    pub min_ingredients: usize,
    /// Hard upper bound on the list size
    #[serde(default = "default_max_ingredients")]
    pub max_ingredients: usize,
    /// Ingredients present when a session starts
    #[serde(default = "default_seed_ingredients")]
    pub seed_ingredients: Vec<String>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            min_ingredients: default_min_ingredients(),
            max_ingredients: default_max_ingredients(),
            seed_ingredients: default_seed_ingredients(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_min_ingredients() -> usize {
    5
}

fn default_max_ingredients() -> usize {
    10
}

fn default_seed_ingredients() -> Vec<String> {
    ["chicken", "all the main spices", "corn", "heavy cream", "pasta"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ChefConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            fallback: FallbackConfig::default(),
            kitchen: KitchenConfig::default(),
            timeout: default_timeout(),
        }
    }
}

impl ChefConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PANTRY_CHEF__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: PANTRY_CHEF__PROVIDERS__ANTHROPIC__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`ChefConfig::load`] for the lookup order.
pub fn load_config() -> Result<ChefConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: PANTRY_CHEF__KITCHEN__MAX_INGREDIENTS
        .add_source(
            Environment::with_prefix("PANTRY_CHEF")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Parse configuration from a TOML string
pub fn parse_config(toml: &str) -> Result<ChefConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()
}
