use std::sync::Arc;
use std::time::Duration;

use crate::config::{ChefConfig, KitchenConfig, ProviderConfig};
use crate::controller::RecipeController;
use crate::providers::{FallbackProvider, ProviderFactory, RecipeGenerator};
use crate::session::Session;
use crate::ChefError;

/// Hosted model to generate recipes with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic,
    OpenAI,
    Ollama,
}

impl LlmProvider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Ollama => "ollama",
        }
    }
}

/// Builder for a [`RecipeController`]
#[derive(Default)]
pub struct KitchenBuilder {
    config: Option<ChefConfig>,
    generator: Option<Arc<dyn RecipeGenerator>>,
    provider: Option<LlmProvider>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    min_ingredients: Option<usize>,
    max_ingredients: Option<usize>,
    seed: Option<Vec<String>>,
}

impl KitchenBuilder {
    /// Start from an already loaded configuration instead of reading
    /// `config.toml` and the environment
    pub fn config(mut self, config: ChefConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom recipe generator; provider settings are then ignored
    ///
    /// # Example
    /// ```no_run
    /// # use std::sync::Arc;
    /// use pantry_chef::{Kitchen, providers::OllamaProvider, ProviderConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    /// let ollama = OllamaProvider::new(&ProviderConfig::for_model("llama3.1"))?;
    /// let controller = Kitchen::builder().generator(Arc::new(ollama)).build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn generator(mut self, generator: Arc<dyn RecipeGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Pick the LLM provider
    ///
    /// # Example
    /// ```
    /// use pantry_chef::{Kitchen, LlmProvider};
    ///
    /// let builder = Kitchen::builder()
    ///     .provider(LlmProvider::Anthropic);
    /// ```
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the LLM provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a different endpoint (proxy, local server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Bound each recipe request
    ///
    /// # Example
    /// ```
    /// use pantry_chef::Kitchen;
    /// use std::time::Duration;
    ///
    /// let builder = Kitchen::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn min_ingredients(mut self, min: usize) -> Self {
        self.min_ingredients = Some(min);
        self
    }

    pub fn max_ingredients(mut self, max: usize) -> Self {
        self.max_ingredients = Some(max);
        self
    }

    /// Replace the starting ingredients
    pub fn seed<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    /// Assemble the controller
    ///
    /// # Errors
    /// Returns `ChefError` if:
    /// - the limits are inconsistent (min above max, max of zero)
    /// - configuration cannot be loaded when it is needed
    /// - the selected provider cannot be created (unknown, disabled, no key)
    pub fn build(self) -> Result<RecipeController, ChefError> {
        let explicit_provider =
            self.provider.is_some() || self.api_key.is_some() || self.model.is_some();

        // Only touch the filesystem and environment when something is missing.
        let config = match self.config {
            Some(config) => config,
            None if self.generator.is_some() || explicit_provider => ChefConfig::default(),
            None => ChefConfig::load()?,
        };

        let kitchen = KitchenConfig {
            min_ingredients: self
                .min_ingredients
                .unwrap_or(config.kitchen.min_ingredients),
            max_ingredients: self
                .max_ingredients
                .unwrap_or(config.kitchen.max_ingredients),
            seed_ingredients: self
                .seed
                .unwrap_or_else(|| config.kitchen.seed_ingredients.clone()),
        };
        let session = Session::new(&kitchen)?;

        let timeout = self.timeout.unwrap_or_else(|| config.timeout());

        let generator: Arc<dyn RecipeGenerator> = match self.generator {
            Some(generator) => generator,
            None if explicit_provider => {
                let name = self
                    .provider
                    .map(|p| p.as_str())
                    .unwrap_or(config.default_provider.as_str());
                let mut provider_config = match config.providers.get(name) {
                    Some(existing) => existing.clone(),
                    None => ProviderConfig::for_model(
                        ProviderFactory::default_model(name).unwrap_or_default(),
                    ),
                };
                if let Some(key) = self.api_key {
                    provider_config.api_key = Some(key);
                }
                if let Some(model) = self.model {
                    provider_config.model = model;
                }
                if self.base_url.is_some() {
                    provider_config.base_url = self.base_url;
                }
                ProviderFactory::create(name, &provider_config)
                    .map(Arc::from)
                    .map_err(|e| ChefError::ProviderError(e.to_string()))?
            }
            None => Arc::new(
                FallbackProvider::new(&config)
                    .map_err(|e| ChefError::ProviderError(e.to_string()))?,
            ),
        };

        Ok(RecipeController::new(session, generator, timeout))
    }
}

/// Main entry point for the builder API
pub struct Kitchen;

impl Kitchen {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use pantry_chef::Kitchen;
    ///
    /// let builder = Kitchen::builder();
    /// ```
    pub fn builder() -> KitchenBuilder {
        KitchenBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names() {
        assert_eq!(LlmProvider::Anthropic.as_str(), "anthropic");
        assert_eq!(LlmProvider::OpenAI.as_str(), "openai");
        assert_eq!(LlmProvider::Ollama.as_str(), "ollama");
    }

    #[tokio::test]
    async fn test_explicit_provider() {
        let controller = Kitchen::builder()
            .provider(LlmProvider::Anthropic)
            .api_key("test-key")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(controller.provider_name(), "anthropic");
        assert_eq!(controller.timeout(), Duration::from_secs(5));
        assert_eq!(controller.view().await.ingredients.len(), 5);
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let result = Kitchen::builder()
            .provider(LlmProvider::Ollama)
            .min_ingredients(6)
            .max_ingredients(4)
            .build();
        assert!(matches!(result, Err(ChefError::InvalidLimits(_))));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let result = Kitchen::builder()
            .provider(LlmProvider::Ollama)
            .min_ingredients(0)
            .max_ingredients(0)
            .build();
        assert!(matches!(result, Err(ChefError::InvalidLimits(_))));
    }

    #[test]
    fn test_unconfigured_default_provider_fails() {
        let result = Kitchen::builder().config(ChefConfig::default()).build();
        assert!(matches!(result, Err(ChefError::ProviderError(_))));
    }
}
