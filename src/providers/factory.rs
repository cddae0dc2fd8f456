use crate::config::{ChefConfig, ProviderConfig};
use crate::providers::{AnthropicProvider, OllamaProvider, OpenAIProvider, RecipeGenerator};
use std::error::Error;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn RecipeGenerator>, Box<dyn Error + Send + Sync>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            "ollama" => Ok(Box::new(OllamaProvider::new(config)?)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &ChefConfig,
    ) -> Result<Box<dyn RecipeGenerator>, Box<dyn Error + Send + Sync>> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            format!(
                "Default provider '{}' not found in configuration",
                provider_name
            )
        })?;

        Self::create(provider_name, provider_config)
    }

    /// Model used when a provider is picked without configuration
    pub fn default_model(provider_name: &str) -> Option<&'static str> {
        match provider_name {
            "anthropic" => Some("claude-3-haiku-20240307"),
            "openai" => Some("gpt-4o-mini"),
            "ollama" => Some("llama3.1"),
            _ => None,
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["anthropic", "openai", "ollama"]
    }
}
